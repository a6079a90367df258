use alloc::vec::Vec;

use gx_utils::AddrKey;
use gx_utils::hash::HashMap;
use gx_utils::hash::hashbrown::hash_map::Entry;

// -----------------------------------------------------------------------------
// IdentityCache

/// Repeat detection for shared instances during one encode call.
///
/// Elements are addressed by their path of child indices from the root.
/// The first sighting of an instance is encoded in full; later sightings
/// become empty back-references. Ids are handed out by
/// [`into_shared`](Self::into_shared) once the whole tree exists, so only
/// instances that really repeat get one, numbered from 0 in the order
/// they were first met.
///
/// The key carries the pointee `TypeId`, so instances of different types
/// never collide.
///
/// ```
/// use std::rc::Rc;
/// use gx_reflect::codec::IdentityCache;
/// use gx_utils::AddrKey;
///
/// let a = Rc::new(1_u8);
/// let key = AddrKey::of::<u8>(Rc::as_ptr(&a));
///
/// let mut cache = IdentityCache::new();
/// assert!(cache.try_register(key, &[0]));
/// assert!(!cache.try_register(key, &[2, 1]));
///
/// let shared = cache.into_shared();
/// assert_eq!(shared.len(), 1);
/// assert_eq!(shared[0].id(), 0);
/// assert_eq!(shared[0].paths(), [vec![0], vec![2, 1]]);
/// ```
#[derive(Debug, Default)]
pub struct IdentityCache {
    seen: HashMap<AddrKey, usize>,
    records: Vec<Record>,
}

#[derive(Debug)]
struct Record {
    first: Vec<usize>,
    repeats: Vec<Vec<usize>>,
}

impl IdentityCache {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one sighting of `key` at `path`.
    ///
    /// Returns `true` on the first sighting, when the caller must encode
    /// the instance in full.
    pub fn try_register(&mut self, key: AddrKey, path: &[usize]) -> bool {
        match self.seen.entry(key) {
            Entry::Occupied(entry) => {
                self.records[*entry.get()].repeats.push(path.to_vec());
                false
            }
            Entry::Vacant(entry) => {
                entry.insert(self.records.len());
                self.records.push(Record {
                    first: path.to_vec(),
                    repeats: Vec::new(),
                });
                true
            }
        }
    }

    /// Number of distinct instances seen.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Assigns ids to the instances seen more than once.
    pub fn into_shared(self) -> Vec<SharedOccurrence> {
        self.records
            .into_iter()
            .filter(|record| !record.repeats.is_empty())
            .enumerate()
            .map(|(id, record)| {
                let mut paths = Vec::with_capacity(record.repeats.len() + 1);
                paths.push(record.first);
                paths.extend(record.repeats);
                SharedOccurrence { id, paths }
            })
            .collect()
    }
}

// -----------------------------------------------------------------------------
// SharedOccurrence

/// Every element of one repeated instance, first occurrence first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedOccurrence {
    id: usize,
    paths: Vec<Vec<usize>>,
}

impl SharedOccurrence {
    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    #[inline]
    pub fn paths(&self) -> &[Vec<usize>] {
        &self.paths
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec;

    use gx_utils::AddrKey;

    use super::IdentityCache;

    #[test]
    fn singletons_get_no_id() {
        let a = Rc::new(1_i32);
        let b = Rc::new(2_i32);
        let c = Rc::new(3_i32);
        let key = |rc: &Rc<i32>| AddrKey::of::<i32>(Rc::as_ptr(rc));

        let mut cache = IdentityCache::new();
        assert!(cache.try_register(key(&a), &[0]));
        assert!(cache.try_register(key(&b), &[1]));
        assert!(cache.try_register(key(&c), &[2]));
        assert!(!cache.try_register(key(&c), &[3]));
        assert!(!cache.try_register(key(&a), &[4]));
        assert_eq!(cache.len(), 3);

        let shared = cache.into_shared();
        assert_eq!(shared.len(), 2);
        assert_eq!(shared[0].id(), 0);
        assert_eq!(shared[0].paths(), [vec![0], vec![4]]);
        assert_eq!(shared[1].id(), 1);
        assert_eq!(shared[1].paths(), [vec![2], vec![3]]);
    }

    #[test]
    fn keys_are_per_type() {
        let a = Rc::new(0_u64);
        let ptr = Rc::as_ptr(&a);

        let mut cache = IdentityCache::new();
        assert!(cache.try_register(AddrKey::of::<u64>(ptr), &[]));
        assert!(cache.try_register(AddrKey::of::<u32>(ptr.cast()), &[0]));
        assert!(cache.into_shared().is_empty());
    }
}
