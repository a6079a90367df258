use alloc::string::String;
use core::any::TypeId;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use gx_utils::TypeIdMap;
use gx_utils::hash::{FixedHashState, HashMap, HashSet};

use crate::info::{TypeInfo, Typed};
use crate::ops::Dynamic;
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeTrait};

// -----------------------------------------------------------------------------
// TypeRegistry

/// The store of registered types.
///
/// Types are indexed by [`TypeId`], by full [type path] and by short
/// [type name]. A short name shared by several registered types is
/// ambiguous and no longer resolves.
///
/// ```
/// use gx_reflect::registry::{TypeRegistry, TypeTraitDefault};
///
/// let registry = TypeRegistry::new();
///
/// let meta = registry.resolve("alloc::string::String").unwrap();
/// assert!(core::ptr::eq(meta, registry.resolve("String").unwrap()));
///
/// let s = meta.get_trait::<TypeTraitDefault>().unwrap().default();
/// assert_eq!(s.take::<String>().unwrap(), "");
/// ```
///
/// [type path]: crate::info::TypePath::type_path
/// [type name]: crate::info::TypePath::type_name
pub struct TypeRegistry {
    type_meta_table: TypeIdMap<TypeMeta>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// A registry with nothing in it.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            type_meta_table: TypeIdMap::new(),
            type_path_to_id: HashMap::with_hasher(FixedHashState),
            type_name_to_id: HashMap::with_hasher(FixedHashState),
            ambiguous_names: HashSet::with_hasher(FixedHashState),
        }
    }

    /// A registry with the built-in scalar types and
    /// [`Dynamic`] registered.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<bool>();
        registry.register::<char>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<u64>();
        registry.register::<usize>();
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<isize>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<String>();
        registry.register::<chrono::NaiveDateTime>();
        registry.register::<rust_decimal::Decimal>();
        registry.register::<core::net::SocketAddr>();
        registry.register::<core::net::IpAddr>();
        registry.register::<Dynamic>();
        registry
    }

    // The type must not be present yet.
    fn add_new_type_indices(
        type_meta: &TypeMeta,
        type_path_to_id: &mut HashMap<&'static str, TypeId>,
        type_name_to_id: &mut HashMap<&'static str, TypeId>,
        ambiguous_names: &mut HashSet<&'static str>,
    ) {
        let ty = type_meta.ty();
        let type_name = ty.name();

        if !ambiguous_names.contains(type_name) {
            if type_name_to_id.contains_key(type_name) {
                type_name_to_id.remove(type_name);
                ambiguous_names.insert(type_name);
            } else {
                type_name_to_id.insert(type_name, ty.id());
            }
        }

        type_path_to_id.insert(ty.path(), ty.id());
    }

    fn register_internal(
        &mut self,
        type_id: TypeId,
        get_type_meta: impl FnOnce() -> TypeMeta,
    ) -> bool {
        self.type_meta_table.try_insert(type_id, || {
            let meta = get_type_meta();
            Self::add_new_type_indices(
                &meta,
                &mut self.type_path_to_id,
                &mut self.type_name_to_id,
                &mut self.ambiguous_names,
            );
            meta
        })
    }

    /// Inserts a meta unless its type is already registered. Returns
    /// `true` if it was inserted.
    ///
    /// Dependencies are not registered; see [`register`](Self::register).
    #[inline]
    pub fn try_insert_type_meta(&mut self, type_meta: TypeMeta) -> bool {
        self.register_internal(type_meta.type_id(), || type_meta)
    }

    /// Inserts a meta, replacing the trait table of an already registered type.
    pub fn insert_type_meta(&mut self, type_meta: TypeMeta) {
        if !self.type_meta_table.contains(&type_meta.type_id()) {
            Self::add_new_type_indices(
                &type_meta,
                &mut self.type_path_to_id,
                &mut self.type_name_to_id,
                &mut self.ambiguous_names,
            );
        }
        self.type_meta_table.insert(type_meta.type_id(), type_meta);
    }

    /// Registers `T` and, the first time, everything
    /// [`GetTypeMeta::register_dependencies`] names.
    ///
    /// Registering a type twice is a no-op.
    pub fn register<T: GetTypeMeta>(&mut self) {
        if self.register_internal(TypeId::of::<T>(), T::get_type_meta) {
            log::trace!("registered `{}`", T::type_path());
            T::register_dependencies(self);
        }
    }

    /// Registers the type of `value`.
    #[inline]
    pub fn register_by_val<T: GetTypeMeta>(&mut self, _: &T) {
        self.register::<T>();
    }

    /// Registers every type declared with `#[reflect(auto_register)]`
    /// or `impl_auto_register!`.
    ///
    /// Returns `true` if link-time collection works on this platform.
    /// Repeated calls are cheap. Without the `auto_register` feature this
    /// does nothing and returns `false`.
    ///
    /// ```no_run
    /// use core::any::TypeId;
    /// use gx_reflect::derive::Reflect;
    /// use gx_reflect::registry::TypeRegistry;
    ///
    /// #[derive(Reflect, Default)]
    /// #[reflect(auto_register)]
    /// struct Invoice {
    ///     total: f64,
    /// }
    ///
    /// let mut registry = TypeRegistry::empty();
    /// assert!(registry.auto_register());
    /// assert!(registry.contains(TypeId::of::<Invoice>()));
    /// assert!(registry.contains(TypeId::of::<f64>()));
    /// ```
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            use crate::__macro_exports::auto_register;

            if self.contains(TypeId::of::<auto_register::__AvailFlag>()) {
                return true;
            }
            auto_register::__register_types(self);
            self.contains(TypeId::of::<auto_register::__AvailFlag>())
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    /// Adds the type trait `D` to the registered type `T`.
    ///
    /// Returns `false` if `T` is not registered.
    pub fn register_type_trait<T: Typed, D: TypeTrait + FromType<T>>(&mut self) -> bool {
        match self.type_meta_table.get_mut(&TypeId::of::<T>()) {
            Some(type_meta) => {
                type_meta.insert_trait(D::from_type());
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_meta_table.contains(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeMeta> {
        self.type_meta_table.get(&type_id)
    }

    #[inline]
    pub fn get_mut(&mut self, type_id: TypeId) -> Option<&mut TypeMeta> {
        self.type_meta_table.get_mut(&type_id)
    }

    /// Looks a type up by its full [type path](crate::info::TypePath::type_path).
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&TypeMeta> {
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Looks a type up by its short [type name](crate::info::TypePath::type_name).
    ///
    /// Returns `None` for ambiguous names.
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&TypeMeta> {
        match self.type_name_to_id.get(type_name) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Resolves the name found in a `type` attribute: a full type path
    /// first, then an unambiguous short type name.
    pub fn resolve(&self, name: &str) -> Option<&TypeMeta> {
        self.get_with_type_path(name)
            .or_else(|| self.get_with_type_name(name))
    }

    /// Returns `true` if several registered types share this short name.
    ///
    /// ```
    /// use gx_reflect::registry::TypeRegistry;
    ///
    /// let mut registry = TypeRegistry::empty();
    /// registry.register::<std::collections::HashMap<u8, u8>>();
    /// registry.register::<gx_utils::hash::HashMap<u8, u8>>();
    ///
    /// assert!(registry.is_ambiguous("HashMap<u8, u8>"));
    /// assert!(registry.resolve("HashMap<u8, u8>").is_none());
    /// assert!(registry.resolve("std::collections::HashMap<u8, u8>").is_some());
    /// ```
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    pub fn get_type_trait<T: TypeTrait>(&self, type_id: TypeId) -> Option<&T> {
        match self.get(type_id) {
            Some(type_meta) => type_meta.get_trait::<T>(),
            None => None,
        }
    }

    pub fn get_type_info(&self, type_id: TypeId) -> Option<&'static TypeInfo> {
        self.get(type_id).map(TypeMeta::type_info)
    }

    /// Iterates over all registered types in arbitrary order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeMeta> {
        self.type_meta_table.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.type_meta_table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.type_meta_table.is_empty()
    }
}

impl core::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.type_path_to_id.keys()).finish()
    }
}

// -----------------------------------------------------------------------------
// TypeRegistryArc

/// A [`TypeRegistry`] shared between threads.
///
/// A poisoned lock is taken over as is: registration never leaves the
/// registry half-updated in a way readers could observe.
#[derive(Clone, Default)]
pub struct TypeRegistryArc {
    pub internal: Arc<RwLock<TypeRegistry>>,
}

impl TypeRegistryArc {
    #[inline]
    pub fn new(registry: TypeRegistry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl core::fmt::Debug for TypeRegistryArc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(&*self.read(), f)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::any::TypeId;

    use super::{TypeRegistry, TypeRegistryArc};
    use crate::ops::Dynamic;
    use crate::registry::TypeTraitDefault;

    #[test]
    fn built_ins() {
        let registry = TypeRegistry::new();
        assert!(registry.contains(TypeId::of::<Dynamic>()));
        assert!(registry.contains(TypeId::of::<rust_decimal::Decimal>()));

        let addr = registry
            .resolve("SocketAddr")
            .and_then(|meta| meta.get_trait::<TypeTraitDefault>())
            .unwrap()
            .default();
        assert_eq!(addr.reflect_type_path(), "core::net::SocketAddr");
    }

    #[test]
    fn dependencies_once() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Vec<Option<String>>>();
        let len = registry.len();
        assert_eq!(len, 3);
        registry.register::<Option<String>>();
        assert_eq!(registry.len(), len);
    }

    #[test]
    fn shared_registry() {
        let shared = TypeRegistryArc::new(TypeRegistry::empty());
        let other = shared.clone();
        other.write().register::<u8>();
        assert!(shared.read().resolve("u8").is_some());
    }
}
