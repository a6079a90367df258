use core::any::TypeId;
use core::fmt;

// -----------------------------------------------------------------------------
// AddrKey

/// Reference identity of a shared allocation.
///
/// Two handles are the same object when they point at the same address
/// *and* were reached through the same pointee type. The type half keeps a
/// zero-sized pointee, or a struct and its first field, from colliding.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use gx_utils::AddrKey;
///
/// let a = Rc::new(5_i32);
/// let b = Rc::clone(&a);
/// let c = Rc::new(5_i32);
///
/// assert_eq!(AddrKey::of::<i32>(Rc::as_ptr(&a)), AddrKey::of::<i32>(Rc::as_ptr(&b)));
/// assert_ne!(AddrKey::of::<i32>(Rc::as_ptr(&a)), AddrKey::of::<i32>(Rc::as_ptr(&c)));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddrKey {
    type_id: TypeId,
    addr: usize,
}

impl AddrKey {
    /// Builds a key from a pointee type id and an address.
    #[inline]
    pub const fn new(type_id: TypeId, addr: usize) -> Self {
        Self { type_id, addr }
    }

    /// Builds a key from a typed pointer.
    #[inline]
    pub fn of<T: ?Sized + 'static>(ptr: *const T) -> Self {
        Self::new(TypeId::of::<T>(), ptr.cast::<()>() as usize)
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub const fn addr(&self) -> usize {
        self.addr
    }
}

impl fmt::Debug for AddrKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AddrKey({:#x})", self.addr)
    }
}
