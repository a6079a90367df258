use alloc::boxed::Box;
use core::any::Any;

use gx_utils::AddrKey;

use crate::Reflect;
use crate::info::TypeInfo;

/// A reference type with identity: `Rc<T>`, `Arc<T>` or `Rc<RefCell<T>>`.
///
/// Two handles are the same object when their [`addr_key`](Shared::addr_key)s
/// are equal. The pointee is only reachable through callbacks so that a
/// `RefCell` borrow never outlives the visit.
pub trait Shared: Reflect {
    /// Identity of the allocation.
    fn addr_key(&self) -> AddrKey;

    /// The pointee type.
    fn pointee_info(&self) -> &'static TypeInfo;

    /// Calls `f` with the pointee. Returns `false` if the pointee is
    /// mutably borrowed elsewhere.
    fn with_pointee(&self, f: &mut dyn FnMut(&dyn Reflect)) -> bool;

    /// Calls `f` with the pointee mutably. Returns `false` if the pointee
    /// is borrowed elsewhere, or if other handles exist and the pointee
    /// has no interior mutability.
    fn with_pointee_mut(&mut self, f: &mut dyn FnMut(&mut dyn Reflect)) -> bool;

    /// Points this handle at a fresh default allocation.
    fn renew(&mut self);

    /// A clone of this handle, type-erased.
    fn share_handle(&self) -> Box<dyn Any>;

    /// Makes this handle a clone of `handle`. Returns `false` if `handle`
    /// is not a handle of the same type.
    fn adopt(&mut self, handle: &dyn Any) -> bool;

    /// Whether the pointee can be mutated while other handles exist.
    ///
    /// Only such pointees can be registered before their body is decoded,
    /// which is what lets a cycle resolve to itself.
    fn interior_mutable(&self) -> bool;
}
