use alloc::boxed::Box;
use core::any::TypeId;
use core::ops::{Deref, DerefMut};

use gx_utils::TypeIdMap;

use crate::info::{Type, TypeInfo, Typed};
use crate::registry::{TypeRegistry, TypeTrait};

// -----------------------------------------------------------------------------
// TypeMeta

/// What the [`TypeRegistry`] keeps per type: its [`TypeInfo`] and a table
/// of [`TypeTrait`]s.
///
/// Usually built by the [`GetTypeMeta`] impl that
/// [`#[derive(Reflect)]`](crate::derive::Reflect) generates.
///
/// ```
/// use gx_reflect::registry::{FromType, TypeMeta, TypeTraitDefault};
///
/// let mut meta = TypeMeta::of::<i32>();
/// meta.insert_trait::<TypeTraitDefault>(FromType::<i32>::from_type());
///
/// let f = meta.get_trait::<TypeTraitDefault>().unwrap();
/// assert_eq!(f.default().take::<i32>().unwrap(), 0);
/// assert_eq!(meta.type_path(), "i32");
/// ```
pub struct TypeMeta {
    ty: &'static Type,
    type_info: &'static TypeInfo,
    trait_table: TypeIdMap<Box<dyn TypeTrait>>,
}

impl TypeMeta {
    /// An empty meta for `T`.
    #[inline]
    pub fn of<T: Typed>() -> Self {
        Self::with_capacity::<T>(0)
    }

    /// An empty meta for `T` with room for `capacity` traits.
    #[inline]
    pub fn with_capacity<T: Typed>(capacity: usize) -> Self {
        let type_info = T::type_info();
        Self {
            ty: type_info.ty(),
            type_info,
            trait_table: TypeIdMap::with_capacity(capacity),
        }
    }

    #[inline(always)]
    pub const fn type_info(&self) -> &'static TypeInfo {
        self.type_info
    }

    #[inline(always)]
    pub const fn ty(&self) -> &'static Type {
        self.ty
    }

    #[inline(always)]
    pub const fn type_id(&self) -> TypeId {
        self.ty.id()
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.ty.name()
    }

    /// Inserts a [`TypeTrait`], replacing any previous one of the same type.
    #[inline(always)]
    pub fn insert_trait<T: TypeTrait>(&mut self, data: T) {
        self.insert_trait_by_id(TypeId::of::<T>(), Box::new(data));
    }

    #[inline(never)]
    fn insert_trait_by_id(&mut self, id: TypeId, val: Box<dyn TypeTrait>) {
        self.trait_table.insert(id, val);
    }

    #[inline]
    pub fn get_trait<T: TypeTrait>(&self) -> Option<&T> {
        self.get_trait_by_id(TypeId::of::<T>())
            .and_then(<dyn TypeTrait>::downcast_ref)
    }

    pub fn get_trait_by_id(&self, type_id: TypeId) -> Option<&dyn TypeTrait> {
        self.trait_table.get(&type_id).map(Deref::deref)
    }

    #[inline]
    pub fn get_trait_mut<T: TypeTrait>(&mut self) -> Option<&mut T> {
        self.trait_table
            .get_mut(&TypeId::of::<T>())
            .map(DerefMut::deref_mut)
            .and_then(<dyn TypeTrait>::downcast_mut)
    }

    #[inline]
    pub fn has_trait<T: TypeTrait>(&self) -> bool {
        self.trait_table.contains(&TypeId::of::<T>())
    }

    #[inline]
    pub fn trait_len(&self) -> usize {
        self.trait_table.len()
    }
}

impl Clone for TypeMeta {
    fn clone(&self) -> Self {
        let mut trait_table = TypeIdMap::with_capacity(self.trait_len());
        for (id, type_trait) in self.trait_table.iter() {
            trait_table.insert(*id, (**type_trait).clone_type_trait());
        }

        Self {
            ty: self.ty,
            type_info: self.type_info,
            trait_table,
        }
    }
}

impl core::fmt::Debug for TypeMeta {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TypeMeta")
            .field("type_info", &self.type_info)
            .field("trait_len", &self.trait_len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// GetTypeMeta

/// Builds the [`TypeMeta`] of a type for registration.
///
/// Implemented by [`#[derive(Reflect)]`](crate::derive::Reflect), which
/// also registers the types of all serialized fields as dependencies.
///
/// ```
/// use core::any::TypeId;
/// use gx_reflect::derive::Reflect;
/// use gx_reflect::registry::{TypeRegistry, TypeTraitDefault};
///
/// #[derive(Reflect, Default)]
/// struct Order {
///     lines: Vec<u32>,
/// }
///
/// let mut registry = TypeRegistry::empty();
/// registry.register::<Order>();
///
/// assert!(registry.contains(TypeId::of::<Vec<u32>>()));
/// assert!(registry.contains(TypeId::of::<u32>()));
/// assert!(registry
///     .get_type_trait::<TypeTraitDefault>(TypeId::of::<Order>())
///     .is_some());
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `GetTypeMeta` so cannot be registered",
    note = "consider annotating `{Self}` with `#[derive(Reflect)]`"
)]
pub trait GetTypeMeta: Typed {
    fn get_type_meta() -> TypeMeta;

    /// Registers the types this type is made of. Need not register `Self`.
    fn register_dependencies(_registry: &mut TypeRegistry) {}
}
