use alloc::boxed::Box;

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{TypeFlags, TypeInfo, TypePath, Typed};
use crate::ops::{ReflectMut, ReflectRef};
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeTraitDefault};

// -----------------------------------------------------------------------------
// Dynamic

/// A slot holding a value of any registered type, or nothing.
///
/// The encoder writes the held value's type path in a `type` attribute;
/// the decoder resolves it through the [`TypeRegistry`] and builds a
/// default instance to decode into. An empty slot is the null value.
///
/// ```
/// use gx_reflect::ops::Dynamic;
///
/// let mut d = Dynamic::new(5_u8);
/// assert_eq!(d.downcast_ref::<u8>(), Some(&5));
/// d.clear();
/// assert!(d.is_empty());
/// ```
///
/// [`TypeRegistry`]: crate::registry::TypeRegistry
#[derive(Default)]
pub struct Dynamic(Option<Box<dyn Reflect>>);

impl Dynamic {
    #[inline]
    pub fn new<T: Reflect>(value: T) -> Self {
        Self(Some(Box::new(value)))
    }

    #[inline]
    pub const fn empty() -> Self {
        Self(None)
    }

    #[inline]
    pub fn from_boxed(value: Box<dyn Reflect>) -> Self {
        Self(Some(value))
    }

    #[inline]
    pub fn get(&self) -> Option<&dyn Reflect> {
        self.0.as_deref()
    }

    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.0.as_deref_mut()
    }

    #[inline]
    pub fn set(&mut self, value: Box<dyn Reflect>) {
        self.0 = Some(value);
    }

    #[inline]
    pub fn clear(&mut self) {
        self.0 = None;
    }

    #[inline]
    pub fn take(&mut self) -> Option<Box<dyn Reflect>> {
        self.0.take()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    #[inline]
    pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
        self.get()?.downcast_ref::<T>()
    }

    #[inline]
    pub fn downcast_mut<T: Reflect>(&mut self) -> Option<&mut T> {
        self.get_mut()?.downcast_mut::<T>()
    }
}

impl core::fmt::Debug for Dynamic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.get() {
            Some(value) => write!(f, "Dynamic({})", value.reflect_type_path()),
            None => f.write_str("Dynamic(null)"),
        }
    }
}

impl TypePath for Dynamic {
    fn type_path() -> &'static str {
        "gx_reflect::ops::Dynamic"
    }

    fn type_name() -> &'static str {
        "Dynamic"
    }

    fn type_ident() -> &'static str {
        "Dynamic"
    }

    fn module_path() -> Option<&'static str> {
        Some("gx_reflect::ops")
    }
}

impl Typed for Dynamic {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::new::<Self>(TypeFlags::DYNAMIC))
    }
}

impl Reflect for Dynamic {
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Dynamic(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Dynamic(self)
    }
}

impl GetTypeMeta for Dynamic {
    fn get_type_meta() -> TypeMeta {
        let mut meta = TypeMeta::with_capacity::<Self>(1);
        meta.insert_trait::<TypeTraitDefault>(FromType::<Self>::from_type());
        meta
    }
}
