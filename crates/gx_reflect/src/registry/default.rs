use alloc::boxed::Box;

use crate::Reflect;
use crate::info::Typed;
use crate::registry::FromType;

/// Builds default instances of a registered type.
///
/// The decoder uses it to create the value a [`Dynamic`] slot decodes
/// into, after resolving the slot's `type` attribute.
///
/// ```
/// use gx_reflect::registry::{TypeRegistry, TypeTraitDefault};
///
/// let registry = TypeRegistry::new();
/// let generator = registry
///     .get_with_type_name("String").unwrap()
///     .get_trait::<TypeTraitDefault>().unwrap();
///
/// assert_eq!(generator.default().take::<String>().unwrap(), "");
/// ```
///
/// [`Dynamic`]: crate::ops::Dynamic
#[derive(Clone)]
pub struct TypeTraitDefault {
    func: fn() -> Box<dyn Reflect>,
}

impl TypeTraitDefault {
    /// Uses `func` as constructor, for types without a [`Default`] impl.
    #[inline]
    pub const fn new(func: fn() -> Box<dyn Reflect>) -> Self {
        Self { func }
    }

    #[inline(always)]
    pub fn default(&self) -> Box<dyn Reflect> {
        (self.func)()
    }
}

impl<T: Default + Typed + Reflect> FromType<T> for TypeTraitDefault {
    fn from_type() -> Self {
        Self {
            func: || Box::<T>::default(),
        }
    }
}
