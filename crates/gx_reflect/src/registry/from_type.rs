use crate::info::Typed;

/// Builds a [`TypeTrait`] for the type `T`.
///
/// ```
/// use gx_reflect::registry::{FromType, TypeMeta, TypeTraitDefault};
///
/// let mut meta = TypeMeta::of::<String>();
/// meta.insert_trait::<TypeTraitDefault>(FromType::<String>::from_type());
/// assert!(meta.has_trait::<TypeTraitDefault>());
/// ```
///
/// [`TypeTrait`]: crate::registry::TypeTrait
pub trait FromType<T: Typed> {
    fn from_type() -> Self;
}
