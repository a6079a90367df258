use crate::info::{TypeInfo, TypePath};

// -----------------------------------------------------------------------------
// Typed

/// Static access to a type's [`TypeInfo`].
///
/// Implementations keep the info in a static cell, see
/// [`NonGenericTypeInfoCell`](crate::impls::NonGenericTypeInfoCell) and
/// [`GenericTypeInfoCell`](crate::impls::GenericTypeInfoCell).
///
/// ```
/// use gx_reflect::info::{Kind, Typed};
///
/// assert_eq!(i32::type_info().kind(), Kind::Scalar);
/// assert_eq!(<Vec<i32>>::type_info().kind(), Kind::List);
/// assert_eq!(<Option<String>>::type_info().kind(), Kind::Nullable);
/// ```
pub trait Typed: TypePath {
    fn type_info() -> &'static TypeInfo;
}

/// Object-safe access to [`Typed`], implemented for every `Typed` type.
pub trait DynamicTyped {
    fn reflect_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        T::type_info()
    }
}
