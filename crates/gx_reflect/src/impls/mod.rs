//! Reflection for built-in and foreign types, plus helpers for writing
//! implementations by hand.
//!
//! - [`concat`]: string concatenation for generic type paths.
//! - [`NonGenericTypeInfoCell`]: static [`TypeInfo`](crate::info::TypeInfo) of a non-generic type.
//! - [`GenericTypePathCell`] / [`GenericTypeInfoCell`]: the same for generic types.
//!
//! ## Implemented types
//!
//! | kind | types |
//! |---|---|
//! | scalar | `bool` `char` `i8`-`i64` `isize` `u8`-`u64` `usize` `f32` `f64` `String` `chrono::NaiveDateTime` `rust_decimal::Decimal` |
//! | custom scalar | `SocketAddr` `IpAddr` |
//! | list | `Vec<T>` `VecDeque<T>` |
//! | array | `[T; N]` `Box<[T]>` |
//! | pair | `(K, V)` |
//! | map | `std::collections::HashMap<K, V>` `BTreeMap<K, V>` `gx_utils::hash::HashMap<K, V>` |
//! | nullable | `Option<T>` |
//! | shared | `Rc<T>` `Arc<T>` `Rc<RefCell<T>>` |
//! | dynamic | [`Dynamic`](crate::ops::Dynamic) |
//!
//! Items of generic containers must implement [`Default`]; decoding
//! allocates a default item and fills it in place.

// -----------------------------------------------------------------------------
// Helper macros

/// `TypePath` for a foreign generic type with the given module.
macro_rules! impl_generic_type_path {
    ($module:literal, $ident:ident < $($param:ident),+ >) => {
        impl<$($param: $crate::info::TypePath),+> $crate::info::TypePath for $ident<$($param),+> {
            fn type_path() -> &'static str {
                static CELL: $crate::impls::GenericTypePathCell = $crate::impls::GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    $crate::impls::generic_name(
                        concat!($module, "::", stringify!($ident)),
                        &[$(<$param as $crate::info::TypePath>::type_path()),+],
                    )
                })
            }

            fn type_name() -> &'static str {
                static CELL: $crate::impls::GenericTypePathCell = $crate::impls::GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    $crate::impls::generic_name(
                        stringify!($ident),
                        &[$(<$param as $crate::info::TypePath>::type_name()),+],
                    )
                })
            }

            fn type_ident() -> &'static str {
                stringify!($ident)
            }

            fn module_path() -> Option<&'static str> {
                Some($module)
            }
        }
    };
}

/// `GetTypeMeta` inserting [`TypeTraitDefault`](crate::registry::TypeTraitDefault)
/// and registering the listed type parameters.
macro_rules! impl_get_type_meta {
    (impl<$($param:ident),*> for $ty:ty where $($bound:tt)*) => {
        impl<$($param),*> $crate::registry::GetTypeMeta for $ty where $($bound)* {
            fn get_type_meta() -> $crate::registry::TypeMeta {
                let mut meta = $crate::registry::TypeMeta::with_capacity::<Self>(1);
                meta.insert_trait::<$crate::registry::TypeTraitDefault>(
                    $crate::registry::FromType::<Self>::from_type(),
                );
                meta
            }

            fn register_dependencies(_registry: &mut $crate::registry::TypeRegistry) {
                $(_registry.register::<$param>();)*
            }
        }
    };
}

// -----------------------------------------------------------------------------
// Modules

mod cell;

mod maps;
mod pair;
mod scalars;
mod sequences;
mod wrappers;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeInfoCell};

/// Concatenates string slices into one allocation.
///
/// ```
/// use gx_reflect::impls::concat;
///
/// let s = concat(&["alloc::vec::Vec", "<", "i32", ">"]);
/// assert_eq!(s, "alloc::vec::Vec<i32>");
/// assert_eq!(s.capacity(), 20);
/// ```
#[inline(never)]
pub fn concat(arr: &[&str]) -> alloc::string::String {
    let len = arr.iter().map(|s| s.len()).sum();
    let mut res = alloc::string::String::with_capacity(len);
    for &item in arr {
        res.push_str(item);
    }
    res
}

/// Formats `base<p0, p1, ..>`.
///
/// ```
/// use gx_reflect::impls::generic_name;
///
/// assert_eq!(generic_name("BTreeMap", &["i32", "String"]), "BTreeMap<i32, String>");
/// ```
pub fn generic_name(base: &str, params: &[&str]) -> alloc::string::String {
    let mut parts = alloc::vec::Vec::with_capacity(params.len() * 2 + 2);
    parts.push(base);
    parts.push("<");
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            parts.push(", ");
        }
        parts.push(param);
    }
    parts.push(">");
    concat(&parts)
}
