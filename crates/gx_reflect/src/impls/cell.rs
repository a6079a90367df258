//! Static storage for type information.
//!
//! - [`NonGenericTypeInfoCell`]: a [`OnceLock`] holding one [`TypeInfo`].
//! - [`GenericTypeInfoCell`] / [`GenericTypePathCell`]: a `static` inside a
//!   generic function is shared by every instantiation, so these keep one
//!   leaked entry per [`TypeId`] behind an [`RwLock`].
//!
//! A type path needs no non-generic cell; a string literal does the job.

use alloc::boxed::Box;
use alloc::string::String;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use gx_utils::TypeIdMap;

use crate::info::TypeInfo;

mod sealed {
    use super::TypeInfo;
    use alloc::string::String;

    pub trait CellValue: Send + Sync + 'static {}

    impl CellValue for String {}
    impl CellValue for TypeInfo {}
}

use sealed::CellValue;

// -----------------------------------------------------------------------------
// NonGenericTypeCell

/// A cell for the static information of one non-generic type.
pub struct NonGenericTypeCell<T: CellValue>(OnceLock<T>);

/// Stores the [`TypeInfo`] of a non-generic type.
///
/// ```
/// use gx_reflect::impls::NonGenericTypeInfoCell;
/// use gx_reflect::info::{TypeFlags, TypeInfo, TypePath, Typed};
///
/// struct Meters(f64);
///
/// impl TypePath for Meters {
///     fn type_path() -> &'static str { "units::Meters" }
///     fn type_name() -> &'static str { "Meters" }
///     fn type_ident() -> &'static str { "Meters" }
/// }
///
/// impl Typed for Meters {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::new::<Self>(TypeFlags::CUSTOM_SCALAR))
///     }
/// }
///
/// assert!(core::ptr::eq(Meters::type_info(), Meters::type_info()));
/// ```
pub type NonGenericTypeInfoCell = NonGenericTypeCell<TypeInfo>;

impl<T: CellValue> NonGenericTypeCell<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored value, initializing it with `f` on first use.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> T) -> &T {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericTypeCell

/// A cell for the static information of every instantiation of a generic type.
pub struct GenericTypeCell<T: CellValue>(RwLock<TypeIdMap<&'static T>>);

/// Stores the [`TypeInfo`] of each instantiation of a generic type.
pub type GenericTypeInfoCell = GenericTypeCell<TypeInfo>;

/// Stores the type path strings of each instantiation of a generic type.
///
/// ```
/// use gx_reflect::impls::{GenericTypePathCell, concat};
/// use gx_reflect::info::TypePath;
///
/// struct Tagged<T>(T);
///
/// impl<T: TypePath> TypePath for Tagged<T> {
///     fn type_path() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| concat(&["app::Tagged<", T::type_path(), ">"]))
///     }
///     fn type_name() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| concat(&["Tagged<", T::type_name(), ">"]))
///     }
///     fn type_ident() -> &'static str { "Tagged" }
/// }
///
/// assert_eq!(<Tagged<u8>>::type_path(), "app::Tagged<u8>");
/// assert_eq!(<Tagged<i64>>::type_name(), "Tagged<i64>");
/// ```
pub type GenericTypePathCell = GenericTypeCell<String>;

impl<T: CellValue> GenericTypeCell<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the value stored for `G`, initializing it with `f` on first use.
    ///
    /// `f` runs without the lock held, so it may itself query other cells.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> T) -> &T {
        match self.get_by_type_id(TypeId::of::<G>()) {
            Some(value) => value,
            None => self.insert_by_type_id(TypeId::of::<G>(), f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&'static T> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    // A racing initializer may have won; keep whichever value landed first.
    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: T) -> &'static T {
        let mut map = self.0.write().unwrap_or_else(PoisonError::into_inner);
        *map.get_or_insert(type_id, || Box::leak(Box::new(value)))
    }
}
