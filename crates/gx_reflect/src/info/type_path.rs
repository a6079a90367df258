use core::any::TypeId;

// -----------------------------------------------------------------------------
// TypePath

/// Static access to a type's names.
///
/// - [`type_path`](TypePath::type_path): unique full path, e.g.
///   `alloc::vec::Vec<i32>`. Written to and resolved from `type` attributes,
///   so it must not change between the program that writes a document and
///   the one that reads it.
/// - [`type_name`](TypePath::type_name): path without modules, e.g.
///   `Vec<i32>`. May be shared by several types.
/// - [`type_ident`](TypePath::type_ident): name without generics, e.g. `Vec`.
/// - [`module_path`](TypePath::module_path): optional module, e.g. `alloc::vec`.
///
/// None of these carry a leading `::`.
///
/// # Examples
///
/// ```
/// use gx_reflect::derive::TypePath;
/// use gx_reflect::info::TypePath as _;
///
/// #[derive(TypePath)]
/// #[reflect(type_path = "shop::Order")]
/// struct Order;
///
/// assert_eq!(Order::type_path(), "shop::Order");
/// assert_eq!(Order::type_name(), "Order");
/// assert_eq!(Order::module_path(), Some("shop"));
/// ```
pub trait TypePath: 'static {
    /// Fully qualified path with generics.
    fn type_path() -> &'static str;

    /// Short path with generics.
    fn type_name() -> &'static str;

    /// Short name without generics.
    fn type_ident() -> &'static str;

    /// Module the type lives in. Primitive types return `None`.
    fn module_path() -> Option<&'static str> {
        None
    }
}

// -----------------------------------------------------------------------------
// DynamicTypePath

/// Object-safe access to [`TypePath`], implemented for every `TypePath` type.
///
/// ```
/// use gx_reflect::{Reflect, info::DynamicTypePath};
///
/// let x: &dyn Reflect = &String::new();
/// assert_eq!(x.reflect_type_path(), "alloc::string::String");
/// ```
pub trait DynamicTypePath {
    fn reflect_type_path(&self) -> &'static str;

    fn reflect_type_name(&self) -> &'static str;

    fn reflect_type_ident(&self) -> &'static str;

    fn reflect_module_path(&self) -> Option<&'static str>;
}

impl<T: TypePath> DynamicTypePath for T {
    #[inline]
    fn reflect_type_path(&self) -> &'static str {
        Self::type_path()
    }

    #[inline]
    fn reflect_type_name(&self) -> &'static str {
        Self::type_name()
    }

    #[inline]
    fn reflect_type_ident(&self) -> &'static str {
        Self::type_ident()
    }

    #[inline]
    fn reflect_module_path(&self) -> Option<&'static str> {
        Self::module_path()
    }
}

// -----------------------------------------------------------------------------
// Type

/// A [`TypeId`] together with the type's [`TypePath`] functions.
///
/// ```
/// use gx_reflect::info::Type;
///
/// let ty = Type::of::<String>();
/// assert!(ty.is::<String>());
/// assert_eq!(ty.path(), "alloc::string::String");
/// assert_eq!(ty.name(), "String");
/// ```
#[derive(Clone, Copy)]
pub struct Type {
    type_id: TypeId,
    type_path: fn() -> &'static str,
    type_name: fn() -> &'static str,
    type_ident: fn() -> &'static str,
    module_path: fn() -> Option<&'static str>,
}

impl Type {
    #[inline]
    pub const fn of<T: TypePath + ?Sized>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_path: T::type_path,
            type_name: T::type_name,
            type_ident: T::type_ident,
            module_path: T::module_path,
        }
    }

    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.type_id
    }

    /// See [`TypePath::type_path`].
    #[inline(always)]
    pub fn path(&self) -> &'static str {
        (self.type_path)()
    }

    /// See [`TypePath::type_name`].
    #[inline(always)]
    pub fn name(&self) -> &'static str {
        (self.type_name)()
    }

    /// See [`TypePath::type_ident`].
    #[inline(always)]
    pub fn ident(&self) -> &'static str {
        (self.type_ident)()
    }

    /// See [`TypePath::module_path`].
    #[inline(always)]
    pub fn module_path(&self) -> Option<&'static str> {
        (self.module_path)()
    }

    /// Returns `true` if this describes `T`.
    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for Type {}

impl core::fmt::Debug for Type {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.path())
    }
}
