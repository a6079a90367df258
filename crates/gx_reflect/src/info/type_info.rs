use alloc::boxed::Box;
use core::any::TypeId;

use crate::info::field_info::logical_name;
use crate::info::{FieldInfo, Kind, Type, TypeFlags, TypeOptions, TypePath, Typed, classify};

// -----------------------------------------------------------------------------
// TypeInfo

/// Static description of a reflected type.
///
/// Built once per type and kept in a static cell. The [`Kind`] is decided
/// from the flags when the info is built.
///
/// # Examples
///
/// ```
/// use gx_reflect::info::{Kind, TypeFlags, TypeInfo, Typed};
///
/// let info = <std::rc::Rc<i32>>::type_info();
/// assert_eq!(info.kind(), Kind::Shared);
/// assert!(info.flags().contains(TypeFlags::SHARED));
/// assert_eq!(info.pointee().unwrap().kind(), Kind::Scalar);
/// ```
pub struct TypeInfo {
    ty: Type,
    flags: TypeFlags,
    kind: Kind,
    options: TypeOptions,
    fields: Box<[FieldInfo]>,
    pointee: Option<fn() -> &'static TypeInfo>,
}

impl TypeInfo {
    /// Creates the info of `T` with the given capabilities.
    pub fn new<T: TypePath + ?Sized>(flags: TypeFlags) -> Self {
        Self {
            ty: Type::of::<T>(),
            flags,
            kind: classify(flags),
            options: TypeOptions::DEFAULT,
            fields: Box::new([]),
            pointee: None,
        }
    }

    /// Replaces the serialization options.
    #[inline]
    pub fn with_options(mut self, options: TypeOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the serialized fields, in declaration order.
    #[inline]
    pub fn with_fields(mut self, fields: impl Into<Box<[FieldInfo]>>) -> Self {
        self.fields = fields.into();
        self
    }

    /// Records the value type a wrapper or container holds.
    #[inline]
    pub fn with_pointee<P: Typed>(mut self) -> Self {
        self.pointee = Some(P::type_info);
        self
    }

    #[inline(always)]
    pub const fn ty(&self) -> &Type {
        &self.ty
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

    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.ty.is::<T>()
    }

    #[inline(always)]
    pub const fn flags(&self) -> TypeFlags {
        self.flags
    }

    #[inline(always)]
    pub const fn kind(&self) -> Kind {
        self.kind
    }

    #[inline(always)]
    pub const fn options(&self) -> TypeOptions {
        self.options
    }

    /// Serialized fields in declaration order. Empty for non-complex types.
    #[inline]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// Looks up a field by its serialized name.
    ///
    /// A raw identifier prefix on `name` is ignored, so `r#type` and `type`
    /// find the same field.
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        let name = logical_name(name);
        self.fields.iter().find(|f| f.logical_name() == name)
    }

    /// The wrapped value type of `Option`, `Rc`, `Arc` and `Rc<RefCell>`,
    /// or the item type of a collection.
    #[inline]
    pub fn pointee(&self) -> Option<&'static TypeInfo> {
        self.pointee.map(|f| f())
    }
}

impl core::fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TypeInfo")
            .field("type_path", &self.type_path())
            .field("kind", &self.kind)
            .field("flags", &self.flags)
            .field("options", &self.options)
            .field("fields", &self.fields)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::info::{FieldInfo, Kind, TypeFlags, TypeInfo, TypeOptions};

    #[test]
    fn field_lookup_ignores_raw_prefix() {
        let info = TypeInfo::new::<u8>(TypeFlags::empty()).with_fields([
            FieldInfo::new::<i32>("r#type", 0),
            FieldInfo::new::<String>("name", 1),
        ]);

        assert_eq!(info.kind(), Kind::Complex);
        assert_eq!(info.field("type").map(FieldInfo::index), Some(0));
        assert_eq!(info.field("r#type").map(FieldInfo::index), Some(0));
        assert_eq!(info.field("name").map(FieldInfo::index), Some(1));
        assert!(info.field("missing").is_none());
    }

    #[test]
    fn options_default_to_graph() {
        let info = TypeInfo::new::<u8>(TypeFlags::SCALAR);
        assert!(info.options().use_graph_serialization);
        let info = info.with_options(TypeOptions::TREE);
        assert!(!info.options().use_graph_serialization);
    }
}
