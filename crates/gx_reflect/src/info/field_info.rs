use crate::info::{TypeInfo, Typed};

// -----------------------------------------------------------------------------
// FieldInfo

/// A named field of a complex type.
///
/// The storage name is the field as written in Rust. The logical name is
/// what appears in documents: it drops the raw identifier prefix, so a
/// field `r#type` is serialized as `<type>`.
///
/// The field's own [`TypeInfo`] is resolved lazily. A type that refers to
/// itself through a field can build its info without recursing.
///
/// ```
/// use gx_reflect::info::FieldInfo;
///
/// let f = FieldInfo::new::<String>("r#type", 0);
/// assert_eq!(f.name(), "r#type");
/// assert_eq!(f.logical_name(), "type");
/// assert_eq!(f.type_info().type_path(), "alloc::string::String");
/// ```
#[derive(Clone, Copy)]
pub struct FieldInfo {
    name: &'static str,
    index: usize,
    type_info: fn() -> &'static TypeInfo,
}

impl FieldInfo {
    #[inline]
    pub const fn new<T: Typed>(name: &'static str, index: usize) -> Self {
        Self {
            name,
            index,
            type_info: T::type_info,
        }
    }

    /// Storage name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Serialized name.
    #[inline]
    pub fn logical_name(&self) -> &'static str {
        logical_name(self.name)
    }

    /// Position among the type's serialized fields.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }
}

impl core::fmt::Debug for FieldInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FieldInfo")
            .field("name", &self.name)
            .field("index", &self.index)
            .finish()
    }
}

/// Strips the raw identifier prefix from a storage name.
#[inline]
pub(crate) fn logical_name(name: &str) -> &str {
    name.strip_prefix("r#").unwrap_or(name)
}
