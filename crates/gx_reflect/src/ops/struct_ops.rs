use crate::Reflect;

/// A complex type, decomposed into named fields.
///
/// Indices follow [`TypeInfo::fields`](crate::info::TypeInfo::fields);
/// names are storage names, raw prefix included.
///
/// ```
/// use gx_reflect::{derive::Reflect, ops::Struct};
///
/// #[derive(Reflect, Default)]
/// struct Point {
///     x: i32,
///     #[reflect(ignore)]
///     cache: u64,
///     y: i32,
/// }
///
/// let p = Point { x: 1, cache: 0, y: 2 };
/// assert_eq!(p.field_len(), 2);
/// assert_eq!(p.field_at(1).unwrap().downcast_ref::<i32>(), Some(&2));
/// assert!(p.field("cache").is_none());
/// ```
pub trait Struct: Reflect {
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;

    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    fn field_len(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::any::TypeId;

    use crate::derive::Reflect;
    use crate::info::{Kind, TypePath, Typed};
    use crate::ops::Struct;
    use crate::registry::TypeRegistry;

    #[derive(Reflect, Default)]
    struct Wrapper<T> {
        items: Vec<T>,
        r#type: String,
    }

    #[derive(Reflect, Default)]
    struct Marker;

    #[test]
    fn generic_type_paths() {
        assert_eq!(
            Wrapper::<i32>::type_path(),
            concat!(module_path!(), "::Wrapper<i32>"),
        );
        assert_eq!(Wrapper::<i32>::type_name(), "Wrapper<i32>");
        assert_eq!(Wrapper::<u8>::type_ident(), "Wrapper");
        assert_eq!(Wrapper::<u8>::module_path(), Some(module_path!()));
        assert_ne!(Wrapper::<u8>::type_path(), Wrapper::<i32>::type_path());
    }

    #[test]
    fn raw_identifiers_keep_storage_names() {
        let value = Wrapper::<u8> {
            items: vec![1],
            r#type: String::from("x"),
        };
        assert!(value.field("r#type").is_some());
        assert!(value.field("type").is_none());

        let info = Wrapper::<u8>::type_info();
        assert_eq!(info.kind(), Kind::Complex);
        assert_eq!(info.fields()[1].logical_name(), "type");
        assert!(info.field("type").is_some());
    }

    #[test]
    fn unit_structs_have_no_fields() {
        assert_eq!(Marker.field_len(), 0);
        assert!(Marker.field_at(0).is_none());
        assert!(Marker::type_info().fields().is_empty());
    }

    #[test]
    fn registration_follows_fields() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Wrapper<u16>>();
        assert!(registry.contains(TypeId::of::<Wrapper<u16>>()));
        assert!(registry.contains(TypeId::of::<Vec<u16>>()));
        assert!(registry.contains(TypeId::of::<u16>()));
        assert!(registry.contains(TypeId::of::<String>()));
    }
}
