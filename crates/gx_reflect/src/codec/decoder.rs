use alloc::boxed::Box;
use alloc::format;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::any::Any;

use gx_utils::hash::HashMap;
use gx_xml::{Document, Element};
use log::{debug, trace};

use crate::Reflect;
use crate::codec::CodecError;
use crate::culture::{Culture, ScalarError};
use crate::info::Kind;
use crate::ops::{Array, Dynamic, List, Map, ReflectMut, Shared};
use crate::registry::{TypeMeta, TypeRegistry, TypeTraitDefault};

// -----------------------------------------------------------------------------
// Decoder

/// Rebuilds reflected values from a [`Document`].
///
/// The registry is only consulted for [`Dynamic`] slots and for
/// [`deserialize_dynamic`](Self::deserialize_dynamic); statically typed
/// targets decode without it. A decoder keeps no state between calls.
///
/// Decoding is lenient about shape and strict about values:
///
/// - children that name no field of the target are skipped;
/// - fields with no child keep their default value;
/// - `value="null"` in a slot that cannot hold null keeps the default;
/// - a `value` that does not parse is a [`CodecError::MalformedScalar`].
///
/// The null sentinel is the plain text `null`, so a string that held
/// exactly `"null"` when encoded reads back as `""`, and `Some("null")`
/// reads back as `None`.
///
/// ```
/// use gx_reflect::codec::Decoder;
/// use gx_reflect::registry::TypeRegistry;
/// use gx_xml::Document;
///
/// let doc: Document = r#"<Numbers culture=""><Numbers value="1"/><Numbers value="2"/></Numbers>"#
///     .parse()
///     .unwrap();
/// let registry = TypeRegistry::new();
/// let numbers: Vec<i32> = Decoder::new(&registry).deserialize(&doc).unwrap();
/// assert_eq!(numbers, [1, 2]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'a> {
    registry: &'a TypeRegistry,
}

impl<'a> Decoder<'a> {
    #[inline]
    pub const fn new(registry: &'a TypeRegistry) -> Self {
        Self { registry }
    }

    #[inline]
    pub const fn registry(&self) -> &'a TypeRegistry {
        self.registry
    }

    /// Decodes the document into a fresh `T::default()`.
    pub fn deserialize<T: Reflect + Default>(&self, document: &Document) -> Result<T, CodecError> {
        let mut value = T::default();
        self.decode_into(document.root(), &mut value)?;
        Ok(value)
    }

    /// Decodes the document into the type named by the root `type`
    /// attribute.
    pub fn deserialize_dynamic(&self, document: &Document) -> Result<Box<dyn Reflect>, CodecError> {
        let root = document.root();
        let meta = self.resolve(root)?;
        self.deserialize_as(document, meta)
    }

    /// Decodes the document into a default instance of the type behind
    /// `meta`.
    pub fn deserialize_as(
        &self,
        document: &Document,
        meta: &TypeMeta,
    ) -> Result<Box<dyn Reflect>, CodecError> {
        let mut value = instantiate(document.root(), meta)?;
        self.decode_into(document.root(), &mut *value)?;
        Ok(value)
    }

    /// Decodes `element` over `target`.
    ///
    /// The culture is read from the element's own `culture` attribute;
    /// without one the invariant culture is used.
    pub fn decode_into(&self, element: &Element, target: &mut dyn Reflect) -> Result<(), CodecError> {
        let culture = match element.attribute("culture") {
            Some(tag) => Culture::from_tag(tag)
                .map_err(|_| CodecError::UnknownCulture(tag.to_string()))?,
            None => Culture::invariant(),
        };
        debug!(
            "decoding <{}> into `{}`, culture `{}`",
            element.name(),
            target.reflect_type_path(),
            culture.tag(),
        );

        let mut pass = DecodePass {
            decoder: *self,
            culture,
            shared: SharedTable::default(),
        };
        pass.decode(element, target)?;

        debug!("decoded <{}>, {} shared ids", element.name(), pass.shared.len());
        Ok(())
    }

    fn resolve(&self, element: &Element) -> Result<&'a TypeMeta, CodecError> {
        let type_name = element.attribute("type");
        let meta = type_name
            .and_then(|name| self.registry.resolve(name))
            .ok_or_else(|| CodecError::unresolvable(element.name(), type_name))?;
        // A `Dynamic` target would read the same attribute again.
        if meta.type_info().kind() == Kind::Dynamic {
            return Err(CodecError::unresolvable(element.name(), type_name));
        }
        Ok(meta)
    }
}

fn instantiate(element: &Element, meta: &TypeMeta) -> Result<Box<dyn Reflect>, CodecError> {
    match meta.get_trait::<TypeTraitDefault>() {
        Some(default) => Ok(default.default()),
        None => Err(CodecError::unresolvable(element.name(), Some(meta.type_path()))),
    }
}

// -----------------------------------------------------------------------------
// SharedTable

/// Handles decoded so far, by document id.
#[derive(Default)]
struct SharedTable {
    handles: HashMap<u64, Box<dyn Any>>,
}

impl SharedTable {
    #[inline]
    fn get(&self, id: u64) -> Option<&dyn Any> {
        self.handles.get(&id).map(|handle| &**handle)
    }

    #[inline]
    fn insert(&mut self, id: u64, handle: Box<dyn Any>) {
        self.handles.insert(id, handle);
    }

    #[inline]
    fn len(&self) -> usize {
        self.handles.len()
    }
}

// -----------------------------------------------------------------------------
// DecodePass

struct DecodePass<'a> {
    decoder: Decoder<'a>,
    culture: &'static Culture,
    shared: SharedTable,
}

impl DecodePass<'_> {
    fn decode(&mut self, element: &Element, target: &mut dyn Reflect) -> Result<(), CodecError> {
        let value = element.attribute("value");
        if value == Some("null") {
            self.decode_null(element, target);
            return Ok(());
        }

        let info = target.reflect_type_info();
        match target.reflect_mut() {
            ReflectMut::Nullable(nullable) => self.decode(element, nullable.insert_default()),
            ReflectMut::Dynamic(dynamic) => self.decode_dynamic(element, dynamic),
            ReflectMut::Shared(shared) => self.decode_shared(element, shared),
            ReflectMut::Scalar(scalar) => scalar
                .parse_text(value.unwrap_or_default(), self.culture)
                .map_err(|err| CodecError::malformed(element.name(), err)),
            ReflectMut::Enum(target) => {
                let text = value.unwrap_or_default();
                let accepted = text
                    .parse::<i64>()
                    .is_ok_and(|discriminant| target.set_discriminant(discriminant));
                if accepted {
                    Ok(())
                } else {
                    let err = ScalarError::invalid(text, "enum discriminant");
                    Err(CodecError::malformed(element.name(), err))
                }
            }
            ReflectMut::SelfDescribing(target) => {
                let fragment = element
                    .child("value")
                    .map(Element::inner_xml)
                    .unwrap_or_default();
                target.read_xml(&fragment)?;
                Ok(())
            }
            ReflectMut::Array(array) => self.decode_array(element, array),
            ReflectMut::List(list) => self.decode_list(element, list),
            ReflectMut::Map(map) => self.decode_map(element, map),
            ReflectMut::Pair(pair) => {
                let (key, value) = entry_children(element)?;
                self.decode(key, pair.key_mut())?;
                self.decode(value, pair.value_mut())
            }
            ReflectMut::Struct(target) => {
                for child in element.elements() {
                    match info.field(child.name()) {
                        Some(field) => {
                            let Some(slot) = target.field_at_mut(field.index()) else {
                                continue;
                            };
                            self.decode(child, slot)?;
                        }
                        None => trace!(
                            "skipping <{}>, `{}` has no such field",
                            child.name(),
                            info.type_path(),
                        ),
                    }
                }
                Ok(())
            }
        }
    }

    fn decode_null(&mut self, element: &Element, target: &mut dyn Reflect) {
        let type_path = target.reflect_type_path();
        match target.reflect_mut() {
            ReflectMut::Nullable(nullable) => nullable.set_null(),
            ReflectMut::Dynamic(dynamic) => dynamic.clear(),
            _ => trace!(
                "<{}> is null but `{}` is not nullable, keeping the default",
                element.name(),
                type_path,
            ),
        }
    }

    fn decode_dynamic(&mut self, element: &Element, slot: &mut Dynamic) -> Result<(), CodecError> {
        let meta = self.decoder.resolve(element)?;
        let mut value = instantiate(element, meta)?;
        self.decode(element, &mut *value)?;
        slot.set(value);
        Ok(())
    }

    fn decode_shared(&mut self, element: &Element, shared: &mut dyn Shared) -> Result<(), CodecError> {
        let id = match element.attribute("id") {
            Some(text) => Some(text.parse::<u64>().map_err(|_| {
                CodecError::malformed(element.name(), ScalarError::invalid(text, "id"))
            })?),
            None => None,
        };

        if let Some(id) = id
            && let Some(handle) = self.shared.get(id)
        {
            if !shared.adopt(handle) {
                let reason = format!("id {id} belongs to a value of another type");
                return Err(CodecError::mismatch(element.name(), reason));
            }
            trace!("<{}> reuses shared id {id}", element.name());
            return Ok(());
        }

        shared.renew();
        // A cell can be handed out before its body is filled in, which is
        // what lets a value reach itself.
        let early = shared.interior_mutable();
        if let Some(id) = id
            && early
        {
            self.shared.insert(id, shared.share_handle());
        }

        let mut result = Ok(());
        let visited = shared.with_pointee_mut(&mut |inner| result = self.decode(element, inner));
        if !visited {
            return Err(CodecError::SharedBorrowed(element.name().to_string()));
        }
        result?;

        if let Some(id) = id
            && !early
        {
            self.shared.insert(id, shared.share_handle());
        }
        Ok(())
    }

    fn decode_array(&mut self, element: &Element, array: &mut dyn Array) -> Result<(), CodecError> {
        let children: Vec<&Element> = element.elements().collect();
        if !array.resize_default(children.len()) {
            let reason = format!(
                "expected {} items, found {}",
                array.len(),
                children.len()
            );
            return Err(CodecError::mismatch(element.name(), reason));
        }
        for (index, child) in children.into_iter().enumerate() {
            if let Some(item) = array.get_mut(index) {
                self.decode(child, item)?;
            }
        }
        Ok(())
    }

    fn decode_list(&mut self, element: &Element, list: &mut dyn List) -> Result<(), CodecError> {
        list.clear();
        for child in element.elements() {
            let mut item = list.new_item();
            self.decode(child, &mut *item)?;
            if let Err(item) = list.push(item) {
                let reason = format!("list does not accept `{}`", item.reflect_type_path());
                return Err(CodecError::mismatch(child.name(), reason));
            }
        }
        Ok(())
    }

    fn decode_map(&mut self, element: &Element, map: &mut dyn Map) -> Result<(), CodecError> {
        map.clear();
        for child in element.elements() {
            let (key_element, value_element) = entry_children(child)?;
            let (mut key, mut value) = map.new_entry();
            self.decode(key_element, &mut *key)?;
            self.decode(value_element, &mut *value)?;
            if map.insert_boxed(key, value).is_err() {
                return Err(CodecError::mismatch(child.name(), "map rejected the entry"));
            }
        }
        Ok(())
    }
}

/// The two children of a key/value element, in either naming.
fn entry_children(element: &Element) -> Result<(&Element, &Element), CodecError> {
    let pick = |key, value| Some((element.child(key)?, element.child(value)?));
    pick("key", "value")
        .or_else(|| pick("_key", "_value"))
        .ok_or_else(|| {
            CodecError::mismatch(
                element.name(),
                "expected `key`/`value` or `_key`/`_value` children",
            )
        })
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec::Vec;

    use gx_xml::Document;

    use super::Decoder;
    use crate::codec::CodecError;
    use crate::derive::Reflect;
    use crate::ops::Dynamic;
    use crate::registry::TypeRegistry;

    fn doc(text: &str) -> Document {
        text.parse().unwrap()
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Person {
        name: String,
        age: i32,
    }

    #[derive(Reflect, Default, Debug, PartialEq, Clone, Copy)]
    enum Color {
        #[default]
        Red = 1,
        Blue = 4,
    }

    #[test]
    fn unknown_and_missing_fields() {
        let registry = TypeRegistry::new();
        let decoder = Decoder::new(&registry);
        let person: Person = decoder
            .deserialize(&doc(r#"<P><nickname value="x"/><age value="7"/></P>"#))
            .unwrap();
        assert_eq!(
            person,
            Person {
                name: String::new(),
                age: 7
            }
        );
    }

    #[test]
    fn legacy_pair_names() {
        let registry = TypeRegistry::new();
        let map: BTreeMap<String, i32> = Decoder::new(&registry)
            .deserialize(&doc(
                r#"<D><D><_key value="a"/><_value value="1"/></D><D><key value="b"/><value value="2"/></D></D>"#,
            ))
            .unwrap();
        assert_eq!(map, BTreeMap::from([("a".into(), 1), ("b".into(), 2)]));
    }

    #[test]
    fn pair_without_names_is_a_mismatch() {
        let registry = TypeRegistry::new();
        let err = Decoder::new(&registry)
            .deserialize::<BTreeMap<String, i32>>(&doc(r#"<D><D><k value="a"/></D></D>"#))
            .unwrap_err();
        assert!(matches!(err, CodecError::StructuralMismatch { ref element, .. } if element == "D"));
    }

    #[test]
    fn enums_by_discriminant() {
        let registry = TypeRegistry::new();
        let decoder = Decoder::new(&registry);
        let color: Color = decoder.deserialize(&doc(r#"<C value="4"/>"#)).unwrap();
        assert_eq!(color, Color::Blue);

        let err = decoder.deserialize::<Color>(&doc(r#"<C value="2"/>"#)).unwrap_err();
        assert!(matches!(err, CodecError::MalformedScalar { .. }));
        let err = decoder.deserialize::<Color>(&doc(r#"<C value="Blue"/>"#)).unwrap_err();
        assert!(matches!(err, CodecError::MalformedScalar { .. }));
    }

    #[test]
    fn malformed_scalar_names_the_element() {
        let registry = TypeRegistry::new();
        let err = Decoder::new(&registry)
            .deserialize::<Person>(&doc(r#"<P><age value="old"/></P>"#))
            .unwrap_err();
        assert!(matches!(err, CodecError::MalformedScalar { ref element, .. } if element == "age"));
    }

    #[test]
    fn null_in_plain_slot_keeps_default() {
        let registry = TypeRegistry::new();
        let decoder = Decoder::new(&registry);
        let n: i32 = decoder.deserialize(&doc(r#"<N value="null"/>"#)).unwrap();
        assert_eq!(n, 0);
        let n: Option<i32> = decoder.deserialize(&doc(r#"<N value="null"/>"#)).unwrap();
        assert_eq!(n, None);
    }

    #[test]
    fn fixed_arrays_check_length() {
        let registry = TypeRegistry::new();
        let decoder = Decoder::new(&registry);
        let ok: [u8; 2] = decoder
            .deserialize(&doc(r#"<A><A value="1"/><A value="2"/></A>"#))
            .unwrap();
        assert_eq!(ok, [1, 2]);

        let err = decoder
            .deserialize::<[u8; 2]>(&doc(r#"<A><A value="1"/></A>"#))
            .unwrap_err();
        assert!(matches!(err, CodecError::StructuralMismatch { .. }));
    }

    #[test]
    fn unknown_culture() {
        let registry = TypeRegistry::new();
        let err = Decoder::new(&registry)
            .deserialize::<i32>(&doc(r#"<N culture="xx-XX" value="1"/>"#))
            .unwrap_err();
        assert!(matches!(err, CodecError::UnknownCulture(ref tag) if tag == "xx-XX"));
    }

    #[test]
    fn dynamic_slots_need_registered_types() {
        let mut registry = TypeRegistry::new();
        let decoder = Decoder::new(&registry);
        let err = decoder
            .deserialize::<Dynamic>(&doc(r#"<X type="gx_reflect::codec::decoder::tests::Person"/>"#))
            .unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnresolvableType { type_name: Some(_), .. }
        ));

        let err = decoder.deserialize::<Dynamic>(&doc(r#"<X/>"#)).unwrap_err();
        assert!(matches!(err, CodecError::UnresolvableType { type_name: None, .. }));

        registry.register::<Person>();
        let value: Dynamic = Decoder::new(&registry)
            .deserialize(&doc(r#"<X type="Person"><age value="3"/></X>"#))
            .unwrap();
        assert_eq!(value.downcast_ref::<Person>().map(|p| p.age), Some(3));
    }

    #[test]
    fn dynamic_root() {
        let mut registry = TypeRegistry::new();
        registry.register::<Vec<Person>>();
        let value = Decoder::new(&registry)
            .deserialize_dynamic(&doc(
                r#"<L type="alloc::vec::Vec&lt;gx_reflect::codec::decoder::tests::Person&gt;"><L><age value="1"/></L></L>"#,
            ))
            .unwrap();
        let list = value.downcast_ref::<Vec<Person>>().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].age, 1);
    }
}
