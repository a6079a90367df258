use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use gx_xml::{Document, Element};
use log::{debug, trace};

use crate::Reflect;
use crate::codec::{CodecError, IdentityCache, SerializeOptions};
use crate::culture::Culture;
use crate::info::{Kind, TypeInfo};
use crate::ops::{Map, ReflectRef, Shared, Struct};

// -----------------------------------------------------------------------------
// Encoder

/// Turns a reflected value into a [`Document`].
///
/// An `Encoder` is configuration only. Every call to
/// [`serialize`](Self::serialize) runs with its own identity cache, so one
/// encoder may be reused freely.
///
/// ```
/// use gx_reflect::codec::Encoder;
/// use gx_reflect::culture::Culture;
///
/// let doc = Encoder::new()
///     .with_culture(Culture::invariant())
///     .serialize(&vec![1_u8, 2], "Numbers")
///     .unwrap();
///
/// let root = doc.root();
/// assert_eq!(root.attribute("culture"), Some(""));
/// assert_eq!(root.attribute("type"), Some("alloc::vec::Vec<u8>"));
/// assert_eq!(root.child_count(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Encoder {
    culture: &'static Culture,
    options: Option<SerializeOptions>,
}

impl Default for Encoder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    /// An encoder writing scalars in [`Culture::current`].
    #[inline]
    pub fn new() -> Self {
        Self {
            culture: Culture::current(),
            options: None,
        }
    }

    #[inline]
    pub fn with_culture(mut self, culture: &'static Culture) -> Self {
        self.culture = culture;
        self
    }

    /// Replaces the options declared by the root type.
    #[inline]
    pub fn with_options(mut self, options: SerializeOptions) -> Self {
        self.options = Some(options);
        self
    }

    #[inline]
    pub fn culture(&self) -> &'static Culture {
        self.culture
    }

    /// Encodes `value` under a root element named `root_name`.
    ///
    /// Fails with [`CodecError::InvalidName`] when `root_name` is not a
    /// valid XML name.
    pub fn serialize(&self, value: &dyn Reflect, root_name: &str) -> Result<Document, CodecError> {
        if !gx_xml::is_name(root_name) {
            return Err(CodecError::InvalidName(root_name.to_string()));
        }

        let info = value.reflect_type_info();
        let options = self.options.unwrap_or_else(|| SerializeOptions::of(info));
        debug!(
            "encoding `{}` as <{root_name}>, culture `{}`, graph mode {}",
            info.type_path(),
            self.culture.tag(),
            options.use_graph_serialization,
        );

        let mut pass = EncodePass {
            culture: self.culture,
            graph: options.use_graph_serialization,
            cache: IdentityCache::new(),
        };
        let mut root = Element::new(root_name);
        let mut path = Vec::new();
        pass.encode(value, &mut root, &mut path)?;

        let shared = pass.cache.into_shared();
        for occurrence in &shared {
            let id = occurrence.id().to_string();
            for path in occurrence.paths() {
                if let Some(element) = root.descendant_mut(path) {
                    element.set_attribute("id", id.as_str());
                }
            }
        }

        root.set_attribute("culture", self.culture.tag());
        if !is_null(&root) && root.attribute("type").is_none() {
            root.set_attribute("type", info.type_path());
        }
        debug!("encoded <{root_name}>, {} shared ids", shared.len());
        Ok(Document::new(root))
    }
}

#[inline]
fn is_null(element: &Element) -> bool {
    element.attribute("value") == Some("null")
}

// -----------------------------------------------------------------------------
// EncodePass

struct EncodePass {
    culture: &'static Culture,
    graph: bool,
    cache: IdentityCache,
}

impl EncodePass {
    /// Fills `element`, already named, with `value`.
    ///
    /// `path` addresses `element` from the root and is restored on return.
    fn encode(
        &mut self,
        value: &dyn Reflect,
        element: &mut Element,
        path: &mut Vec<usize>,
    ) -> Result<(), CodecError> {
        match value.reflect_ref() {
            ReflectRef::Nullable(nullable) => match nullable.value() {
                Some(inner) => self.encode(inner, element, path),
                None => {
                    element.set_attribute("value", "null");
                    Ok(())
                }
            },
            ReflectRef::Dynamic(dynamic) => match dynamic.get() {
                Some(inner) => {
                    element.set_attribute("type", inner.reflect_type_path());
                    self.encode(inner, element, path)
                }
                None => {
                    element.set_attribute("value", "null");
                    Ok(())
                }
            },
            ReflectRef::Shared(shared) => self.encode_shared(shared, element, path),
            ReflectRef::Scalar(scalar) => {
                element.set_attribute("value", scalar.format_text(self.culture));
                Ok(())
            }
            ReflectRef::Enum(value) => {
                element.set_attribute("value", value.discriminant().to_string());
                Ok(())
            }
            ReflectRef::SelfDescribing(value) => {
                let fragment = format!("<value>{}</value>", value.write_xml());
                element.set_inner_xml(&fragment)?;
                Ok(())
            }
            ReflectRef::Array(array) => self.encode_items(array.iter(), element, path),
            ReflectRef::List(list) => self.encode_items(list.iter(), element, path),
            ReflectRef::Map(map) => self.encode_map(map, element, path),
            ReflectRef::Pair(pair) => {
                self.encode_child("key", pair.key(), element, path)?;
                self.encode_child("value", pair.value(), element, path)
            }
            ReflectRef::Struct(value) => self.encode_struct(value, element, path),
        }
    }

    fn encode_child(
        &mut self,
        name: &str,
        value: &dyn Reflect,
        parent: &mut Element,
        path: &mut Vec<usize>,
    ) -> Result<(), CodecError> {
        // Only elements are pushed while encoding, so the next child index
        // is the current child count.
        path.push(parent.children().len());
        let mut child = Element::new(name);
        let result = self.encode(value, &mut child, path);
        path.pop();
        parent.push_element(child);
        result
    }

    fn encode_shared(
        &mut self,
        shared: &dyn Shared,
        element: &mut Element,
        path: &mut Vec<usize>,
    ) -> Result<(), CodecError> {
        let pointee = shared.pointee_info();
        if self.tracks(pointee) && !self.cache.try_register(shared.addr_key(), path) {
            trace!(
                "<{}> repeats a `{}` instance, writing a back-reference",
                element.name(),
                pointee.type_path(),
            );
            return Ok(());
        }

        let mut result = Ok(());
        let visited = shared.with_pointee(&mut |inner| result = self.encode(inner, element, path));
        if !visited {
            return Err(CodecError::SharedBorrowed(element.name().to_string()));
        }
        result
    }

    /// Whether instances of `pointee` go through the identity cache.
    fn tracks(&self, pointee: &TypeInfo) -> bool {
        self.graph
            && pointee.options().use_graph_serialization
            && !matches!(pointee.kind(), Kind::Scalar | Kind::Enum)
    }

    fn encode_items<'a>(
        &mut self,
        items: impl Iterator<Item = &'a dyn Reflect>,
        element: &mut Element,
        path: &mut Vec<usize>,
    ) -> Result<(), CodecError> {
        let name = String::from(element.name());
        for item in items {
            self.encode_child(&name, item, element, path)?;
        }
        Ok(())
    }

    fn encode_map(
        &mut self,
        map: &dyn Map,
        element: &mut Element,
        path: &mut Vec<usize>,
    ) -> Result<(), CodecError> {
        let name = String::from(element.name());
        for (key, value) in map.iter() {
            path.push(element.children().len());
            let mut entry = Element::new(name.as_str());
            let result = self
                .encode_child("key", key, &mut entry, path)
                .and_then(|()| self.encode_child("value", value, &mut entry, path));
            path.pop();
            element.push_element(entry);
            result?;
        }
        Ok(())
    }

    fn encode_struct(
        &mut self,
        value: &dyn Struct,
        element: &mut Element,
        path: &mut Vec<usize>,
    ) -> Result<(), CodecError> {
        let info = value.reflect_type_info();
        for field in info.fields() {
            if let Some(slot) = value.field_at(field.index()) {
                self.encode_child(field.logical_name(), slot, element, path)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec;
    use core::cell::RefCell;

    use super::Encoder;
    use crate::codec::{CodecError, SerializeOptions};
    use crate::culture::Culture;
    use crate::derive::Reflect;
    use crate::ops::Dynamic;

    fn invariant() -> Encoder {
        Encoder::new().with_culture(Culture::invariant())
    }

    #[derive(Reflect, Default)]
    struct Pair2 {
        left: Option<Rc<String>>,
        right: Option<Rc<String>>,
    }

    #[derive(Reflect, Default)]
    struct Holder {
        a: Rc<Vec<u8>>,
        b: Rc<Vec<u8>>,
        c: Rc<Vec<u8>>,
    }

    #[test]
    fn primitive_root() {
        let doc = invariant().serialize(&42_i32, "Person").unwrap();
        assert_eq!(
            doc.to_xml_string(),
            r#"<Person value="42" culture="" type="i32"/>"#
        );
    }

    #[test]
    fn root_name_must_be_an_xml_name() {
        for name in ["my root", "", "1st", "a<b"] {
            let err = invariant().serialize(&1_i32, name).unwrap_err();
            assert!(matches!(err, CodecError::InvalidName(n) if n == name));
        }
        assert!(invariant().serialize(&1_i32, "ns:root-1.x").is_ok());
    }

    #[test]
    fn null_root_has_no_type() {
        let doc = invariant().serialize(&None::<i32>, "Nothing").unwrap();
        assert_eq!(doc.root().attribute("value"), Some("null"));
        assert_eq!(doc.root().attribute("type"), None);

        let doc = invariant().serialize(&Dynamic::empty(), "Nothing").unwrap();
        assert_eq!(doc.root().attribute("value"), Some("null"));
    }

    #[test]
    fn dynamic_root_names_held_type() {
        let doc = invariant().serialize(&Dynamic::new(7_u16), "Any").unwrap();
        assert_eq!(doc.root().attribute("type"), Some("u16"));
        assert_eq!(doc.root().attribute("value"), Some("7"));
    }

    #[test]
    fn maps_write_key_value_entries() {
        let map = BTreeMap::from([(String::from("x"), 1_i32)]);
        let doc = invariant().serialize(&map, "Dict").unwrap();
        let entry = doc.root().elements().next().unwrap();
        assert_eq!(entry.name(), "Dict");
        assert_eq!(entry.child("key").unwrap().attribute("value"), Some("x"));
        assert_eq!(entry.child("value").unwrap().attribute("value"), Some("1"));
    }

    #[test]
    fn scalars_are_never_tracked() {
        let s = Rc::new(String::from("same"));
        let value = Pair2 {
            left: Some(Rc::clone(&s)),
            right: Some(s),
        };
        let doc = invariant().serialize(&value, "P").unwrap();
        for child in doc.root().elements() {
            assert_eq!(child.attribute("id"), None);
            assert_eq!(child.attribute("value"), Some("same"));
        }
    }

    #[test]
    fn repeats_become_back_references() {
        let shared = Rc::new(vec![1_u8, 2]);
        let value = Holder {
            a: Rc::new(vec![9]),
            b: Rc::clone(&shared),
            c: shared,
        };
        let doc = invariant().serialize(&value, "H").unwrap();
        let root = doc.root();

        let a = root.child("a").unwrap();
        assert_eq!(a.attribute("id"), None);

        let b = root.child("b").unwrap();
        assert_eq!(b.attribute("id"), Some("0"));
        assert_eq!(b.child_count(), 2);

        let c = root.child("c").unwrap();
        assert_eq!(c.attribute("id"), Some("0"));
        assert_eq!(c.child_count(), 0);
    }

    #[test]
    fn tree_mode_duplicates() {
        let shared = Rc::new(vec![1_u8]);
        let value = Holder {
            a: Rc::clone(&shared),
            b: Rc::clone(&shared),
            c: shared,
        };
        let doc = invariant()
            .with_options(SerializeOptions {
                use_graph_serialization: false,
            })
            .serialize(&value, "H")
            .unwrap();
        for child in doc.root().elements() {
            assert_eq!(child.attribute("id"), None);
            assert_eq!(child.child_count(), 1);
        }
    }

    #[test]
    fn borrowed_cells_fail() {
        let cell = Rc::new(RefCell::new(1_i32));
        let guard = cell.borrow_mut();
        let err = invariant().serialize(&cell, "Cell").unwrap_err();
        assert!(matches!(err, crate::codec::CodecError::SharedBorrowed(ref name) if name == "Cell"));
        drop(guard);
    }

    #[test]
    fn floats_follow_culture() {
        let de = Culture::from_tag("de-DE").unwrap();
        let doc = Encoder::new().with_culture(de).serialize(&1.5_f64, "F").unwrap();
        assert_eq!(doc.root().attribute("value"), Some("1,5"));
        assert_eq!(doc.root().attribute("culture"), Some("de-DE"));
    }
}
