use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::net::SocketAddr;

use chrono::{NaiveDate, NaiveDateTime};
use gx_xml::{Document, XmlError};
use rust_decimal::Decimal;

use crate::codec::{CodecError, Decoder, Encoder, SerializeOptions};
use crate::culture::Culture;
use crate::derive::Reflect;
use crate::ops::{Dynamic, SelfDescribing};
use crate::registry::TypeRegistry;

fn encoder() -> Encoder {
    Encoder::new().with_culture(Culture::invariant())
}

fn round_trip<T: crate::Reflect + Default>(value: &T, registry: &TypeRegistry) -> T {
    let xml = encoder().serialize(value, "Root").unwrap().to_xml_string();
    let doc: Document = xml.parse().unwrap();
    Decoder::new(registry).deserialize(&doc).unwrap()
}

// -----------------------------------------------------------------------------
// Fixtures

#[derive(Reflect, Default, Debug, PartialEq)]
struct Person {
    name: String,
    age: i32,
    email: Option<String>,
}

#[derive(Reflect, Default)]
struct Node {
    label: String,
    next: Option<Rc<RefCell<Node>>>,
}

#[derive(Reflect, Default)]
#[reflect(force_complex)]
struct Link {
    label: String,
    next: Option<Rc<RefCell<Link>>>,
}

#[derive(Reflect, Default, Debug, PartialEq)]
struct Point {
    x: f64,
    y: f64,
}

#[derive(Reflect, Default)]
struct Container {
    first: Option<Rc<Point>>,
    second: Option<Rc<Point>>,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(graph = false)]
struct Tag {
    text: String,
}

#[derive(Reflect, Default)]
struct Tagged {
    a: Arc<Tag>,
    b: Arc<Tag>,
}

#[derive(Reflect, Default, Debug, PartialEq)]
struct PersonV1 {
    name: String,
}

#[derive(Reflect, Default, Debug, PartialEq)]
struct PersonV2 {
    name: String,
    nickname: String,
    score: u32,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(self_describing)]
struct Csv {
    cells: Vec<String>,
}

impl SelfDescribing for Csv {
    fn write_xml(&self) -> String {
        self.cells.join(",")
    }

    fn read_xml(&mut self, fragment: &str) -> Result<(), XmlError> {
        self.cells = fragment
            .split(',')
            .filter(|cell| !cell.is_empty())
            .map(String::from)
            .collect();
        Ok(())
    }
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(force_complex)]
struct Pages {
    items: Vec<u16>,
    cursor: usize,
}

#[derive(Reflect, Default, Debug)]
struct Envelope {
    payload: Dynamic,
}

#[derive(Reflect, Debug, PartialEq)]
struct Ledger {
    when: NaiveDateTime,
    amount: Decimal,
    ratio: f32,
    peer: SocketAddr,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            when: NaiveDateTime::default(),
            amount: Decimal::ZERO,
            ratio: 0.0,
            peer: SocketAddr::from(([127, 0, 0, 1], 8500)),
        }
    }
}

#[derive(Reflect, Default, Debug, PartialEq)]
struct Skips {
    kept: u8,
    #[reflect(ignore)]
    cache: u8,
}

// -----------------------------------------------------------------------------
// Scenarios

#[test]
fn primitive() {
    let doc = encoder().serialize(&42_i32, "Person").unwrap();
    assert_eq!(doc.root().name(), "Person");
    assert_eq!(doc.root().attribute("value"), Some("42"));

    let registry = TypeRegistry::new();
    let age: i32 = Decoder::new(&registry).deserialize(&doc).unwrap();
    assert_eq!(age, 42);
}

#[test]
fn list() {
    let doc = encoder().serialize(&vec![1_i32, 2, 3], "Numbers").unwrap();
    let values: Vec<&str> = doc
        .root()
        .elements()
        .map(|child| child.attribute("value").unwrap())
        .collect();
    assert_eq!(values, ["1", "2", "3"]);

    let registry = TypeRegistry::new();
    let back: Vec<i32> = Decoder::new(&registry).deserialize(&doc).unwrap();
    assert_eq!(back, [1, 2, 3]);
}

#[test]
fn dictionary() {
    let map = BTreeMap::from([(String::from("x"), 1_i32)]);
    let doc = encoder().serialize(&map, "Dict").unwrap();
    assert_eq!(doc.root().child_count(), 1);
    let entry = doc.root().elements().next().unwrap();
    let names: Vec<&str> = entry.elements().map(|e| e.name()).collect();
    assert_eq!(names, ["key", "value"]);

    let registry = TypeRegistry::new();
    let back: BTreeMap<String, i32> = Decoder::new(&registry).deserialize(&doc).unwrap();
    assert_eq!(back, map);
}

#[test]
fn self_referential_node() {
    let node = Rc::new(RefCell::new(Node {
        label: String::from("n"),
        next: None,
    }));
    node.borrow_mut().next = Some(Rc::clone(&node));

    let doc = encoder().serialize(&node, "Node").unwrap();
    node.borrow_mut().next = None;

    let root = doc.root();
    assert_eq!(root.attribute("id"), Some("0"));
    let next = root.child("next").unwrap();
    assert_eq!(next.attribute("id"), Some("0"));
    assert_eq!(next.child_count(), 0);

    let registry = TypeRegistry::new();
    let back: Rc<RefCell<Node>> = Decoder::new(&registry).deserialize(&doc).unwrap();
    let next = back.borrow().next.clone().unwrap();
    assert!(Rc::ptr_eq(&back, &next));
    assert_eq!(next.borrow().label, "n");
    back.borrow_mut().next = None;
}

#[test]
fn self_referential_force_complex_node() {
    let link = Rc::new(RefCell::new(Link {
        label: String::from("l"),
        next: None,
    }));
    link.borrow_mut().next = Some(Rc::clone(&link));

    let doc = encoder().serialize(&link, "Link").unwrap();
    link.borrow_mut().next = None;

    let root = doc.root();
    assert_eq!(root.attribute("id"), Some("0"));
    assert_eq!(root.child("label").unwrap().attribute("value"), Some("l"));
    let next = root.child("next").unwrap();
    assert_eq!(next.attribute("id"), Some("0"));
    assert_eq!(next.child_count(), 0);

    let registry = TypeRegistry::new();
    let doc: Document = doc.to_xml_string().parse().unwrap();
    let back: Rc<RefCell<Link>> = Decoder::new(&registry).deserialize(&doc).unwrap();
    let next = back.borrow().next.clone().unwrap();
    assert!(Rc::ptr_eq(&back, &next));
    assert_eq!(next.borrow().label, "l");
    back.borrow_mut().next = None;
}

// -----------------------------------------------------------------------------
// Properties

#[test]
fn scalars_round_trip_across_cultures() {
    let ledger = Ledger {
        when: NaiveDate::from_ymd_opt(2020, 12, 31)
            .unwrap()
            .and_hms_milli_opt(23, 59, 58, 250)
            .unwrap(),
        amount: "-1234.50".parse().unwrap(),
        ratio: 0.1,
        peer: "[fe80::1]:443".parse().unwrap(),
    };
    let registry = TypeRegistry::new();
    for culture in Culture::all() {
        let doc = Encoder::new()
            .with_culture(culture)
            .serialize(&ledger, "Ledger")
            .unwrap();
        let doc: Document = doc.to_xml_string().parse().unwrap();
        let back: Ledger = Decoder::new(&registry).deserialize(&doc).unwrap();
        assert_eq!(back, ledger, "culture `{}`", culture.tag());
    }
}

#[test]
fn culture_governs_parsing() {
    let registry = TypeRegistry::new();
    let doc: Document = r#"<P culture="de-DE"><x value="1,5"/><y value="-2"/></P>"#
        .parse()
        .unwrap();
    let point: Point = Decoder::new(&registry).deserialize(&doc).unwrap();
    assert_eq!(point, Point { x: 1.5, y: -2.0 });

    let doc: Document = r#"<P culture=""><x value="1,5"/></P>"#.parse().unwrap();
    let err = Decoder::new(&registry).deserialize::<Point>(&doc).unwrap_err();
    assert!(matches!(err, CodecError::MalformedScalar { .. }));
}

#[test]
fn null_stability() {
    let registry = TypeRegistry::new();
    let person = Person {
        name: String::from("Ann"),
        age: 30,
        email: None,
    };
    assert_eq!(round_trip(&person, &registry), person);
    assert_eq!(round_trip(&None::<Rc<Point>>, &registry), None);
    assert!(round_trip(&Dynamic::empty(), &registry).is_empty());
}

#[test]
fn null_text_reads_back_as_null() {
    let registry = TypeRegistry::new();
    let person = Person {
        name: String::from("null"),
        age: 1,
        email: Some(String::from("null")),
    };
    let doc = encoder().serialize(&person, "Person").unwrap();
    assert_eq!(doc.root().child("name").unwrap().attribute("value"), Some("null"));

    let back = round_trip(&person, &registry);
    assert_eq!(back.name, "");
    assert_eq!(back.email, None);
    assert_eq!(back.age, 1);
}

#[test]
fn graph_identity() {
    let shared = Rc::new(Point { x: 1.0, y: 2.0 });
    let container = Container {
        first: Some(Rc::clone(&shared)),
        second: Some(shared),
    };
    let registry = TypeRegistry::new();
    let back = round_trip(&container, &registry);
    let (first, second) = (back.first.unwrap(), back.second.unwrap());
    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(*first, Point { x: 1.0, y: 2.0 });
}

#[test]
fn tree_mode_duplication() {
    let shared = Rc::new(Point { x: 3.0, y: 4.0 });
    let container = Container {
        first: Some(Rc::clone(&shared)),
        second: Some(shared),
    };
    let doc = encoder()
        .with_options(SerializeOptions {
            use_graph_serialization: false,
        })
        .serialize(&container, "C")
        .unwrap();

    let registry = TypeRegistry::new();
    let back: Container = Decoder::new(&registry).deserialize(&doc).unwrap();
    let (first, second) = (back.first.unwrap(), back.second.unwrap());
    assert!(!Rc::ptr_eq(&first, &second));
    assert_eq!(first, second);
}

#[test]
fn graph_marker_on_pointee() {
    let tag = Arc::new(Tag {
        text: String::from("t"),
    });
    let value = Tagged {
        a: Arc::clone(&tag),
        b: tag,
    };
    let doc = encoder().serialize(&value, "T").unwrap();
    assert!(doc.root().elements().all(|e| e.attribute("id").is_none()));

    let registry = TypeRegistry::new();
    let back: Tagged = Decoder::new(&registry).deserialize(&doc).unwrap();
    assert!(!Arc::ptr_eq(&back.a, &back.b));
    assert_eq!(back.a, back.b);
}

#[test]
fn forward_compatibility() {
    let registry = TypeRegistry::new();
    let newer = PersonV2 {
        name: String::from("Bo"),
        nickname: String::from("B"),
        score: 9,
    };
    let doc = encoder().serialize(&newer, "Person").unwrap();
    let older: PersonV1 = Decoder::new(&registry).deserialize(&doc).unwrap();
    assert_eq!(older.name, "Bo");
}

#[test]
fn backward_compatibility() {
    let registry = TypeRegistry::new();
    let older = PersonV1 {
        name: String::from("Cy"),
    };
    let doc = encoder().serialize(&older, "Person").unwrap();
    let newer: PersonV2 = Decoder::new(&registry).deserialize(&doc).unwrap();
    assert_eq!(
        newer,
        PersonV2 {
            name: String::from("Cy"),
            nickname: String::new(),
            score: 0,
        }
    );
}

// -----------------------------------------------------------------------------
// Other kinds

#[test]
fn self_describing_values() {
    let value = Csv {
        cells: vec![String::from("a"), String::from("b")],
    };
    let doc = encoder().serialize(&value, "Csv").unwrap();
    assert_eq!(doc.root().child("value").unwrap().text(), "a,b");

    let registry = TypeRegistry::new();
    assert_eq!(round_trip(&value, &registry), value);

    let blank = Csv {
        cells: vec![String::from("  ")],
    };
    let doc = encoder().serialize(&blank, "Csv").unwrap();
    assert_eq!(doc.root().child("value").unwrap().text(), "  ");
    assert_eq!(round_trip(&blank, &registry), blank);
}

#[test]
fn force_complex_uses_fields() {
    let pages = Pages {
        items: vec![4, 5],
        cursor: 1,
    };
    let doc = encoder().serialize(&pages, "Pages").unwrap();
    assert_eq!(doc.root().child("items").unwrap().child_count(), 2);
    assert_eq!(doc.root().child("cursor").unwrap().attribute("value"), Some("1"));

    let registry = TypeRegistry::new();
    assert_eq!(round_trip(&pages, &registry), pages);
}

#[test]
fn ignored_fields_are_not_written() {
    let value = Skips { kept: 1, cache: 7 };
    let doc = encoder().serialize(&value, "S").unwrap();
    assert_eq!(doc.root().child_count(), 1);

    let registry = TypeRegistry::new();
    assert_eq!(round_trip(&value, &registry), Skips { kept: 1, cache: 0 });
}

#[test]
fn dynamic_payloads() {
    let mut registry = TypeRegistry::new();
    registry.register::<Person>();

    let envelope = Envelope {
        payload: Dynamic::new(Person {
            name: String::from("Di"),
            age: 5,
            email: Some(String::from("d@example.com")),
        }),
    };
    let doc = encoder().serialize(&envelope, "E").unwrap();
    assert_eq!(
        doc.root().child("payload").unwrap().attribute("type"),
        Some("gx_reflect::codec::tests::Person")
    );

    let back = round_trip(&envelope, &registry);
    let person = back.payload.downcast_ref::<Person>().unwrap();
    assert_eq!(person.age, 5);
    assert_eq!(person.email.as_deref(), Some("d@example.com"));

    let empty = TypeRegistry::new();
    let err = Decoder::new(&empty).deserialize::<Envelope>(&doc).unwrap_err();
    assert!(matches!(err, CodecError::UnresolvableType { .. }));
}

#[test]
fn deserialize_dynamic_uses_root_type() {
    let mut registry = TypeRegistry::new();
    registry.register::<Point>();

    let doc = encoder()
        .serialize(&Point { x: 0.5, y: 0.25 }, "Point")
        .unwrap();
    let value = Decoder::new(&registry).deserialize_dynamic(&doc).unwrap();
    assert_eq!(value.downcast_ref::<Point>(), Some(&Point { x: 0.5, y: 0.25 }));

    let meta = registry.get_with_type_name("Point").unwrap();
    let value = Decoder::new(&registry).deserialize_as(&doc, meta).unwrap();
    assert!(value.is::<Point>());
}

#[test]
fn malformed_documents() {
    let registry = TypeRegistry::new();
    let err = crate::from_xml_str::<i32>("<a><b></a>", &registry).unwrap_err();
    assert!(matches!(err, CodecError::Xml(_)));
}
