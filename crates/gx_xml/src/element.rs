use crate::XmlError;
use crate::reader::{Whitespace, parse_nodes};
use crate::writer::{write_element, write_nodes};

// -----------------------------------------------------------------------------
// Node

/// A child of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    /// Returns the element if this node is one.
    #[inline]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Names

/// Whether `name` can be written as an element or attribute name.
///
/// Letters, `_` and `:` may start a name; digits, `-`, `.` and `·` may
/// also follow.
///
/// ```
/// assert!(gx_xml::is_name("Person"));
/// assert!(gx_xml::is_name("_a.b-1"));
/// assert!(!gx_xml::is_name("my root"));
/// assert!(!gx_xml::is_name("1st"));
/// assert!(!gx_xml::is_name(""));
/// ```
pub fn is_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.' | '\u{B7}'))
}

// -----------------------------------------------------------------------------
// Element

/// A named node with ordered attributes and ordered children.
///
/// Attribute order is insertion order; setting an existing attribute
/// replaces its value in place.
///
/// # Examples
///
/// ```
/// use gx_xml::Element;
///
/// let mut list = Element::new("Numbers");
/// for v in ["1", "2", "3"] {
///     let mut item = Element::new("Numbers");
///     item.set_attribute("value", v);
///     list.push_element(item);
/// }
///
/// let values: Vec<_> = list.elements().filter_map(|e| e.attribute("value")).collect();
/// assert_eq!(values, ["1", "2", "3"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an element without attributes or children.
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns the value of the attribute `name`, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Sets an attribute, replacing the previous value if there was one.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Removes an attribute and returns its value.
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let index = self.attributes.iter().position(|(key, _)| key == name)?;
        Some(self.attributes.remove(index).1)
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn attributes(&self) -> impl ExactSizeIterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// All child nodes, text included.
    #[inline]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    #[inline]
    pub fn push(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Appends a child element and returns its index among [`children`](Self::children).
    #[inline]
    pub fn push_element(&mut self, child: Element) -> usize {
        self.children.push(Node::Element(child));
        self.children.len() - 1
    }

    #[inline]
    pub fn push_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(text.into()));
    }

    /// Element children in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// The first child element called `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == name)
    }

    /// Number of element children.
    pub fn child_count(&self) -> usize {
        self.elements().count()
    }

    /// Follows a path of child indices (as returned by
    /// [`push_element`](Self::push_element)) down from this element.
    ///
    /// An empty path is `self`.
    pub fn descendant_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        let mut current = self;
        for &index in path {
            current = current.children.get_mut(index)?.as_element_mut()?;
        }
        Some(current)
    }

    /// Concatenated text children.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            if let Node::Text(text) = node {
                out.push_str(text);
            }
        }
        out
    }

    /// The markup of all children, without this element's own tags.
    pub fn inner_xml(&self) -> String {
        let mut out = String::new();
        write_nodes(&mut out, &self.children);
        out
    }

    /// Replaces all children with the nodes parsed from `fragment`.
    ///
    /// Text is kept as written, including whitespace-only runs. On error
    /// the element is left unchanged.
    ///
    /// ```
    /// use gx_xml::Element;
    ///
    /// let mut e = Element::new("value");
    /// e.set_inner_xml("<a/>text<b x=\"1\"/>").unwrap();
    /// assert_eq!(e.child_count(), 2);
    /// assert_eq!(e.text(), "text");
    /// assert_eq!(e.inner_xml(), "<a/>text<b x=\"1\"/>");
    /// ```
    pub fn set_inner_xml(&mut self, fragment: &str) -> Result<(), XmlError> {
        self.children = parse_nodes(fragment, Whitespace::Keep)?;
        Ok(())
    }

    /// Removes whitespace-only text when element children are present.
    pub(crate) fn drop_layout_text(&mut self) {
        if self.children.iter().any(|node| matches!(node, Node::Element(_))) {
            self.children
                .retain(|node| !matches!(node, Node::Text(text) if text.trim().is_empty()));
        }
    }

    /// Parses a fragment that must hold exactly one element.
    ///
    /// Whitespace-only text is kept only as the sole content of an element.
    pub fn parse(input: &str) -> Result<Self, XmlError> {
        let mut root = None;
        for node in parse_nodes(input, Whitespace::Layout)? {
            match node {
                Node::Element(element) if root.is_none() => root = Some(element),
                Node::Element(_) => return Err(XmlError::MultipleRoots),
                Node::Text(_) => return Err(XmlError::StrayText),
            }
        }
        root.ok_or(XmlError::NoRoot)
    }

    /// Renders this element and its subtree.
    pub fn to_xml_string(&self) -> String {
        let mut out = String::new();
        write_element(&mut out, self);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::{Element, Node};
    use crate::XmlError;

    #[test]
    fn attributes_keep_order_and_replace() {
        let mut e = Element::new("Root");
        e.set_attribute("b", "1");
        e.set_attribute("a", "2");
        e.set_attribute("b", "3");

        let attrs: Vec<_> = e.attributes().collect();
        assert_eq!(attrs, [("b", "3"), ("a", "2")]);

        assert_eq!(e.remove_attribute("b"), Some("3".to_owned()));
        assert_eq!(e.attribute("b"), None);
        assert_eq!(e.remove_attribute("missing"), None);
    }

    #[test]
    fn descendant_paths() {
        let mut root = Element::new("r");
        let mut mid = Element::new("m");
        mid.push_text("t");
        mid.push_element(Element::new("leaf"));
        root.push_element(Element::new("first"));
        let at = root.push_element(mid);
        assert_eq!(at, 1);

        let leaf = root.descendant_mut(&[1, 1]).unwrap();
        assert_eq!(leaf.name(), "leaf");
        leaf.set_attribute("id", "0");

        assert!(root.descendant_mut(&[1, 0]).is_none());
        assert!(root.descendant_mut(&[5]).is_none());
        assert_eq!(root.descendant_mut(&[]).unwrap().name(), "r");
        assert_eq!(
            root.to_xml_string(),
            r#"<r><first/><m>t<leaf id="0"/></m></r>"#
        );
    }

    #[test]
    fn special_characters_survive() {
        let mut e = Element::new("s");
        e.set_attribute("value", "a\"b'<c>&\n\td\r");
        e.push(Node::Text("x < y & z".to_owned()));

        let parsed = Element::parse(&e.to_xml_string()).unwrap();
        assert_eq!(parsed, e);
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(Element::parse(""), Err(XmlError::NoRoot)));
        assert!(matches!(Element::parse("<a/><b/>"), Err(XmlError::MultipleRoots)));
        assert!(matches!(Element::parse("<a/>junk"), Err(XmlError::StrayText)));
        assert!(Element::parse("<a><b></a>").is_err());
        assert!(Element::parse("<a>").is_err());
    }

    #[test]
    fn failed_inner_xml_keeps_children() {
        let mut e = Element::new("v");
        e.push_element(Element::new("kept"));
        assert!(e.set_inner_xml("<broken>").is_err());
        assert_eq!(e.child_count(), 1);
    }

    #[test]
    fn inner_xml_keeps_whitespace() {
        let mut e = Element::new("v");
        e.set_inner_xml("  ").unwrap();
        assert_eq!(e.text(), "  ");
        assert_eq!(e.inner_xml(), "  ");

        let parsed = Element::parse(&e.to_xml_string()).unwrap();
        assert_eq!(parsed.text(), "  ");
    }
}
