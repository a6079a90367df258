use alloc::borrow::Cow;

use quick_xml::escape::escape;

use crate::{Element, Node};

// -----------------------------------------------------------------------------
// Serialization

pub(crate) fn write_element(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(element.name());
    for (name, value) in element.attributes() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attribute(value));
        out.push('"');
    }

    if element.children().is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    write_nodes(out, element.children());
    out.push_str("</");
    out.push_str(element.name());
    out.push('>');
}

pub(crate) fn write_nodes(out: &mut String, nodes: &[Node]) {
    for node in nodes {
        match node {
            Node::Element(child) => write_element(out, child),
            Node::Text(text) => out.push_str(&escape(text.as_str())),
        }
    }
}

/// Attribute values also protect tab, CR and LF; a reader would otherwise
/// normalize them to spaces.
fn escape_attribute(value: &str) -> Cow<'_, str> {
    let escaped = escape(value);
    if !escaped.contains(['\t', '\n', '\r']) {
        return escaped;
    }

    let mut out = String::with_capacity(escaped.len() + 8);
    for c in escaped.chars() {
        match c {
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::escape_attribute;

    #[test]
    fn attribute_escapes() {
        assert_eq!(escape_attribute("plain"), "plain");
        assert_eq!(escape_attribute("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
        assert_eq!(escape_attribute("x\ny\tz\r"), "x&#10;y&#9;z&#13;");
    }
}
