use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::{Element, Node, XmlError};

// -----------------------------------------------------------------------------
// Pull parsing

/// How whitespace-only text is treated while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Whitespace {
    /// Dropped at the top level and next to child elements, where it is
    /// layout. Kept as the sole content of an element.
    Layout,
    /// Content of a fragment; kept as text.
    Keep,
}

/// Parses a sequence of sibling nodes.
///
/// Declarations, comments, processing instructions and doctypes are
/// dropped. Text consisting only of whitespace follows `whitespace`, other
/// text is kept verbatim after unescaping. CDATA sections become text.
pub(crate) fn parse_nodes(input: &str, whitespace: Whitespace) -> Result<Vec<Node>, XmlError> {
    let mut reader = Reader::from_str(input);
    let mut top: Vec<Node> = Vec::new();
    let mut open: Vec<Element> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => open.push(start_element(&start)?),
            Event::Empty(start) => {
                let element = start_element(&start)?;
                attach(&mut open, &mut top, Node::Element(element));
            }
            Event::End(end) => match open.pop() {
                Some(mut element) => {
                    if whitespace == Whitespace::Layout {
                        element.drop_layout_text();
                    }
                    attach(&mut open, &mut top, Node::Element(element));
                }
                None => {
                    let qname = end.name();
                    let name = core::str::from_utf8(qname.as_ref())?;
                    return Err(XmlError::UnexpectedEnd(name.to_owned()));
                }
            },
            Event::Text(text) => {
                let text = text.unescape()?;
                let layout = text.trim().is_empty() && open.is_empty();
                if whitespace == Whitespace::Keep || !layout {
                    attach(&mut open, &mut top, Node::Text(text.into_owned()));
                }
            }
            Event::CData(data) => {
                let text = core::str::from_utf8(&data)?;
                attach(&mut open, &mut top, Node::Text(text.to_owned()));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    match open.pop() {
        Some(element) => Err(XmlError::Unclosed(element.name().to_owned())),
        None => Ok(top),
    }
}

fn start_element(start: &BytesStart<'_>) -> Result<Element, XmlError> {
    let qname = start.name();
    let name = core::str::from_utf8(qname.as_ref())?;
    let mut element = Element::new(name);
    for attr in start.attributes() {
        let attr = attr?;
        let key = core::str::from_utf8(attr.key.as_ref())?;
        let value = attr.unescape_value()?;
        element.set_attribute(key, value);
    }
    Ok(element)
}

#[inline]
fn attach(open: &mut [Element], top: &mut Vec<Node>, node: Node) {
    match open.last_mut() {
        Some(parent) => parent.push(node),
        None => top.push(node),
    }
}

#[cfg(test)]
mod tests {
    use super::{Whitespace, parse_nodes};
    use crate::Node;

    #[test]
    fn whitespace_only_text() {
        let input = "<a>  </a>\n  <b>\n  <c/>\n</b>";

        let layout = parse_nodes(input, Whitespace::Layout).unwrap();
        assert_eq!(layout.len(), 2);
        assert_eq!(layout[0].as_element().unwrap().text(), "  ");
        assert_eq!(layout[1].as_element().unwrap().child_count(), 1);

        let kept = parse_nodes(input, Whitespace::Keep).unwrap();
        assert_eq!(kept.len(), 3);
        assert_eq!(kept[0].as_element().unwrap().text(), "  ");
        assert_eq!(kept[1], Node::Text("\n  ".to_owned()));
    }
}
