use crate::{Element, XmlError};

// -----------------------------------------------------------------------------
// Document

/// An XML document: a single root [`Element`].
///
/// No XML declaration is written; any declaration, comment or processing
/// instruction in parsed input is skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    #[inline]
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// Parses a complete document.
    ///
    /// # Examples
    ///
    /// ```
    /// use gx_xml::Document;
    ///
    /// let doc = Document::parse(r#"<?xml version="1.0"?>
    /// <!-- comment -->
    /// <Root culture="">
    ///     <x value="1" />
    /// </Root>"#).unwrap();
    ///
    /// assert_eq!(doc.root().name(), "Root");
    /// assert_eq!(doc.root().child("x").unwrap().attribute("value"), Some("1"));
    /// ```
    pub fn parse(input: &str) -> Result<Self, XmlError> {
        Element::parse(input).map(Self::new)
    }

    #[inline]
    pub fn root(&self) -> &Element {
        &self.root
    }

    #[inline]
    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    #[inline]
    pub fn into_root(self) -> Element {
        self.root
    }

    /// Renders the document without indentation.
    #[inline]
    pub fn to_xml_string(&self) -> String {
        self.root.to_xml_string()
    }
}

impl From<Element> for Document {
    #[inline]
    fn from(root: Element) -> Self {
        Self::new(root)
    }
}

impl core::str::FromStr for Document {
    type Err = XmlError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl core::fmt::Display for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_xml_string())
    }
}

#[cfg(test)]
mod tests {
    use super::Document;

    #[test]
    fn cdata_and_entities() {
        let doc = Document::parse("<r><![CDATA[<raw>]]></r>").unwrap();
        assert_eq!(doc.root().text(), "<raw>");
        assert_eq!(doc.to_xml_string(), "<r>&lt;raw&gt;</r>");

        let doc: Document = "<r v=\"&#10;&amp;\"/>".parse().unwrap();
        assert_eq!(doc.root().attribute("v"), Some("\n&"));
    }
}
