// SPDX-FileCopyrightText: 2026 Sleuth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Minimal typed XML tree for plugin descriptors and message catalogs.
//!
//! Documents are read with `quick-xml` into an owned [`Element`] tree and
//! walked with named traversal helpers (`children_named`, `child`, `attr`,
//! `text`) instead of path queries.
//!
//! Input is raw bytes. Names, attribute values and text are decoded with the
//! encoding named by the XML declaration (UTF-8 when there is none).

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

/// Structural problems found while reading a document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum XmlError {
    /// The underlying reader rejected the input.
    #[error("XML syntax error at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    /// The document has no root element.
    #[error("document has no root element")]
    NoRoot,

    /// The document ended while an element was still open.
    #[error("element <{name}> is never closed")]
    UnclosedElement { name: String },

    /// The root element is not the one the schema expects.
    #[error("expected root element <{expected}>, found <{found}>")]
    UnexpectedRoot { expected: String, found: String },

    /// A required attribute is absent.
    #[error("<{element}> is missing required attribute `{attribute}`")]
    MissingAttribute { element: String, attribute: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Element(Element),
    Text(String),
}

/// An element with its attributes and children, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of an attribute, unescaped.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Value of an attribute that the schema marks as required.
    pub fn required_attr(&self, name: &str) -> Result<&str, XmlError> {
        self.attr(name).ok_or_else(|| XmlError::MissingAttribute {
            element: self.name.clone(),
            attribute: name.to_string(),
        })
    }

    /// Direct child elements.
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Direct child elements with the given name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children().filter(move |child| child.name == name)
    }

    /// First direct child element with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children().find(|child| child.name == name)
    }

    /// Concatenated text and CDATA content directly under this element.
    ///
    /// Text inside nested elements is not included. Whitespace is preserved.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// Fail unless this element is named `expected`.
    pub fn expect_name(&self, expected: &str) -> Result<(), XmlError> {
        if self.name == expected {
            Ok(())
        } else {
            Err(XmlError::UnexpectedRoot {
                expected: expected.to_string(),
                found: self.name.clone(),
            })
        }
    }
}

/// Parse a whole document and return its root element.
pub fn parse_document(input: impl AsRef<[u8]>) -> Result<Element, XmlError> {
    let mut reader = Reader::from_reader(input.as_ref());
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                if stack.is_empty() && root.is_some() {
                    return Err(syntax(&reader, "multiple root elements"));
                }
                stack.push(open_element(&reader, &start)?);
            }
            Ok(Event::Empty(start)) => {
                let element = open_element(&reader, &start)?;
                attach(&reader, &mut stack, &mut root, element)?;
            }
            Ok(Event::End(_)) => {
                // quick-xml already checks that end names match.
                let element = stack
                    .pop()
                    .ok_or_else(|| syntax(&reader, "unexpected closing tag"))?;
                attach(&reader, &mut stack, &mut root, element)?;
            }
            Ok(Event::Text(text)) => {
                let text = text.unescape().map_err(|e| syntax(&reader, e))?;
                push_text(&reader, &mut stack, &text)?;
            }
            Ok(Event::CData(cdata)) => {
                let text = cdata.decode().map_err(|e| syntax(&reader, e))?;
                push_text(&reader, &mut stack, &text)?;
            }
            Ok(Event::Eof) => break,
            // Declarations, comments, processing instructions and doctypes carry no data.
            Ok(_) => {}
            Err(e) => return Err(syntax(&reader, e)),
        }
    }

    if let Some(open) = stack.pop() {
        return Err(XmlError::UnclosedElement { name: open.name });
    }
    root.ok_or(XmlError::NoRoot)
}

fn open_element(reader: &Reader<&[u8]>, start: &BytesStart<'_>) -> Result<Element, XmlError> {
    let decoder = reader.decoder();
    let name = decoder
        .decode(start.name().as_ref())
        .map_err(|e| syntax(reader, e))?
        .into_owned();
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| syntax(reader, e))?;
        let key = decoder
            .decode(attribute.key.as_ref())
            .map_err(|e| syntax(reader, e))?
            .into_owned();
        let value = attribute
            .decode_and_unescape_value(decoder)
            .map_err(|e| syntax(reader, e))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn attach(
    reader: &Reader<&[u8]>,
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None if root.is_some() => return Err(syntax(reader, "multiple root elements")),
        None => *root = Some(element),
    }
    Ok(())
}

fn push_text(reader: &Reader<&[u8]>, stack: &mut [Element], text: &str) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => {
            // Adjacent text and CDATA runs are merged into one node.
            if let Some(Node::Text(existing)) = parent.children.last_mut() {
                existing.push_str(text);
            } else {
                parent.children.push(Node::Text(text.to_string()));
            }
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(syntax(reader, "text outside the root element")),
    }
}

fn syntax(reader: &Reader<&[u8]>, message: impl std::fmt::Display) -> XmlError {
    XmlError::Syntax {
        position: reader.buffer_position() as u64,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_children_and_attributes() {
        let root = parse_document(
            r#"<?xml version="1.0"?>
<FindbugsPlugin>
  <Detector class="pkg.A" disabled="false"/>
  <Detector class="pkg.B"/>
  <BugPattern type="NP_NULL" abbrev="NP" category="CORRECTNESS"/>
</FindbugsPlugin>"#,
        )
        .unwrap();

        assert_eq!(root.name(), "FindbugsPlugin");
        let detectors: Vec<_> = root.children_named("Detector").collect();
        assert_eq!(detectors.len(), 2);
        assert_eq!(detectors[0].attr("class"), Some("pkg.A"));
        assert_eq!(detectors[0].attr("disabled"), Some("false"));
        assert_eq!(detectors[1].attr("disabled"), None);
        assert_eq!(root.children().count(), 3);
    }

    #[test]
    fn text_unescapes_entities_and_merges_cdata() {
        let root = parse_document(
            "<Details>a &lt;b&gt; <![CDATA[<p>raw</p>]]> c<Nested>skip</Nested></Details>",
        )
        .unwrap();
        assert_eq!(root.text(), "a <b> <p>raw</p> c");
    }

    #[test]
    fn attribute_values_are_unescaped() {
        let root = parse_document(r#"<BugCode abbrev="A&amp;B"/>"#).unwrap();
        assert_eq!(root.attr("abbrev"), Some("A&B"));
    }

    #[test]
    fn declared_latin1_is_decoded() {
        let input: &[u8] =
            b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n<Msg k=\"gr\xFC\xDF\">M\xF6glich</Msg>";
        let root = parse_document(input).unwrap();
        assert_eq!(root.text(), "M\u{f6}glich");
        assert_eq!(root.attr("k"), Some("gr\u{fc}\u{df}"));
    }

    #[test]
    fn undeclared_encoding_defaults_to_utf8() {
        let root = parse_document("<Msg>M\u{f6}glich</Msg>".as_bytes()).unwrap();
        assert_eq!(root.text(), "M\u{f6}glich");
    }

    #[test]
    fn required_attr_reports_element_and_attribute() {
        let root = parse_document("<Detector/>").unwrap();
        assert_eq!(
            root.required_attr("class"),
            Err(XmlError::MissingAttribute {
                element: "Detector".into(),
                attribute: "class".into(),
            })
        );
    }

    #[test]
    fn mismatched_end_tag_is_syntax_error() {
        let err = parse_document("<a><b></a></b>").unwrap_err();
        assert!(matches!(err, XmlError::Syntax { .. }), "got {err:?}");
    }

    #[test]
    fn unclosed_root_is_rejected() {
        // Depending on the reader, this surfaces at EOF either from quick-xml or from our stack.
        let err = parse_document("<a><b/>").unwrap_err();
        assert!(
            matches!(err, XmlError::UnclosedElement { .. } | XmlError::Syntax { .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn empty_document_has_no_root() {
        assert_eq!(parse_document("  <!-- nothing --> "), Err(XmlError::NoRoot));
    }

    #[test]
    fn second_root_is_rejected() {
        let err = parse_document("<a/><b/>").unwrap_err();
        assert!(matches!(err, XmlError::Syntax { .. }));
    }

    #[test]
    fn expect_name_checks_root() {
        let root = parse_document("<Other/>").unwrap();
        assert!(root.expect_name("Other").is_ok());
        assert_eq!(
            root.expect_name("MessageCollection"),
            Err(XmlError::UnexpectedRoot {
                expected: "MessageCollection".into(),
                found: "Other".into(),
            })
        );
    }
}
