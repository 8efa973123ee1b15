// SPDX-FileCopyrightText: 2026 Sleuth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message catalog (`messages*.xml`) parsing.
//!
//! A catalog supplies the human-readable text for each bug-pattern type and
//! the list of bug codes. Every `BugPattern` entry must carry all three
//! descriptive children; a missing one is reported with the owning type and
//! the element name.

use std::collections::HashMap;

use sleuth_core::{BugCode, MessageField, PluginError};

use crate::xml::{parse_document, Element, XmlError};

const ROOT: &str = "MessageCollection";

/// Descriptive text for one bug-pattern type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugPatternMessages {
    pub short_description: String,
    pub long_description: String,
    pub details: String,
}

/// Parsed catalog: per-type messages plus bug codes in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageCatalog {
    messages: HashMap<String, BugPatternMessages>,
    bug_codes: Vec<BugCode>,
}

impl MessageCatalog {
    /// Messages for a bug-pattern type.
    pub fn messages_for(&self, bug_type: &str) -> Option<&BugPatternMessages> {
        self.messages.get(bug_type)
    }

    pub fn bug_codes(&self) -> &[BugCode] {
        &self.bug_codes
    }

    /// Number of distinct bug-pattern types described.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Parse catalog content read from `file`.
///
/// When a type appears more than once the first entry wins, but every entry
/// is still validated.
pub fn parse_catalog(file: &str, content: impl AsRef<[u8]>) -> Result<MessageCatalog, PluginError> {
    let malformed = |e: XmlError| PluginError::MalformedCatalog {
        file: file.to_string(),
        source: Box::new(e),
    };

    let root = parse_document(content).map_err(malformed)?;
    root.expect_name(ROOT).map_err(malformed)?;

    let mut messages = HashMap::new();
    for node in root.children_named("BugPattern") {
        let bug_type = node.required_attr("type").map_err(malformed)?;
        let entry = BugPatternMessages {
            short_description: child_text(node, bug_type, MessageField::ShortDescription)?,
            long_description: child_text(node, bug_type, MessageField::LongDescription)?,
            details: child_text(node, bug_type, MessageField::Details)?,
        };
        messages.entry(bug_type.to_string()).or_insert(entry);
    }

    let bug_codes = root
        .children_named("BugCode")
        .map(|node| match node.attr("abbrev") {
            Some(abbrev) if !abbrev.is_empty() => Ok(BugCode {
                abbrev: abbrev.to_string(),
                description: node.text(),
            }),
            _ => Err(PluginError::MissingBugCodeAbbrev {
                file: file.to_string(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MessageCatalog {
        messages,
        bug_codes,
    })
}

fn child_text(node: &Element, bug_type: &str, field: MessageField) -> Result<String, PluginError> {
    node.child(&field.to_string())
        .map(Element::text)
        .ok_or_else(|| PluginError::MissingChildElement {
            bug_type: bug_type.to_string(),
            element: field,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<MessageCollection>
  <BugPattern type="NP_NULL">
    <ShortDescription>Possible null dereference</ShortDescription>
    <LongDescription>Possible null dereference in {1}</LongDescription>
    <Details><![CDATA[<p>A value that may be null is dereferenced.</p>]]></Details>
  </BugPattern>
  <BugCode abbrev="NP">Null pointer dereference</BugCode>
  <BugCode abbrev="RCN">Redundant null check</BugCode>
</MessageCollection>"#;

    #[test]
    fn parses_messages_and_codes() {
        let catalog = parse_catalog("messages.xml", FULL).unwrap();
        assert_eq!(catalog.len(), 1);

        let messages = catalog.messages_for("NP_NULL").unwrap();
        assert_eq!(messages.short_description, "Possible null dereference");
        assert_eq!(messages.long_description, "Possible null dereference in {1}");
        assert_eq!(
            messages.details,
            "<p>A value that may be null is dereferenced.</p>"
        );

        let abbrevs: Vec<_> = catalog.bug_codes().iter().map(|c| c.abbrev.as_str()).collect();
        assert_eq!(abbrevs, vec!["NP", "RCN"]);
        assert_eq!(catalog.bug_codes()[1].description, "Redundant null check");
        assert!(catalog.messages_for("OTHER").is_none());
    }

    #[test]
    fn each_missing_child_is_named() {
        for missing in MessageField::ALL {
            let children: String = MessageField::ALL
                .iter()
                .filter(|f| **f != missing)
                .map(|f| format!("<{f}>text</{f}>"))
                .collect();
            let xml = format!(
                r#"<MessageCollection><BugPattern type="XYZ">{children}</BugPattern></MessageCollection>"#
            );

            match parse_catalog("messages.xml", &xml) {
                Err(PluginError::MissingChildElement { bug_type, element }) => {
                    assert_eq!(bug_type, "XYZ");
                    assert_eq!(element, missing);
                }
                other => panic!("expected MissingChildElement for {missing}, got {other:?}"),
            }
        }
    }

    #[test]
    fn empty_child_is_allowed() {
        let xml = r#"<MessageCollection><BugPattern type="T">
<ShortDescription/><LongDescription></LongDescription><Details/>
</BugPattern></MessageCollection>"#;
        let catalog = parse_catalog("messages.xml", xml).unwrap();
        assert_eq!(catalog.messages_for("T").unwrap().short_description, "");
    }

    #[test]
    fn empty_or_absent_abbrev_is_rejected() {
        for code in [r#"<BugCode abbrev="">x</BugCode>"#, "<BugCode>x</BugCode>"] {
            let xml = format!("<MessageCollection>{code}</MessageCollection>");
            match parse_catalog("messages_fr.xml", &xml) {
                Err(PluginError::MissingBugCodeAbbrev { file }) => {
                    assert_eq!(file, "messages_fr.xml");
                }
                other => panic!("expected MissingBugCodeAbbrev, got {other:?}"),
            }
        }
    }

    #[test]
    fn first_duplicate_type_wins() {
        let xml = r#"<MessageCollection>
<BugPattern type="T"><ShortDescription>first</ShortDescription><LongDescription/><Details/></BugPattern>
<BugPattern type="T"><ShortDescription>second</ShortDescription><LongDescription/><Details/></BugPattern>
</MessageCollection>"#;
        let catalog = parse_catalog("messages.xml", xml).unwrap();
        assert_eq!(catalog.messages_for("T").unwrap().short_description, "first");
    }

    #[test]
    fn malformed_catalog_names_file() {
        match parse_catalog("messages_de.xml", "<MessageCollection><BugCode") {
            Err(PluginError::MalformedCatalog { file, .. }) => assert_eq!(file, "messages_de.xml"),
            other => panic!("expected MalformedCatalog, got {other:?}"),
        }
        assert!(matches!(
            parse_catalog("messages.xml", "<FindbugsPlugin/>"),
            Err(PluginError::MalformedCatalog { .. })
        ));
    }
}
