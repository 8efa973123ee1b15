// SPDX-FileCopyrightText: 2026 Sleuth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin descriptor (`findbugs.xml`) parsing.
//!
//! The descriptor lists the detectors a bundle ships and the bug patterns they
//! report. Human-readable text for those patterns lives in the message
//! catalog, see [`crate::catalog`].

use crate::xml::{parse_document, XmlError};

const ROOT: &str = "FindbugsPlugin";

/// One `<Detector>` entry, as authored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorDeclaration {
    /// Qualified name of the detector implementation.
    pub class_name: String,
    /// Raw `disabled` attribute, if present.
    pub disabled: Option<String>,
}

impl DetectorDeclaration {
    /// Whether this detector is left out of the registry.
    ///
    /// Only the exact, case-sensitive literal `"true"` disables a detector.
    /// `"True"`, `" true"`, `"false"`, empty and absent values all leave it
    /// enabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled.as_deref() == Some("true")
    }
}

/// One `<BugPattern>` entry of the descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugPatternDeclaration {
    pub bug_type: String,
    pub abbrev: String,
    pub category: String,
}

/// Parsed descriptor, entries in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginDescriptor {
    pub detectors: Vec<DetectorDeclaration>,
    pub bug_patterns: Vec<BugPatternDeclaration>,
}

/// Parse descriptor content, decoded per its XML declaration.
///
/// The root must be `<FindbugsPlugin>`. `<Detector>` requires `class`;
/// `<BugPattern>` requires `type`, `abbrev` and `category`. Unknown children
/// are ignored.
pub fn parse_descriptor(content: impl AsRef<[u8]>) -> Result<PluginDescriptor, XmlError> {
    let root = parse_document(content)?;
    root.expect_name(ROOT)?;

    let detectors = root
        .children_named("Detector")
        .map(|node| {
            Ok(DetectorDeclaration {
                class_name: node.required_attr("class")?.to_string(),
                disabled: node.attr("disabled").map(str::to_string),
            })
        })
        .collect::<Result<Vec<_>, XmlError>>()?;

    let bug_patterns = root
        .children_named("BugPattern")
        .map(|node| {
            Ok(BugPatternDeclaration {
                bug_type: node.required_attr("type")?.to_string(),
                abbrev: node.required_attr("abbrev")?.to_string(),
                category: node.required_attr("category")?.to_string(),
            })
        })
        .collect::<Result<Vec<_>, XmlError>>()?;

    Ok(PluginDescriptor {
        detectors,
        bug_patterns,
    })
}
