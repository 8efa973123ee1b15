// SPDX-FileCopyrightText: 2026 Sleuth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Sleuth plugin loader.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::Diagnostic;
use thiserror::Error;

use crate::types::{BundleLocation, MessageField};

/// Boxed underlying cause carried by the wrapping variants.
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync>;

/// Every way a plugin bundle load can fail.
///
/// Any variant aborts the load in progress; a registry is never returned
/// half-built. Malformed bundle content is permanent, so nothing here is
/// retried.
#[derive(Debug, Error, Diagnostic)]
pub enum PluginError {
    /// The bundle location string could not be turned into a local root.
    #[error("invalid plugin bundle location `{input}`: {reason}")]
    #[diagnostic(
        code(sleuth::plugin::invalid_location),
        help("pass a directory path or a file:// URL")
    )]
    InvalidLocation { input: String, reason: String },

    /// `findbugs.xml` is absent from the bundle.
    #[error("couldn't find \"findbugs.xml\" in plugin bundle {location}")]
    #[diagnostic(code(sleuth::plugin::missing_descriptor))]
    MissingDescriptor { location: BundleLocation },

    /// `findbugs.xml` exists but could not be read or parsed.
    #[error("couldn't parse \"findbugs.xml\" in plugin bundle {location}")]
    #[diagnostic(code(sleuth::plugin::malformed_descriptor))]
    MalformedDescriptor {
        location: BundleLocation,
        source: BoxedCause,
    },

    /// None of the locale candidates resolved to a catalog file.
    #[error(
        "couldn't find a message catalog in plugin bundle {location} (tried {})",
        .attempted.join(", ")
    )]
    #[diagnostic(
        code(sleuth::plugin::missing_message_catalog),
        help("every bundle needs at least a messages.xml")
    )]
    MissingMessageCatalog {
        location: BundleLocation,
        attempted: Vec<String>,
    },

    /// The resolved catalog could not be read or parsed.
    #[error("couldn't parse message catalog \"{file}\"")]
    #[diagnostic(code(sleuth::plugin::malformed_catalog))]
    MalformedCatalog { file: String, source: BoxedCause },

    /// The descriptor declares a bug pattern the catalog does not describe.
    #[error("message catalog is missing BugPattern element for type {bug_type}")]
    #[diagnostic(code(sleuth::plugin::missing_bug_pattern_message))]
    MissingBugPatternMessage { bug_type: String },

    /// A catalog bug-pattern entry lacks one of its descriptive children.
    #[error("could not find child \"{element}\" for BugPattern {bug_type}")]
    #[diagnostic(code(sleuth::plugin::missing_child_element))]
    MissingChildElement {
        bug_type: String,
        element: MessageField,
    },

    /// A `BugCode` entry has an empty or absent `abbrev` attribute.
    #[error("BugCode element with missing abbrev attribute in \"{file}\"")]
    #[diagnostic(code(sleuth::plugin::missing_bug_code_abbrev))]
    MissingBugCodeAbbrev { file: String },

    /// A detector's code could not be resolved or loaded from the bundle.
    #[error("could not load detector {class_name} from plugin bundle {location}")]
    #[diagnostic(code(sleuth::plugin::detector_load_failure))]
    DetectorLoadFailure {
        class_name: String,
        location: BundleLocation,
        source: BoxedCause,
    },
}
