// SPDX-FileCopyrightText: 2026 Sleuth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registry assembled from a parsed descriptor and catalog.
//!
//! The `PluginRegistry` holds the detector factories, bug patterns and bug
//! codes of one bundle. It is built in a single fail-fast pass by
//! [`build_registry`] and is read-only afterwards.

use sleuth_core::{BugCode, BugPattern, BundleLocation, PluginError};
use tracing::debug;

use crate::catalog::MessageCatalog;
use crate::descriptor::PluginDescriptor;
use crate::namespace::{DetectorFactory, ModuleNamespace};

/// Validated metadata and loaded detectors of one plugin bundle.
///
/// Detector factories and bug patterns keep descriptor order; bug codes keep
/// catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginRegistry {
    location: BundleLocation,
    catalog_file: String,
    detector_factories: Vec<DetectorFactory>,
    bug_patterns: Vec<BugPattern>,
    bug_codes: Vec<BugCode>,
}

impl PluginRegistry {
    /// Bundle the registry was loaded from.
    pub fn location(&self) -> &BundleLocation {
        &self.location
    }

    /// Catalog file the messages were taken from, e.g. `messages_de.xml`.
    pub fn catalog_file(&self) -> &str {
        &self.catalog_file
    }

    pub fn detector_factories(&self) -> &[DetectorFactory] {
        &self.detector_factories
    }

    pub fn bug_patterns(&self) -> &[BugPattern] {
        &self.bug_patterns
    }

    pub fn bug_codes(&self) -> &[BugCode] {
        &self.bug_codes
    }

    /// Look up a detector factory by qualified name.
    pub fn detector_factory(&self, class_name: &str) -> Option<&DetectorFactory> {
        self.detector_factories
            .iter()
            .find(|f| f.class_name == class_name)
    }

    /// Look up a bug pattern by type.
    pub fn bug_pattern(&self, bug_type: &str) -> Option<&BugPattern> {
        self.bug_patterns.iter().find(|p| p.bug_type == bug_type)
    }

    /// Look up a bug code by abbreviation.
    pub fn bug_code(&self, abbrev: &str) -> Option<&BugCode> {
        self.bug_codes.iter().find(|c| c.abbrev == abbrev)
    }

    /// Split into owned parts: factories, patterns, codes.
    pub fn into_parts(self) -> (Vec<DetectorFactory>, Vec<BugPattern>, Vec<BugCode>) {
        (self.detector_factories, self.bug_patterns, self.bug_codes)
    }
}

/// Cross-reference a descriptor against a catalog and load enabled detectors.
///
/// Disabled detectors are skipped. Any load failure or a bug pattern without
/// catalog messages aborts the whole build; nothing partial is returned.
pub fn build_registry(
    descriptor: &PluginDescriptor,
    catalog: &MessageCatalog,
    catalog_file: &str,
    namespace: &mut dyn ModuleNamespace,
) -> Result<PluginRegistry, PluginError> {
    let location = namespace.location().clone();

    let mut detector_factories = Vec::with_capacity(descriptor.detectors.len());
    for declaration in &descriptor.detectors {
        if declaration.is_disabled() {
            debug!(bundle = %location, detector = %declaration.class_name, "skipping disabled detector");
            continue;
        }

        let entry_point = namespace
            .load_detector(&declaration.class_name)
            .map_err(|e| PluginError::DetectorLoadFailure {
                class_name: declaration.class_name.clone(),
                location: location.clone(),
                source: Box::new(e),
            })?;
        detector_factories.push(DetectorFactory {
            class_name: declaration.class_name.clone(),
            entry_point,
        });
    }

    let bug_patterns = descriptor
        .bug_patterns
        .iter()
        .map(|declaration| {
            let messages = catalog.messages_for(&declaration.bug_type).ok_or_else(|| {
                PluginError::MissingBugPatternMessage {
                    bug_type: declaration.bug_type.clone(),
                }
            })?;
            Ok(BugPattern {
                bug_type: declaration.bug_type.clone(),
                abbrev: declaration.abbrev.clone(),
                category: declaration.category.clone(),
                short_description: messages.short_description.clone(),
                long_description: messages.long_description.clone(),
                details: messages.details.clone(),
            })
        })
        .collect::<Result<Vec<_>, PluginError>>()?;

    Ok(PluginRegistry {
        location,
        catalog_file: catalog_file.to_string(),
        detector_factories,
        bug_patterns,
        bug_codes: catalog.bug_codes().to_vec(),
    })
}
