// SPDX-FileCopyrightText: 2026 Sleuth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Descriptor and catalog lookup inside a single plugin bundle.

use sleuth_core::{BundleLocation, Locale, PluginError};
use tracing::debug;

use crate::locale::catalog_candidates;
use crate::resources::BundleResources;

/// Fixed name of the structural descriptor.
pub const DESCRIPTOR_FILE: &str = "findbugs.xml";

/// A catalog document picked by the locale fallback chain.
#[derive(Debug, Clone)]
pub struct ResolvedCatalog {
    /// File name that resolved, e.g. `messages_de.xml`.
    pub file: String,
    /// Raw bytes; decoding follows the document's XML declaration.
    pub content: Vec<u8>,
}

/// Read-only view of one bundle's documents.
#[derive(Debug)]
pub struct PluginBundle {
    location: BundleLocation,
    resources: BundleResources,
}

impl PluginBundle {
    /// Open the directory or archive at `location`.
    pub fn open(location: BundleLocation) -> Result<Self, PluginError> {
        let resources = BundleResources::open(&location)?;
        Ok(Self {
            location,
            resources,
        })
    }

    pub fn location(&self) -> &BundleLocation {
        &self.location
    }

    /// Contents of `findbugs.xml`.
    pub fn read_descriptor(&mut self) -> Result<Vec<u8>, PluginError> {
        let content = self
            .resources
            .read(DESCRIPTOR_FILE)
            .map_err(|e| PluginError::MalformedDescriptor {
                location: self.location.clone(),
                source: Box::new(e),
            })?;

        content.ok_or_else(|| PluginError::MissingDescriptor {
            location: self.location.clone(),
        })
    }

    /// Contents of the most specific catalog available for `locale`.
    pub fn read_catalog(&mut self, locale: &Locale) -> Result<ResolvedCatalog, PluginError> {
        let candidates = catalog_candidates(locale);

        for candidate in &candidates {
            let content =
                self.resources
                    .read(candidate)
                    .map_err(|e| PluginError::MalformedCatalog {
                        file: candidate.clone(),
                        source: Box::new(e),
                    })?;
            let Some(content) = content else {
                debug!(bundle = %self.location, file = %candidate, "catalog candidate not present");
                continue;
            };

            debug!(bundle = %self.location, file = %candidate, %locale, "resolved message catalog");
            return Ok(ResolvedCatalog {
                file: candidate.clone(),
                content,
            });
        }

        Err(PluginError::MissingMessageCatalog {
            location: self.location.clone(),
            attempted: candidates,
        })
    }
}
