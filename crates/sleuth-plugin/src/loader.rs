// SPDX-FileCopyrightText: 2026 Sleuth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Top-level bundle loading.
//!
//! A load is a synchronous pipeline: resolve and parse the catalog, parse the
//! descriptor, then build the registry through the bundle's own namespace.
//! Loads share no state, so independent bundles can be loaded from separate
//! threads.

use sleuth_core::{BundleLocation, Locale, PluginError};
use tracing::info;

use crate::bundle::PluginBundle;
use crate::catalog::parse_catalog;
use crate::descriptor::parse_descriptor;
use crate::namespace::{ModuleNamespace, WasmNamespace};
use crate::registry::{build_registry, PluginRegistry};

/// Load the bundle at `location`, picking the catalog for `locale`.
///
/// The location may be a directory or a zip archive. A fresh
/// [`WasmNamespace`] is created for this call only.
pub fn load_plugin(location: &BundleLocation, locale: &Locale) -> Result<PluginRegistry, PluginError> {
    let mut bundle = PluginBundle::open(location.clone())?;
    let mut namespace = WasmNamespace::open(location.clone())?;
    load_bundle(&mut bundle, locale, &mut namespace)
}

/// Load `bundle` resolving detector code through `namespace`.
///
/// `namespace` must belong to the same bundle.
pub fn load_bundle(
    bundle: &mut PluginBundle,
    locale: &Locale,
    namespace: &mut dyn ModuleNamespace,
) -> Result<PluginRegistry, PluginError> {
    let catalog_doc = bundle.read_catalog(locale)?;
    let catalog = parse_catalog(&catalog_doc.file, &catalog_doc.content)?;

    let descriptor_doc = bundle.read_descriptor()?;
    let descriptor =
        parse_descriptor(&descriptor_doc).map_err(|e| PluginError::MalformedDescriptor {
            location: bundle.location().clone(),
            source: Box::new(e),
        })?;

    let registry = build_registry(&descriptor, &catalog, &catalog_doc.file, namespace)?;

    info!(
        bundle = %bundle.location(),
        %locale,
        catalog = %catalog_doc.file,
        detectors = registry.detector_factories().len(),
        bug_patterns = registry.bug_patterns().len(),
        bug_codes = registry.bug_codes().len(),
        "plugin bundle loaded"
    );
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn write_bundle(dir: &std::path::Path) {
        std::fs::write(
            dir.join("findbugs.xml"),
            r#"<FindbugsPlugin>
  <Detector class="A" disabled="false"/>
  <Detector class="B" disabled="true"/>
</FindbugsPlugin>"#,
        )
        .unwrap();
        std::fs::write(dir.join("messages.xml"), "<MessageCollection/>").unwrap();
        std::fs::write(dir.join("A.wat"), r#"(module (func (export "run")))"#).unwrap();
    }

    #[traced_test]
    #[test]
    fn logs_skips_and_summary() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path());

        let registry = load_plugin(&BundleLocation::from_path(dir.path()), &Locale::root()).unwrap();
        assert_eq!(registry.detector_factories().len(), 1);

        assert!(logs_contain("skipping disabled detector"));
        assert!(logs_contain("resolved message catalog"));
        assert!(logs_contain("plugin bundle loaded"));
    }

    #[test]
    fn catalog_is_resolved_before_descriptor() {
        // Neither document exists; the catalog failure wins.
        let dir = tempfile::tempdir().unwrap();
        let err = load_plugin(&BundleLocation::from_path(dir.path()), &Locale::root()).unwrap_err();
        assert!(
            matches!(err, PluginError::MissingMessageCatalog { .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn malformed_descriptor_wraps_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("messages.xml"), "<MessageCollection/>").unwrap();
        std::fs::write(dir.path().join("findbugs.xml"), "<FindbugsPlugin><Detector").unwrap();

        let err = load_plugin(&BundleLocation::from_path(dir.path()), &Locale::root()).unwrap_err();
        match err {
            PluginError::MalformedDescriptor { source, .. } => {
                assert!(source.downcast_ref::<crate::xml::XmlError>().is_some());
            }
            other => panic!("expected MalformedDescriptor, got {other:?}"),
        }
    }
}
