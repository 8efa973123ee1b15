// SPDX-FileCopyrightText: 2026 Sleuth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Analysis-plugin bundle loader.
//!
//! Turns a plugin bundle (a directory or zip archive holding a
//! `findbugs.xml` descriptor, localized `messages*.xml` catalogs and detector
//! modules) into a validated [`PluginRegistry`]. Loading either yields the
//! full registry or fails with a [`sleuth_core::PluginError`]; there is no
//! partial result.

pub mod bundle;
pub mod catalog;
pub mod descriptor;
pub mod loader;
pub mod locale;
pub mod namespace;
pub mod registry;
pub mod resources;
pub mod xml;

pub use bundle::{PluginBundle, DESCRIPTOR_FILE};
pub use catalog::{parse_catalog, BugPatternMessages, MessageCatalog};
pub use descriptor::{parse_descriptor, BugPatternDeclaration, DetectorDeclaration, PluginDescriptor};
pub use loader::{load_bundle, load_plugin};
pub use locale::{catalog_candidates, DEFAULT_CATALOG};
pub use namespace::{DetectorEntryPoint, DetectorFactory, ModuleNamespace, NamespaceError, WasmNamespace};
pub use registry::{build_registry, PluginRegistry};
pub use resources::BundleResources;
