// SPDX-FileCopyrightText: 2026 Sleuth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-bundle detector code namespaces.
//!
//! Detector implementations ship inside the bundle as WebAssembly modules laid
//! out like a class path: `pkg.sub.Name` lives at `pkg/sub/Name.wasm` (or the
//! text form `Name.wat`), in a bundle directory or inside a bundle archive.
//! Each bundle is given its own [`WasmNamespace`] with a private [`Engine`],
//! resource handle and module cache, so a name defined by one bundle can never
//! resolve while loading another.
//!
//! Modules are only compiled and checked for the `run` entry point here; they
//! are not instantiated.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use sleuth_core::{BundleLocation, PluginError};
use thiserror::Error;
use tracing::debug;
use wasmtime::{Engine, ExternType, Module};

use crate::resources::BundleResources;

/// Export every detector module must provide.
pub const ENTRY_POINT: &str = "run";

/// Why a detector could not be loaded from its namespace.
#[derive(Debug, Error)]
pub enum NamespaceError {
    #[error("`{0}` is not a valid qualified detector name")]
    InvalidName(String),

    #[error("no module for `{class_name}` (looked for {})", .searched.join(", "))]
    NotFound {
        class_name: String,
        searched: Vec<String>,
    },

    #[error("failed to read module {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to compile module {path}: {message}")]
    Compile { path: String, message: String },

    #[error("module {path} does not export a `run` function")]
    MissingEntryPoint { path: String },
}

/// Opaque handle to a loaded detector implementation.
///
/// Two handles compare equal when they were compiled from identical bytes.
#[derive(Clone)]
pub struct DetectorEntryPoint {
    module: Module,
    digest: [u8; 32],
    source_path: PathBuf,
}

impl DetectorEntryPoint {
    /// The compiled module, ready for an analysis driver to instantiate.
    pub fn module(&self) -> &Module {
        &self.module
    }

    /// SHA-256 of the module bytes, hex encoded.
    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest)
    }

    /// Where the module was read from: the bundle root joined with the
    /// module's resource name. For archives this points inside the archive.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }
}

impl PartialEq for DetectorEntryPoint {
    fn eq(&self, other: &Self) -> bool {
        self.digest == other.digest
    }
}

impl Eq for DetectorEntryPoint {}

impl fmt::Debug for DetectorEntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetectorEntryPoint")
            .field("source_path", &self.source_path)
            .field("digest", &self.digest_hex())
            .finish()
    }
}

/// A loaded, enabled detector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorFactory {
    /// Qualified name from the descriptor.
    pub class_name: String,
    pub entry_point: DetectorEntryPoint,
}

/// Resolves qualified detector names to loaded code for exactly one bundle.
///
/// Implementations must not share resolution state between bundles.
pub trait ModuleNamespace {
    /// The bundle this namespace resolves against.
    fn location(&self) -> &BundleLocation;

    /// Resolve and load the detector named `class_name`.
    fn load_detector(&mut self, class_name: &str) -> Result<DetectorEntryPoint, NamespaceError>;
}

/// WebAssembly-backed namespace owning a private engine.
pub struct WasmNamespace {
    location: BundleLocation,
    resources: BundleResources,
    engine: Engine,
    loaded: HashMap<String, DetectorEntryPoint>,
}

impl WasmNamespace {
    /// Open a namespace over the directory or archive at `location`.
    pub fn open(location: BundleLocation) -> Result<Self, PluginError> {
        let resources = BundleResources::open(&location)?;
        Ok(Self {
            location,
            resources,
            engine: Engine::default(),
            loaded: HashMap::new(),
        })
    }

    /// Resource names to try for `class_name`, binary form first.
    fn candidate_resources(class_name: &str) -> Result<[String; 2], NamespaceError> {
        let segments: Vec<&str> = class_name.split('.').collect();
        if !segments.iter().all(|s| is_valid_segment(s)) {
            return Err(NamespaceError::InvalidName(class_name.to_string()));
        }

        let base = segments.join("/");
        Ok([format!("{base}.wasm"), format!("{base}.wat")])
    }
}

impl ModuleNamespace for WasmNamespace {
    fn location(&self) -> &BundleLocation {
        &self.location
    }

    fn load_detector(&mut self, class_name: &str) -> Result<DetectorEntryPoint, NamespaceError> {
        if let Some(entry_point) = self.loaded.get(class_name) {
            return Ok(entry_point.clone());
        }

        let candidates = Self::candidate_resources(class_name)?;
        let mut found = None;
        for resource in &candidates {
            let bytes = self
                .resources
                .read(resource)
                .map_err(|source| NamespaceError::Read {
                    path: resource.clone(),
                    source,
                })?;
            if let Some(bytes) = bytes {
                found = Some((resource, bytes));
                break;
            }
        }
        let (resource, bytes) = found.ok_or_else(|| NamespaceError::NotFound {
            class_name: class_name.to_string(),
            searched: candidates.to_vec(),
        })?;

        let module = Module::new(&self.engine, &bytes).map_err(|e| NamespaceError::Compile {
            path: resource.clone(),
            message: e.to_string(),
        })?;

        let has_entry_point = module
            .exports()
            .any(|export| export.name() == ENTRY_POINT && matches!(export.ty(), ExternType::Func(_)));
        if !has_entry_point {
            return Err(NamespaceError::MissingEntryPoint {
                path: resource.clone(),
            });
        }

        let entry_point = DetectorEntryPoint {
            module,
            digest: Sha256::digest(&bytes).into(),
            source_path: self.location.root().join(resource),
        };
        debug!(
            bundle = %self.location,
            detector = %class_name,
            digest = %entry_point.digest_hex(),
            "loaded detector module"
        );
        self.loaded
            .insert(class_name.to_string(), entry_point.clone());
        Ok(entry_point)
    }
}

/// A package or type name segment. Rejects anything that could leave the bundle root.
fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '-'))
}
