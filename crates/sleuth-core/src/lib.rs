// SPDX-FileCopyrightText: 2026 Sleuth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Sleuth analysis-plugin loader.
//!
//! This crate provides the error taxonomy and the value types shared by the
//! loader, the configuration layer and the CLI. Everything here is plain data;
//! resource resolution and code loading live in `sleuth-plugin`.

pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PluginError;
pub use types::{BugCode, BugPattern, BundleLocation, Locale, MessageField};
