// SPDX-FileCopyrightText: 2026 Sleuth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Sleuth integration tests.
//!
//! [`BundleBuilder`] writes a complete plugin bundle (descriptor, catalogs and
//! detector modules) into a temporary directory, or packs it into a jar, so
//! tests can exercise the real loader without checked-in fixtures.

pub mod bundle;

pub use bundle::{BundleBuilder, TestBundle, DETECTOR_MODULE};
