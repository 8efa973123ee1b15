// SPDX-FileCopyrightText: 2026 Sleuth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Locale → message catalog file name fallback chain.

use sleuth_core::Locale;

/// Catalog file every bundle falls back to.
pub const DEFAULT_CATALOG: &str = "messages.xml";

/// Candidate catalog file names for `locale`, most specific first.
///
/// `messages_<lang>_<country>.xml` is only offered when the country is
/// non-empty; `messages_<lang>.xml` and `messages.xml` are always offered, in
/// that order.
pub fn catalog_candidates(locale: &Locale) -> Vec<String> {
    let language = locale.language();
    let country = locale.country();

    let mut candidates = Vec::with_capacity(3);
    if !country.is_empty() {
        candidates.push(format!("messages_{language}_{country}.xml"));
    }
    candidates.push(format!("messages_{language}.xml"));
    candidates.push(DEFAULT_CATALOG.to_string());
    candidates
}
