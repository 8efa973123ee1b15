// SPDX-FileCopyrightText: 2026 Sleuth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Value types shared across the loader, configuration and CLI.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use strum::Display;
use url::Url;

use crate::error::PluginError;

/// A named category of finding, merged from the descriptor and the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugPattern {
    /// Unique machine key, e.g. `NP_NULL_ON_SOME_PATH`.
    pub bug_type: String,
    /// Abbreviation shared with a [`BugCode`], e.g. `NP`.
    pub abbrev: String,
    /// Category name, e.g. `CORRECTNESS`.
    pub category: String,
    pub short_description: String,
    pub long_description: String,
    /// Free-form (usually HTML) explanation.
    pub details: String,
}

/// A short classification code with its description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugCode {
    pub abbrev: String,
    pub description: String,
}

/// The three descriptive children every catalog `BugPattern` must carry.
///
/// `Display` yields the element name as it appears in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum MessageField {
    ShortDescription,
    LongDescription,
    Details,
}

impl MessageField {
    /// All fields in the order they are validated.
    pub const ALL: [MessageField; 3] = [
        MessageField::ShortDescription,
        MessageField::LongDescription,
        MessageField::Details,
    ];
}

/// Language and country used to pick a message catalog.
///
/// Either part may be empty. The loader never consults process-wide locale
/// state; callers construct this explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    country: String,
}

impl Locale {
    /// Build a locale from codes exactly as given.
    pub fn new(language: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            country: country.into(),
        }
    }

    /// The root locale: empty language and country.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    /// Parse a POSIX or BCP-47 style tag such as `de_DE.UTF-8`, `pt-BR` or `fr`.
    ///
    /// Encoding and modifier suffixes are dropped, the language is lowercased
    /// and the country uppercased. `C`, `POSIX` and empty input map to the root
    /// locale. Script subtags (`zh-Hans-CN`) are skipped when looking for the
    /// country.
    pub fn parse(tag: &str) -> Self {
        let tag = tag.trim();
        let tag = tag.split(['.', '@']).next().unwrap_or("");
        if tag.is_empty() || tag == "C" || tag == "POSIX" {
            return Self::root();
        }

        let mut parts = tag.split(['_', '-']);
        let language = parts.next().unwrap_or("").to_ascii_lowercase();
        let country = parts
            .find(|p| {
                (p.len() == 2 && p.chars().all(|c| c.is_ascii_alphabetic()))
                    || (p.len() == 3 && p.chars().all(|c| c.is_ascii_digit()))
            })
            .map(|p| p.to_ascii_uppercase())
            .unwrap_or_default();

        Self { language, country }
    }

    /// True when both language and country are empty.
    pub fn is_root(&self) -> bool {
        self.language.is_empty() && self.country.is_empty()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.language.is_empty(), self.country.is_empty()) {
            (true, true) => write!(f, "root"),
            (_, true) => write!(f, "{}", self.language),
            _ => write!(f, "{}_{}", self.language, self.country),
        }
    }
}

/// Where a plugin bundle lives.
///
/// A bundle is a directory or a zip archive (`.jar`, `.zip`); the location
/// is accepted either as a plain path or as a `file://` URL. The original
/// input is kept for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BundleLocation {
    root: PathBuf,
    input: String,
}

impl BundleLocation {
    /// Use a filesystem path directly.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let root = path.into();
        let input = root.display().to_string();
        Self { root, input }
    }

    /// Parse a path or `file://` URL.
    pub fn parse(input: &str) -> Result<Self, PluginError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PluginError::InvalidLocation {
                input: input.to_string(),
                reason: "location must not be empty".to_string(),
            });
        }

        if !trimmed.contains("://") && !trimmed.starts_with("file:") {
            return Ok(Self {
                root: PathBuf::from(trimmed),
                input: trimmed.to_string(),
            });
        }

        let url = Url::parse(trimmed).map_err(|e| PluginError::InvalidLocation {
            input: input.to_string(),
            reason: e.to_string(),
        })?;

        if url.scheme() != "file" {
            return Err(PluginError::InvalidLocation {
                input: input.to_string(),
                reason: format!("unsupported URL scheme `{}`", url.scheme()),
            });
        }

        let root = url.to_file_path().map_err(|()| PluginError::InvalidLocation {
            input: input.to_string(),
            reason: "URL does not name a local path".to_string(),
        })?;

        Ok(Self {
            root,
            input: trimmed.to_string(),
        })
    }

    /// Local directory or archive file the bundle's resources are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FromStr for BundleLocation {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BundleLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.input)
    }
}
