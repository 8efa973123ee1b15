// SPDX-FileCopyrightText: 2026 Sleuth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so typos are reported at
//! startup instead of being silently ignored.

use serde::{Deserialize, Serialize};
use sleuth_core::Locale;

/// Top-level Sleuth configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SleuthConfig {
    /// Locale used to pick plugin message catalogs.
    #[serde(default)]
    pub locale: LocaleConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Catalog locale. Unset fields fall back to the process environment at the CLI.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LocaleConfig {
    /// Language code, e.g. `de`.
    #[serde(default)]
    pub language: Option<String>,

    /// Country code, e.g. `DE`. Requires `language`.
    #[serde(default)]
    pub country: Option<String>,
}

impl LocaleConfig {
    /// The configured locale, if a language is set.
    pub fn to_locale(&self) -> Option<Locale> {
        let language = self.language.as_deref()?;
        Some(Locale::new(
            language,
            self.country.as_deref().unwrap_or_default(),
        ))
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
