// SPDX-FileCopyrightText: 2026 Sleuth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::SleuthConfig;

/// Levels accepted by `logging.level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every problem instead of stopping at the first one.
pub fn validate_config(config: &SleuthConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.logging.level.trim();
    if !LOG_LEVELS.contains(&level) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{level}` is not one of {}",
                LOG_LEVELS.join(", ")
            ),
        });
    }

    let language = config.locale.language.as_deref().map(str::trim);
    let country = config.locale.country.as_deref().map(str::trim);

    if language == Some("") {
        errors.push(ConfigError::Validation {
            message: "locale.language must not be empty when set".to_string(),
        });
    }

    if country.is_some_and(|c| !c.is_empty()) && language.is_none() {
        errors.push(ConfigError::Validation {
            message: "locale.country requires locale.language".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LocaleConfig;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&SleuthConfig::default()).is_ok());
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let mut config = SleuthConfig::default();
        config.logging.level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("verbose"));
    }

    #[test]
    fn country_without_language_is_rejected() {
        let config = SleuthConfig {
            locale: LocaleConfig {
                language: None,
                country: Some("DE".to_string()),
            },
            ..SleuthConfig::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("locale.country"));
    }

    #[test]
    fn parsed_locale_with_country_is_valid() {
        let toml_str = r#"
[locale]
language = "de"
country = "AT"
"#;
        let config: SleuthConfig = toml::from_str(toml_str).unwrap();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn parsed_country_alone_is_rejected() {
        let config: SleuthConfig = toml::from_str("[locale]\ncountry = \"AT\"\n").unwrap();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn collects_all_errors() {
        let config = SleuthConfig {
            locale: LocaleConfig {
                language: Some(" ".to_string()),
                country: None,
            },
            logging: crate::model::LoggingConfig {
                level: "loud".to_string(),
            },
        };
        assert_eq!(validate_config(&config).unwrap_err().len(), 2);
    }
}
