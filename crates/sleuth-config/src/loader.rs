// SPDX-FileCopyrightText: 2026 Sleuth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./sleuth.toml` > `~/.config/sleuth/sleuth.toml` > `/etc/sleuth/sleuth.toml`
//! with environment variable overrides via `SLEUTH_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::SleuthConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG: &str = "/etc/sleuth/sleuth.toml";

/// Configuration file looked up in the working directory.
pub const LOCAL_CONFIG: &str = "sleuth.toml";

/// Per-user configuration file under the XDG config directory.
pub fn user_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("sleuth/sleuth.toml"))
        .unwrap_or_default()
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/sleuth/sleuth.toml`
/// 3. `~/.config/sleuth/sleuth.toml`
/// 4. `./sleuth.toml`
/// 5. `SLEUTH_*` environment variables
pub fn load_config() -> Result<SleuthConfig, figment::Error> {
    build_figment().extract()
}

/// The full provider stack, before extraction.
fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(SleuthConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

/// `SLEUTH_<SECTION>_<KEY>` → `<section>.<key>`.
///
/// Uses an explicit section map rather than `Env::split("_")` so keys that
/// contain underscores stay intact.
fn env_provider() -> Env {
    Env::prefixed("SLEUTH_").map(|key| {
        let mapped = key
            .as_str()
            .replacen("locale_", "locale.", 1)
            .replacen("logging_", "logging.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_local_file() {
        figment::Jail::expect_with(|jail| {
            let xdg_dir = jail.directory().display().to_string();
            jail.set_env("XDG_CONFIG_HOME", xdg_dir);
            jail.create_file(
                LOCAL_CONFIG,
                r#"
[locale]
language = "fr"

[logging]
level = "warn"
"#,
            )?;
            jail.set_env("SLEUTH_LOGGING_LEVEL", "debug");
            jail.set_env("SLEUTH_LOCALE_COUNTRY", "CA");

            let config = load_config()?;
            assert_eq!(config.logging.level, "debug");
            assert_eq!(config.locale.language.as_deref(), Some("fr"));
            assert_eq!(config.locale.country.as_deref(), Some("CA"));
            Ok(())
        });
    }

    // `dirs` only honors XDG_CONFIG_HOME on Linux.
    #[cfg(target_os = "linux")]
    #[test]
    fn local_file_overrides_user_file() {
        figment::Jail::expect_with(|jail| {
            let xdg_dir = jail.directory().display().to_string();
            jail.set_env("XDG_CONFIG_HOME", xdg_dir);
            std::fs::create_dir_all(jail.directory().join("sleuth")).unwrap();
            jail.create_file(
                "sleuth/sleuth.toml",
                "[locale]\nlanguage = \"de\"\ncountry = \"AT\"\n",
            )?;
            jail.create_file(LOCAL_CONFIG, "[locale]\nlanguage = \"it\"\n")?;

            let config = load_config()?;
            assert_eq!(config.locale.language.as_deref(), Some("it"));
            assert_eq!(config.locale.country.as_deref(), Some("AT"));
            Ok(())
        });
    }
}
