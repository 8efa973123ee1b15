// SPDX-FileCopyrightText: 2026 Sleuth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sleuth - load an analysis-plugin bundle and report what it registers.
//!
//! This is the binary entry point. All loading happens in `sleuth-plugin`.

use clap::Parser;
use sleuth_config::SleuthConfig;
use sleuth_core::{BundleLocation, Locale};
use sleuth_plugin::{load_plugin, PluginRegistry};

/// Sleuth - load an analysis-plugin bundle and list its detectors and bug patterns.
#[derive(Parser, Debug)]
#[command(name = "sleuth", version, about, long_about = None)]
struct Cli {
    /// Bundle location: a directory path or a `file://` URL.
    bundle: String,
}

fn main() {
    let cli = Cli::parse();

    let config = match sleuth_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            sleuth_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level);

    let locale = resolve_locale(&config);
    tracing::debug!(%locale, "using catalog locale");

    // Load failures are reported but do not change the exit status.
    match BundleLocation::parse(&cli.bundle).and_then(|location| load_plugin(&location, &locale)) {
        Ok(registry) => print_registry(&registry),
        Err(err) => eprintln!("{:?}", miette::Report::new(err)),
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sleuth={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Configured locale, else the process locale, else the root locale.
fn resolve_locale(config: &SleuthConfig) -> Locale {
    if let Some(locale) = config.locale.to_locale() {
        return locale;
    }
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty())
        .map(|value| Locale::parse(&value))
        .unwrap_or_else(Locale::root)
}

fn print_registry(registry: &PluginRegistry) {
    println!(
        "loaded {}: {} detectors, {} bug patterns, {} bug codes (catalog {})",
        registry.location(),
        registry.detector_factories().len(),
        registry.bug_patterns().len(),
        registry.bug_codes().len(),
        registry.catalog_file()
    );
    for factory in registry.detector_factories() {
        println!(
            "  detector {} sha256:{}",
            factory.class_name,
            factory.entry_point.digest_hex()
        );
    }
    for pattern in registry.bug_patterns() {
        println!(
            "  pattern  {} [{}/{}] {}",
            pattern.bug_type, pattern.abbrev, pattern.category, pattern.short_description
        );
    }
    for code in registry.bug_codes() {
        println!("  code     {} {}", code.abbrev, code.description);
    }
}
