//! CLI configuration: thin wrapper around `hrms_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (`--url`, `--timeout`, `--insecure`).

use hrms_core::ServiceConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use hrms_config::{Config, Defaults, Profile, config_path, load_config_or_default, save_config};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Comma-separated profile names for help text.
pub fn available_profiles(config: &Config) -> String {
    if config.profiles.is_empty() {
        "(none)".into()
    } else {
        config.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Build a `ServiceConfig` from the config file, profile, and CLI overrides.
///
/// CLI flag overrides take priority over profile values. An unknown
/// profile is an error unless `--url` supplies everything needed.
pub fn resolve_service_config(global: &GlobalOpts) -> Result<ServiceConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let mut profile = match cfg.profile(&profile_name) {
        Ok(p) => p,
        Err(_) if global.url.is_some() => Profile::default(),
        Err(_) => {
            return Err(CliError::ProfileNotFound {
                available: available_profiles(&cfg),
                name: profile_name,
            });
        }
    };

    if let Some(ref url) = global.url {
        profile.url.clone_from(url);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }

    Ok(hrms_config::profile_to_service_config(&profile, &cfg.defaults)?)
}
