//! Configuration for the hrms CLI.
//!
//! TOML profiles at the platform config path, layered with `HRMS_`
//! environment overrides, and translated into `hrms_core::ServiceConfig`.
//! The CLI adds flag-aware wrappers on top.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use hrms_core::{DEFAULT_URL, ServiceConfig, TlsVerification};

/// Overrides the config file location when set.
pub const CONFIG_PATH_ENV: &str = "HRMS_CONFIG";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Name of the profile to use: explicit choice, else the configured
    /// default, else `"default"`.
    pub fn active_profile_name(&self, requested: Option<&str>) -> String {
        requested
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }

    /// Look up a profile. The implicit `"default"` profile always exists.
    pub fn profile(&self, name: &str) -> Result<Profile, ConfigError> {
        match self.profiles.get(name) {
            Some(p) => Ok(p.clone()),
            None if name == "default" => Ok(Profile::default()),
            None => Err(ConfigError::UnknownProfile { name: name.into() }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Identifier check debounce in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_debounce_ms() -> u64 {
    800
}

/// A named backend profile. Unset fields fall back to [`Defaults`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// API base URL (e.g. "http://localhost:8000/api/").
    #[serde(default = "default_url")]
    pub url: String,

    /// Path to a custom CA certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debounce_ms: Option<u64>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            url: default_url(),
            ca_cert: None,
            insecure: None,
            timeout: None,
            debounce_ms: None,
        }
    }
}

fn default_url() -> String {
    DEFAULT_URL.into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `$HRMS_CONFIG`, else platform conventions.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("com", "hrms", "hrms").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("hrms");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file, then apply `HRMS_` environment overrides
/// (nested keys use `__`, e.g. `HRMS_DEFAULTS__TIMEOUT=5`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("HRMS_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if it can't be read.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

/// Build a `ServiceConfig` from a profile, falling back to `defaults`.
pub fn profile_to_service_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<ServiceConfig, ConfigError> {
    let url: url::Url = profile.url.parse().map_err(|_| ConfigError::Validation {
        field: "url".into(),
        reason: format!("invalid URL: {}", profile.url),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "url".into(),
            reason: format!("expected http or https, got '{}'", url.scheme()),
        });
    }

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let mut config = ServiceConfig::new(url);
    config.tls = tls;
    config.timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));
    config.debounce = Duration::from_millis(profile.debounce_ms.unwrap_or(defaults.debounce_ms));
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE: &str = r#"
default_profile = "staging"

[defaults]
timeout = 10

[profiles.staging]
url = "https://hrms.internal.example/api/"
debounce_ms = 300

[profiles.local]
url = "http://localhost:8000/api/"
insecure = true
"#;

    fn load(contents: &str) -> Config {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        load_config_from(&path).unwrap()
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert_eq!(cfg.defaults.debounce_ms, 800);
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn profiles_and_defaults_are_read() {
        let cfg = load(SAMPLE);
        assert_eq!(cfg.active_profile_name(None), "staging");
        assert_eq!(cfg.active_profile_name(Some("local")), "local");
        assert_eq!(cfg.defaults.timeout, 10);
        assert_eq!(cfg.defaults.output, "table");
        assert_eq!(cfg.profiles.len(), 2);
    }

    #[test]
    fn profile_fields_override_defaults() {
        let cfg = load(SAMPLE);
        let staging = cfg.profile("staging").unwrap();
        let svc = profile_to_service_config(&staging, &cfg.defaults).unwrap();
        assert_eq!(svc.url.as_str(), "https://hrms.internal.example/api/");
        assert_eq!(svc.timeout, Duration::from_secs(10));
        assert_eq!(svc.debounce, Duration::from_millis(300));
        assert_eq!(svc.tls, TlsVerification::SystemDefaults);

        let local = cfg.profile("local").unwrap();
        let svc = profile_to_service_config(&local, &cfg.defaults).unwrap();
        assert_eq!(svc.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(svc.debounce, Duration::from_millis(800));
    }

    #[test]
    fn implicit_default_profile_points_at_localhost() {
        let cfg = Config::default();
        let p = cfg.profile("default").unwrap();
        assert_eq!(p.url, DEFAULT_URL);
        assert!(matches!(
            cfg.profile("prod"),
            Err(ConfigError::UnknownProfile { ref name }) if name == "prod"
        ));
    }

    #[test]
    fn bad_url_is_a_validation_error() {
        let profile = Profile {
            url: "ftp://example.com".into(),
            ..Profile::default()
        };
        let err = profile_to_service_config(&profile, &Defaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "url"));
    }

    #[test]
    fn save_then_load_preserves_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                ca_cert: Some("/etc/ssl/hrms.pem".into()),
                ..Profile::default()
            },
        );
        save_config_to(&cfg, &path).unwrap();

        assert_eq!(load_config_from(&path).unwrap(), cfg);
    }
}
