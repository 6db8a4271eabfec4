//! Config subcommand handlers.

use std::collections::BTreeMap;

use dialoguer::Input;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Defaults, Profile};
use crate::error::CliError;
use crate::output;

use super::util::{is_interactive, prompt_err};

const VALID_KEYS: &str = "url, timeout, insecure, ca_cert, debounce_ms";

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config as TOML-style text for the table view.
fn format_config(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);
    let _ = writeln!(out, "debounce_ms = {}", cfg.defaults.debounce_ms);

    for (name, p) in &cfg.profiles {
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "url = \"{}\"", p.url);
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
        if let Some(debounce) = p.debounce_ms {
            let _ = writeln!(out, "debounce_ms = {debounce}");
        }
    }

    out.trim_end().to_owned()
}

fn save(cfg: &Config) -> Result<std::path::PathBuf, CliError> {
    Ok(config::save_config(cfg)?)
}

fn parse_number(field: &str, value: &str, unit: &str) -> Result<u64, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("must be a number ({unit})"),
    })
}

/// Apply one `key = value` assignment to a profile.
fn set_key(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "url" => {
            if !is_backend_url(&value) {
                return Err(CliError::Validation {
                    field: "url".into(),
                    reason: format!("'{value}' is not an http(s) URL"),
                });
            }
            profile.url = value;
        }
        "insecure" => {
            profile.insecure = Some(value.parse().map_err(|_| CliError::Validation {
                field: "insecure".into(),
                reason: "must be 'true' or 'false'".into(),
            })?);
        }
        "timeout" => profile.timeout = Some(parse_number("timeout", &value, "seconds")?),
        "debounce_ms" | "debounce-ms" => {
            profile.debounce_ms = Some(parse_number("debounce_ms", &value, "milliseconds")?);
        }
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!("unknown config key '{other}'. Valid keys: {VALID_KEYS}"),
            });
        }
    }
    Ok(())
}

/// `true` for an absolute http(s) URL a profile can point at.
fn is_backend_url(value: &str) -> bool {
    let candidate = Profile {
        url: value.to_owned(),
        ..Profile::default()
    };
    hrms_config::profile_to_service_config(&candidate, &Defaults::default()).is_ok()
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: guided setup ──────────────────────────────────────
        ConfigCommand::Init => {
            if !is_interactive() {
                return Err(CliError::Validation {
                    field: "interactive".into(),
                    reason: "config init needs a terminal; use `hrms config set` instead".into(),
                });
            }

            let config_path = config::config_path();
            eprintln!("HRMS CLI configuration");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let url: String = Input::new()
                .with_prompt("API base URL")
                .default(hrms_core::DEFAULT_URL.into())
                .validate_with(|v: &String| {
                    if is_backend_url(v) {
                        Ok(())
                    } else {
                        Err("expected an http(s) URL")
                    }
                })
                .interact_text()
                .map_err(prompt_err)?;

            let defaults = Defaults::default();
            let timeout: u64 = Input::new()
                .with_prompt("Request timeout (seconds)")
                .default(defaults.timeout)
                .interact_text()
                .map_err(prompt_err)?;

            let debounce_ms: u64 = Input::new()
                .with_prompt("Employee ID check delay (milliseconds)")
                .default(defaults.debounce_ms)
                .interact_text()
                .map_err(prompt_err)?;

            let profile = Profile {
                url,
                timeout: (timeout != defaults.timeout).then_some(timeout),
                debounce_ms: (debounce_ms != defaults.debounce_ms).then_some(debounce_ms),
                ..Profile::default()
            };

            let cfg = Config {
                default_profile: Some(profile_name.clone()),
                defaults,
                profiles: BTreeMap::from([(profile_name.clone(), profile)]),
            };

            let written = save(&cfg)?;
            eprintln!("\nConfiguration written to {}", written.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: hrms health");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let out = output::render_single(&global.output, &cfg, format_config, |_| {
                "config".into()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);

            let profile = cfg.profiles.entry(profile_name.clone()).or_default();
            set_key(profile, &key, value)?;

            save(&cfg)?;
            if !global.quiet {
                eprintln!("Set {key} on profile '{profile_name}'");
            }
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: hrms config init");
            } else {
                for name in cfg.profiles.keys() {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();

            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name,
                });
            }

            cfg.default_profile = Some(name.clone());
            save(&cfg)?;
            if !global.quiet {
                eprintln!("Default profile set to '{name}'");
            }
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }
    }
}
