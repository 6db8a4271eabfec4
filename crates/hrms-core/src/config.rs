// ── Runtime service configuration ──
//
// Describes how to reach the backend and how the validator paces itself.
// Never touches disk: the CLI resolves a profile into a `ServiceConfig`
// and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use hrms_api::{TlsMode, TransportConfig};

use crate::validator::DEFAULT_DEBOUNCE;

/// Default API base (the backend mounts its routes under `/api`).
pub const DEFAULT_URL: &str = "http://localhost:8000/api/";

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store.
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed development backends).
    DangerAcceptInvalid,
}

/// Everything needed to build a [`Service`](crate::Service).
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// API base URL, e.g. `http://localhost:8000/api/`.
    pub url: Url,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Inactivity window before an identifier is checked.
    pub debounce: Duration,
}

impl ServiceConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    /// Transport settings for the HTTP client.
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: tls_to_transport(&self.tls),
            timeout: self.timeout,
        }
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_backend_conventions() {
        let cfg = ServiceConfig::new(DEFAULT_URL.parse().unwrap());
        assert_eq!(cfg.debounce, Duration::from_millis(800));
        assert_eq!(cfg.timeout, Duration::from_secs(30));
        assert_eq!(cfg.tls, TlsVerification::SystemDefaults);
    }

    #[test]
    fn transport_carries_tls_and_timeout() {
        let mut cfg = ServiceConfig::new(DEFAULT_URL.parse().unwrap());
        cfg.tls = TlsVerification::CustomCa("/etc/hrms/ca.pem".into());
        cfg.timeout = Duration::from_secs(5);

        let transport = cfg.transport();
        assert!(matches!(transport.tls, TlsMode::CustomCa(ref p) if p.ends_with("ca.pem")));
        assert_eq!(transport.timeout, Duration::from_secs(5));
    }
}
