//! Process configuration, read once at startup from `SNIPBIN_*` environment variables.

use std::time::Duration;

use snipbin_core::IdPolicy;
use snipbin_observability::LogFormat;
use thiserror::Error;

const PREFIX: &str = "SNIPBIN_";

/// How new document identifiers are generated.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum IdKind {
    /// Random ASCII alphanumerics.
    #[default]
    Key,
    /// Alternating consonants and vowels, easier to read aloud.
    Phonetic,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

/// Immutable application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Exact length of generated (and accepted) identifiers.
    pub id_length: usize,
    pub id_kind: IdKind,
    /// Maximum document length in characters; also the request body bound in megabytes.
    pub max_size: usize,
    /// Identifiers exempt from the length rule.
    pub documents: Vec<String>,
    /// HTML snippet embedded verbatim into rendered pages.
    pub analytics: String,
    /// Serve only the JSON and raw routes.
    pub headless: bool,
    pub content_security_policy: Option<String>,
    /// Postgres connection string. `None` selects the in-memory store.
    pub connection_uri: Option<String>,
    pub store_timeout: Duration,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 9000,
            id_length: 8,
            id_kind: IdKind::Key,
            max_size: 400_000,
            documents: Vec::new(),
            analytics: String::new(),
            headless: false,
            content_security_policy: None,
            connection_uri: None,
            store_timeout: Duration::from_millis(5000),
            log_format: LogFormat::Json,
        }
    }
}

impl AppConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary lookup (keys include the `SNIPBIN_` prefix).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(&format!("{PREFIX}{name}"))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut cfg = Self::default();

        if let Some(v) = get("HOST") {
            cfg.host = v;
        }
        if let Some(v) = get("PORT") {
            cfg.port = parse("PORT", &v)?;
        }
        if let Some(v) = get("ID_LENGTH") {
            cfg.id_length = parse("ID_LENGTH", &v)?;
        }
        if let Some(v) = get("ID_TYPE") {
            cfg.id_kind = match v.to_ascii_lowercase().as_str() {
                "key" => IdKind::Key,
                "phrase" | "phonetic" => IdKind::Phonetic,
                _ => return Err(invalid("ID_TYPE", &v, "expected key or phrase")),
            };
        }
        if let Some(v) = get("MAX_SIZE") {
            cfg.max_size = parse("MAX_SIZE", &v)?;
        }
        if let Some(v) = get("DOCUMENTS") {
            cfg.documents = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(v) = lookup(&format!("{PREFIX}ANALYTICS")) {
            cfg.analytics = v;
        }
        if let Some(v) = get("HEADLESS") {
            cfg.headless = parse("HEADLESS", &v)?;
        }
        cfg.content_security_policy = get("CSP");
        cfg.connection_uri = get("CONNECTION_URI");
        if let Some(v) = get("STORE_TIMEOUT_MS") {
            cfg.store_timeout = Duration::from_millis(parse("STORE_TIMEOUT_MS", &v)?);
        }
        if let Some(v) = get("LOG_FORMAT") {
            cfg.log_format = match v.to_ascii_lowercase().as_str() {
                "json" => LogFormat::Json,
                "pretty" => LogFormat::Pretty,
                _ => return Err(invalid("LOG_FORMAT", &v, "expected json or pretty")),
            };
        }

        cfg.check()?;
        Ok(cfg)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.id_length == 0 {
            return Err(invalid("ID_LENGTH", "0", "must be at least 1"));
        }
        if self.max_size < 2 {
            return Err(invalid("MAX_SIZE", &self.max_size.to_string(), "must be at least 2"));
        }
        Ok(())
    }

    /// Identifier acceptance rules derived from `id_length` and `documents`.
    pub fn id_policy(&self) -> IdPolicy {
        IdPolicy::new(self.id_length, self.documents.iter().cloned())
    }

    /// Upper bound on buffered request bodies, in bytes (`max_size` megabytes).
    pub fn max_body_bytes(&self) -> usize {
        self.max_size.saturating_mul(1024 * 1024)
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e: T::Err| invalid(name, value, &e.to_string()))
}

fn invalid(name: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key: format!("{PREFIX}{name}"),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
