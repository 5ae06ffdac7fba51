//! Configuration resolution for mtt-web
//!
//! Every setting is resolved with the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file (`--config`)
//! 4. Built-in default
//!
//! Clap merges tiers 1 and 2 before values reach [`ServiceConfig::resolve`].
//! SMTP settings have no command-line form and are read from the
//! environment (or TOML) only; they are checked for completeness when a
//! notification is sent, not at startup.

use mtt_common::{Error, Result};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8700;

/// Default server host embedded in notification links
pub const DEFAULT_SERVER_HOST: &str = "localhost:8700";

/// Default SQLite file, relative to the working directory
pub const DEFAULT_DATABASE_PATH: &str = "tasks.db";

/// Optional TOML configuration file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Address to bind (default 0.0.0.0)
    #[serde(default)]
    pub bind_address: Option<IpAddr>,

    /// HTTP port
    #[serde(default)]
    pub port: Option<u16>,

    /// Path to SQLite database file
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Host (and port) used to build links in notification bodies
    #[serde(default)]
    pub server_host: Option<String>,

    /// Outgoing mail settings
    #[serde(default)]
    pub smtp: SmtpSection,
}

/// `[smtp]` table of the TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SmtpSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: Option<String>,
}

/// Load the TOML configuration file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Values already merged from command line and environment by clap
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bind_address: Option<IpAddr>,
    pub port: Option<u16>,
    pub database_path: Option<PathBuf>,
    pub server_host: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub listen_addr: SocketAddr,
    pub database_path: PathBuf,
    pub server_host: String,
    pub mail: MailSettings,
}

impl ServiceConfig {
    /// Resolve the service configuration from CLI/env values, the TOML file
    /// and built-in defaults.
    pub fn resolve(
        cli: CliOverrides,
        toml: &TomlConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let bind_address = cli
            .bind_address
            .or(toml.bind_address)
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        let port = cli.port.or(toml.port).unwrap_or(DEFAULT_PORT);

        Self {
            listen_addr: SocketAddr::new(bind_address, port),
            database_path: cli
                .database_path
                .or_else(|| toml.database_path.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH)),
            server_host: non_empty(cli.server_host)
                .or_else(|| non_empty(toml.server_host.clone()))
                .unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            mail: MailSettings::resolve(&toml.smtp, env),
        }
    }
}

/// SMTP settings as found; any of them may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: Option<String>,
}

/// SMTP settings with every field present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
}

impl MailSettings {
    /// Read `SMTP_*` variables through `env`, falling back to the TOML
    /// `[smtp]` table. Empty values count as missing.
    pub fn resolve(toml: &SmtpSection, env: impl Fn(&str) -> Option<String>) -> Self {
        let port = match non_empty(env("SMTP_PORT")) {
            Some(raw) => match raw.trim().parse::<u16>() {
                Ok(port) => Some(port),
                Err(_) => {
                    warn!("Ignoring SMTP_PORT '{}': not a valid port number", raw);
                    None
                }
            },
            None => toml.port,
        };

        Self {
            host: non_empty(env("SMTP_HOST")).or_else(|| non_empty(toml.host.clone())),
            port,
            username: non_empty(env("SMTP_USERNAME"))
                .or_else(|| non_empty(toml.username.clone())),
            password: non_empty(env("SMTP_PASSWORD"))
                .or_else(|| non_empty(toml.password.clone())),
            from: non_empty(env("SMTP_FROM")).or_else(|| non_empty(toml.from.clone())),
        }
    }

    /// All settings needed to send, or `None` when any is missing
    pub fn complete(&self) -> Option<SmtpSettings> {
        Some(SmtpSettings {
            host: self.host.clone()?,
            port: self.port?,
            username: self.username.clone()?,
            password: self.password.clone()?,
            from: self.from.clone()?,
        })
    }
}

/// Environment lookup used by the binary
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
