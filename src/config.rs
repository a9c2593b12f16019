use crate::error::{ExporterError, Result as ExporterResult};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_listen_address")]
    pub listen_address: String,
    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    #[serde(default = "default_command")]
    pub command: String,
    #[serde(default = "default_args")]
    pub args: Vec<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Read reports from this file instead of running `command`
    #[serde(default)]
    pub replay_file: Option<PathBuf>,
}

fn default_listen_address() -> String {
    ":8088".to_string()
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

fn default_command() -> String {
    "pwrstat".to_string()
}

fn default_args() -> Vec<String> {
    vec!["-status".to_string()]
}

fn default_timeout_seconds() -> u64 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
            metrics_path: default_metrics_path(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            args: default_args(),
            timeout_seconds: default_timeout_seconds(),
            replay_file: None,
        }
    }
}

impl ServerConfig {
    /// Resolve `listen_address` to a socket address.
    ///
    /// A bare `:port` binds every IPv4 interface.
    pub fn socket_addr(&self) -> ExporterResult<SocketAddr> {
        let addr = &self.listen_address;
        let candidate = match addr.strip_prefix(':') {
            Some(port) => format!("0.0.0.0:{}", port),
            None => addr.clone(),
        };

        candidate
            .to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .ok_or_else(|| ExporterError::Config(format!("invalid listen address: {:?}", addr)))
    }

    /// Check that `metrics_path` can be mounted next to `/` and `/health`
    pub fn validate_metrics_path(&self) -> ExporterResult<()> {
        let path = &self.metrics_path;
        if !path.starts_with('/') {
            return Err(ExporterError::Config(format!(
                "metrics path must start with '/': {:?}",
                path
            )));
        }
        if path == "/" || path == "/health" {
            return Err(ExporterError::Config(format!(
                "metrics path {:?} is reserved",
                path
            )));
        }
        if path.contains([':', '*', '{', '}']) {
            return Err(ExporterError::Config(format!(
                "metrics path must be a literal path: {:?}",
                path
            )));
        }
        Ok(())
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        // Load environment variables from .env if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("PWRSTAT_EXPORTER")
                    .separator("__")
                    .try_parsing(true)
                    // source.args is a list: PWRSTAT_EXPORTER__SOURCE__ARGS="-status -verbose"
                    .list_separator(" ")
                    .with_list_parse_key("source.args"),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Reject settings the server cannot start with
    pub fn validate(&self) -> ExporterResult<()> {
        self.server.socket_addr()?;
        self.server.validate_metrics_path()?;
        if self.source.timeout_seconds == 0 {
            return Err(ExporterError::Config(
                "source timeout_seconds must be greater than zero".to_string(),
            ));
        }
        if self.source.replay_file.is_none() && self.source.command.trim().is_empty() {
            return Err(ExporterError::Config(
                "source command must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
