//! Application configuration.
//!
//! Layers, lowest to highest priority: built-in defaults, config file
//! (`--config` / `CONFIG_FILE`, else `./config.yaml` when present),
//! `DQA_`-prefixed environment variables (`DQA_SERVER__PORT=8080`), CLI flags.

use std::path::Path;
use std::time::Duration;

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Config file picked up from the working directory when none is given.
const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Parser, Debug)]
#[command(author, version, about = "Document Q&A chat interface", long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Base URL of the document service (ingestion and answer endpoints)
    #[arg(long, env = "BACKEND_URL")]
    pub backend_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub session: SessionConfig,
    pub upload: UploadConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served under `/static`.
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Sessions idle longer than this are dropped.
    pub idle_timeout_secs: u64,
}

impl SessionConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    /// Largest multipart body accepted from the browser.
    pub max_body_bytes: usize,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    pub format: LogFormat,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.static_dir", "static")?
            .set_default("backend.base_url", "http://localhost:8000")?
            .set_default("session.idle_timeout_secs", 30 * 60)?
            .set_default("upload.max_body_bytes", 100 * 1024 * 1024)?
            .set_default("log.format", "pretty")?;

        builder = match &cli.config {
            Some(path) => builder.add_source(File::with_name(path).required(true)),
            None => builder.add_source(File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix("DQA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // CLI flags (and their env vars, resolved by clap) win over everything.
        if let Some(host) = cli.host {
            builder = builder.set_override("server.host", host)?;
        }
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(url) = cli.backend_url {
            builder = builder.set_override("backend.base_url", url)?;
        }

        builder.build()?.try_deserialize()
    }

    /// `host:port` to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
