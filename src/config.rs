use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration.
///
/// Layered lowest-to-highest: built-in defaults, `config.toml` in the
/// per-user config directory, `TREEFM_*` environment variables, then CLI
/// overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the durable root registry.
    pub data_dir: PathBuf,
    /// Emit logs as JSON for machine parsing.
    pub json_logs: bool,
    /// Default the log level to DEBUG instead of INFO.
    pub verbose: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            json_logs: false,
            verbose: false,
        }
    }
}

impl AppConfig {
    /// Load configuration, optionally layering CLI overrides on top.
    pub fn new<A: Serialize>(cli: Option<&A>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(config_file()))
            .merge(Env::prefixed("TREEFM_"));

        if let Some(cli) = cli {
            figment = figment.merge(Serialized::defaults(cli));
        }

        figment.extract().context("Failed to load configuration")
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("treefm")
}

fn config_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("treefm")
        .join("config.toml")
}
