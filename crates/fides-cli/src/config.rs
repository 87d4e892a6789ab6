//! `fidesctl.toml`-style configuration.
//!
//! ```toml
//! [cli]
//! server_url = "http://localhost:8080"
//! ```

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use url::Url;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FidesConfig {
    #[serde(default)]
    pub cli: CliSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CliSettings {
    #[serde(default = "default_server_url")]
    pub server_url: String,
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
        }
    }
}

impl FidesConfig {
    /// Load from `path` when one was given; otherwise the defaults.
    ///
    /// An explicitly named file that does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            tracing::debug!("no config file given; using defaults");
            return Ok(Self::default());
        };
        if !path.exists() {
            return Err(anyhow!("config file {} does not exist", path.display()));
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        tracing::debug!(path = %path.display(), server_url = %config.cli.server_url, "loaded config");
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn server_url(&self) -> Result<Url> {
        Ok(fides_viz::visualize::parse_server_url(&self.cli.server_url)?)
    }
}
