//! src/config.rs
//! ============================================================================
//! # Config: Application Configuration Loader and Saver
//!
//! User-editable settings for the file browser, loaded and saved as TOML
//! from the cross-platform config path via the
//! [`directories`](https://docs.rs/directories) crate. Missing files fall
//! back to defaults and the default file is written out for editing.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;

/// Where and how to reach the file API host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the server. Keep the trailing slash so the API path
    /// resolves under it.
    pub base_url: String,
    /// Command a download URL is handed to; the launched program owns the
    /// transfer.
    pub opener_cmd: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/".to_string(),
            opener_cmd: "xdg-open".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Delay between queuing a toast and inserting its content.
    #[serde(with = "humantime_serde")]
    pub entry_delay: Duration,
    /// Optional URL the toast markup template is fetched from once.
    pub template_url: Option<String>,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            entry_delay: crate::notify::manager::ENTRY_DELAY,
            template_url: None,
        }
    }
}

/// Main configuration struct for the application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub notify: NotifyConfig,

    /// Settings file holding the delete-authorization token. Defaults to
    /// the token store's canonical path when absent.
    #[serde(default)]
    pub token_file: Option<PathBuf>,
}

impl Config {
    /// Loads config from the TOML file at the XDG-compliant config dir, or
    /// writes and returns defaults when no file exists yet.
    pub async fn load() -> anyhow::Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            info!("loading config from {}", path.display());
            let text = fs::read_to_string(&path).await?;
            let config: Self = toml::from_str(&text)?;
            Ok(config)
        } else {
            info!(
                "no config file at {}, writing defaults there",
                path.display()
            );
            let config = Self::default();
            config.save().await?;
            Ok(config)
        }
    }

    /// Saves config to the TOML file at the XDG-compliant config dir.
    pub async fn save(&self) -> anyhow::Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let text = toml::to_string_pretty(self)?;
        fs::write(&path, text).await?;
        Ok(())
    }

    /// Canonical config file path via `directories::ProjectDirs`.
    pub fn config_path() -> anyhow::Result<PathBuf> {
        let dirs = ProjectDirs::from("org", "webfs", "webfs")
            .ok_or_else(|| anyhow::anyhow!("could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_roundtrip_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.server.base_url, config.server.base_url);
        assert_eq!(parsed.notify.entry_delay, config.notify.entry_delay);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let parsed: Config =
            toml::from_str("[server]\nbase_url = \"http://files.test/\"\nopener_cmd = \"open\"\n")
                .unwrap();
        assert_eq!(parsed.server.base_url, "http://files.test/");
        assert_eq!(parsed.notify.entry_delay, NotifyConfig::default().entry_delay);
        assert_eq!(parsed.token_file, None);
    }
}
