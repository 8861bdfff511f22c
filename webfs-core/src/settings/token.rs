//! src/settings/token.rs
//! ============================================================================
//! # TokenStore: Delete-Authorization Token Lookup
//!
//! The authorization token lives in a TOML settings file under a fixed key,
//! written by an external settings surface. This side only reads it, fresh
//! on every call and never cached, so a token saved mid-session is picked
//! up by the next delete.

use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;
use tokio::fs;
use tracing::debug;

use crate::error::AppError;

/// Fixed key the external settings surface writes the token under.
pub const TOKEN_KEY: &str = "auth";

#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Canonical settings file path under the XDG config dir.
    pub fn default_path() -> anyhow::Result<PathBuf> {
        let dirs = ProjectDirs::from("org", "webfs", "webfs")
            .ok_or_else(|| anyhow::anyhow!("could not determine config directory"))?;
        Ok(dirs.config_dir().join("settings.toml"))
    }

    /// Reads the token. A missing settings file or key means no token has
    /// been saved yet, which is not an error: the delete endpoint will
    /// answer 401 and that outcome is reported like any other.
    pub async fn read(&self) -> Result<Option<String>, AppError> {
        let text = match fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("no settings file at {}", self.path.display());
                return Ok(None);
            }
            Err(source) => {
                return Err(AppError::ConfigIo {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let table: toml::Table = text.parse()?;
        Ok(table
            .get(TOKEN_KEY)
            .and_then(|value| value.as_str())
            .map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_means_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("settings.toml"));
        assert_eq!(store.read().await.unwrap(), None);
    }

    #[tokio::test]
    async fn token_is_read_under_the_fixed_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        tokio::fs::write(&path, "auth = \"sesame\"\n").await.unwrap();

        let store = TokenStore::new(&path);
        assert_eq!(store.read().await.unwrap(), Some("sesame".to_string()));
    }

    #[tokio::test]
    async fn missing_key_means_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        tokio::fs::write(&path, "theme = \"dark\"\n").await.unwrap();

        let store = TokenStore::new(&path);
        assert_eq!(store.read().await.unwrap(), None);
    }

    #[tokio::test]
    async fn unparseable_settings_are_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        tokio::fs::write(&path, "auth = [unclosed\n").await.unwrap();

        let store = TokenStore::new(&path);
        assert!(matches!(store.read().await, Err(AppError::Config(_))));
    }
}
