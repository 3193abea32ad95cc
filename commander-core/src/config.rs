//! ``src/config.rs``
//! ============================================================================
//! # Config: Application Configuration Loader and Saver
//!
//! Loads and saves settings as TOML from the platform config directory
//! resolved by [`directories`](https://docs.rs/directories).
//!
//! ## Example
//! ```rust,ignore
//! let config = Config::load().await?;
//! config.save().await?;
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

use crate::error::AppError;

use tokio::fs as TokioFs;

/// Rows moved by PageUp/PageDown.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Where and how verbosely to log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Directory for the rolling log files.
    pub dir: PathBuf,

    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        let dir: PathBuf = ProjectDirs::from("org", "example", "Commander").map_or_else(
            || PathBuf::from("./logs"),
            |dirs| dirs.data_local_dir().join("logs"),
        );

        Self {
            dir,
            level: "info".to_string(),
        }
    }
}

/// Main configuration struct for the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial hidden-file flag for both panes.
    pub show_hidden: bool,

    pub page_size: usize,

    /// Start directory of the left pane; the working directory when unset.
    pub left_path: Option<PathBuf>,

    /// Start directory of the right pane; the filesystem root when unset.
    pub right_path: Option<PathBuf>,

    pub logging: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_hidden: false,
            page_size: DEFAULT_PAGE_SIZE,
            left_path: None,
            right_path: None,
            logging: LogConfig::default(),
        }
    }
}

impl Config {
    /// Loads config from the TOML file in the app config dir, or writes and
    /// returns defaults when it does not exist yet.
    pub async fn load() -> anyhow::Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            info!("Loading config from {}", path.display());
            let text = TokioFs::read_to_string(&path)
                .await
                .map_err(|source| AppError::ConfigIo {
                    path: path.clone(),
                    source,
                })?;
            let cfg: Self = Self::from_toml(&text)?;

            Ok(cfg)
        } else {
            info!(
                "No config file found at {}, using default configuration. Creating it now.",
                path.display()
            );

            let default_config = Self::default();
            default_config.save().await?;

            Ok(default_config)
        }
    }

    /// Saves config to the TOML file in the app config dir.
    pub async fn save(&self) -> anyhow::Result<()> {
        let path = Self::config_path()?;

        info!("Saving config to {}", path.display());

        if let Some(parent) = path.parent() {
            TokioFs::create_dir_all(parent).await?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        TokioFs::write(&path, toml_str).await?;

        Ok(())
    }

    /// Parse a config document; missing keys take their defaults.
    pub fn from_toml(text: &str) -> Result<Self, AppError> {
        let mut cfg: Self = toml::from_str(text)?;
        if cfg.page_size == 0 {
            cfg.page_size = DEFAULT_PAGE_SIZE;
        }
        Ok(cfg)
    }

    /// Returns the canonical config file path using `directories::ProjectDirs`.
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the config directory (without filename).
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "example", "Commander")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory."))?;
        Ok(proj_dirs.config_dir().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = Config::from_toml("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.page_size, 10);
    }

    #[test]
    fn partial_document_overrides_some_fields() {
        let cfg = Config::from_toml(
            r#"
            show_hidden = true
            right_path = "/tmp"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert!(cfg.show_hidden);
        assert_eq!(cfg.right_path, Some(PathBuf::from("/tmp")));
        assert_eq!(cfg.left_path, None);
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.logging.dir, LogConfig::default().dir);
    }

    #[test]
    fn zero_page_size_falls_back_to_default() {
        let cfg = Config::from_toml("page_size = 0").unwrap();
        assert_eq!(cfg.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn malformed_document_is_a_config_error() {
        let err = Config::from_toml("show_hidden = \"maybe\"").unwrap_err();
        assert!(matches!(err, crate::error::AppError::Config(_)));
    }

    #[test]
    fn round_trips_through_toml() {
        let cfg = Config {
            show_hidden: true,
            page_size: 25,
            left_path: Some(PathBuf::from("/home")),
            ..Config::default()
        };
        let text = toml::to_string_pretty(&cfg).unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), cfg);
    }
}
