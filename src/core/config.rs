//! Application configuration management

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Upper bound on how long a notice stays up
const MAX_NOTICE_SECS: u64 = 3600;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address share links are built on when the app was not opened from one
    pub share_base_url: String,
    /// How long the "link copied" notice stays up, in seconds
    pub share_notice_secs: u64,
    /// Directory of the last picked hymn sheet
    pub last_image_dir: Option<PathBuf>,
    /// UI settings
    pub ui: UiConfig,
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Theme (light/dark)
    pub theme: String,
    /// Body text size in points
    pub font_size: f32,
    /// Font file with Hangul glyphs, prepended to the default families
    pub font_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            share_base_url: "http://localhost:3000/sunday1/".to_string(),
            share_notice_secs: 3,
            last_image_dir: None,
            ui: UiConfig::default(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            font_size: 15.0,
            font_path: None,
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("church", "raon", "RaonBulletin")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        Self::from_json(&content)
    }

    fn from_json(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// How long share notices are shown
    pub fn share_notice_duration(&self) -> Duration {
        Duration::from_secs(self.share_notice_secs.min(MAX_NOTICE_SECS))
    }

    /// Remember the folder of a picked image for the next file dialog
    pub fn remember_image_dir(&mut self, picked: &std::path::Path) {
        let dir = picked.parent().map(|p| p.to_path_buf());
        if dir.is_some() && dir != self.last_image_dir {
            self.last_image_dir = dir;
            if let Err(e) = self.save() {
                tracing::warn!("Failed to save config: {}", e);
            }
        }
    }
}

impl UiConfig {
    pub fn is_dark(&self) -> bool {
        self.theme.eq_ignore_ascii_case("dark")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.share_notice_duration(), Duration::from_secs(3));
        assert_eq!(config.share_base_url, "http://localhost:3000/sunday1/");
        assert!(!config.ui.is_dark());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config = AppConfig::from_json(r#"{"share_base_url":"https://example.org/bulletin/","ui":{"theme":"dark"}}"#)
            .unwrap();
        assert_eq!(config.share_base_url, "https://example.org/bulletin/");
        assert_eq!(config.share_notice_secs, 3);
        assert!(config.ui.is_dark());
        assert_eq!(config.ui.font_size, 15.0);
    }

    #[test]
    fn test_notice_duration_is_capped() {
        let config = AppConfig::from_json(&format!(r#"{{"share_notice_secs":{}}}"#, u64::MAX)).unwrap();
        assert_eq!(config.share_notice_secs, u64::MAX);
        assert_eq!(config.share_notice_duration(), Duration::from_secs(MAX_NOTICE_SECS));
    }
}
