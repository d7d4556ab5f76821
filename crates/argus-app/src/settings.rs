use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ui::theme::ThemeMode;

/// Endpoint of the external process that serves the camera feed.
pub const DEFAULT_STREAM_URL: &str = "http://localhost:5000/video_feed";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsConfig {
    pub version: u32,
    pub theme: ThemeMode,
    #[serde(default = "default_stream_url")]
    pub stream_url: String,
}

fn default_stream_url() -> String {
    DEFAULT_STREAM_URL.to_string()
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            version: 1,
            theme: ThemeMode::Dark,
            stream_url: default_stream_url(),
        }
    }
}

impl SettingsConfig {
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn save(&self) {
        let Some(path) = Self::config_path() else {
            return;
        };
        if let Some(dir) = path.parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        self.save_to(&path);
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("argus").join("settings.json"))
    }

    fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    fn save_to(&self, path: &Path) {
        if let Ok(json) = serde_json::to_string_pretty(self) {
            let _ = std::fs::write(path, json);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = SettingsConfig::load_from(&dir.path().join("nope.json"));
        assert_eq!(config.stream_url, DEFAULT_STREAM_URL);
        assert_eq!(config.theme, ThemeMode::Dark);
    }

    #[test]
    fn defaults_when_file_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        let config = SettingsConfig::load_from(&path);
        assert_eq!(config.version, 1);
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let config = SettingsConfig {
            version: 1,
            theme: ThemeMode::Light,
            stream_url: "http://10.0.0.7:8080/cam".to_string(),
        };
        config.save_to(&path);
        let loaded = SettingsConfig::load_from(&path);
        assert_eq!(loaded.theme, ThemeMode::Light);
        assert_eq!(loaded.stream_url, "http://10.0.0.7:8080/cam");
    }

    #[test]
    fn missing_url_field_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"version":1,"theme":"Dark"}"#).unwrap();
        let config = SettingsConfig::load_from(&path);
        assert_eq!(config.stream_url, DEFAULT_STREAM_URL);
    }
}
