use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::error::{ShellError, ShellResult};

const APP_DIR_NAME: &str = "MapsWithMe";

/// Shell configuration, persisted as JSON next to the host application.
///
/// Every path field is an override; `None` lets the path resolver pick the
/// platform default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub app_dir_name: String,
    /// Build flavor passed to the native platform call.
    pub flavor: String,
    pub build_type: String,
    pub is_tablet: bool,
    pub statistics_enabled: bool,
    /// Debug aid: make writable storage creation fail as if external
    /// storage were read-only or missing.
    pub emulate_bad_storage: bool,

    pub settings_dir: Option<PathBuf>,
    pub apk_path: Option<PathBuf>,
    pub writable_dir: Option<PathBuf>,
    pub private_dir: Option<PathBuf>,
    pub temp_dir: Option<PathBuf>,

    /// Strings registered with the engine during framework init, in order.
    pub localizations: Vec<(String, String)>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            app_dir_name: APP_DIR_NAME.to_string(),
            flavor: "web".to_string(),
            build_type: "release".to_string(),
            is_tablet: false,
            statistics_enabled: true,
            emulate_bad_storage: false,
            settings_dir: None,
            apk_path: None,
            writable_dir: None,
            private_dir: None,
            temp_dir: None,
            localizations: default_localizations(),
        }
    }
}

impl ShellConfig {
    pub fn load(path: &Path) -> ShellResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ShellError::io(path, source))?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Using default shell config, {:?} unusable: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> ShellResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ShellError::io(path, source))
    }
}

fn default_localizations() -> Vec<(String, String)> {
    [
        ("core_entrance", "Entrance"),
        ("core_exit", "Exit"),
        ("core_my_places", "My Places"),
        ("core_my_position", "My Position"),
        ("core_placepage_unknown_place", "Unknown Place"),
        ("postal_code", "Postal Code"),
        ("wifi", "WiFi"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{ "flavor": "google", "is_tablet": true }"#;
        let config: ShellConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.flavor, "google");
        assert!(config.is_tablet);
        assert_eq!(config.build_type, "release");
        assert_eq!(config.localizations.len(), 7);
        assert_eq!(config.localizations[0].0, "core_entrance");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ShellConfig::load_or_default(&dir.path().join("absent.json"));
        assert_eq!(config.app_dir_name, APP_DIR_NAME);
    }

    #[test]
    fn load_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shell.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(ShellConfig::load(&path), Err(ShellError::Json(_))));
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shell.json");
        let mut config = ShellConfig::default();
        config.emulate_bad_storage = true;
        config.save(&path).unwrap();
        assert!(ShellConfig::load(&path).unwrap().emulate_bad_storage);
    }
}
