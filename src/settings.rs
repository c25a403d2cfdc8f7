use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use crate::modules::tag_mirror::TagMirror;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("settings are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum ThemePreference { System, Light, Dark }

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum DockSide { Left, Right }

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DockerSettings {
    pub visible: bool,
    pub dock_side: DockSide,
    pub spacing: f32,
    pub margin: f32,
    /// Wait before looking up the host selector, giving the host UI time to come up.
    pub startup_delay_ms: u64,
    pub mirror_path: Option<PathBuf>,
}

impl Default for DockerSettings {
    fn default() -> Self {
        Self {
            visible: true,
            dock_side: DockSide::Right,
            spacing: 3.0,
            margin: 0.0,
            startup_delay_ms: 1000,
            mirror_path: None,
        }
    }
}

impl DockerSettings {
    pub fn mirror(&self) -> TagMirror {
        match &self.mirror_path {
            Some(path) => TagMirror::new(path.clone()),
            None => TagMirror::at_default_location(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub theme_preference: ThemePreference,
    pub docker: DockerSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme_preference: ThemePreference::System,
            docker: DockerSettings::default(),
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        let path = Self::get_config_path();
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), "using default settings: {e}");
                Self::default()
            }
        }
    }

    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        self.save_to(&Self::get_config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("brush_tag_selector");
        path.push("settings.json");
        path
    }
}
