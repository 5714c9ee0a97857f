use std::fs;
use std::path::Path;

use rsc_core::SectionFilter;
use serde::Deserialize;
use thiserror::Error;

/// Run settings: where peers live in the export and how scripts are written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub export: ExportSettings,
    pub script: ScriptSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Section path prefix holding the peer entries.
    pub section: String,
    /// Keyword that starts one entry.
    pub entry: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScriptSettings {
    /// Output file extension, without the dot.
    pub extension: String,
    /// Directory the generated `.conf` is moved into on the client.
    pub install_dir: String,
    /// WireGuard executable used to install the tunnel service.
    pub wireguard_exe: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            section: "/interface wireguard peers".to_string(),
            entry: "add".to_string(),
        }
    }
}

impl Default for ScriptSettings {
    fn default() -> Self {
        Self {
            extension: "que".to_string(),
            install_dir: r"c:\program files\wireguard".to_string(),
            wireguard_exe: r"C:\Program Files\WireGuard\wireguard.exe".to_string(),
        }
    }
}

impl Settings {
    /// Section filter for the export scanner.
    pub fn section_filter(&self) -> SectionFilter {
        SectionFilter::new(self.export.section.as_str(), self.export.entry.as_str())
    }
}

/// Errors returned when loading a settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Load settings from a TOML file. Keys missing from the file keep their defaults.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_settings(&raw, path.display().to_string())
}

/// Built-in settings from `settings/defaults.toml`.
pub fn default_settings() -> Settings {
    let embedded = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/settings/defaults.toml"
    ));
    match parse_settings(embedded, "embedded settings".to_string()) {
        Ok(settings) => settings,
        Err(_) => Settings::default(),
    }
}

fn parse_settings(raw: &str, path: String) -> Result<Settings, SettingsError> {
    toml::from_str(raw).map_err(|source| SettingsError::Parse { path, source })
}
