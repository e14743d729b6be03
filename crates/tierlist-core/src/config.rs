//! Editor configuration (persisted as TOML).
//!
//! The default file is `editor.toml` in the platform-specific config folder
//! resolved by [`default_config_path`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_QUALIFIER: &str = "dev";
const APP_ORG: &str = "tierlist";
const APP_NAME: &str = "Tier List Editor";
const CONFIG_FILENAME: &str = "editor.toml";

const PRESET_COLORS: [&str; 12] = [
    "#ff7f7f", "#ff9f7f", "#ffbf7f", "#ffdf7f", "#ffff7f", "#bfff7f", "#7fff7f", "#7fffff",
    "#7fbfff", "#7f7fff", "#bf7fff", "#ff7fbf",
];

const DEFAULT_TIER_NAME: &str = "New Tier";

const NAMED_COLORS: [(&str, &str); 8] = [
    ("S+", "#ff7f7f"),
    ("S", "#ff9f7f"),
    ("A+", "#ffbf7f"),
    ("A", "#ffdf7f"),
    ("B+", "#ffff7f"),
    ("B", "#bfff7f"),
    ("C", "#7fff7f"),
    ("D", "#7fffff"),
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to {operation} config file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize config")]
    Serialize(#[from] toml::ser::Error),
}

/// Editor settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Colors handed out to new tiers, cycled by position.
    pub palette: Vec<String>,
    /// Colors for loaded tiers that carry none, keyed by tier name.
    pub named_colors: BTreeMap<String, String>,
    pub fallback_color: String,
    pub new_tier_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            palette: PRESET_COLORS.iter().map(|c| (*c).to_string()).collect(),
            named_colors: NAMED_COLORS
                .iter()
                .map(|(name, color)| ((*name).to_string(), (*color).to_string()))
                .collect(),
            fallback_color: "#888888".to_string(),
            new_tier_name: DEFAULT_TIER_NAME.to_string(),
        }
    }
}

impl EditorConfig {
    /// Palette color for a tier appended at `position`.
    pub fn palette_color(&self, position: usize) -> &str {
        if self.palette.is_empty() {
            return &self.fallback_color;
        }
        &self.palette[position % self.palette.len()]
    }

    /// Name given to a freshly added tier. Blank names fall back to the
    /// built-in default.
    pub fn tier_name(&self) -> &str {
        let name = self.new_tier_name.trim();
        if name.is_empty() { DEFAULT_TIER_NAME } else { name }
    }

    /// Default color for a tier that was stored without one.
    pub fn color_for_name(&self, name: &str) -> &str {
        self.named_colors
            .get(name.trim())
            .map_or(self.fallback_color.as_str(), String::as_str)
    }
}

/// Path of the default config file, if the platform has a config folder.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load a config file. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<EditorConfig, ConfigError> {
    match fs::read_to_string(path) {
        Ok(content) => {
            let mut config: EditorConfig =
                toml::from_str(&content).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;
            if config.new_tier_name.trim().is_empty() {
                tracing::warn!(path = %path.display(), "blank new_tier_name, using default");
                config.new_tier_name = DEFAULT_TIER_NAME.to_string();
            }
            tracing::info!(path = %path.display(), "loaded editor config");
            Ok(config)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "no editor config found, using defaults");
            Ok(EditorConfig::default())
        }
        Err(source) => Err(ConfigError::Io {
            operation: "read",
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Load the config from the default location, falling back to defaults on
/// any problem.
pub fn load_default_config() -> EditorConfig {
    let Some(path) = default_config_path() else {
        tracing::warn!("could not determine config path, using defaults");
        return EditorConfig::default();
    };
    load_config(&path).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "unusable editor config, using defaults");
        EditorConfig::default()
    })
}

/// Write a config file, creating the parent directory if needed.
pub fn save_config(config: &EditorConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            operation: "create directory for",
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content).map_err(|source| ConfigError::Io {
        operation: "write",
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "saved editor config");
    Ok(())
}
