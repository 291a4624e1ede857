//! Config file load/save (JSON)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::core::{MergeMode, Sanitizer};
use crate::error::Result;
use crate::host::SlugService;
use crate::tables::ISO9;

/// cyr2lat config
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Cyr2LatConfig {
    /// Locale used when the caller does not pass one
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Settings record (table overrides); none means built-in tables only
    #[serde(default)]
    pub settings_path: Option<PathBuf>,
    /// Fold leftover non-ASCII after table substitution
    #[serde(default = "default_true")]
    pub transliterate: bool,
    /// Lowercase title slugs
    #[serde(default = "default_true")]
    pub lowercase_titles: bool,
    #[serde(default)]
    pub merge_mode: MergeMode,
}

fn default_locale() -> String {
    ISO9.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Cyr2LatConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            settings_path: None,
            transliterate: default_true(),
            lowercase_titles: default_true(),
            merge_mode: MergeMode::default(),
        }
    }
}

impl Cyr2LatConfig {
    /// Sanitizer configured from this config (store not attached)
    pub fn sanitizer(&self) -> Sanitizer {
        Sanitizer::new()
            .with_merge_mode(self.merge_mode)
            .with_transliteration(self.transliterate)
    }

    /// Wrap `sanitizer` in a host service using this config's locale and casing
    pub fn service(&self, sanitizer: Sanitizer) -> SlugService {
        SlugService::new(sanitizer)
            .with_locale(self.locale.clone())
            .with_lowercase_titles(self.lowercase_titles)
    }
}

/// Config directory: ~/.config/cyr2lat
pub fn config_dir() -> PathBuf {
    let home = std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .filter(|p| p.is_absolute() && p.is_dir())
        .unwrap_or_else(|| PathBuf::from("/var/tmp"));
    home.join(".config").join("cyr2lat")
}

/// Config file path: ~/.config/cyr2lat/config.json
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Default settings record path: ~/.config/cyr2lat/settings.json
pub fn default_settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

/// Load the config (defaults when the file is missing or invalid)
pub fn load_config() -> Cyr2LatConfig {
    let path = config_path();
    match fs::read_to_string(&path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("invalid config {}: {}, using defaults", path.display(), e);
            Cyr2LatConfig::default()
        }),
        Err(_) => Cyr2LatConfig::default(),
    }
}

/// Save the config
pub fn save_config(config: &Cyr2LatConfig) -> Result<()> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(&path, json)?;
    Ok(())
}
