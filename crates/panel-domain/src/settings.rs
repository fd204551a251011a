use serde::{Deserialize, Serialize};

use crate::field_update::FieldUpdate;

/// Single-user preference record. `use_external_url` selects the network
/// mode card destinations resolve against; the rest are opaque values the
/// client round-trips without interpreting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub wallpaper: Option<String>,
    #[serde(default)]
    pub use_external_url: bool,
    #[serde(default = "default_search_engine")]
    pub search_engine: String,
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_search_engine() -> String {
    "google".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            wallpaper: None,
            use_external_url: false,
            search_engine: default_search_engine(),
        }
    }
}

/// Update payload for `PUT /api/settings`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "FieldUpdate::is_no_change")]
    pub wallpaper: FieldUpdate<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_external_url: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_engine: Option<String>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self.theme.is_none()
            && !self.wallpaper.is_change()
            && self.use_external_url.is_none()
            && self.search_engine.is_none()
    }
}
