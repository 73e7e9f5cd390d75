use std::fs;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{info, paths, DEBUG_NAME};

pub const SETTINGS_VERSION: &str = "v1.0";

/// Flat user configuration stored at resources/cache/settings.json. Edited
/// externally only; the app reads it once per render cycle. Unknown keys are
/// tolerated on load and dropped on save.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub version: String,
    #[serde(default)]
    pub theme_index: usize,
    #[serde(default = "default_courses")]
    pub courses: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION.to_string(),
            theme_index: 0,
            courses: default_courses(),
        }
    }
}

fn default_courses() -> Vec<String> {
    vec!["USD".to_string(), "EUR".to_string()]
}

/// Read the settings document, scaffolding the default one on first run.
/// I/O and parse errors are fatal to the caller.
pub fn load() -> Result<Settings, String> {
    let path = paths::settings_file();
    if !path.exists() {
        scaffold_default()?;
    }

    let raw = fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read settings {}: {e}", path.display()))?;
    serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse settings {}: {e}", path.display()))
}

pub fn save(settings: &Settings) -> Result<(), String> {
    let rendered = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize settings: {e}"))?;
    write_document(&rendered)
}

/// Create the initial `{"version": "v1.0"}` document if no settings exist yet.
pub fn ensure_exists() -> Result<(), String> {
    let path = paths::settings_file();
    if path.exists() {
        return Ok(());
    }
    scaffold_default()?;
    info!("[{}] Created default settings at {}", DEBUG_NAME, path.display());
    Ok(())
}

fn scaffold_default() -> Result<(), String> {
    let document = json!({ "version": SETTINGS_VERSION });
    let rendered = serde_json::to_string_pretty(&document)
        .map_err(|e| format!("Failed to serialize default settings: {e}"))?;
    write_document(&rendered)
}

// serde_json writes raw UTF-8, so non-ASCII values survive a save unescaped.
fn write_document(rendered: &str) -> Result<(), String> {
    let path = paths::settings_file();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
    }
    fs::write(&path, rendered)
        .map_err(|e| format!("Failed to write settings {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaffold_document_parses_with_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"version": "v1.0"}"#).unwrap();
        assert_eq!(settings.version, SETTINGS_VERSION);
        assert_eq!(settings.theme_index, 0);
        assert_eq!(settings.courses, vec!["USD", "EUR"]);
    }

    #[test]
    fn camel_case_keys_are_honored() {
        let raw = r#"{"version": "v1.0", "themeIndex": 1, "courses": ["GBP", "CNY"]}"#;
        let settings: Settings = serde_json::from_str(raw).unwrap();
        assert_eq!(settings.theme_index, 1);
        assert_eq!(settings.courses, vec!["GBP", "CNY"]);
    }

    #[test]
    fn unknown_keys_are_tolerated() {
        let raw = r#"{"version": "v1.0", "themeIndex": 1, "legacyOption": true}"#;
        let settings: Settings = serde_json::from_str(raw).unwrap();
        assert_eq!(settings.theme_index, 1);
    }

    #[test]
    fn save_round_trips_through_camel_case() {
        let settings = Settings {
            version: SETTINGS_VERSION.to_string(),
            theme_index: 1,
            courses: vec!["USD".to_string()],
        };
        let rendered = serde_json::to_string_pretty(&settings).unwrap();
        assert!(rendered.contains("\"themeIndex\": 1"));
        let back: Settings = serde_json::from_str(&rendered).unwrap();
        assert_eq!(back.theme_index, 1);
        assert_eq!(back.courses, vec!["USD"]);
    }

    #[test]
    fn non_ascii_values_are_not_escaped() {
        let settings = Settings {
            version: "v1.0 сборка".to_string(),
            theme_index: 0,
            courses: default_courses(),
        };
        let rendered = serde_json::to_string_pretty(&settings).unwrap();
        assert!(rendered.contains("сборка"));
    }
}
