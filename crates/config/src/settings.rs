// Importer settings
// Loaded from ~/.config/placement/settings.json

use std::fs;
use std::path::{Path, PathBuf};

use placement_engine::{ImportOptions, ZeroCgpa};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Portal
    #[serde(rename = "portal.apiBase", skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,

    #[serde(rename = "portal.collegeId", skip_serializing_if = "Option::is_none")]
    pub college_id: Option<String>,

    #[serde(rename = "portal.timeoutSecs")]
    pub timeout_secs: u64,

    // Upload
    #[serde(rename = "upload.zeroCgpa")]
    pub zero_cgpa: ZeroCgpa,

    #[serde(rename = "upload.defaultBatch", skip_serializing_if = "Option::is_none")]
    pub default_batch: Option<i32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: None,
            college_id: None,
            timeout_secs: 60,
            zero_cgpa: ZeroCgpa::Absent,
            default_batch: None, // None = current year
        }
    }
}

const DEFAULT_FILE: &str = r#"{
    // Portal endpoint and the college roster uploads go to
    // "portal.apiBase": "https://placements.example.edu",
    // "portal.collegeId": "",
    "portal.timeoutSecs": 60,

    // CGPA of exactly 0: "absent" (treated as blank, legacy) or "value"
    "upload.zeroCgpa": "absent"

    // Batch year for rows without one (defaults to the current year)
    // "upload.defaultBatch": 2026
}
"#;

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        crate::config_dir().join("settings.json")
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load from a specific file. Missing file → defaults; unreadable or
    /// malformed file → warning and defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("Error parsing {}: {}; using default settings", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Error reading {}: {}; using default settings", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse settings JSON, allowing whole-line `//` comments.
    pub fn parse(contents: &str) -> Result<Self, String> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        serde_json::from_str(&cleaned).map_err(|e| e.to_string())
    }

    /// Write the commented default file unless one already exists.
    /// Returns true if a file was written.
    pub fn create_default_file(path: &Path) -> Result<bool, String> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Error creating config directory: {}", e))?;
        }
        fs::write(path, DEFAULT_FILE)
            .map_err(|e| format!("Error writing default settings.json: {}", e))?;
        Ok(true)
    }

    /// Validation/normalization knobs derived from these settings.
    pub fn import_options(&self) -> ImportOptions {
        let options = ImportOptions::new().with_zero_cgpa(self.zero_cgpa);
        match self.default_batch {
            Some(year) => options.with_default_batch(year),
            None => options,
        }
    }

    /// Get the config file path for display
    pub fn config_path_display() -> String {
        Self::config_path().to_string_lossy().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_parses_to_defaults() {
        let parsed = Settings::parse(DEFAULT_FILE).unwrap();
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn test_parse_dotted_keys() {
        let json = r#"{
            "portal.apiBase": "https://placements.example.edu",
            "portal.collegeId": "col_42",
            "upload.zeroCgpa": "value",
            "upload.defaultBatch": 2027
        }"#;
        let s = Settings::parse(json).unwrap();
        assert_eq!(s.api_base.as_deref(), Some("https://placements.example.edu"));
        assert_eq!(s.college_id.as_deref(), Some("col_42"));
        assert_eq!(s.timeout_secs, 60);
        assert_eq!(s.zero_cgpa, ZeroCgpa::Value);

        let opts = s.import_options();
        assert_eq!(opts.zero_cgpa, ZeroCgpa::Value);
        assert_eq!(opts.default_batch, 2027);
    }

    #[test]
    fn test_bad_enum_value_is_an_error() {
        assert!(Settings::parse(r#"{"upload.zeroCgpa": "maybe"}"#).is_err());
    }

    #[test]
    fn test_load_from_missing_and_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        assert_eq!(Settings::load_from(&path), Settings::default());

        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_effective_settings_read_back() {
        // `placement config` prints this; pasting it into settings.json must mean the same
        let settings = Settings {
            college_id: Some("col_7".into()),
            timeout_secs: 15,
            ..Settings::default()
        };
        let shown = serde_json::to_string_pretty(&settings).unwrap();
        assert!(!shown.contains("portal.apiBase"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, format!("// pasted\n{}", shown)).unwrap();
        assert_eq!(Settings::load_from(&path), settings);
    }

    #[test]
    fn test_create_default_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        assert!(Settings::create_default_file(&path).unwrap());
        assert!(!Settings::create_default_file(&path).unwrap());
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_config_path_under_placement_dir() {
        let path = Settings::config_path_display();
        assert!(path.contains("placement"));
        assert!(path.ends_with("settings.json"));
    }
}
