// Configuration loading

pub mod settings;

pub use settings::Settings;

/// Portal used when nothing else is configured (local dev server).
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Directory holding settings.json and auth.json.
pub fn config_dir() -> std::path::PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("placement")
}
