//! Saved portal login.
//!
//! One JSON file, `<config dir>/placement/auth.json`, written by
//! `placement login` and read by `placement upload`. Credentials are checked
//! on the way in and on the way out, so a hand-edited or truncated file is
//! reported instead of silently treated as "not logged in".

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Bearer token plus where it is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthCredentials {
    pub token: String,
    /// Portal base URL, e.g. `https://placements.example.edu`
    pub api_base: String,
    /// Default college for uploads made with this token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub college_id: Option<String>,
}

impl AuthCredentials {
    pub fn new(token: String, api_base: String) -> Self {
        Self { token, api_base, college_id: None }
    }

    /// Reject credentials that could never produce a working upload.
    pub fn validate(&self) -> Result<(), AuthError> {
        let token = self.token.trim();
        if token.is_empty() {
            return Err(AuthError::Invalid("token is empty".into()));
        }
        if token.chars().any(char::is_whitespace) {
            return Err(AuthError::Invalid("token contains whitespace".into()));
        }
        let base = self.api_base.trim();
        if !(base.starts_with("https://") || base.starts_with("http://")) {
            return Err(AuthError::Invalid(format!(
                "portal URL '{}' must start with http:// or https://",
                self.api_base
            )));
        }
        if let Some(college) = &self.college_id {
            if college.trim().is_empty() || college.contains('/') {
                return Err(AuthError::Invalid(format!("college id '{}' is not valid", college)));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No per-user config directory on this platform
    NoConfigDir,
    /// Credentials rejected before saving
    Invalid(String),
    /// File exists but does not hold usable credentials
    Corrupt { path: PathBuf, message: String },
    Io(String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::NoConfigDir => write!(f, "Could not determine config directory"),
            AuthError::Invalid(msg) => write!(f, "Invalid credentials: {}", msg),
            AuthError::Corrupt { path, message } => {
                write!(f, "Saved login at {} is unreadable: {}", path.display(), message)
            }
            AuthError::Io(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

pub fn auth_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|c| c.join("placement").join("auth.json"))
}

/// Saved credentials, `Ok(None)` when nobody has logged in.
pub fn load_auth() -> Result<Option<AuthCredentials>, AuthError> {
    match auth_file_path() {
        Some(path) => load_auth_from(&path),
        None => Ok(None),
    }
}

pub fn load_auth_from(path: &Path) -> Result<Option<AuthCredentials>, AuthError> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(AuthError::Io(format!("Failed to read {}: {}", path.display(), e))),
    };

    let corrupt = |message: String| AuthError::Corrupt { path: path.to_path_buf(), message };
    let creds: AuthCredentials = serde_json::from_str(&contents).map_err(|e| corrupt(e.to_string()))?;
    creds.validate().map_err(|e| corrupt(e.to_string()))?;

    log::debug!("loaded saved login for {} from {}", creds.api_base, path.display());
    Ok(Some(creds))
}

/// Validate and write credentials; returns the file written.
pub fn save_auth(creds: &AuthCredentials) -> Result<PathBuf, AuthError> {
    let path = auth_file_path().ok_or(AuthError::NoConfigDir)?;
    save_auth_to(&path, creds)?;
    Ok(path)
}

/// Write credentials to `path`, owner-only on Unix.
pub fn save_auth_to(path: &Path, creds: &AuthCredentials) -> Result<(), AuthError> {
    creds.validate()?;

    let creds = AuthCredentials {
        token: creds.token.trim().to_string(),
        api_base: creds.api_base.trim().trim_end_matches('/').to_string(),
        college_id: creds.college_id.as_ref().map(|c| c.trim().to_string()),
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AuthError::Io(format!("Failed to create config directory: {}", e)))?;
    }

    let contents = serde_json::to_string_pretty(&creds)
        .map_err(|e| AuthError::Io(format!("Failed to serialize credentials: {}", e)))?;

    let mut file = open_private(path)
        .map_err(|e| AuthError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
    file.write_all(contents.as_bytes())
        .and_then(|_| file.write_all(b"\n"))
        .map_err(|e| AuthError::Io(format!("Failed to write {}: {}", path.display(), e)))?;

    log::info!("saved login for {} to {}", creds.api_base, path.display());
    Ok(())
}

#[cfg(unix)]
fn open_private(path: &Path) -> io::Result<fs::File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies on create; tighten a file left by an older login too
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> io::Result<fs::File> {
    fs::File::create(path)
}

/// Forget the saved login. `Ok(false)` when there was none.
pub fn delete_auth() -> Result<bool, AuthError> {
    match auth_file_path() {
        Some(path) => delete_auth_at(&path),
        None => Ok(false),
    }
}

pub fn delete_auth_at(path: &Path) -> Result<bool, AuthError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(AuthError::Io(format!("Failed to delete {}: {}", path.display(), e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn creds() -> AuthCredentials {
        AuthCredentials {
            token: "tok_abc123".into(),
            api_base: "https://placements.example.edu".into(),
            college_id: Some("col_42".into()),
        }
    }

    #[test]
    fn test_save_load_delete() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("placement").join("auth.json");

        assert_eq!(load_auth_from(&path).unwrap(), None);

        save_auth_to(&path, &creds()).unwrap();
        assert_eq!(load_auth_from(&path).unwrap(), Some(creds()));

        assert!(delete_auth_at(&path).unwrap());
        assert!(!path.exists());
        assert!(!delete_auth_at(&path).unwrap());
        assert_eq!(load_auth_from(&path).unwrap(), None);
    }

    #[test]
    fn test_save_tidies_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("auth.json");

        let messy = AuthCredentials {
            token: "  tok_abc123\n".into(),
            api_base: "https://placements.example.edu/".into(),
            college_id: None,
        };
        save_auth_to(&path, &messy).unwrap();

        let loaded = load_auth_from(&path).unwrap().unwrap();
        assert_eq!(loaded.token, "tok_abc123");
        assert_eq!(loaded.api_base, "https://placements.example.edu");
        assert!(!fs::read_to_string(&path).unwrap().contains("college_id"));
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("auth.json");
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        save_auth_to(&path, &creds()).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_invalid_credentials_are_not_saved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("auth.json");

        let cases = [
            AuthCredentials { token: "   ".into(), ..creds() },
            AuthCredentials { token: "tok abc".into(), ..creds() },
            AuthCredentials { api_base: "placements.example.edu".into(), ..creds() },
            AuthCredentials { api_base: "ftp://placements.example.edu".into(), ..creds() },
            AuthCredentials { college_id: Some(" ".into()), ..creds() },
            AuthCredentials { college_id: Some("col/42".into()), ..creds() },
        ];
        for bad in cases {
            let err = save_auth_to(&path, &bad).unwrap_err();
            assert!(matches!(err, AuthError::Invalid(_)), "{:?} gave {:?}", bad, err);
            assert!(!path.exists());
        }
    }

    #[test]
    fn test_unparseable_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("auth.json");

        fs::write(&path, "{\"token\": \"tok_abc").unwrap();
        let err = load_auth_from(&path).unwrap_err();
        assert!(matches!(err, AuthError::Corrupt { .. }));
        assert!(err.to_string().contains("auth.json"));

        fs::write(&path, r#"{"api_base": "https://placements.example.edu"}"#).unwrap();
        assert!(matches!(load_auth_from(&path), Err(AuthError::Corrupt { .. })));
    }

    #[test]
    fn test_hand_edited_file_is_checked() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("auth.json");

        fs::write(&path, r#"{"token": "", "api_base": "https://placements.example.edu"}"#).unwrap();
        let err = load_auth_from(&path).unwrap_err();
        assert!(err.to_string().contains("token is empty"), "{}", err);
    }

    #[test]
    fn test_older_file_without_college() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("auth.json");
        fs::write(&path, r#"{"token": "tok", "api_base": "http://127.0.0.1:8080"}"#).unwrap();

        let loaded = load_auth_from(&path).unwrap().unwrap();
        assert_eq!(loaded, AuthCredentials::new("tok".into(), "http://127.0.0.1:8080".into()));
    }

    #[test]
    fn test_auth_file_path_location() {
        let path = auth_file_path().unwrap();
        assert!(path.ends_with("placement/auth.json"));
    }
}
