//! Settings loader

use crate::config::Settings;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Loader for parser settings files
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Settings> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Settings(format!("Failed to read settings file: {}", e)))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match ext {
            "json" => Self::from_json(&content),
            "toml" => Self::from_toml(&content),
            _ => Err(Error::Settings(format!("Unknown settings format: {}", ext))),
        }
    }

    /// Parse JSON settings
    pub fn from_json(content: &str) -> Result<Settings> {
        serde_json::from_str(content)
            .map_err(|e| Error::Settings(format!("Invalid JSON: {}", e)))
    }

    /// Parse TOML settings
    pub fn from_toml(content: &str) -> Result<Settings> {
        toml::from_str(content)
            .map_err(|e| Error::Settings(format!("Invalid TOML: {}", e)))
    }

    /// Per-user settings location, e.g. `~/.config/sitefile/settings.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sitefile").join("settings.toml"))
    }

    /// Load from an explicit path, else from [`Self::default_path`] if that
    /// file exists, else fall back to [`Settings::default`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Settings> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => {
                tracing::debug!("Loading settings from {}", path.display());
                Self::load(path)
            }
            _ => Ok(Settings::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_toml_loading() {
        let settings = SettingsLoader::from_toml(
            r#"
            default_port = "2015"
            middleware = ["cors", "jwt"]
            "#,
        )
        .unwrap();
        assert_eq!(settings.default_host, "localhost");
        assert_eq!(settings.default_port, "2015");
        assert_eq!(settings.middleware, vec!["cors", "jwt"]);
    }

    #[test]
    fn test_json_loading() {
        let settings = SettingsLoader::from_json(r#"{"default_host": "0.0.0.0"}"#).unwrap();
        assert_eq!(settings.default_host, "0.0.0.0");
        assert_eq!(settings.default_port, "8080");
    }

    #[test]
    fn test_invalid_toml() {
        let err = SettingsLoader::from_toml("middleware = 3").unwrap_err();
        assert!(matches!(err, Error::Settings(_)));
    }

    #[test]
    fn test_load_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "middleware = [\"cors\"]").unwrap();
        let settings = SettingsLoader::load(file.path()).unwrap();
        assert_eq!(settings.middleware, vec!["cors"]);

        let other = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        let err = SettingsLoader::load(other.path()).unwrap_err();
        assert!(err.to_string().contains("Unknown settings format"));
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let err = SettingsLoader::load_or_default(Some(Path::new("/nonexistent/settings.toml")))
            .unwrap_err();
        assert!(matches!(err, Error::Settings(_)));
    }
}
