use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_DIR: &str = "arcade-calculator";

/// Runtime settings. Every field has a default so partial TOML files work.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Year token a badge's earned label must contain to count.
    pub season: String,
    /// A profile URL must contain one of these substrings.
    pub profile_hosts: Vec<String>,
    pub catalog_url: String,
    /// Origin that relative catalog links are resolved against.
    pub catalog_base_url: String,
    pub request_timeout_seconds: u64,
    pub catalog_ttl_seconds: u64,
    pub history_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            season: "2026".to_string(),
            profile_hosts: vec![
                "cloudskillsboost.google".to_string(),
                "skills.google".to_string(),
            ],
            catalog_url: "https://go.cloudskillsboost.google/arcade".to_string(),
            catalog_base_url: "https://go.cloudskillsboost.google".to_string(),
            request_timeout_seconds: 15,
            catalog_ttl_seconds: 60 * 60,
            history_path: None,
        }
    }
}

impl AppConfig {
    /// `<config dir>/arcade-calculator/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Load from an explicit path (must exist) or the default location
    /// (falls back to built-in defaults when absent).
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match path {
            Some(p) => Self::load_from_file(p)?,
            None => match Self::default_path() {
                Some(p) if p.exists() => Self::load_from_file(&p)?,
                _ => {
                    tracing::warn!("Configuration file not found, using defaults");
                    Self::default()
                }
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading config {}: {e}", path.display()))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.season.is_empty() || !self.season.chars().all(|c| c.is_ascii_digit()) {
            anyhow::bail!("Season must be a year such as \"2026\", got {:?}", self.season);
        }
        if self.profile_hosts.iter().all(|h| h.trim().is_empty()) {
            anyhow::bail!("At least one profile host is required");
        }
        if self.catalog_url.is_empty() {
            anyhow::bail!("Catalog URL cannot be empty");
        }
        if self.request_timeout_seconds == 0 {
            anyhow::bail!("Request timeout must be greater than 0");
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn catalog_ttl(&self) -> Duration {
        Duration::from_secs(self.catalog_ttl_seconds)
    }

    /// Where visited profiles are stored, if a location can be determined.
    pub fn history_file(&self) -> Option<PathBuf> {
        self.history_path
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join(APP_DIR).join("profiles.json")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let cfg = AppConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.season, "2026");
        assert_eq!(cfg.request_timeout(), Duration::from_secs(15));
        assert_eq!(cfg.catalog_ttl(), Duration::from_secs(3600));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = AppConfig::from_toml_str("season = \"2027\"\nprofile_hosts = [\"127.0.0.1\"]\n")
            .unwrap();
        assert_eq!(cfg.season, "2027");
        assert_eq!(cfg.profile_hosts, vec!["127.0.0.1".to_string()]);
        assert_eq!(cfg.catalog_url, AppConfig::default().catalog_url);
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut cfg = AppConfig {
            season: "next year".into(),
            ..AppConfig::default()
        };
        assert!(cfg.validate().is_err());
        cfg.season = "2026".into();
        cfg.profile_hosts = vec![" ".into()];
        assert!(cfg.validate().is_err());
        cfg.profile_hosts = vec!["skills.google".into()];
        cfg.request_timeout_seconds = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn explicit_path_loads_and_validates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "request_timeout_seconds = 3").unwrap();
        let cfg = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(cfg.request_timeout_seconds, 3);

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        writeln!(bad, "season = \"\"").unwrap();
        assert!(AppConfig::load(Some(bad.path())).is_err());
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        assert!(AppConfig::load(Some(Path::new("/nonexistent/arcade.toml"))).is_err());
    }

    #[test]
    fn history_path_override() {
        let cfg = AppConfig {
            history_path: Some(PathBuf::from("/tmp/p.json")),
            ..AppConfig::default()
        };
        assert_eq!(cfg.history_file(), Some(PathBuf::from("/tmp/p.json")));
    }
}
