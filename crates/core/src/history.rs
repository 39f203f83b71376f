use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// A previously visited profile with its cached header fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedProfile {
    pub name: String,
    pub avatar: String,
    pub url: String,
}

/// Visited profiles, newest first, unique by URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ProfileHistory {
    profiles: Vec<SavedProfile>,
}

impl ProfileHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend `profile` unless its URL is already stored. Returns whether it was added.
    pub fn record(&mut self, profile: SavedProfile) -> bool {
        if self.profiles.iter().any(|p| p.url == profile.url) {
            debug!(url = %profile.url, "Profile already in history");
            return false;
        }
        self.profiles.insert(0, profile);
        true
    }

    pub fn remove(&mut self, url: &str) -> bool {
        let before = self.profiles.len();
        self.profiles.retain(|p| p.url != url);
        self.profiles.len() < before
    }

    pub fn clear(&mut self) {
        self.profiles.clear();
    }

    pub fn entries(&self) -> &[SavedProfile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Load from a JSON file; a missing file is an empty history.
    pub async fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        if !tokio::fs::try_exists(path).await? {
            return Ok(Self::new());
        }
        let content = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    pub async fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}
