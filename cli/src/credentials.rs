//! Plaintext credential store for the CLI.
//!
//! Credentials live in a single `[polr]` table of a TOML file under the
//! user's config directory, e.g. `~/.config/polr/credentials.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polr_core::DEFAULT_API_ROOT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub server: String,
    pub key: String,
    #[serde(default = "default_root")]
    pub root: String,
}

fn default_root() -> String {
    DEFAULT_API_ROOT.to_string()
}

#[derive(Serialize, Deserialize)]
struct CredentialsFile {
    polr: Credentials,
}

pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the user config directory, if the platform has one.
    pub fn default_location() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join("polr").join("credentials.toml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored credentials, or `None` when nothing has been saved.
    pub fn load(&self) -> Result<Option<Credentials>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let file: CredentialsFile = toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), "loaded credentials");
        Ok(Some(file.polr))
    }

    pub fn save(&self, credentials: &Credentials) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let content = toml::to_string(&CredentialsFile {
            polr: credentials.clone(),
        })?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), "saved credentials");
        Ok(())
    }

    /// Remove the stored credentials. Returns whether a file was removed.
    pub fn clear(&self) -> Result<bool> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => {
                Err(e).with_context(|| format!("failed to remove {}", self.path.display()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials {
            server: "https://ti.ny".to_string(),
            key: "secret".to_string(),
            root: "/api/v2/".to_string(),
        }
    }

    #[test]
    fn load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("credentials.toml"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("nested").join("credentials.toml"));
        store.save(&creds()).unwrap();
        assert_eq!(store.load().unwrap(), Some(creds()));

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.starts_with("[polr]"), "{raw}");
    }

    #[test]
    fn root_defaults_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.toml");
        std::fs::write(&path, "[polr]\nserver = \"https://ti.ny\"\nkey = \"k\"\n").unwrap();
        let loaded = CredentialStore::new(path).load().unwrap().unwrap();
        assert_eq!(loaded.root, DEFAULT_API_ROOT);
    }

    #[test]
    fn clear_removes_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("credentials.toml"));
        store.save(&creds()).unwrap();
        assert!(store.clear().unwrap());
        assert!(!store.clear().unwrap());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.toml");
        std::fs::write(&path, "not = [valid").unwrap();
        assert!(CredentialStore::new(path).load().is_err());
    }
}
