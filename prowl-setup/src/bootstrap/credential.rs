//! Credential store
//!
//! The API key lives in a plain `KEY=value` env file shared with the
//! container that runs the service. It is generated on the first run and
//! reused on every run after that.

use prowl_core::domain::credential::ApiKey;
use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::BootstrapError;

/// Env-file backed API key storage
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
    key_name: String,
}

impl CredentialStore {
    /// # Arguments
    /// * `path` - Env file to read from and append to
    /// * `key_name` - Variable holding the key (e.g., "PROWLARR_API_KEY")
    pub fn new(path: impl Into<PathBuf>, key_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key_name: key_name.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored key, if any
    ///
    /// A missing file or an empty value both count as "no key". When the
    /// variable appears more than once, the last assignment wins.
    pub fn load(&self) -> Result<Option<ApiKey>, BootstrapError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let entries = dotenvy::from_path_iter(&self.path).map_err(|source| {
            BootstrapError::EnvFile {
                path: self.path.clone(),
                source,
            }
        })?;

        let mut found = None;
        for entry in entries {
            let (key, value) = entry.map_err(|source| BootstrapError::EnvFile {
                path: self.path.clone(),
                source,
            })?;
            if key == self.key_name {
                found = Some(ApiKey::new(value));
            }
        }

        Ok(found.filter(|key| !key.is_empty()))
    }

    /// Return the stored key, generating and persisting one if needed
    pub fn ensure(&self) -> Result<ApiKey, BootstrapError> {
        if let Some(key) = self.load()? {
            debug!("Reusing API key from {}", self.path.display());
            return Ok(key);
        }

        let key = ApiKey::generate();
        self.append(&key)?;
        info!(
            "Generated new API key and stored it as {} in {}",
            self.key_name,
            self.path.display()
        );

        Ok(key)
    }

    fn append(&self, key: &ApiKey) -> Result<(), BootstrapError> {
        let io_err = |source| BootstrapError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;

        let mut existing = String::new();
        file.read_to_string(&mut existing).map_err(io_err)?;

        let separator = if existing.is_empty() || existing.ends_with('\n') {
            ""
        } else {
            "\n"
        };

        writeln!(file, "{}{}={}", separator, self.key_name, key.as_str()).map_err(io_err)?;

        Ok(())
    }
}
