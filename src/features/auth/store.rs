//! Persistence for the single bearer credential. The store has no business
//! logic: it writes, reads and removes one value under a fixed key. Callers
//! that mutate it must notify the session context so the auth flag is
//! recomputed.

use crate::errors::AppError;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};
use tracing::{debug, instrument};

/// Slot holding zero or one credential.
pub trait CredentialStore: Send + Sync {
    /// Persists `token`, overwriting any existing value.
    fn set(&self, token: &SecretString) -> Result<(), AppError>;

    /// Returns the persisted token, if any. A blank value reads as absent.
    fn get(&self) -> Result<Option<SecretString>, AppError>;

    /// Removes the persisted token. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), AppError>;

    /// Convenience presence check used by the navigator.
    fn has_credential(&self) -> Result<bool, AppError> {
        Ok(self.get()?.is_some())
    }
}

/// Durable key-value file, one JSON object per user profile directory.
///
/// The token lives under `key`; any other keys in the file are left alone so
/// the file can be shared with other client settings.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    key: String,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>, AppError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => return Err(unavailable(&self.path, &err)),
        };
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(AppError::StorageUnavailable(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
            Err(err) => Err(unavailable(&self.path, &err)),
        }
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| unavailable(parent, &err))?;
        }
        let payload = serde_json::to_string_pretty(map)
            .map_err(|err| AppError::Serialization(format!("Failed to encode storage: {err}")))?;

        // Rename over the target so readers never observe a half-written file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, payload).map_err(|err| unavailable(&tmp, &err))?;
        fs::rename(&tmp, &self.path).map_err(|err| unavailable(&self.path, &err))
    }
}

impl CredentialStore for FileStore {
    #[instrument(skip_all, fields(path = %self.path.display()))]
    fn set(&self, token: &SecretString) -> Result<(), AppError> {
        let mut map = self.read_map()?;
        map.insert(
            self.key.clone(),
            Value::String(token.expose_secret().to_string()),
        );
        self.write_map(&map)?;
        debug!("credential persisted");
        Ok(())
    }

    fn get(&self) -> Result<Option<SecretString>, AppError> {
        let map = self.read_map()?;
        Ok(map
            .get(&self.key)
            .and_then(Value::as_str)
            .filter(|token| !token.trim().is_empty())
            .map(|token| SecretString::from(token.to_string())))
    }

    #[instrument(skip_all, fields(path = %self.path.display()))]
    fn clear(&self) -> Result<(), AppError> {
        let mut map = self.read_map()?;
        if map.remove(&self.key).is_none() {
            return Ok(());
        }
        self.write_map(&map)?;
        debug!("credential removed");
        Ok(())
    }
}

/// In-process store for tests and sessions that must not touch disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<SecretString>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            slot: Mutex::new(Some(SecretString::from(token.to_string()))),
        }
    }
}

impl CredentialStore for MemoryStore {
    fn set(&self, token: &SecretString) -> Result<(), AppError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        Ok(())
    }

    fn get(&self) -> Result<Option<SecretString>, AppError> {
        Ok(self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .filter(|token| !token.expose_secret().trim().is_empty()))
    }

    fn clear(&self) -> Result<(), AppError> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).take();
        Ok(())
    }
}

fn unavailable(path: &Path, err: &dyn std::fmt::Display) -> AppError {
    AppError::StorageUnavailable(format!("{}: {err}", path.display()))
}
