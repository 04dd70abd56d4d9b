//! JSON persistence for settings

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::Result;

/// File extension for persisted settings
pub const CONFIG_FILE_EXTENSION: &str = "json";

/// Directory of settings documents, one pretty-printed JSON file per key
#[derive(Clone, Debug)]
pub struct ConfigStore {
    base_dir: PathBuf,
}

impl ConfigStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: base_dir.into() }
    }

    /// Path of the document stored under `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir.join(key).with_extension(CONFIG_FILE_EXTENSION)
    }

    /// Load the document stored under `key`, or `None` if it was never saved
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    /// Save `value` under `key`
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        std::fs::create_dir_all(&self.base_dir)?;
        std::fs::write(self.path_for(key), json)?;
        Ok(())
    }
}
