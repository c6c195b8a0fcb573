//! Settings persistidos en `<plugin_dir>/data.json`.
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;
use obo_core::{ExportError, Settings, SettingsStore};
use serde_json::Value;

use crate::error::VaultError;

#[derive(Debug, Clone)]
pub struct JsonFileSettingsStore {
    path: PathBuf,
}

impl JsonFileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

    pub fn path(&self) -> &Path { &self.path }

    fn read_data(&self) -> Result<Option<Value>, VaultError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(VaultError::io(&self.path, e)),
        };
        if text.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&text).map(Some).map_err(|e| VaultError::json(&self.path, e))
    }
}

impl SettingsStore for JsonFileSettingsStore {
    fn load(&self) -> Result<Settings, ExportError> {
        let data = self.read_data()?;
        debug!("settings:load path={} persisted={}", self.path.display(), data.is_some());
        Settings::from_persisted(data)
    }

    fn save(&mut self, settings: &Settings) -> Result<(), ExportError> {
        let text = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, text).map_err(|e| VaultError::io(&self.path, e))?;
        debug!("settings:save path={}", self.path.display());
        Ok(())
    }
}
