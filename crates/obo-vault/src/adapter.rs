//! Layout del vault en disco.
//!
//! El snapshot y los settings viven en
//! `<base>/<config_dir>/plugins/obo-exporter/`. Sólo un vault respaldado por
//! el sistema de archivos tiene ruta base; cualquier otro backend produce un
//! error de configuración.
use std::path::{Path, PathBuf};

use obo_core::constants::{CACHE_FILE_NAME, PLUGIN_ID, SETTINGS_FILE_NAME};
use obo_core::export::DestinationResolver;
use obo_core::ExportError;

use crate::config::VaultConfig;
use crate::error::VaultError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultAdapter {
    FileSystem { base_path: PathBuf },
    /// Backend sin ruta en disco (p. ej. almacenamiento en memoria o remoto).
    Detached,
}

impl VaultAdapter {
    pub fn base_path(&self) -> Result<&Path, VaultError> {
        match self {
            Self::FileSystem { base_path } => Ok(base_path),
            Self::Detached => Err(VaultError::NotFileBased),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultLayout {
    pub adapter: VaultAdapter,
    pub config_dir: String,
}

impl VaultLayout {
    pub fn new(adapter: VaultAdapter, config_dir: impl Into<String>) -> Self {
        Self { adapter, config_dir: config_dir.into() }
    }

    /// Layout a partir de la configuración; falla si no hay ruta de vault.
    pub fn from_config(config: &VaultConfig) -> Result<Self, VaultError> {
        let base_path = config.vault_path.clone().ok_or(VaultError::MissingVaultPath)?;
        Ok(Self::new(VaultAdapter::FileSystem { base_path }, config.config_dir.clone()))
    }

    pub fn plugin_dir(&self) -> Result<PathBuf, VaultError> {
        Ok(self.adapter.base_path()?.join(&self.config_dir).join("plugins").join(PLUGIN_ID))
    }

    pub fn cache_path(&self) -> Result<PathBuf, VaultError> {
        Ok(self.plugin_dir()?.join(CACHE_FILE_NAME))
    }

    pub fn settings_path(&self) -> Result<PathBuf, VaultError> {
        Ok(self.plugin_dir()?.join(SETTINGS_FILE_NAME))
    }
}

impl DestinationResolver for VaultLayout {
    fn destination(&self) -> Result<PathBuf, ExportError> {
        Ok(self.cache_path()?)
    }
}
