//! Carga de configuración desde variables de entorno.
//! Usa `OBO_VAULT_PATH`, `OBO_CONFIG_DIR` y `OBO_PRETTY`.

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;
use obo_core::constants::DEFAULT_CONFIG_DIR;
use once_cell::sync::Lazy;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultConfig {
    /// Directorio base del vault; `None` si no se configuró.
    pub vault_path: Option<PathBuf>,
    /// Directorio de configuración dentro del vault.
    pub config_dir: String,
    /// Snapshot indentado.
    pub pretty: bool,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self { vault_path: None, config_dir: DEFAULT_CONFIG_DIR.to_string(), pretty: false }
    }
}

impl VaultConfig {
    pub fn from_env() -> Self {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con un lookup arbitrario (tests).
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let vault_path = lookup("OBO_VAULT_PATH").filter(|v| !v.trim().is_empty()).map(PathBuf::from);
        let config_dir = lookup("OBO_CONFIG_DIR")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CONFIG_DIR.to_string());
        let pretty = lookup("OBO_PRETTY").map(|v| matches!(v.trim(), "1" | "true" | "yes")).unwrap_or(false);
        Self { vault_path, config_dir, pretty }
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() { Lazy::force(&DOTENV_LOADED); }
