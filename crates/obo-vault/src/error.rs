//! Errores de los adaptadores de vault.
//! Se traducen a `ExportError` en la frontera con `obo-core`.

use obo_core::ExportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("Cannot determine base path.")]
    NotFileBased,
    #[error("vault path not configured (set OBO_VAULT_PATH or pass --vault)")]
    MissingVaultPath,
    #[error("io on {path}: {source}")]
    Io { path: String, #[source] source: std::io::Error },
    #[error("invalid json in {path}: {source}")]
    Json { path: String, #[source] source: serde_json::Error },
}

impl VaultError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io { path: path.display().to_string(), source }
    }

    pub(crate) fn json(path: &std::path::Path, source: serde_json::Error) -> Self {
        Self::Json { path: path.display().to_string(), source }
    }
}

impl From<VaultError> for ExportError {
    fn from(err: VaultError) -> Self {
        match err {
            VaultError::NotFileBased | VaultError::MissingVaultPath => Self::Configuration(err.to_string()),
            VaultError::Io { source, .. } => Self::Io(source),
            VaultError::Json { source, .. } => Self::Serialization(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_path_errors_become_configuration() {
        let err: ExportError = VaultError::NotFileBased.into();
        assert_eq!(err.to_string(), "configuration: Cannot determine base path.");
        let err: ExportError = VaultError::MissingVaultPath.into();
        assert!(matches!(err, ExportError::Configuration(_)));
    }

    #[test]
    fn io_keeps_source_kind() {
        let err = VaultError::io(std::path::Path::new("/x"), std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(err.to_string().starts_with("io on /x:"));
        let err: ExportError = err.into();
        assert!(matches!(err, ExportError::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
    }
}
