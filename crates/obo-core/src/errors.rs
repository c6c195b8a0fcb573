//! Errores del exportador.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    /// No se puede determinar la ruta base del destino (vault no basado en archivos).
    #[error("configuration: {0}")]
    Configuration(String),
    /// Un nodo tiene `position` pero sin la forma `{start, end}` esperada.
    #[error("malformed position at {path}: {reason}")]
    Structural { path: String, reason: String },
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("settings: {0}")]
    Settings(String),
}

impl ExportError {
    pub(crate) fn structural(path: &str, reason: impl Into<String>) -> Self {
        let path = if path.is_empty() { "/".to_string() } else { path.to_string() };
        Self::Structural { path, reason: reason.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_uses_root_pointer_when_path_empty() {
        let err = ExportError::structural("", "missing start");
        assert_eq!(err.to_string(), "malformed position at /: missing start");
    }

    #[test]
    fn io_variant_from() {
        let err: ExportError = std::io::Error::other("disk full").into();
        assert_eq!(err.to_string(), "io: disk full");
    }

    #[test]
    fn configuration_variant_format() {
        let err = ExportError::Configuration("Cannot determine base path.".into());
        assert_eq!(err.to_string(), "configuration: Cannot determine base path.");
    }
}
