use obo_core::ExportError;
use obo_vault::VaultError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Uso: {0}")]
    Usage(String),
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl From<VaultError> for AppError {
    fn from(err: VaultError) -> Self { Self::Export(err.into()) }
}

impl AppError {
    /// 2 uso, 3 configuración, 4 datos de entrada, 5 IO.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            Self::Export(ExportError::Configuration(_)) => 3,
            Self::Export(ExportError::Structural { .. } | ExportError::Serialization(_) | ExportError::Settings(_)) => 4,
            Self::Export(ExportError::Io(_)) => 5,
        }
    }
}
