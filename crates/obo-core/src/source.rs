//! Fuente de metadatos: capacidad inyectada que entrega el caché crudo.
use serde_json::Value;

use crate::errors::ExportError;

/// Par `(id de archivo, registro crudo)`; `None` si el host no tiene datos.
pub type RecordEntry = (String, Option<Value>);

/// Acceso de sólo lectura al caché de metadatos del host.
pub trait MetadataSource {
    /// Devuelve una copia completa del caché, en el orden del host.
    fn list_records(&self) -> Result<Vec<RecordEntry>, ExportError>;
}

impl<S: MetadataSource + ?Sized> MetadataSource for &S {
    fn list_records(&self) -> Result<Vec<RecordEntry>, ExportError> { (**self).list_records() }
}

impl<S: MetadataSource + ?Sized> MetadataSource for Box<S> {
    fn list_records(&self) -> Result<Vec<RecordEntry>, ExportError> { (**self).list_records() }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryMetadataSource {
    pub inner: Vec<RecordEntry>,
}

impl InMemoryMetadataSource {
    pub fn new() -> Self { Self::default() }

    pub fn with_record(mut self, id: impl Into<String>, record: Option<Value>) -> Self {
        self.push(id, record);
        self
    }

    pub fn push(&mut self, id: impl Into<String>, record: Option<Value>) {
        self.inner.push((id.into(), record));
    }
}

impl MetadataSource for InMemoryMetadataSource {
    fn list_records(&self) -> Result<Vec<RecordEntry>, ExportError> { Ok(self.inner.clone()) }
}

impl FromIterator<RecordEntry> for InMemoryMetadataSource {
    fn from_iter<I: IntoIterator<Item = RecordEntry>>(iter: I) -> Self {
        Self { inner: iter.into_iter().collect() }
    }
}
