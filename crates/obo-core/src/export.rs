//! Orquestación de una exportación completa:
//! fuente → normalización → snapshot ordenado → escritura.
//!
//! Todo falla o todo se escribe: el snapshot se arma entero en memoria antes
//! de tocar el destino.
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::errors::ExportError;
use crate::normalize::{Normalizer, SpanPolicy};
use crate::snapshot::{build_snapshot, write_snapshot_with, Snapshot, WriteOptions};
use crate::source::MetadataSource;

/// Resuelve la ruta de destino del snapshot.
pub trait DestinationResolver {
    fn destination(&self) -> Result<PathBuf, ExportError>;
}

impl DestinationResolver for Path {
    fn destination(&self) -> Result<PathBuf, ExportError> { Ok(self.to_path_buf()) }
}

impl DestinationResolver for PathBuf {
    fn destination(&self) -> Result<PathBuf, ExportError> { Ok(self.clone()) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub destination: PathBuf,
    pub entries: usize,
    pub empty_entries: usize,
    pub bytes_written: u64,
}

pub struct Exporter<S> {
    source: S,
    normalizer: Normalizer,
    options: WriteOptions,
}

impl<S: MetadataSource> Exporter<S> {
    pub fn new(source: S) -> Self {
        Self { source, normalizer: Normalizer::default(), options: WriteOptions::default() }
    }

    pub fn with_policy(mut self, policy: SpanPolicy) -> Self {
        self.normalizer = Normalizer::new(policy);
        self
    }

    pub fn with_write_options(mut self, options: WriteOptions) -> Self {
        self.options = options;
        self
    }

    pub fn source(&self) -> &S { &self.source }

    /// Toma una copia del caché, normaliza cada registro y ordena.
    pub fn build(&self) -> Result<Snapshot, ExportError> {
        let records = self.source.list_records()?;
        debug!("export:build records={}", records.len());
        let mut normalized = Vec::with_capacity(records.len());
        for (id, record) in records {
            let record = match record {
                Some(raw) => Some(self.normalizer.normalize(&raw).map_err(|e| in_record(e, &id))?),
                None => None,
            };
            normalized.push((id, record));
        }
        Ok(build_snapshot(normalized))
    }

    pub fn export_to(&self, destination: &Path) -> Result<ExportReport, ExportError> {
        let snapshot = self.build()?;
        let bytes_written = write_snapshot_with(&snapshot, destination, self.options)?;
        let report = ExportReport {
            destination: destination.to_path_buf(),
            entries: snapshot.len(),
            empty_entries: snapshot.empty_count(),
            bytes_written,
        };
        info!(
            "export:done dest={} entries={} empty={} bytes={}",
            report.destination.display(),
            report.entries,
            report.empty_entries,
            report.bytes_written
        );
        Ok(report)
    }

    /// Resuelve el destino antes de leer la fuente; un error de
    /// configuración aborta sin trabajo previo.
    pub fn export<R: DestinationResolver + ?Sized>(&self, resolver: &R) -> Result<ExportReport, ExportError> {
        let destination = resolver.destination()?;
        self.export_to(&destination)
    }
}

/// Prefija el id del archivo al pointer de un error estructural.
fn in_record(err: ExportError, id: &str) -> ExportError {
    match err {
        ExportError::Structural { path, reason } => ExportError::Structural { path: format!("{id}#{path}"), reason },
        other => other,
    }
}
