//! Escritura del snapshot en disco.
//!
//! Se escribe primero un archivo temporal hermano del destino y luego se
//! renombra encima, de modo que un fallo a mitad de camino no deja el destino
//! truncado (en sistemas donde `rename` es atómico dentro del mismo
//! directorio).
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;

use super::Snapshot;
use crate::errors::ExportError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// JSON indentado en lugar de compacto.
    pub pretty: bool,
}

/// Escribe el snapshot en formato compacto. Devuelve los bytes escritos.
pub fn write_snapshot(snapshot: &Snapshot, destination: &Path) -> Result<u64, ExportError> {
    write_snapshot_with(snapshot, destination, WriteOptions::default())
}

pub fn write_snapshot_with(snapshot: &Snapshot, destination: &Path, options: WriteOptions) -> Result<u64, ExportError> {
    let bytes = snapshot.to_json_bytes(options)?;
    let tmp = temp_path(destination)?;
    debug!("write_snapshot:start dest={} tmp={} bytes={}", destination.display(), tmp.display(), bytes.len());

    if let Err(e) = write_file(&tmp, &bytes).and_then(|_| fs::rename(&tmp, destination)) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    debug!("write_snapshot:done dest={}", destination.display());
    Ok(bytes.len() as u64)
}

fn write_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn temp_path(destination: &Path) -> io::Result<PathBuf> {
    let name = destination.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, format!("destination has no file name: {}", destination.display()))
    })?;
    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(name);
    tmp_name.push(".tmp");
    Ok(destination.with_file_name(tmp_name))
}
