//! Fuente de metadatos leída de un volcado JSON del caché del host.
//!
//! Formato esperado:
//! ```json
//! {
//!   "fileCache": { "Note.md": { "hash": "abc", "mtime": 1, "size": 10 } },
//!   "metadataCache": { "abc": { "frontmatter": { "created": "2020-01-01" } } }
//! }
//! ```
//! Cada archivo de `fileCache` produce una entrada; sin hash (o con un hash
//! ausente de `metadataCache`) la entrada es `null`.
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use log::warn;
use obo_core::source::{MetadataSource, RecordEntry};
use obo_core::ExportError;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::VaultError;

#[derive(Debug, Clone, Default, Deserialize)]
struct FileCacheEntry {
    #[serde(default)]
    hash: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheDump {
    #[serde(default)]
    file_cache: IndexMap<String, FileCacheEntry>,
    #[serde(default)]
    metadata_cache: Map<String, Value>,
}

#[derive(Debug, Clone, Default)]
pub struct CacheDumpSource {
    dump: CacheDump,
}

impl CacheDumpSource {
    pub fn from_path(path: &Path) -> Result<Self, VaultError> {
        let text = fs::read_to_string(path).map_err(|e| VaultError::io(path, e))?;
        let dump = serde_json::from_str(&text).map_err(|e| VaultError::json(path, e))?;
        Ok(Self { dump })
    }

    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        Ok(Self { dump: serde_json::from_value(value)? })
    }

    pub fn file_count(&self) -> usize { self.dump.file_cache.len() }
}

impl MetadataSource for CacheDumpSource {
    fn list_records(&self) -> Result<Vec<RecordEntry>, ExportError> {
        let records = self
            .dump
            .file_cache
            .iter()
            .map(|(file, entry)| {
                let record = match entry.hash.as_deref().filter(|h| !h.is_empty()) {
                    Some(hash) => {
                        let found = self.dump.metadata_cache.get(hash).cloned();
                        if found.is_none() {
                            warn!("cache_dump: hash {hash} for {file} missing from metadataCache");
                        }
                        found
                    }
                    None => None,
                };
                (file.clone(), record)
            })
            .collect();
        Ok(records)
    }
}
