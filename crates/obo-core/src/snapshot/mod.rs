//! Snapshot: mapa ordenado `id → registro normalizado | null`.
//!
//! El orden de iteración del mapa es el orden de salida del JSON; se construye
//! con `build_snapshot` (deduplica y ordena por `frontmatter.created`).
pub mod created;
pub mod order;
pub mod writer;

pub use created::CreatedAt;
pub use order::{compare_records, SortKey};
pub use writer::{write_snapshot, write_snapshot_with, WriteOptions};

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ExportError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    entries: IndexMap<String, Option<Value>>,
}

impl Snapshot {
    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// `None` si el id no existe; `Some(None)` si existe sin datos en caché.
    pub fn get(&self, id: &str) -> Option<Option<&Value>> {
        self.entries.get(id).map(Option::as_ref)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    /// Número de entradas sin datos (`null`).
    pub fn empty_count(&self) -> usize {
        self.entries.values().filter(|v| v.is_none()).count()
    }

    pub fn to_json_bytes(&self, options: WriteOptions) -> Result<Vec<u8>, ExportError> {
        let bytes = if options.pretty { serde_json::to_vec_pretty(self)? } else { serde_json::to_vec(self)? };
        Ok(bytes)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ExportError> {
        Ok(serde_json::from_str(text)?)
    }
}

type Keyed = (SortKey, String, Option<Value>);

/// Construye el snapshot a partir de pares `(id, registro)`.
///
/// - Ids repetidos: el primero conserva su posición y gana el último valor.
/// - Un registro `Some(Value::Null)` se trata como ausente.
/// - Orden: ver [`order`]; los empates conservan el orden de entrada.
pub fn build_snapshot<I>(entries: I) -> Snapshot
where
    I: IntoIterator<Item = (String, Option<Value>)>,
{
    let mut dedup: IndexMap<String, Option<Value>> = IndexMap::new();
    for (id, record) in entries {
        dedup.insert(id, record.filter(|v| !v.is_null()));
    }

    let keyed: Vec<Keyed> = dedup
        .into_iter()
        .map(|(id, record)| (SortKey::of(record.as_ref()), id, record))
        .collect();
    let sorted = order::stable_sort_by(keyed, &mut |a: &Keyed, b: &Keyed| {
        order::compare_keys(&a.0, &b.0).unwrap_or(std::cmp::Ordering::Equal)
    });
    debug!("snapshot:sorted entries={}", sorted.len());

    Snapshot { entries: sorted.into_iter().map(|(_, id, record)| (id, record)).collect() }
}
