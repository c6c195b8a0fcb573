//! obo-core: exportación del caché de metadatos de notas a un snapshot JSON.
//!
//! Dos etapas síncronas:
//! - `normalize`: reescribe cada nodo span (`position`) como una tupla `pos`.
//! - `snapshot`: ordena las entradas por `frontmatter.created` y escribe el
//!   mapa ordenado en disco.
//!
//! Las capacidades del host (fuente de metadatos, persistencia de settings)
//! se inyectan mediante los traits de `source` y `settings`.
pub mod constants;
pub mod errors;
pub mod export;
pub mod normalize;
pub mod settings;
pub mod snapshot;
pub mod source;

pub use errors::ExportError;
pub use export::{DestinationResolver, ExportReport, Exporter};
pub use normalize::{normalize, normalize_in_place, Normalizer, Span, SpanPolicy};
pub use settings::{InMemorySettingsStore, Settings, SettingsStore};
pub use snapshot::{build_snapshot, write_snapshot, CreatedAt, Snapshot, WriteOptions};
pub use source::{InMemoryMetadataSource, MetadataSource, RecordEntry};
