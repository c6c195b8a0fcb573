//! obo-vault: adaptadores de sistema de archivos para `obo-core`.
//!
//! - `adapter`: layout del vault y resolución del destino del snapshot.
//! - `cache_dump`: fuente de metadatos a partir de un volcado del caché del host.
//! - `settings_file`: persistencia de settings en `data.json` del plugin.
//! - `config`: configuración desde variables de entorno (`.env`).
pub mod adapter;
pub mod cache_dump;
pub mod config;
pub mod error;
pub mod settings_file;

pub use adapter::{VaultAdapter, VaultLayout};
pub use cache_dump::CacheDumpSource;
pub use config::{init_dotenv, VaultConfig};
pub use error::VaultError;
pub use settings_file::JsonFileSettingsStore;
