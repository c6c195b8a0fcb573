//! Constantes compartidas del exportador.
//!
//! Las rutas replican el layout de un plugin dentro del directorio de
//! configuración del vault: `<vault>/<config_dir>/plugins/<PLUGIN_ID>/`.

/// Identificador del plugin; nombre del directorio bajo `plugins/`.
pub const PLUGIN_ID: &str = "obo-exporter";

/// Nombre del archivo de snapshot generado por la exportación.
pub const CACHE_FILE_NAME: &str = "cache.json";

/// Nombre del archivo donde se persisten los settings del plugin.
pub const SETTINGS_FILE_NAME: &str = "data.json";

/// Directorio de configuración por defecto del vault.
pub const DEFAULT_CONFIG_DIR: &str = ".obsidian";

/// Campo que marca un nodo span en el caché crudo.
pub const POSITION_KEY: &str = "position";

/// Campo que reemplaza a `position` tras la normalización.
pub const POS_KEY: &str = "pos";
