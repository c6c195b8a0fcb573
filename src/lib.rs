//! obo-exporter
//!
//! Binario `obo` que exporta el caché de metadatos de un vault a
//! `<vault>/<config_dir>/plugins/obo-exporter/cache.json` y administra los
//! settings del plugin.
//! - `cli`: parseo de argumentos y ejecución de comandos.
//! - `errors`: errores de aplicación y códigos de salida.

pub mod cli;
pub mod errors;
