//! CLI mínima sobre `obo-core` / `obo-vault`.
//!
//! ```text
//! obo export --cache <FILE> [--vault <DIR>] [--config-dir <NAME>] [--out <FILE>] [--pretty] [--lenient]
//! obo settings [--vault <DIR>] [--config-dir <NAME>]
//! obo settings set <KEY> <VALUE> [--vault <DIR>] [--config-dir <NAME>]
//! ```
use std::path::PathBuf;

use obo_core::settings::{apply_edit, SETTING_FIELDS};
use obo_core::{Exporter, SettingsStore, SpanPolicy, WriteOptions};
use obo_vault::{CacheDumpSource, JsonFileSettingsStore, VaultConfig, VaultLayout};

use crate::errors::AppError;

pub const USAGE: &str = "\
obo export --cache <FILE> [--vault <DIR>] [--config-dir <NAME>] [--out <FILE>] [--pretty] [--lenient]
obo settings [--vault <DIR>] [--config-dir <NAME>]
obo settings set <KEY> <VALUE> [--vault <DIR>] [--config-dir <NAME>]";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VaultArgs {
    pub vault: Option<PathBuf>,
    pub config_dir: Option<String>,
}

impl VaultArgs {
    /// Los flags tienen prioridad sobre el entorno.
    fn layout(&self, config: &VaultConfig) -> Result<VaultLayout, AppError> {
        let merged = VaultConfig {
            vault_path: self.vault.clone().or_else(|| config.vault_path.clone()),
            config_dir: self.config_dir.clone().unwrap_or_else(|| config.config_dir.clone()),
            pretty: config.pretty,
        };
        Ok(VaultLayout::from_config(&merged)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Export { vault: VaultArgs, cache: PathBuf, out: Option<PathBuf>, pretty: bool, lenient: bool },
    ShowSettings { vault: VaultArgs },
    SetSetting { vault: VaultArgs, key: String, value: String },
    Help,
}

/// Interpreta los argumentos (sin el nombre del programa).
pub fn parse_args(args: &[String]) -> Result<Command, AppError> {
    let (command, rest) = match args.split_first() {
        Some((c, rest)) => (c.as_str(), rest),
        None => return Ok(Command::Help),
    };
    match command {
        "help" | "--help" | "-h" => Ok(Command::Help),
        "export" => {
            let mut vault = VaultArgs::default();
            let mut cache: Option<PathBuf> = None;
            let mut out: Option<PathBuf> = None;
            let mut pretty = false;
            let mut lenient = false;
            let mut i = 0;
            while i < rest.len() {
                match rest[i].as_str() {
                    "--cache" => cache = Some(PathBuf::from(flag_value(rest, &mut i)?)),
                    "--out" => out = Some(PathBuf::from(flag_value(rest, &mut i)?)),
                    "--pretty" => pretty = true,
                    "--lenient" => lenient = true,
                    other => parse_vault_flag(other, rest, &mut i, &mut vault)?,
                }
                i += 1;
            }
            let cache = cache.ok_or_else(|| AppError::Usage("export requiere --cache <FILE>".into()))?;
            Ok(Command::Export { vault, cache, out, pretty, lenient })
        }
        "settings" => {
            let mut vault = VaultArgs::default();
            let mut positional: Vec<String> = Vec::new();
            let mut i = 0;
            while i < rest.len() {
                let arg = rest[i].as_str();
                if arg.starts_with("--") {
                    parse_vault_flag(arg, rest, &mut i, &mut vault)?;
                } else {
                    positional.push(arg.to_string());
                }
                i += 1;
            }
            match positional.as_slice() {
                [] => Ok(Command::ShowSettings { vault }),
                [set, key, value] if set == "set" => {
                    Ok(Command::SetSetting { vault, key: key.clone(), value: value.clone() })
                }
                _ => Err(AppError::Usage("obo settings set <KEY> <VALUE>".into())),
            }
        }
        other => Err(AppError::Usage(format!("comando desconocido `{other}`\n{USAGE}"))),
    }
}

fn parse_vault_flag(flag: &str, args: &[String], i: &mut usize, vault: &mut VaultArgs) -> Result<(), AppError> {
    match flag {
        "--vault" => vault.vault = Some(PathBuf::from(flag_value(args, i)?)),
        "--config-dir" => vault.config_dir = Some(flag_value(args, i)?.to_string()),
        other => return Err(AppError::Usage(format!("flag desconocido `{other}`"))),
    }
    Ok(())
}

fn flag_value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str, AppError> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i).map(String::as_str).ok_or_else(|| AppError::Usage(format!("{flag} requiere un valor")))
}

/// Ejecuta el comando y devuelve el texto a mostrar.
pub fn run(command: Command, config: &VaultConfig) -> Result<String, AppError> {
    match command {
        Command::Help => Ok(USAGE.to_string()),
        Command::Export { vault, cache, out, pretty, lenient } => {
            let destination = match out {
                Some(path) => path,
                None => vault.layout(config)?.cache_path()?,
            };
            let source = CacheDumpSource::from_path(&cache)?;
            let policy = if lenient { SpanPolicy::Lenient } else { SpanPolicy::Strict };
            let report = Exporter::new(source)
                .with_policy(policy)
                .with_write_options(WriteOptions { pretty: pretty || config.pretty })
                .export_to(&destination)?;
            Ok(format!(
                "exportado: {} entradas ({} sin datos), {} bytes -> {}",
                report.entries,
                report.empty_entries,
                report.bytes_written,
                report.destination.display()
            ))
        }
        Command::ShowSettings { vault } => {
            let store = settings_store(&vault, config)?;
            let settings = store.load()?;
            let lines: Vec<String> = SETTING_FIELDS
                .iter()
                .map(|f| {
                    let value = settings.get(f.key).unwrap_or_default();
                    match f.placeholder {
                        Some(hint) => format!("{} = {}  # {}: {} (placeholder: {hint})", f.key, value, f.name, f.description),
                        None => format!("{} = {}  # {}: {}", f.key, value, f.name, f.description),
                    }
                })
                .collect();
            Ok(lines.join("\n"))
        }
        Command::SetSetting { vault, key, value } => {
            let mut store = settings_store(&vault, config)?;
            let settings = apply_edit(&mut store, &key, &value)?;
            let current = settings.get(&key).unwrap_or_default();
            Ok(format!("guardado: {key} = {current}"))
        }
    }
}

fn settings_store(vault: &VaultArgs, config: &VaultConfig) -> Result<JsonFileSettingsStore, AppError> {
    let layout = vault.layout(config)?;
    Ok(JsonFileSettingsStore::new(layout.settings_path()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &[&str]) -> Vec<String> { s.iter().map(|a| a.to_string()).collect() }

    #[test]
    fn parses_export_flags() {
        let cmd = parse_args(&args(&["export", "--cache", "dump.json", "--vault", "/v", "--pretty"])).unwrap();
        assert_eq!(cmd, Command::Export {
            vault: VaultArgs { vault: Some(PathBuf::from("/v")), config_dir: None },
            cache: PathBuf::from("dump.json"),
            out: None,
            pretty: true,
            lenient: false,
        });
    }

    #[test]
    fn export_without_cache_is_usage_error() {
        let err = parse_args(&args(&["export", "--vault", "/v"])).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn flag_without_value_is_usage_error() {
        assert!(matches!(parse_args(&args(&["export", "--cache"])), Err(AppError::Usage(_))));
    }

    #[test]
    fn parses_settings_set() {
        let cmd = parse_args(&args(&["settings", "set", "showSearch", "false", "--config-dir", ".cfg"])).unwrap();
        assert_eq!(cmd, Command::SetSetting {
            vault: VaultArgs { vault: None, config_dir: Some(".cfg".into()) },
            key: "showSearch".into(),
            value: "false".into(),
        });
    }

    #[test]
    fn empty_args_show_help() {
        assert_eq!(parse_args(&[]).unwrap(), Command::Help);
    }

    #[test]
    fn export_without_vault_or_out_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("dump.json");
        std::fs::write(&cache, "{}").unwrap();
        let cmd = Command::Export { vault: VaultArgs::default(), cache, out: None, pretty: false, lenient: false };
        let err = run(cmd, &VaultConfig::default()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
