//! Settings del plugin y su persistencia.
//!
//! Los valores persistidos se mezclan sobre los valores por defecto: las
//! claves ausentes toman el default y las claves desconocidas se conservan en
//! `extra` para no perderlas al volver a guardar. Una clave conocida con un
//! tipo incorrecto (p. ej. `"siteName": null`) se descarta y toma su default.
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ExportError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub site_name: String,
    pub index_file: String,
    pub show_hover_preview: bool,
    pub show_search: bool,
    pub show_outline: bool,
    pub show_backlinks: bool,
    pub show_theme_toggle: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            site_name: String::new(),
            index_file: String::new(),
            show_hover_preview: true,
            show_search: true,
            show_outline: true,
            show_backlinks: true,
            show_theme_toggle: true,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    Text,
    Toggle,
}

/// Descripción de un campo editable, tal como lo lista el panel de settings.
#[derive(Debug, Clone, Copy)]
pub struct SettingField {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub placeholder: Option<&'static str>,
    pub kind: SettingKind,
}

pub const SETTING_FIELDS: &[SettingField] = &[
    SettingField { key: "siteName", name: "Site name", description: "Name for the generated site", placeholder: Some("Site Name"), kind: SettingKind::Text },
    SettingField { key: "indexFile", name: "Index file", description: "File to be used as front page", placeholder: Some("Index"), kind: SettingKind::Text },
    SettingField { key: "showHoverPreview", name: "Hover preview", description: "Enable hover preview", placeholder: None, kind: SettingKind::Toggle },
    SettingField { key: "showSearch", name: "Search", description: "Enable search", placeholder: None, kind: SettingKind::Toggle },
    SettingField { key: "showOutline", name: "Outline", description: "Show outline", placeholder: None, kind: SettingKind::Toggle },
    SettingField { key: "showBacklinks", name: "Backlinks", description: "Show backlinks", placeholder: None, kind: SettingKind::Toggle },
    SettingField { key: "showThemeToggle", name: "Toggleable theme", description: "Enable theme toggle", placeholder: None, kind: SettingKind::Toggle },
];

pub fn field(key: &str) -> Option<&'static SettingField> {
    SETTING_FIELDS.iter().find(|f| f.key == key)
}

impl Settings {
    /// Mezcla datos persistidos (o `null` si no hay) sobre los defaults.
    pub fn from_persisted(data: Option<Value>) -> Result<Self, ExportError> {
        let mut map = match data {
            None | Some(Value::Null) => return Ok(Self::default()),
            Some(Value::Object(map)) => map,
            Some(other) => {
                warn!("settings: persisted data is not an object ({other}), using defaults");
                return Ok(Self::default());
            }
        };
        for f in SETTING_FIELDS {
            let well_typed = match (map.get(f.key), f.kind) {
                (None, _) => true,
                (Some(v), SettingKind::Text) => v.is_string(),
                (Some(v), SettingKind::Toggle) => v.is_boolean(),
            };
            if !well_typed {
                warn!("settings: `{}` has an unexpected type, using default", f.key);
                map.remove(f.key);
            }
        }
        Ok(serde_json::from_value(Value::Object(map))?)
    }

    pub fn to_value(&self) -> Result<Value, ExportError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Valor actual de un campo conocido.
    pub fn get(&self, key: &str) -> Option<Value> {
        let v = match key {
            "siteName" => Value::from(self.site_name.as_str()),
            "indexFile" => Value::from(self.index_file.as_str()),
            "showHoverPreview" => Value::from(self.show_hover_preview),
            "showSearch" => Value::from(self.show_search),
            "showOutline" => Value::from(self.show_outline),
            "showBacklinks" => Value::from(self.show_backlinks),
            "showThemeToggle" => Value::from(self.show_theme_toggle),
            _ => return None,
        };
        Some(v)
    }

    /// Aplica una edición de texto o toggle sobre un campo conocido.
    pub fn set(&mut self, key: &str, raw: &str) -> Result<(), ExportError> {
        let field = field(key).ok_or_else(|| ExportError::Settings(format!("unknown setting `{key}`")))?;
        match field.kind {
            SettingKind::Text => {
                let slot = match key {
                    "siteName" => &mut self.site_name,
                    _ => &mut self.index_file,
                };
                *slot = raw.to_string();
            }
            SettingKind::Toggle => {
                let on = parse_toggle(raw)
                    .ok_or_else(|| ExportError::Settings(format!("`{key}` expects true/false, got `{raw}`")))?;
                let slot = match key {
                    "showHoverPreview" => &mut self.show_hover_preview,
                    "showSearch" => &mut self.show_search,
                    "showOutline" => &mut self.show_outline,
                    "showBacklinks" => &mut self.show_backlinks,
                    _ => &mut self.show_theme_toggle,
                };
                *slot = on;
            }
        }
        Ok(())
    }
}

fn parse_toggle(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Persistencia de settings provista por el host.
pub trait SettingsStore {
    fn load(&self) -> Result<Settings, ExportError>;
    fn save(&mut self, settings: &Settings) -> Result<(), ExportError>;
}

/// Carga, edita un campo y guarda. Devuelve los settings resultantes.
pub fn apply_edit<S: SettingsStore + ?Sized>(store: &mut S, key: &str, raw: &str) -> Result<Settings, ExportError> {
    let mut settings = store.load()?;
    settings.set(key, raw)?;
    store.save(&settings)?;
    Ok(settings)
}

/// Guarda el JSON crudo, como haría el host con `saveData`.
#[derive(Debug, Clone, Default)]
pub struct InMemorySettingsStore {
    pub data: Option<Value>,
}

impl SettingsStore for InMemorySettingsStore {
    fn load(&self) -> Result<Settings, ExportError> { Settings::from_persisted(self.data.clone()) }

    fn save(&mut self, settings: &Settings) -> Result<(), ExportError> {
        self.data = Some(settings.to_value()?);
        Ok(())
    }
}
