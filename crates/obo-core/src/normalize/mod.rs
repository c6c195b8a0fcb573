//! Normalizador de árbol: `position` → `pos`.
//!
//! Recorre un `serde_json::Value` arbitrario y reconstruye cada objeto cuyo
//! campo `position` tenga forma de span (ver [`Span`]), reemplazándolo por la
//! tupla `pos`. El resto del árbol (claves, escalares, orden de claves) queda
//! intacto. No hay límite de profundidad; un `Value` es un árbol con dueño,
//! por lo que no puede contener ciclos.
//!
//! Los spans anidados dentro de otros campos de un nodo span también se
//! normalizan.
pub mod span;

pub use span::{Loc, Span};

use log::debug;
use serde_json::{Map, Value};

use crate::constants::{POSITION_KEY, POS_KEY};
use crate::errors::ExportError;

/// Qué hacer con un `position` presente pero sin forma de span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpanPolicy {
    /// Aborta con `ExportError::Structural` (la exportación completa falla).
    #[default]
    Strict,
    /// Deja el campo como está y lo recorre como cualquier otro valor.
    Lenient,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    policy: SpanPolicy,
}

impl Normalizer {
    pub fn new(policy: SpanPolicy) -> Self { Self { policy } }

    pub fn policy(&self) -> SpanPolicy { self.policy }

    /// Variante pura: devuelve un árbol nuevo sin tocar `value`.
    pub fn normalize(&self, value: &Value) -> Result<Value, ExportError> {
        let mut path = String::new();
        self.rebuild(value, &mut path)
    }

    /// Variante in-place. Si falla, `value` queda sin cambios.
    pub fn normalize_in_place(&self, value: &mut Value) -> Result<(), ExportError> {
        *value = self.normalize(value)?;
        Ok(())
    }

    fn rebuild(&self, value: &Value, path: &mut String) -> Result<Value, ExportError> {
        match value {
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    let mark = push_segment(path, &i.to_string());
                    out.push(self.rebuild(item, path)?);
                    path.truncate(mark);
                }
                Ok(Value::Array(out))
            }
            Value::Object(map) => self.rebuild_object(map, path),
            scalar => Ok(scalar.clone()),
        }
    }

    fn rebuild_object(&self, map: &Map<String, Value>, path: &mut String) -> Result<Value, ExportError> {
        let span = match map.get(POSITION_KEY) {
            None | Some(Value::Null) => None,
            Some(position) => match Span::from_value(position) {
                Ok(span) => Some(span),
                Err(reason) => match self.policy {
                    SpanPolicy::Strict => {
                        return Err(ExportError::structural(&format!("{path}/{POSITION_KEY}"), reason));
                    }
                    SpanPolicy::Lenient => {
                        debug!("normalize:skip path={path}/{POSITION_KEY} reason={reason}");
                        None
                    }
                },
            },
        };

        let mut out = Map::with_capacity(map.len());
        for (key, child) in map {
            if span.is_some() {
                if key == POSITION_KEY {
                    continue;
                }
                if key == POS_KEY {
                    // reserva el slot; se sobreescribe abajo
                    out.insert(key.clone(), Value::Null);
                    continue;
                }
            }
            let mark = push_segment(path, key);
            let rebuilt = self.rebuild(child, path)?;
            path.truncate(mark);
            out.insert(key.clone(), rebuilt);
        }
        if let Some(span) = span {
            out.insert(POS_KEY.to_string(), span.to_pos());
        }
        Ok(Value::Object(out))
    }
}

/// Normaliza con la política por defecto (`Strict`).
pub fn normalize(value: &Value) -> Result<Value, ExportError> {
    Normalizer::default().normalize(value)
}

pub fn normalize_in_place(value: &mut Value) -> Result<(), ExportError> {
    Normalizer::default().normalize_in_place(value)
}

/// Agrega un segmento JSON pointer (RFC 6901) y devuelve la longitud previa.
fn push_segment(path: &mut String, segment: &str) -> usize {
    let mark = path.len();
    path.push('/');
    for c in segment.chars() {
        match c {
            '~' => path.push_str("~0"),
            '/' => path.push_str("~1"),
            c => path.push(c),
        }
    }
    mark
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn span_json(a: [i64; 3], b: [i64; 3]) -> Value {
        json!({
            "start": {"line": a[0], "col": a[1], "offset": a[2]},
            "end": {"line": b[0], "col": b[1], "offset": b[2]},
        })
    }

    #[test]
    fn identity_without_position_fields() {
        let v = json!({"frontmatter": {"created": "2020-01-01", "tags": ["a", null, 3]}, "links": [], "n": 1.5, "ok": true});
        assert_eq!(normalize(&v).unwrap(), v);
    }

    #[test]
    fn span_node_becomes_pos_tuple() {
        let v = json!({"position": span_json([1, 0, 0], [2, 5, 20])});
        let out = normalize(&v).unwrap();
        assert_eq!(out, json!({"pos": [1, 0, 0, 2, 5, 20]}));
        assert!(out.get("position").is_none());
    }

    #[test]
    fn deep_span_inside_sequence_is_normalized() {
        let v = json!([
            null,
            {"a": {"b": {"c": {"heading": "x", "position": span_json([3, 1, 10], [3, 9, 18])}}}}
        ]);
        let out = normalize(&v).unwrap();
        assert_eq!(out[1]["a"]["b"]["c"], json!({"heading": "x", "pos": [3, 1, 10, 3, 9, 18]}));
        assert_eq!(out[0], Value::Null);
    }

    #[test]
    fn keeps_key_order_and_appends_pos() {
        let v = json!({"z": 1, "position": span_json([0, 0, 0], [0, 4, 4]), "a": 2});
        let out = normalize(&v).unwrap();
        let keys: Vec<&str> = out.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "pos"]);
    }

    #[test]
    fn existing_pos_is_overwritten_in_place() {
        let v = json!({"pos": "old", "position": span_json([0, 0, 0], [1, 1, 1]), "tail": true});
        let out = normalize(&v).unwrap();
        let keys: Vec<&str> = out.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["pos", "tail"]);
        assert_eq!(out["pos"], json!([0, 0, 0, 1, 1, 1]));
    }

    #[test]
    fn spans_inside_span_nodes_are_normalized() {
        let v = json!({
            "position": span_json([0, 0, 0], [9, 0, 90]),
            "children": [{"position": span_json([1, 0, 5], [1, 3, 8])}]
        });
        let out = normalize(&v).unwrap();
        assert_eq!(out, json!({"children": [{"pos": [1, 0, 5, 1, 3, 8]}], "pos": [0, 0, 0, 9, 0, 90]}));
    }

    #[test]
    fn null_position_is_not_a_span() {
        let v = json!({"position": null, "x": 1});
        assert_eq!(normalize(&v).unwrap(), v);
    }

    #[test]
    fn strict_policy_reports_pointer_to_malformed_position() {
        let v = json!({"sections": [{"type": "code", "position": {"start": {"line": 0, "col": 0, "offset": 0}}}]});
        let err = normalize(&v).unwrap_err();
        match err {
            ExportError::Structural { path, reason } => {
                assert_eq!(path, "/sections/0/position");
                assert_eq!(reason, "missing `end`");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn lenient_policy_leaves_malformed_position_and_recurses_into_it() {
        let v = json!({"position": {"inner": {"position": span_json([1, 1, 1], [2, 2, 2])}}});
        let out = Normalizer::new(SpanPolicy::Lenient).normalize(&v).unwrap();
        assert_eq!(out, json!({"position": {"inner": {"pos": [1, 1, 1, 2, 2, 2]}}}));
    }

    #[test]
    fn in_place_failure_leaves_value_untouched() {
        let mut v = json!({"ok": {"position": span_json([0, 0, 0], [1, 1, 1])}, "bad": {"position": "x"}});
        let before = v.clone();
        assert!(normalize_in_place(&mut v).is_err());
        assert_eq!(v, before);
    }

    #[test]
    fn pointer_segments_are_escaped() {
        let v = json!({"a/b": {"~c": {"position": 1}}});
        match normalize(&v).unwrap_err() {
            ExportError::Structural { path, .. } => assert_eq!(path, "/a~1b/~0c/position"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
