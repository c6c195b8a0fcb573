//! Detección explícita de nodos span.
//!
//! Un valor `position` sólo se considera span si tiene exactamente la forma
//! `{start: {line, col, offset}, end: {line, col, offset}}` con coordenadas
//! numéricas. Las coordenadas se copian tal cual (`Number`), sin conversión.
use serde_json::{Number, Value};

/// Punto dentro del texto fuente de una nota.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loc {
    pub line: Number,
    pub col: Number,
    pub offset: Number,
}

/// Rango `[start, end]` descrito por el campo `position` de un nodo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Loc,
    pub end: Loc,
}

impl Span {
    /// Intenta leer un span desde el valor de un campo `position`.
    /// El `Err` describe qué parte de la forma esperada falta.
    pub fn from_value(value: &Value) -> Result<Self, String> {
        let obj = value.as_object().ok_or_else(|| format!("expected object, found {}", kind_name(value)))?;
        let start = loc(obj.get("start"), "start")?;
        let end = loc(obj.get("end"), "end")?;
        Ok(Self { start, end })
    }

    /// Tupla plana `[start.line, start.col, start.offset, end.line, end.col, end.offset]`.
    pub fn to_pos(&self) -> Value {
        Value::Array(vec![
            Value::Number(self.start.line.clone()),
            Value::Number(self.start.col.clone()),
            Value::Number(self.start.offset.clone()),
            Value::Number(self.end.line.clone()),
            Value::Number(self.end.col.clone()),
            Value::Number(self.end.offset.clone()),
        ])
    }
}

fn loc(value: Option<&Value>, bound: &str) -> Result<Loc, String> {
    let obj = match value {
        Some(Value::Object(obj)) => obj,
        Some(other) => return Err(format!("`{bound}` is {}, expected object", kind_name(other))),
        None => return Err(format!("missing `{bound}`")),
    };
    let coord = |field: &str| match obj.get(field) {
        Some(Value::Number(n)) => Ok(n.clone()),
        Some(other) => Err(format!("`{bound}.{field}` is {}, expected number", kind_name(other))),
        None => Err(format!("missing `{bound}.{field}`")),
    };
    Ok(Loc { line: coord("line")?, col: coord("col")?, offset: coord("offset")? })
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_well_formed_position() {
        let v = json!({"start": {"line": 1, "col": 0, "offset": 0}, "end": {"line": 2, "col": 5, "offset": 20}});
        let span = Span::from_value(&v).unwrap();
        assert_eq!(span.to_pos(), json!([1, 0, 0, 2, 5, 20]));
    }

    #[test]
    fn rejects_missing_end() {
        let v = json!({"start": {"line": 1, "col": 0, "offset": 0}});
        assert_eq!(Span::from_value(&v).unwrap_err(), "missing `end`");
    }

    #[test]
    fn rejects_non_numeric_coordinate() {
        let v = json!({"start": {"line": "1", "col": 0, "offset": 0}, "end": {"line": 2, "col": 5, "offset": 20}});
        assert_eq!(Span::from_value(&v).unwrap_err(), "`start.line` is string, expected number");
    }

    #[test]
    fn rejects_scalar_position() {
        assert_eq!(Span::from_value(&json!(3)).unwrap_err(), "expected object, found number");
    }
}
