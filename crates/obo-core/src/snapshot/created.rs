//! Lectura de `frontmatter.created` como instante.
//!
//! Se aceptan las mismas formas que un frontmatter suele traer y que un
//! constructor de fechas de JavaScript interpretaría:
//! - ISO 8601 con offset o `Z`, con o sin segundos (`2020-01-01T10:00Z`);
//! - fecha sola (`YYYY-MM-DD`, `YYYY-MM`, `YYYY`) en UTC;
//! - fecha y hora sin offset (`T` o espacio) en hora local;
//! - formas no ISO (`2020/01/01`, `2020-1-5`, `January 5, 2020`) en hora local;
//! - números como milisegundos desde epoch; `null`/booleanos como 0/1;
//! - arreglos de un solo escalar, con el texto de ese escalar.
//!
//! Un campo ausente o un texto no reconocido es `Invalid`, no un error.
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde_json::Value;

/// Límite de un `Date` de JavaScript: ±8.64e15 ms.
const MAX_EPOCH_MS: f64 = 8.64e15;

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M%:z",
];

const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
];

const LOCAL_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%B %d %Y", "%d %B %Y"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatedAt {
    /// Milisegundos desde epoch (UTC).
    Valid(i64),
    /// Ausente o no interpretable; compara como "NaN".
    Invalid,
}

impl CreatedAt {
    /// Extrae `record.frontmatter.created`.
    pub fn of_record(record: &Value) -> Self {
        Self::from_value(record.get("frontmatter").and_then(|fm| fm.get("created")))
    }

    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None => Self::Invalid,
            Some(Value::Null) => Self::Valid(0),
            Some(Value::Bool(b)) => Self::Valid(i64::from(*b)),
            Some(Value::Number(n)) => n.as_f64().map_or(Self::Invalid, Self::from_millis),
            Some(Value::String(s)) => Self::parse(s),
            // un arreglo se convierte a texto uniendo sus elementos
            Some(Value::Array(items)) => match items.as_slice() {
                [Value::String(s)] => Self::parse(s),
                [Value::Number(n)] => Self::parse(&n.to_string()),
                _ => Self::Invalid,
            },
            Some(Value::Object(_)) => Self::Invalid,
        }
    }

    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Self::Valid(dt.timestamp_millis());
        }
        if let Some(ms) = parse_with_offset(text) {
            return Self::Valid(ms);
        }
        if let Some(date) = parse_date_only(text) {
            return date
                .and_hms_opt(0, 0, 0)
                .map_or(Self::Invalid, |ndt| Self::Valid(ndt.and_utc().timestamp_millis()));
        }
        LOCAL_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
            .or_else(|| {
                LOCAL_DATE_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
            .and_then(local_millis)
            .map_or(Self::Invalid, Self::Valid)
    }

    pub fn millis(&self) -> Option<i64> {
        match self {
            Self::Valid(ms) => Some(*ms),
            Self::Invalid => None,
        }
    }

    fn from_millis(ms: f64) -> Self {
        if ms.is_finite() && ms.abs() <= MAX_EPOCH_MS {
            Self::Valid(ms.trunc() as i64)
        } else {
            Self::Invalid
        }
    }
}

/// Fecha y hora con offset explícito; `Z` equivale a `+00:00`.
fn parse_with_offset(text: &str) -> Option<i64> {
    let text = match text.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+00:00"),
        None => text.to_string(),
    };
    OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(&text, fmt).ok())
        .map(|dt| dt.timestamp_millis())
}

fn parse_date_only(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    let digits = |range: std::ops::Range<usize>| bytes[range].iter().all(u8::is_ascii_digit);
    match bytes.len() {
        4 if digits(0..4) => NaiveDate::from_ymd_opt(text.parse().ok()?, 1, 1),
        7 if digits(0..4) && bytes[4] == b'-' && digits(5..7) => {
            NaiveDate::from_ymd_opt(text[..4].parse().ok()?, text[5..7].parse().ok()?, 1)
        }
        10 if digits(0..4) && bytes[4] == b'-' && digits(5..7) && bytes[7] == b'-' && digits(8..10) => {
            NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
        }
        _ => None,
    }
}

fn local_millis(ndt: NaiveDateTime) -> Option<i64> {
    // hora inexistente (salto DST): se corre una hora hacia adelante
    Local
        .from_local_datetime(&ndt)
        .earliest()
        .or_else(|| Local.from_local_datetime(&(ndt + Duration::hours(1))).earliest())
        .map(|dt| dt.timestamp_millis())
}
