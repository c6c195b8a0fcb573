//! Orden de las entradas del snapshot.
//!
//! Comparador de tres vías:
//! - ambos registros nulos → iguales;
//! - sólo el izquierdo nulo → va después; sólo el derecho → antes;
//! - ambos presentes → compara `frontmatter.created`. Si alguno es inválido
//!   la resta de instantes daría NaN, que se trata como "igual".
//!
//! Con esa regla el comparador no es un orden total (una fecha válida puede
//! ser "igual" a una inválida que a su vez es "igual" a otra fecha válida
//! distinta), así que `slice::sort_by` no sirve: puede entrar en pánico ante
//! comparadores inconsistentes. Se usa un merge sort estable propio.
use std::cmp::Ordering;

use serde_json::Value;

use super::created::CreatedAt;

/// Clave precalculada de cada entrada; evita reparsear fechas en cada comparación.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Empty,
    Record(CreatedAt),
}

impl SortKey {
    pub fn of(record: Option<&Value>) -> Self {
        match record {
            None | Some(Value::Null) => Self::Empty,
            Some(record) => Self::Record(CreatedAt::of_record(record)),
        }
    }
}

/// Resultado crudo del comparador. `None` representa NaN.
pub fn compare_keys(a: &SortKey, b: &SortKey) -> Option<Ordering> {
    match (a, b) {
        (SortKey::Empty, SortKey::Empty) => Some(Ordering::Equal),
        (SortKey::Empty, SortKey::Record(_)) => Some(Ordering::Greater),
        (SortKey::Record(_), SortKey::Empty) => Some(Ordering::Less),
        (SortKey::Record(x), SortKey::Record(y)) => match (x.millis(), y.millis()) {
            (Some(x), Some(y)) => Some(x.cmp(&y)),
            _ => None,
        },
    }
}

/// Comparador sobre registros completos (útil fuera del snapshot).
pub fn compare_records(a: Option<&Value>, b: Option<&Value>) -> Option<Ordering> {
    compare_keys(&SortKey::of(a), &SortKey::of(b))
}

/// Merge sort estable que tolera comparadores inconsistentes: nunca entra en
/// pánico y siempre termina. Ante empate conserva el orden de entrada.
pub fn stable_sort_by<T, F>(items: Vec<T>, cmp: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }
    let mut left = items;
    let right = left.split_off(left.len() / 2);
    let left = stable_sort_by(left, cmp);
    let right = stable_sort_by(right, cmp);

    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => cmp(r, l) == Ordering::Less,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        let next = if take_right { right.next() } else { left.next() };
        out.extend(next);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_records_sort_after_present_ones() {
        let rec = json!({"frontmatter": {"created": "2020-01-01"}});
        assert_eq!(compare_records(None, None), Some(Ordering::Equal));
        assert_eq!(compare_records(None, Some(&rec)), Some(Ordering::Greater));
        assert_eq!(compare_records(Some(&rec), None), Some(Ordering::Less));
    }

    #[test]
    fn earlier_created_first() {
        let a = json!({"frontmatter": {"created": "2021-06-01"}});
        let b = json!({"frontmatter": {"created": "2020-01-01"}});
        assert_eq!(compare_records(Some(&a), Some(&b)), Some(Ordering::Greater));
    }

    #[test]
    fn invalid_date_compares_as_nan() {
        let a = json!({"frontmatter": {}});
        let b = json!({"frontmatter": {"created": "2020-01-01"}});
        assert_eq!(compare_records(Some(&a), Some(&b)), None);
        assert_eq!(compare_records(Some(&b), Some(&a)), None);
    }

    #[test]
    fn stable_sort_keeps_ties_in_input_order() {
        let items = vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')];
        let sorted = stable_sort_by(items, &mut |x: &(i32, char), y: &(i32, char)| x.0.cmp(&y.0));
        assert_eq!(sorted, vec![(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c')]);
    }

    #[test]
    fn stable_sort_survives_inconsistent_comparator() {
        // "todo es menor que todo": no es un orden, pero no debe fallar
        let items: Vec<u32> = (0..50).collect();
        let sorted = stable_sort_by(items, &mut |_: &u32, _: &u32| Ordering::Less);
        assert_eq!(sorted.len(), 50);
    }
}
