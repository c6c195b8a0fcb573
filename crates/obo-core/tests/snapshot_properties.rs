//! Propiedades observables de extremo a extremo sobre la API pública.

use obo_core::{build_snapshot, normalize, write_snapshot, ExportError, Exporter, InMemoryMetadataSource, Snapshot};
use serde_json::{json, Value};

fn span(a: [i64; 3], b: [i64; 3]) -> Value {
    json!({"start": {"line": a[0], "col": a[1], "offset": a[2]}, "end": {"line": b[0], "col": b[1], "offset": b[2]}})
}

#[test]
fn realistic_cache_record_is_fully_normalized() {
    let raw = json!({
        "frontmatter": {"created": "2023-05-01", "tags": ["garden"]},
        "frontmatterPosition": null,
        "sections": [
            {"type": "yaml", "position": span([0, 0, 0], [3, 3, 40])},
            {"type": "paragraph", "position": span([4, 0, 41], [4, 12, 53])}
        ],
        "links": [{"link": "Other", "original": "[[Other]]", "displayText": "Other", "position": span([4, 3, 44], [4, 12, 53])}],
        "listItems": [{"parent": -1, "task": " ", "position": span([6, 0, 60], [6, 9, 69])}]
    });
    let out = normalize(&raw).unwrap();
    let text = serde_json::to_string(&out).unwrap();
    assert!(!text.contains("\"position\""));
    assert_eq!(out["sections"][1]["pos"], json!([4, 0, 41, 4, 12, 53]));
    assert_eq!(out["links"][0]["displayText"], json!("Other"));
    assert_eq!(out["listItems"][0]["parent"], json!(-1));
    assert_eq!(out["frontmatterPosition"], Value::Null);
}

#[test]
fn mixed_entries_order_present_then_empty() {
    let snapshot = build_snapshot(vec![
        ("a".to_string(), None),
        ("b".to_string(), Some(json!({"frontmatter": {"created": "2020-01-01"}}))),
        ("c".to_string(), None),
    ]);
    let ids: Vec<&str> = snapshot.ids().collect();
    assert_eq!(ids, vec!["b", "a", "c"]);
}

#[test]
fn exported_file_parses_back_to_same_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("cache.json");
    let source = InMemoryMetadataSource::new()
        .with_record("n1.md", Some(json!({"frontmatter": {"created": "2021-02-03"}, "tags": [{"tag": "#x", "position": span([1, 0, 9], [1, 2, 11])}]})))
        .with_record("n2.md", Some(json!({"frontmatter": {"created": "2020-12-31T23:59:59Z"}})))
        .with_record("n3.png", None);

    let exporter = Exporter::new(source);
    exporter.export_to(&dest).unwrap();

    let text = std::fs::read_to_string(&dest).unwrap();
    let back = Snapshot::from_json_str(&text).unwrap();
    assert_eq!(back, exporter.build().unwrap());
    let ids: Vec<&str> = back.ids().collect();
    assert_eq!(ids, vec!["n2.md", "n1.md", "n3.png"]);
    assert_eq!(back.get("n1.md").unwrap().unwrap()["tags"][0]["pos"], json!([1, 0, 9, 1, 2, 11]));
}

#[test]
fn write_into_missing_directory_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("plugins").join("obo-exporter").join("cache.json");
    let err = write_snapshot(&Snapshot::default(), &dest).unwrap_err();
    assert!(matches!(err, ExportError::Io(_)));
    assert!(!dest.exists());
}
