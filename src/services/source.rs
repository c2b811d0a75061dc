//! Dataset loading
//!
//! Reads CSV files, and JSON or YAML table documents, into a [`Dataset`].
//!
//! A table document is either
//! ```yaml
//! header:
//!   - { field: id, title: ID, sortable: true, align: right }
//! rows:
//!   - id: "1"
//!     cells:
//!       - { kind: text, value: 1 }
//! ```
//! or a plain list of flat objects, in which case the header comes from the
//! first object's keys.

use crate::model::table::{duplicate_field, Align, TableCell, TableHeaderItem, TableRowType};
use crate::model::Dataset;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Errors that can occur while loading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed YAML.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file extension is not one we can read.
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Two columns share a field name.
    #[error("Duplicate column field: {0}")]
    DuplicateField(String),

    /// The document is neither a table document nor a list of objects.
    #[error("Unrecognised table layout: {0}")]
    Layout(String),
}

#[derive(Debug, Deserialize)]
struct TableDocument {
    header: Vec<TableHeaderItem>,
    #[serde(default)]
    rows: Vec<TableRowType>,
}

/// Load a dataset, picking the parser from the file extension
pub fn load(path: &Path) -> Result<Dataset, SourceError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let contents = fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let dataset = match extension.as_str() {
        "csv" => parse_csv(&contents)?,
        "json" => parse_value(serde_json::from_str(&contents)?)?,
        "yaml" | "yml" => parse_value(serde_yaml::from_str(&contents)?)?,
        other => return Err(SourceError::UnsupportedFormat(other.to_string())),
    };

    if let Some(field) = duplicate_field(&dataset.header) {
        return Err(SourceError::DuplicateField(field.to_string()));
    }

    Ok(dataset)
}

/// Parse CSV text: first record is the header, every cell is text
pub fn parse_csv(contents: &str) -> Result<Dataset, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(contents.as_bytes());

    let mut header: Vec<TableHeaderItem> = reader
        .headers()?
        .iter()
        .map(|h| TableHeaderItem::new(h.trim(), h.trim()).sortable())
        .collect();

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let cells = record.iter().map(TableCell::text).collect();
        rows.push(TableRowType::new((index + 1).to_string(), cells));
    }

    // Columns holding only numbers read better right-aligned
    for (column, item) in header.iter_mut().enumerate() {
        let mut values = rows
            .iter()
            .filter_map(|r| r.cell(column))
            .filter_map(|c| c.value.as_str())
            .filter(|s| !s.is_empty())
            .peekable();
        if values.peek().is_some() && values.all(|s| s.parse::<f64>().is_ok()) {
            item.align = Some(Align::Right);
        }
    }

    Ok(Dataset::new(header, rows))
}

/// Interpret a parsed JSON/YAML value as a table
pub fn parse_value(value: Value) -> Result<Dataset, SourceError> {
    if value.get("header").is_some() {
        let document: TableDocument = serde_json::from_value(value)?;
        return Ok(Dataset::new(document.header, document.rows));
    }

    match value {
        Value::Array(items) => parse_object_list(items),
        other => Err(SourceError::Layout(format!(
            "expected a table document or a list of objects, got {}",
            value_kind(&other)
        ))),
    }
}

fn parse_object_list(items: Vec<Value>) -> Result<Dataset, SourceError> {
    let objects: Vec<Map<String, Value>> = items
        .into_iter()
        .map(|item| match item {
            Value::Object(map) => Ok(map),
            other => Err(SourceError::Layout(format!(
                "list item is {}, expected an object",
                value_kind(&other)
            ))),
        })
        .collect::<Result<_, _>>()?;

    let header: Vec<TableHeaderItem> = objects
        .first()
        .map(|first| {
            first
                .keys()
                .map(|key| TableHeaderItem::new(key.as_str(), key.as_str()).sortable())
                .collect()
        })
        .unwrap_or_default();

    let rows = objects
        .iter()
        .enumerate()
        .map(|(index, object)| {
            let id = match object.get("id") {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                _ => (index + 1).to_string(),
            };
            let cells = header
                .iter()
                .map(|h| match object.get(&h.field) {
                    Some(Value::Bool(b)) => TableCell::checkbox(*b),
                    Some(v @ (Value::Object(_) | Value::Array(_))) => {
                        TableCell::text(v.clone()).with_formatted(v.to_string())
                    }
                    Some(v) => TableCell::text(v.clone()),
                    None => TableCell::none(),
                })
                .collect();
            TableRowType::new(id, cells)
        })
        .collect();

    Ok(Dataset::new(header, rows))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::table::CellKind;

    #[test]
    fn test_parse_csv() {
        let dataset = parse_csv("name,score\nAlice,10\nBob,7.5\n").unwrap();
        assert_eq!(dataset.header.len(), 2);
        assert_eq!(dataset.header[0].field, "name");
        assert!(dataset.header.iter().all(|h| h.sortable));
        assert_eq!(dataset.header[0].align, None);
        assert_eq!(dataset.header[1].align, Some(Align::Right));
        assert_eq!(dataset.count(), 2);
        assert_eq!(dataset.rows[1].id, "2");
        assert_eq!(dataset.rows[1].cells[0].value, Value::String("Bob".into()));
    }

    #[test]
    fn test_parse_csv_headers_only() {
        let dataset = parse_csv("a,b\n").unwrap();
        assert_eq!(dataset.header.len(), 2);
        assert_eq!(dataset.count(), 0);
    }

    #[test]
    fn test_parse_table_document_json() {
        let json = r#"{
            "header": [
                {"field": "id", "title": "ID", "sortable": true, "align": "right"},
                {"field": "ok", "title": "OK"}
            ],
            "rows": [
                {"id": "a", "cells": [{"value": 1}, {"kind": "checkbox", "value": true}]}
            ]
        }"#;
        let dataset = parse_value(serde_json::from_str(json).unwrap()).unwrap();
        assert_eq!(dataset.header[0].align, Some(Align::Right));
        assert!(!dataset.header[1].sortable);
        assert_eq!(dataset.rows[0].cells[1].kind, CellKind::Checkbox);
    }

    #[test]
    fn test_parse_object_list_yaml() {
        let yaml = "- id: 7\n  name: Ada\n  active: true\n- name: Grace\n  active: false\n";
        let value: Value = serde_yaml::from_str(yaml).unwrap();
        let dataset = parse_value(value).unwrap();

        let fields: Vec<&str> = dataset.header.iter().map(|h| h.field.as_str()).collect();
        assert_eq!(fields, vec!["id", "name", "active"]);
        assert_eq!(dataset.rows[0].id, "7");
        assert_eq!(dataset.rows[1].id, "2");
        assert_eq!(dataset.rows[1].cells[0].kind, CellKind::None);
        assert_eq!(dataset.rows[1].cells[2].kind, CellKind::Checkbox);
    }

    #[test]
    fn test_parse_rejects_scalar() {
        let err = parse_value(Value::from(3)).unwrap_err();
        assert!(matches!(err, SourceError::Layout(_)));
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let path = std::env::temp_dir().join("pagetable-test-unknown.txt");
        fs::write(&path, "x").unwrap();
        let err = load(&path).unwrap_err();
        assert!(matches!(err, SourceError::UnsupportedFormat(ext) if ext == "txt"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_duplicate_fields() {
        let path = std::env::temp_dir().join("pagetable-test-dup.csv");
        fs::write(&path, "a,a\n1,2\n").unwrap();
        let err = load(&path).unwrap_err();
        assert!(matches!(err, SourceError::DuplicateField(f) if f == "a"));
        let _ = fs::remove_file(&path);
    }
}
