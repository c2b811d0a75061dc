//! Table data model - column metadata, rows and cells
//!
//! Rows carry an identity plus an ordered list of cells, one per header
//! column. Cells are tagged with the kind of content they hold and resolved
//! into displayable content by [`get_data_to_populate`].

use crate::services::icons;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// Horizontal alignment of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Column metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableHeaderItem {
    /// Unique key of the column
    pub field: String,
    /// Display title
    pub title: String,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub align: Option<Align>,
    #[serde(default)]
    pub width: Option<u16>,
}

impl TableHeaderItem {
    pub fn new(field: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            title: title.into(),
            sortable: false,
            align: None,
            width: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn align(&self) -> Align {
        self.align.unwrap_or_default()
    }
}

/// Return the first field name that appears twice, if any
pub fn duplicate_field(header: &[TableHeaderItem]) -> Option<&str> {
    let mut seen = HashSet::new();
    header
        .iter()
        .map(|h| h.field.as_str())
        .find(|field| !seen.insert(*field))
}

/// Kind of component a cell renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    #[default]
    Text,
    Icon,
    Checkbox,
    None,
}

/// One cell of a row
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableCell {
    #[serde(default)]
    pub kind: CellKind,
    #[serde(default)]
    pub value: Value,
    /// Pre-formatted representation, used when the raw value is not displayable
    #[serde(default)]
    pub formatted: Option<String>,
    /// Icon color name
    #[serde(default)]
    pub color: Option<String>,
}

impl TableCell {
    pub fn text(value: impl Into<Value>) -> Self {
        Self {
            kind: CellKind::Text,
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn icon(name: impl Into<String>, color: Option<&str>) -> Self {
        Self {
            kind: CellKind::Icon,
            value: Value::String(name.into()),
            color: color.map(str::to_string),
            ..Default::default()
        }
    }

    pub fn checkbox(checked: bool) -> Self {
        Self {
            kind: CellKind::Checkbox,
            value: Value::Bool(checked),
            ..Default::default()
        }
    }

    pub fn none() -> Self {
        Self {
            kind: CellKind::None,
            ..Default::default()
        }
    }

    pub fn with_formatted(mut self, formatted: impl Into<String>) -> Self {
        self.formatted = Some(formatted.into());
        self
    }
}

/// A row identity plus its cells, ordered as the header columns
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableRowType {
    pub id: String,
    #[serde(default)]
    pub cells: Vec<TableCell>,
}

impl TableRowType {
    pub fn new(id: impl Into<String>, cells: Vec<TableCell>) -> Self {
        Self {
            id: id.into(),
            cells,
        }
    }

    /// Cell at `column`, if the row is long enough
    pub fn cell(&self, column: usize) -> Option<&TableCell> {
        self.cells.get(column)
    }
}

/// Displayable content of a cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellContent {
    Text(String),
    Icon {
        glyph: &'static str,
        color: Option<Color>,
    },
    Checkbox(bool),
    Empty,
}

impl CellContent {
    /// Plain-text form, used for width measurement and detail views
    pub fn as_text(&self) -> String {
        match self {
            CellContent::Text(text) => text.clone(),
            CellContent::Icon { glyph, .. } => (*glyph).to_string(),
            CellContent::Checkbox(true) => "[x]".to_string(),
            CellContent::Checkbox(false) => "[ ]".to_string(),
            CellContent::Empty => String::new(),
        }
    }
}

/// String or number values render as-is; anything else has no direct form
fn raw_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Resolve a cell into the content to display
pub fn get_data_to_populate(cell: &TableCell) -> CellContent {
    match cell.kind {
        CellKind::Text => CellContent::Text(
            raw_text(&cell.value)
                .or_else(|| cell.formatted.clone())
                .unwrap_or_default(),
        ),
        CellKind::Icon => {
            let name = cell.value.as_str().unwrap_or_default();
            let icon = icons::resolve(name, cell.color.as_deref());
            CellContent::Icon {
                glyph: icon.glyph,
                color: icon.color,
            }
        }
        CellKind::Checkbox => match &cell.value {
            Value::Bool(checked) => CellContent::Checkbox(*checked),
            other => CellContent::Text(
                cell.formatted
                    .clone()
                    .or_else(|| raw_text(other))
                    .unwrap_or_default(),
            ),
        },
        CellKind::None => CellContent::Empty,
    }
}
