//! In-memory dataset answering page queries

use super::page::{PageRequest, SortDir, SortState};
use super::table::{TableHeaderItem, TableRowType};
use serde_json::Value;
use std::cmp::Ordering;

/// A request for one page of rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// Monotonic request id, used to discard stale answers
    pub id: u64,
    pub offset: usize,
    pub limit: usize,
    pub sort: SortState,
}

/// The answer to a [`PageQuery`]
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    pub id: u64,
    /// Total rows in the dataset
    pub count: usize,
    /// Offset actually served, after clamping
    pub offset: usize,
    pub rows: Vec<TableRowType>,
}

/// Header metadata plus every row of a table
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub header: Vec<TableHeaderItem>,
    pub rows: Vec<TableRowType>,
}

impl Dataset {
    pub fn new(header: Vec<TableHeaderItem>, rows: Vec<TableRowType>) -> Self {
        Self { header, rows }
    }

    pub fn count(&self) -> usize {
        self.rows.len()
    }

    /// Column index of a sortable field
    fn sort_column(&self, field: &str) -> Option<usize> {
        self.header
            .iter()
            .position(|h| h.field == field && h.sortable)
    }

    /// Sort (when requested) and slice out one page
    pub fn query(&self, query: &PageQuery) -> PageResult {
        let page = PageRequest::new(self.count(), query.limit, query.offset);
        let range = page.row_range();

        let column = query
            .sort
            .order_by
            .as_deref()
            .and_then(|field| self.sort_column(field));

        let rows = match column {
            Some(column) => {
                let mut ordered: Vec<&TableRowType> = self.rows.iter().collect();
                ordered.sort_by(|a, b| {
                    compare_cells(
                        a.cell(column).map(|c| &c.value),
                        b.cell(column).map(|c| &c.value),
                        query.sort.dir,
                    )
                });
                ordered[range].iter().map(|r| (*r).clone()).collect()
            }
            None => self.rows[range].to_vec(),
        };

        PageResult {
            id: query.id,
            count: page.count,
            offset: page.offset,
            rows,
        }
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Bool(_) => 0,
        Value::Number(_) => 1,
        Value::String(_) => 2,
        Value::Array(_) | Value::Object(_) => 3,
        Value::Null => 4,
    }
}

/// Numeric strings sort before any other text
fn text_key(text: &str) -> Result<f64, String> {
    text.trim().parse::<f64>().map_err(|_| text.to_lowercase())
}

/// Order two non-null cell values: numbers numerically, numeric text before
/// other text, other text case-insensitively. A total order.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => match (text_key(x), text_key(y)) {
            (Ok(x), Ok(y)) => x.total_cmp(&y),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(x), Err(y)) => x.cmp(&y),
        },
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

/// Order two cells for a sort in `dir`; missing and null values stay last
/// in both directions
pub fn compare_cells(a: Option<&Value>, b: Option<&Value>, dir: SortDir) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match dir {
            SortDir::Asc => compare_values(a, b),
            SortDir::Desc => compare_values(b, a),
        },
    }
}
