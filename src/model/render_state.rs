//! Table render state
//!
//! Which of the four table presentations applies is computed from the
//! host's flags every frame; nothing here remembers a previous state.

use super::table::TableHeaderItem;

/// Placeholder glyph used for skeleton cells
pub const PLACEHOLDER: &str = "░░░░░░";

/// The presentation a table is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    /// Nothing known yet: busy indicator only
    Uninitialized,
    /// A page request is outstanding: skeleton rows
    Loading,
    /// Loaded, no rows: "No Data"
    Empty,
    /// Loaded rows
    Populated,
}

impl RenderState {
    pub fn derive(is_initialized: bool, loading: bool, row_count: usize) -> Self {
        if !is_initialized {
            RenderState::Uninitialized
        } else if loading {
            RenderState::Loading
        } else if row_count == 0 {
            RenderState::Empty
        } else {
            RenderState::Populated
        }
    }

    pub fn shows_header(&self) -> bool {
        !matches!(self, RenderState::Uninitialized)
    }
}

/// Grid of placeholder rows shown while a page loads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkeletonGrid {
    key: Option<(usize, Vec<String>, usize)>,
    rows: Vec<Vec<&'static str>>,
}

impl SkeletonGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the grid if `count`, the header fields or `limit` changed.
    ///
    /// Returns true when a rebuild happened.
    pub fn refresh(&mut self, count: usize, header: &[TableHeaderItem], limit: usize) -> bool {
        let fields: Vec<String> = header.iter().map(|h| h.field.clone()).collect();
        let key = (count, fields, limit);
        if self.key.as_ref() == Some(&key) {
            return false;
        }

        let row_count = limit.min(count);
        self.rows = vec![vec![PLACEHOLDER; header.len()]; row_count];
        self.key = Some(key);
        true
    }

    pub fn rows(&self) -> &[Vec<&'static str>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
