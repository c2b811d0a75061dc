//! Page arithmetic - offsets, limits and rows-per-page options
//!
//! An offset is the zero-based index of the displayed page, a limit is the
//! number of rows on a page. All functions here are pure.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Page sizes offered to the user, in ascending order.
///
/// Each size beyond the first is only offered once the row count exceeds
/// the previous size.
const PAGE_SIZES: [usize; 7] = [10, 25, 50, 100, 200, 500, 1000];

/// Smallest page size, used whenever a limit is missing or invalid
pub const DEFAULT_LIMIT: usize = PAGE_SIZES[0];

/// Highest valid offset for `count` rows split into pages of `limit`.
///
/// A `limit` of zero has no meaningful page count and yields 0.
pub fn last_offset(count: usize, limit: usize) -> usize {
    if count == 0 || limit == 0 {
        return 0;
    }
    count.div_ceil(limit) - 1
}

/// Rows-per-page options for a table holding `count` rows
pub fn rows_per_page_options(count: usize) -> Vec<usize> {
    let mut options = vec![PAGE_SIZES[0]];
    for pair in PAGE_SIZES.windows(2) {
        if count > pair[0] {
            options.push(pair[1]);
        }
    }
    options
}

/// Snap an arbitrary limit onto the closest offered page size not above it
pub fn normalize_limit(limit: usize) -> usize {
    PAGE_SIZES
        .iter()
        .rev()
        .copied()
        .find(|size| *size <= limit)
        .unwrap_or(DEFAULT_LIMIT)
}

/// Current page position within a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub count: usize,
    pub limit: usize,
    pub offset: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            count: 0,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl PageRequest {
    /// Build a request, clamping `offset` to the last valid page
    pub fn new(count: usize, limit: usize, offset: usize) -> Self {
        Self {
            count,
            limit,
            offset: offset.min(last_offset(count, limit)),
        }
    }

    pub fn last_offset(&self) -> usize {
        last_offset(self.count, self.limit)
    }

    /// Absolute row indices covered by this page
    pub fn row_range(&self) -> Range<usize> {
        let start = (self.offset * self.limit).min(self.count);
        let end = (start + self.limit).min(self.count);
        start..end
    }

    /// Number of pages, never less than one
    pub fn page_count(&self) -> usize {
        self.last_offset() + 1
    }

    pub fn with_offset(&self, offset: usize) -> Self {
        Self::new(self.count, self.limit, offset)
    }

    /// Changing the page size always returns to the first page
    pub fn with_limit(&self, limit: usize) -> Self {
        Self::new(self.count, limit, 0)
    }

    pub fn with_count(&self, count: usize) -> Self {
        Self::new(count, self.limit, self.offset)
    }
}

/// Sort direction of the active sort column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    pub fn toggle(self) -> Self {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortDir::Asc => "▲",
            SortDir::Desc => "▼",
        }
    }
}

/// Active sort column, owned by the host rather than the table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    pub order_by: Option<String>,
    pub dir: SortDir,
}

impl SortState {
    /// Apply a header click: the same field flips direction, a new field
    /// becomes the only sort column, ascending.
    pub fn apply(&mut self, field: &str) {
        if self.order_by.as_deref() == Some(field) {
            self.dir = self.dir.toggle();
        } else {
            self.order_by = Some(field.to_string());
            self.dir = SortDir::Asc;
        }
    }

    pub fn is_sorted_by(&self, field: &str) -> bool {
        self.order_by.as_deref() == Some(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_offset_formula() {
        for count in 0..300 {
            for limit in [1, 3, 10, 25, 100] {
                let expected = if count == 0 {
                    0
                } else {
                    (count as f64 / limit as f64).ceil() as usize - 1
                };
                assert_eq!(last_offset(count, limit), expected, "{count}/{limit}");
            }
        }
    }

    #[test]
    fn test_last_offset_examples() {
        assert_eq!(last_offset(100, 10), 9);
        assert_eq!(last_offset(50, 25), 1);
        assert_eq!(last_offset(97, 10), 9);
        assert_eq!(last_offset(0, 10), 0);
        assert_eq!(last_offset(10, 10), 0);
        assert_eq!(last_offset(11, 10), 1);
    }

    #[test]
    fn test_last_offset_zero_limit() {
        assert_eq!(last_offset(42, 0), 0);
    }

    #[test]
    fn test_rows_per_page_options() {
        assert_eq!(rows_per_page_options(0), vec![10]);
        assert_eq!(rows_per_page_options(10), vec![10]);
        assert_eq!(rows_per_page_options(11), vec![10, 25]);
        assert_eq!(rows_per_page_options(26), vec![10, 25, 50]);
        assert_eq!(rows_per_page_options(51), vec![10, 25, 50, 100]);
        assert_eq!(rows_per_page_options(101), vec![10, 25, 50, 100, 200]);
        assert_eq!(rows_per_page_options(201), vec![10, 25, 50, 100, 200, 500]);
        assert_eq!(
            rows_per_page_options(501),
            vec![10, 25, 50, 100, 200, 500, 1000]
        );
        assert_eq!(rows_per_page_options(1_000_000).len(), 7);
    }

    #[test]
    fn test_rows_per_page_options_monotonic() {
        let mut previous = 0;
        for count in 0..1200 {
            let options = rows_per_page_options(count);
            assert_eq!(options[0], 10);
            assert!(options.len() >= previous);
            assert!(options.windows(2).all(|w| w[0] < w[1]));
            previous = options.len();
        }
    }

    #[test]
    fn test_normalize_limit() {
        assert_eq!(normalize_limit(0), 10);
        assert_eq!(normalize_limit(10), 10);
        assert_eq!(normalize_limit(30), 25);
        assert_eq!(normalize_limit(5000), 1000);
    }

    #[test]
    fn test_page_request_clamps_offset() {
        let page = PageRequest::new(97, 10, 42);
        assert_eq!(page.offset, 9);
        assert_eq!(page.row_range(), 90..97);

        let empty = PageRequest::new(0, 10, 3);
        assert_eq!(empty.offset, 0);
        assert_eq!(empty.row_range(), 0..0);
        assert_eq!(empty.page_count(), 1);
    }

    #[test]
    fn test_with_limit_resets_offset() {
        let page = PageRequest::new(500, 10, 7);
        for limit in [10, 25, 50, 100] {
            assert_eq!(page.with_limit(limit).offset, 0);
        }
    }

    #[test]
    fn test_with_count_keeps_offset_valid() {
        let page = PageRequest::new(100, 10, 9).with_count(35);
        assert_eq!(page.offset, 3);
        assert!(page.offset * page.limit < page.count);
    }

    #[test]
    fn test_sort_state_apply() {
        let mut sort = SortState::default();
        sort.apply("name");
        assert_eq!(sort.order_by.as_deref(), Some("name"));
        assert_eq!(sort.dir, SortDir::Asc);

        sort.apply("name");
        assert_eq!(sort.dir, SortDir::Desc);

        sort.apply("age");
        assert!(sort.is_sorted_by("age"));
        assert!(!sort.is_sorted_by("name"));
        assert_eq!(sort.dir, SortDir::Asc);
    }
}
