//! Model layer - table data and presentation state
//!
//! - `page` - offsets, limits, rows-per-page options, sort state
//! - `table` - header, row and cell types, cell resolution
//! - `render_state` - the four table presentations
//! - `dataset` - in-memory rows answering page queries
//! - `modal` - overlay stack

pub mod dataset;
pub mod modal;
pub mod page;
pub mod render_state;
pub mod table;
pub mod ui;

pub use dataset::{Dataset, PageQuery, PageResult};
pub use page::{PageRequest, SortDir, SortState};
pub use render_state::{RenderState, SkeletonGrid};
pub use table::{CellContent, CellKind, TableCell, TableHeaderItem, TableRowType};
pub use ui::{Theme, ThemeKind};
