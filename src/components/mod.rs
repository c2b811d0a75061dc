//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod busy;
pub mod help_dialog;
pub mod layout;
pub mod limit_selector;
pub mod pagination;
pub mod quit_dialog;
pub mod row_detail;
pub mod status_bar;
pub mod table;

pub use busy::BusyIndicator;
pub use help_dialog::HelpDialog;
pub use layout::{calculate_main_layout, centered_popup};
pub use limit_selector::LimitSelectorDialog;
pub use pagination::{PaginationController, PaginationFooter};
pub use quit_dialog::QuitDialog;
pub use row_detail::RowDetailDialog;
pub use status_bar::{render_help_bar, render_status_bar, StatusContext};
pub use table::{TableComponent, TableProps};
