//! Action enum - All possible application actions
//!
//! Components emit Actions in response to events, and the App processes
//! them to update state. An Action that nobody handles is simply dropped.

use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for animations and worker polling
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Paging
    // ─────────────────────────────────────────────────────────────────────────
    /// Jump to the first page
    FirstPage,
    /// Go back one page
    PreviousPage,
    /// Go forward one page
    NextPage,
    /// Jump to the last page
    LastPage,
    /// Request a specific page
    ChangeOffset(usize),
    /// Change the rows-per-page
    ChangeLimit(usize),
    /// Step to the next larger rows-per-page option
    NextLimit,
    /// Step to the next smaller rows-per-page option
    PreviousLimit,

    // ─────────────────────────────────────────────────────────────────────────
    // Table
    // ─────────────────────────────────────────────────────────────────────────
    /// Sort by a column field
    ChangeSort(String),
    /// A row was activated
    ClickRow(String),
    /// Move the row cursor down
    NextRow,
    /// Move the row cursor up
    PrevRow,
    /// Focus the next column header
    NextColumn,
    /// Focus the previous column header
    PrevColumn,
    /// Sort by the focused column
    SortFocusedColumn,

    // ─────────────────────────────────────────────────────────────────────────
    // Data
    // ─────────────────────────────────────────────────────────────────────────
    /// Reload the dataset from disk
    Reload,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Open the rows-per-page selector
    OpenLimitSelector,
    /// Close the current modal
    CloseModal,
    /// Confirm the current modal choice
    ConfirmModal,
    /// Previous option in the current modal
    ModalUp,
    /// Next option in the current modal
    ModalDown,

    // ─────────────────────────────────────────────────────────────────────────
    // View
    // ─────────────────────────────────────────────────────────────────────────
    /// Switch between dark and light palettes
    ToggleTheme,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::FirstPage => write!(f, "FirstPage"),
            Action::PreviousPage => write!(f, "PreviousPage"),
            Action::NextPage => write!(f, "NextPage"),
            Action::LastPage => write!(f, "LastPage"),
            Action::ChangeOffset(o) => write!(f, "ChangeOffset({})", o),
            Action::ChangeLimit(l) => write!(f, "ChangeLimit({})", l),
            Action::NextLimit => write!(f, "NextLimit"),
            Action::PreviousLimit => write!(f, "PreviousLimit"),
            Action::ChangeSort(field) => write!(f, "ChangeSort({})", field),
            Action::ClickRow(id) => write!(f, "ClickRow({})", id),
            Action::NextRow => write!(f, "NextRow"),
            Action::PrevRow => write!(f, "PrevRow"),
            Action::NextColumn => write!(f, "NextColumn"),
            Action::PrevColumn => write!(f, "PrevColumn"),
            Action::SortFocusedColumn => write!(f, "SortFocusedColumn"),
            Action::Reload => write!(f, "Reload"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::OpenLimitSelector => write!(f, "OpenLimitSelector"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ConfirmModal => write!(f, "ConfirmModal"),
            Action::ModalUp => write!(f, "ModalUp"),
            Action::ModalDown => write!(f, "ModalDown"),
            Action::ToggleTheme => write!(f, "ToggleTheme"),
        }
    }
}
