//! Root application component
//!
//! The App owns the page position, the sort state and the background worker,
//! and hands a fresh [`TableProps`] snapshot to the table after every update.
//! Components report what the user asked for through Actions; the App is
//! the only place that turns those into page queries.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    calculate_main_layout, render_help_bar, render_status_bar, HelpDialog, LimitSelectorDialog,
    QuitDialog, RowDetailDialog, StatusContext, TableComponent, TableProps,
};
use crate::config::Config;
use crate::model::modal::{Modal, ModalStack};
use crate::model::{Dataset, PageRequest, SortState, TableHeaderItem, TableRowType, Theme};
use crate::services::{PageWorker, WorkerMessage};
use anyhow::Result;
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{layout::Rect, Frame};
use std::path::PathBuf;
use std::time::Duration;

/// Ticks a transient status message stays visible
const STATUS_MESSAGE_TICKS: u16 = 40;

/// Where rows come from
enum DataSource {
    File(PathBuf),
    Memory(Dataset),
    Missing,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    pub config: Config,
    pub theme: Theme,

    source: DataSource,
    worker: Option<PageWorker>,

    /// Column metadata, known once the worker has loaded the dataset
    pub header: Vec<TableHeaderItem>,
    /// Rows of the current page
    pub rows: Vec<TableRowType>,
    pub page: PageRequest,
    pub sort: SortState,
    /// First data (or a load failure) has arrived
    pub is_initialized: bool,
    pub loaded_at: Option<DateTime<Local>>,

    pub modals: ModalStack,
    pub should_quit: bool,
    pub error: Option<String>,
    pub status_message: Option<String>,
    status_ticks: u16,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub table: TableComponent,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
    pub limit_selector: LimitSelectorDialog,
    pub row_detail: RowDetailDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    /// Create an App reading from the configured source file
    pub fn new(config: Config) -> App {
        let source = if config.source_path.is_empty() {
            DataSource::Missing
        } else {
            DataSource::File(PathBuf::from(&config.source_path))
        };
        Self::create_app(config, source)
    }

    /// Create an App over rows already in memory
    pub fn with_dataset(config: Config, dataset: Dataset) -> App {
        Self::create_app(config, DataSource::Memory(dataset))
    }

    fn create_app(config: Config, source: DataSource) -> App {
        let config = config.normalized();
        let theme = Theme::new(config.theme);
        let mut app = App {
            page: PageRequest::new(0, config.default_limit, 0),
            theme,
            source,
            worker: None,
            header: Vec::new(),
            rows: Vec::new(),
            sort: SortState::default(),
            is_initialized: false,
            loaded_at: None,
            modals: ModalStack::new(),
            should_quit: false,
            error: None,
            status_message: None,
            status_ticks: 0,
            table: TableComponent::new(),
            quit_dialog: QuitDialog::default(),
            help_dialog: HelpDialog::default(),
            limit_selector: LimitSelectorDialog::new(),
            row_detail: RowDetailDialog::default(),
            config,
        };
        app.apply_theme();
        app.sync_table();
        app
    }

    /// Display name of the data source
    pub fn source_name(&self) -> Option<String> {
        match &self.source {
            DataSource::File(path) => Some(
                path.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string()),
            ),
            DataSource::Memory(_) => Some("memory".to_string()),
            DataSource::Missing => None,
        }
    }

    /// Show a transient message in the status bar
    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_ticks = STATUS_MESSAGE_TICKS;
    }

    fn expire_status(&mut self) {
        if self.status_ticks > 0 {
            self.status_ticks -= 1;
            if self.status_ticks == 0 {
                self.status_message = None;
            }
        }
    }

    /// True while a page query is outstanding
    pub fn is_loading(&self) -> bool {
        self.worker.as_ref().is_some_and(|w| w.is_pending())
    }

    /// Start (or restart) the worker and ask for the current page
    fn start_worker(&mut self) {
        let latency = Duration::from_millis(self.config.latency_ms);
        let worker = match &self.source {
            DataSource::File(path) => {
                log::info!("opening {}", path.display());
                PageWorker::spawn(path.clone(), latency)
            }
            DataSource::Memory(dataset) => PageWorker::from_dataset(dataset.clone(), latency),
            DataSource::Missing => {
                self.is_initialized = true;
                self.error = Some(
                    "No data file. Pass a path or set source_path in ~/.pagetable/config.json"
                        .to_string(),
                );
                log::warn!("no data source configured");
                return;
            }
        };

        self.worker = Some(worker);
        self.is_initialized = false;
        self.header.clear();
        self.rows.clear();
        self.error = None;
        self.page = PageRequest::new(0, self.page.limit, 0);
        self.request_page();
    }

    fn request_page(&mut self) {
        if let Some(worker) = self.worker.as_mut() {
            worker.request(self.page.offset, self.page.limit, self.sort.clone());
        }
    }

    /// Apply whatever the worker has sent since the last tick
    fn poll_worker(&mut self) {
        let Some(worker) = self.worker.as_mut() else {
            return;
        };

        let elapsed = worker.elapsed();
        for message in worker.poll() {
            match message {
                WorkerMessage::Loaded { header, count } => {
                    log::info!(
                        "dataset ready after {:?}: {} rows, {} columns",
                        elapsed,
                        count,
                        header.len()
                    );
                    self.header = header;
                    self.page = self.page.with_count(count);
                    self.is_initialized = true;
                    self.loaded_at = Some(Local::now());
                }
                WorkerMessage::Page(result) => {
                    self.page = PageRequest::new(result.count, self.page.limit, result.offset);
                    self.rows = result.rows;
                }
                WorkerMessage::Failed(err) => {
                    log::error!("data source failed: {}", err);
                    self.error = Some(err);
                    self.is_initialized = true;
                    self.rows.clear();
                }
            }
        }
    }

    /// Push the current state into the table
    fn sync_table(&mut self) {
        let props = TableProps {
            title: self.source_name().unwrap_or_else(|| "pagetable".to_string()),
            header: self.header.clone(),
            rows: self.rows.clone(),
            page: self.page,
            is_initialized: self.is_initialized,
            loading: self.is_loading(),
            sort: self.sort.clone(),
            hide_footer: self.config.hide_footer,
            rows_clickable: self.config.rows_clickable,
            disabled: false,
        };
        self.table.set_props(props);
    }

    fn apply_theme(&mut self) {
        self.theme = Theme::new(self.config.theme);
        self.table.set_theme(self.theme);
        self.quit_dialog.set_theme(self.theme);
        self.help_dialog.set_theme(self.theme);
        self.limit_selector.set_theme(self.theme);
        self.row_detail.set_theme(self.theme);
    }

    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
            Modal::RowDetail { .. } => self.row_detail.handle_key_event(key),
            Modal::LimitSelector { .. } => self.limit_selector.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area),
            Modal::Help => self.help_dialog.draw(frame, area),
            Modal::RowDetail { .. } => self.row_detail.draw(frame, area),
            Modal::LimitSelector { .. } => self.limit_selector.draw(frame, area),
        }
    }

    /// Route an action to the modal on top, keeping its recorded state current
    fn update_modal(&mut self, action: Action) -> Result<Option<Action>> {
        let Some(modal) = self.modals.top().cloned() else {
            return Ok(None);
        };
        match modal {
            Modal::LimitSelector { .. } => {
                let follow_up = self.limit_selector.update(action)?;
                if let Some(Modal::LimitSelector { selected_index }) = self.modals.top_mut() {
                    *selected_index = self.limit_selector.selected_index;
                }
                if matches!(follow_up, Some(Action::ChangeLimit(_))) {
                    self.modals.pop();
                }
                Ok(follow_up)
            }
            _ => Ok(None),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        self.start_worker();
        self.sync_table();
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::ForceQuit));
        }

        if let Some(modal) = self.modals.top().cloned() {
            return self.handle_modal_key_event(&modal, key);
        }

        let action = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::OpenQuitDialog),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('R') => Some(Action::Reload),
            KeyCode::Char('t') => Some(Action::ToggleTheme),
            _ => self.table.handle_key_event(key)?,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if !self.modals.is_empty() {
            return Ok(None);
        }
        self.table.handle_mouse_event(mouse)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let follow_up = match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                self.poll_worker();
                self.expire_status();
                self.table.update(Action::Tick)?
            }
            Action::ForceQuit => {
                self.should_quit = true;
                None
            }
            Action::Resize(_, _) => None,

            // ─────────────────────────────────────────────────────────────────
            // Paging
            // ─────────────────────────────────────────────────────────────────
            Action::ChangeOffset(offset) => {
                self.page = self.page.with_offset(offset);
                log::debug!("offset -> {}", self.page.offset);
                self.request_page();
                None
            }
            Action::ChangeLimit(limit) => {
                log::info!("rows per page -> {}", limit);
                self.page = self.page.with_limit(limit);
                // A new page size always starts over at the first page
                Some(Action::ChangeOffset(0))
            }

            // ─────────────────────────────────────────────────────────────────
            // Table (delegate to TableComponent)
            // ─────────────────────────────────────────────────────────────────
            Action::FirstPage
            | Action::PreviousPage
            | Action::NextPage
            | Action::LastPage
            | Action::NextLimit
            | Action::PreviousLimit
            | Action::NextRow
            | Action::PrevRow
            | Action::NextColumn
            | Action::PrevColumn
            | Action::SortFocusedColumn => self.table.update(action)?,

            Action::ChangeSort(field) => {
                self.sort.apply(&field);
                log::info!("sort by {} {:?}", field, self.sort.dir);
                self.request_page();
                None
            }
            Action::ClickRow(id) => {
                if let Some(row) = self.rows.iter().find(|r| r.id == id) {
                    self.row_detail.show(&self.header, row);
                    self.modals.push(Modal::RowDetail { row_id: id });
                }
                None
            }

            // ─────────────────────────────────────────────────────────────────
            // Data
            // ─────────────────────────────────────────────────────────────────
            Action::Reload => {
                log::info!("reloading data source");
                self.start_worker();
                self.set_status("Reloaded");
                None
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
                None
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
                None
            }
            Action::OpenLimitSelector => {
                self.limit_selector.open(self.page.count, self.page.limit);
                self.modals.push(Modal::LimitSelector {
                    selected_index: self.limit_selector.selected_index,
                });
                None
            }
            Action::CloseModal => {
                self.modals.pop();
                None
            }
            Action::ConfirmModal | Action::ModalUp | Action::ModalDown => {
                self.update_modal(action)?
            }

            // ─────────────────────────────────────────────────────────────────
            // View
            // ─────────────────────────────────────────────────────────────────
            Action::ToggleTheme => {
                self.config.theme = self.config.theme.toggle();
                log::info!("theme -> {}", self.config.theme.name());
                self.apply_theme();
                if let Err(e) = self.config.save() {
                    log::warn!("could not save config: {}", e);
                }
                None
            }
        };

        self.sync_table();
        Ok(follow_up)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let layout = calculate_main_layout(area);

        self.table.draw(frame, layout.table)?;

        let source = self.source_name();
        let ctx = StatusContext {
            source: source.as_deref(),
            sort: &self.sort,
            loaded_at: self.loaded_at,
            error: self.error.as_deref(),
            message: self.status_message.as_deref(),
        };
        render_status_bar(frame, layout.status, &ctx, &self.theme);
        render_help_bar(frame, layout.help, &self.theme);

        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::render_state::RenderState;
    use crate::model::TableCell;
    use std::time::Instant;

    fn dataset(count: usize) -> Dataset {
        let header = vec![
            TableHeaderItem::new("n", "N").sortable(),
            TableHeaderItem::new("label", "Label"),
        ];
        let rows = (0..count)
            .map(|i| {
                TableRowType::new(
                    i.to_string(),
                    vec![TableCell::text(i as u64), TableCell::text(format!("item {i}"))],
                )
            })
            .collect();
        Dataset::new(header, rows)
    }

    /// Fold an action and its follow-ups, like the main loop
    fn dispatch(app: &mut App, action: Action) {
        let mut current = Some(action);
        while let Some(a) = current {
            current = app.update(a).unwrap();
        }
    }

    /// Tick until no page query is outstanding
    fn settle(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            dispatch(app, Action::Tick);
            if app.is_initialized && !app.is_loading() {
                break;
            }
            assert!(Instant::now() < deadline, "worker did not answer");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    fn app_with(count: usize) -> App {
        let config = Config {
            rows_clickable: true,
            ..Config::default()
        };
        let mut app = App::with_dataset(config, dataset(count));
        app.init().unwrap();
        app
    }

    #[test]
    fn test_starts_uninitialized_then_populates() {
        let mut app = app_with(97);
        assert_eq!(app.table.render_state(), RenderState::Uninitialized);

        settle(&mut app);
        assert_eq!(app.table.render_state(), RenderState::Populated);
        assert_eq!(app.page.count, 97);
        assert_eq!(app.rows.len(), 10);
        assert!(app.loaded_at.is_some());
    }

    #[test]
    fn test_request_shows_loading() {
        let mut app = app_with(97);
        settle(&mut app);

        dispatch(&mut app, Action::NextPage);
        assert_eq!(app.page.offset, 1);
        assert_eq!(app.table.render_state(), RenderState::Loading);

        settle(&mut app);
        assert_eq!(app.rows[0].id, "10");
    }

    #[test]
    fn test_last_page() {
        let mut app = app_with(97);
        settle(&mut app);

        dispatch(&mut app, Action::LastPage);
        settle(&mut app);
        assert_eq!(app.page.offset, 9);
        assert_eq!(app.rows.len(), 7);

        // Already on the last page: nothing is requested
        dispatch(&mut app, Action::NextPage);
        assert!(!app.is_loading());
        assert_eq!(app.page.offset, 9);
    }

    #[test]
    fn test_limit_change_resets_offset() {
        let mut app = app_with(300);
        settle(&mut app);
        dispatch(&mut app, Action::ChangeOffset(5));
        settle(&mut app);
        assert_eq!(app.page.offset, 5);

        dispatch(&mut app, Action::ChangeLimit(25));
        assert_eq!(app.page.offset, 0);
        assert_eq!(app.page.limit, 25);
        assert_eq!(app.table.props().page.limit, 25);
        settle(&mut app);
        assert_eq!(app.rows.len(), 25);
        assert_eq!(app.rows[0].id, "0");
    }

    #[test]
    fn test_limit_selector_flow() {
        let mut app = app_with(120);
        settle(&mut app);

        dispatch(&mut app, Action::OpenLimitSelector);
        assert!(matches!(app.modals.top(), Some(Modal::LimitSelector { selected_index: 0 })));
        dispatch(&mut app, Action::ModalDown);
        dispatch(&mut app, Action::ModalDown);
        dispatch(&mut app, Action::ConfirmModal);

        assert!(app.modals.is_empty());
        assert_eq!(app.page.limit, 50);
        assert_eq!(app.page.offset, 0);
    }

    #[test]
    fn test_sort_change_requests_sorted_page() {
        let mut app = app_with(30);
        settle(&mut app);

        dispatch(&mut app, Action::SortFocusedColumn);
        settle(&mut app);
        assert!(app.sort.is_sorted_by("n"));

        dispatch(&mut app, Action::SortFocusedColumn);
        settle(&mut app);
        assert_eq!(app.rows[0].id, "29");
    }

    #[test]
    fn test_click_row_opens_detail() {
        let mut app = app_with(5);
        settle(&mut app);

        dispatch(&mut app, Action::ClickRow("3".to_string()));
        assert_eq!(
            app.modals.top(),
            Some(&Modal::RowDetail {
                row_id: "3".to_string()
            })
        );
    }

    #[test]
    fn test_empty_dataset() {
        let mut app = app_with(0);
        settle(&mut app);
        assert_eq!(app.table.render_state(), RenderState::Empty);
        assert_eq!(app.page.last_offset(), 0);
    }

    #[test]
    fn test_missing_source_reports_error() {
        let mut app = App::new(Config::default());
        app.init().unwrap();
        assert!(app.error.is_some());
        assert_eq!(app.table.render_state(), RenderState::Empty);
    }

    #[test]
    fn test_quit_flow() {
        let mut app = app_with(5);
        let key = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);

        let action = app.handle_key_event(key('q')).unwrap();
        assert_eq!(action, Some(Action::OpenQuitDialog));
        dispatch(&mut app, Action::OpenQuitDialog);

        let action = app.handle_key_event(key('y')).unwrap();
        assert_eq!(action, Some(Action::ForceQuit));
        dispatch(&mut app, Action::ForceQuit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_reload_message_expires() {
        let mut app = app_with(5);
        settle(&mut app);

        dispatch(&mut app, Action::Reload);
        assert_eq!(app.status_message.as_deref(), Some("Reloaded"));
        for _ in 0..STATUS_MESSAGE_TICKS {
            dispatch(&mut app, Action::Tick);
        }
        assert_eq!(app.status_message, None);
    }

    #[test]
    fn test_help_scroll_lives_in_dialog() {
        let mut app = app_with(5);
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);

        dispatch(&mut app, Action::OpenHelp);
        assert_eq!(app.modals.top(), Some(&Modal::Help));
        assert_eq!(app.handle_key_event(key(KeyCode::Down)).unwrap(), None);
        assert_eq!(app.help_dialog.scroll_offset, 1);

        let close = app.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert_eq!(close, Some(Action::CloseModal));
        dispatch(&mut app, Action::CloseModal);
        assert!(app.modals.is_empty());

        dispatch(&mut app, Action::OpenHelp);
        assert_eq!(app.help_dialog.scroll_offset, 0);
    }
}
