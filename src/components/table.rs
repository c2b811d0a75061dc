//! Table component
//!
//! Renders one page of rows with headers, sort markers, a row cursor and the
//! pagination footer. What is drawn depends only on the current
//! [`TableProps`]: a spinner before the first data arrives, skeleton rows
//! while a page loads, "No Data" for an empty page, or the rows themselves.

use crate::action::Action;
use crate::component::Component;
use crate::components::{BusyIndicator, PaginationFooter};
use crate::model::page::{rows_per_page_options, PageRequest, SortState};
use crate::model::render_state::{RenderState, SkeletonGrid};
use crate::model::table::{get_data_to_populate, Align, CellContent, TableHeaderItem, TableRowType};
use crate::model::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a measured column may grow
const MAX_COLUMN_WIDTH: usize = 40;
const COLUMN_SEPARATOR: &str = " │ ";
/// Header line plus separator line
const HEADER_LINES: u16 = 2;

/// Everything the host passes to the table each frame
#[derive(Debug, Clone, Default)]
pub struct TableProps {
    pub title: String,
    pub header: Vec<TableHeaderItem>,
    /// Rows of the current page
    pub rows: Vec<TableRowType>,
    pub page: PageRequest,
    pub is_initialized: bool,
    pub loading: bool,
    pub sort: SortState,
    pub hide_footer: bool,
    pub rows_clickable: bool,
    /// Disable pagination regardless of position
    pub disabled: bool,
}

impl TableProps {
    pub fn render_state(&self) -> RenderState {
        RenderState::derive(self.is_initialized, self.loading, self.rows.len())
    }
}

/// Table component
pub struct TableComponent {
    props: TableProps,
    skeleton: SkeletonGrid,
    /// Selected row within the page
    cursor: usize,
    /// First row drawn, keeps the cursor in view
    scroll: usize,
    /// Column that `s` sorts by
    focused_column: usize,
    theme: Theme,
    busy: BusyIndicator,
    footer: PaginationFooter,
    header_hits: Vec<(Rect, String)>,
    row_hits: Vec<(Rect, String)>,
}

impl Default for TableComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl TableComponent {
    pub fn new() -> Self {
        Self {
            props: TableProps::default(),
            skeleton: SkeletonGrid::new(),
            cursor: 0,
            scroll: 0,
            focused_column: 0,
            theme: Theme::default(),
            busy: BusyIndicator::new("Loading table…"),
            footer: PaginationFooter::new(),
            header_hits: Vec::new(),
            row_hits: Vec::new(),
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.busy.set_theme(theme);
        self.footer.set_theme(theme);
    }

    /// Replace the props snapshot
    pub fn set_props(&mut self, props: TableProps) {
        if props.rows != self.props.rows {
            self.cursor = 0;
            self.scroll = 0;
        }
        if props.render_state() == RenderState::Loading {
            self.skeleton
                .refresh(props.page.count, &props.header, props.page.limit);
        }
        self.focused_column = self
            .focused_column
            .min(props.header.len().saturating_sub(1));
        self.footer
            .set_state(props.page, props.disabled || props.loading);
        self.props = props;
    }

    pub fn props(&self) -> &TableProps {
        &self.props
    }

    pub fn render_state(&self) -> RenderState {
        self.props.render_state()
    }

    pub fn skeleton(&self) -> &SkeletonGrid {
        &self.skeleton
    }

    pub fn footer(&self) -> &PaginationFooter {
        &self.footer
    }

    pub fn selected_row(&self) -> Option<&TableRowType> {
        match self.render_state() {
            RenderState::Populated => self.props.rows.get(self.cursor),
            _ => None,
        }
    }

    pub fn focused_column(&self) -> Option<&TableHeaderItem> {
        self.props.header.get(self.focused_column)
    }

    fn shows_footer(&self) -> bool {
        !self.props.hide_footer
            && matches!(
                self.render_state(),
                RenderState::Loading | RenderState::Populated
            )
    }

    /// A header was clicked: only sortable columns emit a sort change
    pub fn sort_click(&self, field: &str) -> Option<Action> {
        self.props
            .header
            .iter()
            .find(|h| h.field == field && h.sortable)
            .map(|h| Action::ChangeSort(h.field.clone()))
    }

    /// A row was activated: emits only when rows are clickable
    pub fn row_click(&self, id: &str) -> Option<Action> {
        (self.props.rows_clickable && self.render_state() == RenderState::Populated)
            .then(|| Action::ClickRow(id.to_string()))
    }

    /// Neighbouring rows-per-page option, `step` of +1 or -1
    pub fn step_limit(&self, step: isize) -> Option<Action> {
        let options = rows_per_page_options(self.props.page.count);
        let current = options
            .iter()
            .rposition(|size| *size <= self.props.page.limit)
            .unwrap_or(0);
        let target = current.checked_add_signed(step)?;
        options
            .get(target)
            .copied()
            .filter(|size| *size != self.props.page.limit)
            .map(Action::ChangeLimit)
    }

    /// Column widths for the current header and rows
    pub fn column_widths(&self) -> Vec<usize> {
        let placeholder = self
            .skeleton
            .rows()
            .first()
            .and_then(|r| r.first())
            .map(|p| p.width())
            .unwrap_or(0);

        self.props
            .header
            .iter()
            .enumerate()
            .map(|(column, item)| {
                if let Some(width) = item.width {
                    return width as usize;
                }
                let title = item.title.width() + 2;
                let cells = self
                    .props
                    .rows
                    .iter()
                    .filter_map(|r| r.cell(column))
                    .map(|c| get_data_to_populate(c).as_text().width())
                    .max()
                    .unwrap_or(0);
                title.max(cells).max(placeholder).min(MAX_COLUMN_WIDTH)
            })
            .collect()
    }

    /// Header line, separator and body lines for the current state
    pub fn build_lines(&self, widths: &[usize]) -> Vec<Line<'static>> {
        let state = self.render_state();
        if !state.shows_header() {
            return Vec::new();
        }

        let mut lines = vec![self.header_line(widths)];
        let separator = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        lines.push(Line::from(Span::styled(separator, self.theme.muted())));

        match state {
            RenderState::Loading => {
                let style = Style::default().fg(self.theme.placeholder);
                for row in self.skeleton.rows() {
                    let spans = row
                        .iter()
                        .zip(widths)
                        .map(|(cell, width)| {
                            Span::styled(fit(cell, *width, Align::Left), style)
                        })
                        .collect();
                    lines.push(join_columns(spans, self.theme.muted()));
                }
            }
            RenderState::Empty => {
                let total: usize = widths.iter().sum::<usize>()
                    + COLUMN_SEPARATOR.width() * widths.len().saturating_sub(1);
                lines.push(Line::from(Span::styled(
                    fit("No Data", total.max(7), Align::Center),
                    self.theme.muted().add_modifier(Modifier::ITALIC),
                )));
            }
            RenderState::Populated => {
                for (index, row) in self.props.rows.iter().enumerate() {
                    let mut line = self.row_line(row, widths);
                    if index == self.cursor {
                        line = line.style(Style::default().bg(self.theme.selected_bg));
                    }
                    lines.push(line);
                }
            }
            RenderState::Uninitialized => {}
        }

        lines
    }

    fn header_line(&self, widths: &[usize]) -> Line<'static> {
        let spans = self
            .props
            .header
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(column, (item, width))| {
                let mut title = item.title.clone();
                if self.props.sort.is_sorted_by(&item.field) {
                    title = format!("{} {}", title, self.props.sort.dir.arrow());
                }
                let mut style = self.theme.heading();
                if column == self.focused_column {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }
                if !item.sortable {
                    style = style.remove_modifier(Modifier::BOLD);
                }
                Span::styled(fit(&title, *width, item.align()), style)
            })
            .collect();
        join_columns(spans, self.theme.muted())
    }

    fn row_line(&self, row: &TableRowType, widths: &[usize]) -> Line<'static> {
        let spans = self
            .props
            .header
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(column, (item, width))| {
                let content = row
                    .cell(column)
                    .map(get_data_to_populate)
                    .unwrap_or(CellContent::Empty);
                let style = match content {
                    CellContent::Icon { color, .. } => {
                        Style::default().fg(color.unwrap_or(self.theme.fg))
                    }
                    CellContent::Checkbox(true) => Style::default().fg(self.theme.ok),
                    _ => self.theme.text(),
                };
                Span::styled(fit(&content.as_text(), *width, item.align()), style)
            })
            .collect();
        join_columns(spans, self.theme.muted())
    }

    /// Keep the cursor inside the visible window of `height` rows
    fn scroll_into_view(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + height {
            self.scroll = self.cursor + 1 - height;
        }
    }

    /// Record where headers and rows were drawn, for mouse hit testing
    fn record_hits(&mut self, area: Rect, widths: &[usize], visible_rows: usize) {
        self.header_hits.clear();
        self.row_hits.clear();

        let mut x = area.x;
        for (item, width) in self.props.header.iter().zip(widths) {
            let width = *width as u16;
            self.header_hits
                .push((Rect::new(x, area.y, width, 1), item.field.clone()));
            x = x.saturating_add(width + COLUMN_SEPARATOR.width() as u16);
        }

        if self.render_state() != RenderState::Populated {
            return;
        }
        let first_row_y = area.y + HEADER_LINES;
        for (line, row) in self
            .props
            .rows
            .iter()
            .skip(self.scroll)
            .take(visible_rows)
            .enumerate()
        {
            let y = first_row_y + line as u16;
            self.row_hits
                .push((Rect::new(area.x, y, area.width, 1), row.id.clone()));
        }
    }
}

/// Pad or truncate `text` to exactly `width` columns
fn fit(text: &str, width: usize, align: Align) -> String {
    let mut text = text.replace('\n', " ");
    if text.width() > width {
        let mut cut = String::new();
        let mut used = 0;
        for c in text.chars() {
            let w = c.width().unwrap_or(0);
            if used + w + 1 > width {
                break;
            }
            used += w;
            cut.push(c);
        }
        if width > 0 {
            cut.push('…');
        }
        text = cut;
    }

    let pad = width.saturating_sub(text.width());
    match align {
        Align::Left => format!("{}{}", text, " ".repeat(pad)),
        Align::Right => format!("{}{}", " ".repeat(pad), text),
        Align::Center => {
            let left = pad / 2;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(pad - left))
        }
    }
}

fn join_columns(cells: Vec<Span<'static>>, separator: Style) -> Line<'static> {
    let mut spans = Vec::with_capacity(cells.len() * 2);
    for (i, cell) in cells.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(COLUMN_SEPARATOR, separator));
        }
        spans.push(cell);
    }
    Line::from(spans)
}

impl Component for TableComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextRow),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevRow),
            KeyCode::Char('>') | KeyCode::Tab => Some(Action::NextColumn),
            KeyCode::Char('<') | KeyCode::BackTab => Some(Action::PrevColumn),
            KeyCode::Char('s') => Some(Action::SortFocusedColumn),
            KeyCode::Enter => self
                .selected_row()
                .and_then(|row| self.row_click(&row.id)),
            KeyCode::Char('r') => Some(Action::OpenLimitSelector),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::NextLimit),
            KeyCode::Char('-') => Some(Action::PreviousLimit),
            _ if self.shows_footer() => self.footer.handle_key_event(key)?,
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(None);
        }
        let position = Position::new(mouse.column, mouse.row);

        if let Some((_, field)) = self.header_hits.iter().find(|(r, _)| r.contains(position)) {
            return Ok(self.sort_click(field));
        }

        if let Some(index) = self
            .row_hits
            .iter()
            .position(|(r, _)| r.contains(position))
        {
            self.cursor = self.scroll + index;
            let id = self.row_hits[index].1.clone();
            return Ok(self.row_click(&id));
        }

        if self.shows_footer() {
            return self.footer.handle_mouse_event(mouse);
        }
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                self.busy.update(Action::Tick)?;
            }
            Action::NextRow => {
                let max = self.props.rows.len().saturating_sub(1);
                if self.cursor < max {
                    self.cursor += 1;
                }
            }
            Action::PrevRow => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            Action::NextColumn => {
                let max = self.props.header.len().saturating_sub(1);
                if self.focused_column < max {
                    self.focused_column += 1;
                }
            }
            Action::PrevColumn => {
                self.focused_column = self.focused_column.saturating_sub(1);
            }
            Action::SortFocusedColumn => {
                let field = self.focused_column().map(|h| h.field.clone());
                return Ok(field.and_then(|f| self.sort_click(&f)));
            }
            Action::NextLimit => return Ok(self.step_limit(1)),
            Action::PreviousLimit => return Ok(self.step_limit(-1)),
            Action::FirstPage | Action::PreviousPage | Action::NextPage | Action::LastPage => {
                return self.footer.update(action);
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.props.title))
            .title_style(self.theme.heading())
            .border_style(self.theme.border());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.render_state() == RenderState::Uninitialized {
            self.header_hits.clear();
            self.row_hits.clear();
            return self.busy.draw(frame, inner);
        }

        let (body, footer) = if self.shows_footer() {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(1)])
                .split(inner);
            (chunks[0], Some(chunks[1]))
        } else {
            (inner, None)
        };

        let widths = self.column_widths();
        let visible_rows = body.height.saturating_sub(HEADER_LINES) as usize;
        if self.render_state() == RenderState::Populated {
            self.scroll_into_view(visible_rows);
        } else {
            self.scroll = 0;
        }

        let mut lines = self.build_lines(&widths);
        // Keep the header pinned while rows scroll
        let body_lines: Vec<Line<'static>> = lines
            .drain(HEADER_LINES as usize..)
            .skip(self.scroll)
            .collect();
        lines.extend(body_lines);

        frame.render_widget(Paragraph::new(lines), body);
        self.record_hits(body, &widths, visible_rows);

        if let Some(footer_area) = footer {
            self.footer.draw(frame, footer_area)?;
        }
        Ok(())
    }
}
