//! Pagination controls
//!
//! [`PaginationController`] is the pure logic: which of the first, previous,
//! next and last actions are enabled, and which offset each would request.
//! [`PaginationFooter`] draws the controls and turns key presses and clicks
//! into offset changes.

use crate::action::Action;
use crate::component::Component;
use crate::model::page::{last_offset, PageRequest};
use crate::model::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Enabled state and target offsets of the four navigation actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaginationController {
    pub page: PageRequest,
    /// Forces every action off, e.g. while a page is loading
    pub disabled: bool,
}

impl PaginationController {
    pub fn new(page: PageRequest, disabled: bool) -> Self {
        Self { page, disabled }
    }

    pub fn last_offset(&self) -> usize {
        last_offset(self.page.count, self.page.limit)
    }

    pub fn is_first_enabled(&self) -> bool {
        !self.disabled && self.page.offset > 0
    }

    pub fn is_previous_enabled(&self) -> bool {
        !self.disabled && self.page.offset > 0
    }

    pub fn is_next_enabled(&self) -> bool {
        !self.disabled && self.page.offset < self.last_offset()
    }

    pub fn is_last_enabled(&self) -> bool {
        !self.disabled && self.page.offset < self.last_offset()
    }

    /// Offset to request for "first", or None when nothing should be emitted
    pub fn on_first(&self) -> Option<usize> {
        self.is_first_enabled().then_some(0)
    }

    pub fn on_previous(&self) -> Option<usize> {
        self.is_previous_enabled().then(|| self.page.offset - 1)
    }

    pub fn on_next(&self) -> Option<usize> {
        self.is_next_enabled().then(|| self.page.offset + 1)
    }

    pub fn on_last(&self) -> Option<usize> {
        self.is_last_enabled().then(|| self.last_offset())
    }
}

/// Navigation buttons in the order they are drawn
const BUTTONS: [(&str, Action); 4] = [
    (" ⏮ ", Action::FirstPage),
    (" ◀ ", Action::PreviousPage),
    (" ▶ ", Action::NextPage),
    (" ⏭ ", Action::LastPage),
];

/// Footer line with navigation buttons and the page summary
#[derive(Default)]
pub struct PaginationFooter {
    controller: PaginationController,
    theme: Theme,
    /// Button hit areas from the last draw
    buttons: Vec<(Rect, Action)>,
}

impl PaginationFooter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_state(&mut self, page: PageRequest, disabled: bool) {
        self.controller = PaginationController::new(page, disabled);
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn controller(&self) -> &PaginationController {
        &self.controller
    }

    fn is_enabled(&self, action: &Action) -> bool {
        match action {
            Action::FirstPage => self.controller.is_first_enabled(),
            Action::PreviousPage => self.controller.is_previous_enabled(),
            Action::NextPage => self.controller.is_next_enabled(),
            Action::LastPage => self.controller.is_last_enabled(),
            _ => false,
        }
    }

    /// "rows 11-20 of 97 · 10 per page · page 2/10"
    pub fn summary(&self) -> String {
        let page = self.controller.page;
        let range = page.row_range();
        let (first, last) = if range.is_empty() {
            (0, 0)
        } else {
            (range.start + 1, range.end)
        };
        format!(
            "rows {}-{} of {} · {} per page · page {}/{}",
            first,
            last,
            page.count,
            page.limit,
            page.offset + 1,
            page.page_count()
        )
    }
}

impl Component for PaginationFooter {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Home | KeyCode::Char('g') => Some(Action::FirstPage),
            KeyCode::Left | KeyCode::Char('h') => Some(Action::PreviousPage),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::NextPage),
            KeyCode::End | KeyCode::Char('G') => Some(Action::LastPage),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(None);
        }
        let position = Position::new(mouse.column, mouse.row);
        let action = self
            .buttons
            .iter()
            .find(|(area, _)| area.contains(position))
            .map(|(_, action)| action.clone());
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let target = match action {
            Action::FirstPage => self.controller.on_first(),
            Action::PreviousPage => self.controller.on_previous(),
            Action::NextPage => self.controller.on_next(),
            Action::LastPage => self.controller.on_last(),
            _ => None,
        };
        Ok(target.map(Action::ChangeOffset))
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.buttons.clear();

        let mut spans = Vec::new();
        let mut x = area.x;
        for (label, action) in BUTTONS.iter() {
            let style = if self.is_enabled(action) {
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                self.theme.muted().add_modifier(Modifier::DIM)
            };
            let width = unicode_width::UnicodeWidthStr::width(*label) as u16;
            self.buttons
                .push((Rect::new(x, area.y, width, 1), action.clone()));
            x = x.saturating_add(width);
            spans.push(Span::styled(*label, style));
        }

        spans.push(Span::raw("  "));
        spans.push(Span::styled(self.summary(), self.theme.muted()));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn controller(count: usize, limit: usize, offset: usize) -> PaginationController {
        PaginationController::new(PageRequest::new(count, limit, offset), false)
    }

    #[test]
    fn test_first_page_disables_first_and_previous() {
        let c = controller(100, 10, 0);
        assert!(!c.is_first_enabled());
        assert!(!c.is_previous_enabled());
        assert_eq!(c.on_first(), None);
        assert_eq!(c.on_previous(), None);
        assert!(c.is_next_enabled());
        assert_eq!(c.on_next(), Some(1));
    }

    #[test]
    fn test_last_page_disables_next_and_last() {
        let c = controller(100, 10, 9);
        assert_eq!(c.last_offset(), 9);
        assert!(!c.is_next_enabled());
        assert!(!c.is_last_enabled());
        assert_eq!(c.on_next(), None);
        assert_eq!(c.on_last(), None);
        assert_eq!(c.on_previous(), Some(8));
        assert_eq!(c.on_first(), Some(0));
    }

    #[test]
    fn test_last_targets() {
        assert_eq!(controller(100, 10, 0).on_last(), Some(9));
        assert_eq!(controller(50, 25, 0).on_last(), Some(1));
        assert_eq!(controller(97, 10, 3).on_last(), Some(9));
    }

    #[test]
    fn test_empty_table_disables_everything() {
        let c = controller(0, 10, 0);
        assert_eq!(c.last_offset(), 0);
        assert!(!c.is_first_enabled());
        assert!(!c.is_previous_enabled());
        assert!(!c.is_next_enabled());
        assert!(!c.is_last_enabled());
    }

    #[test]
    fn test_disabled_flag_overrides_offset() {
        let c = PaginationController::new(PageRequest::new(100, 10, 5), true);
        assert_eq!(c.on_first(), None);
        assert_eq!(c.on_previous(), None);
        assert_eq!(c.on_next(), None);
        assert_eq!(c.on_last(), None);
    }

    #[test]
    fn test_footer_emits_change_offset() {
        let mut footer = PaginationFooter::new();
        footer.set_state(PageRequest::new(100, 10, 4), false);

        let key = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        let action = footer.handle_key_event(key).unwrap();
        assert_eq!(action, Some(Action::NextPage));
        assert_eq!(
            footer.update(Action::NextPage).unwrap(),
            Some(Action::ChangeOffset(5))
        );
        assert_eq!(
            footer.update(Action::LastPage).unwrap(),
            Some(Action::ChangeOffset(9))
        );
    }

    #[test]
    fn test_footer_is_silent_at_bounds() {
        let mut footer = PaginationFooter::new();
        footer.set_state(PageRequest::new(100, 10, 0), false);
        assert_eq!(footer.update(Action::FirstPage).unwrap(), None);
        assert_eq!(footer.update(Action::PreviousPage).unwrap(), None);
    }

    #[test]
    fn test_footer_summary() {
        let mut footer = PaginationFooter::new();
        footer.set_state(PageRequest::new(97, 10, 1), false);
        assert_eq!(footer.summary(), "rows 11-20 of 97 · 10 per page · page 2/10");

        footer.set_state(PageRequest::new(0, 10, 0), false);
        assert_eq!(footer.summary(), "rows 0-0 of 0 · 10 per page · page 1/1");
    }

    #[test]
    fn test_footer_click_hits_button() {
        let mut footer = PaginationFooter::new();
        footer.set_state(PageRequest::new(100, 10, 3), false);

        let mut terminal = Terminal::new(TestBackend::new(80, 1)).unwrap();
        terminal
            .draw(|frame| {
                footer.draw(frame, frame.area()).unwrap();
            })
            .unwrap();

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 1,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            footer.handle_mouse_event(click).unwrap(),
            Some(Action::FirstPage)
        );
    }
}
