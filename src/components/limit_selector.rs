//! Rows-per-page selector dialog

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::page::rows_per_page_options;
use crate::model::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

/// Rows-per-page selector
pub struct LimitSelectorDialog {
    pub selected_index: usize,
    pub options: Vec<usize>,
    pub current: usize,
    list_state: ListState,
    theme: Theme,
}

impl Default for LimitSelectorDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl LimitSelectorDialog {
    pub fn new() -> Self {
        Self {
            selected_index: 0,
            options: rows_per_page_options(0),
            current: 0,
            list_state: ListState::default(),
            theme: Theme::default(),
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Offer the options for `count` rows, pre-selecting `current`
    pub fn open(&mut self, count: usize, current: usize) {
        self.options = rows_per_page_options(count);
        self.current = current;
        self.selected_index = self
            .options
            .iter()
            .position(|o| *o == current)
            .unwrap_or(0);
        self.list_state.select(Some(self.selected_index));
    }

    pub fn selected(&self) -> Option<usize> {
        self.options.get(self.selected_index).copied()
    }

    fn select_next(&mut self) {
        if self.selected_index + 1 < self.options.len() {
            self.selected_index += 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }
}

impl Component for LimitSelectorDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('r') => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::ConfirmModal),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::ModalUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::ModalDown),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ModalUp => self.select_prev(),
            Action::ModalDown => self.select_next(),
            // Selecting a size hands the new limit back to the host
            Action::ConfirmModal => return Ok(self.selected().map(Action::ChangeLimit)),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let height = self.options.len() as u16 + 2;
        let popup_area = centered_popup(area, 28, height);
        frame.render_widget(Clear, popup_area);

        let items: Vec<ListItem> = self
            .options
            .iter()
            .map(|option| {
                let marker = if *option == self.current { "●" } else { " " };
                ListItem::new(Line::from(vec![
                    Span::styled(format!(" {} ", marker), Style::default().fg(self.theme.ok)),
                    Span::styled(format!("{:>5} rows", option), self.theme.text()),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Rows per page ")
                    .title_style(self.theme.heading())
                    .border_style(Style::default().fg(self.theme.accent)),
            )
            .highlight_style(
                Style::default()
                    .bg(self.theme.selected_bg)
                    .add_modifier(Modifier::BOLD),
            );

        frame.render_stateful_widget(list, popup_area, &mut self.list_state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_preselects_current() {
        let mut dialog = LimitSelectorDialog::new();
        dialog.open(120, 50);
        assert_eq!(dialog.options, vec![10, 25, 50, 100, 200]);
        assert_eq!(dialog.selected(), Some(50));
    }

    #[test]
    fn test_navigation_is_bounded() {
        let mut dialog = LimitSelectorDialog::new();
        dialog.open(30, 10);
        dialog.update(Action::ModalUp).unwrap();
        assert_eq!(dialog.selected(), Some(10));
        for _ in 0..5 {
            dialog.update(Action::ModalDown).unwrap();
        }
        assert_eq!(dialog.selected(), Some(50));
    }

    #[test]
    fn test_confirm_emits_change_limit() {
        let mut dialog = LimitSelectorDialog::new();
        dialog.open(300, 10);
        dialog.update(Action::ModalDown).unwrap();
        assert_eq!(
            dialog.update(Action::ConfirmModal).unwrap(),
            Some(Action::ChangeLimit(25))
        );
    }
}
