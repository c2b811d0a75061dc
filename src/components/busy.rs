//! Busy indicator
//!
//! A spinner shown while a table has not received its first data.

use crate::action::Action;
use crate::component::Component;
use crate::model::Theme;
use anyhow::Result;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner advanced once per tick
#[derive(Default)]
pub struct BusyIndicator {
    frame: usize,
    theme: Theme,
    label: String,
}

impl BusyIndicator {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            frame: 0,
            theme: Theme::default(),
            label: label.into(),
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn glyph(&self) -> &'static str {
        FRAMES[self.frame % FRAMES.len()]
    }
}

impl Component for BusyIndicator {
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action == Action::Tick {
            self.frame = (self.frame + 1) % FRAMES.len();
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(area.height.saturating_sub(1) / 2),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let line = Line::from(vec![
            Span::styled(
                self.glyph(),
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(self.label.clone(), self.theme.muted()),
        ]);

        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), chunks[1]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_advances_and_wraps() {
        let mut busy = BusyIndicator::new("Loading");
        let first = busy.glyph();
        busy.update(Action::Tick).unwrap();
        assert_ne!(busy.glyph(), first);

        for _ in 0..FRAMES.len() - 1 {
            busy.update(Action::Tick).unwrap();
        }
        assert_eq!(busy.glyph(), first);
    }

    #[test]
    fn test_other_actions_do_not_advance() {
        let mut busy = BusyIndicator::new("Loading");
        busy.update(Action::NextPage).unwrap();
        assert_eq!(busy.glyph(), FRAMES[0]);
    }
}
