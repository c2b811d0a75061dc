//! Row detail dialog
//!
//! Shows every column of one row, title on the left and resolved value on
//! the right.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::table::{get_data_to_populate, CellContent, TableHeaderItem, TableRowType};
use crate::model::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

#[derive(Default)]
pub struct RowDetailDialog {
    header: Vec<TableHeaderItem>,
    row: Option<TableRowType>,
    theme: Theme,
}

impl RowDetailDialog {
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn show(&mut self, header: &[TableHeaderItem], row: &TableRowType) {
        self.header = header.to_vec();
        self.row = Some(row.clone());
    }

    /// One line per column
    pub fn build_lines(&self) -> Vec<Line<'static>> {
        let Some(row) = &self.row else {
            return Vec::new();
        };
        let label_width = self
            .header
            .iter()
            .map(|h| h.title.width())
            .max()
            .unwrap_or(0);

        self.header
            .iter()
            .enumerate()
            .map(|(column, item)| {
                let content = row
                    .cell(column)
                    .map(get_data_to_populate)
                    .unwrap_or(CellContent::Empty);
                let value_style = match content {
                    CellContent::Icon { color: Some(c), .. } => Style::default().fg(c),
                    _ => self.theme.text(),
                };
                let pad = label_width.saturating_sub(item.title.width());
                Line::from(vec![
                    Span::styled(
                        format!(" {}{} ", item.title, " ".repeat(pad)),
                        self.theme.heading(),
                    ),
                    Span::styled(content.as_text(), value_style),
                ])
            })
            .collect()
    }
}

impl Component for RowDetailDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let lines = self.build_lines();
        let height = (lines.len() as u16).saturating_add(2);
        let popup_area = centered_popup(area, area.width.saturating_sub(10).min(80), height);
        frame.render_widget(Clear, popup_area);

        let title = self
            .row
            .as_ref()
            .map(|r| format!(" Row {} ", r.id))
            .unwrap_or_default();

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .title_style(
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    )
                    .border_style(Style::default().fg(self.theme.accent)),
            )
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::table::TableCell;

    #[test]
    fn test_lines_pair_titles_with_values() {
        let header = vec![
            TableHeaderItem::new("name", "Name"),
            TableHeaderItem::new("active", "Active"),
            TableHeaderItem::new("extra", "Extra"),
        ];
        let row = TableRowType::new(
            "7",
            vec![TableCell::text("Ada"), TableCell::checkbox(true)],
        );

        let mut dialog = RowDetailDialog::default();
        dialog.show(&header, &row);
        let lines: Vec<String> = dialog.build_lines().iter().map(|l| l.to_string()).collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], " Name   Ada");
        assert_eq!(lines[1], " Active [x]");
        assert_eq!(lines[2], " Extra  ");
    }
}
