//! Status and help bars drawn under the table

use crate::model::page::SortState;
use crate::model::Theme;
use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Data shown in the status bar
pub struct StatusContext<'a> {
    pub source: Option<&'a str>,
    pub sort: &'a SortState,
    pub loaded_at: Option<DateTime<Local>>,
    pub error: Option<&'a str>,
    pub message: Option<&'a str>,
}

pub fn build_status_line(ctx: &StatusContext, theme: &Theme) -> Line<'static> {
    let mut spans = vec![];

    if let Some(source) = ctx.source {
        spans.push(Span::styled(
            format!(" {} ", source),
            Style::default()
                .fg(theme.selected_bg)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" "));
    }

    if let Some(field) = ctx.sort.order_by.as_deref() {
        spans.push(Span::styled(
            format!("sort: {} {} ", field, ctx.sort.dir.arrow()),
            theme.text(),
        ));
    }

    if let Some(loaded_at) = ctx.loaded_at {
        spans.push(Span::styled(
            format!("loaded {} ", loaded_at.format("%H:%M:%S")),
            theme.muted(),
        ));
    }

    // An error replaces everything else
    if let Some(error) = ctx.error {
        spans.clear();
        spans.push(Span::styled(
            format!(" Error: {} ", error),
            Style::default().fg(theme.error),
        ));
    }

    if let Some(message) = ctx.message {
        spans.push(Span::styled(
            format!(" {} ", message),
            Style::default().fg(theme.warning),
        ));
    }

    Line::from(spans)
}

pub fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &StatusContext, theme: &Theme) {
    frame.render_widget(Paragraph::new(build_status_line(ctx, theme)), area);
}

pub fn render_help_bar(frame: &mut Frame, area: Rect, theme: &Theme) {
    let key = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);
    let spans = vec![
        Span::styled(" ←/→ ", key),
        Span::raw("Page  "),
        Span::styled(" r ", key),
        Span::raw("Rows/page  "),
        Span::styled(" s ", key),
        Span::raw("Sort  "),
        Span::styled(" Enter ", key),
        Span::raw("Details  "),
        Span::styled(" ? ", key),
        Span::raw("Help  "),
        Span::styled(" q ", key),
        Span::raw("Quit"),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_shows_source_and_sort() {
        let mut sort = SortState::default();
        sort.apply("name");
        let ctx = StatusContext {
            source: Some("people.csv"),
            sort: &sort,
            loaded_at: None,
            error: None,
            message: None,
        };
        let line = build_status_line(&ctx, &Theme::default()).to_string();
        assert!(line.contains("people.csv"));
        assert!(line.contains("sort: name ▲"));
    }

    #[test]
    fn test_error_replaces_status() {
        let sort = SortState::default();
        let ctx = StatusContext {
            source: Some("people.csv"),
            sort: &sort,
            loaded_at: Some(Local::now()),
            error: Some("boom"),
            message: None,
        };
        let line = build_status_line(&ctx, &Theme::default()).to_string();
        assert!(!line.contains("people.csv"));
        assert!(line.contains("Error: boom"));
    }
}
