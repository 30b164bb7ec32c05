//! Common UI components module
//!
//! Provides reusable UI components to avoid code duplication.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, BorderType, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthChar;

use super::theme::theme;

/// Three-panel layout: header, body, footer
pub fn three_panel_layout(area: Rect) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(2),
    ])
    .areas(area)
}

/// Render a centered title block with border
pub fn render_title_block(title: &str, frame: &mut Frame, area: Rect) {
    let title_line = Line::from(format!(" {} ", title))
        .centered()
        .style(theme().title());

    let block = Block::bordered()
        .title(title_line)
        .border_type(BorderType::Rounded)
        .border_style(theme().border())
        .style(theme().normal());

    frame.render_widget(block, area);
}

/// Render bottom hint text, optionally preceded by a status line
pub fn render_hint(hint: &str, status: Option<(&str, Style)>, frame: &mut Frame, area: Rect) {
    let mut lines = Vec::with_capacity(2);
    if let Some((text, style)) = status {
        lines.push(Line::from(text.to_string()).style(style));
    }
    lines.push(Line::from(hint.to_string()).style(theme().hint()));

    let hint_widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(hint_widget, area);
}

/// 按显示宽度换行
pub fn wrap_lines(value: &str, max_width: usize) -> Vec<Line<'static>> {
    if max_width == 0 {
        return vec![Line::from(String::new())];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for ch in value.chars() {
        if ch == '\n' {
            lines.push(Line::from(current));
            current = String::new();
            current_width = 0;
            continue;
        }

        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width && !current.is_empty() {
            lines.push(Line::from(current));
            current = String::new();
            current_width = 0;
        }

        current.push(ch);
        current_width += ch_width;
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(Line::from(current));
    }

    lines
}
