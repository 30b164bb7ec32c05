//! 向导渲染

use crate::tui::components::{render_hint, render_title_block, three_panel_layout, wrap_lines};
use crate::tui::state::{AppState, StatusKind};
use crate::tui::theme::{
    config::{DETAILS_COLUMN_PERCENT, HIGHLIGHT_SYMBOL},
    theme,
};
use crate::wizard::{DetailsBundle, Stage, ViewPayload};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, List, ListItem, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

/// 渲染向导
pub fn draw(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let [header, body, footer] = three_panel_layout(area);

    render_title_block(&title(state), frame, header);

    match state.view.clone() {
        Some(ViewPayload::Details(details)) => draw_details(frame, body, &details),
        Some(view) => draw_options(frame, body, view.options(), state),
        None => {}
    }

    let hint = match state.stage() {
        Stage::Selection => "↑/↓ choose · Enter next · Esc quit",
        Stage::Subtype => "↑/↓ choose · Enter next · ← back · r restart · Esc quit",
        Stage::Details => "c save contact link · ← back · r restart · Esc quit",
    };
    let status = state
        .status
        .as_ref()
        .map(|s| (s.text.as_str(), status_style(s.kind)));

    render_hint(hint, status, frame, footer);
}

fn title(state: &AppState) -> String {
    match &state.view {
        Some(ViewPayload::Selection { .. }) | None => {
            "📍 Where do you want to set up your business?".to_string()
        }
        Some(ViewPayload::Subtype { category, .. }) => {
            format!("🏢 Select your {} structure", category)
        }
        Some(ViewPayload::Details(details)) => {
            format!("🔎 {} · {}", details.structure, details.category)
        }
    }
}

fn status_style(kind: StatusKind) -> Style {
    match kind {
        StatusKind::Info => theme().success(),
        StatusKind::Warning => theme().warning(),
        StatusKind::Error => theme().error(),
    }
}

fn draw_options(frame: &mut Frame, area: Rect, options: &[String], state: &mut AppState) {
    let width = list_content_width(area);
    let items: Vec<ListItem> = options
        .iter()
        .map(|option| ListItem::new(wrap_lines(option, width)).style(theme().normal()))
        .collect();

    let list = List::new(items)
        .block(
            Block::bordered()
                .title("Choose one")
                .border_type(BorderType::Rounded)
                .border_style(theme().border()),
        )
        .highlight_style(theme().selected())
        .highlight_symbol(HIGHLIGHT_SYMBOL);

    frame.render_stateful_widget(list, area, &mut state.selection.list_state);
}

fn draw_details(frame: &mut Frame, area: Rect, details: &DetailsBundle) {
    let [left, right] = Layout::horizontal([
        Constraint::Percentage(DETAILS_COLUMN_PERCENT),
        Constraint::Percentage(100 - DETAILS_COLUMN_PERCENT),
    ])
    .areas(area);

    let mut left_lines = section(&format!("Features of {}", details.structure), &details.features);
    if !details.market_benefits.is_empty() {
        left_lines.push(Line::default());
        left_lines.push(Line::from("📈 Market Benefits").style(theme().heading()));
        if let Some(label) = &details.market_label {
            left_lines.push(Line::from(label.clone()).style(theme().success()));
        }
        left_lines.extend(
            details
                .market_benefits
                .iter()
                .map(|benefit| Line::from(format!("• {}", benefit)).style(theme().normal())),
        );
    }

    let mut right_lines = section("📜 Legal Requirements", &details.legal_requirements);
    if !details.support_services.is_empty() {
        right_lines.push(Line::default());
        right_lines.extend(section("🛠️ Our Support Includes", &details.support_services));
    }
    right_lines.push(Line::default());
    right_lines.push(Line::from("📞 Get Expert Assistance").style(theme().heading()));
    right_lines.push(Line::from(vec![
        Span::styled("💬 ", theme().normal()),
        Span::styled(
            format!("Chat with {} Business Expert", details.contact.label),
            theme().success(),
        ),
    ]));
    right_lines.push(Line::from(details.contact.link.clone()).style(theme().hint()));

    frame.render_widget(column(left_lines), left);
    frame.render_widget(column(right_lines), right);
}

fn section(heading: &str, items: &[String]) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(items.len() + 1);
    lines.push(Line::from(heading.to_string()).style(theme().heading()));
    lines.extend(items.iter().map(|item| Line::from(item.clone()).style(theme().normal())));
    lines
}

fn column(lines: Vec<Line<'static>>) -> Paragraph<'static> {
    Paragraph::new(lines)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(theme().border()),
        )
        .wrap(Wrap { trim: false })
}

fn list_content_width(area: Rect) -> usize {
    let highlight_width = UnicodeWidthStr::width(HIGHLIGHT_SYMBOL);
    (area.width as usize).saturating_sub(2 + highlight_width)
}
