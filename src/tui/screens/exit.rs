//! 退出确认渲染

use crate::tui::theme::theme;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    widgets::{Paragraph, Wrap},
};

/// 渲染退出确认
pub fn draw(frame: &mut Frame, area: Rect) {
    let confirm_text = Paragraph::new("Quit the setup advisor? (y/n)")
        .style(theme().warning())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(confirm_text, area);
}
