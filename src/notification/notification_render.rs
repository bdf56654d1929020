use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::notification_state::NotificationState;
use crate::widgets::popup;

const MARGIN: u16 = 2;
const HEIGHT: u16 = 3;

/// Render the current notification in the top-right corner, after the main UI
pub fn render_notification(frame: &mut Frame, notification: &mut NotificationState) {
    notification.clear_if_expired();

    let Some(notif) = notification.current() else {
        return;
    };

    let frame_area = frame.area();
    // 2 padding + 2 borders
    let width = notif.message.chars().count() as u16 + 4;

    let area = Rect {
        x: frame_area.width.saturating_sub(width + MARGIN),
        y: MARGIN,
        width: width.min(frame_area.width.saturating_sub(MARGIN * 2)),
        height: HEIGHT.min(frame_area.height.saturating_sub(MARGIN * 2)),
    };

    if area.width < 5 || area.height < HEIGHT {
        return;
    }

    popup::clear_area(frame, area);

    let style = &notif.style;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(style.border).bg(style.bg))
        .style(Style::default().bg(style.bg));

    let text = Line::from(Span::styled(
        format!(" {} ", notif.message),
        Style::default().fg(style.fg).bg(style.bg),
    ));

    frame.render_widget(Paragraph::new(text).block(block), area);
}

#[cfg(test)]
#[path = "notification_render_tests.rs"]
mod notification_render_tests;
