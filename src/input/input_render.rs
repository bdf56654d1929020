use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders},
};

use super::input_state::InputState;
use crate::search::SearchState;
use crate::theme;

pub const LOADING_INDICATOR: &str = "searching…";

pub fn render_field(input: &mut InputState, search: &SearchState, frame: &mut Frame, area: Rect) {
    let border_color = if search.is_focused() {
        theme::input::BORDER_FOCUSED
    } else {
        theme::input::BORDER_UNFOCUSED
    };

    let mut title_spans = vec![Span::raw(" Search ")];
    if search.is_loading() {
        title_spans.push(Span::styled(
            format!("{} ", LOADING_INDICATOR),
            Style::default().fg(theme::input::LOADING),
        ));
    }

    input.textarea.set_block(
        Block::default()
            .borders(Borders::ALL)
            .title(Line::from(title_spans))
            .border_style(Style::default().fg(border_color)),
    );
    input
        .textarea
        .set_style(Style::default().fg(theme::input::TEXT));

    frame.render_widget(&input.textarea, area);
}
