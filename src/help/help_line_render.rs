use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::search::SearchState;
use crate::theme;

macro_rules! hints {
    ($($key:literal => $desc:literal),+ $(,)?) => {
        vec![$(($key, $desc)),+]
    };
}

fn get_context_hints(search: &SearchState) -> Vec<(&'static str, &'static str)> {
    if search.is_focused() && search.item_count() > 0 {
        hints!["↑/↓" => "Move", "Enter" => "Show on map", "Esc" => "Clear", "Ctrl+C" => "Quit"]
    } else if search.is_focused() || !search.text().is_empty() {
        hints!["Esc" => "Clear", "Ctrl+C" => "Quit"]
    } else {
        hints!["Type" => "Search", "↓" => "Recent", "Esc" => "Quit"]
    }
}

fn build_styled_spans(hints: &[(&'static str, &'static str)]) -> Vec<Span<'static>> {
    let key_style = Style::default().fg(theme::help_line::KEY);
    let desc_style = Style::default().fg(theme::help_line::DESCRIPTION);
    let sep_style = Style::default().fg(theme::help_line::SEPARATOR);

    let mut spans = Vec::with_capacity(hints.len() * 4 + 1);
    spans.push(Span::raw(" "));

    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" \u{2022} ", sep_style));
        }
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(*desc, desc_style));
    }

    spans
}

pub fn render_line(search: &SearchState, frame: &mut Frame, area: Rect) {
    let hints = get_context_hints(search);
    let help = Paragraph::new(Line::from(build_styled_spans(&hints)));
    frame.render_widget(help, area);
}
