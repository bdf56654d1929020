use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, HighlightSpacing, List, ListItem, ListState},
};

use super::search_state::SearchState;
use crate::places::PlaceSuggestion;
use crate::theme;
use crate::widgets::popup;

const MAX_DROPDOWN_HEIGHT: u16 = 16;
const BORDER_HEIGHT: u16 = 2;

pub const RECENT_HEADER: &str = "Recent";
pub const SUGGESTIONS_HEADER: &str = "Suggestions";

/// Rows of the dropdown plus the row index of the highlighted item
fn build_rows(search: &SearchState) -> (Vec<ListItem<'static>>, Option<usize>) {
    let mut rows = Vec::with_capacity(search.item_count() + 2);
    let mut highlighted_row = None;
    let highlighted = search.highlighted_index();
    let mut item_index = 0;

    if !search.recent().is_empty() {
        rows.push(ListItem::new(Line::from(Span::styled(
            RECENT_HEADER,
            theme::dropdown::SECTION_RECENT,
        ))));
        for record in search.recent() {
            if item_index == highlighted {
                highlighted_row = Some(rows.len());
            }
            rows.push(item_row(&record.primary_label, &record.secondary_label));
            item_index += 1;
        }
    }

    if !search.suggestions().is_empty() {
        rows.push(ListItem::new(Line::from(Span::styled(
            SUGGESTIONS_HEADER,
            theme::dropdown::SECTION_SUGGESTIONS,
        ))));
        for PlaceSuggestion {
            primary_label,
            secondary_label,
            ..
        } in search.suggestions()
        {
            if item_index == highlighted {
                highlighted_row = Some(rows.len());
            }
            rows.push(item_row(primary_label, secondary_label));
            item_index += 1;
        }
    }

    (rows, highlighted_row)
}

fn item_row(primary: &str, secondary: &str) -> ListItem<'static> {
    let mut spans = vec![Span::styled(
        primary.to_string(),
        Style::default().fg(theme::dropdown::PRIMARY),
    )];
    if !secondary.is_empty() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            secondary.to_string(),
            Style::default().fg(theme::dropdown::SECONDARY),
        ));
    }
    ListItem::new(Line::from(spans))
}

/// Render the recent/suggestions dropdown below the input field.
///
/// Shown only while the input is focused and there is something to list.
pub fn render_dropdown(
    search: &SearchState,
    frame: &mut Frame,
    input_area: Rect,
    bounds: Rect,
) -> Option<Rect> {
    if !search.is_focused() || search.item_count() == 0 {
        return None;
    }

    let (rows, highlighted_row) = build_rows(search);
    let height = (rows.len() as u16 + BORDER_HEIGHT).min(MAX_DROPDOWN_HEIGHT);
    let area = popup::popup_below_anchor(input_area, bounds, height);
    if area.height <= BORDER_HEIGHT {
        return None;
    }

    popup::clear_area(frame, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::dropdown::BORDER))
        .style(Style::default().bg(theme::dropdown::BACKGROUND));

    let list = List::new(rows)
        .block(block)
        .highlight_symbol("► ")
        .highlight_spacing(HighlightSpacing::Always)
        .highlight_style(
            Style::default()
                .bg(theme::dropdown::ITEM_SELECTED_BG)
                .fg(theme::dropdown::ITEM_SELECTED_INDICATOR),
        );

    let mut state = ListState::default().with_selected(highlighted_row);
    frame.render_stateful_widget(list, area, &mut state);

    Some(area)
}
