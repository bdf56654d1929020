use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    symbols::Marker as CanvasMarker,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph,
        canvas::{Canvas, Map, MapResolution, Points},
    },
};

use super::map_state::MapState;
use crate::theme;

const MARKER_SYMBOL: &str = "◉";

fn title(map: &MapState) -> Line<'static> {
    let mut spans = vec![Span::styled(
        " Map ",
        Style::default().fg(theme::map::TITLE),
    )];
    if map.is_resolving() {
        spans.push(Span::styled(
            "(locating…) ",
            Style::default().fg(theme::map::RESOLVING),
        ));
    }
    Line::from(spans)
}

/// Draw coastlines, the marker and its label within the current region
pub fn render_map(map: &MapState, frame: &mut Frame, area: Rect) {
    let region = map.region();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title(map))
        .border_style(Style::default().fg(theme::map::BORDER));

    let canvas = Canvas::default()
        .block(block)
        .marker(CanvasMarker::Braille)
        .x_bounds(region.x_bounds())
        .y_bounds(region.y_bounds())
        .paint(|ctx| {
            ctx.draw(&Map {
                color: theme::map::COASTLINE,
                resolution: MapResolution::High,
            });

            if let Some(marker) = map.marker() {
                let (x, y) = (marker.coordinate.longitude, marker.coordinate.latitude);
                ctx.layer();
                ctx.draw(&Points {
                    coords: &[(x, y)],
                    color: theme::map::MARKER,
                });
                ctx.print(
                    x,
                    y,
                    Line::from(vec![
                        Span::styled(MARKER_SYMBOL, Style::default().fg(theme::map::MARKER)),
                        Span::styled(
                            format!(" {}", marker.label),
                            Style::default().fg(theme::map::LABEL),
                        ),
                    ]),
                );
            }
        });

    frame.render_widget(canvas, area);
}

/// One-line summary of the selected place and its coordinate
pub fn render_status(map: &MapState, frame: &mut Frame, area: Rect) {
    let text_style = Style::default().fg(theme::status::TEXT);
    let line = match map.selected() {
        Some(record) => match record.coordinate() {
            Some(coordinate) => Line::from(vec![
                Span::styled(format!(" {} ", record.primary_label), text_style),
                Span::styled(
                    format!("{:.4}, {:.4}", coordinate.latitude, coordinate.longitude),
                    Style::default().fg(theme::status::COORDINATE),
                ),
            ]),
            None => Line::from(Span::styled(
                format!(" {} (no location yet)", record.primary_label),
                text_style,
            )),
        },
        None => Line::from(Span::styled(" No place selected", text_style)),
    };

    frame.render_widget(Paragraph::new(line), area);
}
