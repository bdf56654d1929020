use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
};

use super::app_state::App;
use crate::notification::render_notification;

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        let layout = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());
        let (input_area, map_area, status_area, help_area) =
            (layout[0], layout[1], layout[2], layout[3]);

        crate::input::input_render::render_field(&mut self.input, &self.search, frame, input_area);

        crate::map::map_render::render_map(&self.map, frame, map_area);
        crate::map::map_render::render_status(&self.map, frame, status_area);
        crate::help::help_line_render::render_line(&self.search, frame, help_area);

        // Dropdown overlays the map, never the status or help lines
        let dropdown_bounds = Rect {
            height: map_area.y + map_area.height,
            ..frame.area()
        };
        crate::search::search_render::render_dropdown(
            &self.search,
            frame,
            input_area,
            dropdown_bounds,
        );

        render_notification(frame, &mut self.notification);
    }
}
