use crossterm::event::KeyEvent;
use ratatui::style::Style;
use tui_textarea::TextArea;

use crate::theme;

/// Single-line text field holding the search text
pub struct InputState {
    pub textarea: TextArea<'static>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        let mut textarea = TextArea::default();
        textarea.set_cursor_line_style(Style::default());
        textarea.set_cursor_style(theme::input::CURSOR);
        textarea.set_placeholder_text("Search for a place");
        textarea.set_placeholder_style(Style::default().fg(theme::input::PLACEHOLDER));

        Self { textarea }
    }

    pub fn text(&self) -> &str {
        self.textarea.lines()[0].as_ref()
    }

    /// Feed a key to the text field. Returns true if the text changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let before = self.text().to_string();
        self.textarea.input(key);
        self.text() != before
    }

    /// Insert pasted text, flattened to one line
    pub fn insert_str(&mut self, text: &str) -> bool {
        let flattened = text.replace(['\r', '\n'], " ");
        if flattened.is_empty() {
            return false;
        }
        self.textarea.insert_str(flattened)
    }

    pub fn clear(&mut self) {
        self.textarea.select_all();
        self.textarea.cut();
    }
}
