use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::sync::mpsc::TryRecvError;
use std::time::{Duration, Instant};

use super::app_state::App;
use crate::notification::NotificationType;
use crate::places::PlacesResponse;

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(100);

impl App {
    pub fn handle_events(&mut self) -> io::Result<()> {
        self.tick(Instant::now());

        self.poll_places_responses();

        if event::poll(self.poll_timeout(Instant::now()))? {
            match event::read()? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    self.handle_key_event(key_event);
                }
                Event::Paste(text) => {
                    self.handle_paste_event(&text);
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Fire the debounced lookup if its quiet period is over
    pub fn tick(&mut self, now: Instant) {
        self.search.tick(now);
    }

    /// Wake up in time for the pending lookup, but never sleep longer than the default
    fn poll_timeout(&self, now: Instant) -> Duration {
        match self.search.next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now).min(EVENT_POLL_TIMEOUT),
            None => EVENT_POLL_TIMEOUT,
        }
    }

    /// Drain worker responses, routing each to the component that asked
    pub fn poll_places_responses(&mut self) {
        let Some(response_rx) = self.response_rx.as_ref() else {
            return;
        };

        let mut disconnected = false;
        loop {
            match response_rx.try_recv() {
                Ok(PlacesResponse::Suggestions { request_id, result }) => {
                    self.search.handle_suggestions(request_id, result);
                }
                Ok(PlacesResponse::Resolved {
                    request_id, result, ..
                }) => {
                    self.map.handle_resolved(request_id, result);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::warn!("Places worker stopped; lookups are unavailable");
                    disconnected = true;
                    break;
                }
            }
        }

        if disconnected {
            self.notification
                .show_error("Places lookups unavailable: background worker stopped");
            self.response_rx = None;
        }
    }

    pub fn handle_paste_event(&mut self, text: &str) {
        if self.input.insert_str(text) {
            self.search.on_text_changed(self.input.text(), Instant::now());
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Esc => self.handle_escape(),
            KeyCode::Enter => self.select_highlighted(),
            KeyCode::Down => {
                self.search.focus();
                self.search.highlight_next();
            }
            KeyCode::Up => {
                self.search.focus();
                self.search.highlight_previous();
            }
            _ => {
                if self.input.handle_key(key) {
                    self.search.on_text_changed(self.input.text(), Instant::now());
                } else {
                    self.search.focus();
                }
            }
        }
    }

    /// Esc dismisses a sticky error first, then clears the search; on an
    /// already clear search it quits
    fn handle_escape(&mut self) {
        if self
            .notification
            .current()
            .is_some_and(|n| n.notification_type == NotificationType::Error)
        {
            self.notification.dismiss();
            return;
        }

        if self.input.text().is_empty() && !self.search.is_focused() {
            self.should_quit = true;
            return;
        }

        self.input.clear();
        self.search.clear();
    }

    fn select_highlighted(&mut self) {
        let Some(record) = self.search.select_highlighted() else {
            return;
        };

        self.input.clear();
        self.map.on_selection(record);
    }
}

#[cfg(test)]
#[path = "app_events_tests.rs"]
mod app_events_tests;
