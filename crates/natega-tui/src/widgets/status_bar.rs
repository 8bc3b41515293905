//! Status bar: one line at the bottom: load state, search activity, hints.

use crate::theme::Theme;
use natega_core::LoadState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const HINT: &str = " q:quit  ?:help  ::cmd ";

/// Spinner glyph for animation frame `tick`.
pub fn spinner(tick: usize) -> &'static str {
    SPINNER[tick % SPINNER.len()]
}

pub struct StatusBar<'a> {
    state: &'a LoadState,
    searching: bool,
    tick: usize,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a LoadState, searching: bool, tick: usize, theme: &'a Theme) -> Self {
        Self { state, searching, tick, theme }
    }

    fn line(&self) -> Line<'static> {
        match self.state {
            LoadState::Loading => Line::from(Span::styled(
                format!(" {} Loading results…", spinner(self.tick)),
                self.theme.status_loading,
            )),
            LoadState::Failed(msg) => Line::from(vec![
                Span::styled(format!(" ✗ {msg}"), self.theme.status_error),
                Span::styled(
                    "  (Ctrl+r to retry)",
                    Style::default().add_modifier(Modifier::DIM),
                ),
            ]),
            LoadState::Ready { records, loaded_at } => {
                let mut spans = Vec::with_capacity(2);
                if self.searching {
                    spans.push(Span::styled(
                        format!(" {} Searching…", spinner(self.tick)),
                        self.theme.status_searching,
                    ));
                }
                spans.push(Span::styled(
                    format!(
                        " {} records · loaded {}",
                        records.len(),
                        loaded_at.with_timezone(&chrono::Local).format("%H:%M:%S")
                    ),
                    self.theme.status_ready,
                ));
                Line::from(spans)
            }
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_line(area.x, area.y, &self.line(), area.width);

        let hint_x = area.right().saturating_sub(HINT.chars().count() as u16);
        buf.set_string(hint_x, area.y, HINT, Style::default().add_modifier(Modifier::DIM));
    }
}
