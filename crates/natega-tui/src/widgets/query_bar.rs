//! Query bar: the student-name input at the top of the screen.
//!
//! Editing is delegated to [`LineInput`]; `Enter` is handled by the app
//! shell, which submits the text to the session.

use crate::event::AppEvent;
use crate::theme::Theme;
use crate::widgets::line_input::LineInput;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

#[derive(Debug, Default)]
pub struct QueryBarState {
    pub input: LineInput,
}

impl QueryBarState {
    pub fn handle(&mut self, event: &AppEvent) {
        if self.input.handle(event) {
            tracing::debug!(query = %self.input.text, cursor = self.input.cursor, "query edited");
        }
    }

    pub fn text(&self) -> &str {
        &self.input.text
    }
}

pub struct QueryBar<'a> {
    state: &'a QueryBarState,
    focused: bool,
    title: &'a str,
    theme: &'a Theme,
}

impl<'a> QueryBar<'a> {
    pub fn new(state: &'a QueryBarState, focused: bool, title: &'a str, theme: &'a Theme) -> Self {
        Self { state, focused, title, theme }
    }

    /// Absolute terminal position of the text cursor within `area`.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        (self.state.input.cursor_col(area, 1), area.y + 1)
    }
}

impl Widget for QueryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(14)])
            .split(inner);

        let dim = Style::default().add_modifier(Modifier::DIM);
        let line = if self.state.input.is_empty() && !self.focused {
            Line::from(Span::styled("press / to search", dim))
        } else {
            Line::from(self.state.text())
        };
        Paragraph::new(line).render(chunks[0], buf);
        Paragraph::new(Line::from(Span::styled("Enter: بحث", dim))).render(chunks[1], buf);
    }
}
