//! Vim-style command bar: a single-line overlay at the bottom of the screen.
//!
//! Activated by pressing `:` while the results table is focused. Pressing
//! `Enter` parses and executes the command; `Escape` cancels.
//!
//! | Command | Action |
//! |---------|--------|
//! | `q`, `quit` | Quit |
//! | `help` | Toggle the help popup |
//! | `theme <name>` | Switch theme (`default`, `gruvbox`) |
//! | `reload`, `r` | Fetch the archive again |
//! | `clear` | Empty the query and the results |

use crate::event::AppEvent;
use crate::theme::Theme;
use crate::widgets::line_input::LineInput;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Widget},
};

#[derive(Debug, Default)]
pub struct CommandBarState {
    pub input: LineInput,
    /// Error from the last failed command, cleared on the next key.
    pub error: Option<String>,
}

impl CommandBarState {
    pub fn clear(&mut self) {
        self.input.clear();
        self.error = None;
    }

    pub fn handle(&mut self, event: &AppEvent) {
        self.error = None;
        self.input.handle(event);
    }

    /// Absolute terminal column of the text cursor; the `:` glyph takes
    /// column 0.
    pub fn cursor_col(&self, area: Rect) -> u16 {
        self.input.cursor_col(area, 1)
    }
}

pub struct CommandBar<'a> {
    state: &'a CommandBarState,
    theme: &'a Theme,
}

impl<'a> CommandBar<'a> {
    pub fn new(state: &'a CommandBarState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for CommandBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let line = if let Some(ref err) = self.state.error {
            Line::from(Span::styled(format!("E  {err}"), self.theme.status_error))
        } else {
            Line::from(vec![
                Span::styled(":", self.theme.border_command_bar.add_modifier(Modifier::BOLD)),
                Span::styled(self.state.input.text.as_str(), Style::default()),
            ])
        };

        buf.set_line(area.x, area.y, &line, area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_and_backspace() {
        let mut s = CommandBarState::default();
        for c in "theme".chars() {
            s.handle(&AppEvent::Char(c));
        }
        assert_eq!(s.input.text, "theme");
        s.handle(&AppEvent::Backspace);
        assert_eq!(s.input.text, "them");
        assert_eq!(s.input.cursor, 4);
    }

    #[test]
    fn error_cleared_on_next_key() {
        let mut s = CommandBarState::default();
        s.error = Some("oops".to_string());
        s.handle(&AppEvent::Char('x'));
        assert!(s.error.is_none());
    }

    #[test]
    fn cursor_sits_after_colon() {
        let mut s = CommandBarState::default();
        s.handle(&AppEvent::Char('q'));
        assert_eq!(s.cursor_col(Rect::new(0, 23, 80, 1)), 2);
    }
}
