//! Single-line text editing shared by the query bar and the command bar.
//!
//! `cursor` is a byte offset into `text` and always sits on a char boundary;
//! Arabic letters are two bytes wide in UTF-8, so every move walks chars.

use crate::event::{AppEvent, Direction};
use ratatui::layout::Rect;

#[derive(Debug, Default, Clone)]
pub struct LineInput {
    pub text: String,
    pub cursor: usize,
}

impl LineInput {
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Apply an editing event. Returns false for events that are not edits.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Char(c) => {
                self.text.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
            }
            AppEvent::Backspace => {
                if let Some(prev) = self.prev_boundary() {
                    self.text.remove(prev);
                    self.cursor = prev;
                }
            }
            AppEvent::Delete => {
                if self.cursor < self.text.len() {
                    self.text.remove(self.cursor);
                }
            }
            AppEvent::Nav(Direction::Left) => {
                if let Some(prev) = self.prev_boundary() {
                    self.cursor = prev;
                }
            }
            AppEvent::Nav(Direction::Right) => {
                self.cursor = self.next_boundary();
            }
            AppEvent::Top => self.cursor = 0,
            AppEvent::Bottom => self.cursor = self.text.len(),
            _ => return false,
        }
        true
    }

    /// Terminal column of the cursor relative to `area.x + offset`, clamped
    /// to the area.
    pub fn cursor_col(&self, area: Rect, offset: u16) -> u16 {
        let col = self.text[..self.cursor].chars().count() as u16;
        (area.x + offset + col).min(area.right().saturating_sub(1))
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor].char_indices().last().map(|(i, _)| i)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| self.cursor + i)
            .unwrap_or(self.text.len())
    }
}
