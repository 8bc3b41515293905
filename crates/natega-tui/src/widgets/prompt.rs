//! Prompt popup: a blocking message box dismissed with `Enter` or `Escape`.
//!
//! Used for the empty-query warning; nothing else reacts to keys while a
//! prompt is open.

use crate::theme::Theme;
use crate::widgets::help::centered_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Clear, Paragraph, Widget, Wrap},
};

pub struct PromptPopup<'a> {
    message: &'a str,
    theme: &'a Theme,
}

impl<'a> PromptPopup<'a> {
    pub fn new(message: &'a str, theme: &'a Theme) -> Self {
        Self { message, theme }
    }
}

impl Widget for PromptPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = (self.message.chars().count() as u16 + 6).max(30);
        let popup = centered_rect(width, 5, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" natega ")
            .border_style(self.theme.prompt_border);
        let inner = block.inner(popup);
        block.render(popup, buf);

        let lines = vec![
            Line::styled(self.message, self.theme.prompt_text),
            Line::from(""),
            Line::styled("[ OK ]", Style::default().add_modifier(Modifier::REVERSED)),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
