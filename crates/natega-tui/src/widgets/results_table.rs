//! Results table: the scrollable pane listing matches for the last query.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Select previous row |
//! | `↓` / `j` | Select next row |
//! | `PageUp` / `Ctrl+u` | Up one page |
//! | `PageDown` / `Ctrl+d` | Down one page |
//! | `g` / `G` | First / last row |
//!
//! `offset` is the index of the first visible row; `selected` always lies
//! inside the visible window.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use natega_core::dispatch::SearchReply;
use natega_core::format::{self, ResultRow, COLUMN_HEADERS, NO_RESULTS_MESSAGE};
use natega_core::SearchResult;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Rect},
    text::Line,
    widgets::{
        Block, Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget,
        Table, TableState, Widget,
    },
};

const WIDTHS: [Constraint; 6] = [
    Constraint::Length(5),
    Constraint::Length(12),
    Constraint::Fill(1),
    Constraint::Length(8),
    Constraint::Length(9),
    Constraint::Length(18),
];

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub enum ResultsView {
    /// Nothing searched since the dataset loaded.
    #[default]
    Idle,
    NoMatch { query: String },
    Rows { query: String, rows: Vec<ResultRow> },
}

#[derive(Debug)]
pub struct ResultsTableState {
    pub view: ResultsView,
    pub selected: usize,
    pub offset: usize,
    /// Body rows that fit on screen, cached from the last render.
    last_height: Cell<usize>,
}

impl Default for ResultsTableState {
    fn default() -> Self {
        Self {
            view: ResultsView::Idle,
            selected: 0,
            offset: 0,
            last_height: Cell::new(20),
        }
    }
}

impl ResultsTableState {
    /// Replace the table contents with a finished search.
    pub fn set_reply(&mut self, reply: &SearchReply) {
        self.view = match &reply.result {
            SearchResult::NoMatch => ResultsView::NoMatch { query: reply.query.clone() },
            found => ResultsView::Rows {
                query: reply.query.clone(),
                rows: format::rows(found),
            },
        };
        self.selected = 0;
        self.offset = 0;
    }

    pub fn clear(&mut self) {
        *self = Self {
            last_height: Cell::new(self.last_height.get()),
            ..Self::default()
        };
    }

    pub fn rows(&self) -> &[ResultRow] {
        match &self.view {
            ResultsView::Rows { rows, .. } => rows,
            _ => &[],
        }
    }

    pub fn selected_row(&self) -> Option<&ResultRow> {
        self.rows().get(self.selected)
    }

    fn height(&self) -> usize {
        self.last_height.get().max(1)
    }

    pub fn handle(&mut self, event: &AppEvent) {
        let total = self.rows().len();
        if total == 0 {
            return;
        }
        let last = total - 1;
        let page = self.height();

        self.selected = match event {
            AppEvent::Nav(Direction::Up) => self.selected.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => (self.selected + 1).min(last),
            AppEvent::ScrollUp => self.selected.saturating_sub(page),
            AppEvent::ScrollDown => (self.selected + page).min(last),
            AppEvent::Top => 0,
            AppEvent::Bottom => last,
            _ => return,
        };

        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + page {
            self.offset = self.selected + 1 - page;
        }
        tracing::debug!(selected = self.selected, offset = self.offset, "results: moved");
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ResultsTable<'a> {
    state: &'a ResultsTableState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ResultsTable<'a> {
    pub fn new(state: &'a ResultsTableState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }
}

impl Widget for ResultsTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let title = match &self.state.view {
            ResultsView::Idle => " النتائج ".to_string(),
            ResultsView::NoMatch { query } => format!(" {query} "),
            ResultsView::Rows { query, rows } => format!(" {query} · {} ", rows.len()),
        };
        let block = Block::bordered().title(title).border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = match &self.state.view {
            ResultsView::Idle => {
                Paragraph::new(Line::from("اكتب اسم الطالب ثم اضغط Enter"))
                    .alignment(Alignment::Center)
                    .render(inner, buf);
                return;
            }
            ResultsView::NoMatch { .. } => {
                Paragraph::new(Line::styled(NO_RESULTS_MESSAGE, self.theme.no_results))
                    .alignment(Alignment::Center)
                    .render(inner, buf);
                return;
            }
            ResultsView::Rows { rows, .. } => rows,
        };

        // One header row; the rest is body.
        let height = inner.height.saturating_sub(1) as usize;
        self.state.last_height.set(height);

        let table_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        let sb_area = Rect {
            x: inner.right().saturating_sub(1),
            width: 1,
            ..inner
        };

        let body = rows.iter().map(|row| {
            let style = if row.index % 2 == 0 {
                self.theme.table_row_alt
            } else {
                self.theme.table_row
            };
            Row::new(row.cells()).style(style)
        });
        let table = Table::new(body, WIDTHS)
            .header(Row::new(COLUMN_HEADERS).style(self.theme.table_header))
            .row_highlight_style(self.theme.table_selected)
            .column_spacing(1);

        let mut table_state = TableState::default()
            .with_offset(self.state.offset)
            .with_selected(self.focused.then_some(self.state.selected));
        StatefulWidget::render(table, table_area, buf, &mut table_state);

        let mut sb_state = ScrollbarState::new(rows.len())
            .position(self.state.offset)
            .viewport_content_length(height);
        StatefulWidget::render(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None),
            sb_area,
            buf,
            &mut sb_state,
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
