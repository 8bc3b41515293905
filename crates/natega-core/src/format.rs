//! Display formatting shared by the TUI table and the headless printer.

use crate::types::{ResultRecord, SearchResult};

/// Column headings, in display order.
pub const COLUMN_HEADERS: [&str; 6] = ["#", "رقم الجلوس", "الاسم", "الدرجة", "النسبة", "حالة الطالب"];

/// Shown instead of a table when a search matched nothing.
pub const NO_RESULTS_MESSAGE: &str = "No results found";

/// Score with two decimals, e.g. `350.00`.
pub fn format_score(score: f64) -> String {
    format!("{score:.2}")
}

/// [`ResultRecord::percentage`] with two decimals and a percent sign, e.g. `50.00%`.
pub fn format_percentage(record: &ResultRecord) -> String {
    format!("{:.2}%", record.percentage())
}

/// One table row, every cell already rendered to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    /// 1-based position within the result list.
    pub index: usize,
    pub seat_number: String,
    pub name: String,
    pub score: String,
    pub percentage: String,
    pub status: String,
}

impl ResultRow {
    pub fn new(index: usize, record: &ResultRecord) -> Self {
        Self {
            index,
            seat_number: record.seat_number.to_string(),
            name: record.name.clone(),
            score: format_score(record.score),
            percentage: format_percentage(record),
            status: record.status.clone(),
        }
    }

    /// Cells in [`COLUMN_HEADERS`] order.
    pub fn cells(&self) -> [String; 6] {
        [
            self.index.to_string(),
            self.seat_number.clone(),
            self.name.clone(),
            self.score.clone(),
            self.percentage.clone(),
            self.status.clone(),
        ]
    }
}

/// Rows for every record in `result`; empty for `NoMatch`.
pub fn rows(result: &SearchResult) -> Vec<ResultRow> {
    result
        .records()
        .iter()
        .enumerate()
        .map(|(i, record)| ResultRow::new(i + 1, record))
        .collect()
}
