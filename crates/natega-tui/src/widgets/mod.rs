//! Ratatui widgets for the natega TUI.

pub mod command_bar;
pub mod help;
pub mod line_input;
pub mod prompt;
pub mod query_bar;
pub mod results_table;
pub mod status_bar;
