//! natega TUI: ratatui application shell.
//!
//! The shell owns no I/O of its own: the caller hands [`run`] a [`LoadFn`]
//! that performs one dataset load, and the app calls it at startup and on
//! every reload.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::{App, LoadFn};

use natega_core::config::Config;

/// Start the TUI on a fresh multi-threaded tokio runtime and block until the
/// user quits.
pub fn run(config: Config, load: LoadFn) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("natega-worker")
        .build()?;
    let _guard = runtime.enter();

    let theme = theme::Theme::by_name(&config.ui.theme).unwrap_or_else(|| {
        tracing::warn!(theme = %config.ui.theme, "unknown theme, using default");
        theme::Theme::load_default()
    });
    App::new(&config, theme, load).run()
}
