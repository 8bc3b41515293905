//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. The loop polls the
//! terminal every 16 ms; between key events it picks up a finished dataset
//! load and finished searches from the [`Session`].
//!
//! Must run inside a tokio runtime context: loads and searches are spawned
//! onto the current runtime.

use crate::{
    commands::{execute_command, Command, CommandError},
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        help::HelpPopup,
        prompt::PromptPopup,
        query_bar::{QueryBar, QueryBarState},
        results_table::{ResultsTable, ResultsTableState},
        status_bar::StatusBar,
    },
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::future::BoxFuture;
use natega_core::{config::Config, FetchError, LoadError, RecordSet, Session, SubmitError};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, time::Duration};
use tokio::sync::oneshot;

/// Produces one load attempt. Called at startup and on every reload.
pub type LoadFn = Box<dyn Fn() -> BoxFuture<'static, Result<RecordSet, LoadError>> + Send>;

/// Event-loop iterations per spinner frame.
const SPINNER_DIVISOR: usize = 5;

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    QueryBar,
    Results,
    /// Vim-style `:` command line is active.
    Command,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub session: Session,
    pub query: QueryBarState,
    pub results: ResultsTableState,
    pub command_bar: CommandBarState,
    pub focus: Focus,
    /// Focus before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub title: String,
    /// Blocking message box; swallows every key until dismissed.
    pub prompt: Option<String>,
    pub show_help: bool,
    pub reload_requested: bool,
    pub tick: usize,
    pub quit: bool,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
    load: LoadFn,
    pending_load: Option<oneshot::Receiver<Result<RecordSet, LoadError>>>,
}

impl App {
    pub fn new(config: &Config, theme: Theme, load: LoadFn) -> Self {
        let state = AppState {
            session: Session::new(&config.search),
            query: QueryBarState::default(),
            results: ResultsTableState::default(),
            command_bar: CommandBarState::default(),
            focus: Focus::QueryBar,
            prev_focus: Focus::QueryBar,
            theme,
            title: config.ui.title.clone(),
            prompt: None,
            show_help: false,
            reload_requested: false,
            tick: 0,
            quit: false,
        };
        App { state, load, pending_load: None }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();
        self.start_load();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            self.tick();
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        let app_event = if is_insert_mode(&self.state) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Spawn a load attempt. A load still in flight is abandoned; its result
    /// is discarded when it arrives.
    pub fn start_load(&mut self) {
        let fut = (self.load)();
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            // The receiver is gone only when a newer load replaced this one.
            let _ = tx.send(fut.await);
        });
        self.pending_load = Some(rx);
    }

    fn reload(&mut self) {
        self.state.session.begin_reload();
        self.state.results.clear();
        self.state.prompt = None;
        self.start_load();
    }

    /// Background bookkeeping run once per loop iteration.
    pub fn tick(&mut self) {
        self.state.tick = self.state.tick.wrapping_add(1);

        if let Some(rx) = self.pending_load.as_mut() {
            let outcome = match rx.try_recv() {
                Ok(outcome) => Some(outcome),
                Err(oneshot::error::TryRecvError::Empty) => None,
                Err(oneshot::error::TryRecvError::Closed) => Some(Err(LoadError::Fetch(
                    FetchError::Transport("load task ended without a result".to_string()),
                ))),
            };
            if let Some(outcome) = outcome {
                self.pending_load = None;
                self.state.session.complete_load(outcome);
            }
        }

        if self.state.session.poll() {
            if let Some(reply) = self.state.session.last_reply() {
                tracing::debug!(generation = reply.generation, matches = reply.result.len(), "results updated");
                self.state.results.set_reply(reply);
            }
        }

        if std::mem::take(&mut self.state.reload_requested) {
            self.reload();
        }
    }

    pub fn handle(&mut self, event: AppEvent) {
        let s = &mut self.state;

        // A prompt blocks everything until dismissed.
        if s.prompt.is_some() {
            match event {
                AppEvent::Enter | AppEvent::Escape => {
                    tracing::debug!("prompt dismissed");
                    s.prompt = None;
                }
                AppEvent::Quit => s.quit = true,
                _ => {}
            }
            return;
        }

        // Help popup intercepts all events; only close keys pass through.
        if s.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    s.show_help = false;
                }
                _ => {}
            }
            return;
        }

        if s.focus == Focus::Command {
            handle_command_mode(s, event);
            return;
        }

        match event {
            AppEvent::Char('?') if s.focus == Focus::Results => {
                tracing::debug!("help popup opened");
                s.show_help = true;
            }

            AppEvent::Char(':') if s.focus == Focus::Results => {
                tracing::debug!("entering command mode");
                s.prev_focus = s.focus;
                s.command_bar.clear();
                s.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                s.quit = true;
            }

            AppEvent::Reload => s.reload_requested = true,

            AppEvent::Escape => {
                if s.focus == Focus::QueryBar {
                    s.focus = Focus::Results;
                }
            }

            AppEvent::FocusNext => {
                s.focus = match s.focus {
                    Focus::QueryBar => Focus::Results,
                    Focus::Results | Focus::Command => Focus::QueryBar,
                };
                tracing::debug!(to = ?s.focus, "focus cycle");
            }

            AppEvent::QueryFocus => s.focus = Focus::QueryBar,

            AppEvent::Enter if s.focus == Focus::QueryBar => submit_query(s),

            AppEvent::Resize(_, _) => {}

            other => match s.focus {
                Focus::QueryBar => s.query.handle(&other),
                Focus::Results => s.results.handle(&other),
                Focus::Command => {}
            },
        }
    }
}

/// True when letters should be typed rather than trigger shortcuts.
fn is_insert_mode(s: &AppState) -> bool {
    s.prompt.is_none() && !s.show_help && matches!(s.focus, Focus::QueryBar | Focus::Command)
}

fn submit_query(s: &mut AppState) {
    match s.session.submit(s.query.text()) {
        Ok(generation) => tracing::debug!(generation, "search submitted"),
        Err(err) => {
            tracing::debug!(error = %err, "search refused");
            s.prompt = Some(match err {
                SubmitError::Invalid(e) => e.to_string(),
                SubmitError::Loading => "The results are still loading, please wait".to_string(),
                SubmitError::Unavailable => {
                    "The results could not be loaded. Press Ctrl+r to retry".to_string()
                }
            });
        }
    }
}

fn handle_command_mode(s: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::Escape => {
            tracing::debug!("command bar cancelled");
            s.command_bar.clear();
            s.focus = s.prev_focus;
        }
        AppEvent::Quit => s.quit = true,
        AppEvent::Enter => {
            let parsed = Command::parse(&s.command_bar.input.text);
            match parsed {
                Ok(cmd) => {
                    tracing::debug!(command = ?cmd, "executing command");
                    match execute_command(s, cmd) {
                        Ok(()) => {
                            s.command_bar.clear();
                            s.focus = s.prev_focus;
                        }
                        Err(msg) => s.command_bar.error = Some(msg),
                    }
                }
                Err(CommandError::Empty) => {
                    s.command_bar.clear();
                    s.focus = s.prev_focus;
                }
                Err(err) => s.command_bar.error = Some(err.to_string()),
            }
        }
        other => s.command_bar.handle(&other),
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 3-line query bar | results | 1-line status bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([Constraint::Length(3), Constraint::Fill(1), Constraint::Length(1)])
        .split(area);

    let query = QueryBar::new(&state.query, state.focus == Focus::QueryBar, &state.title, &state.theme);
    let query_cursor = query.cursor_position(vert[0]);
    frame.render_widget(query, vert[0]);
    frame.render_widget(
        ResultsTable::new(&state.results, state.focus == Focus::Results, &state.theme),
        vert[1],
    );
    frame.render_widget(
        StatusBar::new(
            state.session.state(),
            state.session.is_searching(),
            state.tick / SPINNER_DIVISOR,
            &state.theme,
        ),
        vert[2],
    );

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }
    if let Some(msg) = &state.prompt {
        frame.render_widget(PromptPopup::new(msg, &state.theme), area);
        return;
    }

    // Command bar overlays the status row
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom().saturating_sub(1), height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        frame.set_cursor_position((state.command_bar.cursor_col(cmd_area), cmd_area.y));
        return;
    }

    if state.focus == Focus::QueryBar && !state.show_help {
        frame.set_cursor_position(query_cursor);
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
