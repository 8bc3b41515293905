//! Semantic application events: crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! # Keybindings
//!
//! | Key(s)                  | Event             |
//! |-------------------------|-------------------|
//! | `q`, `Ctrl+c`           | `Quit`            |
//! | `Tab`                   | `FocusNext`       |
//! | `/`                     | `QueryFocus`      |
//! | `Ctrl+r`                | `Reload`          |
//! | `PageUp`, `Ctrl+u`      | `ScrollUp`        |
//! | `PageDown`, `Ctrl+d`    | `ScrollDown`      |
//! | `g`, `Home`             | `Top`             |
//! | `G`, `End`              | `Bottom`          |
//! | `↑` / `k`               | `Nav(Up)`         |
//! | `↓` / `j`               | `Nav(Down)`       |
//! | `←` / `h`               | `Nav(Left)`       |
//! | `→` / `l`               | `Nav(Right)`      |
//! | printable char          | `Char(c)`         |
//! | `Backspace`             | `Backspace`       |
//! | `Delete`                | `Delete`          |
//! | `Enter`                 | `Enter`           |
//! | terminal resize         | `Resize(w, h)`    |
//!
//! ## Insert mode
//!
//! While the query bar or the command bar is focused the event loop calls
//! [`to_app_event_insert`] instead. Every printable character (Arabic
//! letters included) is forwarded as `Char`; arrows, `Home` and `End` move
//! the text cursor; only `Ctrl+c`, `Ctrl+r`, `Escape`, `Enter`, `Tab`,
//! `Backspace` and `Delete` keep their special bindings.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A semantic application event derived from a raw crossterm [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    /// Move keyboard focus between the query bar and the results table.
    FocusNext,
    QueryFocus,
    /// Fetch the archive again.
    Reload,
    ScrollUp,
    ScrollDown,
    Top,
    Bottom,
    Nav(Direction),
    Char(char),
    Backspace,
    Delete,
    /// Submit the query, confirm a command, or dismiss a prompt.
    Enter,
    Resize(u16, u16),
    Escape,
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] (navigation mode).
///
/// Returns `None` for mouse events and unbound keys.
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key(key),
        _ => None,
    }
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] for text-input mode.
pub fn to_app_event_insert(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key_insert(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('q') if key.modifiers == Mod::NONE => Some(AppEvent::Quit),
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),
        Char('r') if key.modifiers == Mod::CONTROL => Some(AppEvent::Reload),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),
        Char('/') if key.modifiers == Mod::NONE => Some(AppEvent::QueryFocus),

        PageUp => Some(AppEvent::ScrollUp),
        PageDown => Some(AppEvent::ScrollDown),
        Char('u') if key.modifiers == Mod::CONTROL => Some(AppEvent::ScrollUp),
        Char('d') if key.modifiers == Mod::CONTROL => Some(AppEvent::ScrollDown),

        Home => Some(AppEvent::Top),
        End => Some(AppEvent::Bottom),
        Char('g') if key.modifiers == Mod::NONE => Some(AppEvent::Top),
        // SHIFT may or may not be reported with an uppercase letter
        Char('G') => Some(AppEvent::Bottom),

        Up | Char('k') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Up)),
        Down | Char('j') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Down)),
        Left | Char('h') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Left)),
        Right | Char('l') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Right)),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Delete => Some(AppEvent::Delete),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

fn map_key_insert(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),
        Char('r') if key.modifiers == Mod::CONTROL => Some(AppEvent::Reload),

        Up => Some(AppEvent::Nav(Direction::Up)),
        Down => Some(AppEvent::Nav(Direction::Down)),
        Left => Some(AppEvent::Nav(Direction::Left)),
        Right => Some(AppEvent::Nav(Direction::Right)),
        Home => Some(AppEvent::Top),
        End => Some(AppEvent::Bottom),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Delete => Some(AppEvent::Delete),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
