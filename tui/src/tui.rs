//! TUI runner — ratatui event loop with terminal setup and cleanup.
//!
//! The [`Tui`] struct owns the ratatui terminal, the editor state machine
//! ([`App`]) and the session's [`ParamStore`]. It draws a frame, waits for a
//! key, lets the `App` turn it into an action, and applies that action to
//! the store before drawing again.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::prelude::*;
use ratatui::Terminal;
use tracing::{debug, info};

use param_editor_core::command::{self, Command, Output};
use param_editor_core::store::ParamStore;
use param_editor_core::types::{Model, Settings};

use crate::app::{App, AppAction, Key};
use crate::editor::{self, RenderState};


/// The terminal parameter editor.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app: App,
    store: ParamStore,
    tick_rate: Duration,
    title: String,
    placeholder: String,
}


impl Tui {
    /// Create a new TUI over `store`, entering raw mode and the alternate
    /// screen.
    pub fn new(store: ParamStore, settings: &Settings) -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            app: App::new(),
            store,
            tick_rate: Duration::from_millis(settings.tick_ms.max(1)),
            title: settings.title.clone(),
            placeholder: settings.placeholder.clone(),
        })
    }

    /// The session state, as left by the user.
    pub fn store(&self) -> &ParamStore {
        &self.store
    }

    /// Run the main event loop until quit is requested.
    pub fn run(&mut self) -> Result<(), io::Error> {
        info!(params = self.store.len(), "editor started");

        loop {
            let entries = self.store.view();
            let state = RenderState {
                app: &self.app,
                entries: &entries,
                title: &self.title,
                placeholder: &self.placeholder,
            };
            self.terminal.draw(|frame| editor::render_frame(frame, &state))?;

            if !event::poll(self.tick_rate)? {
                continue;
            }
            let Event::Key(key_event) = event::read()? else {
                continue;
            };
            if key_event.kind != KeyEventKind::Press {
                continue;
            }
            // Ctrl-C always quits immediately.
            if key_event.code == KeyCode::Char('c')
                && key_event.modifiers.contains(KeyModifiers::CONTROL)
            {
                break;
            }

            let key = crossterm_to_key(key_event.code, key_event.modifiers);
            if let Some(action) = self.app.handle_key(key, &entries) {
                if apply_action(&mut self.app, &mut self.store, action) {
                    break;
                }
            }
        }

        info!(params = self.store.len(), "editor closed");
        self.shutdown()
    }

    /// Restore the terminal to its normal state.
    fn shutdown(&mut self) -> Result<(), io::Error> {
        terminal::disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}


impl Drop for Tui {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
    }
}


// ---------------------------------------------------------------------------
// Action handling
// ---------------------------------------------------------------------------

/// Apply an `AppAction` to the store and bring the `App` back in line with
/// the result.
///
/// Returns `true` if the editor should quit.
pub fn apply_action(app: &mut App, store: &mut ParamStore, action: AppAction) -> bool {
    let cmd = match action {
        AppAction::Quit => return true,
        AppAction::Apply(cmd) => cmd,
    };
    debug!(command = cmd.name(), "applying");

    let added = matches!(cmd, Command::AddParam { .. });
    let before = store.len();
    match command::execute(store, cmd) {
        Output::None | Output::View(_) => {}
        Output::Model(model) => app.set_status(model_summary(&model)),
    }

    let entries = store.view();
    if added && store.len() > before {
        app.select_last(entries.len());
    }
    app.sync(&entries);
    false
}


/// One-line rendering of the model for the status bar.
fn model_summary(model: &Model) -> String {
    let values: Vec<String> = model
        .param_values
        .iter()
        .map(|v| format!("{}={:?}", v.param_id, v.value))
        .collect();
    format!("model: {}", values.join(" "))
}


// ---------------------------------------------------------------------------
// Key conversion
// ---------------------------------------------------------------------------

/// Convert a crossterm `KeyCode` + `KeyModifiers` into our `Key` type.
pub fn crossterm_to_key(code: KeyCode, modifiers: KeyModifiers) -> Key {
    if modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char(ch) = code {
            return Key::Ctrl(ch);
        }
    }
    // Alt chords are not bound and must not type text.
    if modifiers.contains(KeyModifiers::ALT) {
        return Key::Char('\0');
    }
    match code {
        KeyCode::Char(ch) => Key::Char(ch),
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Esc => Key::Escape,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        _ => Key::Char('\0'), // unmapped keys produce a null char
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
