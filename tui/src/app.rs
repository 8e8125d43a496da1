//! Editor state machine.
//!
//! [`App`] tracks what the user is doing (browsing the list, editing a
//! value, filling in the add form, typing a command) and turns key presses
//! into [`AppAction`]s. It never touches the store itself; the runner in
//! [`crate::tui`] applies the actions and hands the fresh view back in on
//! the next key.

use param_editor_core::command::Command;
use param_editor_core::script;
use param_editor_core::types::{ParamEntry, ParamId, ParamType};

use crate::input::TextField;


// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The mode the editor is in.
#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    /// Moving through the parameter list.
    Browse,
    /// Editing the value of one parameter. Every change is applied at once.
    EditValue { id: ParamId },
    /// The "add parameter" form is open.
    AddForm,
    /// The `:` command prompt is active.
    CommandEntry,
    /// Key reference.
    Help,
}


impl AppState {
    /// Short label for the status bar.
    pub fn label(&self) -> &str {
        match self {
            AppState::Browse => "browse",
            AppState::EditValue { .. } => "edit",
            AppState::AddForm => "add",
            AppState::CommandEntry => "command",
            AppState::Help => "help",
        }
    }
}


// ---------------------------------------------------------------------------
// AppAction
// ---------------------------------------------------------------------------

/// An action produced in response to user input.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Run a command against the store.
    Apply(Command),
    /// Leave the editor.
    Quit,
}


// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// UI state of the parameter editor.
pub struct App {
    pub state: AppState,
    /// Row of the parameter list under the cursor.
    pub selected: usize,
    /// Field bound to the parameter being edited.
    pub value_field: TextField,
    /// Name input of the add form. Survives cancel so reopening the form
    /// shows the draft again.
    pub name_field: TextField,
    /// Command prompt input.
    pub prompt: TextField,
    status: Option<String>,
}


impl App {
    pub fn new() -> Self {
        App {
            state: AppState::Browse,
            selected: 0,
            value_field: TextField::new(),
            name_field: TextField::new(),
            prompt: TextField::new(),
            status: None,
        }
    }

    /// Whether the add form is showing.
    pub fn is_add_form_open(&self) -> bool {
        self.state == AppState::AddForm
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Keep the selection inside a list of `len` rows, and drop out of
    /// edit mode if the edited parameter disappeared.
    pub fn sync(&mut self, entries: &[ParamEntry]) {
        if entries.is_empty() {
            self.selected = 0;
        } else if self.selected >= entries.len() {
            self.selected = entries.len() - 1;
        }
        if let AppState::EditValue { id } = self.state {
            if !entries.iter().any(|e| e.id == id) {
                self.state = AppState::Browse;
            }
        }
    }

    pub fn select_next(&mut self, len: usize) {
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    // -------------------------------------------------------------------
    // Input processing
    // -------------------------------------------------------------------

    /// Process a key against the current view of the store.
    pub fn handle_key(&mut self, key: Key, entries: &[ParamEntry]) -> Option<AppAction> {
        self.clear_status();
        match self.state.clone() {
            AppState::Browse => self.handle_browse_key(key, entries),
            AppState::EditValue { id } => self.handle_edit_key(key, id),
            AppState::AddForm => self.handle_form_key(key),
            AppState::CommandEntry => self.handle_command_key(key),
            AppState::Help => {
                if matches!(key, Key::Escape | Key::Enter | Key::Char('q') | Key::Char('?')) {
                    self.state = AppState::Browse;
                }
                None
            }
        }
    }

    fn handle_browse_key(&mut self, key: Key, entries: &[ParamEntry]) -> Option<AppAction> {
        match key {
            Key::Char('q') => Some(AppAction::Quit),
            Key::Char('?') => {
                self.state = AppState::Help;
                None
            }
            Key::Char('j') | Key::Down | Key::Tab => {
                self.select_next(entries.len());
                None
            }
            Key::Char('k') | Key::Up => {
                self.select_prev();
                None
            }
            Key::Char('g') | Key::Home => {
                self.selected = 0;
                None
            }
            Key::Char('G') | Key::End => {
                self.select_last(entries.len());
                None
            }
            Key::Enter | Key::Char('e') | Key::Char('i') => {
                let entry = entries.get(self.selected)?;
                self.value_field.set_text(&entry.value);
                self.state = AppState::EditValue { id: entry.id };
                None
            }
            Key::Char('d') | Key::Delete => {
                let entry = entries.get(self.selected)?;
                Some(AppAction::Apply(Command::DeleteParam { id: entry.id }))
            }
            Key::Char('a') => {
                self.state = AppState::AddForm;
                None
            }
            Key::Char(':') | Key::Char('/') => {
                self.prompt.clear();
                self.state = AppState::CommandEntry;
                None
            }
            _ => None,
        }
    }

    fn handle_edit_key(&mut self, key: Key, id: ParamId) -> Option<AppAction> {
        match key {
            Key::Enter | Key::Escape | Key::Tab => {
                self.state = AppState::Browse;
                None
            }
            other => {
                if self.value_field.handle_edit_key(&other) {
                    Some(AppAction::Apply(Command::SetValue {
                        id,
                        value: self.value_field.text(),
                    }))
                } else {
                    None
                }
            }
        }
    }

    fn handle_form_key(&mut self, key: Key) -> Option<AppAction> {
        match key {
            Key::Escape => {
                self.state = AppState::Browse;
                None
            }
            Key::Enter => {
                let name = self.name_field.text();
                if name.trim().is_empty() {
                    self.set_status("Name is required");
                    return None;
                }
                self.name_field.clear();
                self.state = AppState::Browse;
                Some(AppAction::Apply(Command::AddParam {
                    name,
                    param_type: ParamType::String,
                    value: String::new(),
                }))
            }
            other => {
                self.name_field.handle_edit_key(&other);
                None
            }
        }
    }

    fn handle_command_key(&mut self, key: Key) -> Option<AppAction> {
        match key {
            Key::Escape => {
                self.prompt.clear();
                self.state = AppState::Browse;
                None
            }
            Key::Enter => match script::parse_line(&self.prompt.text()) {
                Ok(Some(cmd)) => {
                    self.prompt.clear();
                    self.state = AppState::Browse;
                    Some(AppAction::Apply(cmd))
                }
                Ok(None) => {
                    self.state = AppState::Browse;
                    None
                }
                Err(e) => {
                    self.set_status(e.to_string());
                    None
                }
            },
            other => {
                self.prompt.handle_edit_key(&other);
                None
            }
        }
    }
}


impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}


// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// A simplified key event, independent of the terminal backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    Escape,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Ctrl(char),
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
