//! Command — the typed interface for all parameter store operations.
//!
//! Every operation a front end can request is a variant of [`Command`].
//! The enum doubles as a JSON wire format for scripts:
//!
//! ```json
//! {"command": "param.set", "id": 1, "value": "вечернее"}
//! {"command": "param.add", "name": "Цвет", "value": "красный"}
//! {"command": "param.delete", "id": 2}
//! {"command": "view"}
//! ```
//!
//! [`execute`] applies a command to a store. It never fails; requests the
//! store ignores (duplicate name, unknown id) simply produce no change.

use serde::{Deserialize, Serialize};

use crate::store::ParamStore;
use crate::types::param::{Model, ParamEntry, ParamId, ParamType};


/// A typed request against the parameter store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "command")]
pub enum Command {
    /// Replace the value of a parameter.
    #[serde(rename = "param.set")]
    SetValue {
        id: ParamId,
        value: String,
    },

    /// Add a parameter unless its name is taken.
    #[serde(rename = "param.add")]
    AddParam {
        name: String,
        #[serde(rename = "type", default)]
        param_type: ParamType,
        /// Initial value. Empty when omitted.
        #[serde(default)]
        value: String,
    },

    /// Delete a parameter and its value.
    #[serde(rename = "param.delete")]
    DeleteParam {
        id: ParamId,
    },

    /// Produce the current parameter list with values.
    #[serde(rename = "view")]
    View,

    /// Produce a snapshot of the values.
    #[serde(rename = "model")]
    Model,
}

impl Command {
    /// Short name used in logs and help output.
    pub fn name(&self) -> &'static str {
        match self {
            Command::SetValue { .. } => "param.set",
            Command::AddParam { .. } => "param.add",
            Command::DeleteParam { .. } => "param.delete",
            Command::View => "view",
            Command::Model => "model",
        }
    }
}


/// What a command hands back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    None,
    View(Vec<ParamEntry>),
    Model(Model),
}


/// Apply `cmd` to `store`.
pub fn execute(store: &mut ParamStore, cmd: Command) -> Output {
    tracing::trace!(command = cmd.name(), "execute");
    match cmd {
        Command::SetValue { id, value } => {
            store.set_value(id, value);
            Output::None
        }
        Command::AddParam { name, param_type, value } => {
            store.add_param(&name, param_type, &value);
            Output::None
        }
        Command::DeleteParam { id } => {
            store.delete_param(id);
            Output::None
        }
        Command::View => Output::View(store.view()),
        Command::Model => Output::Model(store.model()),
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
