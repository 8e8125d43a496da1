//! Parameter editor core — session state and the operations on it.
//!
//! # Modules
//!
//! - [`store`] — the in-memory parameter store
//! - [`command`] — typed commands and their execution
//! - [`script`] — line-oriented command scripts
//! - [`settings`] — YAML settings loading
//! - [`types`] — data model shared by all front ends

pub mod command;
pub mod error;
pub mod script;
pub mod settings;
pub mod store;
pub mod types;

pub use command::{execute, Command, Output};
pub use error::{ConfigError, ParseError, ScriptError};
pub use store::ParamStore;
