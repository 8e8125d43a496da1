//! Terminal front end for the parameter editor.
//!
//! # Modules
//!
//! - [`app`] — editor state machine and key routing
//! - [`editor`] — ratatui rendering of the form
//! - [`input`] — single-line text fields
//! - [`tui`] — terminal setup and the event loop

pub mod app;
pub mod editor;
pub mod input;
pub mod tui;
