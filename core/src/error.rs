use std::path::PathBuf;

use thiserror::Error;


/// Settings file could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings in {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid setting '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },
}


/// A single command line could not be parsed.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("'{command}' needs {arg}")]
    MissingArgument {
        command: &'static str,
        arg: &'static str,
    },

    #[error("invalid parameter id '{0}'")]
    InvalidId(String),

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),

    #[error("unterminated quote")]
    UnterminatedQuote,

    #[error("invalid JSON command: {0}")]
    Json(String),
}


/// A script failed to parse; carries the 1-based line number.
#[derive(Debug, Error, PartialEq)]
#[error("line {line}: {error}")]
pub struct ScriptError {
    pub line: usize,
    #[source]
    pub error: ParseError,
}
