//! Line-oriented command scripts.
//!
//! Used by batch mode and by the editor's command prompt. One command per
//! line:
//!
//! ```text
//! set <id> <value...>
//! add <name> [value...]
//! delete <id>
//! view
//! model
//! {"command": "param.set", "id": 1, "value": "x"}
//! ```
//!
//! Tokens split on whitespace; double quotes group words and `\` escapes the
//! next character inside quotes. Blank lines and `#` comments are skipped.

use crate::command::Command;
use crate::error::{ParseError, ScriptError};
use crate::types::param::{ParamId, ParamType};


/// Parse a whole script. Stops at the first bad line.
pub fn parse_script(text: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        match parse_line(line) {
            Ok(Some(cmd)) => commands.push(cmd),
            Ok(None) => {}
            Err(error) => return Err(ScriptError { line: idx + 1, error }),
        }
    }
    Ok(commands)
}


/// Parse one line. Returns `Ok(None)` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    if trimmed.starts_with('{') {
        return serde_json::from_str(trimmed)
            .map(Some)
            .map_err(|e| ParseError::Json(e.to_string()));
    }

    let tokens = tokenize(trimmed)?;
    let Some(verb) = tokens.first() else {
        return Ok(None);
    };

    let cmd = match verb.as_str() {
        "set" => {
            let id = parse_id(tokens.get(1), "set")?;
            if tokens.len() < 3 {
                return Err(ParseError::MissingArgument {
                    command: "set",
                    arg: "a value",
                });
            }
            Command::SetValue {
                id,
                value: tokens[2..].join(" "),
            }
        }
        "add" => {
            let name = tokens.get(1).ok_or(ParseError::MissingArgument {
                command: "add",
                arg: "a name",
            })?;
            Command::AddParam {
                name: name.clone(),
                param_type: ParamType::String,
                value: tokens.get(2..).map(|rest| rest.join(" ")).unwrap_or_default(),
            }
        }
        "delete" | "rm" => {
            let id = parse_id(tokens.get(1), "delete")?;
            no_more(&tokens, 2)?;
            Command::DeleteParam { id }
        }
        "view" => {
            no_more(&tokens, 1)?;
            Command::View
        }
        "model" => {
            no_more(&tokens, 1)?;
            Command::Model
        }
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };
    Ok(Some(cmd))
}


fn parse_id(token: Option<&String>, command: &'static str) -> Result<ParamId, ParseError> {
    let raw = token.ok_or(ParseError::MissingArgument {
        command,
        arg: "a parameter id",
    })?;
    raw.parse::<u64>()
        .map(ParamId)
        .map_err(|_| ParseError::InvalidId(raw.clone()))
}


fn no_more(tokens: &[String], expected: usize) -> Result<(), ParseError> {
    match tokens.get(expected) {
        Some(extra) => Err(ParseError::UnexpectedArgument(extra.clone())),
        None => Ok(()),
    }
}


/// Split a line into tokens, honouring double quotes.
fn tokenize(line: &str) -> Result<Vec<String>, ParseError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_quotes = false;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' => in_quotes = false,
                '\\' => match chars.next() {
                    Some(escaped) => current.push(escaped),
                    None => return Err(ParseError::UnterminatedQuote),
                },
                _ => current.push(ch),
            }
            continue;
        }
        match ch {
            '"' => {
                in_quotes = true;
                in_token = true;
            }
            c if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            _ => {
                current.push(ch);
                in_token = true;
            }
        }
    }

    if in_quotes {
        return Err(ParseError::UnterminatedQuote);
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
