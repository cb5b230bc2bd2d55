// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//!
//! Shell command grammar.
//!
//! One input line is tokenized with POSIX shell rules (quotes and escapes)
//! and mapped onto a [`Command`].

use thiserror::Error;

/// Every command name, for help output and tab completion.
pub const COMMANDS: &[&str] = &[
    "connect",
    "auth",
    "info",
    "list_apps",
    "new_app",
    "new_token",
    "delete_app",
    "delete_token",
    "help",
    "exit",
];

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open a new anonymous session, replacing the current one.
    Connect(String),
    /// Authenticate from the current session.
    Auth { app_id: String, token: String },
    /// Print server metadata.
    Info,
    /// List applications.
    ListApps,
    /// Create an application.
    NewApp(String),
    /// Mint a token.
    NewToken { app_id: String, writeable: bool },
    /// Delete an application (authenticated).
    DeleteApp(String),
    /// Revoke a token (authenticated).
    DeleteToken(String),
    /// Print usage.
    Help,
    /// Leave the shell.
    Exit,
}

/// Why a line could not be turned into a [`Command`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid syntax.")]
    Syntax,
    #[error("Empty command.")]
    Empty,
    #[error("Unknown command {0:?}")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("Expected true or false, got {0:?}")]
    Flag(String),
}

/// Parse one input line.
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let words = shlex::split(line).ok_or(ParseError::Syntax)?;
    let Some((cmd, args)) = words.split_first() else {
        return Err(ParseError::Empty);
    };

    let command = match (cmd.as_str(), args) {
        ("exit", []) => Command::Exit,
        ("help", []) => Command::Help,
        ("info", []) => Command::Info,
        ("list_apps", []) => Command::ListApps,
        ("connect", [url]) => Command::Connect(url.clone()),
        ("connect", _) => return Err(ParseError::Usage("connect <url>")),
        ("auth", [app_id, token]) => Command::Auth {
            app_id: app_id.clone(),
            token: token.clone(),
        },
        ("auth", _) => return Err(ParseError::Usage("auth <app-id> <token>")),
        ("new_app", []) => return Err(ParseError::Usage("new_app <name...>")),
        ("new_app", name) => Command::NewApp(name.join(" ")),
        ("new_token", [app_id, writeable]) => Command::NewToken {
            app_id: app_id.clone(),
            writeable: parse_flag(writeable)?,
        },
        ("new_token", _) => return Err(ParseError::Usage("new_token <app-id> <writeable>")),
        ("delete_app", [app_id]) => Command::DeleteApp(app_id.clone()),
        ("delete_app", _) => return Err(ParseError::Usage("delete_app <app-id>")),
        ("delete_token", [token]) => Command::DeleteToken(token.clone()),
        ("delete_token", _) => return Err(ParseError::Usage("delete_token <token>")),
        ("exit" | "help" | "info" | "list_apps", _) => {
            return Err(ParseError::Usage("command takes no arguments"))
        }
        (other, _) => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(command)
}

fn parse_flag(raw: &str) -> Result<bool, ParseError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(ParseError::Flag(raw.to_string())),
    }
}
