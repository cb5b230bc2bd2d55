// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//!
//! hippo — interactive shell for HippoDB.
//!
//! A readline loop over the `hippodb-client` SDK:
//! - Connect anonymously, list and create applications, mint tokens
//! - Authenticate and manage applications and tokens
//! - Tab completion for command names
//! - Persistent command history

mod command;
mod completer;
mod session;

use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use hippodb_client::ClientConfig;
use rustyline::error::ReadlineError;
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline_derive::{Completer, Helper, Highlighter, Hinter, Validator};

use command::{parse_command, Command};
use session::{Reply, Session, ShellError};

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ---------------------------------------------------------------------------
// CLI argument parsing
// ---------------------------------------------------------------------------

/// hippo — interactive shell for HippoDB.
#[derive(Parser, Debug)]
#[command(name = "hippo", version = VERSION, about = "Interactive shell for HippoDB")]
struct Cli {
    /// Service URL to connect to at startup.
    #[arg(env = "HIPPODB_URL")]
    url: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

// ---------------------------------------------------------------------------
// Rustyline helper
// ---------------------------------------------------------------------------

#[derive(Helper, Highlighter, Completer, Hinter, Validator)]
struct ShellHelper {
    #[rustyline(Completer)]
    completer: completer::CommandCompleter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::default().with_timeout(Duration::from_secs(cli.timeout_secs));
    let mut session = Session::new(config);

    if let Some(url) = cli.url {
        if let Err(err) = session.execute(Command::Connect(url)).await {
            eprintln!("{err}");
            return;
        }
    }

    let mut editor = match rustyline::Editor::<ShellHelper, DefaultHistory>::new() {
        Ok(editor) => editor,
        Err(err) => {
            eprintln!("{} cannot start line editor: {err}", "Error:".red().bold());
            return;
        }
    };
    editor.set_helper(Some(ShellHelper {
        completer: completer::CommandCompleter,
        hinter: HistoryHinter::new(),
    }));

    // Missing history on first run is fine.
    let history_path = history_file_path();
    let _ = editor.load_history(&history_path);

    loop {
        let line_prompt = prompt(&session);
        let line = tokio::task::block_in_place(|| editor.readline(&line_prompt));
        match line {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line.as_str());

                let command = match parse_command(&line) {
                    Ok(command) => command,
                    Err(err) => {
                        eprintln!("{err}");
                        continue;
                    }
                };

                match session.execute(command).await {
                    Ok(Reply::Text(text)) => println!("{text}"),
                    Ok(Reply::Done) => {}
                    Ok(Reply::Exit) => break,
                    Err(err) => report(&err),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Readline error: {err}");
                break;
            }
        }
    }

    session.close();
    eprintln!("Goodbye!");
    let _ = editor.save_history(&history_path);
}

/// `>>> ` when disconnected, otherwise the service URL and auth state.
fn prompt(session: &Session) -> String {
    match session.url() {
        None => ">>> ".to_string(),
        Some(url) if session.is_authenticated() => format!("{url} (auth) >>> "),
        Some(url) => format!("{url} >>> "),
    }
}

fn report(err: &ShellError) {
    match err {
        ShellError::Client(inner) => eprintln!("{} {inner}", "Error:".red().bold()),
        other => eprintln!("{other}"),
    }
}

/// Determine the history file path (~/.hippo_history).
fn history_file_path() -> std::path::PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".hippo_history")
}
