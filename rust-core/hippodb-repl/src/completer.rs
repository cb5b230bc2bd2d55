// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//!
//! Tab-completion for the HippoDB shell.
//!
//! Only the first word of a line is completed, against the command names.
//! Arguments (urls, ids, tokens) are opaque and left alone.

use rustyline::completion::{Completer, Pair};
use rustyline::Context;

use crate::command::COMMANDS;

/// Tab-completer for shell commands.
pub struct CommandCompleter;

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, prefix) = find_word_start(line, pos);
        Ok((start, candidates(&line[..start], prefix)))
    }
}

/// Commands matching `prefix`, when the word being completed is the first one.
fn candidates(before: &str, prefix: &str) -> Vec<Pair> {
    if !before.trim().is_empty() {
        return Vec::new();
    }
    COMMANDS
        .iter()
        .filter(|cmd| cmd.starts_with(prefix))
        .map(|cmd| Pair {
            display: cmd.to_string(),
            replacement: cmd.to_string(),
        })
        .collect()
}

/// Find the start position and text of the word being completed.
///
/// Scans backwards from `pos` to the previous whitespace.
fn find_word_start(line: &str, pos: usize) -> (usize, &str) {
    let start = line[..pos]
        .char_indices()
        .rev()
        .find(|(_, ch)| ch.is_whitespace())
        .map(|(idx, ch)| idx + ch.len_utf8())
        .unwrap_or(0);

    (start, &line[start..pos])
}
