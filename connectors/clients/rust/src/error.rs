// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Error types for the HippoDB client SDK.
//!
//! All fallible operations in this crate return [`Result<T>`], which is an alias
//! for `std::result::Result<T, HippoError>`. The client performs no retries and
//! no local recovery: every failure reaches the caller of the operation that
//! produced it.

use thiserror::Error;

/// Error type for HippoDB client operations.
#[derive(Error, Debug)]
pub enum HippoError {
    /// The connection context could not be opened or configured (malformed
    /// base URL, unsupported scheme, HTTP client build failure).
    #[error("Connection error: {0}")]
    Connection(String),

    /// A network failure during a request (timeout, reset, DNS failure).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success HTTP status.
    #[error("Service error ({status}): {body}")]
    Service {
        /// HTTP status code.
        status: u16,
        /// Response body, verbatim.
        body: String,
    },

    /// A response body was not JSON, or did not have the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The client was used after [`close`](crate::client::Client::close).
    #[error("Client is closed")]
    ClosedClient,

    /// Document contents must be a JSON object or array at the top level.
    #[error("Invalid document contents: {0}")]
    InvalidContents(String),
}

impl HippoError {
    /// HTTP status of a [`HippoError::Service`] error.
    pub fn status(&self) -> Option<u16> {
        match self {
            HippoError::Service { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `true` if the service answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// `true` if the service rejected the credentials (401 or 403).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

/// Crate-level result alias using [`HippoError`].
pub type Result<T> = std::result::Result<T, HippoError>;
