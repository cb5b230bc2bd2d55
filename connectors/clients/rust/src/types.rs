// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Request and response payloads exchanged with the HippoDB service.
//!
//! These are thin value types. The client holds no state beyond its connection
//! context, so nothing here has a lifecycle of its own.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::HippoError;

// ---------------------------------------------------------------------------
// Server discovery
// ---------------------------------------------------------------------------

/// Service metadata returned by `GET api/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Service version string.
    pub version: String,
    /// Feature flags advertised by the service, in service order.
    pub features: Vec<String>,
    /// Free-form vendor metadata.
    pub vendor: HashMap<String, String>,
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Opaque application identifier assigned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(String);

/// Opaque access token scoped to one application.
///
/// Whether the token can write is decided when it is minted and is never
/// echoed back to the client.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

macro_rules! string_newtype {
    ($name:ident) => {
        impl $name {
            /// Wrap a raw identifier string.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the raw identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Unwrap into the raw identifier.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_newtype!(AppId);
string_newtype!(Token);

// Tokens are credentials; keep them out of debug output.
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(..)")
    }
}

// ---------------------------------------------------------------------------
// Applications and databases
// ---------------------------------------------------------------------------

/// A registered application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationInfo {
    /// Server-assigned identifier.
    pub id: AppId,
    /// Human-readable name.
    pub name: String,
}

/// A database node in the hierarchical namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseInfo {
    /// Slash-delimited path, e.g. `/a/b`.
    pub path: String,
}

// ---------------------------------------------------------------------------
// Document contents
// ---------------------------------------------------------------------------

/// JSON document contents: an object or an array at the top level.
///
/// Nested values may be anything JSON allows. Top-level scalars are rejected
/// by [`TryFrom<Value>`] and fail to deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Contents {
    /// A JSON object.
    Object(Map<String, Value>),
    /// A JSON array.
    Array(Vec<Value>),
}

impl Contents {
    /// Borrow the contents as a JSON object, if it is one.
    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        match self {
            Contents::Object(map) => Some(map),
            Contents::Array(_) => None,
        }
    }

    /// Borrow the contents as a JSON array, if it is one.
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Contents::Array(items) => Some(items),
            Contents::Object(_) => None,
        }
    }
}

impl TryFrom<Value> for Contents {
    type Error = HippoError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Contents::Object(map)),
            Value::Array(items) => Ok(Contents::Array(items)),
            other => Err(HippoError::InvalidContents(format!(
                "expected a JSON object or array, got {}",
                json_kind(&other)
            ))),
        }
    }
}

impl From<Contents> for Value {
    fn from(contents: Contents) -> Self {
        match contents {
            Contents::Object(map) => Value::Object(map),
            Contents::Array(items) => Value::Array(items),
        }
    }
}

impl From<Map<String, Value>> for Contents {
    fn from(map: Map<String, Value>) -> Self {
        Contents::Object(map)
    }
}

impl From<Vec<Value>> for Contents {
    fn from(items: Vec<Value>) -> Self {
        Contents::Array(items)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
