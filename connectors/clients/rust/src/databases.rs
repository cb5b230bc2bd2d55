// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Database operations.
//!
//! Databases form a slash-delimited hierarchy (`/`, `/a`, `/a/b`, ...). Except
//! for creation, which takes the path as a query value, each operation embeds
//! the database path as one double-encoded segment (see [`crate::path`]).

use reqwest::Method;

use crate::authenticated::AuthenticatedClient;
use crate::error::Result;
use crate::path;
use crate::types::DatabaseInfo;

impl AuthenticatedClient {
    /// Create a database at `path` (`POST api/create_db?path=...`).
    pub async fn create_database(&self, path: &str) -> Result<DatabaseInfo> {
        self.transport()
            .call(Method::POST, "api/create_db", &[("path", path)])
            .await
    }

    /// List databases below `path`.
    ///
    /// With `recursive` the whole subtree is returned, otherwise only direct
    /// children.
    pub async fn list_databases(&self, path: &str, recursive: bool) -> Result<Vec<DatabaseInfo>> {
        let recursive = if recursive { "true" } else { "false" };
        self.transport()
            .call(
                Method::GET,
                &path::databases_path(path),
                &[("recursive", recursive)],
            )
            .await
    }

    /// Direct children of the root database.
    pub async fn list_root_databases(&self) -> Result<Vec<DatabaseInfo>> {
        self.list_databases("/", false).await
    }

    /// Names of the documents stored in the database at `path`.
    pub async fn list_documents(&self, path: &str) -> Result<Vec<String>> {
        self.transport()
            .call(Method::GET, &path::database_path(path), &[])
            .await
    }

    /// Delete the database at `path` together with its documents.
    pub async fn delete_database(&self, path: &str) -> Result<()> {
        self.transport()
            .call_discard(Method::DELETE, &path::database_path(path), &[])
            .await
    }
}
