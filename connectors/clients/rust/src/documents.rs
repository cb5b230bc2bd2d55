// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Document CRUD operations.
//!
//! A document is a named JSON object or array inside exactly one database and
//! is addressed by `(database path, name)`. Both parts are sent as separate
//! double-encoded segments, so a name such as `a/b` is one document rather
//! than a nested path.

use reqwest::Method;

use crate::authenticated::AuthenticatedClient;
use crate::error::Result;
use crate::path;
use crate::types::Contents;

impl AuthenticatedClient {
    /// Store a new document and return the name the service assigned to it.
    ///
    /// The returned name equals `name` unless the service substituted another
    /// one, e.g. because `name` was already taken.
    pub async fn create_document(
        &self,
        database: &str,
        name: &str,
        contents: &Contents,
    ) -> Result<String> {
        self.transport()
            .call_with_body(
                Method::POST,
                &path::database_path(database),
                &[("document_name", name)],
                contents,
            )
            .await
    }

    /// Fetch a document's contents.
    ///
    /// # Errors
    ///
    /// A top-level scalar in the response is a
    /// [`HippoError::Decode`](crate::error::HippoError::Decode).
    pub async fn read_document(&self, database: &str, name: &str) -> Result<Contents> {
        self.transport()
            .call(Method::GET, &path::document_path(database, name), &[])
            .await
    }

    /// Whether `name` exists in `database`.
    pub async fn document_exists(&self, database: &str, name: &str) -> Result<bool> {
        self.transport()
            .call(Method::GET, &path::document_exists_path(database, name), &[])
            .await
    }

    /// Replace a document's contents entirely. Nothing is merged.
    pub async fn update_document(
        &self,
        database: &str,
        name: &str,
        contents: &Contents,
    ) -> Result<()> {
        self.transport()
            .call_with_body_discard(Method::PUT, &path::document_path(database, name), contents)
            .await
    }

    /// Delete a document.
    pub async fn delete_document(&self, database: &str, name: &str) -> Result<()> {
        self.transport()
            .call_discard(Method::DELETE, &path::document_path(database, name), &[])
            .await
    }
}
