// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! # HippoDB Client SDK
//!
//! An async Rust client for HippoDB, a hierarchical document database served
//! over HTTP. The service hosts applications, tokens scoped to applications,
//! and a tree of databases holding named JSON documents.
//!
//! Access is two-tiered. A [`Client`] talks to the service anonymously: server
//! discovery, application listing and creation, token minting. Calling
//! [`Client::authenticate`] opens a second connection context with HTTP Basic
//! credentials and yields an [`AuthenticatedClient`] for database and document
//! CRUD.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hippodb_client::{Client, Contents};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> hippodb_client::Result<()> {
//!     let client = Client::create("http://localhost:8000").await?;
//!     let app = client.create_application("demo").await?;
//!     let token = client.mint_token(&app.id, true).await?;
//!
//!     let hippo = client.authenticate(app.id, token).await?;
//!     hippo.create_database("/a/b").await?;
//!     let contents = Contents::try_from(json!({"x": 1}))?;
//!     let name = hippo.create_document("/a/b", "doc1", &contents).await?;
//!     assert_eq!(hippo.read_document("/a/b", &name).await?, contents);
//!
//!     hippo.close();
//!     client.close();
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`client`] — Anonymous session client.
//! - [`authenticated`] — Credentialed client, application and token deletion.
//! - [`databases`] — Database creation, listing and deletion.
//! - [`documents`] — Document CRUD.
//! - [`path`] — Double percent-encoding of database paths and document names.
//! - [`types`] — Payload types (`ServerInfo`, `ApplicationInfo`, `Contents`, ...).
//! - [`config`] — Connection-context settings.
//! - [`error`] — Error types and the crate-level `Result` alias.

pub mod authenticated;
pub mod client;
pub mod config;
pub mod databases;
pub mod documents;
pub mod error;
pub mod path;
mod transport;
pub mod types;

pub use authenticated::AuthenticatedClient;
pub use client::Client;
pub use config::ClientConfig;
pub use error::{HippoError, Result};
pub use types::{AppId, ApplicationInfo, Contents, DatabaseInfo, ServerInfo, Token};
