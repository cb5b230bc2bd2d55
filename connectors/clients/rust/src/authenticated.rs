// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Credentialed client.
//!
//! [`AuthenticatedClient`] owns its own connection context with HTTP Basic
//! credentials (application id and token) attached to every request. It
//! dereferences to [`Client`], so the anonymous operations remain available.
//! Database and document operations live in the `databases` and `documents`
//! modules as further `impl AuthenticatedClient` blocks.

use std::ops::Deref;

use reqwest::Method;

use crate::client::Client;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::transport::{Auth, Transport};
use crate::types::{AppId, Token};

/// HippoDB client bound to one application identity.
#[derive(Debug)]
pub struct AuthenticatedClient {
    client: Client,
    app_id: AppId,
}

impl AuthenticatedClient {
    /// Open a credentialed connection context against `base_url`.
    pub async fn create(base_url: &str, app_id: AppId, token: Token) -> Result<Self> {
        Self::create_with_config(base_url, app_id, token, ClientConfig::default()).await
    }

    /// Open a credentialed connection context with custom settings.
    pub async fn create_with_config(
        base_url: &str,
        app_id: AppId,
        token: Token,
        config: ClientConfig,
    ) -> Result<Self> {
        let auth = Auth::Basic {
            app_id: app_id.clone(),
            token,
        };
        let transport = Transport::open(base_url, auth, config)?;
        Ok(Self {
            client: Client::from_transport(transport),
            app_id,
        })
    }

    /// The application this client acts as.
    pub fn app_id(&self) -> &AppId {
        &self.app_id
    }

    /// Delete an application (`DELETE api/apps/delete?app_id=...`).
    pub async fn delete_application(&self, app_id: &AppId) -> Result<()> {
        self.transport()
            .call_discard(Method::DELETE, "api/apps/delete", &[("app_id", app_id.as_str())])
            .await
    }

    /// Revoke a token (`DELETE api/tokens/delete?token_id=...`).
    pub async fn delete_token(&self, token: &Token) -> Result<()> {
        self.transport()
            .call_discard(
                Method::DELETE,
                "api/tokens/delete",
                &[("token_id", token.as_str())],
            )
            .await
    }
}

impl Deref for AuthenticatedClient {
    type Target = Client;

    fn deref(&self) -> &Client {
        &self.client
    }
}
