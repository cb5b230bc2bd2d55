// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Anonymous session client.
//!
//! [`Client`] is the entry point of the SDK. It owns one connection context
//! without application credentials and exposes service discovery plus
//! application and token management. [`Client::authenticate`] opens a
//! separate, credentialed context and returns an
//! [`AuthenticatedClient`](crate::authenticated::AuthenticatedClient).

use reqwest::Method;
use url::Url;

use crate::authenticated::AuthenticatedClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::transport::{Auth, Transport};
use crate::types::{AppId, ApplicationInfo, ServerInfo, Token};

/// Anonymous HippoDB client.
///
/// # Examples
///
/// ```rust,no_run
/// use hippodb_client::client::Client;
///
/// # #[tokio::main]
/// # async fn main() -> hippodb_client::error::Result<()> {
/// let client = Client::create("http://localhost:8000").await?;
/// let info = client.server_info().await?;
/// println!("HippoDB {}", info.version);
/// client.close();
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Client {
    transport: Transport,
}

impl Client {
    // -- Constructors -------------------------------------------------------

    /// Open an anonymous session against `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`HippoError::Connection`](crate::error::HippoError::Connection)
    /// if `base_url` is not a usable http(s) URL. Reachability is not checked.
    pub async fn create(base_url: &str) -> Result<Self> {
        Self::create_with_config(base_url, ClientConfig::default()).await
    }

    /// Open an anonymous session with custom connection settings.
    pub async fn create_with_config(base_url: &str, config: ClientConfig) -> Result<Self> {
        Ok(Self::from_transport(Transport::open(
            base_url,
            Auth::None,
            config,
        )?))
    }

    pub(crate) fn from_transport(transport: Transport) -> Self {
        Self { transport }
    }

    pub(crate) fn transport(&self) -> &Transport {
        &self.transport
    }

    // -- Accessors ----------------------------------------------------------

    /// The normalised base URL (always ends in `/`).
    pub fn base_url(&self) -> &Url {
        self.transport.base_url()
    }

    /// Connection settings of this client.
    pub fn config(&self) -> &ClientConfig {
        self.transport.config()
    }

    /// `true` once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.transport.is_closed()
    }

    /// Release the connection context.
    ///
    /// Requests already in flight complete; every later call fails with
    /// [`HippoError::ClosedClient`](crate::error::HippoError::ClosedClient)
    /// without network activity. Closing again does nothing.
    pub fn close(&self) {
        self.transport.close();
    }

    // -- Discovery ----------------------------------------------------------

    /// Fetch service metadata (`GET api/`).
    pub async fn server_info(&self) -> Result<ServerInfo> {
        self.transport.call(Method::GET, "api/", &[]).await
    }

    // -- Applications and tokens ------------------------------------------

    /// List registered applications in the order the service returns them.
    pub async fn list_applications(&self) -> Result<Vec<ApplicationInfo>> {
        self.transport.call(Method::GET, "api/apps", &[]).await
    }

    /// Register a new application. The service assigns its id and validates
    /// `name`.
    pub async fn create_application(&self, name: &str) -> Result<ApplicationInfo> {
        self.transport
            .call(Method::POST, "api/apps/new", &[("name", name)])
            .await
    }

    /// Mint a token for `app_id`. Read-only unless `writeable` is set.
    pub async fn mint_token(&self, app_id: &AppId, writeable: bool) -> Result<Token> {
        let writeable = if writeable { "true" } else { "false" };
        self.transport
            .call(
                Method::POST,
                "api/tokens/new",
                &[("app_id", app_id.as_str()), ("writeable", writeable)],
            )
            .await
    }

    // -- Authentication -----------------------------------------------------

    /// Open a new connection context carrying `app_id`/`token` as HTTP Basic
    /// credentials against the same base URL.
    ///
    /// This client stays open. Bad credentials are only detected by the
    /// service on the first authenticated call (401/403).
    pub async fn authenticate(&self, app_id: AppId, token: Token) -> Result<AuthenticatedClient> {
        AuthenticatedClient::create_with_config(
            self.base_url().as_str(),
            app_id,
            token,
            self.config().clone(),
        )
        .await
    }
}
