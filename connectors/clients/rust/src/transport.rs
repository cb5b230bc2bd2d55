// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! The connection context: base URL, pooled HTTP client, credentials.
//!
//! Every client owns exactly one [`Transport`]. The HTTP handle is a pooled
//! `reqwest::Client`, safe to share between concurrent requests, so the
//! transport performs no serialization of its own. Closing drops the
//! transport's handle; requests already in flight hold their own clone and
//! finish normally, while later requests fail with
//! [`HippoError::ClosedClient`] before touching the network.

use std::sync::{Mutex, PoisonError};

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{HippoError, Result};
use crate::types::{AppId, Token};

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// Credentials attached to every request on a connection context.
#[derive(Debug, Clone)]
pub(crate) enum Auth {
    /// Anonymous session.
    None,
    /// HTTP Basic: username = application id, password = token.
    Basic {
        /// Application the token belongs to.
        app_id: AppId,
        /// Token minted for `app_id`.
        token: Token,
    },
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// One connection context bound to a service base URL.
#[derive(Debug)]
pub(crate) struct Transport {
    base_url: Url,
    /// `None` once closed.
    http: Mutex<Option<reqwest::Client>>,
    auth: Auth,
    config: ClientConfig,
}

impl Transport {
    /// Open a connection context. No network traffic happens here; an
    /// unreachable host is reported by the first request.
    pub(crate) fn open(base_url: &str, auth: Auth, config: ClientConfig) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| HippoError::Connection(format!("cannot build HTTP client: {e}")))?;

        debug!(
            base_url = %redacted(&base_url),
            authenticated = matches!(auth, Auth::Basic { .. }),
            "opened connection context"
        );

        Ok(Self {
            base_url,
            http: Mutex::new(Some(http)),
            auth,
            config,
        })
    }

    pub(crate) fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.http
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    /// Release the pooled HTTP handle. Closing twice is a no-op.
    pub(crate) fn close(&self) {
        let previous = self
            .http
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if previous.is_some() {
            debug!(base_url = %redacted(&self.base_url), "closed connection context");
        }
    }

    // -- Request construction -----------------------------------------------

    fn handle(&self) -> Result<reqwest::Client> {
        self.http
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(HippoError::ClosedClient)
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| HippoError::Connection(format!("cannot join {path:?}: {e}")))
    }

    /// Start a request for `path` (relative to the base URL) with credentials
    /// attached.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let http = self.handle()?;
        let url = self.url(path)?;
        trace!(method = method.as_str(), url = %redacted(&url), "building request");

        let builder = http.request(method, url);
        Ok(match &self.auth {
            Auth::None => builder,
            Auth::Basic { app_id, token } => {
                builder.basic_auth(app_id.as_str(), Some(token.as_str()))
            }
        })
    }

    /// Send a request and turn non-2xx responses into [`HippoError::Service`].
    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        debug!(
            status = status.as_u16(),
            url = %redacted(response.url()),
            "response received"
        );

        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await?;
            Err(HippoError::Service {
                status: status.as_u16(),
                body,
            })
        }
    }

    // -- Typed helpers --------------------------------------------------------

    /// Send a request without a body and decode the JSON response.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let builder = self.request(method, path)?.query(query);
        decode(self.send(builder).await?).await
    }

    /// Send a request with a JSON body and decode the JSON response.
    pub(crate) async fn call_with_body<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<T> {
        let builder = self.request(method, path)?.query(query).json(body);
        decode(self.send(builder).await?).await
    }

    /// Send a request without a body; the response body is read and dropped.
    pub(crate) async fn call_discard(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<()> {
        let builder = self.request(method, path)?.query(query);
        self.send(builder).await?.bytes().await?;
        Ok(())
    }

    /// Send a request with a JSON body; the response body is read and dropped.
    pub(crate) async fn call_with_body_discard<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<()> {
        let builder = self.request(method, path)?.json(body);
        self.send(builder).await?.bytes().await?;
        Ok(())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

/// `url` without userinfo, query or fragment. Query strings carry token ids.
fn redacted(url: &Url) -> String {
    let mut url = url.clone();
    let _ = url.set_username("");
    let _ = url.set_password(None);
    url.set_query(None);
    url.set_fragment(None);
    url.into()
}

/// Validate a base URL and make sure it ends in `/`, so joining `api/...`
/// appends to any path prefix instead of replacing its last segment.
fn parse_base_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|e| HippoError::Connection(format!("invalid base URL {base_url:?}: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(HippoError::Connection(format!(
            "unsupported base URL {base_url:?}: expected http or https"
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}
