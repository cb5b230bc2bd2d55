// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//!
//! Shell session state: the one active client and command execution.

use hippodb_client::{AppId, AuthenticatedClient, Client, ClientConfig, HippoError, Token};
use thiserror::Error;

use crate::command::{Command, COMMANDS};

/// The client currently driving the shell.
pub enum Active {
    Anonymous(Client),
    Authenticated(AuthenticatedClient),
}

impl Active {
    fn client(&self) -> &Client {
        match self {
            Active::Anonymous(client) => client,
            Active::Authenticated(authed) => &**authed,
        }
    }

    fn close(&self) {
        self.client().close();
    }
}

/// Result of running one command.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    /// Print this text.
    Text(String),
    /// Nothing to print.
    Done,
    /// Leave the loop.
    Exit,
}

/// Failures reported to the user; the loop keeps going.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Not connected. Use `connect <url>` first.")]
    NotConnected,
    #[error("Not authenticated. Use `auth <app-id> <token>` first.")]
    NotAuthenticated,
    #[error("Invalid url.")]
    InvalidUrl,
    #[error(transparent)]
    Client(#[from] HippoError),
}

/// Mutable state of the interactive shell.
pub struct Session {
    active: Option<Active>,
    config: ClientConfig,
}

impl Session {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            active: None,
            config,
        }
    }

    /// Base URL of the active client, if any.
    pub fn url(&self) -> Option<String> {
        self.active
            .as_ref()
            .map(|active| active.client().base_url().to_string())
    }

    /// Whether the active client carries credentials.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.active, Some(Active::Authenticated(_)))
    }

    /// Close the active client, if any.
    pub fn close(&mut self) {
        if let Some(active) = self.active.take() {
            active.close();
        }
    }

    fn client(&self) -> Result<&Client, ShellError> {
        self.active
            .as_ref()
            .map(Active::client)
            .ok_or(ShellError::NotConnected)
    }

    fn authenticated(&self) -> Result<&AuthenticatedClient, ShellError> {
        match &self.active {
            Some(Active::Authenticated(authed)) => Ok(authed),
            Some(Active::Anonymous(_)) => Err(ShellError::NotAuthenticated),
            None => Err(ShellError::NotConnected),
        }
    }

    /// Run one command against the active client.
    pub async fn execute(&mut self, command: Command) -> Result<Reply, ShellError> {
        match command {
            Command::Exit => Ok(Reply::Exit),
            Command::Help => Ok(Reply::Text(help_text())),
            Command::Connect(url) => {
                let client = Client::create_with_config(&url, self.config.clone())
                    .await
                    .map_err(|err| match err {
                        HippoError::Connection(_) => ShellError::InvalidUrl,
                        other => ShellError::Client(other),
                    })?;
                tracing::info!(
                    origin = %client.base_url().origin().ascii_serialization(),
                    "connected"
                );
                self.close();
                self.active = Some(Active::Anonymous(client));
                Ok(Reply::Done)
            }
            Command::Auth { app_id, token } => {
                let authed = self
                    .client()?
                    .authenticate(AppId::from(app_id), Token::from(token))
                    .await?;
                self.close();
                self.active = Some(Active::Authenticated(authed));
                Ok(Reply::Done)
            }
            Command::Info => {
                let info = self.client()?.server_info().await?;
                Ok(Reply::Text(format!("{info:#?}")))
            }
            Command::ListApps => {
                let apps = self.client()?.list_applications().await?;
                Ok(Reply::Text(format!("{apps:#?}")))
            }
            Command::NewApp(name) => {
                let app = self.client()?.create_application(&name).await?;
                Ok(Reply::Text(format!("{app:#?}")))
            }
            Command::NewToken { app_id, writeable } => {
                let token = self
                    .client()?
                    .mint_token(&AppId::from(app_id), writeable)
                    .await?;
                Ok(Reply::Text(token.to_string()))
            }
            Command::DeleteApp(app_id) => {
                self.authenticated()?
                    .delete_application(&AppId::from(app_id))
                    .await?;
                Ok(Reply::Done)
            }
            Command::DeleteToken(token) => {
                self.authenticated()?
                    .delete_token(&Token::from(token))
                    .await?;
                Ok(Reply::Done)
            }
        }
    }
}

fn help_text() -> String {
    let usage: [(&str, &str); 10] = [
        ("connect <url>", "Connect to `url`"),
        ("auth <app-id> <token>", "Authenticate as `app-id` using `token`"),
        ("info", "Show server information"),
        ("list_apps", "List applications"),
        ("new_app <name...>", "Create a new application"),
        ("new_token <app-id> <writeable>", "Mint a token (writeable: true|false)"),
        ("delete_app <app-id>", "Delete an application (authenticated)"),
        ("delete_token <token>", "Revoke a token (authenticated)"),
        ("help", "Show this help message"),
        ("exit", "Leave the shell"),
    ];
    debug_assert_eq!(usage.len(), COMMANDS.len());

    let mut out = String::from("==== HippoDB CLI ====\n");
    for (synopsis, description) in usage {
        out.push_str(&format!("{synopsis}\n\t{description}\n"));
    }
    out
}
