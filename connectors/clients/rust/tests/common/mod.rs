// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! In-process mock of the HippoDB service.
//!
//! Serves the HTTP surface the client consumes from an ephemeral localhost
//! port. Request targets are decoded the way the real service does it: one
//! percent-decoding pass over the whole path before splitting on `/`, then a
//! second pass on each segment. Every request is logged together with its
//! `Authorization` header.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use percent_encoding::percent_decode_str;
use serde_json::{json, Value};

/// One request as seen by the mock.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub raw_path: String,
    pub authorization: Option<String>,
}

#[derive(Debug, Default)]
pub struct MockState {
    /// app id -> name, in creation order.
    pub apps: Vec<(String, String)>,
    /// token -> (app id, writeable)
    pub tokens: HashMap<String, (String, bool)>,
    /// database path -> document name -> contents
    pub databases: BTreeMap<String, BTreeMap<String, Value>>,
    pub requests: Vec<Recorded>,
}

pub type Shared = Arc<Mutex<MockState>>;

pub struct MockService {
    pub url: String,
    pub state: Shared,
}

impl MockService {
    pub async fn start() -> Self {
        let state: Shared = Arc::default();
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{addr}"),
            state,
        }
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Decoded `(username, password)` of every Basic credential received.
    pub fn basic_credentials(&self) -> Vec<(String, String)> {
        self.requests()
            .iter()
            .filter_map(|r| r.authorization.as_deref().and_then(decode_basic))
            .collect()
    }

    pub fn document_names(&self, database: &str) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .databases
            .get(database)
            .map(|docs| docs.keys().cloned().collect())
            .unwrap_or_default()
    }
}

pub fn decode_basic(header: &str) -> Option<(String, String)> {
    let encoded = header.strip_prefix("Basic ")?;
    let raw = String::from_utf8(STANDARD.decode(encoded).ok()?).ok()?;
    let (user, pass) = raw.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}

/// The service's two decoding passes over a raw request path below `api/`.
pub fn service_segments(raw: &str) -> Option<Vec<String>> {
    let first = percent_decode_str(raw).decode_utf8().ok()?;
    first
        .split('/')
        .map(|s| {
            percent_decode_str(s)
                .decode_utf8()
                .ok()
                .map(|c| c.into_owned())
        })
        .collect()
}

fn error(status: StatusCode, detail: &str) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

fn ok(value: Value) -> Response {
    Json(value).into_response()
}

enum Access {
    Read,
    Write,
}

fn authorize(state: &MockState, headers: &HeaderMap, access: Access) -> Result<String, Response> {
    let creds = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(decode_basic)
        .ok_or_else(|| error(StatusCode::UNAUTHORIZED, "missing credentials"))?;
    let (app_id, token) = creds;
    match state.tokens.get(&token) {
        Some((owner, writeable)) if *owner == app_id => match access {
            Access::Write if !writeable => Err(error(StatusCode::FORBIDDEN, "read-only token")),
            _ => Ok(app_id),
        },
        _ => Err(error(StatusCode::UNAUTHORIZED, "invalid credentials")),
    }
}

fn children(state: &MockState, parent: &str, recursive: bool) -> Vec<Value> {
    let prefix = if parent.ends_with('/') {
        parent.to_string()
    } else {
        format!("{parent}/")
    };
    state
        .databases
        .keys()
        .filter(|path| path.as_str() != parent)
        .filter_map(|path| path.strip_prefix(&prefix).map(|rest| (path, rest)))
        .filter(|(_, rest)| recursive || !rest.contains('/'))
        .map(|(path, _)| json!({ "path": path }))
        .collect()
}

async fn handle(
    State(shared): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut state = shared.lock().unwrap();
    state.requests.push(Recorded {
        method: method.clone(),
        raw_path: uri.path().to_string(),
        authorization: headers
            .get("authorization")
            .and_then(|h| h.to_str().ok())
            .map(str::to_string),
    });

    let query: HashMap<String, String> = uri
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();

    // Anything mounted under /broken/ answers with a bare JSON scalar.
    if uri.path().starts_with("/broken/") {
        return ok(json!("oops"));
    }

    let Some(rest) = uri.path().strip_prefix("/api/") else {
        return error(StatusCode::NOT_FOUND, "not found");
    };
    if rest.is_empty() {
        if method != Method::GET {
            return error(StatusCode::METHOD_NOT_ALLOWED, "method not allowed");
        }
        return ok(json!({
            "version": "0.3.0",
            "features": ["databases", "documents", "tokens"],
            "vendor": { "name": "mock" }
        }));
    }

    let Some(segments) = service_segments(rest) else {
        return error(StatusCode::BAD_REQUEST, "bad encoding");
    };
    let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", ["apps"]) => ok(Value::Array(
            state
                .apps
                .iter()
                .map(|(id, name)| json!({ "id": id, "name": name }))
                .collect(),
        )),
        ("POST", ["apps", "new"]) => match query.get("name") {
            Some(name) if !name.is_empty() => {
                let id = uuid::Uuid::new_v4().to_string();
                state.apps.push((id.clone(), name.clone()));
                ok(json!({ "id": id, "name": name }))
            }
            _ => error(StatusCode::BAD_REQUEST, "name must not be empty"),
        },
        ("POST", ["tokens", "new"]) => {
            let Some(app_id) = query.get("app_id") else {
                return error(StatusCode::BAD_REQUEST, "app_id required");
            };
            let writeable = match query.get("writeable").map(String::as_str) {
                Some("true") => true,
                Some("false") => false,
                _ => return error(StatusCode::BAD_REQUEST, "writeable must be true or false"),
            };
            if !state.apps.iter().any(|(id, _)| id == app_id) {
                return error(StatusCode::NOT_FOUND, "unknown application");
            }
            let token = uuid::Uuid::new_v4().simple().to_string();
            state.tokens.insert(token.clone(), (app_id.clone(), writeable));
            ok(json!(token))
        }
        ("DELETE", ["apps", "delete"]) => {
            if let Err(resp) = authorize(&state, &headers, Access::Write) {
                return resp;
            }
            let Some(app_id) = query.get("app_id").cloned() else {
                return error(StatusCode::BAD_REQUEST, "app_id required");
            };
            let before = state.apps.len();
            state.apps.retain(|(id, _)| *id != app_id);
            if state.apps.len() == before {
                return error(StatusCode::NOT_FOUND, "unknown application");
            }
            state.tokens.retain(|_, (owner, _)| *owner != app_id);
            ok(json!({ "deleted": app_id }))
        }
        ("DELETE", ["tokens", "delete"]) => {
            if let Err(resp) = authorize(&state, &headers, Access::Write) {
                return resp;
            }
            match query.get("token_id").and_then(|t| state.tokens.remove(t)) {
                Some(_) => ok(Value::Null),
                None => error(StatusCode::NOT_FOUND, "unknown token"),
            }
        }
        ("POST", ["create_db"]) => {
            if let Err(resp) = authorize(&state, &headers, Access::Write) {
                return resp;
            }
            let Some(path) = query.get("path").cloned() else {
                return error(StatusCode::BAD_REQUEST, "path required");
            };
            if state.databases.contains_key(&path) {
                return error(StatusCode::CONFLICT, "database exists");
            }
            state.databases.insert(path.clone(), BTreeMap::new());
            ok(json!({ "path": path }))
        }
        ("GET", ["dbs", parent]) => {
            if let Err(resp) = authorize(&state, &headers, Access::Read) {
                return resp;
            }
            let recursive = query.get("recursive").map(String::as_str) == Some("true");
            ok(Value::Array(children(&state, parent, recursive)))
        }
        ("GET", [db]) => {
            if let Err(resp) = authorize(&state, &headers, Access::Read) {
                return resp;
            }
            match state.databases.get(*db) {
                Some(docs) => ok(json!(docs.keys().collect::<Vec<_>>())),
                None => error(StatusCode::NOT_FOUND, "no such database"),
            }
        }
        ("DELETE", [db]) => {
            if let Err(resp) = authorize(&state, &headers, Access::Write) {
                return resp;
            }
            if state.databases.remove(*db).is_none() {
                return error(StatusCode::NOT_FOUND, "no such database");
            }
            let nested = format!("{}/", db.trim_end_matches('/'));
            state.databases.retain(|path, _| !path.starts_with(&nested));
            ok(Value::Null)
        }
        ("POST", [db]) => {
            if let Err(resp) = authorize(&state, &headers, Access::Write) {
                return resp;
            }
            let Some(requested) = query.get("document_name").cloned() else {
                return error(StatusCode::BAD_REQUEST, "document_name required");
            };
            let contents: Value = match serde_json::from_slice(&body) {
                Ok(v @ (Value::Object(_) | Value::Array(_))) => v,
                _ => return error(StatusCode::BAD_REQUEST, "contents must be object or array"),
            };
            let Some(docs) = state.databases.get_mut(*db) else {
                return error(StatusCode::NOT_FOUND, "no such database");
            };
            let mut name = requested.clone();
            let mut n = 1;
            while docs.contains_key(&name) {
                name = format!("{requested}-{n}");
                n += 1;
            }
            docs.insert(name.clone(), contents);
            ok(json!(name))
        }
        ("GET", [db, name]) => {
            if let Err(resp) = authorize(&state, &headers, Access::Read) {
                return resp;
            }
            match state.databases.get(*db).and_then(|docs| docs.get(*name)) {
                Some(contents) => ok(contents.clone()),
                None => error(StatusCode::NOT_FOUND, "no such document"),
            }
        }
        ("GET", [db, name, "exists"]) => {
            if let Err(resp) = authorize(&state, &headers, Access::Read) {
                return resp;
            }
            let exists = state
                .databases
                .get(*db)
                .is_some_and(|docs| docs.contains_key(*name));
            ok(json!(exists))
        }
        ("PUT", [db, name]) => {
            if let Err(resp) = authorize(&state, &headers, Access::Write) {
                return resp;
            }
            let contents: Value = match serde_json::from_slice(&body) {
                Ok(v @ (Value::Object(_) | Value::Array(_))) => v,
                _ => return error(StatusCode::BAD_REQUEST, "contents must be object or array"),
            };
            match state.databases.get_mut(*db).and_then(|docs| docs.get_mut(*name)) {
                Some(slot) => {
                    *slot = contents;
                    ok(Value::Null)
                }
                None => error(StatusCode::NOT_FOUND, "no such document"),
            }
        }
        ("DELETE", [db, name]) => {
            if let Err(resp) = authorize(&state, &headers, Access::Write) {
                return resp;
            }
            match state.databases.get_mut(*db).and_then(|docs| docs.remove(*name)) {
                Some(_) => ok(Value::Null),
                None => error(StatusCode::NOT_FOUND, "no such document"),
            }
        }
        _ => error(StatusCode::NOT_FOUND, "not found"),
    }
}
