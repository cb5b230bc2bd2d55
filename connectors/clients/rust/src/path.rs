// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Request-path construction for database and document addressing.
//!
//! Database paths and document names are arbitrary user strings. They may
//! contain `/`, `%`, spaces or any Unicode text, yet each must reach the
//! service as one opaque path segment.
//!
//! The service decodes the request target twice: once while splitting it into
//! nominal segments and once more when it interprets a segment as a database
//! path or document name. Each segment is therefore percent-encoded twice. The
//! first pass escapes every reserved character, `/` included. The second pass
//! escapes the `%` signs produced by the first, so after the service's first
//! decode no bare `/` can appear and split the segment.
//!
//! The returned strings only contain unreserved ASCII and `%XX` escapes, which
//! [`url::Url::join`] keeps verbatim, so they are never encoded a third time.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left as-is: ASCII alphanumerics and `-`, `_`, `~`.
///
/// `.` is escaped as well so that names such as `..` can never turn into dot
/// segments that URL normalisation would collapse.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'~');

/// Double percent-encode `segment` so it survives two decoding passes as a
/// single path segment.
pub fn encode_segment(segment: &str) -> String {
    let once = utf8_percent_encode(segment, SEGMENT).to_string();
    utf8_percent_encode(&once, SEGMENT).to_string()
}

/// `api/dbs/{path}`: the databases collection under `path`.
pub fn databases_path(path: &str) -> String {
    format!("api/dbs/{}", encode_segment(path))
}

/// `api/{path}`: a single database.
pub fn database_path(path: &str) -> String {
    format!("api/{}", encode_segment(path))
}

/// `api/{database}/{name}`: a single document.
pub fn document_path(database: &str, name: &str) -> String {
    format!("api/{}/{}", encode_segment(database), encode_segment(name))
}

/// `api/{database}/{name}/exists`: the existence probe for a document.
pub fn document_exists_path(database: &str, name: &str) -> String {
    format!("{}/exists", document_path(database, name))
}
