//! The parsed HTTP request.
//!
//! A [`Request`] is produced once per connection by the
//! [`RequestDecoder`](crate::codec::RequestDecoder) and is not modified after the
//! body has been attached.

use std::collections::HashMap;

use http::Method;

use crate::protocol::body::Body;

/// A parsed HTTP request.
///
/// - `path` is the wire path as sent, with the query string removed.
///   Trailing-slash normalization happens at routing time.
/// - header names are lower-cased; a later duplicate header overwrites an earlier one.
/// - query string fields are merged into `body` rather than exposed separately.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    version: String,
    headers: HashMap<String, String>,
    body: Body,
    has_payload: bool,
}

impl Request {
    pub(crate) fn new(method: Method, path: String, version: String) -> Self {
        Self { method, path, version, headers: HashMap::new(), body: Body::Empty, has_payload: false }
    }

    /// Returns a reference to the request's HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request path without the query string.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the version token exactly as sent, e.g. `HTTP/1.1`.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Returns the raw `Content-Type` header value, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type").map(String::as_str)
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn into_body(self) -> Body {
        self.body
    }

    /// Whether payload bytes followed the header block.
    ///
    /// Query string fields do not count as a payload.
    pub fn has_payload(&self) -> bool {
        self.has_payload
    }

    pub(crate) fn insert_header(&mut self, name: String, value: String) {
        self.headers.insert(name, value);
    }

    /// Merges `body` into the current body; keys of `body` win.
    pub(crate) fn merge_body(&mut self, body: Body) {
        let current = std::mem::take(&mut self.body);
        self.body = current.merge(body);
    }

    /// Attaches a payload body read after the first chunk.
    pub(crate) fn attach_payload(&mut self, body: Body) {
        self.has_payload = true;
        self.merge_body(body);
    }
}
