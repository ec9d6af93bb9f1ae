//! HTTP response representation.
//!
//! A [`Response`] holds a status, an optional content type, the optional
//! `X-Content-Type-Options: nosniff` flag and the content. It is serialized by
//! the [`ResponseEncoder`](crate::codec::ResponseEncoder).
//!
//! Responses never carry `Content-Length`: the connection is closed after the
//! response, and that close delimits the body.

use std::borrow::Cow;

use bytes::{Bytes, BytesMut};
use http::{StatusCode, Version};
use serde_json::Value;
use tokio_util::codec::Encoder;

use crate::codec::ResponseEncoder;
use crate::protocol::SendError;

/// Content type written when content is present but no type was set.
const DEFAULT_CONTENT_TYPE: &str = "text/plain";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    version: Version,
    status: StatusCode,
    content_type: Option<Cow<'static, str>>,
    nosniff: bool,
    content: Bytes,
}

impl Default for Response {
    fn default() -> Self {
        Self::new(StatusCode::OK)
    }
}

impl Response {
    pub fn new(status: StatusCode) -> Self {
        Self { version: Version::HTTP_11, status, content_type: None, nosniff: false, content: Bytes::new() }
    }

    /// `200 OK` with `text/plain` content.
    pub fn ok(content: impl Into<Bytes>) -> Self {
        Self::new(StatusCode::OK).with_content(content)
    }

    /// `200 OK` with the serialized JSON value as `application/json` content.
    pub fn json(value: &Value) -> Self {
        Self::new(StatusCode::OK).with_content(value.to_string()).with_content_type(mime::APPLICATION_JSON.essence_str().to_owned())
    }

    pub fn bad_request() -> Self {
        Self::new(StatusCode::BAD_REQUEST)
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND).with_content("404 not found")
    }

    pub fn internal_error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    pub fn with_content(mut self, content: impl Into<Bytes>) -> Self {
        self.content = content.into();
        self
    }

    /// An empty `content_type` leaves the default `text/plain` in place.
    pub fn with_content_type(mut self, content_type: impl Into<Cow<'static, str>>) -> Self {
        let content_type = content_type.into();
        self.content_type = (!content_type.is_empty()).then_some(content_type);
        self
    }

    /// Adds the `X-Content-Type-Options: nosniff` header.
    pub fn with_nosniff(mut self) -> Self {
        self.nosniff = true;
        self
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn status_mut(&mut self) -> &mut StatusCode {
        &mut self.status
    }

    /// The content type that will be written: the explicit one, or `text/plain`.
    pub fn content_type(&self) -> &str {
        self.content_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE)
    }

    pub fn nosniff(&self) -> bool {
        self.nosniff
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Serializes the response into wire bytes.
    pub fn to_bytes(&self) -> Result<Bytes, SendError> {
        let mut dst = BytesMut::new();
        ResponseEncoder::new().encode(self, &mut dst)?;
        Ok(dst.freeze())
    }
}
