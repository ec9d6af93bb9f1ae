use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request error: {source}")]
    RequestError {
        #[from]
        source: ParseError,
    },

    #[error("response error: {source}")]
    ResponseError {
        #[from]
        source: SendError,
    },
}

/// Failures while turning raw bytes into a [`Request`](crate::protocol::Request).
///
/// Every variant except [`ParseError::Io`] means the request is malformed and
/// is answered with `400 Bad Request`.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid status line: {line:?}")]
    InvalidStatusLine { line: String },

    #[error("invalid http method: {method:?}")]
    InvalidMethod { method: String },

    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },

    #[error("request has a body but no content-type header")]
    MissingContentType,

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn invalid_status_line<S: ToString>(line: S) -> Self {
        Self::InvalidStatusLine { line: line.to_string() }
    }

    pub fn invalid_method<S: ToString>(method: S) -> Self {
        Self::InvalidMethod { method: method.to_string() }
    }

    pub fn invalid_header<S: ToString>(str: S) -> Self {
        Self::InvalidHeader { reason: str.to_string() }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }

    /// Whether this error describes a malformed request, as opposed to a transport failure.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, Self::Io { .. })
    }
}

/// Failures while decoding a request payload into a [`Body`](crate::protocol::body::Body).
///
/// These never fail a request: callers log them and fall back to an empty body.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("multipart content-type has no boundary parameter")]
    MissingBoundary,

    #[error("invalid json payload: {source}")]
    InvalidJson {
        #[from]
        source: serde_json::Error,
    },

    #[error("unknown content type: {media_type:?}")]
    UnknownContentType { media_type: String },

    #[error("payload is not valid utf-8")]
    InvalidUtf8,
}

impl DecodeError {
    pub fn unknown_content_type<S: ToString>(media_type: S) -> Self {
        Self::UnknownContentType { media_type: media_type.to_string() }
    }
}

#[derive(Error, Debug)]
pub enum SendError {
    #[error("unsupported http version: {version:?}")]
    UnsupportedVersion { version: http::Version },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl SendError {
    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}
