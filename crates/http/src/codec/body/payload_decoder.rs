//! Decoder for request payloads.
//!
//! The `Content-Type` header selects one of the decoding strategies:
//! - query strings and `application/x-www-form-urlencoded`: form fields
//! - `application/json`: a JSON document
//! - `multipart/form-data`: a multipart form, which requires a `boundary` parameter
//!
//! Decoding failures never fail the request. [`BodyDecoder::decode`] logs them
//! and returns [`Body::Empty`]; [`BodyDecoder::try_decode`] returns them to the
//! caller.

use tracing::{debug, warn};

use crate::codec::body::content_type::{ContentTypeSpec, MediaKind, QUERY_MEDIA_TYPE};
use crate::codec::body::multipart::decode_multipart;
use crate::codec::body::urlencoded::decode_form;
use crate::protocol::DecodeError;
use crate::protocol::body::Body;

/// A payload decoder bound to one parsed `Content-Type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyDecoder {
    content_type: ContentTypeSpec,
}

impl BodyDecoder {
    /// Creates a decoder from a raw `Content-Type` header value.
    pub fn new(content_type: &str) -> Self {
        Self { content_type: ContentTypeSpec::parse(content_type) }
    }

    /// Creates a decoder for a url query string.
    pub fn query() -> Self {
        Self::new(QUERY_MEDIA_TYPE)
    }

    pub fn content_type(&self) -> &ContentTypeSpec {
        &self.content_type
    }

    /// Decodes `payload`, logging any failure and falling back to [`Body::Empty`].
    pub fn decode(&self, payload: &[u8]) -> Body {
        match self.try_decode(payload) {
            Ok(body) => body,
            Err(e @ DecodeError::UnknownContentType { .. }) => {
                debug!(cause = %e, payload_len = payload.len(), "payload not decoded");
                Body::Empty
            }
            Err(e) => {
                warn!(cause = %e, media_type = self.content_type.media_type(), "failed to decode payload");
                Body::Empty
            }
        }
    }

    /// Decodes `payload`, returning the failure to the caller.
    pub fn try_decode(&self, payload: &[u8]) -> Result<Body, DecodeError> {
        let Some(kind) = self.content_type.kind() else {
            return Err(DecodeError::unknown_content_type(self.content_type.media_type()));
        };

        let body = match kind {
            MediaKind::Query | MediaKind::UrlEncoded => {
                let text = std::str::from_utf8(payload).map_err(|_| DecodeError::InvalidUtf8)?;
                Body::FormFields(decode_form(text))
            }

            MediaKind::Json => {
                if payload.trim_ascii().is_empty() {
                    return Ok(Body::Empty);
                }
                Body::Json(serde_json::from_slice(payload)?)
            }

            MediaKind::Multipart => {
                let boundary = self.content_type.parameter("boundary").ok_or(DecodeError::MissingBoundary)?;
                Body::MultipartForm(decode_multipart(payload, boundary))
            }
        };

        Ok(if body.is_empty() { Body::Empty } else { body })
    }
}

/// Decodes a request payload according to its raw `Content-Type` value.
pub fn decode_body(payload: &[u8], content_type: &str) -> Body {
    BodyDecoder::new(content_type).decode(payload)
}

/// Decodes a url query string (without the leading `?`) into form fields.
pub fn decode_query(query: &str) -> Body {
    BodyDecoder::query().decode(query.as_bytes())
}
