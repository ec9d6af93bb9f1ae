//! Request payload decoding.
//!
//! # Components
//!
//! - [`percent_decode`]: `%XX` and `+` unescaping for url-encoded text
//! - [`ContentTypeSpec`]: a `Content-Type` value split into media type and parameters
//! - [`BodyDecoder`]: selects a strategy by media type and produces a [`Body`](crate::protocol::body::Body)
//!
//! Supported media types are `application/x-www-form-urlencoded`,
//! `application/json` and `multipart/form-data`. Query strings are decoded with
//! the urlencoded rules under the internal media type [`QUERY_MEDIA_TYPE`].

mod content_type;
mod multipart;
mod payload_decoder;
mod percent;
mod urlencoded;

pub use content_type::{ContentTypeSpec, MediaKind, QUERY_MEDIA_TYPE};
pub use payload_decoder::{BodyDecoder, decode_body, decode_query};
pub use percent::percent_decode;
