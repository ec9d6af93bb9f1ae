//! Core HTTP protocol types.
//!
//! - [`Request`]: the parsed request line, headers and decoded body
//! - [`body::Body`]: the decoded payload, one of empty, form fields, JSON or multipart form
//! - [`Response`]: status, content type, security header and content to be encoded
//! - Errors: [`HttpError`], [`ParseError`], [`DecodeError`], [`SendError`]

mod request;
pub use request::Request;

mod response;
pub use response::Response;

mod error;
pub use error::DecodeError;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;

pub mod body;
