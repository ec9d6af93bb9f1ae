//! HTTP codec module for decoding requests and encoding responses
//!
//! # Components
//!
//! - [`RequestDecoder`]: parses one buffered chunk into a [`Request`](crate::protocol::Request)
//!   with a status line / headers / body state machine
//! - [`body`]: payload decoding by content type (urlencoded, JSON, multipart, query string)
//! - [`ResponseEncoder`]: serializes a [`Response`](crate::protocol::Response) into wire bytes
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use nano_http::codec::{RequestDecoder, ResponseEncoder};
//! use nano_http::protocol::Response;
//! use tokio_util::codec::{Decoder, Encoder};
//!
//! let mut buffer = BytesMut::from(&b"GET /hello HTTP/1.1\r\nHost: h\r\n\r\n"[..]);
//! let request = RequestDecoder::new().decode(&mut buffer).unwrap().unwrap();
//! assert_eq!(request.path(), "/hello");
//!
//! let mut out = BytesMut::new();
//! ResponseEncoder::new().encode(Response::ok("hi"), &mut out).unwrap();
//! assert_eq!(&out[..], b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\nhi\n");
//! ```

pub mod body;
mod request_decoder;
mod response_encoder;

pub use request_decoder::RequestDecoder;
pub use response_encoder::ResponseEncoder;
