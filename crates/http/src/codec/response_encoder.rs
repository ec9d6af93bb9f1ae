//! HTTP response encoder
//!
//! Serializes a [`Response`] as:
//!
//! ```text
//! HTTP/1.1 <status>\r\n
//! [X-Content-Type-Options: nosniff\r\n]
//! [Content-Type: <type>\r\n\r\n<content>\n]
//! ```
//!
//! The content block, including its blank line, is written only when the
//! content is non-empty. No `Content-Length` is ever written; the connection
//! close delimits the body.

use std::io;
use std::io::Write;

use bytes::{BufMut, BytesMut};
use http::Version;
use tokio_util::codec::Encoder;
use tracing::error;

use crate::protocol::{Response, SendError};

/// Initial buffer size allocated for the status line and headers
const INIT_HEADER_SIZE: usize = 256;

#[derive(Debug, Default)]
pub struct ResponseEncoder;

impl ResponseEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Encoder<&Response> for ResponseEncoder {
    type Error = SendError;

    fn encode(&mut self, response: &Response, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let version = match response.version() {
            Version::HTTP_10 => "HTTP/1.0",
            Version::HTTP_11 => "HTTP/1.1",
            v => {
                error!(http_version = ?v, "unsupported http version");
                return Err(SendError::UnsupportedVersion { version: v });
            }
        };

        dst.reserve(INIT_HEADER_SIZE + response.content().len());

        let status = response.status();
        match status.canonical_reason() {
            Some(reason) => write!(FastWrite(dst), "{version} {} {reason}\r\n", status.as_str())?,
            None => write!(FastWrite(dst), "{version} {}\r\n", status.as_str())?,
        }

        if response.nosniff() {
            dst.put_slice(b"X-Content-Type-Options: nosniff\r\n");
        }

        if !response.content().is_empty() {
            dst.put_slice(b"Content-Type: ");
            dst.put_slice(response.content_type().as_bytes());
            dst.put_slice(b"\r\n\r\n");
            dst.put_slice(response.content());
            dst.put_u8(b'\n');
        }

        Ok(())
    }
}

impl Encoder<Response> for ResponseEncoder {
    type Error = SendError;

    fn encode(&mut self, response: Response, dst: &mut BytesMut) -> Result<(), Self::Error> {
        <Self as Encoder<&Response>>::encode(self, &response, dst)
    }
}

/// Fast writer implementation for writing to BytesMut.
///
/// Space has already been reserved, so writes only copy.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
