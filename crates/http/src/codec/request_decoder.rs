//! HTTP request decoder module
//!
//! Parses one buffered chunk of a request into a [`Request`] with a three-state
//! machine over the buffer's `\r\n`-separated lines. The status state always
//! consumes exactly the first line, so it is handled before the loop:
//!
//! 1. `Status`: the request line, exactly `METHOD PATH VERSION`. A query string
//!    in the path is decoded into form fields and removed from the path.
//! 2. `Headers`: `Name: Value` lines until a blank line. Names are lower-cased,
//!    names and values are left-trimmed, and a later duplicate wins.
//! 3. `Body`: entered after the blank line. Another blank line ends parsing;
//!    otherwise the bytes from each line to the end of the buffer are decoded
//!    according to `Content-Type` and merged into the body, line by line.
//!
//! # Example
//!
//! ```
//! use nano_http::codec::RequestDecoder;
//!
//! let request = RequestDecoder::parse(b"GET /status?ok=1 HTTP/1.1\r\nHost: h\r\n\r\n").unwrap();
//! assert_eq!(request.path(), "/status");
//! assert_eq!(request.body().get("ok"), Some("1"));
//! ```

use bytes::BytesMut;
use http::Method;
use memchr::memmem;
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::codec::body::{BodyDecoder, decode_query};
use crate::ensure;
use crate::protocol::{ParseError, Request};

const CRLF: &[u8] = b"\r\n";

/// Parser states after the status line, in the order they are visited.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    Headers,
    Body,
}

/// A decoder that turns one buffered chunk into a [`Request`].
///
/// Unlike a streaming decoder it never waits for more data: whatever the
/// buffer holds is the request. A body that did not fit in the chunk is
/// read separately by the connection.
#[derive(Debug, Default)]
pub struct RequestDecoder;

impl RequestDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Parses `buffer` into a request.
    ///
    /// # Errors
    ///
    /// - [`ParseError::InvalidStatusLine`] if the first line is not exactly three
    ///   space-separated tokens
    /// - [`ParseError::InvalidMethod`] if the method is not a valid token
    /// - [`ParseError::InvalidHeader`] if a header line has no `:`
    /// - [`ParseError::MissingContentType`] if body bytes follow the headers but no
    ///   `Content-Type` header was sent
    pub fn parse(buffer: &[u8]) -> Result<Request, ParseError> {
        let (status_line, mut rest) = split_line(buffer);
        let mut request = parse_status_line(status_line)?;
        let mut state = State::Headers;

        while let Some(remaining) = rest {
            let (line, next) = split_line(remaining);

            match state {
                State::Headers => {
                    if line.is_empty() {
                        state = State::Body;
                    } else {
                        let (name, value) = parse_header_line(line)?;
                        request.insert_header(name, value);
                    }
                }

                State::Body => {
                    if line.is_empty() {
                        break;
                    }
                    // every line decodes from itself to the end; later decodes are merged over earlier ones
                    let content_type = request.content_type().ok_or(ParseError::MissingContentType)?;
                    let body = BodyDecoder::new(content_type).decode(remaining);
                    trace!(payload_len = remaining.len(), "decoded request payload");
                    request.attach_payload(body);
                }
            }

            rest = next;
        }

        Ok(request)
    }
}

impl Decoder for RequestDecoder {
    type Item = Request;
    type Error = ParseError;

    /// Parses everything buffered in `src` as one request.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(request))`: the buffer held a request, and has been drained
    /// - `Ok(None)`: the buffer was empty
    /// - `Err(_)`: the buffer did not hold a well-formed request
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.is_empty() {
            return Ok(None);
        }

        let bytes = src.split();
        Self::parse(&bytes).map(Some)
    }
}

/// Splits off the first line; the remainder is `None` when no `\r\n` was found.
fn split_line(buffer: &[u8]) -> (&[u8], Option<&[u8]>) {
    match memmem::find(buffer, CRLF) {
        Some(position) => (&buffer[..position], Some(&buffer[position + CRLF.len()..])),
        None => (buffer, None),
    }
}

fn parse_status_line(line: &[u8]) -> Result<Request, ParseError> {
    let line = std::str::from_utf8(line).map_err(|_| ParseError::invalid_status_line(String::from_utf8_lossy(line)))?;

    let tokens: Vec<&str> = line.split(' ').collect();
    let [method, target, version] = tokens[..] else {
        return Err(ParseError::invalid_status_line(line));
    };
    ensure!(!method.is_empty() && !target.is_empty() && !version.is_empty(), ParseError::invalid_status_line(line));

    let method = Method::from_bytes(method.as_bytes()).map_err(|_| ParseError::invalid_method(method))?;

    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target, None),
    };

    let mut request = Request::new(method, path.to_owned(), version.to_owned());
    if let Some(query) = query {
        request.merge_body(decode_query(query));
    }

    Ok(request)
}

fn parse_header_line(line: &[u8]) -> Result<(String, String), ParseError> {
    let line = String::from_utf8_lossy(line);
    let (name, value) = line.split_once(':').ok_or_else(|| ParseError::invalid_header(format!("no ':' in {line:?}")))?;
    Ok((name.to_lowercase().trim_start().to_owned(), value.trim_start().to_owned()))
}
