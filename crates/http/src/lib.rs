//! A minimal HTTP/1.1 server core
//!
//! This crate turns the raw bytes of one TCP connection into a structured
//! request, hands it to a handler, and writes the handler's response back.
//! Each connection carries exactly one request and is closed after the
//! response.
//!
//! # Features
//!
//! - Request line / header / body state machine parser
//! - Body decoding for `application/x-www-form-urlencoded`, `application/json`
//!   and `multipart/form-data`, with query strings merged into the body
//! - Graceful degradation: malformed or unknown payloads are logged and
//!   decoded as an empty body instead of failing the request
//! - A response encoder that writes the status line, an optional
//!   `X-Content-Type-Options: nosniff` header and an optional typed content block
//!
//! # Example
//!
//! ```no_run
//! use std::convert::Infallible;
//! use nano_http::connection::HttpConnection;
//! use nano_http::handler::make_handler;
//! use nano_http::protocol::{Request, Response};
//! use tokio::net::TcpListener;
//! use tracing::{error, info, warn, Level};
//! use tracing_subscriber::FmtSubscriber;
//!
//! #[tokio::main]
//! async fn main() {
//!     let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
//!     tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
//!
//!     info!(port = 8080, "start listening");
//!     let tcp_listener = match TcpListener::bind("127.0.0.1:8080").await {
//!         Ok(tcp_listener) => tcp_listener,
//!         Err(e) => {
//!             error!(cause = %e, "bind server error");
//!             return;
//!         }
//!     };
//!
//!     let handler = make_handler(hello_world);
//!
//!     loop {
//!         let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
//!             Ok(stream_and_addr) => stream_and_addr,
//!             Err(e) => {
//!                 warn!(cause = %e, "failed to accept");
//!                 continue;
//!             }
//!         };
//!
//!         // one connection at a time: the next accept waits for this one to finish
//!         let (reader, writer) = tcp_stream.into_split();
//!         if let Err(e) = HttpConnection::new(reader, writer).process(&handler).await {
//!             error!("service has error, cause {}, connection shutdown", e);
//!         }
//!     }
//! }
//!
//! async fn hello_world(request: Request) -> Result<Response, Infallible> {
//!     info!(path = request.path(), "request path");
//!     Ok(Response::ok("Hello World!"))
//! }
//! ```
//!
//! # Architecture
//!
//! - [`protocol`]: request, response, body and error types
//! - [`codec`]: the request parser, the body decoders and the response encoder
//! - [`handler`]: the handler trait and a helper to build handlers from async functions
//! - [`connection`]: the per-connection read / dispatch / write cycle
//!
//! # Limitations
//!
//! - No persistent connections, pipelining, chunked transfer encoding, TLS or HTTP/2
//! - Each phase of a request is a single read of a fixed size (1 KiB by default);
//!   bytes beyond that are not read
//! - Responses carry no `Content-Length`; the connection close ends the body

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
