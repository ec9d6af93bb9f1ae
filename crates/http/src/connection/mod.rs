//! HTTP connection handling module
//!
//! # Components
//!
//! - [`HttpConnection`]: processes one accepted connection: read, parse, an
//!   optional bounded wait for a POST body, handler call, write, close
//! - [`ConnectionConfig`]: read buffer size and body wait timeout
//!
//! Connections are never kept alive: every connection carries exactly one
//! request and one response.

mod http_connection;
mod message_writer;

pub use http_connection::ConnectionConfig;
pub use http_connection::DEFAULT_BODY_READ_TIMEOUT;
pub use http_connection::DEFAULT_READ_BUFFER_SIZE;
pub use http_connection::HttpConnection;
