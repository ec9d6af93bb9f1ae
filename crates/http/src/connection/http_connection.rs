use std::error::Error;
use std::time::Duration;

use bytes::BytesMut;
use http::Method;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tokio::time::timeout;
use tokio_util::codec::Decoder;
use tracing::{debug, error, info};

use crate::codec::RequestDecoder;
use crate::codec::body::BodyDecoder;
use crate::connection::message_writer::MessageWriter;
use crate::handler::Handler;
use crate::protocol::{HttpError, ParseError, Request, Response};

/// Size of the single read used for each phase of a request.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 1024;

/// How long to wait for a POST body that was not in the first chunk.
pub const DEFAULT_BODY_READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Tunables for a single connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionConfig {
    read_buffer_size: usize,
    body_read_timeout: Duration,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self { read_buffer_size: DEFAULT_READ_BUFFER_SIZE, body_read_timeout: DEFAULT_BODY_READ_TIMEOUT }
    }
}

impl ConnectionConfig {
    pub fn with_read_buffer_size(mut self, read_buffer_size: usize) -> Self {
        self.read_buffer_size = read_buffer_size;
        self
    }

    pub fn with_body_read_timeout(mut self, body_read_timeout: Duration) -> Self {
        self.body_read_timeout = body_read_timeout;
        self
    }

    pub fn read_buffer_size(&self) -> usize {
        self.read_buffer_size
    }

    pub fn body_read_timeout(&self) -> Duration {
        self.body_read_timeout
    }
}

/// One accepted connection, carrying exactly one request and one response.
///
/// `process` reads one fixed-size chunk and parses it. A malformed request is
/// answered with `400 Bad Request`. A POST whose first chunk carried no body
/// gets one more read, bounded by [`ConnectionConfig::body_read_timeout`]; if
/// nothing arrives in time the body stays empty. The handler's response is
/// written and the connection is shut down. There is no keep-alive.
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
/// * `W`: The async writable stream type
#[derive(Debug)]
pub struct HttpConnection<R, W> {
    reader: R,
    writer: MessageWriter<W>,
    decoder: RequestDecoder,
    config: ConnectionConfig,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self::with_config(reader, writer, ConnectionConfig::default())
    }

    pub fn with_config(reader: R, writer: W, config: ConnectionConfig) -> Self {
        Self { reader, writer: MessageWriter::with_capacity(writer, config.read_buffer_size), decoder: RequestDecoder::new(), config }
    }

    pub async fn process<H>(mut self, handler: &H) -> Result<(), HttpError>
    where
        H: Handler + ?Sized,
    {
        let request = match self.read_request().await {
            Ok(request) => request,
            Err(e) => {
                error!(cause = %e, "can't receive request");
                if e.is_malformed() {
                    self.send_response(&Response::bad_request()).await?;
                }
                return Err(e.into());
            }
        };

        info!(method = %request.method(), path = request.path(), "received request");

        let response = match handler.call(request).await {
            Ok(response) => response,
            Err(e) => {
                let e: Box<dyn Error + Send + Sync> = e.into();
                error!(cause = %e, "handle request error");
                Response::internal_error()
            }
        };

        self.send_response(&response).await
    }

    async fn read_request(&mut self) -> Result<Request, ParseError> {
        let mut buffer = self.read_chunk().await?;

        let Some(mut request) = self.decoder.decode(&mut buffer)? else {
            return Err(ParseError::invalid_status_line(""));
        };

        if request.method() == Method::POST && !request.has_payload() {
            self.read_payload(&mut request).await?;
        }

        Ok(request)
    }

    /// Waits once for the body of a POST; a timeout leaves the body empty.
    async fn read_payload(&mut self, request: &mut Request) -> Result<(), ParseError> {
        let chunk = match timeout(self.config.body_read_timeout, self.read_chunk()).await {
            Ok(chunk) => chunk?,
            Err(_) => {
                debug!(timeout = ?self.config.body_read_timeout, "no request body arrived");
                return Ok(());
            }
        };

        if chunk.is_empty() {
            return Ok(());
        }

        let content_type = request.content_type().ok_or(ParseError::MissingContentType)?;
        let body = BodyDecoder::new(content_type).decode(&chunk);
        request.attach_payload(body);
        Ok(())
    }

    async fn read_chunk(&mut self) -> Result<BytesMut, ParseError> {
        let mut buffer = BytesMut::zeroed(self.config.read_buffer_size);
        let n = self.reader.read(&mut buffer).await.map_err(ParseError::io)?;
        buffer.truncate(n);
        Ok(buffer)
    }

    async fn send_response(&mut self, response: &Response) -> Result<(), HttpError> {
        self.writer.write(response)?;
        self.writer.close().await?;
        Ok(())
    }
}
