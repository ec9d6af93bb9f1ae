use crate::router::{Router, UnknownMatcher};
use crate::static_files::StaticFiles;
use async_trait::async_trait;
use nano_http::connection::{ConnectionConfig, HttpConnection};
use nano_http::handler::Handler;
use nano_http::protocol::{Request, Response};
use std::error::Error;
use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use thiserror::Error;
use tokio::net::{TcpListener, TcpSocket};
use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Pending connections the OS queues while one connection is being served.
pub const DEFAULT_BACKLOG: u32 = 5;

#[derive(Debug)]
pub struct ServerBuilder {
    router: Option<Router>,
    static_files: Option<StaticFiles>,
    address: Option<io::Result<Vec<SocketAddr>>>,
    backlog: u32,
    connection_config: ConnectionConfig,
}

impl ServerBuilder {
    fn new() -> Self {
        Self { router: None, static_files: None, address: None, backlog: DEFAULT_BACKLOG, connection_config: ConnectionConfig::default() }
    }

    pub fn address<A: ToSocketAddrs>(mut self, address: A) -> Self {
        self.address = Some(address.to_socket_addrs().map(Iterator::collect));
        self
    }

    pub fn router(mut self, router: Router) -> Self {
        self.router = Some(router);
        self
    }

    /// Serves files when no route matches.
    pub fn static_files(mut self, static_files: StaticFiles) -> Self {
        self.static_files = Some(static_files);
        self
    }

    pub fn backlog(mut self, backlog: u32) -> Self {
        self.backlog = backlog;
        self
    }

    pub fn connection_config(mut self, connection_config: ConnectionConfig) -> Self {
        self.connection_config = connection_config;
        self
    }

    pub fn build(self) -> Result<Server, ServerError> {
        let address = match self.address {
            None => return Err(ServerError::MissingAddress),
            Some(Err(source)) => return Err(ServerError::InvalidAddress { source }),
            Some(Ok(address)) if address.is_empty() => {
                return Err(ServerError::InvalidAddress { source: io::Error::new(io::ErrorKind::InvalidInput, "no socket address resolved") });
            }
            Some(Ok(address)) => address,
        };

        Ok(Server {
            router: self.router.unwrap_or_default(),
            static_files: self.static_files,
            address,
            backlog: self.backlog,
            connection_config: self.connection_config,
        })
    }
}

/// Routes, static files and connection settings, fixed once built.
///
/// Connections are served one at a time: a connection is read, dispatched,
/// answered and closed before the next one is accepted. Connections arriving
/// meanwhile wait in the listen backlog.
#[derive(Debug)]
pub struct Server {
    router: Router,
    static_files: Option<StaticFiles>,
    address: Vec<SocketAddr>,
    backlog: u32,
    connection_config: ConnectionConfig,
}

/// A server with its listening socket open.
#[derive(Debug)]
pub struct BoundServer {
    server: Server,
    listener: TcpListener,
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("address must be set")]
    MissingAddress,

    #[error("invalid address: {source}")]
    InvalidAddress { source: io::Error },

    #[error("bind server error at {address:?}: {source}")]
    Bind { address: Vec<SocketAddr>, source: io::Error },

    #[error(transparent)]
    UnknownMatcher(#[from] UnknownMatcher),
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Opens the listening socket with `SO_REUSEADDR` and the configured backlog.
    ///
    /// Addresses are tried in order; the first one that binds is used.
    pub async fn bind(self) -> Result<BoundServer, ServerError> {
        let addresses = self.address.clone();
        let mut last_error = None;
        for address in &addresses {
            match listen(*address, self.backlog) {
                Ok(listener) => return Ok(BoundServer { server: self, listener }),
                Err(e) => {
                    warn!(%address, cause = %e, "can't bind address");
                    last_error = Some(e);
                }
            }
        }

        let source = last_error.unwrap_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "no address to bind"));
        Err(ServerError::Bind { address: addresses, source })
    }

    /// Binds and serves until the process stops.
    pub async fn start(self) -> Result<(), ServerError> {
        self.bind().await?.serve().await;
        Ok(())
    }

    /// Installs an INFO level fmt subscriber, unless one is already set, then starts.
    pub async fn start_with_default_logging(self) -> Result<(), ServerError> {
        let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
        if tracing::subscriber::set_global_default(subscriber).is_err() {
            debug!("global subscriber already installed");
        }
        self.start().await
    }
}

fn listen(address: SocketAddr, backlog: u32) -> io::Result<TcpListener> {
    let socket = if address.is_ipv4() { TcpSocket::new_v4()? } else { TcpSocket::new_v6()? };
    socket.set_reuseaddr(true)?;
    socket.bind(address)?;
    socket.listen(backlog)
}

impl BoundServer {
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs the accept loop, one connection at a time.
    pub async fn serve(self) {
        info!("start listening at {:?}", self.listener.local_addr());
        loop {
            let (tcp_stream, remote_addr) = match self.listener.accept().await {
                Ok(stream_and_addr) => stream_and_addr,
                Err(e) => {
                    warn!(cause = %e, "failed to accept");
                    continue;
                }
            };

            let (reader, writer) = tcp_stream.into_split();
            let connection = HttpConnection::with_config(reader, writer, self.server.connection_config);
            match connection.process(&self.server).await {
                Ok(()) => {
                    info!(%remote_addr, "finished process, connection shutdown");
                }
                Err(e) => {
                    error!(%remote_addr, "service has error, cause {}, connection shutdown", e);
                }
            }
        }
    }
}

#[async_trait]
impl Handler for Server {
    type Error = Box<dyn Error + Send + Sync>;

    async fn call(&self, req: Request) -> Result<Response, Self::Error> {
        if let Some(route) = self.router.at(req.path()) {
            debug!(path = req.path(), route = route.path(), matcher = %route.matcher(), "dispatch to route");
            return route.handler().invoke(req).await;
        }

        if let Some(static_files) = &self.static_files {
            if let Some(response) = static_files.serve(req.path()).await {
                return Ok(response);
            }
        }

        info!(path = req.path(), "no route or file found");
        Ok(Response::not_found())
    }
}
