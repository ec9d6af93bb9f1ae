//! A small web server on top of `nano-http`.
//!
//! Requests are dispatched to the first [`Route`](router::Route) whose
//! [`Matcher`] accepts the path; unmatched paths fall back to [`StaticFiles`]
//! when configured, and to `404 Not Found` otherwise.
//!
//! ```no_run
//! use nano_web::{Matcher, Router, Server, handler_fn};
//! use nano_web::{Request, Response};
//!
//! async fn hello(req: Request) -> String {
//!     format!("hello {}", req.body().get("name").unwrap_or("world"))
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let router = Router::builder()
//!         .route("/hello", handler_fn(hello))
//!         .route_with("/api", Matcher::StartsWith, handler_fn(|_req: Request| async { Response::ok("api") }))
//!         .build();
//!
//!     let server = Server::builder().address("127.0.0.1:8080").router(router).build().unwrap();
//!     server.start_with_default_logging().await.unwrap();
//! }
//! ```

mod handler;
mod responder;
mod server;

pub mod router;
pub mod static_files;

pub use handler::FnHandler;
pub use handler::RequestHandler;
pub use handler::handler_fn;
pub use responder::Responder;
pub use router::Matcher;
pub use router::Router;
pub use server::BoundServer;
pub use server::DEFAULT_BACKLOG;
pub use server::Server;
pub use server::ServerBuilder;
pub use server::ServerError;
pub use static_files::StaticFiles;

pub use nano_http::protocol::body::Body;
pub use nano_http::protocol::{Request, Response};
