use crate::responder::Responder;
use async_trait::async_trait;
use nano_http::protocol::{Request, Response};

use std::error::Error;
use std::future::Future;

/// A handler bound to a route.
///
/// Returning `Err` makes the connection answer `500 Internal Server Error`.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn invoke(&self, req: Request) -> Result<Response, Box<dyn Error + Send + Sync>>;
}

/// an async `Fn(Request) -> impl Responder` holder
#[derive(Debug)]
pub struct FnHandler<F> {
    f: F,
}

impl<F> FnHandler<F> {
    fn new(f: F) -> Self {
        Self { f }
    }
}

pub fn handler_fn<F, Fut>(f: F) -> FnHandler<F>
where
    F: Fn(Request) -> Fut,
    Fut: Future,
    Fut::Output: Responder,
{
    FnHandler::new(f)
}

#[async_trait]
impl<F, Fut> RequestHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future + Send,
    Fut::Output: Responder,
{
    async fn invoke(&self, req: Request) -> Result<Response, Box<dyn Error + Send + Sync>> {
        let responder = (self.f)(req).await;
        Ok(responder.into_response())
    }
}

#[async_trait]
impl<H: RequestHandler + ?Sized> RequestHandler for Box<H> {
    async fn invoke(&self, req: Request) -> Result<Response, Box<dyn Error + Send + Sync>> {
        (**self).invoke(req).await
    }
}
