//! Response handling module that converts handler results into responses.
//!
//! This module provides the [`Responder`] trait which defines how different types
//! can be converted into a [`Response`]. It includes implementations for common types
//! like Result, Option, String and JSON values.

use http::StatusCode;
use nano_http::protocol::Response;
use serde_json::Value;
use std::convert::Infallible;
use std::error::Error;
use tracing::error;

/// A trait for types that can be converted into responses.
///
/// Types implementing this trait can be returned directly from request handlers.
pub trait Responder {
    fn into_response(self) -> Response;
}

/// The Ok and Err variants must both implement Responder.
impl<T: Responder, E: Responder> Responder for Result<T, E> {
    fn into_response(self) -> Response {
        match self {
            Ok(t) => t.into_response(),
            Err(e) => e.into_response(),
        }
    }
}

/// None responds with an empty `200 OK`.
impl<T: Responder> Responder for Option<T> {
    fn into_response(self) -> Response {
        match self {
            Some(t) => t.into_response(),
            None => Response::default(),
        }
    }
}

impl Responder for Response {
    fn into_response(self) -> Response {
        self
    }
}

/// Sets the status code of the inner responder.
impl<T: Responder> Responder for (StatusCode, T) {
    fn into_response(self) -> Response {
        let (status, responder) = self;
        let mut response = responder.into_response();
        *response.status_mut() = status;
        response
    }
}

/// An empty `200 OK`: just the status line.
impl Responder for () {
    fn into_response(self) -> Response {
        Response::default()
    }
}

impl Responder for &'static str {
    fn into_response(self) -> Response {
        Response::ok(self)
    }
}

impl Responder for String {
    fn into_response(self) -> Response {
        Response::ok(self)
    }
}

impl Responder for Value {
    fn into_response(self) -> Response {
        Response::json(&self)
    }
}

/// A handler error: logged, then answered with `500 Internal Server Error`.
impl Responder for Box<dyn Error + Send + Sync> {
    fn into_response(self) -> Response {
        error!(cause = %self, "handler returned an error");
        Response::internal_error()
    }
}

impl Responder for Infallible {
    fn into_response(self) -> Response {
        match self {}
    }
}
