//! The HTTP seam.

use std::fmt;

use reqwest::Url;

use super::error::TransportError;

/// HTTP methods the device uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
        })
    }
}

/// Status code and body text of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking request primitive.
///
/// Implementations run each request to completion (or to their own
/// timeout); there is no cancellation.
pub trait Transport {
    /// Perform a request with an empty body.
    fn send(&self, method: Method, url: &Url) -> Result<HttpResponse, TransportError>;

    /// Whether the network link is currently up.
    fn is_online(&self) -> bool {
        true
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, method: Method, url: &Url) -> Result<HttpResponse, TransportError> {
        (**self).send(method, url)
    }

    fn is_online(&self) -> bool {
        (**self).is_online()
    }
}
