//! reqwest-backed transport.

use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use tracing::debug;

use super::error::TransportError;
use super::transport::{HttpResponse, Method, Transport};

/// Blocking HTTP transport over reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Build a transport with the given request timeout.
    ///
    /// `accept_invalid_certs` skips certificate validation, for backends
    /// behind self-signed certificates.
    pub fn new(timeout_secs: u64, accept_invalid_certs: bool) -> Result<Self, TransportError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .map_err(|e| TransportError::Connect(e.to_string()))?;
        Ok(Self { http })
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, method: Method, url: &Url) -> Result<HttpResponse, TransportError> {
        debug!(%method, %url, "request");
        let request = match method {
            Method::Get => self.http.get(url.clone()),
            Method::Post => self.http.post(url.clone()).body(""),
        };

        let response = request
            .send()
            .map_err(|e| TransportError::Connect(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| TransportError::Connect(e.to_string()))?;

        debug!(%method, %url, status, bytes = body.len(), "response");
        Ok(HttpResponse { status, body })
    }
}
