//! Catalog client error types.

/// Failures below HTTP: no link, or no usable connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The device has no network link.
    #[error("network unavailable")]
    Offline,

    /// The connection could not be established or broke mid-request.
    #[error("connection failed: {0}")]
    Connect(String),
}

/// Errors from a catalog request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// The device has no network link.
    #[error("network unavailable")]
    Offline,

    /// Connection setup or transfer failed.
    #[error("connection failed: {message}")]
    Connect { message: String },

    /// The backend answered with a non-success status.
    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON.
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// The configured base URL cannot be combined into a request URL.
    #[error("invalid URL {url:?}: {message}")]
    InvalidUrl { url: String, message: String },
}

impl From<TransportError> for CatalogError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Offline => CatalogError::Offline,
            TransportError::Connect(message) => CatalogError::Connect { message },
        }
    }
}
