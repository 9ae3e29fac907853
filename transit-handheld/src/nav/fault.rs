//! User-facing failure taxonomy.

use crate::catalog::CatalogError;
use crate::domain::CollectionKind;

/// A failed navigation step, as the user sees it.
///
/// None of these is fatal; the controller always returns to an interactive
/// screen after showing one. The `Display` text is what goes on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Fault {
    #[error("WiFi disconnected")]
    NoNetwork,

    #[error("Connection failed")]
    ConnectionFailed,

    #[error("HTTP Error: {0}")]
    HttpError(u16),

    #[error("JSON parse error")]
    MalformedPayload,

    #[error("No {0} loaded")]
    EmptyCollection(CollectionKind),
}

impl Fault {
    /// The fixed on-screen message.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<CatalogError> for Fault {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Offline => Fault::NoNetwork,
            CatalogError::Connect { .. } | CatalogError::InvalidUrl { .. } => {
                Fault::ConnectionFailed
            }
            CatalogError::Status { status, .. } => Fault::HttpError(status),
            CatalogError::Json { .. } => Fault::MalformedPayload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(Fault::NoNetwork.message(), "WiFi disconnected");
        assert_eq!(Fault::ConnectionFailed.message(), "Connection failed");
        assert_eq!(Fault::HttpError(503).message(), "HTTP Error: 503");
        assert_eq!(Fault::MalformedPayload.message(), "JSON parse error");
        assert_eq!(
            Fault::EmptyCollection(CollectionKind::Stations).message(),
            "No stations loaded"
        );
    }

    #[test]
    fn catalog_errors_map() {
        assert_eq!(Fault::from(CatalogError::Offline), Fault::NoNetwork);
        assert_eq!(
            Fault::from(CatalogError::Connect {
                message: "tls".into()
            }),
            Fault::ConnectionFailed
        );
        assert_eq!(
            Fault::from(CatalogError::Status {
                status: 404,
                body: String::new()
            }),
            Fault::HttpError(404)
        );
        assert_eq!(
            Fault::from(CatalogError::Json {
                message: "eof".into(),
                body: None
            }),
            Fault::MalformedPayload
        );
    }
}
