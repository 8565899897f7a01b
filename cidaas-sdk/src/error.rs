//! Client error types

use cidaas_core::{ErrorKind, ProviderError};
use thiserror::Error;

use crate::models::ServiceError;

/// Errors produced while talking to the administrative API
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a status the verb does not accept
    #[error("unexpected HTTP status {status}")]
    Transport { status: u16, body: String },

    /// The request could not complete
    #[error("request failed: {0}")]
    Connectivity(#[from] reqwest::Error),

    /// The body was not valid JSON for the expected shape
    #[error("failed to decode response: {message}")]
    Decoding { message: String, body: String },

    /// The envelope reported `success = false`
    #[error("service error: {0}")]
    Service(ServiceError),

    /// The token endpoint answered without a usable access token
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Client construction failed
    #[error("invalid client configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    pub fn decoding(err: &serde_json::Error, body: &str) -> Self {
        ClientError::Decoding {
            message: err.to_string(),
            body: body.to_string(),
        }
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Transport { status, .. } => Some(*status),
            ClientError::Service(e) if e.status > 0 => u16::try_from(e.status).ok(),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl From<ClientError> for ProviderError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Transport { status, body } => ProviderError::transport(status, body),
            ClientError::Connectivity(err) => {
                ProviderError::connectivity("request could not complete").with_cause(err)
            }
            ClientError::Decoding { message, body } => {
                ProviderError::decoding(format!("failed to decode response: {}", message))
                    .with_detail(body)
            }
            ClientError::Service(err) => {
                ProviderError::service(format!("service returned an error ({})", err.error_type))
                    .with_detail(err.to_string())
            }
            ClientError::Authentication(message) => ProviderError::service(message),
            ClientError::Configuration(message) => {
                ProviderError::new(ErrorKind::Configuration, message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_keeps_status_and_body() {
        let err: ProviderError = ClientError::Transport {
            status: 404,
            body: "not found".to_string(),
        }
        .into();
        assert_eq!(err.kind, ErrorKind::Transport);
        assert!(err.message.contains("404"));
        assert_eq!(err.detail.as_deref(), Some("not found"));
    }

    #[test]
    fn service_error_carries_error_block() {
        let block = ServiceError {
            code: 10001,
            error_type: "ValidationException".to_string(),
            status: 400,
            error: "scope key exists".to_string(),
            reference_number: None,
        };
        let client_err = ClientError::Service(block);
        assert_eq!(client_err.status(), Some(400));
        let err: ProviderError = client_err.into();
        assert_eq!(err.kind, ErrorKind::Service);
        assert!(err.detail.unwrap().contains("scope key exists"));
    }
}
