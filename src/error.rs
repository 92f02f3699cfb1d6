// Error handling module
// Defines the error types surfaced by the client and the ramp controller

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while driving a Locust server
#[derive(Error, Debug)]
pub enum ClientError {
    /// Endpoint string is malformed or misses a scheme/host
    #[error("Invalid endpoint {url:?}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// Network or connection failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body is not valid JSON for the expected shape
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Non-200 status or explicit success=false in the payload
    #[error("Server rejected request: {status} - {message}")]
    ServerRejected { status: u16, message: String },

    /// Readiness probe failed before a ramp attempt
    #[error("Locust server is not ready to start a run")]
    ServerNotReady,

    /// Could not establish initial throughput for the ramp baseline
    #[error("Could not establish baseline throughput: {0}")]
    BaselineUnavailable(#[source] Box<ClientError>),

    /// Ramp loop ran out of time before reaching the target throughput
    #[error("Ramp deadline of {0:?} exceeded before reaching target throughput")]
    DeadlineExceeded(Duration),
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ClientError::InvalidEndpoint {
            url: "localhost:8089".to_string(),
            reason: "protocol scheme is empty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid endpoint \"localhost:8089\": protocol scheme is empty"
        );

        let err = ClientError::ServerRejected {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Server rejected request: 500 - Internal Server Error"
        );

        let err = ClientError::ServerNotReady;
        assert_eq!(err.to_string(), "Locust server is not ready to start a run");
    }

    #[test]
    fn test_baseline_error_wraps_source() {
        let inner = ClientError::ServerRejected {
            status: 503,
            message: "busy".to_string(),
        };
        let err = ClientError::BaselineUnavailable(Box::new(inner));
        assert!(err.to_string().contains("503 - busy"));
    }

    #[test]
    fn test_deadline_error_message() {
        let err = ClientError::DeadlineExceeded(Duration::from_secs(3600));
        assert!(err.to_string().contains("3600s"));
    }
}
