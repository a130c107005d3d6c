use thiserror::Error;

#[derive(Debug, Error)]
pub enum CdpError {
    /// Nothing answered DevTools discovery at this endpoint.
    #[error("No DevTools endpoint at {endpoint}: {reason}")]
    Unreachable { endpoint: String, reason: String },

    #[error("WebSocket failure: {0}")]
    Socket(String),

    /// Chrome answered the command with an error.
    #[error("Chrome rejected the command ({code}): {message}")]
    Remote { code: i64, message: String },

    #[error("Malformed DevTools message: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// Frame is gone or cannot host an execution context.
    #[error("Frame unavailable: {0}")]
    FrameUnavailable(String),

    /// Page script threw.
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    #[error("No reply to {0} in time")]
    Timeout(String),

    #[error("DevTools connection closed")]
    Closed,

    #[error("Reply to {method} has no {field}")]
    MissingField { method: &'static str, field: &'static str },
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        CdpError::Socket(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_display() {
        let err = CdpError::Remote {
            code: -32000,
            message: "Cannot find context with specified id".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Chrome rejected the command (-32000): Cannot find context with specified id"
        );
    }

    #[test]
    fn test_missing_field_display() {
        let err = CdpError::MissingField {
            method: "Target.attachToTarget",
            field: "sessionId",
        };
        assert_eq!(err.to_string(), "Reply to Target.attachToTarget has no sessionId");
    }
}
