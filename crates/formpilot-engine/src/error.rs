//! Engine error types.

use formpilot_browser::{BrowserError, CdpError};
use formpilot_config::ConfigError;
use thiserror::Error;

use crate::commit::CommitStrategy;

/// Failure touching one context or one element. Always handled locally.
#[derive(Debug, Error)]
pub enum ScopeError {
    /// Frame detached, navigated away or cross-origin.
    #[error("Context unavailable: {0}")]
    Unavailable(String),

    /// A required element is missing.
    #[error("Element not found: {0}")]
    NotFound(String),

    /// Element reference no longer resolves.
    #[error("Stale element: {0}")]
    StaleElement(String),

    /// Page script threw.
    #[error("Script failed: {0}")]
    Script(String),

    /// Script returned something we could not decode.
    #[error("Unexpected script result: {0}")]
    InvalidResult(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CDP error: {0}")]
    Cdp(CdpError),
}

/// Marker thrown by page scripts when an element reference is gone.
pub(crate) const STALE_MARKER: &str = "stale element";

impl From<CdpError> for ScopeError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::FrameUnavailable(msg) => ScopeError::Unavailable(msg),
            CdpError::JavaScript(msg) if msg.contains(STALE_MARKER) => ScopeError::StaleElement(msg),
            CdpError::JavaScript(msg) => ScopeError::Script(msg),
            other => ScopeError::Cdp(other),
        }
    }
}

impl From<serde_json::Error> for ScopeError {
    fn from(e: serde_json::Error) -> Self {
        ScopeError::InvalidResult(e.to_string())
    }
}

/// Scenario-level failure.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    #[error("Page error: {0}")]
    Scope(#[from] ScopeError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Unexpected page: {url} does not match {pattern}")]
    UnexpectedPage { url: String, pattern: String },

    #[error("Save control not found by text '{label}' or id suffix '{id_suffix}' in any context")]
    CommitNotFound { label: String, id_suffix: String },

    /// The save control was located but the click did not go through.
    #[error("Save control found by {strategy:?} but clicking it failed: {reason}")]
    CommitClickFailed { strategy: CommitStrategy, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_unavailable_maps_to_local_skip() {
        let err: ScopeError = CdpError::FrameUnavailable("frame-3".to_string()).into();
        assert!(matches!(err, ScopeError::Unavailable(_)));
    }

    #[test]
    fn test_stale_script_error_maps_to_stale_element() {
        let err: ScopeError = CdpError::JavaScript("Error: stale element 12".to_string()).into();
        assert!(matches!(err, ScopeError::StaleElement(_)));

        let err: ScopeError = CdpError::JavaScript("TypeError: x is undefined".to_string()).into();
        assert!(matches!(err, ScopeError::Script(_)));
    }

    #[test]
    fn test_commit_not_found_display() {
        let err = EngineError::CommitNotFound {
            label: "儲存".to_string(),
            id_suffix: ":button1".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("儲存"));
        assert!(display.contains(":button1"));
    }

    #[test]
    fn test_commit_click_failed_display() {
        let err = EngineError::CommitClickFailed {
            strategy: CommitStrategy::IdSuffix,
            reason: "Stale element: 12".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Save control found by IdSuffix but clicking it failed: Stale element: 12"
        );
    }

    #[test]
    fn test_unexpected_page_display() {
        let err = EngineError::UnexpectedPage {
            url: "https://eform.example/login".to_string(),
            pattern: ".*XF079007M.xsp.*".to_string(),
        };
        assert!(err.to_string().contains("XF079007M"));
    }
}
