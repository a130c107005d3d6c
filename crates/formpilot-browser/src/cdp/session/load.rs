//! Navigation and document readiness.

use std::time::Duration;

use serde_json::json;
use tokio::time::Instant;
use tracing::debug;

use crate::cdp::error::CdpError;

use super::PageSession;

const LOAD_TIMEOUT: Duration = Duration::from_secs(30);
const LOAD_POLL: Duration = Duration::from_millis(100);

impl PageSession {
    /// Navigate the tab and wait for the new document to finish loading.
    pub async fn navigate(&self, url: &str) -> Result<(), CdpError> {
        let reply = self.call("Page.navigate", json!({"url": url})).await?;
        if let Some(reason) = reply["errorText"].as_str().filter(|r| !r.is_empty()) {
            return Err(CdpError::Navigation {
                url: url.to_string(),
                reason: reason.to_string(),
            });
        }
        self.wait_for_load().await?;
        debug!("Navigated to {}", url);
        Ok(())
    }

    /// Poll until `document.readyState` is `complete`.
    ///
    /// Evaluation failures while the old document is torn down are retried.
    pub async fn wait_for_load(&self) -> Result<(), CdpError> {
        let deadline = Instant::now() + LOAD_TIMEOUT;
        loop {
            match self.evaluate("document.readyState").await {
                Ok(state) if state == "complete" => return Ok(()),
                Ok(_) | Err(CdpError::JavaScript(_)) | Err(CdpError::Remote { .. }) => {}
                Err(e) => return Err(e),
            }
            if Instant::now() >= deadline {
                return Err(CdpError::Timeout("document load".to_string()));
            }
            tokio::time::sleep(LOAD_POLL).await;
        }
    }

    pub async fn get_url(&self) -> Result<String, CdpError> {
        let href = self.evaluate("window.location.href").await?;
        Ok(href.as_str().unwrap_or_default().to_string())
    }

    pub async fn get_title(&self) -> Result<String, CdpError> {
        let title = self.evaluate("document.title").await?;
        Ok(title.as_str().unwrap_or_default().to_string())
    }
}
