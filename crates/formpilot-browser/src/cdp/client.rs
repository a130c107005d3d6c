//! Browser-level DevTools connection.

use std::sync::Arc;

use serde_json::json;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::error::CdpError;
use super::protocol::{TabInfo, VersionInfo};
use super::session::PageSession;
use super::transport::Transport;

/// Connection to one Chrome instance, from which page sessions are attached.
pub struct CdpClient {
    endpoint: String,
    transport: Arc<Transport>,
    reader: JoinHandle<()>,
}

impl CdpClient {
    /// Discover the browser WebSocket behind `endpoint` (e.g.
    /// `http://localhost:9222`) and connect to it.
    pub async fn connect(endpoint: &str) -> Result<Self, CdpError> {
        let endpoint = endpoint.trim_end_matches('/').to_string();
        let unreachable = |reason: String| CdpError::Unreachable {
            endpoint: endpoint.clone(),
            reason,
        };

        url::Url::parse(&endpoint).map_err(|e| unreachable(e.to_string()))?;
        let version: VersionInfo = reqwest::get(format!("{}/json/version", endpoint))
            .await
            .map_err(|e| unreachable(e.to_string()))?
            .json()
            .await
            .map_err(|e| unreachable(e.to_string()))?;

        let (transport, reader) = Transport::open(&version.ws_url).await?;
        info!("Connected to {} at {}", version.browser, endpoint);

        Ok(Self {
            endpoint,
            transport,
            reader,
        })
    }

    /// Tabs currently open, from the HTTP listing.
    pub async fn list_pages(&self) -> Result<Vec<TabInfo>, CdpError> {
        let unreachable = |e: reqwest::Error| CdpError::Unreachable {
            endpoint: self.endpoint.clone(),
            reason: e.to_string(),
        };
        reqwest::get(format!("{}/json/list", self.endpoint))
            .await
            .map_err(unreachable)?
            .json()
            .await
            .map_err(unreachable)
    }

    /// Open a blank tab and attach to it.
    pub async fn new_page(&self) -> Result<PageSession, CdpError> {
        let reply = self
            .transport
            .send("Target.createTarget", json!({"url": "about:blank"}), None)
            .await?;
        let target_id = reply["targetId"].as_str().ok_or(CdpError::MissingField {
            method: "Target.createTarget",
            field: "targetId",
        })?;
        debug!("Created tab {}", target_id);
        self.attach_page(target_id).await
    }

    /// Attach a flattened session to an existing tab.
    pub async fn attach_page(&self, target_id: &str) -> Result<PageSession, CdpError> {
        let reply = self
            .transport
            .send(
                "Target.attachToTarget",
                json!({"targetId": target_id, "flatten": true}),
                None,
            )
            .await?;
        let session_id = reply["sessionId"].as_str().ok_or(CdpError::MissingField {
            method: "Target.attachToTarget",
            field: "sessionId",
        })?;

        let session = PageSession::new(target_id, session_id, Arc::clone(&self.transport));
        session.enable().await?;
        Ok(session)
    }

    pub async fn close_page(&self, target_id: &str) -> Result<(), CdpError> {
        self.transport
            .send("Target.closeTarget", json!({"targetId": target_id}), None)
            .await?;
        Ok(())
    }
}

impl Drop for CdpClient {
    fn drop(&mut self) {
        self.reader.abort();
    }
}
