//! Frame tree and per-frame execution contexts.

use serde_json::{Value, json};
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{FrameInfo, FrameTree};

use super::PageSession;

/// World name of every isolated context created here.
const WORLD_NAME: &str = "formpilot";

impl PageSession {
    /// Snapshot of the tab's frames, main frame first, then document order.
    pub async fn frame_tree(&self) -> Result<Vec<FrameInfo>, CdpError> {
        let mut reply = self.call("Page.getFrameTree", Value::Null).await?;
        let tree: FrameTree = serde_json::from_value(reply["frameTree"].take())?;
        Ok(tree.flatten())
    }

    /// Create an isolated JavaScript world bound to one frame.
    ///
    /// The world shares the frame's DOM but not its globals. Fails with
    /// [`CdpError::FrameUnavailable`] when the frame is gone or lives in
    /// another process (cross-origin).
    pub async fn create_isolated_world(&self, frame_id: &str) -> Result<i64, CdpError> {
        let reply = self
            .call(
                "Page.createIsolatedWorld",
                json!({"frameId": frame_id, "worldName": WORLD_NAME}),
            )
            .await
            .map_err(|e| match e {
                CdpError::Remote { message, .. } => CdpError::FrameUnavailable(format!("{}: {}", frame_id, message)),
                other => other,
            })?;

        let context_id = reply["executionContextId"].as_i64().ok_or(CdpError::MissingField {
            method: "Page.createIsolatedWorld",
            field: "executionContextId",
        })?;
        debug!("Isolated world {} created for frame {}", context_id, frame_id);
        Ok(context_id)
    }
}
