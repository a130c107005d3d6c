//! `Runtime.evaluate` in the page or in one frame's isolated world.

use serde_json::{Value, json};

use crate::cdp::error::CdpError;
use crate::cdp::protocol::ThrownException;

use super::PageSession;

impl PageSession {
    /// Evaluate in the main frame's default world.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        self.run_script(expression, None).await
    }

    /// Evaluate in an execution context from [`PageSession::create_isolated_world`].
    ///
    /// A context that no longer exists (frame detached or navigated) comes back
    /// as [`CdpError::FrameUnavailable`] so callers can skip it locally.
    pub async fn evaluate_in_context(&self, context_id: i64, expression: &str) -> Result<Value, CdpError> {
        self.run_script(expression, Some(context_id)).await
    }

    async fn run_script(&self, expression: &str, context_id: Option<i64>) -> Result<Value, CdpError> {
        let mut params = json!({
            "expression": expression,
            "returnByValue": true,
            "awaitPromise": true,
        });
        if let Some(id) = context_id {
            params["contextId"] = id.into();
        }

        let reply = self
            .call("Runtime.evaluate", params)
            .await
            .map_err(|e| match (e, context_id) {
                (CdpError::Remote { message, .. }, Some(id)) => {
                    CdpError::FrameUnavailable(format!("context {}: {}", id, message))
                }
                (e, _) => e,
            })?;
        script_value(reply)
    }
}

/// The returned value, or the thrown exception as [`CdpError::JavaScript`].
pub(crate) fn script_value(mut reply: Value) -> Result<Value, CdpError> {
    if let Some(thrown) = reply.get("exceptionDetails") {
        let thrown: ThrownException = serde_json::from_value(thrown.clone())?;
        return Err(CdpError::JavaScript(thrown.message()));
    }
    Ok(reply["result"]["value"].take())
}
