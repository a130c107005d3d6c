//! A DevTools session attached to one tab.

mod capture;
mod dialogs;
mod frames;
mod input;
mod load;
mod script;

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::broadcast;
use tracing::debug;

use super::error::CdpError;
use super::protocol::Inbound;
use super::transport::Transport;

pub struct PageSession {
    target_id: String,
    session_id: String,
    transport: Arc<Transport>,
}

impl PageSession {
    pub(crate) fn new(target_id: &str, session_id: &str, transport: Arc<Transport>) -> Self {
        transport.router.open_session(session_id);
        Self {
            target_id: target_id.to_string(),
            session_id: session_id.to_string(),
            transport,
        }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// Events raised by this tab from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Inbound> {
        self.transport.router.subscribe(&self.session_id)
    }

    /// Send a command scoped to this tab. `Value::Null` sends no params.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, CdpError> {
        self.transport.send(method, params, Some(&self.session_id)).await
    }

    /// `Page` for dialog events and the frame tree, `Runtime` for evaluation.
    pub(crate) async fn enable(&self) -> Result<(), CdpError> {
        self.call("Page.enable", Value::Null).await?;
        self.call("Runtime.enable", Value::Null).await?;
        debug!("Session {} ready on tab {}", self.session_id, self.target_id);
        Ok(())
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        self.transport.router.close_session(&self.session_id);
    }
}
