//! Native `alert`/`confirm`/`prompt` handling.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::cdp::error::CdpError;
use crate::cdp::protocol::DialogOpening;

use super::PageSession;

const DIALOG_OPENING: &str = "Page.javascriptDialogOpening";

impl PageSession {
    /// Accept or dismiss the dialog currently blocking the page.
    pub async fn handle_dialog(&self, accept: bool) -> Result<(), CdpError> {
        self.call("Page.handleJavaScriptDialog", json!({"accept": accept}))
            .await?;
        Ok(())
    }

    /// Accept every dialog the page raises until the handle is aborted or
    /// the session goes away.
    pub fn spawn_dialog_acceptor(self: &Arc<Self>) -> JoinHandle<()> {
        let session = Arc::clone(self);
        let mut events = self.subscribe();

        tokio::spawn(async move {
            loop {
                let event = match events.recv().await {
                    Ok(event) => event,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Dialog listener lagged, {} events skipped", skipped);
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };
                if !event.is_event(DIALOG_OPENING) {
                    continue;
                }

                match serde_json::from_value::<DialogOpening>(event.params) {
                    Ok(dialog) => info!(kind = %dialog.kind, message = %dialog.message, "Dialog opened"),
                    Err(_) => info!("Dialog opened"),
                }
                match session.handle_dialog(true).await {
                    Ok(()) => info!("Dialog accepted"),
                    Err(e) => warn!("Failed to accept dialog: {}", e),
                }
            }
        })
    }
}
