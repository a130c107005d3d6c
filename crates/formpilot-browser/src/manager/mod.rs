//! Chrome lifecycle.
//!
//! Attaches to a Chrome already listening on the debug port, or launches one
//! with a persistent profile so that e-form logins survive between runs.

mod chrome;
mod config;
mod pages;

use std::sync::Arc;
use std::time::Duration;

use tokio::process::Child;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::cdp::CdpClient;

pub use config::{BrowserError, BrowserManagerConfig};

/// How long a freshly launched Chrome gets to open its debug port.
const LAUNCH_TIMEOUT: Duration = Duration::from_secs(6);

pub struct BrowserManager {
    config: BrowserManagerConfig,
    client: Mutex<Option<Arc<CdpClient>>>,
    /// Set only when this manager launched Chrome itself.
    chrome: Mutex<Option<Child>>,
}

impl BrowserManager {
    pub fn new(config: BrowserManagerConfig) -> Self {
        Self {
            config,
            client: Mutex::new(None),
            chrome: Mutex::new(None),
        }
    }

    /// The shared DevTools connection, launching Chrome first when nothing
    /// listens on the debug port and launching is allowed.
    pub async fn connect(&self) -> Result<Arc<CdpClient>, BrowserError> {
        let mut slot = self.client.lock().await;
        if let Some(client) = slot.as_ref() {
            return Ok(Arc::clone(client));
        }

        let endpoint = self.config.endpoint();
        if chrome::is_listening(&endpoint).await {
            info!("Chrome already listening on port {}", self.config.debug_port);
        } else if self.config.launch {
            let child = chrome::launch(&self.config)?;
            *self.chrome.lock().await = Some(child);
            chrome::wait_until_listening(&endpoint, LAUNCH_TIMEOUT)
                .await
                .map_err(|_| BrowserError::StartTimeout(self.config.debug_port, LAUNCH_TIMEOUT))?;
        } else {
            return Err(BrowserError::NotRunning(self.config.debug_port));
        }

        let client = Arc::new(CdpClient::connect(&endpoint).await?);
        *slot = Some(Arc::clone(&client));
        Ok(client)
    }

    /// Drop the connection and kill Chrome if this manager launched it.
    pub async fn shutdown_chrome(&self) -> Result<(), BrowserError> {
        self.client.lock().await.take();
        if let Some(mut child) = self.chrome.lock().await.take() {
            info!("Shutting down Chrome");
            if let Err(e) = child.kill().await {
                warn!("Failed to stop Chrome: {}", e);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
