use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use formpilot_browser::PageSession;
use tracing::debug;

use super::frame::FrameScope;
use crate::error::ScopeError;
use crate::scope::{DialogGuard, FormPage, FormScope};

/// A page tab reached through a CDP session.
pub struct CdpFormPage {
    session: Arc<PageSession>,
}

impl CdpFormPage {
    pub fn new(session: Arc<PageSession>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Arc<PageSession> {
        &self.session
    }
}

#[async_trait]
impl FormPage for CdpFormPage {
    async fn contexts(&self) -> Result<Vec<Arc<dyn FormScope>>, ScopeError> {
        let frames = self.session.frame_tree().await?;
        debug!(frames = frames.len(), "Read frame tree");
        Ok(frames
            .into_iter()
            .map(|frame| Arc::new(FrameScope::new(Arc::clone(&self.session), frame)) as Arc<dyn FormScope>)
            .collect())
    }

    async fn url(&self) -> Result<String, ScopeError> {
        Ok(self.session.get_url().await?)
    }

    async fn title(&self) -> Result<String, ScopeError> {
        Ok(self.session.get_title().await?)
    }

    async fn wait_for_load(&self) -> Result<(), ScopeError> {
        Ok(self.session.wait_for_load().await?)
    }

    async fn screenshot(&self, path: &Path) -> Result<(), ScopeError> {
        let data = self.session.capture_full_page().await?;
        let bytes = STANDARD
            .decode(data)
            .map_err(|e| ScopeError::InvalidResult(format!("screenshot data: {}", e)))?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, bytes).await?;
        Ok(())
    }

    fn auto_accept_dialogs(&self) -> DialogGuard {
        DialogGuard::new(self.session.spawn_dialog_acceptor())
    }
}
