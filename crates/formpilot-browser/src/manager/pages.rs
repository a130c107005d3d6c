use std::sync::Arc;

use tracing::debug;

use crate::cdp::PageSession;

use super::{BrowserError, BrowserManager};

impl BrowserManager {
    /// Open a fresh tab at `url`.
    pub async fn open_page(&self, url: &str) -> Result<Arc<PageSession>, BrowserError> {
        let client = self.connect().await?;
        let session = client.new_page().await?;
        session.navigate(url).await?;
        debug!("Opened tab {} at {}", session.target_id(), url);
        Ok(Arc::new(session))
    }

    /// Attach to the first open tab whose URL contains `url_fragment`.
    pub async fn attach_page(&self, url_fragment: &str) -> Result<Option<Arc<PageSession>>, BrowserError> {
        let client = self.connect().await?;
        let tab = client
            .list_pages()
            .await?
            .into_iter()
            .find(|t| t.is_page() && t.url.contains(url_fragment));

        let Some(tab) = tab else {
            return Ok(None);
        };
        let session = client.attach_page(&tab.id).await?;
        debug!("Attached to tab {} at {}", tab.id, tab.url);
        Ok(Some(Arc::new(session)))
    }

    pub async fn close_page(&self, session: &PageSession) -> Result<(), BrowserError> {
        let client = self.connect().await?;
        client.close_page(session.target_id()).await?;
        Ok(())
    }
}
