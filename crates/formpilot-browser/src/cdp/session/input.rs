//! Trusted mouse input at top-level viewport coordinates.

use serde_json::json;
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::MouseAction;

use super::PageSession;

impl PageSession {
    async fn mouse(&self, action: MouseAction, x: f64, y: f64, click_count: u32) -> Result<(), CdpError> {
        self.call(
            "Input.dispatchMouseEvent",
            json!({
                "type": action,
                "x": x,
                "y": y,
                "button": action.button(),
                "clickCount": click_count,
            }),
        )
        .await?;
        Ok(())
    }

    async fn press(&self, x: f64, y: f64, click_count: u32) -> Result<(), CdpError> {
        self.mouse(MouseAction::Press, x, y, click_count).await?;
        self.mouse(MouseAction::Release, x, y, click_count).await
    }

    pub async fn click(&self, x: f64, y: f64) -> Result<(), CdpError> {
        self.mouse(MouseAction::Move, x, y, 0).await?;
        self.press(x, y, 1).await?;
        debug!("Clicked at ({}, {})", x, y);
        Ok(())
    }

    /// Two presses, the second with `clickCount: 2`, so the page sees `dblclick`.
    pub async fn double_click(&self, x: f64, y: f64) -> Result<(), CdpError> {
        self.mouse(MouseAction::Move, x, y, 0).await?;
        self.press(x, y, 1).await?;
        self.press(x, y, 2).await?;
        debug!("Double-clicked at ({}, {})", x, y);
        Ok(())
    }
}
