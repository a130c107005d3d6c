use serde_json::{Value, json};

use crate::cdp::error::CdpError;

use super::PageSession;

impl PageSession {
    /// PNG of the whole scrollable document, base64 encoded as Chrome sends it.
    pub async fn capture_full_page(&self) -> Result<String, CdpError> {
        let metrics = self.call("Page.getLayoutMetrics", Value::Null).await?;
        let size = &metrics["cssContentSize"];

        let mut params = json!({"format": "png", "captureBeyondViewport": true});
        if let (Some(width), Some(height)) = (size["width"].as_f64(), size["height"].as_f64()) {
            params["clip"] = json!({"x": 0, "y": 0, "width": width, "height": height, "scale": 1});
        }

        let mut reply = self.call("Page.captureScreenshot", params).await?;
        match reply["data"].take() {
            Value::String(data) => Ok(data),
            _ => Err(CdpError::MissingField {
                method: "Page.captureScreenshot",
                field: "data",
            }),
        }
    }
}
