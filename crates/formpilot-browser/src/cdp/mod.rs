//! Chrome DevTools Protocol client.
//!
//! One WebSocket per browser; every tab is a flattened session on it.
//!
//! ```rust,ignore
//! let client = CdpClient::connect("http://localhost:9222").await?;
//! let page = client.new_page().await?;
//! page.navigate("https://eform.example/form.xsp").await?;
//! for frame in page.frame_tree().await? {
//!     let ctx = page.create_isolated_world(&frame.id).await?;
//!     page.evaluate_in_context(ctx, "document.title").await?;
//! }
//! ```

mod client;
mod error;
mod protocol;
mod session;
mod transport;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::{DialogOpening, FrameInfo, Inbound, TabInfo};
pub use session::PageSession;
