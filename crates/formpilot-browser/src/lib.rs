//! Browser plumbing for FormPilot.
//!
//! A pure Rust Chrome DevTools Protocol client plus a small manager that
//! launches or attaches to Chrome. The form engine never talks WebSocket
//! directly; it goes through [`PageSession`], which adds the pieces a
//! multi-frame legacy form needs on top of plain page control:
//!
//! - a flattened frame tree (main frame first, then document order)
//! - one isolated execution context per frame, so scripts run inside iframes
//! - a broadcast of page events, used to auto-accept JavaScript dialogs
//!
//! ## Setup
//!
//! ```bash
//! google-chrome --remote-debugging-port=9222
//! ```
//!
//! If nothing listens on the debug port the manager launches Chrome itself
//! with a dedicated profile directory.

pub mod cdp;
pub mod manager;

pub use cdp::{CdpClient, CdpError, FrameInfo, PageSession};
pub use manager::{BrowserError, BrowserManager, BrowserManagerConfig};
