//! Page abstraction the engine is written against.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;

use crate::error::ScopeError;
use crate::model::{
    Activation, ControlSet, ControlSnapshot, ElementHandle, Highlight, ListBox, SynthesizedValue,
    TextQuery,
};

/// One browsing context: the main document or a single frame.
///
/// Every method may fail with [`ScopeError::Unavailable`] when the context
/// has gone away; callers treat that as "skip this context".
#[async_trait]
pub trait FormScope: Send + Sync {
    /// Human-readable name for logs.
    fn label(&self) -> &str;

    /// Every input, textarea and select in document order, minus input
    /// types that are never fillable.
    async fn form_controls(&self, concealed_marker: &str) -> Result<Vec<ControlSnapshot>, ScopeError>;

    /// Write `value`, fire the matching events, and mark the element.
    async fn apply_value(&self, handle: ElementHandle, value: &SynthesizedValue) -> Result<(), ScopeError>;

    /// First visible element in `set` whose id ends with `suffix`.
    async fn find_by_id_suffix(&self, suffix: &str, set: ControlSet) -> Result<Option<ElementHandle>, ScopeError>;

    async fn find_by_text(&self, query: &TextQuery) -> Result<Option<ElementHandle>, ScopeError>;

    /// First visible element matching a CSS selector.
    async fn find_by_selector(&self, selector: &str) -> Result<Option<ElementHandle>, ScopeError>;

    async fn click(&self, handle: ElementHandle) -> Result<(), ScopeError>;

    async fn highlight(&self, handle: ElementHandle, highlight: Highlight) -> Result<(), ScopeError>;

    async fn type_text(&self, handle: ElementHandle, text: &str) -> Result<(), ScopeError>;

    /// Visible list controls with their option labels.
    async fn list_boxes(&self) -> Result<Vec<ListBox>, ScopeError>;

    /// Select by index and fire `change`.
    async fn select_option(&self, list: ElementHandle, index: usize) -> Result<(), ScopeError>;

    /// Double-activate an option: on the option element when it is
    /// interactable, otherwise by dispatching on the list control.
    async fn double_activate(&self, list: ElementHandle, index: usize) -> Result<Activation, ScopeError>;
}

/// The top-level page.
#[async_trait]
pub trait FormPage: Send + Sync {
    /// Main document first, then every frame in document order.
    async fn contexts(&self) -> Result<Vec<Arc<dyn FormScope>>, ScopeError>;

    async fn url(&self) -> Result<String, ScopeError>;

    async fn title(&self) -> Result<String, ScopeError>;

    async fn wait_for_load(&self) -> Result<(), ScopeError>;

    /// Full-page PNG written to `path`.
    async fn screenshot(&self, path: &Path) -> Result<(), ScopeError>;

    /// Accept every native dialog until the guard is dropped.
    fn auto_accept_dialogs(&self) -> DialogGuard;
}

/// Keeps a dialog listener alive; dropping it detaches the listener.
#[derive(Debug)]
pub struct DialogGuard {
    listener: Option<JoinHandle<()>>,
}

impl DialogGuard {
    pub fn new(listener: JoinHandle<()>) -> Self {
        Self {
            listener: Some(listener),
        }
    }

    /// Guard with nothing attached.
    pub fn inert() -> Self {
        Self { listener: None }
    }

    pub fn is_active(&self) -> bool {
        self.listener.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for DialogGuard {
    fn drop(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.abort();
        }
    }
}
