//! Context enumeration and cross-context lookups.
//!
//! Contexts are always re-listed on demand. The frame tree of a legacy
//! e-form changes under us whenever a dialog opens or a panel refreshes.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::ScopeError;
use crate::model::{ControlSet, ElementHandle, TextQuery};
use crate::scope::{FormPage, FormScope};

/// An element found in one of the enumerated contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Located {
    /// Position of the owning context in the enumerated list.
    pub context: usize,
    pub handle: ElementHandle,
}

/// Current contexts, main document first. Nothing is filtered here; an
/// inaccessible frame fails later on first touch.
pub async fn enumerate_contexts(page: &dyn FormPage) -> Result<Vec<Arc<dyn FormScope>>, ScopeError> {
    let contexts = page.contexts().await?;
    debug!(count = contexts.len(), "Enumerated browsing contexts");
    Ok(contexts)
}

/// First visible element in any context whose id ends with `suffix`.
pub async fn first_by_id_suffix(
    contexts: &[Arc<dyn FormScope>],
    suffix: &str,
    set: ControlSet,
) -> Option<Located> {
    for (index, scope) in contexts.iter().enumerate() {
        match scope.find_by_id_suffix(suffix, set).await {
            Ok(Some(handle)) => {
                debug!(context = scope.label(), %handle, suffix, "Found element by id suffix");
                return Some(Located { context: index, handle });
            }
            Ok(None) => {}
            Err(e) => warn!(context = scope.label(), error = %e, "Skipping context during id lookup"),
        }
    }
    None
}

/// First visible element in any context matching `query`.
pub async fn first_by_text(contexts: &[Arc<dyn FormScope>], query: &TextQuery) -> Option<Located> {
    for (index, scope) in contexts.iter().enumerate() {
        match scope.find_by_text(query).await {
            Ok(Some(handle)) => {
                debug!(context = scope.label(), %handle, texts = ?query.texts, "Found element by text");
                return Some(Located { context: index, handle });
            }
            Ok(None) => {}
            Err(e) => warn!(context = scope.label(), error = %e, "Skipping context during text lookup"),
        }
    }
    None
}
