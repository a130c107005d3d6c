//! Save control resolution.

use std::sync::Arc;

use formpilot_config::{CommitConfig, TimingConfig};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::enumerator::{Located, enumerate_contexts, first_by_id_suffix, first_by_text};
use crate::model::{ControlSet, Highlight, TextQuery};
use crate::scope::{FormPage, FormScope};
use crate::settle;

/// Which lookup located the save control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CommitStrategy {
    /// Visible button whose trimmed text equals the save label.
    Text,
    /// Visible button whose id ends with the configured suffix.
    IdSuffix,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CommitOutcome {
    Committed { strategy: CommitStrategy, context: String },
    /// Neither strategy found a control in any context.
    NotFound,
    /// A control was found but clicking it failed.
    ClickFailed { strategy: CommitStrategy, reason: String },
}

impl CommitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

/// Locates the save control by text first, then by id suffix, and clicks it.
pub struct CommitResolver<'a> {
    page: &'a dyn FormPage,
    commit: &'a CommitConfig,
    timing: &'a TimingConfig,
}

impl<'a> CommitResolver<'a> {
    pub fn new(page: &'a dyn FormPage, commit: &'a CommitConfig, timing: &'a TimingConfig) -> Self {
        Self { page, commit, timing }
    }

    pub async fn commit(&self) -> CommitOutcome {
        let contexts = match enumerate_contexts(self.page).await {
            Ok(contexts) => contexts,
            Err(e) => {
                error!(error = %e, "Cannot enumerate contexts for commit");
                return CommitOutcome::NotFound;
            }
        };

        let Some((strategy, found)) = self.locate(&contexts).await else {
            error!(
                label = %self.commit.save_label,
                id_suffix = %self.commit.id_suffix,
                "Save control not found in any context"
            );
            return CommitOutcome::NotFound;
        };
        let scope = &contexts[found.context];
        info!(context = scope.label(), ?strategy, "Save control located");

        if let Err(e) = scope.highlight(found.handle, Highlight::Commit).await {
            debug!(error = %e, "Could not highlight save control");
        }
        settle(self.timing.pre_click_ms).await;

        match scope.click(found.handle).await {
            Ok(()) => {
                info!(context = scope.label(), "Save control clicked");
                CommitOutcome::Committed {
                    strategy,
                    context: scope.label().to_string(),
                }
            }
            Err(e) => {
                error!(context = scope.label(), error = %e, "Save control click failed");
                CommitOutcome::ClickFailed {
                    strategy,
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn locate(
        &self,
        contexts: &[Arc<dyn FormScope>],
    ) -> Option<(CommitStrategy, Located)> {
        if !self.commit.save_label.trim().is_empty() {
            let query = TextQuery::exact(ControlSet::Buttons, self.commit.save_label.trim());
            if let Some(found) = first_by_text(contexts, &query).await {
                return Some((CommitStrategy::Text, found));
            }
            warn!(label = %self.commit.save_label, "No save button by text, trying id suffix");
        }
        if !self.commit.id_suffix.is_empty() {
            if let Some(found) = first_by_id_suffix(contexts, &self.commit.id_suffix, ControlSet::Buttons).await {
                return Some((CommitStrategy::IdSuffix, found));
            }
        }
        None
    }
}
