//! Fill every eligible control in every context.

use formpilot_config::{TimingConfig, VocabularyConfig};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::classifier::ElementClassifier;
use crate::enumerator::enumerate_contexts;
use crate::error::ScopeError;
use crate::scope::{FormPage, FormScope};
use crate::settle;
use crate::synthesizer::ValueSynthesizer;

/// Result of filling one context.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContextFill {
    pub context: String,
    /// Controls that passed classification.
    pub eligible: usize,
    /// Controls a value was written to.
    pub filled: usize,
    /// Writes that failed and were skipped.
    pub failed: usize,
    /// Set when the whole context was skipped.
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FillReport {
    /// Successful writes across all contexts.
    pub total: usize,
    pub contexts: Vec<ContextFill>,
}

impl FillReport {
    pub fn eligible(&self) -> usize {
        self.contexts.iter().map(|c| c.eligible).sum()
    }
}

/// Walks every context and writes a synthesized value into each eligible
/// control.
pub struct FillOrchestrator<'a> {
    page: &'a dyn FormPage,
    classifier: ElementClassifier,
    synthesizer: ValueSynthesizer,
    initial_settle_ms: u64,
}

impl<'a> FillOrchestrator<'a> {
    pub fn new(page: &'a dyn FormPage, vocabulary: &VocabularyConfig, timing: &TimingConfig) -> Self {
        Self {
            page,
            classifier: ElementClassifier::new(vocabulary.concealed_marker_class.clone()),
            synthesizer: ValueSynthesizer::new(vocabulary.clone()),
            initial_settle_ms: timing.initial_settle_ms,
        }
    }

    pub fn with_synthesizer(mut self, synthesizer: ValueSynthesizer) -> Self {
        self.synthesizer = synthesizer;
        self
    }

    /// Fill all contexts. Only fails when the page itself cannot be listed;
    /// per-context and per-element failures are recorded and skipped.
    pub async fn fill_all(&mut self) -> Result<FillReport, ScopeError> {
        settle(self.initial_settle_ms).await;

        let contexts = enumerate_contexts(self.page).await?;
        let mut report = FillReport::default();

        for scope in &contexts {
            let fill = match self.fill_context(scope.as_ref()).await {
                Ok(fill) => fill,
                Err(e) => {
                    warn!(context = scope.label(), error = %e, "Skipping context");
                    ContextFill {
                        context: scope.label().to_string(),
                        error: Some(e.to_string()),
                        ..Default::default()
                    }
                }
            };
            report.total += fill.filled;
            report.contexts.push(fill);
        }

        info!(total = report.total, contexts = contexts.len(), "Filled form controls");
        Ok(report)
    }

    async fn fill_context(&mut self, scope: &dyn FormScope) -> Result<ContextFill, ScopeError> {
        let eligible = self.classifier.eligible_elements(scope).await?;
        let mut fill = ContextFill {
            context: scope.label().to_string(),
            eligible: eligible.len(),
            ..Default::default()
        };

        for control in &eligible {
            let Some(value) = self.synthesizer.synthesize(control) else {
                continue;
            };
            match scope.apply_value(control.handle, &value).await {
                Ok(()) => {
                    debug!(context = scope.label(), handle = %control.handle, ?value, "Filled control");
                    fill.filled += 1;
                }
                Err(e) => {
                    warn!(context = scope.label(), handle = %control.handle, error = %e, "Failed to fill control");
                    fill.failed += 1;
                }
            }
        }

        Ok(fill)
    }
}

#[cfg(test)]
#[path = "fill_tests.rs"]
mod fill_tests;
