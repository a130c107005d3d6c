//! Eligibility rules for form controls.

use tracing::trace;

use crate::error::ScopeError;
use crate::model::{ControlKind, ControlSnapshot};
use crate::scope::FormScope;

/// Why a control was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    ExcludedType,
    Concealed,
    NotRendered,
    ReadOnly,
    Disabled,
}

/// Apply the eligibility rules to a single control.
pub fn classify(control: &ControlSnapshot) -> Result<ControlKind, Rejection> {
    let kind = control.kind().ok_or(Rejection::ExcludedType)?;
    if control.concealed {
        return Err(Rejection::Concealed);
    }
    if !control.rendered {
        return Err(Rejection::NotRendered);
    }
    if control.read_only {
        return Err(Rejection::ReadOnly);
    }
    if control.disabled {
        return Err(Rejection::Disabled);
    }
    Ok(kind)
}

/// Picks the controls in a context that may be filled.
#[derive(Debug, Clone)]
pub struct ElementClassifier {
    concealed_marker: String,
}

impl ElementClassifier {
    pub fn new(concealed_marker: impl Into<String>) -> Self {
        Self {
            concealed_marker: concealed_marker.into(),
        }
    }

    /// Eligible controls of `scope` in document order.
    pub async fn eligible_elements(&self, scope: &dyn FormScope) -> Result<Vec<ControlSnapshot>, ScopeError> {
        let controls = scope.form_controls(&self.concealed_marker).await?;
        let eligible = controls
            .into_iter()
            .filter(|c| match classify(c) {
                Ok(_) => true,
                Err(reason) => {
                    trace!(context = scope.label(), handle = %c.handle, ?reason, "Control rejected");
                    false
                }
            })
            .collect();
        Ok(eligible)
    }
}
