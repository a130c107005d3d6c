//! Adaptive form-automation engine.
//!
//! Drives a legacy multi-frame e-form that was never meant to be scripted:
//!
//! - [`enumerator`] lists the browsing contexts (main document, then frames)
//! - [`classifier`] picks the controls that may be touched
//! - [`synthesizer`] infers a plausible value from weak textual signals
//! - [`fill`] runs the two above over every context
//! - [`dialog`] drives the trigger → category → target → confirm dialog
//! - [`commit`] finds and clicks the save control
//!
//! Everything talks to the page through the [`FormScope`] and [`FormPage`]
//! traits. [`cdp`] implements them over the Chrome DevTools Protocol.
//!
//! Lookups that come up empty are values, not errors. The one condition that
//! fails a [`Scenario`] is a save control that cannot be found anywhere or
//! cannot be clicked.

pub mod artifacts;
pub mod budget;
pub mod cdp;
pub mod classifier;
pub mod commit;
pub mod dialog;
pub mod enumerator;
mod error;
pub mod fill;
pub mod login;
mod model;
pub mod scenario;
mod scope;
pub mod synthesizer;

#[cfg(test)]
pub(crate) mod testing;

pub use artifacts::ArtifactStore;
pub use budget::Deadline;
pub use cdp::CdpFormPage;
pub use commit::{CommitOutcome, CommitResolver, CommitStrategy};
pub use dialog::{DialogDriver, DialogTask, TaskFailure, TaskOutcome, TaskState};
pub use error::{EngineError, ScopeError};
pub use fill::{FillOrchestrator, FillReport};
pub use login::LoginOutcome;
pub use model::*;
pub use scenario::{Scenario, ScenarioReport};
pub use scope::{DialogGuard, FormPage, FormScope};

/// Sleep for a settle delay; zero returns immediately.
pub(crate) async fn settle(ms: u64) {
    if ms > 0 {
        tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
    }
}
