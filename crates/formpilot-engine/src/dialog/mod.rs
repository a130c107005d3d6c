//! Cascading selection dialog: trigger → category → target → confirm.
//!
//! Each step re-enumerates contexts, because opening the dialog and
//! picking a category both rebuild frames. A step that finds nothing
//! records a resolution and the task moves on; only the trigger is
//! mandatory.

mod driver;
mod outcome;

pub use driver::DialogDriver;
pub use outcome::{
    CategoryResolution, ConfirmResolution, TargetResolution, TaskFailure, TaskOutcome, TaskState,
    TriggerResolution,
};

use formpilot_config::DialogTaskConfig;

/// One dialog run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogTask {
    pub name: String,
    pub trigger_suffix: String,
    /// Upstream list entry that must be picked before the target appears.
    pub category: Option<String>,
    pub target: String,
}

impl From<&DialogTaskConfig> for DialogTask {
    fn from(config: &DialogTaskConfig) -> Self {
        Self {
            name: config.name.clone(),
            trigger_suffix: config.trigger_suffix.clone(),
            category: config.category.clone().filter(|c| !c.trim().is_empty()),
            target: config.target.clone(),
        }
    }
}
