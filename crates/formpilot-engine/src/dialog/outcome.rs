use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use crate::model::Activation;

/// Lifecycle of one dialog task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TaskState {
    Idle,
    TriggerSought,
    TriggerClicked,
    CategoryPhase,
    TargetPhase,
    Confirmed,
    Failed,
}

impl TaskState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TriggerResolution {
    Clicked { context: String },
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CategoryResolution {
    Selected { context: String, option: String },
    /// Task has no category.
    Skipped,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TargetResolution {
    Selected {
        context: String,
        option: String,
        activation: Activation,
        /// The add control was found and clicked.
        moved: bool,
    },
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ConfirmResolution {
    Clicked { context: String },
    NotFound,
}

/// Task-local failure. Never aborts the scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TaskFailure {
    TriggerNotFound,
    TriggerUnclickable(String),
    TargetNotFound,
    ConfirmNotFound,
    BudgetExhausted,
}

impl fmt::Display for TaskFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TriggerNotFound => write!(f, "trigger not found"),
            Self::TriggerUnclickable(e) => write!(f, "trigger could not be clicked: {e}"),
            Self::TargetNotFound => write!(f, "target option not found"),
            Self::ConfirmNotFound => write!(f, "confirm button not found"),
            Self::BudgetExhausted => write!(f, "workflow budget exhausted"),
        }
    }
}

/// What happened to one task.
#[derive(Debug, Clone, Serialize)]
pub struct TaskOutcome {
    pub task: String,
    pub state: TaskState,
    pub trigger: Option<TriggerResolution>,
    pub category: Option<CategoryResolution>,
    pub target: Option<TargetResolution>,
    pub confirm: Option<ConfirmResolution>,
    pub failures: Vec<TaskFailure>,
    /// Failure screenshot, when one was taken.
    pub screenshot: Option<PathBuf>,
}

impl TaskOutcome {
    pub(crate) fn new(task: &str) -> Self {
        Self {
            task: task.to_string(),
            state: TaskState::Idle,
            trigger: None,
            category: None,
            target: None,
            confirm: None,
            failures: Vec::new(),
            screenshot: None,
        }
    }

    /// Outcome for a task the budget never let start or finish.
    pub(crate) fn out_of_budget(task: &str) -> Self {
        let mut outcome = Self::new(task);
        outcome.fail(TaskFailure::BudgetExhausted);
        outcome
    }

    pub fn is_success(&self) -> bool {
        self.state == TaskState::Confirmed
    }

    pub(crate) fn enter(&mut self, next: TaskState) {
        debug!(task = %self.task, from = ?self.state, to = ?next, "Task state");
        self.state = next;
    }

    pub(crate) fn record(&mut self, failure: TaskFailure) {
        self.failures.push(failure);
    }

    pub(crate) fn fail(&mut self, failure: TaskFailure) {
        self.record(failure);
        self.enter(TaskState::Failed);
    }

    /// Terminal state from what was recorded along the way.
    pub(crate) fn finish(&mut self) {
        if self.failures.is_empty() {
            self.enter(TaskState::Confirmed);
        } else {
            self.enter(TaskState::Failed);
        }
    }
}
