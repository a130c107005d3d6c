use formpilot_config::{DialogConfig, TimingConfig};
use tracing::{debug, info, warn};

use super::DialogTask;
use super::outcome::{
    CategoryResolution, ConfirmResolution, TargetResolution, TaskFailure, TaskOutcome, TaskState,
    TriggerResolution,
};
use crate::artifacts::ArtifactStore;
use crate::budget::Deadline;
use crate::enumerator::{enumerate_contexts, first_by_id_suffix, first_by_text};
use crate::model::{ControlSet, Highlight, TextQuery};
use crate::scope::{FormPage, FormScope};
use crate::settle;

/// Runs dialog tasks one after another against a page.
pub struct DialogDriver<'a> {
    page: &'a dyn FormPage,
    dialog: &'a DialogConfig,
    timing: &'a TimingConfig,
    artifacts: &'a ArtifactStore,
}

impl<'a> DialogDriver<'a> {
    pub fn new(
        page: &'a dyn FormPage,
        dialog: &'a DialogConfig,
        timing: &'a TimingConfig,
        artifacts: &'a ArtifactStore,
    ) -> Self {
        Self {
            page,
            dialog,
            timing,
            artifacts,
        }
    }

    /// Run every task in order. Always returns one outcome per task; tasks
    /// the deadline cuts off are reported as out of budget.
    pub async fn run_all(&self, tasks: &[DialogTask], deadline: Deadline) -> Vec<TaskOutcome> {
        let mut outcomes = Vec::with_capacity(tasks.len());

        for task in tasks {
            let outcome = if deadline.is_exhausted() {
                warn!(task = %task.name, "Skipping task, workflow budget exhausted");
                TaskOutcome::out_of_budget(&task.name)
            } else {
                match tokio::time::timeout_at(deadline.at(), self.run_task(task)).await {
                    Ok(outcome) => outcome,
                    Err(_) => {
                        warn!(task = %task.name, budget = ?deadline.budget(), "Task cut off by workflow budget");
                        TaskOutcome::out_of_budget(&task.name)
                    }
                }
            };

            if outcome.is_success() {
                info!(task = %task.name, "Dialog task confirmed");
            } else {
                let failures: Vec<String> = outcome.failures.iter().map(ToString::to_string).collect();
                warn!(task = %task.name, ?failures, "Dialog task failed");
            }
            outcomes.push(outcome);
        }

        outcomes
    }

    /// Run a single task to a terminal state.
    pub async fn run_task(&self, task: &DialogTask) -> TaskOutcome {
        info!(task = %task.name, suffix = %task.trigger_suffix, target = %task.target, "Starting dialog task");
        let mut outcome = TaskOutcome::new(&task.name);

        outcome.enter(TaskState::TriggerSought);
        match self.open_trigger(task).await {
            Ok(context) => {
                outcome.trigger = Some(TriggerResolution::Clicked { context });
                outcome.enter(TaskState::TriggerClicked);
            }
            Err(failure) => {
                if failure == TaskFailure::TriggerNotFound {
                    outcome.trigger = Some(TriggerResolution::NotFound);
                }
                outcome.fail(failure);
                return outcome;
            }
        }

        outcome.enter(TaskState::CategoryPhase);
        outcome.category = Some(match &task.category {
            Some(category) => self.pick_category(category).await,
            None => CategoryResolution::Skipped,
        });

        outcome.enter(TaskState::TargetPhase);
        let target = self.pick_target(&task.target).await;
        if target == TargetResolution::NotFound {
            outcome.record(TaskFailure::TargetNotFound);
            outcome.screenshot = self.artifacts.capture_failure(self.page, &task.name).await;
        }
        outcome.target = Some(target);

        // Confirm even after a miss so the dialog does not block the next task.
        let confirm = self.confirm().await;
        if confirm == ConfirmResolution::NotFound {
            outcome.record(TaskFailure::ConfirmNotFound);
        }
        outcome.confirm = Some(confirm);

        outcome.finish();
        outcome
    }

    async fn open_trigger(&self, task: &DialogTask) -> Result<String, TaskFailure> {
        let contexts = enumerate_contexts(self.page).await.map_err(|e| {
            warn!(task = %task.name, error = %e, "Cannot enumerate contexts");
            TaskFailure::TriggerNotFound
        })?;

        let Some(found) = first_by_id_suffix(&contexts, &task.trigger_suffix, ControlSet::Any).await else {
            warn!(task = %task.name, suffix = %task.trigger_suffix, "Trigger not found in any context");
            return Err(TaskFailure::TriggerNotFound);
        };
        let scope = &contexts[found.context];

        if let Err(e) = scope.highlight(found.handle, Highlight::Trigger).await {
            debug!(error = %e, "Could not highlight trigger");
        }
        settle(self.timing.pre_click_ms).await;
        scope
            .click(found.handle)
            .await
            .map_err(|e| TaskFailure::TriggerUnclickable(e.to_string()))?;
        info!(task = %task.name, context = scope.label(), "Trigger clicked");
        settle(self.timing.dialog_open_ms).await;

        Ok(scope.label().to_string())
    }

    async fn pick_category(&self, label: &str) -> CategoryResolution {
        let Ok(contexts) = enumerate_contexts(self.page).await else {
            return CategoryResolution::NotFound;
        };

        for scope in &contexts {
            let lists = match scope.list_boxes().await {
                Ok(lists) => lists,
                Err(e) => {
                    debug!(context = scope.label(), error = %e, "Skipping context for category");
                    continue;
                }
            };
            for list in lists {
                let Some(index) = list.find_option(label) else {
                    continue;
                };
                if let Err(e) = scope.select_option(list.handle, index).await {
                    warn!(context = scope.label(), error = %e, "Category select failed");
                    continue;
                }
                let option = list.options[index].clone();
                info!(context = scope.label(), %option, "Category selected");
                settle(self.timing.category_settle_ms).await;
                return CategoryResolution::Selected {
                    context: scope.label().to_string(),
                    option,
                };
            }
        }

        warn!(category = label, "Category not found in any list");
        CategoryResolution::NotFound
    }

    async fn pick_target(&self, label: &str) -> TargetResolution {
        settle(self.timing.target_settle_ms).await;
        let Ok(contexts) = enumerate_contexts(self.page).await else {
            return TargetResolution::NotFound;
        };

        for scope in &contexts {
            let lists = match scope.list_boxes().await {
                Ok(lists) => lists,
                Err(e) => {
                    debug!(context = scope.label(), error = %e, "Skipping context for target");
                    continue;
                }
            };
            for list in lists {
                let Some(index) = list.find_option(label) else {
                    continue;
                };
                if let Err(e) = scope.select_option(list.handle, index).await {
                    warn!(context = scope.label(), error = %e, "Target select failed");
                    continue;
                }
                let activation = match scope.double_activate(list.handle, index).await {
                    Ok(activation) => activation,
                    Err(e) => {
                        warn!(context = scope.label(), error = %e, "Target activation failed");
                        continue;
                    }
                };
                let option = list.options[index].clone();
                info!(context = scope.label(), %option, ?activation, "Target activated");
                settle(self.timing.activation_settle_ms).await;

                let moved = self.press_add(scope.as_ref()).await;
                return TargetResolution::Selected {
                    context: scope.label().to_string(),
                    option,
                    activation,
                    moved,
                };
            }
        }

        warn!(target = label, "Target not found in any list");
        TargetResolution::NotFound
    }

    /// Click the "move selected" control next to the lists, if there is one.
    async fn press_add(&self, scope: &dyn FormScope) -> bool {
        if self.dialog.add_labels.is_empty() {
            return false;
        }
        let query = TextQuery::containing(ControlSet::Button, &self.dialog.add_labels);
        match scope.find_by_text(&query).await {
            Ok(Some(handle)) => match scope.click(handle).await {
                Ok(()) => {
                    debug!(context = scope.label(), "Add control clicked");
                    settle(self.timing.add_settle_ms).await;
                    true
                }
                Err(e) => {
                    warn!(context = scope.label(), error = %e, "Add control click failed");
                    false
                }
            },
            Ok(None) => false,
            Err(e) => {
                debug!(context = scope.label(), error = %e, "Add control lookup failed");
                false
            }
        }
    }

    async fn confirm(&self) -> ConfirmResolution {
        let Ok(contexts) = enumerate_contexts(self.page).await else {
            return ConfirmResolution::NotFound;
        };

        let query = TextQuery::exact(ControlSet::Clickables, self.dialog.confirm_label.clone());
        let Some(found) = first_by_text(&contexts, &query).await else {
            warn!(label = %self.dialog.confirm_label, "Confirm button not found");
            return ConfirmResolution::NotFound;
        };
        let scope = &contexts[found.context];

        match scope.click(found.handle).await {
            Ok(()) => {
                info!(context = scope.label(), "Dialog confirmed");
                settle(self.timing.confirm_settle_ms).await;
                ConfirmResolution::Clicked {
                    context: scope.label().to_string(),
                }
            }
            Err(e) => {
                warn!(context = scope.label(), error = %e, "Confirm click failed");
                ConfirmResolution::NotFound
            }
        }
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod driver_tests;
