//! End-to-end scenario: log in, fill, run dialog tasks, commit.

use std::path::PathBuf;

use formpilot_config::Config;
use regex::Regex;
use serde::Serialize;
use tracing::{info, warn};

use crate::artifacts::ArtifactStore;
use crate::budget::Deadline;
use crate::commit::{CommitOutcome, CommitResolver};
use crate::dialog::{DialogDriver, DialogTask, TaskOutcome};
use crate::enumerator::{enumerate_contexts, first_by_text};
use crate::error::EngineError;
use crate::fill::{FillOrchestrator, FillReport};
use crate::login::{LoginOutcome, login_if_present};
use crate::model::{ControlSet, TextQuery};
use crate::scope::FormPage;
use crate::settle;
use crate::synthesizer::ValueSynthesizer;

/// Everything a run did.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub login: LoginOutcome,
    pub filled: FillReport,
    pub pre_commit: bool,
    pub tasks: Vec<TaskOutcome>,
    pub commit: CommitOutcome,
    pub final_url: Option<String>,
    pub screenshots: Vec<PathBuf>,
}

impl ScenarioReport {
    /// Task failures are tolerated; only the commit decides.
    pub fn is_success(&self) -> bool {
        self.commit.is_success()
    }

    pub fn failed_tasks(&self) -> impl Iterator<Item = &TaskOutcome> {
        self.tasks.iter().filter(|t| !t.is_success())
    }

    /// Turn a failed commit into an error.
    pub fn into_result(self, config: &Config) -> Result<Self, EngineError> {
        match &self.commit {
            CommitOutcome::Committed { .. } => Ok(self),
            CommitOutcome::NotFound => Err(EngineError::CommitNotFound {
                label: config.commit.save_label.clone(),
                id_suffix: config.commit.id_suffix.clone(),
            }),
            CommitOutcome::ClickFailed { strategy, reason } => Err(EngineError::CommitClickFailed {
                strategy: *strategy,
                reason: reason.clone(),
            }),
        }
    }
}

/// One pass over an already-open form page.
pub struct Scenario<'a> {
    page: &'a dyn FormPage,
    config: &'a Config,
    artifacts: ArtifactStore,
    seed: Option<u64>,
}

impl<'a> Scenario<'a> {
    pub fn new(page: &'a dyn FormPage, config: &'a Config) -> Self {
        Self {
            page,
            config,
            artifacts: ArtifactStore::new(config.artifacts.dir.clone()),
            seed: None,
        }
    }

    /// Fix the random stream used for synthesized values.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub async fn run(&self) -> Result<ScenarioReport, EngineError> {
        let config = self.config;
        let timing = &config.timing;
        let _dialogs = self.page.auto_accept_dialogs();
        let deadline = Deadline::start(timing.workflow_budget());

        let login = login_if_present(self.page, &config.login, timing).await?;
        self.verify_page().await?;

        let mut fill = FillOrchestrator::new(self.page, &config.vocabulary, timing);
        if let Some(seed) = self.seed {
            fill = fill.with_synthesizer(ValueSynthesizer::with_seed(config.vocabulary.clone(), seed));
        }
        let filled = fill.fill_all().await?;

        let pre_commit = self.pre_commit().await;

        let tasks: Vec<DialogTask> = config.dialog.tasks.iter().map(DialogTask::from).collect();
        let driver = DialogDriver::new(self.page, &config.dialog, timing, &self.artifacts);
        let tasks = driver.run_all(&tasks, deadline).await;

        let mut screenshots = Vec::new();
        screenshots.extend(self.artifacts.capture(self.page, &config.artifacts.before_commit).await);

        let commit = CommitResolver::new(self.page, &config.commit, timing).commit().await;
        if commit.is_success() {
            settle(timing.post_commit_ms).await;
        }
        screenshots.extend(self.artifacts.capture(self.page, &config.artifacts.after_commit).await);

        let final_url = match self.page.url().await {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(error = %e, "Cannot read final URL");
                None
            }
        };

        let report = ScenarioReport {
            login,
            filled,
            pre_commit,
            tasks,
            commit,
            final_url,
            screenshots,
        };
        info!(
            filled = report.filled.total,
            tasks = report.tasks.len(),
            failed_tasks = report.failed_tasks().count(),
            committed = report.is_success(),
            "Scenario finished"
        );
        Ok(report)
    }

    async fn verify_page(&self) -> Result<(), EngineError> {
        let url = self.page.url().await?;
        match self.page.title().await {
            Ok(title) => info!(%url, %title, "Form page loaded"),
            Err(e) => warn!(%url, error = %e, "Cannot read page title"),
        }

        let Some(pattern) = self.config.target.expected_url_pattern.as_deref() else {
            return Ok(());
        };
        let regex = Regex::new(pattern).map_err(|e| {
            EngineError::Config(formpilot_config::ConfigError::InvalidValue {
                field: "target.expected_url_pattern".to_string(),
                message: e.to_string(),
            })
        })?;
        if regex.is_match(&url) {
            Ok(())
        } else {
            Err(EngineError::UnexpectedPage {
                url,
                pattern: pattern.to_string(),
            })
        }
    }

    /// Click the optional pre-commit button. A miss is logged only.
    async fn pre_commit(&self) -> bool {
        let Some(label) = self.config.commit.pre_commit_label.as_deref().filter(|l| !l.is_empty()) else {
            return false;
        };
        let contexts = match enumerate_contexts(self.page).await {
            Ok(contexts) => contexts,
            Err(e) => {
                warn!(error = %e, "Cannot enumerate contexts for pre-commit action");
                return false;
            }
        };

        let query = TextQuery::containing(ControlSet::ButtonLinks, &[label.to_string()]);
        let Some(found) = first_by_text(&contexts, &query).await else {
            warn!(label, "Pre-commit button not found");
            return false;
        };
        let scope = &contexts[found.context];
        match scope.click(found.handle).await {
            Ok(()) => {
                info!(label, context = scope.label(), "Pre-commit button clicked");
                settle(self.config.timing.pre_commit_settle_ms).await;
                true
            }
            Err(e) => {
                warn!(label, error = %e, "Pre-commit click failed");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "scenario_tests.rs"]
mod scenario_tests;
