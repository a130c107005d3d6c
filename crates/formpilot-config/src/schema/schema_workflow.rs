//! Dialog tasks, commit control and settle delays.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// The cascading selection dialog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogConfig {
    /// Exact text of the button that closes the dialog.
    #[serde(default = "default_confirm_label")]
    pub confirm_label: String,

    /// Texts of the optional "move selected item" control.
    #[serde(default = "default_add_labels")]
    pub add_labels: Vec<String>,

    #[serde(default)]
    pub tasks: Vec<DialogTaskConfig>,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            confirm_label: default_confirm_label(),
            add_labels: default_add_labels(),
            tasks: Vec::new(),
        }
    }
}

fn default_confirm_label() -> String {
    "確定".to_string()
}

fn default_add_labels() -> Vec<String> {
    vec![">".to_string(), "新增".to_string()]
}

/// One trigger → category → target → confirm run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogTaskConfig {
    pub name: String,

    /// Suffix of the trigger control's id.
    pub trigger_suffix: String,

    /// Option text to pick in the category list. Absent when the page preselects it.
    #[serde(default)]
    pub category: Option<String>,

    /// Option text to pick in the target list.
    pub target: String,
}

/// The save control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitConfig {
    /// Visible text of the save button.
    #[serde(default = "default_save_label")]
    pub save_label: String,

    /// Id suffix tried when no button carries `save_label`.
    #[serde(default = "default_save_id_suffix")]
    pub id_suffix: String,

    /// Button clicked once after filling, if visible (e.g. "write counter-sign info").
    #[serde(default = "default_pre_commit_label")]
    pub pre_commit_label: Option<String>,
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            save_label: default_save_label(),
            id_suffix: default_save_id_suffix(),
            pre_commit_label: default_pre_commit_label(),
        }
    }
}

fn default_save_label() -> String {
    "儲存".to_string()
}

fn default_save_id_suffix() -> String {
    ":button1".to_string()
}

fn default_pre_commit_label() -> Option<String> {
    Some("寫入會簽資訊".to_string())
}

/// Settle delays (milliseconds) and the overall budget (seconds).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Before the fill pass, for the page's own init scripts.
    pub initial_settle_ms: u64,
    /// After a login submit, before waiting for the load.
    pub login_settle_ms: u64,
    /// Between marking a control and clicking it.
    pub pre_click_ms: u64,
    /// After clicking a dialog trigger.
    pub dialog_open_ms: u64,
    /// After picking a category, for the target list to repopulate.
    pub category_settle_ms: u64,
    /// Before searching for the target.
    pub target_settle_ms: u64,
    /// After selecting and double-activating the target.
    pub activation_settle_ms: u64,
    /// After clicking the add/move control.
    pub add_settle_ms: u64,
    /// After confirming, for the dialog to close.
    pub confirm_settle_ms: u64,
    /// After the pre-commit button.
    pub pre_commit_settle_ms: u64,
    /// After clicking save, before the final screenshot.
    pub post_commit_ms: u64,
    /// Wall-clock budget for the whole workflow.
    pub workflow_budget_secs: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            initial_settle_ms: 2000,
            login_settle_ms: 1000,
            pre_click_ms: 1000,
            dialog_open_ms: 500,
            category_settle_ms: 2000,
            target_settle_ms: 1000,
            activation_settle_ms: 1000,
            add_settle_ms: 1000,
            confirm_settle_ms: 2000,
            pre_commit_settle_ms: 1000,
            post_commit_ms: 5000,
            workflow_budget_secs: 60,
        }
    }
}

impl TimingConfig {
    /// All delays zero; for tests and dry runs against static pages.
    pub fn immediate() -> Self {
        Self {
            initial_settle_ms: 0,
            login_settle_ms: 0,
            pre_click_ms: 0,
            dialog_open_ms: 0,
            category_settle_ms: 0,
            target_settle_ms: 0,
            activation_settle_ms: 0,
            add_settle_ms: 0,
            confirm_settle_ms: 0,
            pre_commit_settle_ms: 0,
            post_commit_ms: 0,
            workflow_budget_secs: Self::default().workflow_budget_secs,
        }
    }

    pub fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    pub fn workflow_budget(&self) -> Duration {
        Duration::from_secs(self.workflow_budget_secs)
    }
}
