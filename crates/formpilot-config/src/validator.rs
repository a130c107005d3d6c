//! Configuration validation.

use std::collections::HashSet;

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Collapse into the first error, if any.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(e) => Err(ConfigError::InvalidValue {
                field: e.path,
                message: e.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_browser(config, &mut result);
        Self::validate_target(config, &mut result);
        Self::validate_login(config, &mut result);
        Self::validate_vocabulary(config, &mut result);
        Self::validate_dialog(config, &mut result);
        Self::validate_commit(config, &mut result);
        Self::validate_timing(config, &mut result);

        Ok(result)
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        if config.browser.debug_port == 0 {
            result.add_error(ValidationError::new(
                "browser.debug_port",
                "Port cannot be 0",
            ));
        }
    }

    fn validate_target(config: &Config, result: &mut ValidationResult) {
        if config.target.url.is_empty() {
            result.add_error(ValidationError::new("target.url", "Target URL is required"));
        } else if let Err(e) = url::Url::parse(&config.target.url) {
            result.add_error(ValidationError::new(
                "target.url",
                format!("Invalid URL: {}", e),
            ));
        }

        if let Some(ref pattern) = config.target.expected_url_pattern {
            if let Err(e) = regex::Regex::new(pattern) {
                result.add_error(ValidationError::new(
                    "target.expected_url_pattern",
                    format!("Invalid regex: {}", e),
                ));
            }
        }
    }

    fn validate_login(config: &Config, result: &mut ValidationResult) {
        if !config.login.has_credentials() {
            result.add_warning(ValidationWarning::new(
                "login",
                "No credentials configured, a login form will be left untouched",
            ));
        }

        if config.login.user_field_id.is_empty() || config.login.password_field_id.is_empty() {
            result.add_error(ValidationError::new(
                "login",
                "Login field ids cannot be empty",
            ));
        }
    }

    fn validate_vocabulary(config: &Config, result: &mut ValidationResult) {
        let vocab = &config.vocabulary;

        if vocab.concealed_marker_class.trim().is_empty() {
            result.add_warning(ValidationWarning::new(
                "vocabulary.concealed_marker_class",
                "No concealed-group marker, every visible control will be filled",
            ));
        } else if vocab.concealed_marker_class.contains(char::is_whitespace) {
            result.add_error(ValidationError::new(
                "vocabulary.concealed_marker_class",
                "Marker must be a single class name",
            ));
        }

        for (path, keywords) in [
            ("vocabulary.extension_keywords", &vocab.extension_keywords),
            ("vocabulary.subject_keywords", &vocab.subject_keywords),
        ] {
            if keywords.iter().any(|k| k.is_empty()) {
                result.add_error(ValidationError::new(
                    path,
                    "Empty keyword would match every field",
                ));
            }
        }
    }

    fn validate_dialog(config: &Config, result: &mut ValidationResult) {
        if config.dialog.tasks.is_empty() {
            result.add_warning(ValidationWarning::new(
                "dialog.tasks",
                "No dialog tasks configured",
            ));
        }

        if config.dialog.confirm_label.trim().is_empty() {
            result.add_error(ValidationError::new(
                "dialog.confirm_label",
                "Confirm label cannot be empty",
            ));
        }

        let mut names = HashSet::new();
        for (i, task) in config.dialog.tasks.iter().enumerate() {
            let path = format!("dialog.tasks[{}]", i);

            if task.name.trim().is_empty() {
                result.add_error(ValidationError::new(
                    format!("{}.name", path),
                    "Task name cannot be empty",
                ));
            } else if !names.insert(task.name.as_str()) {
                result.add_warning(ValidationWarning::new(
                    format!("{}.name", path),
                    format!("Duplicate task name '{}', screenshots will overwrite", task.name),
                ));
            }

            if task.trigger_suffix.is_empty() {
                result.add_error(ValidationError::new(
                    format!("{}.trigger_suffix", path),
                    "Trigger suffix cannot be empty",
                ));
            }

            if task.target.trim().is_empty() {
                result.add_error(ValidationError::new(
                    format!("{}.target", path),
                    "Target label cannot be empty",
                ));
            }

            if task.category.as_deref().is_some_and(|c| c.trim().is_empty()) {
                result.add_error(ValidationError::new(
                    format!("{}.category", path),
                    "Category must be omitted rather than empty",
                ));
            }
        }
    }

    fn validate_commit(config: &Config, result: &mut ValidationResult) {
        if config.commit.save_label.trim().is_empty() && config.commit.id_suffix.is_empty() {
            result.add_error(ValidationError::new(
                "commit",
                "Either save_label or id_suffix must be set",
            ));
        }
    }

    fn validate_timing(config: &Config, result: &mut ValidationResult) {
        let timing = &config.timing;

        if timing.workflow_budget_secs == 0 {
            result.add_error(ValidationError::new(
                "timing.workflow_budget_secs",
                "workflow_budget_secs must be greater than 0",
            ));
        }

        let per_task_ms = timing.pre_click_ms
            + timing.dialog_open_ms
            + timing.category_settle_ms
            + timing.target_settle_ms
            + timing.activation_settle_ms
            + timing.add_settle_ms
            + timing.confirm_settle_ms;
        let planned_ms = per_task_ms * config.dialog.tasks.len() as u64 + timing.initial_settle_ms;
        if planned_ms > timing.workflow_budget_secs.saturating_mul(1000) {
            result.add_warning(ValidationWarning::new(
                "timing.workflow_budget_secs",
                format!(
                    "Settle delays alone need {}ms, more than the {}s budget",
                    planned_ms, timing.workflow_budget_secs
                ),
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
