//! Validate subcommand.

use std::path::Path;

use formpilot_config::{Config, ConfigValidator};

/// Print validation findings; errors fail the command.
pub(crate) fn validate_config(path: &Path, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let result = ConfigValidator::validate(config)?;

    for warning in &result.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }
    for error in &result.errors {
        println!("error: {}: {}", error.path, error.message);
    }

    if result.is_valid() {
        println!(
            "{} is valid ({} dialog tasks, {} warnings)",
            path.display(),
            config.dialog.tasks.len(),
            result.warnings.len()
        );
        Ok(())
    } else {
        Err(format!("{} has {} errors", path.display(), result.errors.len()).into())
    }
}
