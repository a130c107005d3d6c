//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod schema_vocabulary;
mod schema_workflow;

pub use schema_vocabulary::*;
pub use schema_workflow::*;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub target: TargetConfig,

    #[serde(default)]
    pub login: LoginConfig,

    #[serde(default)]
    pub vocabulary: VocabularyConfig,

    #[serde(default)]
    pub dialog: DialogConfig,

    #[serde(default)]
    pub commit: CommitConfig,

    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub artifacts: ArtifactsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How to reach Chrome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_debug_port")]
    pub debug_port: u16,

    #[serde(default)]
    pub headless: bool,

    /// Persistent profile; defaults to `~/.formpilot/browser-profile`.
    #[serde(default)]
    pub profile_dir: Option<PathBuf>,

    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,

    /// Launch Chrome when nothing listens on the debug port.
    #[serde(default = "default_true")]
    pub launch: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            debug_port: default_debug_port(),
            headless: false,
            profile_dir: None,
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            launch: true,
        }
    }
}

fn default_debug_port() -> u16 {
    9222
}

fn default_viewport_width() -> u32 {
    1280
}

fn default_viewport_height() -> u32 {
    900
}

pub(crate) fn default_true() -> bool {
    true
}

/// The form page to drive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetConfig {
    #[serde(default)]
    pub url: String,

    /// Regex the page URL must match once login is done.
    #[serde(default)]
    pub expected_url_pattern: Option<String>,
}

/// Where diagnostic screenshots go.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    #[serde(default = "default_artifacts_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_before_commit")]
    pub before_commit: String,

    #[serde(default = "default_after_commit")]
    pub after_commit: String,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: default_artifacts_dir(),
            before_commit: default_before_commit(),
            after_commit: default_after_commit(),
        }
    }
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from("screenshots")
}

fn default_before_commit() -> String {
    "before_save.png".to_string()
}

fn default_after_commit() -> String {
    "after_save.png".to_string()
}

/// Log output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory for rolling log files; `~` is expanded.
    #[serde(default = "default_log_dir")]
    pub dir: String,

    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            level: default_log_level(),
        }
    }
}

fn default_log_dir() -> String {
    "~/.formpilot/logs".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
