//! Field vocabulary and login glue.

use serde::{Deserialize, Serialize};

/// Text signals the engine matches against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyConfig {
    /// Ancestor class marking a logically hidden group of controls.
    #[serde(default = "default_concealed_marker")]
    pub concealed_marker_class: String,

    /// Keywords that mark a phone extension field.
    #[serde(default = "default_extension_keywords")]
    pub extension_keywords: Vec<String>,

    /// Keywords that mark a subject line field.
    #[serde(default = "default_subject_keywords")]
    pub subject_keywords: Vec<String>,

    /// Label placed before the timestamp in a subject line.
    #[serde(default = "default_subject_prefix")]
    pub subject_prefix: String,

    /// Fixed phrase placed after the timestamp in a subject line.
    #[serde(default = "default_subject_marker")]
    pub subject_marker: String,

    /// Prefix of generic text values.
    #[serde(default = "default_generic_prefix")]
    pub generic_prefix: String,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            concealed_marker_class: default_concealed_marker(),
            extension_keywords: default_extension_keywords(),
            subject_keywords: default_subject_keywords(),
            subject_prefix: default_subject_prefix(),
            subject_marker: default_subject_marker(),
            generic_prefix: default_generic_prefix(),
        }
    }
}

fn default_concealed_marker() -> String {
    "U_hide".to_string()
}

fn default_extension_keywords() -> Vec<String> {
    vec!["分機".to_string()]
}

fn default_subject_keywords() -> Vec<String> {
    vec!["主旨".to_string(), "呈核主旨".to_string()]
}

fn default_subject_prefix() -> String {
    "測試執行時間".to_string()
}

fn default_subject_marker() -> String {
    "系統自動填寫主旨".to_string()
}

fn default_generic_prefix() -> String {
    "Auto".to_string()
}

/// One-shot login performed when the login form is showing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginConfig {
    #[serde(default = "default_user_field_id")]
    pub user_field_id: String,

    #[serde(default = "default_password_field_id")]
    pub password_field_id: String,

    #[serde(default = "default_submit_selector")]
    pub submit_selector: String,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            user_field_id: default_user_field_id(),
            password_field_id: default_password_field_id(),
            submit_selector: default_submit_selector(),
            username: None,
            password: None,
        }
    }
}

impl LoginConfig {
    pub fn has_credentials(&self) -> bool {
        self.username.as_deref().is_some_and(|u| !u.is_empty()) && self.password.is_some()
    }
}

fn default_user_field_id() -> String {
    "user-id".to_string()
}

fn default_password_field_id() -> String {
    "pw-id".to_string()
}

fn default_submit_selector() -> String {
    "input[type=\"submit\"]".to_string()
}
