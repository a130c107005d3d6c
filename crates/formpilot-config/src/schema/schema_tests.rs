use super::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.browser.debug_port, 9222);
    assert!(config.browser.launch);
    assert!(config.target.url.is_empty());
    assert_eq!(config.artifacts.before_commit, "before_save.png");
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_vocabulary_default() {
    let vocab = VocabularyConfig::default();
    assert_eq!(vocab.concealed_marker_class, "U_hide");
    assert_eq!(vocab.extension_keywords, vec!["分機"]);
    assert!(vocab.subject_keywords.contains(&"呈核主旨".to_string()));
    assert_eq!(vocab.generic_prefix, "Auto");
}

#[test]
fn test_login_credentials() {
    let mut login = LoginConfig::default();
    assert!(!login.has_credentials());

    login.username = Some("user01".to_string());
    assert!(!login.has_credentials());

    login.password = Some("secret".to_string());
    assert!(login.has_credentials());

    login.username = Some(String::new());
    assert!(!login.has_credentials());
}

#[test]
fn test_commit_default() {
    let commit = CommitConfig::default();
    assert_eq!(commit.save_label, "儲存");
    assert_eq!(commit.id_suffix, ":button1");
    assert!(commit.pre_commit_label.is_some());
}

#[test]
fn test_timing_partial_override() {
    let timing: TimingConfig = toml::from_str("category_settle_ms = 3000").unwrap();
    assert_eq!(timing.category_settle_ms, 3000);
    assert_eq!(timing.initial_settle_ms, 2000);
    assert_eq!(timing.workflow_budget(), std::time::Duration::from_secs(60));
}

#[test]
fn test_timing_immediate() {
    let timing = TimingConfig::immediate();
    assert_eq!(timing.post_commit_ms, 0);
    assert_eq!(TimingConfig::ms(timing.confirm_settle_ms), std::time::Duration::ZERO);
    assert!(timing.workflow_budget_secs > 0);
}

#[test]
fn test_dialog_task_requires_target() {
    let result: Result<DialogTaskConfig, _> = toml::from_str(
        r#"
            name = "Red"
            trigger_suffix = ":CounterSignBtn_L3"
        "#,
    );
    assert!(result.is_err());
}

#[test]
fn test_config_serialization_roundtrip_keeps_tasks() {
    let mut config = Config::default();
    config.dialog.tasks.push(DialogTaskConfig {
        name: "Green".to_string(),
        trigger_suffix: ":CT2CounterSignBtn_L4".to_string(),
        category: None,
        target: "應用開發一部".to_string(),
    });
    let text = toml::to_string(&config).unwrap();
    let back: Config = toml::from_str(&text).unwrap();
    assert_eq!(back.dialog.tasks, config.dialog.tasks);
}
