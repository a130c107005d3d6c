use std::time::Duration;

use super::*;
use crate::model::{Activation, ElementHandle};
use crate::testing::{MockButton, MockList, MockPage, MockScope};

const CATEGORY: &str = "24.資訊管理中心";

fn tasks() -> Vec<DialogTask> {
    let task = |name: &str, suffix: &str, category: Option<&str>, target: &str| DialogTask {
        name: name.to_string(),
        trigger_suffix: suffix.to_string(),
        category: category.map(str::to_string),
        target: target.to_string(),
    };
    vec![
        task("Red", ":CounterSignBtn_L3", Some(CATEGORY), "數位銀行處"),
        task("Orange", ":CounterSignBtn_L4", None, "系統整合部"),
        task("Yellow", ":CT2CounterSignBtn_L3", Some(CATEGORY), "數位安全處"),
        task("Green", ":CT2CounterSignBtn_L4", None, "應用開發一部"),
    ]
}

/// Main document holds the triggers (minus Red's); the dialog frame holds
/// the lists, the add control and the confirm span.
fn form_main() -> MockScope {
    MockScope::new("main")
        .with_button(MockButton::element(10, "view:_id1:CounterSignBtn_L4"))
        .with_button(MockButton::element(11, "view:_id1:CT2CounterSignBtn_L3"))
        .with_button(MockButton::element(12, "view:_id1:CT2CounterSignBtn_L4"))
}

fn dialog_frame() -> MockScope {
    MockScope::new("frame:dialog")
        .with_list(MockList::new(20, &["請選擇", CATEGORY]))
        .with_list(MockList::new(21, &["系統整合部", "數位安全處", "應用開發一部"]))
        .with_button(MockButton::button(22, "view:add", ">"))
        .with_button(MockButton::span(23, "", "確定"))
}

struct Fixture {
    dialog: DialogConfig,
    timing: TimingConfig,
    artifacts: ArtifactStore,
    _temp: tempfile::TempDir,
}

impl Fixture {
    fn new() -> Self {
        let temp = tempfile::TempDir::new().unwrap();
        Self {
            dialog: DialogConfig::default(),
            timing: TimingConfig::immediate(),
            artifacts: ArtifactStore::new(temp.path()),
            _temp: temp,
        }
    }

    fn driver<'a>(&'a self, page: &'a MockPage) -> DialogDriver<'a> {
        DialogDriver::new(page, &self.dialog, &self.timing, &self.artifacts)
    }
}

fn generous() -> Deadline {
    Deadline::start(Duration::from_secs(60))
}

#[tokio::test]
async fn test_missing_trigger_fails_only_that_task() {
    let fixture = Fixture::new();
    let page = MockPage::new(vec![form_main(), dialog_frame()]);

    let outcomes = fixture.driver(&page).run_all(&tasks(), generous()).await;

    let names: Vec<&str> = outcomes.iter().map(|o| o.task.as_str()).collect();
    assert_eq!(names, ["Red", "Orange", "Yellow", "Green"]);

    assert_eq!(outcomes[0].state, TaskState::Failed);
    assert_eq!(outcomes[0].failures, vec![TaskFailure::TriggerNotFound]);
    assert_eq!(outcomes[0].trigger, Some(TriggerResolution::NotFound));
    assert!(outcomes[0].category.is_none());
    assert!(outcomes[0].screenshot.is_none());
    assert!(page.screenshots().is_empty());

    for outcome in &outcomes[1..] {
        assert!(outcome.is_success(), "{outcome:?}");
    }
    assert_eq!(outcomes[1].category, Some(CategoryResolution::Skipped));
    assert_eq!(outcomes[3].category, Some(CategoryResolution::Skipped));
    assert_eq!(
        outcomes[2].category,
        Some(CategoryResolution::Selected {
            context: "frame:dialog".to_string(),
            option: CATEGORY.to_string(),
        })
    );
}

#[tokio::test]
async fn test_target_resolution_records_activation_and_move() {
    let fixture = Fixture::new();
    let page = MockPage::new(vec![form_main(), dialog_frame()]);

    let outcome = fixture.driver(&page).run_task(&tasks()[2]).await;

    assert_eq!(
        outcome.target,
        Some(TargetResolution::Selected {
            context: "frame:dialog".to_string(),
            option: "數位安全處".to_string(),
            activation: Activation::OptionElement,
            moved: true,
        })
    );
    assert_eq!(
        outcome.confirm,
        Some(ConfirmResolution::Clicked {
            context: "frame:dialog".to_string()
        })
    );

    let frame = page.scope(1).state();
    assert_eq!(frame.selections, vec![(ElementHandle(20), 1), (ElementHandle(21), 1)]);
    assert_eq!(frame.activations, vec![(ElementHandle(21), 1, Activation::OptionElement)]);
    assert_eq!(frame.clicks, vec![ElementHandle(22), ElementHandle(23)]);

    let main = page.scope(0).state();
    assert_eq!(main.clicks, vec![ElementHandle(11)]);
    assert_eq!(main.highlights, vec![(ElementHandle(11), Highlight::Trigger)]);
}

#[tokio::test]
async fn test_activation_falls_back_to_control_dispatch() {
    let fixture = Fixture::new();
    let frame = MockScope::new("frame:dialog")
        .with_list(MockList::new(21, &["系統整合部"]).without_option_boxes())
        .with_button(MockButton::span(23, "", "確定"));
    let page = MockPage::new(vec![form_main(), frame]);

    let outcome = fixture.driver(&page).run_task(&tasks()[1]).await;

    assert!(outcome.is_success());
    let Some(TargetResolution::Selected { activation, moved, .. }) = outcome.target else {
        panic!("target not resolved");
    };
    assert_eq!(activation, Activation::ControlDispatch);
    assert!(!moved);
}

#[tokio::test]
async fn test_missing_target_screenshots_and_still_confirms() {
    let fixture = Fixture::new();
    let frame = MockScope::new("frame:dialog")
        .with_list(MockList::new(21, &["其他單位"]))
        .with_button(MockButton::span(23, "", "確定"));
    let page = MockPage::new(vec![form_main(), frame]);

    let outcome = fixture.driver(&page).run_task(&tasks()[3]).await;

    assert_eq!(outcome.state, TaskState::Failed);
    assert_eq!(outcome.failures, vec![TaskFailure::TargetNotFound]);
    assert_eq!(outcome.target, Some(TargetResolution::NotFound));
    assert!(matches!(outcome.confirm, Some(ConfirmResolution::Clicked { .. })));

    let screenshot = outcome.screenshot.unwrap();
    assert_eq!(screenshot, fixture.artifacts.failure_path("Green"));
    assert!(screenshot.exists());
}

#[tokio::test]
async fn test_missing_category_is_not_a_failure() {
    let fixture = Fixture::new();
    let frame = MockScope::new("frame:dialog")
        .with_list(MockList::new(21, &["數位安全處"]))
        .with_button(MockButton::span(23, "", "確定"));
    let page = MockPage::new(vec![form_main(), frame]);

    let outcome = fixture.driver(&page).run_task(&tasks()[2]).await;

    assert!(outcome.is_success());
    assert_eq!(outcome.category, Some(CategoryResolution::NotFound));
}

#[tokio::test]
async fn test_missing_confirm_fails_task() {
    let fixture = Fixture::new();
    let frame = MockScope::new("frame:dialog").with_list(MockList::new(21, &["系統整合部"]));
    let page = MockPage::new(vec![form_main(), frame]);

    let outcome = fixture.driver(&page).run_task(&tasks()[1]).await;

    assert_eq!(outcome.failures, vec![TaskFailure::ConfirmNotFound]);
    assert_eq!(outcome.confirm, Some(ConfirmResolution::NotFound));
    assert_eq!(outcome.state, TaskState::Failed);
}

#[tokio::test]
async fn test_dialog_in_unavailable_frame_is_skipped() {
    let fixture = Fixture::new();
    let page = MockPage::new(vec![
        form_main(),
        MockScope::new("frame:stale").unavailable(),
        dialog_frame(),
    ]);

    let outcome = fixture.driver(&page).run_task(&tasks()[1]).await;
    assert!(outcome.is_success());
}

#[tokio::test]
async fn test_exhausted_budget_reports_every_task() {
    let fixture = Fixture::new();
    let page = MockPage::new(vec![form_main(), dialog_frame()]);

    let outcomes = fixture
        .driver(&page)
        .run_all(&tasks(), Deadline::start(Duration::ZERO))
        .await;

    assert_eq!(outcomes.len(), 4);
    for outcome in &outcomes {
        assert_eq!(outcome.failures, vec![TaskFailure::BudgetExhausted]);
    }
    assert!(page.scope(0).state().clicks.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_budget_cuts_off_running_task() {
    let mut fixture = Fixture::new();
    fixture.timing.dialog_open_ms = 3_000;
    let page = MockPage::new(vec![form_main(), dialog_frame()]);

    let outcomes = fixture
        .driver(&page)
        .run_all(&tasks()[1..], Deadline::start(Duration::from_secs(5)))
        .await;

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].is_success());
    assert_eq!(outcomes[1].failures, vec![TaskFailure::BudgetExhausted]);
    assert_eq!(outcomes[2].failures, vec![TaskFailure::BudgetExhausted]);
}
