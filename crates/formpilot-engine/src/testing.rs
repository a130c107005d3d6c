//! In-memory page doubles for engine tests.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::{Mutex, MutexGuard};

use crate::error::ScopeError;
use crate::model::{
    Activation, ContextualSignal, ControlSet, ControlSnapshot, ElementHandle, Highlight, ListBox,
    SynthesizedValue, TextQuery,
};
use crate::scope::{DialogGuard, FormPage, FormScope};

pub(crate) fn text_input(handle: u32, title: &str) -> ControlSnapshot {
    ControlSnapshot {
        handle: ElementHandle(handle),
        tag: "input".to_string(),
        input_type: "text".to_string(),
        concealed: false,
        rendered: true,
        read_only: false,
        disabled: false,
        checked: false,
        option_count: 0,
        signal: ContextualSignal {
            title: title.to_string(),
            ..Default::default()
        },
    }
}

pub(crate) fn select(handle: u32, option_count: usize) -> ControlSnapshot {
    ControlSnapshot {
        tag: "select".to_string(),
        input_type: String::new(),
        option_count,
        ..text_input(handle, "")
    }
}

pub(crate) fn checkbox(handle: u32) -> ControlSnapshot {
    ControlSnapshot {
        input_type: "checkbox".to_string(),
        ..text_input(handle, "")
    }
}

/// A clickable element. `tag` uses the names in [`admits`].
#[derive(Debug, Clone)]
pub(crate) struct MockButton {
    pub handle: ElementHandle,
    pub id: String,
    pub text: String,
    pub tag: &'static str,
    pub visible: bool,
}

impl MockButton {
    fn new(handle: u32, id: &str, text: &str, tag: &'static str) -> Self {
        Self {
            handle: ElementHandle(handle),
            id: id.to_string(),
            text: text.to_string(),
            tag,
            visible: true,
        }
    }

    pub fn button(handle: u32, id: &str, text: &str) -> Self {
        Self::new(handle, id, text, "button")
    }

    pub fn span(handle: u32, id: &str, text: &str) -> Self {
        Self::new(handle, id, text, "span")
    }

    pub fn link(handle: u32, id: &str, text: &str) -> Self {
        Self::new(handle, id, text, "a.btn")
    }

    /// `<input type="submit">`, outside every button set.
    pub fn submit(handle: u32, id: &str, text: &str) -> Self {
        Self::new(handle, id, text, "input-submit")
    }

    /// Plain element such as an image link; only reachable through [`ControlSet::Any`].
    pub fn element(handle: u32, id: &str) -> Self {
        Self::new(handle, id, "", "a")
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

fn admits(set: ControlSet, tag: &str) -> bool {
    match set {
        ControlSet::Any => true,
        ControlSet::Button => tag == "button",
        ControlSet::Buttons => matches!(tag, "button" | "input-button"),
        ControlSet::Clickables => matches!(tag, "button" | "input-button" | "span"),
        ControlSet::ButtonLinks => matches!(tag, "button" | "a.btn"),
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MockList {
    pub handle: ElementHandle,
    pub options: Vec<String>,
    /// Options have their own layout boxes (a listbox rather than a dropdown).
    pub option_boxes: bool,
}

impl MockList {
    pub fn new(handle: u32, options: &[&str]) -> Self {
        Self {
            handle: ElementHandle(handle),
            options: options.iter().map(|o| o.to_string()).collect(),
            option_boxes: true,
        }
    }

    pub fn without_option_boxes(mut self) -> Self {
        self.option_boxes = false;
        self
    }
}

/// Everything a scope was asked to do.
#[derive(Debug, Default)]
pub(crate) struct MockState {
    pub controls: Vec<ControlSnapshot>,
    pub applied: Vec<(ElementHandle, SynthesizedValue)>,
    pub clicks: Vec<ElementHandle>,
    pub highlights: Vec<(ElementHandle, Highlight)>,
    pub selections: Vec<(ElementHandle, usize)>,
    pub activations: Vec<(ElementHandle, usize, Activation)>,
    pub typed: Vec<(ElementHandle, String)>,
}

pub(crate) struct MockScope {
    label: String,
    unavailable: bool,
    buttons: Vec<MockButton>,
    lists: Vec<MockList>,
    fields: Vec<(String, ElementHandle)>,
    failing: Vec<ElementHandle>,
    state: Mutex<MockState>,
}

impl MockScope {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            unavailable: false,
            buttons: Vec::new(),
            lists: Vec::new(),
            fields: Vec::new(),
            failing: Vec::new(),
            state: Mutex::new(MockState::default()),
        }
    }

    /// Every call fails as if the frame had been detached.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    pub fn with_control(self, control: ControlSnapshot) -> Self {
        self.state.lock().controls.push(control);
        self
    }

    pub fn with_button(mut self, button: MockButton) -> Self {
        self.buttons.push(button);
        self
    }

    pub fn with_list(mut self, list: MockList) -> Self {
        self.lists.push(list);
        self
    }

    /// Element reachable through [`FormScope::find_by_selector`].
    pub fn with_field(mut self, selector: &str, handle: u32) -> Self {
        self.fields.push((selector.to_string(), ElementHandle(handle)));
        self
    }

    /// Writes and clicks on `handle` fail as stale.
    pub fn failing_on(mut self, handle: u32) -> Self {
        self.failing.push(ElementHandle(handle));
        self
    }

    pub fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock()
    }

    fn check(&self) -> Result<(), ScopeError> {
        if self.unavailable {
            return Err(ScopeError::Unavailable(self.label.clone()));
        }
        Ok(())
    }

    fn check_handle(&self, handle: ElementHandle) -> Result<(), ScopeError> {
        self.check()?;
        if self.failing.contains(&handle) {
            return Err(ScopeError::StaleElement(handle.to_string()));
        }
        Ok(())
    }

    fn list(&self, handle: ElementHandle) -> Result<&MockList, ScopeError> {
        self.lists
            .iter()
            .find(|l| l.handle == handle)
            .ok_or_else(|| ScopeError::StaleElement(handle.to_string()))
    }
}

#[async_trait]
impl FormScope for MockScope {
    fn label(&self) -> &str {
        &self.label
    }

    async fn form_controls(&self, _concealed_marker: &str) -> Result<Vec<ControlSnapshot>, ScopeError> {
        self.check()?;
        Ok(self.state.lock().controls.clone())
    }

    async fn apply_value(&self, handle: ElementHandle, value: &SynthesizedValue) -> Result<(), ScopeError> {
        self.check_handle(handle)?;
        let mut state = self.state.lock();
        if *value == SynthesizedValue::CheckedBoolean {
            if let Some(control) = state.controls.iter_mut().find(|c| c.handle == handle) {
                control.checked = true;
            }
        }
        state.applied.push((handle, value.clone()));
        Ok(())
    }

    async fn find_by_id_suffix(&self, suffix: &str, set: ControlSet) -> Result<Option<ElementHandle>, ScopeError> {
        self.check()?;
        Ok(self
            .buttons
            .iter()
            .find(|b| b.visible && admits(set, b.tag) && b.id.ends_with(suffix))
            .map(|b| b.handle))
    }

    async fn find_by_text(&self, query: &TextQuery) -> Result<Option<ElementHandle>, ScopeError> {
        self.check()?;
        Ok(self
            .buttons
            .iter()
            .find(|b| b.visible && admits(query.set, b.tag) && query.matches(&b.text))
            .map(|b| b.handle))
    }

    async fn find_by_selector(&self, selector: &str) -> Result<Option<ElementHandle>, ScopeError> {
        self.check()?;
        Ok(self.fields.iter().find(|(s, _)| s == selector).map(|(_, h)| *h))
    }

    async fn click(&self, handle: ElementHandle) -> Result<(), ScopeError> {
        self.check_handle(handle)?;
        self.state.lock().clicks.push(handle);
        Ok(())
    }

    async fn highlight(&self, handle: ElementHandle, highlight: Highlight) -> Result<(), ScopeError> {
        self.check()?;
        self.state.lock().highlights.push((handle, highlight));
        Ok(())
    }

    async fn type_text(&self, handle: ElementHandle, text: &str) -> Result<(), ScopeError> {
        self.check_handle(handle)?;
        self.state.lock().typed.push((handle, text.to_string()));
        Ok(())
    }

    async fn list_boxes(&self) -> Result<Vec<ListBox>, ScopeError> {
        self.check()?;
        Ok(self
            .lists
            .iter()
            .map(|l| ListBox {
                handle: l.handle,
                options: l.options.clone(),
                selected_index: None,
            })
            .collect())
    }

    async fn select_option(&self, list: ElementHandle, index: usize) -> Result<(), ScopeError> {
        self.check_handle(list)?;
        self.list(list)?;
        self.state.lock().selections.push((list, index));
        Ok(())
    }

    async fn double_activate(&self, list: ElementHandle, index: usize) -> Result<Activation, ScopeError> {
        self.check_handle(list)?;
        let activation = if self.list(list)?.option_boxes {
            Activation::OptionElement
        } else {
            Activation::ControlDispatch
        };
        self.state.lock().activations.push((list, index, activation));
        Ok(activation)
    }
}

pub(crate) struct MockPage {
    scopes: Vec<Arc<MockScope>>,
    url: Mutex<String>,
    broken: bool,
    screenshots: Mutex<Vec<PathBuf>>,
    dialog_guards: AtomicUsize,
    loads: AtomicUsize,
}

impl MockPage {
    pub fn new(scopes: Vec<MockScope>) -> Self {
        Self {
            scopes: scopes.into_iter().map(Arc::new).collect(),
            url: Mutex::new("https://eform.example/XF079007M.xsp".to_string()),
            broken: false,
            screenshots: Mutex::new(Vec::new()),
            dialog_guards: AtomicUsize::new(0),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn with_url(self, url: &str) -> Self {
        *self.url.lock() = url.to_string();
        self
    }

    /// The page itself cannot be inspected.
    pub fn broken(mut self) -> Self {
        self.broken = true;
        self
    }

    pub fn scope(&self, index: usize) -> &MockScope {
        &self.scopes[index]
    }

    pub fn screenshots(&self) -> Vec<PathBuf> {
        self.screenshots.lock().clone()
    }

    pub fn dialog_guards(&self) -> usize {
        self.dialog_guards.load(Ordering::SeqCst)
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FormPage for MockPage {
    async fn contexts(&self) -> Result<Vec<Arc<dyn FormScope>>, ScopeError> {
        if self.broken {
            return Err(ScopeError::Unavailable("page".to_string()));
        }
        Ok(self
            .scopes
            .iter()
            .map(|s| Arc::clone(s) as Arc<dyn FormScope>)
            .collect())
    }

    async fn url(&self) -> Result<String, ScopeError> {
        Ok(self.url.lock().clone())
    }

    async fn title(&self) -> Result<String, ScopeError> {
        Ok("電子表單".to_string())
    }

    async fn wait_for_load(&self) -> Result<(), ScopeError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn screenshot(&self, path: &Path) -> Result<(), ScopeError> {
        std::fs::write(path, b"\x89PNG")?;
        self.screenshots.lock().push(path.to_path_buf());
        Ok(())
    }

    fn auto_accept_dialogs(&self) -> DialogGuard {
        self.dialog_guards.fetch_add(1, Ordering::SeqCst);
        DialogGuard::inert()
    }
}
