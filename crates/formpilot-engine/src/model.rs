//! Values exchanged between the engine and a page.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque reference to an element inside one context.
///
/// Only meaningful to the scope that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementHandle(pub u32);

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The weak text around a control that hints at what it wants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContextualSignal {
    pub title: String,
    pub name: String,
    pub id: String,
    pub placeholder: String,
    pub labels: Vec<String>,
    /// Full text of the nearest enclosing table row.
    pub row_text: String,
}

impl ContextualSignal {
    /// All signal sources joined into one searchable string.
    pub fn text(&self) -> String {
        let mut parts: Vec<&str> = vec![&self.title, &self.name, &self.id, &self.placeholder];
        parts.extend(self.labels.iter().map(String::as_str));
        parts.push(&self.row_text);
        parts.retain(|p| !p.is_empty());
        parts.join(" ")
    }

    pub fn mentions_any(&self, keywords: &[String]) -> bool {
        let text = self.text();
        keywords
            .iter()
            .any(|k| !k.is_empty() && text.contains(k.as_str()))
    }
}

/// What a page reports about one form control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlSnapshot {
    pub handle: ElementHandle,
    /// Lowercase tag name.
    pub tag: String,
    /// Lowercase `type` for inputs, empty otherwise.
    #[serde(default)]
    pub input_type: String,
    /// Some ancestor (or the control itself) carries the concealment marker.
    #[serde(default)]
    pub concealed: bool,
    /// Has a layout box.
    #[serde(default)]
    pub rendered: bool,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub option_count: usize,
    #[serde(default)]
    pub signal: ContextualSignal,
}

/// Broad family a fillable control belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Select,
    Toggle,
    TextLike,
}

impl ControlSnapshot {
    /// `None` for tags and input types that are never fillable.
    pub fn kind(&self) -> Option<ControlKind> {
        match self.tag.as_str() {
            "select" => Some(ControlKind::Select),
            "textarea" => Some(ControlKind::TextLike),
            "input" => match self.input_type.as_str() {
                "hidden" | "submit" | "button" | "reset" => None,
                "checkbox" | "radio" => Some(ControlKind::Toggle),
                _ => Some(ControlKind::TextLike),
            },
            _ => None,
        }
    }
}

/// A value chosen for one control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SynthesizedValue {
    NumericExtension { value: String },
    SubjectLine { value: String },
    GenericText { value: String },
    /// Select the option at this index (never the first).
    AlternateOption { index: usize },
    CheckedBoolean,
}

impl SynthesizedValue {
    /// Text payload, for the text-like variants.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::NumericExtension { value }
            | Self::SubjectLine { value }
            | Self::GenericText { value } => Some(value),
            Self::AlternateOption { .. } | Self::CheckedBoolean => None,
        }
    }
}

/// A visible `<select>` and its option labels.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBox {
    pub handle: ElementHandle,
    pub options: Vec<String>,
    #[serde(default)]
    pub selected_index: Option<usize>,
}

impl ListBox {
    /// First option whose label contains `label`.
    pub fn find_option(&self, label: &str) -> Option<usize> {
        if label.is_empty() {
            return None;
        }
        self.options.iter().position(|o| o.contains(label))
    }
}

/// Which elements a lookup considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSet {
    Any,
    /// `<button>` only.
    Button,
    /// `<button>` and `<input type="button">`; submit inputs are left alone.
    Buttons,
    /// Buttons plus `<span>`, for toolkits that render buttons as spans.
    Clickables,
    /// Buttons plus bootstrap-style `a.btn` links.
    ButtonLinks,
}

impl ControlSet {
    pub fn selector(&self) -> &'static str {
        match self {
            Self::Any => "*",
            Self::Button => "button",
            Self::Buttons => r#"button, input[type="button"]"#,
            Self::Clickables => r#"button, input[type="button"], span"#,
            Self::ButtonLinks => "button, a.btn",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMatch {
    /// Trimmed text equals the label.
    Exact,
    /// Trimmed text contains the label.
    Contains,
}

/// Find the first visible element in `set` whose text matches one of `texts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextQuery {
    pub set: ControlSet,
    pub texts: Vec<String>,
    pub mode: TextMatch,
}

impl TextQuery {
    pub fn exact(set: ControlSet, text: impl Into<String>) -> Self {
        Self {
            set,
            texts: vec![text.into()],
            mode: TextMatch::Exact,
        }
    }

    pub fn containing(set: ControlSet, texts: &[String]) -> Self {
        Self {
            set,
            texts: texts.to_vec(),
            mode: TextMatch::Contains,
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        let text = text.trim();
        self.texts.iter().filter(|t| !t.is_empty()).any(|t| match self.mode {
            TextMatch::Exact => text == t,
            TextMatch::Contains => text.contains(t.as_str()),
        })
    }
}

/// How a double activation was delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Activation {
    /// Real double-click on the option itself.
    OptionElement,
    /// Synthetic `dblclick` dispatched on the list control.
    ControlDispatch,
}

/// Visual marker applied to touched elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Filled,
    Trigger,
    Commit,
}

impl Highlight {
    pub fn styles(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Filled => &[("border", "2px solid #00f")],
            Self::Trigger => &[("border", "3px solid blue")],
            Self::Commit => &[("border", "5px solid red"), ("backgroundColor", "#00FF00")],
        }
    }

    pub fn style_object(&self) -> serde_json::Value {
        self.styles()
            .iter()
            .map(|(k, v)| ((*k).to_string(), serde_json::Value::from(*v)))
            .collect::<serde_json::Map<_, _>>()
            .into()
    }
}
