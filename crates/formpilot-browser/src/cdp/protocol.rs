//! Wire types for the slice of the DevTools protocol FormPilot speaks.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::CdpError;

/// Outbound command. Page-level commands carry the session they target.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Command<'a> {
    pub id: u64,
    pub method: &'a str,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub params: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<&'a str>,
}

/// Anything Chrome sends: a reply when `id` is set, an event otherwise.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inbound {
    pub id: Option<u64>,
    #[serde(default)]
    pub result: Value,
    pub error: Option<RemoteFailure>,
    pub method: Option<String>,
    #[serde(default)]
    pub params: Value,
    pub session_id: Option<String>,
}

impl Inbound {
    pub fn is_event(&self, name: &str) -> bool {
        self.id.is_none() && self.method.as_deref() == Some(name)
    }

    /// Outcome of the command this message answers.
    pub fn into_reply(self) -> Result<Value, CdpError> {
        match self.error {
            Some(RemoteFailure { code, message }) => Err(CdpError::Remote { code, message }),
            None => Ok(self.result),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteFailure {
    pub code: i64,
    pub message: String,
}

/// `/json/version`. Chrome spells these keys inconsistently.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionInfo {
    #[serde(rename = "Browser")]
    pub browser: String,
    #[serde(rename = "webSocketDebuggerUrl")]
    pub ws_url: String,
}

/// One entry of `/json/list`.
#[derive(Debug, Clone, Deserialize)]
pub struct TabInfo {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    #[serde(default)]
    pub title: String,
}

impl TabInfo {
    pub fn is_page(&self) -> bool {
        self.kind == "page"
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub id: String,
    pub parent_id: Option<String>,
    pub name: Option<String>,
    pub url: String,
}

/// `Page.getFrameTree` node.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameTree {
    pub frame: Frame,
    #[serde(default)]
    pub child_frames: Vec<FrameTree>,
}

impl FrameTree {
    /// Flatten depth-first, parent before children, siblings in document order.
    pub fn flatten(&self) -> Vec<FrameInfo> {
        let mut out = Vec::new();
        self.collect(0, &mut out);
        out
    }

    fn collect(&self, depth: usize, out: &mut Vec<FrameInfo>) {
        out.push(FrameInfo {
            id: self.frame.id.clone(),
            parent_id: self.frame.parent_id.clone(),
            name: self.frame.name.clone().filter(|n| !n.is_empty()),
            url: self.frame.url.clone(),
            depth,
        });
        for child in &self.child_frames {
            child.collect(depth + 1, out);
        }
    }
}

/// A frame in the flattened tree. `depth == 0` is the main frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameInfo {
    pub id: String,
    pub parent_id: Option<String>,
    pub name: Option<String>,
    pub url: String,
    pub depth: usize,
}

impl FrameInfo {
    pub fn is_main(&self) -> bool {
        self.depth == 0
    }
}

/// `exceptionDetails` of a failed `Runtime.evaluate`.
#[derive(Debug, Clone, Deserialize)]
pub struct ThrownException {
    #[serde(default)]
    pub text: String,
    pub exception: Option<Value>,
}

impl ThrownException {
    /// The thrown value's description when there is one.
    pub fn message(&self) -> String {
        self.exception
            .as_ref()
            .and_then(|e| e["description"].as_str())
            .map_or_else(|| self.text.clone(), str::to_string)
    }
}

/// Params of `Page.javascriptDialogOpening`.
#[derive(Debug, Clone, Deserialize)]
pub struct DialogOpening {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MouseAction {
    #[serde(rename = "mouseMoved")]
    Move,
    #[serde(rename = "mousePressed")]
    Press,
    #[serde(rename = "mouseReleased")]
    Release,
}

impl MouseAction {
    pub fn button(&self) -> &'static str {
        match self {
            Self::Move => "none",
            Self::Press | Self::Release => "left",
        }
    }
}
