use std::sync::Arc;

use async_trait::async_trait;
use formpilot_browser::{FrameInfo, PageSession};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tokio::sync::OnceCell;
use tracing::debug;

use super::scripts;
use crate::error::ScopeError;
use crate::model::{
    Activation, ControlSet, ControlSnapshot, ElementHandle, Highlight, ListBox, SynthesizedValue,
    TextMatch, TextQuery,
};
use crate::scope::FormScope;

#[derive(Debug, Deserialize)]
struct Point {
    x: f64,
    y: f64,
}

/// One frame of a page, scripted through its own isolated world.
///
/// The world is created on first use, so a frame that has already gone
/// away only fails when touched.
pub struct FrameScope {
    session: Arc<PageSession>,
    frame: FrameInfo,
    label: String,
    context: OnceCell<i64>,
}

impl FrameScope {
    pub fn new(session: Arc<PageSession>, frame: FrameInfo) -> Self {
        let label = if frame.is_main() {
            "main".to_string()
        } else {
            match &frame.name {
                Some(name) if !name.is_empty() => format!("frame:{}", name),
                _ => format!("frame:{}", frame.url),
            }
        };
        Self {
            session,
            frame,
            label,
            context: OnceCell::new(),
        }
    }

    pub fn frame(&self) -> &FrameInfo {
        &self.frame
    }

    async fn context_id(&self) -> Result<i64, ScopeError> {
        let id = self
            .context
            .get_or_try_init(|| async {
                let id = self.session.create_isolated_world(&self.frame.id).await?;
                debug!(frame = %self.frame.id, context_id = id, "Created isolated world");
                Ok::<_, ScopeError>(id)
            })
            .await?;
        Ok(*id)
    }

    async fn run(&self, body: &str, args: Value) -> Result<Value, ScopeError> {
        let context_id = self.context_id().await?;
        let expression = scripts::compose(body, &args);
        Ok(self.session.evaluate_in_context(context_id, &expression).await?)
    }

    async fn run_as<T: DeserializeOwned>(&self, body: &str, args: Value) -> Result<T, ScopeError> {
        let value = self.run(body, args).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn point(&self, body: &str, args: Value) -> Result<Option<Point>, ScopeError> {
        self.run_as(body, args).await
    }
}

#[async_trait]
impl FormScope for FrameScope {
    fn label(&self) -> &str {
        &self.label
    }

    async fn form_controls(&self, concealed_marker: &str) -> Result<Vec<ControlSnapshot>, ScopeError> {
        self.run_as(scripts::SCAN_CONTROLS, json!({ "marker": concealed_marker }))
            .await
    }

    async fn apply_value(&self, handle: ElementHandle, value: &SynthesizedValue) -> Result<(), ScopeError> {
        self.run(
            scripts::APPLY_VALUE,
            json!({
                "ref": handle,
                "value": value,
                "style": Highlight::Filled.style_object(),
            }),
        )
        .await?;
        Ok(())
    }

    async fn find_by_id_suffix(&self, suffix: &str, set: ControlSet) -> Result<Option<ElementHandle>, ScopeError> {
        self.run_as(
            scripts::FIND_BY_ID_SUFFIX,
            json!({ "selector": set.selector(), "suffix": suffix }),
        )
        .await
    }

    async fn find_by_text(&self, query: &TextQuery) -> Result<Option<ElementHandle>, ScopeError> {
        self.run_as(
            scripts::FIND_BY_TEXT,
            json!({
                "selector": query.set.selector(),
                "texts": query.texts,
                "exact": query.mode == TextMatch::Exact,
            }),
        )
        .await
    }

    async fn find_by_selector(&self, selector: &str) -> Result<Option<ElementHandle>, ScopeError> {
        self.run_as(scripts::FIND_BY_SELECTOR, json!({ "selector": selector }))
            .await
    }

    /// Real mouse click at the element centre; falls back to `element.click()`
    /// when the element has no box or sits under an unreachable frame.
    async fn click(&self, handle: ElementHandle) -> Result<(), ScopeError> {
        match self.point(scripts::CLICK_POINT, json!({ "ref": handle })).await? {
            Some(Point { x, y }) => self.session.click(x, y).await?,
            None => {
                debug!(context = %self.label, %handle, "No clickable box, clicking through DOM");
                self.run(scripts::CLICK_DIRECT, json!({ "ref": handle })).await?;
            }
        }
        Ok(())
    }

    async fn highlight(&self, handle: ElementHandle, highlight: Highlight) -> Result<(), ScopeError> {
        self.run(
            scripts::HIGHLIGHT,
            json!({ "ref": handle, "style": highlight.style_object() }),
        )
        .await?;
        Ok(())
    }

    async fn type_text(&self, handle: ElementHandle, text: &str) -> Result<(), ScopeError> {
        self.run(scripts::TYPE_TEXT, json!({ "ref": handle, "text": text }))
            .await?;
        Ok(())
    }

    async fn list_boxes(&self) -> Result<Vec<ListBox>, ScopeError> {
        self.run_as(scripts::LIST_BOXES, json!({})).await
    }

    async fn select_option(&self, list: ElementHandle, index: usize) -> Result<(), ScopeError> {
        self.run(scripts::SELECT_OPTION, json!({ "ref": list, "index": index }))
            .await?;
        Ok(())
    }

    async fn double_activate(&self, list: ElementHandle, index: usize) -> Result<Activation, ScopeError> {
        let args = json!({ "ref": list, "index": index });
        if let Some(Point { x, y }) = self.point(scripts::OPTION_POINT, args.clone()).await? {
            match self.session.double_click(x, y).await {
                Ok(()) => return Ok(Activation::OptionElement),
                Err(e) => debug!(context = %self.label, error = %e, "Option double-click failed, dispatching on list"),
            }
        }
        self.run(scripts::DISPATCH_DBLCLICK, args).await?;
        Ok(Activation::ControlDispatch)
    }
}
