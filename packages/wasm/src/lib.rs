use formsmith_common::{decode_json, CommonError, CommonResult};
use formsmith_editor::{
    ApplyOutcome, BuilderSession, DragHandler, DragResult, DragStart, DragUpdate, SessionCommand,
    Viewport, DEFAULT_HISTORY_LIMIT,
};
use formsmith_registry::{Registry, Resolution};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_js(err: CommonError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Result of one dispatched command, as seen by the host
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct Outcome {
    status: &'static str,
    changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl From<ApplyOutcome> for Outcome {
    fn from(outcome: ApplyOutcome) -> Self {
        let changed = outcome.changed();
        let (status, reason) = match outcome {
            ApplyOutcome::Applied => ("applied", None),
            ApplyOutcome::Unchanged => ("unchanged", None),
            ApplyOutcome::Ignored => ("ignored", None),
            ApplyOutcome::Rejected(err) => ("rejected", Some(err.to_string())),
            ApplyOutcome::Disabled(capability) => ("disabled", Some(format!("{:?}", capability))),
        };
        Self {
            status,
            changed,
            reason,
        }
    }
}

/// One builder instance bound to a registered prototype
#[wasm_bindgen]
pub struct FormBuilder {
    session: BuilderSession,
    path: String,
}

impl FormBuilder {
    fn open(path: &str, history_limit: usize) -> CommonResult<Self> {
        let registry = Registry::builtin();
        let prototype = match registry.resolve_path(path) {
            Resolution::Found(prototype) => prototype,
            Resolution::NotFound(reason) => return Err(reason.to_string().into()),
        };

        Ok(Self {
            session: prototype.instantiate(path, history_limit),
            path: prototype.path(),
        })
    }

    fn dispatch_json(&mut self, json: &str) -> CommonResult<String> {
        let command: SessionCommand = decode_json(json)?;
        let outcome = Outcome::from(self.session.dispatch(command));
        Ok(serde_json::to_string(&outcome)?)
    }

    fn drag_start_json(&mut self, json: &str) -> CommonResult<bool> {
        let start: DragStart = decode_json(json)?;
        Ok(self.session.on_drag_start(&start))
    }

    fn drag_update_json(&mut self, json: &str) -> CommonResult<()> {
        let update: DragUpdate = decode_json(json)?;
        self.session.on_drag_update(&update);
        Ok(())
    }

    fn drag_end_json(&mut self, json: &str) -> CommonResult<bool> {
        let result: DragResult = decode_json(json)?;
        Ok(self.session.on_drag_end(&result))
    }

    fn layout_json(&self) -> CommonResult<String> {
        Ok(serde_json::to_string(self.session.layout())?)
    }

    fn preview_json(&self, viewport: &str) -> CommonResult<String> {
        let viewport = viewport.parse::<Viewport>()?;
        Ok(serde_json::to_string(&self.session.preview(viewport))?)
    }
}

#[wasm_bindgen]
impl FormBuilder {
    /// Open the prototype at `path`, e.g. `/prototypes/form-builder/version/3`
    #[wasm_bindgen(constructor)]
    pub fn new(path: &str) -> Result<FormBuilder, JsValue> {
        Self::open(path, DEFAULT_HISTORY_LIMIT).map_err(to_js)
    }

    #[wasm_bindgen(js_name = withHistoryLimit)]
    pub fn with_history_limit(path: &str, history_limit: usize) -> Result<FormBuilder, JsValue> {
        Self::open(path, history_limit).map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn path(&self) -> String {
        self.path.clone()
    }

    /// Run a JSON session command; returns the outcome as JSON
    pub fn dispatch(&mut self, command: &str) -> Result<String, JsValue> {
        self.dispatch_json(command).map_err(to_js)
    }

    #[wasm_bindgen(js_name = onDragStart)]
    pub fn on_drag_start(&mut self, start: &str) -> Result<bool, JsValue> {
        self.drag_start_json(start).map_err(to_js)
    }

    #[wasm_bindgen(js_name = onDragUpdate)]
    pub fn on_drag_update(&mut self, update: &str) -> Result<(), JsValue> {
        self.drag_update_json(update).map_err(to_js)
    }

    #[wasm_bindgen(js_name = onDragEnd)]
    pub fn on_drag_end(&mut self, result: &str) -> Result<bool, JsValue> {
        self.drag_end_json(result).map_err(to_js)
    }

    /// Current layout as JSON
    pub fn layout(&self) -> Result<String, JsValue> {
        self.layout_json().map_err(to_js)
    }

    /// Preview rows for a viewport (`mobile`, `tablet`, `desktop` or a width)
    pub fn preview(&self, viewport: &str) -> Result<String, JsValue> {
        self.preview_json(viewport).map_err(to_js)
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.session.can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.session.can_redo()
    }

    #[wasm_bindgen(js_name = undoDescription)]
    pub fn undo_description(&self) -> Option<String> {
        self.session.history().undo_description().map(str::to_string)
    }

    #[wasm_bindgen(js_name = redoDescription)]
    pub fn redo_description(&self) -> Option<String> {
        self.session.history().redo_description().map(str::to_string)
    }

    #[wasm_bindgen(js_name = isBulkMode)]
    pub fn is_bulk_mode(&self) -> bool {
        self.session.selection().is_active()
    }

    #[wasm_bindgen(js_name = selectedIds)]
    pub fn selected_ids(&self) -> Vec<String> {
        self.session.selection().ids().map(str::to_string).collect()
    }

    /// Label in the edit box, if an edit is in progress
    #[wasm_bindgen(js_name = editDraft)]
    pub fn edit_draft(&self) -> Option<String> {
        self.session.inline_edit().draft().map(str::to_string)
    }
}

/// Registered prototype paths as a JSON array
#[wasm_bindgen]
pub fn routes() -> String {
    let paths: Vec<String> = Registry::builtin().prototypes().map(|p| p.path()).collect();
    serde_json::to_string(&paths).unwrap_or_else(|_| "[]".to_string())
}

/// Whether `path` names a registered prototype
#[wasm_bindgen(js_name = isPrototypePath)]
pub fn is_prototype_path(path: &str) -> bool {
    Registry::builtin().resolve_path(path).is_found()
}

#[cfg(test)]
mod tests {
    use super::*;

    const V3: &str = "/prototypes/form-builder/version/3";

    #[test]
    fn test_open_registered_prototype() {
        let builder = FormBuilder::open(V3, 50).unwrap();
        assert_eq!(builder.path(), V3);
        assert!(!builder.can_undo());
    }

    #[test]
    fn test_open_unknown_path_is_error() {
        let err = FormBuilder::open("/prototypes/form-builder/version/99", 50)
            .err()
            .unwrap();
        assert!(err.to_string().contains("no version '99'"));
    }

    #[test]
    fn test_drag_end_json() {
        let mut builder = FormBuilder::open(V3, 50).unwrap();
        let moved = builder
            .drag_end_json(
                r#"{
                    "draggableId": "pressure",
                    "source": { "container": { "type": "section", "id": "readings" }, "index": 0 },
                    "destination": { "container": { "type": "section", "id": "readings" }, "index": 1 }
                }"#,
            )
            .unwrap();

        assert!(moved);
        assert!(builder.can_undo());
        assert_eq!(
            builder.undo_description(),
            Some("Moved field \"Pressure\" to \"Readings\" at position 2".to_string())
        );
    }

    #[test]
    fn test_dispatch_returns_outcome_json() {
        let mut builder = FormBuilder::open(V3, 50).unwrap();

        let applied = builder
            .dispatch_json(r#"{ "command": "toggleSection", "sectionId": "contact" }"#)
            .unwrap();
        assert_eq!(applied, r#"{"status":"applied","changed":true}"#);

        let rejected = builder
            .dispatch_json(r#"{ "command": "removeSection", "sectionId": "form_details" }"#)
            .unwrap();
        assert!(rejected.contains("\"status\":\"rejected\""));
        assert!(rejected.contains("system-defined"));
    }

    #[test]
    fn test_bad_json_is_error() {
        let mut builder = FormBuilder::open(V3, 50).unwrap();
        assert!(builder.dispatch_json("{").is_err());
        assert!(builder.preview_json("watch").is_err());
    }

    #[test]
    fn test_preview_json() {
        let builder = FormBuilder::open(V3, 50).unwrap();
        let json = builder.preview_json("mobile").unwrap();
        assert!(json.contains("\"columns\":1"));
        assert!(builder.layout_json().unwrap().contains("\"sections\""));
    }

    #[test]
    fn test_routes() {
        let paths: Vec<String> = serde_json::from_str(&routes()).unwrap();
        assert_eq!(paths.len(), 3);
        assert!(is_prototype_path(&paths[0]));
        assert!(!is_prototype_path("/prototypes/form-builder"));
    }
}
