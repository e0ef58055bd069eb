//! WASM bindings for the rspdft template designer
//!
//! This crate provides a JavaScript-friendly API for:
//! - Creating or loading a template designer session
//! - Adding, selecting, dragging and editing text elements
//! - Toolbar actions (undo/redo, zoom, grid and snap toggles)
//! - Save/cancel callbacks carrying the template description
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { PdfDesigner } from 'rspdft-designer-wasm';
//!
//! await init();
//!
//! const designer = PdfDesigner.fromTemplate(savedTemplateJson);
//! designer.setContentTypes(JSON.stringify(contentTypes));
//! designer.onSave((template) => api.saveTemplate(template));
//! designer.onCancel(() => router.back());
//!
//! const el = designer.addDynamicField('user.email');
//! designer.dragEnd(el.tempId, 42, 18);
//! designer.updateProperties({ fontSize: 14 });
//!
//! render(designer.view());
//! designer.save();
//! ```

use designer::{
    Designer, DesignerConfig, DesignerEvent, DesignerState, Element, NewElement, PageSize,
    PropertyForm, PropertyPatch,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Serialize with plain objects for maps and `null` for `None`
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).map_err(to_js_error)
}

/// Everything the canvas component needs to render one frame
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CanvasView<'a> {
    elements: &'a [Element],
    selected_id: Option<u64>,
    form: Option<&'a PropertyForm>,
    editing: bool,
    zoom: u32,
    scale: f64,
    show_grid: bool,
    snap_to_grid: bool,
    grid_size: f64,
    canvas_width: f64,
    canvas_height: f64,
    can_undo: bool,
    can_redo: bool,
    modified: bool,
}

/// Template designer session
#[wasm_bindgen]
pub struct PdfDesigner {
    inner: Designer,
    on_save: Option<js_sys::Function>,
    on_cancel: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl PdfDesigner {
    /// Create a designer with the default configuration
    #[wasm_bindgen(constructor)]
    pub fn new() -> PdfDesigner {
        PdfDesigner::wrap(Designer::default())
    }

    /// Create a designer from a configuration JSON object
    ///
    /// @param json - Partial configuration, e.g. `{"gridSize": 10}`
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> Result<PdfDesigner, JsValue> {
        let config = DesignerConfig::from_json(json).map_err(to_js_error)?;
        let inner = Designer::new(config).map_err(to_js_error)?;
        Ok(PdfDesigner::wrap(inner))
    }

    /// Create a designer hydrated from a saved template
    ///
    /// @param json - Template JSON string
    #[wasm_bindgen(js_name = fromTemplate)]
    pub fn from_template(json: &str) -> Result<PdfDesigner, JsValue> {
        let mut designer = PdfDesigner::new();
        designer.load(json)?;
        Ok(designer)
    }

    fn wrap(inner: Designer) -> PdfDesigner {
        PdfDesigner {
            inner,
            on_save: None,
            on_cancel: None,
        }
    }

    /// Replace the session with a saved template
    pub fn load(&mut self, json: &str) -> Result<(), JsValue> {
        let template = template::parse_template(json).map_err(to_js_error)?;
        self.inner.load(&template);
        Ok(())
    }

    /// Set the content types offered in the settings panel
    ///
    /// @param json - Array of `{id, label}` objects
    #[wasm_bindgen(js_name = setContentTypes)]
    pub fn set_content_types(&mut self, json: &str) -> Result<(), JsValue> {
        let content_types = template::parse_content_types(json).map_err(to_js_error)?;
        self.inner.set_content_types(content_types);
        Ok(())
    }

    /// Register the save callback; receives the template object
    #[wasm_bindgen(js_name = onSave)]
    pub fn on_save(&mut self, callback: js_sys::Function) {
        self.on_save = Some(callback);
    }

    /// Register the cancel callback; called without arguments
    #[wasm_bindgen(js_name = onCancel)]
    pub fn on_cancel(&mut self, callback: js_sys::Function) {
        self.on_cancel = Some(callback);
    }

    // === Elements ===

    /// Add an element from a `{textContent, isDynamic, fontSize, position}` object
    #[wasm_bindgen(js_name = addElement)]
    pub fn add_element(&mut self, defaults: JsValue) -> Result<JsValue, JsValue> {
        let defaults: NewElement = if defaults.is_undefined() || defaults.is_null() {
            NewElement::default()
        } else {
            serde_wasm_bindgen::from_value(defaults)?
        };
        to_js(&self.inner.add_element(defaults))
    }

    /// Add a static text element at the next stacked position
    #[wasm_bindgen(js_name = addStaticText)]
    pub fn add_static_text(&mut self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.inner.add_element(NewElement::static_text(text)))
    }

    /// Add a dynamic field element at the next stacked position
    #[wasm_bindgen(js_name = addDynamicField)]
    pub fn add_dynamic_field(&mut self, path: &str) -> Result<JsValue, JsValue> {
        to_js(&self.inner.add_element(NewElement::dynamic_field(path)))
    }

    /// Select an element by temp id, or clear the selection with `undefined`
    pub fn select(&mut self, id: Option<u32>) -> Result<(), JsValue> {
        self.inner
            .select(id.map(u64::from))
            .map_err(to_js_error)
    }

    pub fn duplicate(&mut self, id: u32) -> Result<JsValue, JsValue> {
        let clone = self.inner.duplicate(u64::from(id)).map_err(to_js_error)?;
        to_js(&clone)
    }

    pub fn delete(&mut self, id: u32) -> Result<(), JsValue> {
        self.inner.delete(u64::from(id)).map_err(to_js_error)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = duplicateSelected)]
    pub fn duplicate_selected(&mut self) -> Result<JsValue, JsValue> {
        let clone = self.inner.duplicate_selected().map_err(to_js_error)?;
        to_js(&clone)
    }

    #[wasm_bindgen(js_name = deleteSelected)]
    pub fn delete_selected(&mut self) -> Result<bool, JsValue> {
        let removed = self.inner.delete_selected().map_err(to_js_error)?;
        Ok(removed.is_some())
    }

    /// Commit a drag by a screen-space delta; returns the resolved `{x, y}`
    #[wasm_bindgen(js_name = dragEnd)]
    pub fn drag_end(&mut self, id: u32, dx: f64, dy: f64) -> Result<JsValue, JsValue> {
        let position = self
            .inner
            .drag_end(u64::from(id), dx, dy)
            .map_err(to_js_error)?;
        to_js(&position)
    }

    /// Apply a property form change to the selected element
    ///
    /// @param patch - Object with any of `x, y, textContent, isDynamic, fontSize`
    /// @returns whether the element changed
    #[wasm_bindgen(js_name = updateProperties)]
    pub fn update_properties(&mut self, patch: JsValue) -> Result<bool, JsValue> {
        let patch: PropertyPatch = serde_wasm_bindgen::from_value(patch)?;
        Ok(self.inner.update_properties(&patch))
    }

    // === Toolbar ===

    pub fn undo(&mut self) -> bool {
        self.inner.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.inner.redo()
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }

    #[wasm_bindgen(js_name = zoomIn)]
    pub fn zoom_in(&mut self) -> u32 {
        self.inner.zoom_in()
    }

    #[wasm_bindgen(js_name = zoomOut)]
    pub fn zoom_out(&mut self) -> u32 {
        self.inner.zoom_out()
    }

    #[wasm_bindgen(js_name = setZoom)]
    pub fn set_zoom(&mut self, zoom: u32) -> u32 {
        self.inner.set_zoom(zoom)
    }

    #[wasm_bindgen(js_name = toggleGrid)]
    pub fn toggle_grid(&mut self) -> bool {
        self.inner.toggle_grid()
    }

    #[wasm_bindgen(js_name = toggleSnap)]
    pub fn toggle_snap(&mut self) -> bool {
        self.inner.toggle_snap()
    }

    // === Settings ===

    #[wasm_bindgen(js_name = setName)]
    pub fn set_name(&mut self, name: &str) {
        self.inner.set_name(name);
    }

    #[wasm_bindgen(js_name = setCode)]
    pub fn set_code(&mut self, code: &str) {
        self.inner.set_code(code);
    }

    /// @param size - `"A4"` or `"letter"`
    #[wasm_bindgen(js_name = setPageSize)]
    pub fn set_page_size(&mut self, size: &str) -> Result<(), JsValue> {
        let page_size: PageSize = size.parse().map_err(to_js_error)?;
        self.inner.set_page_size(page_size);
        Ok(())
    }

    #[wasm_bindgen(js_name = setContentType)]
    pub fn set_content_type(&mut self, content_type: Option<String>) {
        self.inner.set_content_type(content_type.as_deref());
    }

    #[wasm_bindgen(js_name = addFilter)]
    pub fn add_filter(&mut self) {
        self.inner.add_filter();
    }

    #[wasm_bindgen(js_name = removeFilter)]
    pub fn remove_filter(&mut self, index: usize) -> bool {
        self.inner.remove_filter(index).is_some()
    }

    #[wasm_bindgen(js_name = updateFilter)]
    pub fn update_filter(&mut self, index: usize, field: &str, value: &str) -> bool {
        self.inner.update_filter(index, field, value)
    }

    /// Current settings and filter list
    pub fn settings(&self) -> Result<JsValue, JsValue> {
        let settings = self.inner.settings();
        to_js(&settings_view(settings))
    }

    // === Rendering ===

    /// Snapshot of everything the canvas renders
    pub fn view(&self) -> Result<JsValue, JsValue> {
        let toolbar = self.inner.toolbar();
        let canvas = self.inner.canvas_size();
        let view = CanvasView {
            elements: self.inner.elements(),
            selected_id: self.inner.selected().map(|e| e.temp_id),
            form: self.inner.form(),
            editing: self.inner.state() == DesignerState::Editing,
            zoom: toolbar.zoom,
            scale: self.inner.zoom_factor(),
            show_grid: toolbar.show_grid,
            snap_to_grid: toolbar.snap_to_grid,
            grid_size: self.inner.config().grid_size,
            canvas_width: canvas.width,
            canvas_height: canvas.height,
            can_undo: self.inner.can_undo(),
            can_redo: self.inner.can_redo(),
            modified: self.inner.is_modified(),
        };
        to_js(&view)
    }

    /// Current template description as JSON (identities stripped)
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        self.inner.to_template().to_json().map_err(to_js_error)
    }

    // === Save / cancel ===

    /// Validate and hand the template to the save callback
    ///
    /// Throws with the validation message when a precondition fails; the
    /// callback is not called in that case.
    pub fn save(&mut self) -> Result<(), JsValue> {
        self.inner.save().map_err(to_js_error)?;
        self.flush_events()
    }

    /// Discard the session and notify the cancel callback
    pub fn cancel(&mut self) -> Result<(), JsValue> {
        self.inner.cancel();
        self.flush_events()
    }

    fn flush_events(&mut self) -> Result<(), JsValue> {
        for event in self.inner.take_events() {
            match event {
                DesignerEvent::Save(template) => {
                    if let Some(callback) = &self.on_save {
                        callback.call1(&JsValue::NULL, &to_js(&template)?)?;
                    }
                }
                DesignerEvent::Cancel => {
                    if let Some(callback) = &self.on_cancel {
                        callback.call0(&JsValue::NULL)?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for PdfDesigner {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SettingsView<'a> {
    name: &'a str,
    code: &'a str,
    page_size: PageSize,
    content_type: Option<&'a str>,
    content_type_label: Option<&'a str>,
    content_types: &'a [template::ContentType],
    query_filters: &'a [template::QueryFilter],
}

fn settings_view(settings: &designer::TemplateSettings) -> SettingsView<'_> {
    SettingsView {
        name: settings.name(),
        code: settings.code(),
        page_size: settings.page_size(),
        content_type: settings.content_type(),
        content_type_label: settings.content_type_label(),
        content_types: settings.content_types(),
        query_filters: settings.query_filters(),
    }
}
