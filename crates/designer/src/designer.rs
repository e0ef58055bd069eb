//! Designer controller
//!
//! Orchestrates the element store, history, geometry, property binding and
//! template settings. Every structural mutation (add, duplicate, delete,
//! drag-end, property edit) completes its history record before returning;
//! selection changes never record. Save and cancel are emitted as events
//! which the host drains with [`Designer::take_events`].

use template::{ContentType, PageSize, QueryFilter, Size, Template, TemplateError};

use crate::config::DesignerConfig;
use crate::element::{Element, ElementId, NewElement};
use crate::geometry::{self, DragParams, Point};
use crate::history::History;
use crate::properties::{PropertiesBinding, PropertyForm, PropertyPatch};
use crate::settings::TemplateSettings;
use crate::store::ElementStore;
use crate::{DesignerError, Result};

/// Controller state, derived from the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesignerState {
    /// Nothing selected
    Idle,
    /// An element is selected and the properties panel is active
    Editing,
}

/// Events emitted at the save/cancel boundary
#[derive(Debug, Clone, PartialEq)]
pub enum DesignerEvent {
    /// Validated template description, element identities stripped
    Save(Template),
    /// Editing was cancelled; carries no payload
    Cancel,
}

/// Toolbar view state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toolbar {
    /// Zoom percentage
    pub zoom: u32,
    pub show_grid: bool,
    pub snap_to_grid: bool,
}

impl Toolbar {
    fn from_config(config: &DesignerConfig) -> Self {
        Self {
            zoom: config.default_zoom,
            show_grid: config.show_grid,
            snap_to_grid: config.snap_to_grid,
        }
    }
}

/// Template designer session
#[derive(Debug, Clone)]
pub struct Designer {
    config: DesignerConfig,
    settings: TemplateSettings,
    store: ElementStore,
    history: History,
    properties: PropertiesBinding,
    toolbar: Toolbar,
    events: Vec<DesignerEvent>,
    modified: bool,
}

impl Default for Designer {
    fn default() -> Self {
        Self::build(DesignerConfig::default())
    }
}

impl Designer {
    /// Start a fresh session
    pub fn new(config: DesignerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Start a session hydrated from an existing template
    pub fn with_template(config: DesignerConfig, template: &Template) -> Result<Self> {
        let mut designer = Self::new(config)?;
        designer.load(template);
        Ok(designer)
    }

    fn build(config: DesignerConfig) -> Self {
        let mut designer = Self {
            store: ElementStore::new(&config),
            history: History::new(config.history_limit),
            toolbar: Toolbar::from_config(&config),
            settings: TemplateSettings::new(),
            properties: PropertiesBinding::new(),
            events: Vec::new(),
            modified: false,
            config,
        };
        designer.history.reset(designer.store.elements());
        designer
    }

    /// Replace the session contents with a loaded template
    ///
    /// Nothing is selected afterwards and the history holds a single baseline.
    pub fn load(&mut self, template: &Template) {
        self.settings.load(template);
        self.store.load(&template.elements);
        self.history.reset(self.store.elements());
        self.properties.sync(None);
        self.modified = false;
        tracing::info!(
            code = %template.code,
            elements = template.elements.len(),
            "template loaded"
        );
    }

    fn drag_params(&self) -> DragParams {
        DragParams {
            zoom: self.toolbar.zoom,
            grid_size: self.config.grid_size,
            snap_enabled: self.toolbar.snap_to_grid,
            canvas: self.settings.canvas_size(),
            footprint: Size::new(self.config.element_width, self.config.element_height),
        }
    }

    /// Record a structural mutation
    fn commit(&mut self) {
        self.history.record(self.store.elements());
        self.modified = true;
    }

    fn sync_properties(&mut self) {
        self.properties.sync(self.store.selected());
    }

    fn restore(&mut self, elements: Vec<Element>) {
        self.store.replace_all(elements);
        self.properties.sync(None);
        self.modified = true;
    }

    // === Elements ===

    /// Add a new element and select it
    ///
    /// The initial position (explicit or auto-stacked) is snapped and kept
    /// inside the page like a dropped element.
    pub fn add_element(&mut self, mut defaults: NewElement) -> Element {
        let position = defaults
            .position
            .unwrap_or_else(|| self.store.next_stack_position());
        defaults.position = Some(geometry::place(position, &self.drag_params()));

        let element = self.store.add(defaults);
        self.commit();
        self.sync_properties();
        element
    }

    /// Select an element, or clear the selection with `None`
    pub fn select(&mut self, id: Option<ElementId>) -> Result<()> {
        self.store.select(id)?;
        self.sync_properties();
        Ok(())
    }

    /// Duplicate an element; the clone becomes the selection
    pub fn duplicate(&mut self, id: ElementId) -> Result<Element> {
        let clone = self.store.duplicate(id)?;
        self.commit();
        self.sync_properties();
        Ok(clone)
    }

    /// Duplicate the selected element, if any
    pub fn duplicate_selected(&mut self) -> Result<Option<Element>> {
        match self.store.selected_id() {
            Some(id) => self.duplicate(id).map(Some),
            None => Ok(None),
        }
    }

    /// Delete an element
    pub fn delete(&mut self, id: ElementId) -> Result<Element> {
        let removed = self.store.delete(id)?;
        self.commit();
        self.sync_properties();
        Ok(removed)
    }

    /// Delete the selected element, if any
    pub fn delete_selected(&mut self) -> Result<Option<Element>> {
        match self.store.selected_id() {
            Some(id) => self.delete(id).map(Some),
            None => Ok(None),
        }
    }

    /// Finish a drag of `id` by a screen-space delta
    ///
    /// Applies the delta at the current zoom, snaps when enabled, clamps to
    /// the page and records history. A drag that ends where it started
    /// records nothing, as does a non-finite delta.
    pub fn drag_end(&mut self, id: ElementId, screen_dx: f64, screen_dy: f64) -> Result<Point> {
        let current = self
            .store
            .get(id)
            .ok_or(DesignerError::ElementNotFound(id))?
            .position();
        if !(screen_dx.is_finite() && screen_dy.is_finite()) {
            tracing::debug!(temp_id = id, "ignoring non-finite drag delta");
            return Ok(current);
        }
        let resolved = geometry::resolve_drag(current, screen_dx, screen_dy, &self.drag_params());
        if resolved == current {
            return Ok(resolved);
        }

        self.store.set_position(id, resolved)?;
        self.commit();
        self.sync_properties();
        tracing::debug!(temp_id = id, x = resolved.x, y = resolved.y, "drag committed");
        Ok(resolved)
    }

    /// Apply a property form change to the selected element
    ///
    /// Returns whether the element changed (and history was recorded).
    pub fn update_properties(&mut self, patch: &PropertyPatch) -> bool {
        let changed = self.properties.apply(self.store.selected_mut(), patch);
        if changed {
            self.commit();
        }
        changed
    }

    // === Toolbar ===

    /// Undo the last structural mutation; always ends with nothing selected
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(elements) => {
                self.restore(elements);
                true
            }
            None => false,
        }
    }

    /// Redo the last undone mutation; always ends with nothing selected
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(elements) => {
                self.restore(elements);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn zoom(&self) -> u32 {
        self.toolbar.zoom
    }

    /// Set the zoom percentage, clamped to the configured range
    pub fn set_zoom(&mut self, zoom: u32) -> u32 {
        self.toolbar.zoom = geometry::clamp_zoom(zoom, self.config.min_zoom, self.config.max_zoom);
        self.toolbar.zoom
    }

    pub fn zoom_in(&mut self) -> u32 {
        self.set_zoom(self.toolbar.zoom.saturating_add(self.config.zoom_step))
    }

    pub fn zoom_out(&mut self) -> u32 {
        self.set_zoom(self.toolbar.zoom.saturating_sub(self.config.zoom_step))
    }

    pub fn reset_zoom(&mut self) -> u32 {
        self.set_zoom(self.config.default_zoom)
    }

    /// Zoom as a scale factor for the canvas presentation
    pub fn zoom_factor(&self) -> f64 {
        geometry::zoom_factor(self.toolbar.zoom)
    }

    pub fn toggle_grid(&mut self) -> bool {
        self.toolbar.show_grid = !self.toolbar.show_grid;
        self.toolbar.show_grid
    }

    pub fn toggle_snap(&mut self) -> bool {
        self.toolbar.snap_to_grid = !self.toolbar.snap_to_grid;
        self.toolbar.snap_to_grid
    }

    pub fn toolbar(&self) -> Toolbar {
        self.toolbar
    }

    // === Template settings ===

    pub fn set_name(&mut self, name: &str) {
        self.settings.set_name(name);
        self.modified = true;
    }

    pub fn set_code(&mut self, code: &str) {
        self.settings.set_code(code);
        self.modified = true;
    }

    /// Change the page size; elements outside the new page are left alone
    /// until their next drag
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.settings.set_page_size(page_size);
        self.modified = true;
    }

    pub fn set_content_type(&mut self, content_type: Option<&str>) {
        self.settings.set_content_type(content_type);
        self.modified = true;
    }

    pub fn set_content_types(&mut self, content_types: Vec<ContentType>) {
        self.settings.set_content_types(content_types);
    }

    pub fn add_filter(&mut self) {
        self.settings.add_filter();
        self.modified = true;
    }

    pub fn remove_filter(&mut self, index: usize) -> Option<QueryFilter> {
        let removed = self.settings.remove_filter(index);
        if removed.is_some() {
            self.modified = true;
        }
        removed
    }

    pub fn update_filter(&mut self, index: usize, field: &str, value: &str) -> bool {
        let updated = self.settings.update_filter(index, field, value);
        if updated {
            self.modified = true;
        }
        updated
    }

    pub fn settings(&self) -> &TemplateSettings {
        &self.settings
    }

    // === Save / cancel ===

    /// Template description of the current session (identities stripped)
    pub fn to_template(&self) -> Template {
        let mut template = self.settings.to_template();
        template.elements = self
            .store
            .iter()
            .map(Element::to_template_element)
            .collect();
        template
    }

    /// Check the save preconditions without emitting anything
    pub fn validate(&self) -> Result<()> {
        match self.to_template().validate() {
            Ok(()) => Ok(()),
            Err(TemplateError::Validation(errors)) => Err(DesignerError::Validation(errors)),
            Err(other) => Err(other.into()),
        }
    }

    /// Validate and emit the save payload
    ///
    /// On failure nothing is emitted and the session is unchanged. On success
    /// history and elements are left as they are.
    pub fn save(&mut self) -> Result<()> {
        if let Err(err) = self.validate() {
            tracing::warn!(error = %err, "save rejected");
            return Err(err);
        }

        let template = self.to_template();
        tracing::info!(
            code = %template.code,
            elements = template.elements.len(),
            "template saved"
        );
        self.events.push(DesignerEvent::Save(template));
        self.modified = false;
        Ok(())
    }

    /// Discard the session and emit a cancel signal
    ///
    /// The content-type lookup list survives; everything else starts over.
    pub fn cancel(&mut self) {
        let content_types = self.settings.content_types().to_vec();
        let events = std::mem::take(&mut self.events);

        *self = Self::build(self.config.clone());
        self.settings.set_content_types(content_types);
        self.events = events;
        self.events.push(DesignerEvent::Cancel);
        tracing::info!("designer cancelled");
    }

    /// Drain emitted events
    pub fn take_events(&mut self) -> Vec<DesignerEvent> {
        std::mem::take(&mut self.events)
    }

    // === Accessors ===

    pub fn state(&self) -> DesignerState {
        if self.store.selected().is_some() {
            DesignerState::Editing
        } else {
            DesignerState::Idle
        }
    }

    pub fn elements(&self) -> &[Element] {
        self.store.elements()
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.store.get(id)
    }

    pub fn selected(&self) -> Option<&Element> {
        self.store.selected()
    }

    /// Property panel values, `None` when nothing is selected
    pub fn form(&self) -> Option<&PropertyForm> {
        self.properties.form()
    }

    pub fn canvas_size(&self) -> Size {
        self.settings.canvas_size()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &DesignerConfig {
        &self.config
    }

    /// Whether there are edits since the last load or save
    pub fn is_modified(&self) -> bool {
        self.modified
    }
}
