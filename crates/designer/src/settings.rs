//! Template settings: page size, content type and query filters

use std::collections::BTreeMap;

use template::{filters_to_map, map_to_filters, ContentType, PageSize, QueryFilter, Size, Template};

/// Page configuration for the template being designed
///
/// The filter list is the editable form; `filter_map` is the serialized
/// field → value map sent on save and is rebuilt after every list edit.
#[derive(Debug, Clone, Default)]
pub struct TemplateSettings {
    name: String,
    code: String,
    page_size: PageSize,
    content_type: Option<String>,
    query_filters: Vec<QueryFilter>,
    filter_map: BTreeMap<String, String>,
    content_types: Vec<ContentType>,
}

impl TemplateSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrate from a loaded template
    ///
    /// The available content-type list is kept.
    pub fn load(&mut self, template: &Template) {
        self.name.clone_from(&template.name);
        self.code.clone_from(&template.code);
        self.page_size = template.page_size;
        self.content_type.clone_from(&template.content_type);
        self.query_filters = map_to_filters(&template.query_filters);
        self.reserialize();
    }

    fn reserialize(&mut self) {
        self.filter_map = filters_to_map(&self.query_filters);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn set_code(&mut self, code: &str) {
        self.code = code.to_string();
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Change the page size
    ///
    /// Existing elements are neither moved nor rescaled.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        tracing::debug!(%page_size, "page size changed");
        self.page_size = page_size;
    }

    /// Canvas width/height for the current page size
    pub fn canvas_size(&self) -> Size {
        self.page_size.dimensions()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Select a content type; always clears the query filters
    pub fn set_content_type(&mut self, content_type: Option<&str>) {
        tracing::debug!(content_type = ?content_type, "content type changed");
        self.content_type = content_type.map(str::to_string);
        self.query_filters.clear();
        self.reserialize();
    }

    /// Replace the content types offered by the metadata lookup
    pub fn set_content_types(&mut self, content_types: Vec<ContentType>) {
        self.content_types = content_types;
    }

    pub fn content_types(&self) -> &[ContentType] {
        &self.content_types
    }

    /// Label of the selected content type, if it is in the lookup list
    pub fn content_type_label(&self) -> Option<&str> {
        let id = self.content_type.as_deref()?;
        self.content_types
            .iter()
            .find(|ct| ct.id == id)
            .map(|ct| ct.label.as_str())
    }

    /// Append an empty filter row
    pub fn add_filter(&mut self) {
        self.query_filters.push(QueryFilter::default());
        self.reserialize();
    }

    /// Remove a filter row by position
    ///
    /// Returns the removed filter, or `None` for an out-of-range index.
    pub fn remove_filter(&mut self, index: usize) -> Option<QueryFilter> {
        if index >= self.query_filters.len() {
            tracing::debug!(index, "remove_filter index out of range");
            return None;
        }
        let removed = self.query_filters.remove(index);
        self.reserialize();
        Some(removed)
    }

    /// Edit a filter row in place; returns `false` for an out-of-range index
    pub fn update_filter(&mut self, index: usize, field: &str, value: &str) -> bool {
        let Some(filter) = self.query_filters.get_mut(index) else {
            tracing::debug!(index, "update_filter index out of range");
            return false;
        };
        filter.field = field.to_string();
        filter.value = value.to_string();
        self.reserialize();
        true
    }

    pub fn query_filters(&self) -> &[QueryFilter] {
        &self.query_filters
    }

    pub fn filter_map(&self) -> &BTreeMap<String, String> {
        &self.filter_map
    }

    /// Template description without elements
    pub fn to_template(&self) -> Template {
        Template {
            name: self.name.clone(),
            code: self.code.clone(),
            page_size: self.page_size,
            content_type: self.content_type.clone(),
            query_filters: self.filter_map.clone(),
            elements: Vec::new(),
        }
    }
}
