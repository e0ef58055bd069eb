//! Ordered element collection with a single selection

use template::TemplateElement;

use crate::config::DesignerConfig;
use crate::element::{Element, ElementId, NewElement};
use crate::geometry::Point;
use crate::{DesignerError, Result};

/// Element store
///
/// Owns the placed elements in insertion (= rendering) order. At most one
/// element has its `selected` flag set. The store does not record history;
/// the designer controller does that after each structural mutation.
#[derive(Debug, Clone)]
pub struct ElementStore {
    elements: Vec<Element>,
    next_id: ElementId,
    default_font_size: u32,
    stack_origin: Point,
    stack_spacing: f64,
    duplicate_offset: f64,
}

impl Default for ElementStore {
    fn default() -> Self {
        Self::new(&DesignerConfig::default())
    }
}

impl ElementStore {
    pub fn new(config: &DesignerConfig) -> Self {
        Self {
            elements: Vec::new(),
            next_id: 1,
            default_font_size: config.default_font_size,
            stack_origin: Point::new(config.stack_origin_x, config.stack_origin_y),
            stack_spacing: config.stack_spacing,
            duplicate_offset: config.duplicate_offset,
        }
    }

    fn allocate_id(&mut self) -> ElementId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.temp_id == id)
    }

    fn clear_selection(&mut self) {
        for element in &mut self.elements {
            element.selected = false;
        }
    }

    /// Position for the next auto-stacked element, below the existing ones
    pub fn next_stack_position(&self) -> Point {
        Point::new(
            self.stack_origin.x,
            self.stack_origin.y + self.stack_spacing * self.elements.len() as f64,
        )
    }

    /// Append a new element and select it
    pub fn add(&mut self, defaults: NewElement) -> Element {
        let position = defaults
            .position
            .unwrap_or_else(|| self.next_stack_position());
        let element = Element {
            id: None,
            temp_id: self.allocate_id(),
            x: position.x,
            y: position.y,
            text_content: defaults.text_content,
            is_dynamic: defaults.is_dynamic,
            font_size: defaults.font_size.unwrap_or(self.default_font_size),
            selected: true,
        };

        self.clear_selection();
        self.elements.push(element.clone());
        tracing::debug!(temp_id = element.temp_id, "element added");
        element
    }

    /// Select one element, or nothing for `None`
    ///
    /// An unknown id leaves the current selection untouched.
    pub fn select(&mut self, id: Option<ElementId>) -> Result<()> {
        let index = match id {
            Some(id) => Some(self.index_of(id).ok_or(DesignerError::ElementNotFound(id))?),
            None => None,
        };

        self.clear_selection();
        if let Some(index) = index {
            self.elements[index].selected = true;
        }
        Ok(())
    }

    /// Clone an element with a new identity, offset it, and select the clone
    pub fn duplicate(&mut self, id: ElementId) -> Result<Element> {
        let source = self.get(id).ok_or(DesignerError::ElementNotFound(id))?;
        let mut clone = source.clone();

        clone.id = None;
        clone.temp_id = self.allocate_id();
        clone.x += self.duplicate_offset;
        clone.y += self.duplicate_offset;
        clone.selected = true;

        self.clear_selection();
        self.elements.push(clone.clone());
        tracing::debug!(source = id, temp_id = clone.temp_id, "element duplicated");
        Ok(clone)
    }

    /// Remove an element by identity
    pub fn delete(&mut self, id: ElementId) -> Result<Element> {
        let index = self.index_of(id).ok_or(DesignerError::ElementNotFound(id))?;
        let removed = self.elements.remove(index);
        tracing::debug!(temp_id = id, was_selected = removed.selected, "element deleted");
        Ok(removed)
    }

    /// Move an element to a canvas-space position
    pub fn set_position(&mut self, id: ElementId, position: Point) -> Result<()> {
        let element = self.get_mut(id).ok_or(DesignerError::ElementNotFound(id))?;
        element.set_position(position);
        Ok(())
    }

    /// Replace the whole collection (undo/redo restore), clearing selection
    pub fn replace_all(&mut self, elements: Vec<Element>) {
        self.elements = elements;
        self.clear_selection();

        // Never hand out an id that is still in use
        if let Some(max) = self.elements.iter().map(|e| e.temp_id).max() {
            self.next_id = self.next_id.max(max + 1);
        }
    }

    /// Seed the store from loaded template elements with fresh temp ids
    pub fn load(&mut self, elements: &[TemplateElement]) {
        let loaded: Vec<Element> = elements
            .iter()
            .map(|source| {
                let temp_id = self.allocate_id();
                Element::from_template_element(source, temp_id)
            })
            .collect();
        self.elements = loaded;
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.temp_id == id)
    }

    pub(crate) fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.temp_id == id)
    }

    pub fn selected(&self) -> Option<&Element> {
        self.elements.iter().find(|e| e.selected)
    }

    pub(crate) fn selected_mut(&mut self) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.selected)
    }

    pub fn selected_id(&self) -> Option<ElementId> {
        self.selected().map(|e| e.temp_id)
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn selected_count(store: &ElementStore) -> usize {
        store.iter().filter(|e| e.selected).count()
    }

    #[test]
    fn test_add_stacks_and_selects() {
        let mut store = ElementStore::default();
        let first = store.add(NewElement::static_text("Title"));
        let second = store.add(NewElement::dynamic_field("user.email"));

        assert_eq!(first.position(), Point::new(100.0, 100.0));
        assert_eq!(second.position(), Point::new(100.0, 130.0));
        assert_eq!(second.font_size, 12);
        assert_ne!(first.temp_id, second.temp_id);
        assert_eq!(store.selected_id(), Some(second.temp_id));
        assert_eq!(selected_count(&store), 1);
    }

    #[test]
    fn test_add_with_explicit_position() {
        let mut store = ElementStore::default();
        let element = store.add(NewElement::static_text("x").at(5.0, 7.0).with_font_size(20));
        assert_eq!(element.position(), Point::new(5.0, 7.0));
        assert_eq!(element.font_size, 20);
    }

    #[test]
    fn test_select_is_exclusive_and_idempotent() {
        let mut store = ElementStore::default();
        let a = store.add(NewElement::static_text("a"));
        let b = store.add(NewElement::static_text("b"));

        store.select(Some(a.temp_id)).unwrap();
        store.select(Some(a.temp_id)).unwrap();
        assert_eq!(store.selected_id(), Some(a.temp_id));
        assert_eq!(selected_count(&store), 1);

        store.select(None).unwrap();
        assert_eq!(store.selected_id(), None);

        store.select(Some(b.temp_id)).unwrap();
        assert!(store.select(Some(999)).is_err());
        assert_eq!(store.selected_id(), Some(b.temp_id));
    }

    #[test]
    fn test_duplicate_offsets_and_selects_clone() {
        let mut store = ElementStore::default();
        let original = store.add(NewElement::static_text("Total").at(100.0, 100.0));
        let clone = store.duplicate(original.temp_id).unwrap();

        assert_eq!(clone.position(), Point::new(120.0, 120.0));
        assert_ne!(clone.temp_id, original.temp_id);
        assert_eq!(clone.text_content, "Total");

        let stored_original = store.get(original.temp_id).unwrap();
        assert_eq!(stored_original.position(), Point::new(100.0, 100.0));
        assert!(!stored_original.selected);
        assert_eq!(store.selected_id(), Some(clone.temp_id));
    }

    #[test]
    fn test_duplicate_drops_persisted_id() {
        let mut store = ElementStore::default();
        let mut loaded = TemplateElement::text("Header", 10.0, 10.0, 12);
        loaded.id = Some("55".to_string());
        store.load(&[loaded]);

        let source = store.elements()[0].temp_id;
        let clone = store.duplicate(source).unwrap();
        assert_eq!(clone.id, None);
        assert_eq!(store.get(source).unwrap().id.as_deref(), Some("55"));
    }

    #[test]
    fn test_delete_selected_clears_selection() {
        let mut store = ElementStore::default();
        let a = store.add(NewElement::static_text("a"));
        let b = store.add(NewElement::static_text("b"));

        store.delete(b.temp_id).unwrap();
        assert_eq!(store.selected_id(), None);
        assert_eq!(store.len(), 1);

        store.select(Some(a.temp_id)).unwrap();
        assert!(matches!(
            store.delete(b.temp_id),
            Err(DesignerError::ElementNotFound(_))
        ));
    }

    #[test]
    fn test_replace_all_keeps_ids_unique() {
        let mut store = ElementStore::default();
        let a = store.add(NewElement::static_text("a"));
        let snapshot = store.elements().to_vec();

        store.delete(a.temp_id).unwrap();
        store.replace_all(snapshot);
        assert_eq!(store.selected_id(), None);

        let b = store.add(NewElement::static_text("b"));
        assert_ne!(a.temp_id, b.temp_id);
    }

    #[test]
    fn test_load_assigns_fresh_ids_without_selection() {
        let mut store = ElementStore::default();
        store.load(&[
            TemplateElement::text("a", 1.0, 2.0, 12),
            TemplateElement::binding("b.c", 3.0, 4.0, 14),
        ]);

        assert_eq!(store.len(), 2);
        assert_ne!(store.elements()[0].temp_id, store.elements()[1].temp_id);
        assert_eq!(store.selected(), None);
        assert!(store.elements()[1].is_dynamic);
    }
}
