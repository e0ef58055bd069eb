//! Bounded snapshot history for undo/redo
//!
//! The history is a list of full element-collection snapshots plus a cursor
//! pointing at the snapshot that matches the live store. Recording truncates
//! any redo-able future before appending. Once the list exceeds its limit the
//! oldest snapshot is dropped, so the history behaves as a sliding window.

use crate::element::Element;

/// Immutable deep copy of the element collection with selection stripped
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    elements: Vec<Element>,
}

impl Snapshot {
    pub fn capture(elements: &[Element]) -> Self {
        let elements = elements
            .iter()
            .cloned()
            .map(|mut e| {
                e.selected = false;
                e
            })
            .collect();
        Self { elements }
    }

    /// Fresh copy for restoring into the store
    pub fn restore(&self) -> Vec<Element> {
        self.elements.clone()
    }

    /// Whether the live collection matches this snapshot, ignoring selection
    pub fn matches(&self, elements: &[Element]) -> bool {
        self.elements.len() == elements.len()
            && self
                .elements
                .iter()
                .zip(elements)
                .all(|(a, b)| a.same_content(b))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Undo/redo manager
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Snapshot>,
    cursor: usize,
    limit: usize,
}

impl History {
    /// Create an empty history keeping at most `limit` snapshots
    pub fn new(limit: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            cursor: 0,
            limit: limit.max(1),
        }
    }

    /// Record the current collection as the newest snapshot
    pub fn record(&mut self, elements: &[Element]) {
        if !self.snapshots.is_empty() {
            self.snapshots.truncate(self.cursor + 1);
        }
        self.snapshots.push(Snapshot::capture(elements));

        if self.snapshots.len() > self.limit {
            self.snapshots.remove(0);
        }
        self.cursor = self.snapshots.len() - 1;

        tracing::debug!(
            cursor = self.cursor,
            len = self.snapshots.len(),
            "history recorded"
        );
    }

    /// Step back; returns the collection to restore, or `None` at the start
    pub fn undo(&mut self) -> Option<Vec<Element>> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        tracing::debug!(cursor = self.cursor, "undo");
        Some(self.snapshots[self.cursor].restore())
    }

    /// Step forward; returns the collection to restore, or `None` at the end
    pub fn redo(&mut self) -> Option<Vec<Element>> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        tracing::debug!(cursor = self.cursor, "redo");
        Some(self.snapshots[self.cursor].restore())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Drop everything and start over from a single baseline snapshot
    pub fn reset(&mut self, baseline: &[Element]) {
        self.snapshots.clear();
        self.cursor = 0;
        self.record(baseline);
    }

    /// Snapshot the live store should currently match
    pub fn current(&self) -> Option<&Snapshot> {
        self.snapshots.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn element(temp_id: u64, selected: bool) -> Element {
        Element {
            id: None,
            temp_id,
            x: 100.0,
            y: 100.0 + temp_id as f64,
            text_content: format!("e{}", temp_id),
            is_dynamic: false,
            font_size: 12,
            selected,
        }
    }

    fn collection(n: u64) -> Vec<Element> {
        (1..=n).map(|i| element(i, i == n)).collect()
    }

    #[test]
    fn test_empty_history() {
        let mut history = History::new(50);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), None);
        assert!(history.current().is_none());
    }

    #[test]
    fn test_snapshot_strips_selection() {
        let snapshot = Snapshot::capture(&[element(1, true)]);
        assert!(snapshot.restore().iter().all(|e| !e.selected));
        assert!(snapshot.matches(&[element(1, true)]));
    }

    #[test]
    fn test_snapshot_is_a_deep_copy() {
        let mut live = collection(2);
        let snapshot = Snapshot::capture(&live);
        live[0].x = 999.0;
        assert_eq!(snapshot.restore()[0].x, 100.0);
    }

    #[test]
    fn test_undo_redo_walk() {
        let mut history = History::new(50);
        for n in 0..=3 {
            history.record(&collection(n));
        }
        assert_eq!(history.len(), 4);
        assert_eq!(history.cursor(), 3);

        assert_eq!(history.undo().unwrap().len(), 2);
        assert_eq!(history.undo().unwrap().len(), 1);
        assert!(history.can_redo());
        assert_eq!(history.redo().unwrap().len(), 2);
        assert!(history.current().unwrap().matches(&collection(2)));
    }

    #[test]
    fn test_record_truncates_redo() {
        let mut history = History::new(50);
        history.record(&collection(0));
        history.record(&collection(1));
        history.record(&collection(2));
        history.undo();
        assert!(history.can_redo());

        history.record(&collection(3));
        assert!(!history.can_redo());
        assert_eq!(history.len(), 3);
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn test_limit_slides_window() {
        let mut history = History::new(50);
        for n in 0..60 {
            history.record(&collection(n));
        }
        assert_eq!(history.len(), 50);
        assert_eq!(history.cursor(), 49);

        let mut oldest = None;
        while let Some(restored) = history.undo() {
            oldest = Some(restored.len());
        }
        // Snapshots 10..=59 survive
        assert_eq!(oldest, Some(10));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_reset_keeps_single_baseline() {
        let mut history = History::new(5);
        history.record(&collection(1));
        history.record(&collection(2));
        history.reset(&collection(0));
        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
