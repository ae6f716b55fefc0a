//! Stroke history.
//!
//! Committed strokes in the order they were drawn. Undo pops the newest one
//! and the engine re-bakes the canvas from the background by replaying what
//! is left, so no pixel snapshots are kept. There is no redo: a popped
//! stroke is gone.

use ink_core::model::StrokeRecord;

#[derive(Debug, Clone, Default)]
pub struct History {
    strokes: Vec<StrokeRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a committed stroke.
    pub fn push(&mut self, stroke: StrokeRecord) {
        self.strokes.push(stroke);
    }

    /// Remove and return the newest stroke.
    pub fn pop(&mut self) -> Option<StrokeRecord> {
        self.strokes.pop()
    }

    pub fn last(&self) -> Option<&StrokeRecord> {
        self.strokes.last()
    }

    /// Strokes in insertion order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &StrokeRecord> {
        self.strokes.iter()
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}
