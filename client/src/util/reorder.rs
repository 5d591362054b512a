//! Headless drag-to-reorder model behind the album table.
//!
//! DESIGN
//! ======
//! Gesture recognition and ordering rules are kept apart. The component feeds
//! raw HTML5 drag signals (`dragstart`, `dragover`, `drop`, `dragend`) into a
//! `DragSession`, which turns them into a single `DragEnd`. `ReorderableList`
//! applies that `DragEnd` to its `Ordering` and notifies the owner with the
//! complete new sequence. Nothing here touches the DOM, so the permutation
//! rules are testable as plain data.
//!
//! INVARIANTS
//! ==========
//! - An `Ordering` never holds two records with the same key.
//! - A committed move is a permutation: length and key multiset are conserved,
//!   and every record other than the moved one keeps its relative order.

#[cfg(test)]
#[path = "reorder_test.rs"]
mod reorder_test;

use std::collections::HashSet;

/// A record with a stable identity used as its drag/drop key.
pub trait Keyed {
    fn key(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderingError {
    #[error("duplicate record key: {0}")]
    DuplicateKey(String),
}

/// Reasons a finished drag leaves the ordering untouched.
///
/// These are expected outcomes of normal gestures, not failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropRejected {
    /// `dragend` arrived without a drag in progress.
    NotDragging,
    /// The record was released outside every row of the drop zone.
    OutsideZone,
    /// The record was released back onto its own slot.
    SameSlot,
    /// An index does not address a record in the current ordering.
    OutOfRange { index: usize, len: usize },
}

/// Outcome of one drag gesture: where it started and where it was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragEnd {
    pub source: usize,
    pub destination: Option<usize>,
}

// =============================================================================
// ORDERING
// =============================================================================

/// Ordered, key-unique sequence of records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering<R> {
    records: Vec<R>,
}

impl<R> Default for Ordering<R> {
    fn default() -> Self {
        Self { records: Vec::new() }
    }
}

impl<R: Keyed> Ordering<R> {
    /// Build an ordering, rejecting sequences that repeat a key.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::DuplicateKey`] naming the first repeated key.
    pub fn new(records: Vec<R>) -> Result<Self, OrderingError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.key()) {
                return Err(OrderingError::DuplicateKey(record.key().to_owned()));
            }
        }
        Ok(Self { records })
    }
}

impl<R> Ordering<R> {
    #[must_use]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Apply a finished drag to this ordering.
    ///
    /// # Errors
    ///
    /// Returns a [`DropRejected`] reason when the drag must not change the
    /// ordering; the ordering is left exactly as it was.
    pub fn apply(&mut self, drag: DragEnd) -> Result<(), DropRejected> {
        let destination = drag.destination.ok_or(DropRejected::OutsideZone)?;
        let len = self.records.len();
        for index in [drag.source, destination] {
            if index >= len {
                return Err(DropRejected::OutOfRange { index, len });
            }
        }
        if destination == drag.source {
            return Err(DropRejected::SameSlot);
        }
        move_record(&mut self.records, drag.source, destination);
        Ok(())
    }
}

/// Move the record at `from` to `to`, shifting the records in between by one.
///
/// Both indices must be in bounds.
pub fn move_record<R>(records: &mut [R], from: usize, to: usize) {
    if from < to {
        records[from..=to].rotate_left(1);
    } else if to < from {
        records[to..=from].rotate_right(1);
    }
}

// =============================================================================
// DRAG SESSION
// =============================================================================

/// Tracks one in-flight drag gesture across the HTML5 drag event sequence.
///
/// Browsers fire `drop` on the target row before `dragend` on the source row,
/// and never fire `drop` when the release lands outside a drop target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragSession {
    source: Option<usize>,
    over: Option<usize>,
    dropped: Option<usize>,
}

impl DragSession {
    pub fn start(&mut self, index: usize) {
        *self = Self { source: Some(index), over: None, dropped: None };
    }

    /// Record the row currently under the pointer (used for highlighting).
    pub fn hover(&mut self, index: usize) {
        if self.source.is_some() {
            self.over = Some(index);
        }
    }

    /// Forget the hovered row once the pointer leaves it.
    pub fn leave(&mut self, index: usize) {
        if self.over == Some(index) {
            self.over = None;
        }
    }

    /// Record a release over a row of the drop zone.
    pub fn drop_on(&mut self, index: usize) {
        if self.source.is_some() {
            self.dropped = Some(index);
        }
    }

    /// Close the gesture, returning its outcome if one was in progress.
    pub fn finish(&mut self) -> Option<DragEnd> {
        let source = self.source?;
        let end = DragEnd { source, destination: self.dropped };
        *self = Self::default();
        Some(end)
    }

    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn source(&self) -> Option<usize> {
        self.source
    }

    #[must_use]
    pub fn over(&self) -> Option<usize> {
        self.over
    }
}

// =============================================================================
// REORDERABLE LIST
// =============================================================================

/// Local reorder state for a list whose owner wants every committed order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReorderableList<R> {
    ordering: Ordering<R>,
    session: DragSession,
}

impl<R: Clone> ReorderableList<R> {
    #[must_use]
    pub fn new(ordering: Ordering<R>) -> Self {
        Self { ordering, session: DragSession::default() }
    }

    /// Replace the ordering with a fresh one from the owner.
    ///
    /// Any drag in flight refers to old indices and is abandoned.
    pub fn reseed(&mut self, ordering: Ordering<R>) {
        self.ordering = ordering;
        self.session.cancel();
    }

    #[must_use]
    pub fn records(&self) -> &[R] {
        self.ordering.records()
    }

    #[must_use]
    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn drag_start(&mut self, index: usize) {
        self.session.start(index);
    }

    pub fn drag_over(&mut self, index: usize) {
        self.session.hover(index);
    }

    pub fn drag_leave(&mut self, index: usize) {
        self.session.leave(index);
    }

    pub fn drop_on(&mut self, index: usize) {
        self.session.drop_on(index);
    }

    /// Finish the in-flight drag and commit it.
    ///
    /// # Errors
    ///
    /// Returns [`DropRejected::NotDragging`] when no drag was started, or the
    /// rejection reported by [`Self::apply_drag_end`].
    pub fn finish_drag<F>(&mut self, on_reorder: F) -> Result<(), DropRejected>
    where
        F: FnOnce(Vec<R>),
    {
        let end = self.session.finish().ok_or(DropRejected::NotDragging)?;
        self.apply_drag_end(end, on_reorder)
    }

    /// Commit a drag outcome. `on_reorder` runs exactly once, with the complete
    /// new ordering, when the ordering actually changed.
    ///
    /// # Errors
    ///
    /// Returns the [`DropRejected`] reason when the ordering is unchanged; the
    /// callback is not invoked in that case.
    pub fn apply_drag_end<F>(&mut self, end: DragEnd, on_reorder: F) -> Result<(), DropRejected>
    where
        F: FnOnce(Vec<R>),
    {
        self.ordering.apply(end)?;
        on_reorder(self.ordering.records().to_vec());
        Ok(())
    }
}
