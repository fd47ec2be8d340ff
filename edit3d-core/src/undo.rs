//! Linear undo history of inverse transforms
use std::collections::VecDeque;
use std::rc::Rc;

use tracing::debug;

use crate::error::Rejection;
use crate::sink::{default_sink, MessageSink};
use crate::transform::Transform;

/// Reported when `undo` is called with nothing to undo.
pub const EMPTY_HISTORY: &str = "No undo history available.";

/// Last-in-first-out stack of inverse transforms.
///
/// Entries are expected to come from [`Transform::make_inverse`]; the stack
/// applies whatever it is given.
pub struct UndoStack {
    history: VecDeque<Transform>,
    limit: Option<usize>,
    printout: Rc<dyn MessageSink>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self {
            history: VecDeque::new(),
            limit: None,
            printout: default_sink(),
        }
    }

    pub fn with_sink(mut self, printout: Rc<dyn MessageSink>) -> Self {
        self.printout = printout;
        self
    }

    /// Keep at most `limit` entries, discarding the oldest on overflow.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self.trim();
        self
    }

    /// Record an inverse. `None` (the inverse of a noop) is ignored.
    pub fn push(&mut self, inverse: Option<Transform>) {
        let Some(inverse) = inverse else {
            return;
        };
        debug!(op = %inverse.op(), depth = self.history.len() + 1, "recording undo entry");
        self.history.push_back(inverse);
        self.trim();
    }

    /// Apply `transform` and record its inverse.
    ///
    /// Nothing is recorded when the transform is a noop.
    pub fn execute(&mut self, transform: &Transform) -> Result<(), Rejection> {
        transform.apply()?;
        self.push(transform.make_inverse());
        Ok(())
    }

    /// Pop the newest entry and apply it.
    ///
    /// Returns true if an entry was applied. An empty history is reported
    /// through the sink.
    pub fn undo(&mut self) -> bool {
        let Some(inverse) = self.history.pop_back() else {
            self.printout.warn(EMPTY_HISTORY);
            return false;
        };
        debug!(
            op = %inverse.op(),
            remaining = self.history.len(),
            "undoing transform"
        );
        inverse.apply().is_ok()
    }

    pub fn clear(&mut self) {
        debug!(discarded = self.history.len(), "clearing undo history");
        self.history.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    fn trim(&mut self) {
        let Some(limit) = self.limit else {
            return;
        };
        while self.history.len() > limit {
            self.history.pop_front();
        }
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
