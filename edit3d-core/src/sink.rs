//! Where transforms and the undo stack report non-fatal conditions
use std::rc::Rc;

/// Receiver for user-facing warnings.
pub trait MessageSink {
    fn warn(&self, message: &str);
}

/// Forwards warnings to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl MessageSink for TracingSink {
    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

/// The sink used when a caller supplies none.
pub fn default_sink() -> Rc<dyn MessageSink> {
    Rc::new(TracingSink)
}
