use crate::event::{EventHandler, FormEvent};
use parking_lot::Mutex;
use std::sync::Arc;

/// Collects every event it sees. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<FormEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far
    pub fn events(&self) -> Vec<FormEvent> {
        self.events.lock().clone()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl EventHandler for EventLog {
    fn handle_event(&mut self, event: &FormEvent) {
        self.events.lock().push(event.clone());
    }
}
