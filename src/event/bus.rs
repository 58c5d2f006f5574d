use crate::event::{EventHandler, FormEvent};
use std::cell::RefCell;

/// Delivers every [`FormEvent`] to the subscribed handlers, in subscription
/// order.
///
/// A handler may subscribe further handlers while an event is being
/// delivered. Those start receiving with the next event.
#[derive(Default)]
pub struct EventBus {
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handler_count()))
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.borrow_mut().push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn emit(&self, event: FormEvent) {
        // Dispatch without holding the borrow so handlers can subscribe
        let mut dispatching = self.handlers.take();
        for handler in &mut dispatching {
            handler.handle_event(&event);
        }

        let mut handlers = self.handlers.borrow_mut();
        let added = std::mem::replace(&mut *handlers, dispatching);
        handlers.extend(added);
    }
}
