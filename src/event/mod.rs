mod bus;
mod events;
mod handlers;

pub use bus::EventBus;
pub use events::FormEvent;
pub use handlers::EventLog;

pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &FormEvent);
}
