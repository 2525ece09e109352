// events/bus/mod.rs
//
// Event bus module. The EventHandler type alias stays internal.

pub mod event_bus;

pub use event_bus::{EventBus, EventLogEntry};
