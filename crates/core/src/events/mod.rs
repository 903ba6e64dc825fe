//! Domain events module.
//!
//! Event types and the sink trait for notifying the outside world
//! after domain state changes. Frontends implement the sink to push
//! events into their own update mechanism.

mod domain_event;
mod sink;

pub use domain_event::*;
pub use sink::*;
