//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod clock_port;
mod event_source_port;
mod event_write_port;

#[cfg(test)]
pub use clock_port::MockClockPort;
pub use clock_port::ClockPort;
#[cfg(test)]
pub use event_source_port::MockEventSourcePort;
pub use event_source_port::{EventSourceError, EventSourcePort};
#[cfg(test)]
pub use event_write_port::MockEventWritePort;
pub use event_write_port::{EventWritePort, UpdatedEvent};
