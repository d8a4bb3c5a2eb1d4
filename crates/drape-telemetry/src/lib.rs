//! # drape-telemetry
//!
//! Structured per-frame events (timing, self-collision contacts, strain
//! corrections, energy) dispatched through an [`EventBus`] to pluggable
//! sinks: an in-memory [`VecSink`](sinks::VecSink), a
//! [`TracingSink`](sinks::TracingSink) and a
//! [`JsonLinesSink`](sinks::JsonLinesSink).

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, FrameEvent};
pub use sinks::EventSink;
