//! Event bus: buffered dispatch to pluggable sinks.
//!
//! Emitting only queues the event on an `mpsc` channel. Sinks see events
//! when the owner calls [`EventBus::flush`], typically once per frame.

use std::sync::mpsc;

use crate::events::FrameEvent;
use crate::sinks::EventSink;

/// Buffered event bus for frame telemetry.
pub struct EventBus {
    sender: mpsc::Sender<FrameEvent>,
    receiver: mpsc::Receiver<FrameEvent>,
    sinks: Vec<Box<dyn EventSink>>,
    /// Disabled bus drops events on emit.
    enabled: bool,
    /// Events dispatched since creation.
    dispatched: u64,
}

impl EventBus {
    /// Creates a bus with no sinks.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            sinks: Vec::new(),
            enabled: true,
            dispatched: 0,
        }
    }

    /// Registers a sink.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        tracing::debug!(sink = sink.name(), "Registered telemetry sink");
        self.sinks.push(sink);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Queues an event. No-op when the bus is disabled.
    pub fn emit(&self, event: FrameEvent) {
        if !self.enabled {
            return;
        }
        // The receiver lives as long as the bus, so send cannot fail here.
        let _ = self.sender.send(event);
    }

    /// Dispatches every queued event to every sink, in emission order.
    ///
    /// Returns the number of events dispatched.
    pub fn flush(&mut self) -> usize {
        let mut count = 0;
        while let Ok(event) = self.receiver.try_recv() {
            for sink in &mut self.sinks {
                sink.handle(&event);
            }
            count += 1;
        }
        self.dispatched += count as u64;
        count
    }

    /// Flushes pending events, then finalizes every sink.
    pub fn finalize(&mut self) {
        self.flush();
        for sink in &mut self.sinks {
            sink.finalize();
        }
        tracing::debug!(events = self.dispatched, "Telemetry finalized");
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Events dispatched since creation.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
