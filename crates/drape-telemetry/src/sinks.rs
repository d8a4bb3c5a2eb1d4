//! Pluggable event sinks.

use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::events::FrameEvent;

/// Consumer of frame events.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &FrameEvent);

    /// Called once when the run ends.
    fn finalize(&mut self) {}

    /// Human-readable sink name.
    fn name(&self) -> &str;
}

/// Collects events into a buffer shared with the caller.
///
/// Clone the sink (or grab [`VecSink::buffer`]) before boxing it into the
/// bus to inspect events afterwards.
#[derive(Clone, Default)]
pub struct VecSink {
    events: Arc<Mutex<Vec<FrameEvent>>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the collected events.
    pub fn buffer(&self) -> Arc<Mutex<Vec<FrameEvent>>> {
        Arc::clone(&self.events)
    }

    /// Snapshot of the collected events.
    pub fn events(&self) -> Vec<FrameEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &FrameEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Logs every event through `tracing`.
pub struct TracingSink {
    level: tracing::Level,
}

impl TracingSink {
    pub fn new(level: tracing::Level) -> Self {
        Self { level }
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(tracing::Level::DEBUG)
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &FrameEvent) {
        let kind = event.kind_name();
        if self.level == tracing::Level::TRACE {
            tracing::trace!(frame = event.frame, kind, event = ?event.kind, "frame_event");
        } else if self.level == tracing::Level::DEBUG {
            tracing::debug!(frame = event.frame, kind, event = ?event.kind, "frame_event");
        } else {
            tracing::info!(frame = event.frame, kind, event = ?event.kind, "frame_event");
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}

/// Writes one JSON object per event, newline separated.
///
/// Write failures are logged and counted, never propagated into the
/// simulation loop.
pub struct JsonLinesSink<W: Write + Send> {
    writer: W,
    written: usize,
    failures: usize,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            written: 0,
            failures: 0,
        }
    }

    /// Lines successfully written.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Events that failed to serialize or write.
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, event: &FrameEvent) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")
    }
}

impl<W: Write + Send> EventSink for JsonLinesSink<W> {
    fn handle(&mut self, event: &FrameEvent) {
        match self.write_line(event) {
            Ok(()) => self.written += 1,
            Err(err) => {
                self.failures += 1;
                tracing::warn!(frame = event.frame, error = %err, "Failed to write frame event");
            }
        }
    }

    fn finalize(&mut self) {
        if let Err(err) = self.writer.flush() {
            tracing::warn!(error = %err, "Failed to flush event log");
        }
    }

    fn name(&self) -> &str {
        "json_lines_sink"
    }
}
