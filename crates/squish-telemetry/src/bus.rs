//! Event dispatch to registered sinks.
//!
//! Emission is synchronous and single-threaded: events come from the
//! frame loop between completed phases, never from inside the
//! cluster-parallel projection batches (worker threads only touch
//! particle data). `emit` therefore hands each event directly to
//! every registered sink, in registration order, with no queue in
//! between. A disabled bus drops events, so callers can leave
//! emission calls in place for non-verbose runs.

use crate::events::SimulationEvent;
use crate::sinks::EventSink;

/// Dispatches simulation events to registered sinks.
pub struct EventBus {
    sinks: Vec<Box<dyn EventSink>>,
    enabled: bool,
}

impl EventBus {
    /// Creates a bus with no sinks.
    pub fn new() -> Self {
        Self {
            sinks: Vec::new(),
            enabled: true,
        }
    }

    /// Registers a sink. Sinks receive events in registration order.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Enables or disables the bus. A disabled bus drops events.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns true if the bus is dispatching events.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Dispatches one event to every sink.
    pub fn emit(&mut self, event: SimulationEvent) {
        if !self.enabled {
            return;
        }
        for sink in &mut self.sinks {
            sink.handle(&event);
        }
    }

    /// Finalizes all sinks (log summaries, flush buffers). Skipped
    /// when the bus is disabled, like everything else.
    pub fn finalize(&mut self) {
        if !self.enabled {
            return;
        }
        for sink in &mut self.sinks {
            sink.finalize();
        }
    }

    /// Returns the number of registered sinks.
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
