//! Recording event sink for integration tests.
//!
//! Keeps every emitted [`PumpEvent`] so tests can assert on the full event
//! history of a run.

use pumpsim::app::events::PumpEvent;
use pumpsim::app::ports::EventSink;

pub struct RecordingSink {
    pub events: Vec<PumpEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Events other than the per-tick heartbeat.
    pub fn boundary_events(&self) -> Vec<PumpEvent> {
        self.events
            .iter()
            .copied()
            .filter(|e| !matches!(e, PumpEvent::Ticked { .. }))
            .collect()
    }

    pub fn ticks(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, PumpEvent::Ticked { .. }))
            .count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &PumpEvent) {
        self.events.push(*event);
    }
}
