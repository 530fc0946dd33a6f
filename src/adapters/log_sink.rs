//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing simulation events to whatever logger
//! the host installed behind the `log` facade.

use log::{debug, info};

use crate::app::events::PumpEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`PumpEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &PumpEvent) {
        match event {
            PumpEvent::GroupRestarted { mask } => {
                info!("SYNC | group restarted | members=0b{:016b}", mask);
            }
            PumpEvent::GroupHalted { mask } => {
                info!("SYNC | group halted | members=0b{:016b}", mask);
            }
            PumpEvent::Filled { id } => info!("PUMP {} | full", id),
            PumpEvent::Emptied { id } => info!("PUMP {} | empty", id),
            PumpEvent::Ticked { tick } => debug!("TICK {}", tick),
        }
    }
}
