//! Port traits — the boundary between the simulation core and its hosts.
//!
//! ```text
//!   PumpsController ──▶ EventSink ──▶ Adapter (log, recorder, harness)
//! ```
//!
//! The controller consumes these via generics, so the core never knows
//! whether it is being driven by a test, a learner or a console.

use super::events::PumpEvent;

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: core → logging / observers)
// ───────────────────────────────────────────────────────────────

/// The core emits structured [`PumpEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &PumpEvent);
}

/// Sink that discards everything.  Used by the plain `update()` path.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &PumpEvent) {}
}
