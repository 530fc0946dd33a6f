//! Outbound simulation events.
//!
//! The [`PumpsController`](super::controller::PumpsController) emits these
//! through the [`EventSink`](super::ports::EventSink) port while it runs a
//! tick.  Adapters on the other side decide what to do with them: log
//! them, record them for a test, feed them to a learning harness, etc.

use super::sync::SyncMask;

/// Structured events emitted by the simulation core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpEvent {
    /// The synced group was collectively empty or full and was restarted.
    GroupRestarted { mask: SyncMask },

    /// A running pump reached the full boundary this tick.
    Filled { id: usize },

    /// A running pump reached the empty boundary this tick.
    Emptied { id: usize },

    /// A synced pump ran dry and the whole group was stopped.
    GroupHalted { mask: SyncMask },

    /// Tick finished (carries the new tick count).
    Ticked { tick: u64 },
}
