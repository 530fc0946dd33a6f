//! Pump registry and tick engine — the simulation core.
//!
//! [`PumpsController`] owns a fixed-size pump registry and the
//! synchronisation registry.  It exposes validating setters, read-only
//! queries and a caller-driven step function.  Nothing runs in the
//! background: simulated time only moves when the host calls
//! [`update`](PumpsController::update) or [`tick`](PumpsController::tick).
//!
//! ```text
//!  dispatch ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!               │     PumpsController      │
//!  update() ──▶ │  pumps[] · SyncRegistry  │ ──▶ snapshot / sync_ids
//!               └──────────────────────────┘
//! ```
//!
//! ## Tick order
//!
//! 1. **Group restart.**  If the synced group is non-empty and every member
//!    sits at volume 0, or every member sits at volume 100, all members are
//!    switched on.
//! 2. **Advance.**  Running pumps are stepped in ascending id order; the new
//!    volume is clamped to `[0, 100]`.
//!    - Full: flow becomes `|flow|`.  A synced pump stops *on its own*.
//!    - Empty: flow is negated.  A synced pump stops *the whole group*,
//!      including members later in the iteration, which then skip this tick.
//!
//! The two boundaries are deliberately not mirror images of each other;
//! learned models of this controller depend on the exact behaviour.

use heapless::Vec;
use log::{debug, info};
use serde::Serialize;

use crate::config::{ConfigError, DEFAULT_PUMP_COUNT, MAX_PUMPS, SimConfig};
use crate::drivers::pump::{Pump, VOLUME_EMPTY, VOLUME_FULL};
use crate::error::{Error, Result};

use super::events::PumpEvent;
use super::ports::{EventSink, NullSink};
use super::sync::{OperatingMode, SyncRegistry};

/// Ordered list of pump ids.
pub type PumpIds = Vec<usize, MAX_PUMPS>;

/// Read-only copy of every pump, in registry order.
pub type Snapshot = Vec<PumpSnapshot, MAX_PUMPS>;

/// Point-in-time view of one pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PumpSnapshot {
    pub id: usize,
    pub status: bool,
    pub flow_speed: i8,
    pub current_volume: u8,
}

/// Everything a learner can observe between two commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObservedState {
    pub pumps: Snapshot,
    pub sync_ids: PumpIds,
}

// ───────────────────────────────────────────────────────────────
// PumpsController
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PumpsController {
    pumps: Vec<Pump, MAX_PUMPS>,
    synced: SyncRegistry,
    tick_count: u64,
}

impl Default for PumpsController {
    fn default() -> Self {
        Self::build(DEFAULT_PUMP_COUNT)
    }
}

impl PumpsController {
    /// Construct from configuration: every pump stopped, empty, zero flow,
    /// and an empty sync group.
    pub fn new(config: &SimConfig) -> core::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config.pump_count))
    }

    /// Shorthand for a registry of `count` pumps with otherwise default config.
    pub fn with_pumps(count: usize) -> core::result::Result<Self, ConfigError> {
        Self::new(&SimConfig {
            pump_count: count,
            ..SimConfig::default()
        })
    }

    /// `count` must already be validated against `MAX_PUMPS`.
    fn build(count: usize) -> Self {
        let mut pumps = Vec::new();
        for _ in 0..count {
            if pumps.push(Pump::new()).is_err() {
                break;
            }
        }
        debug!("PumpsController built with {} pumps", pumps.len());
        Self {
            pumps,
            synced: SyncRegistry::new(),
            tick_count: 0,
        }
    }

    // ── Mutators ──────────────────────────────────────────────

    /// Set a pump's flow speed.  Rejects anything outside `[-100, 100]`
    /// with [`Error::OutOfRange`]; volume and status are never touched.
    pub fn set_flow_speed(&mut self, id: usize, speed: i64) -> Result<()> {
        self.pump_mut(id)?.set_flow_speed(speed)?;
        debug!("pump {} flow_speed={}", id, speed);
        Ok(())
    }

    /// Switch a pump on or off unconditionally.
    pub fn set_status(&mut self, id: usize, running: bool) -> Result<()> {
        self.pump_mut(id)?.set_status(running);
        debug!("pump {} status={}", id, running);
        Ok(())
    }

    /// `Sync` joins the synchronised group, `Async` leaves it (no-op when
    /// the pump was not a member).  Parse free-form text with
    /// `str::parse::<OperatingMode>()`, which yields [`Error::InvalidMode`].
    pub fn set_operating_mode(&mut self, id: usize, mode: OperatingMode) -> Result<()> {
        self.pump(id).ok_or(Error::InvalidId)?;
        if self.synced.apply(id, mode) {
            info!("pump {} -> {} (sync mask=0b{:016b})", id, mode.as_str(), self.synced.mask());
        }
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn pump_count(&self) -> usize {
        self.pumps.len()
    }

    pub fn pump(&self, id: usize) -> Option<&Pump> {
        self.pumps.get(id)
    }

    pub fn pumps(&self) -> &[Pump] {
        &self.pumps
    }

    /// Map an untrusted caller id onto a registry index.
    pub fn resolve_id(&self, id: i64) -> Option<usize> {
        usize::try_from(id).ok().filter(|&i| i < self.pumps.len())
    }

    /// Current synchronisation membership, ascending.
    pub fn sync_ids(&self) -> PumpIds {
        self.synced.iter().collect()
    }

    pub fn is_synced(&self, id: usize) -> bool {
        self.synced.contains(id)
    }

    pub fn operating_mode(&self, id: usize) -> Result<OperatingMode> {
        self.pump(id).ok_or(Error::InvalidId)?;
        Ok(self.synced.mode_of(id))
    }

    /// All valid indices, in registry order.
    pub fn pump_ids(&self) -> PumpIds {
        (0..self.pumps.len()).collect()
    }

    pub fn pump_snapshot(&self) -> Snapshot {
        self.pumps
            .iter()
            .enumerate()
            .map(|(id, p)| PumpSnapshot {
                id,
                status: p.status(),
                flow_speed: p.flow_speed(),
                current_volume: p.current_volume(),
            })
            .collect()
    }

    pub fn observe(&self) -> ObservedState {
        ObservedState {
            pumps: self.pump_snapshot(),
            sync_ids: self.sync_ids(),
        }
    }

    /// Observable state as JSON, e.g. for console output.
    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.observe())
    }

    /// Compact binary encoding of the observable state.  Equal states
    /// always encode to equal bytes.
    pub fn encode_state(&self) -> postcard::Result<std::vec::Vec<u8>> {
        postcard::to_allocvec(&self.observe())
    }

    /// Number of ticks run since construction.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Simulation ────────────────────────────────────────────

    /// Advance simulated time by one tick.
    pub fn update(&mut self) {
        self.tick(&mut NullSink);
    }

    /// Advance simulated time by one tick, reporting boundary events.
    pub fn tick(&mut self, sink: &mut impl EventSink) {
        let synced = self.synced;

        // 1. Group restart
        if !synced.is_empty()
            && (self.all_synced_at(VOLUME_EMPTY) || self.all_synced_at(VOLUME_FULL))
        {
            for id in synced.iter() {
                if let Some(pump) = self.pumps.get_mut(id) {
                    pump.set_status(true);
                }
            }
            info!("Sync group restarted (mask=0b{:016b})", synced.mask());
            sink.emit(&PumpEvent::GroupRestarted {
                mask: synced.mask(),
            });
        }

        // 2. Per-pump advance
        for id in 0..self.pumps.len() {
            let pump = &mut self.pumps[id];
            if !pump.status() {
                continue;
            }
            match pump.advance() {
                VOLUME_FULL => {
                    pump.normalize_at_full();
                    if synced.contains(id) {
                        pump.set_status(false);
                    }
                    sink.emit(&PumpEvent::Filled { id });
                }
                VOLUME_EMPTY => {
                    pump.invert_at_empty();
                    sink.emit(&PumpEvent::Emptied { id });
                    if synced.contains(id) {
                        self.halt_group(synced);
                        info!("Sync group halted by pump {} running dry", id);
                        sink.emit(&PumpEvent::GroupHalted {
                            mask: synced.mask(),
                        });
                    }
                }
                _ => {}
            }
        }

        self.tick_count += 1;
        sink.emit(&PumpEvent::Ticked {
            tick: self.tick_count,
        });
    }

    // ── Internal ──────────────────────────────────────────────

    fn pump_mut(&mut self, id: usize) -> Result<&mut Pump> {
        self.pumps.get_mut(id).ok_or(Error::InvalidId)
    }

    fn all_synced_at(&self, volume: u8) -> bool {
        self.synced
            .iter()
            .all(|id| self.pump(id).is_some_and(|p| p.current_volume() == volume))
    }

    fn halt_group(&mut self, synced: SyncRegistry) {
        for id in synced.iter() {
            if let Some(pump) = self.pumps.get_mut(id) {
                pump.set_status(false);
            }
        }
    }
}
