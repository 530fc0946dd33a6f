//! Simulated transfer pump.
//!
//! A pump is a bounded tank driven by a signed flow rate.  It has no
//! behaviour of its own: the [`PumpsController`](crate::app::controller::PumpsController)
//! decides when it runs and when its direction flips; this driver only
//! guards the range invariants on every write.
//!
//! ## Invariants
//!
//! - `0 <= current_volume <= 100`
//! - `-100 <= flow_speed <= 100`, sign = direction (positive fills).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Volume of a completely drained pump.
pub const VOLUME_EMPTY: u8 = 0;
/// Volume of a completely filled pump.
pub const VOLUME_FULL: u8 = 100;
/// Largest accepted flow magnitude, in either direction.
pub const FLOW_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Fill,
    Drain,
}

/// State-machine view of a single pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PumpPhase {
    Stopped,
    Full,
    Empty,
    Filling,
    Draining,
    /// Running with zero flow somewhere between the bounds.
    Holding,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pump {
    status: bool,
    current_volume: u8,
    flow_speed: i8,
}

impl Pump {
    /// Stopped, empty, zero flow.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> bool {
        self.status
    }

    pub fn current_volume(&self) -> u8 {
        self.current_volume
    }

    pub fn flow_speed(&self) -> i8 {
        self.flow_speed
    }

    pub fn direction(&self) -> Option<Direction> {
        match self.flow_speed {
            0 => None,
            s if s > 0 => Some(Direction::Fill),
            _ => Some(Direction::Drain),
        }
    }

    pub fn phase(&self) -> PumpPhase {
        if !self.status {
            return PumpPhase::Stopped;
        }
        match (self.current_volume, self.direction()) {
            (VOLUME_FULL, _) => PumpPhase::Full,
            (VOLUME_EMPTY, _) => PumpPhase::Empty,
            (_, Some(Direction::Fill)) => PumpPhase::Filling,
            (_, Some(Direction::Drain)) => PumpPhase::Draining,
            (_, None) => PumpPhase::Holding,
        }
    }

    pub(crate) fn set_status(&mut self, running: bool) {
        self.status = running;
    }

    /// Reject anything outside `[-FLOW_LIMIT, FLOW_LIMIT]`; state is
    /// untouched on error.
    pub(crate) fn set_flow_speed(&mut self, speed: i64) -> Result<()> {
        if !(-FLOW_LIMIT..=FLOW_LIMIT).contains(&speed) {
            return Err(Error::OutOfRange);
        }
        self.flow_speed = speed as i8;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn set_current_volume(&mut self, volume: i64) -> Result<()> {
        if !(i64::from(VOLUME_EMPTY)..=i64::from(VOLUME_FULL)).contains(&volume) {
            return Err(Error::OutOfRange);
        }
        self.current_volume = volume as u8;
        Ok(())
    }

    /// Apply one tick of flow and return the clamped volume.
    pub(crate) fn advance(&mut self) -> u8 {
        let raw = i16::from(self.current_volume) + i16::from(self.flow_speed);
        let next = raw.clamp(i16::from(VOLUME_EMPTY), i16::from(VOLUME_FULL)) as u8;
        self.current_volume = next;
        next
    }

    /// Full boundary: direction normalised to non-negative, never reversed.
    pub(crate) fn normalize_at_full(&mut self) {
        self.flow_speed = self.flow_speed.abs();
    }

    /// Empty boundary: direction inverted so the next run refills.
    pub(crate) fn invert_at_empty(&mut self) {
        self.flow_speed = -self.flow_speed;
    }
}
