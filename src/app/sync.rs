//! Synchronisation registry.
//!
//! Membership is the only link between pumps.  The registry is a plain
//! bitmask indexed by pump id (bit `n` set = pump `n` is synced), the same
//! way fault flags are latched elsewhere in controller firmware.  Iteration
//! is always in ascending id order.
//!
//! The controller's operating mode for a pump is *derived* from this set:
//! there is no per-pump mode flag that could drift out of step with it.

use serde::{Deserialize, Serialize};

use crate::config::MAX_PUMPS;
use crate::error::Error;

/// Bitmask wide enough for every slot up to [`MAX_PUMPS`].
pub type SyncMask = u16;

const _: () = assert!(MAX_PUMPS <= SyncMask::BITS as usize);

/// Two-valued operating mode of a pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatingMode {
    Sync,
    Async,
}

impl OperatingMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sync => "sync",
            Self::Async => "async",
        }
    }
}

impl core::str::FromStr for OperatingMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sync" => Ok(Self::Sync),
            "async" => Ok(Self::Async),
            _ => Err(Error::InvalidMode),
        }
    }
}

/// Set of pump ids in the synchronised group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncRegistry {
    mask: SyncMask,
}

impl SyncRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caller guarantees `id < MAX_PUMPS`.
    fn bit(id: usize) -> SyncMask {
        debug_assert!(id < MAX_PUMPS, "sync id out of range: {id}");
        1 << id
    }

    /// Apply a mode change.  Returns `true` if membership changed.
    pub fn apply(&mut self, id: usize, mode: OperatingMode) -> bool {
        let before = self.mask;
        match mode {
            OperatingMode::Sync => self.mask |= Self::bit(id),
            OperatingMode::Async => self.mask &= !Self::bit(id),
        }
        before != self.mask
    }

    pub fn contains(&self, id: usize) -> bool {
        id < MAX_PUMPS && self.mask & Self::bit(id) != 0
    }

    pub fn mode_of(&self, id: usize) -> OperatingMode {
        if self.contains(id) {
            OperatingMode::Sync
        } else {
            OperatingMode::Async
        }
    }

    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    pub fn mask(&self) -> SyncMask {
        self.mask
    }

    /// Member ids, ascending.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..MAX_PUMPS).filter(move |&id| self.contains(id))
    }
}
