//! Unified error type for the pump simulator.
//!
//! Every validating operation (controller setters, command parsing, the
//! dispatcher) funnels into a single `Error` enum.  All variants are `Copy`
//! so a rejection can be handed back to the caller as a plain value and
//! re-issued commands never have to allocate.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level simulator error
// ---------------------------------------------------------------------------

/// Every fallible operation in the simulator funnels into this type.
///
/// A returned `Err` always means the controller state was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Target pump index is outside the registry.
    InvalidId,
    /// Flow speed outside `[-100, 100]`.
    OutOfRange,
    /// Operating mode is neither `sync` nor `async`.
    InvalidMode,
    /// Dispatcher symbol not recognised.
    UnknownCommand,
    /// The command value has the wrong type for its symbol
    /// (e.g. a number passed to `-s`).
    InvalidValue,
}

impl Error {
    /// Stable short tag, used when a harness wants a compact output alphabet.
    pub const fn kind(self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_id",
            Self::OutOfRange => "out_of_range",
            Self::InvalidMode => "invalid_mode",
            Self::UnknownCommand => "unknown_command",
            Self::InvalidValue => "invalid_value",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "Invalid pump id"),
            Self::OutOfRange => {
                write!(f, "flow speed must be an integer in the range from -100 to 100")
            }
            Self::InvalidMode => write!(f, "operating mode must be either \"async\" or \"sync\""),
            Self::UnknownCommand => write!(f, "Unknown command"),
            Self::InvalidValue => write!(f, "Invalid value for the selected command"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Simulator-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
