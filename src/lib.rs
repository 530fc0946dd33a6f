//! PumpSim library.
//!
//! A synchronised multi-pump flow-control simulator.  External drivers
//! (automata learners, test harnesses, consoles) issue symbolic commands,
//! step simulated time explicitly with `update()`, and read the observable
//! state back between commands.  Nothing in here owns a thread, a timer or
//! a transport.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod sul;

pub use app::commands::{CommandLine, CommandValue, PumpCommand};
pub use app::controller::{PumpSnapshot, PumpsController};
pub use app::dispatch::{dispatch, dispatch_line, respond};
pub use app::sync::OperatingMode;
pub use config::SimConfig;
pub use error::{Error, Result};
