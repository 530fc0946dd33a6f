//! Command dispatcher — maps `(pump_id, symbol, value)` onto controller calls.
//!
//! Every command passes through a three-step pipeline:
//!
//! 1. **Id gate** — an id outside the registry is rejected with
//!    [`Error::InvalidId`] before the controller is touched.
//! 2. **Decode** — symbol and value become a [`PumpCommand`].
//! 3. **Apply** — the controller validates and mutates, or rejects with no
//!    partial change.
//!
//! The dispatcher never advances simulated time; the host calls
//! `update()` at its own cadence.

use log::{debug, warn};

use crate::error::{Error, Result};

use super::commands::{CommandLine, CommandValue, PumpCommand};
use super::controller::PumpsController;

/// Dispatch one command.  `Ok` carries the success message; `Err` carries
/// the rejection, unchanged from the layer that raised it.
pub fn dispatch(
    system: &mut PumpsController,
    id: i64,
    symbol: &str,
    value: &CommandValue,
) -> Result<&'static str> {
    let Some(target) = system.resolve_id(id) else {
        warn!("Rejected {} {} {}: {}", id, symbol, value, Error::InvalidId);
        return Err(Error::InvalidId);
    };

    let outcome = PumpCommand::from_parts(symbol, value).and_then(|cmd| apply(system, target, cmd));
    match outcome {
        Ok(_) => debug!("pump {} {} {}: ok", target, symbol, value),
        Err(e) => warn!("Rejected {} {} {}: {}", target, symbol, value, e),
    }
    outcome
}

/// Apply an already decoded command to a resolved pump index.
pub fn apply(system: &mut PumpsController, id: usize, cmd: PumpCommand) -> Result<&'static str> {
    match cmd {
        PumpCommand::SetMode(mode) => system.set_operating_mode(id, mode)?,
        PumpCommand::SetFlow(speed) => system.set_flow_speed(id, speed)?,
        PumpCommand::SetStatus(on) => system.set_status(id, on)?,
    }
    Ok(cmd.ack())
}

/// Parse one `"<id> <symbol> <value>"` line and dispatch it.
pub fn dispatch_line(system: &mut PumpsController, line: &str) -> Result<&'static str> {
    let parsed = line.parse::<CommandLine>().inspect_err(|e| {
        warn!("Unparseable command line {:?}: {}", line, e);
    })?;
    dispatch(system, parsed.id, &parsed.symbol, &parsed.value)
}

/// Render a dispatch outcome as the response string a caller observes.
pub fn respond(outcome: &Result<&'static str>) -> String {
    match outcome {
        Ok(ack) => (*ack).to_owned(),
        Err(e) => e.to_string(),
    }
}
