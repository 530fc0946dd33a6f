//! Inbound commands to the pump controller.
//!
//! The external surface speaks in `(pump_id, symbol, value)` triples:
//!
//! | symbol | meaning             | value               |
//! |--------|---------------------|---------------------|
//! | `-m`   | set operating mode  | text `sync`/`async` |
//! | `-f`   | set flow speed      | integer             |
//! | `-s`   | set status          | boolean             |
//!
//! [`PumpCommand`] is the typed form the dispatcher applies;
//! [`CommandLine`] parses one `"<id> <symbol> <value>"` line of console text.

use core::fmt;
use core::str::FromStr;

use crate::error::{Error, Result};

use super::sync::OperatingMode;

pub const SYMBOL_MODE: &str = "-m";
pub const SYMBOL_FLOW: &str = "-f";
pub const SYMBOL_STATUS: &str = "-s";

/// Loosely typed command argument as it arrives from a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandValue {
    Text(String),
    Int(i64),
    Bool(bool),
}

impl CommandValue {
    /// `true`/`false` become booleans, integers become `Int`, anything
    /// else is kept as text.
    pub fn parse_token(token: &str) -> Self {
        match token {
            "true" => Self::Bool(true),
            "false" => Self::Bool(false),
            _ => token
                .parse::<i64>()
                .map_or_else(|_| Self::Text(token.to_owned()), Self::Int),
        }
    }
}

impl From<i64> for CommandValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for CommandValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for CommandValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl fmt::Display for CommandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Int(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

/// Typed controller command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpCommand {
    /// Join (`Sync`) or leave (`Async`) the synchronised group.
    SetMode(OperatingMode),
    /// Range is checked by the controller, not here.
    SetFlow(i64),
    SetStatus(bool),
}

impl PumpCommand {
    /// Resolve a symbol and its raw value.
    ///
    /// Unknown symbols give [`Error::UnknownCommand`]; a value of the wrong
    /// shape gives [`Error::InvalidMode`] for `-m` and
    /// [`Error::InvalidValue`] otherwise.
    pub fn from_parts(symbol: &str, value: &CommandValue) -> Result<Self> {
        match (symbol, value) {
            (SYMBOL_MODE, CommandValue::Text(text)) => Ok(Self::SetMode(text.parse()?)),
            (SYMBOL_MODE, _) => Err(Error::InvalidMode),
            (SYMBOL_FLOW, CommandValue::Int(speed)) => Ok(Self::SetFlow(*speed)),
            (SYMBOL_STATUS, CommandValue::Bool(on)) => Ok(Self::SetStatus(*on)),
            (SYMBOL_FLOW | SYMBOL_STATUS, _) => Err(Error::InvalidValue),
            _ => Err(Error::UnknownCommand),
        }
    }

    /// Success message reported back to the caller.
    pub const fn ack(self) -> &'static str {
        match self {
            Self::SetMode(_) => "Operating mode successfully changed",
            Self::SetFlow(_) => "Flow speed successfully changed",
            Self::SetStatus(_) => "Pump status successfully changed",
        }
    }
}

/// One `"<id> <symbol> <value>"` console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub id: i64,
    pub symbol: String,
    pub value: CommandValue,
}

impl FromStr for CommandLine {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut tokens = line.split_whitespace();
        let (Some(id), Some(symbol), Some(value), None) =
            (tokens.next(), tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(Error::InvalidValue);
        };
        let id = id.parse::<i64>().map_err(|_| Error::InvalidId)?;
        Ok(Self {
            id,
            symbol: symbol.to_owned(),
            value: CommandValue::parse_token(value),
        })
    }
}
