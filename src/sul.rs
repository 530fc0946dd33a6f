//! System-under-learning adapter.
//!
//! Wraps a [`PumpsController`] in the reset/step/observe contract an active
//! automata learner drives:
//!
//! ```text
//!   learner ── pre() ──▶ fresh controller
//!           ── step(letter) ──▶ dispatch(random pump, letter's value) ──▶ response
//!           ── post() ──▶ update()
//! ```
//!
//! Letters are abstract ("turn on", "change flow speed from 101 to inf");
//! the concrete pump id and value behind each letter are drawn from a
//! seeded ChaCha stream so a whole learning run can be replayed from
//! [`PumpsSystemSul::seed`].

use core::fmt;
use core::str::FromStr;

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::app::commands::{CommandValue, SYMBOL_FLOW, SYMBOL_MODE, SYMBOL_STATUS};
use crate::app::controller::PumpsController;
use crate::app::dispatch::{dispatch, respond};
use crate::config::{ConfigError, SimConfig};
use crate::error::Error;

/// Reset/step contract of an active learner.
pub trait Sul {
    type Input;
    type Output;

    /// Bring the system back to its initial state.
    fn pre(&mut self);

    /// Feed one input and observe the output.
    fn step(&mut self, input: &Self::Input) -> Self::Output;

    /// Called once after the last step of a query.
    fn post(&mut self);

    /// Run one membership query: `pre`, every step, `post`.
    fn query(&mut self, word: &[Self::Input]) -> Vec<Self::Output> {
        self.pre();
        let outputs = word.iter().map(|input| self.step(input)).collect();
        self.post();
        outputs
    }
}

// ───────────────────────────────────────────────────────────────
// Input alphabet
// ───────────────────────────────────────────────────────────────

/// The abstract input alphabet of the pump transfer system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSymbol {
    /// Flow speed in `1..=100`.
    FlowPositive,
    /// Flow speed in `-100..=-1`.
    FlowNegative,
    /// Flow speed in `101..=1000`, always rejected.
    FlowTooHigh,
    /// Flow speed in `-1000..=-101`, always rejected.
    FlowTooLow,
    FlowZero,
    ModeSync,
    ModeAsync,
    TurnOn,
    TurnOff,
}

impl InputSymbol {
    pub const ALL: [Self; 9] = [
        Self::FlowPositive,
        Self::FlowNegative,
        Self::FlowTooHigh,
        Self::FlowTooLow,
        Self::FlowZero,
        Self::ModeSync,
        Self::ModeAsync,
        Self::TurnOn,
        Self::TurnOff,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::FlowPositive => "change flow speed from 1 to 100",
            Self::FlowNegative => "change flow speed from -100 to -1",
            Self::FlowTooHigh => "change flow speed from 101 to inf",
            Self::FlowTooLow => "change flow speed from -inf to -101",
            Self::FlowZero => "change flow speed zero",
            Self::ModeSync => "change mode sync",
            Self::ModeAsync => "change mode async",
            Self::TurnOn => "turn on",
            Self::TurnOff => "turn off",
        }
    }
}

impl fmt::Display for InputSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for InputSymbol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sym| sym.label() == s)
            .ok_or(Error::UnknownCommand)
    }
}

// ───────────────────────────────────────────────────────────────
// PumpsSystemSul
// ───────────────────────────────────────────────────────────────

const VALID_FLOW: core::ops::RangeInclusive<i64> = 1..=100;
const INVALID_FLOW: core::ops::RangeInclusive<i64> = 101..=1000;

/// Learner-facing wrapper around a fresh controller per query.
pub struct PumpsSystemSul {
    initial: PumpsController,
    system: PumpsController,
    rng: ChaCha8Rng,
    seed: u64,
    tick_per_step: bool,
    steps: u64,
}

impl PumpsSystemSul {
    pub fn new(config: &SimConfig) -> Result<Self, ConfigError> {
        let initial = PumpsController::new(config)?;
        let seed = config.learning.seed.unwrap_or_else(rand::random);
        info!(
            "PumpsSystemSul ready: {} pumps, seed={}, tick_per_step={}",
            initial.pump_count(),
            seed,
            config.learning.tick_per_step
        );
        Ok(Self {
            system: initial.clone(),
            initial,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            tick_per_step: config.learning.tick_per_step,
            steps: 0,
        })
    }

    /// Seed that reproduces this run's id/value choices.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Total steps taken across all queries.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn system(&self) -> &PumpsController {
        &self.system
    }

    /// Concrete `(symbol, value)` for one letter, drawing from the RNG.
    fn concretize(&mut self, input: InputSymbol) -> (&'static str, CommandValue) {
        match input {
            InputSymbol::FlowPositive => (SYMBOL_FLOW, self.rng.gen_range(VALID_FLOW).into()),
            InputSymbol::FlowNegative => (SYMBOL_FLOW, (-self.rng.gen_range(VALID_FLOW)).into()),
            InputSymbol::FlowTooHigh => (SYMBOL_FLOW, self.rng.gen_range(INVALID_FLOW).into()),
            InputSymbol::FlowTooLow => (SYMBOL_FLOW, (-self.rng.gen_range(INVALID_FLOW)).into()),
            InputSymbol::FlowZero => (SYMBOL_FLOW, CommandValue::Int(0)),
            InputSymbol::ModeSync => (SYMBOL_MODE, CommandValue::from("sync")),
            InputSymbol::ModeAsync => (SYMBOL_MODE, CommandValue::from("async")),
            InputSymbol::TurnOn => (SYMBOL_STATUS, CommandValue::Bool(true)),
            InputSymbol::TurnOff => (SYMBOL_STATUS, CommandValue::Bool(false)),
        }
    }
}

impl Sul for PumpsSystemSul {
    type Input = InputSymbol;
    type Output = String;

    fn pre(&mut self) {
        self.system = self.initial.clone();
    }

    fn step(&mut self, input: &InputSymbol) -> String {
        self.steps += 1;
        let id = self.rng.gen_range(0..self.system.pump_count()) as i64;
        let (symbol, value) = self.concretize(*input);
        let outcome = dispatch(&mut self.system, id, symbol, &value);
        debug!("step {}: '{}' -> pump {} {} {}", self.steps, input, id, symbol, value);
        if self.tick_per_step {
            self.system.update();
        }
        respond(&outcome)
    }

    fn post(&mut self) {
        self.system.update();
    }
}
