//! Integration test driver for `tests/integration/` submodules.
//!
//! Each `mod` below maps to a file that exercises one slice of the
//! simulator through the public API only, with a recording event sink in
//! place of a real host.

mod controller_scenarios;
mod recorder;
