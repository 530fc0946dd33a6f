//! Simulated actuators.

pub mod pump;
