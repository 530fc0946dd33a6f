//! Application core — pure simulation logic, zero I/O.
//!
//! This module contains the rules of the pump transfer system: the pump
//! registry and its tick engine, the synchronisation group, and the
//! command surface that external drivers use.  Everything observable leaves
//! through return values or the [`ports::EventSink`] trait, keeping this
//! layer fully testable without a host harness.

pub mod commands;
pub mod controller;
pub mod dispatch;
pub mod events;
pub mod ports;
pub mod sync;
