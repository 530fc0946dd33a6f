//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter    | Implements | Connects to       |
//! |------------|------------|-------------------|
//! | `log_sink` | EventSink  | `log` facade      |

pub mod log_sink;
