//! Fuzz target: `dispatch_line` + `update`
//!
//! Treats the input as newline-separated console commands, dispatches each
//! one against a fresh controller and ticks after every line, asserting
//! that nothing panics and that the range invariants hold throughout.
//!
//! cargo fuzz run fuzz_command_line

#![no_main]

use libfuzzer_sys::fuzz_target;
use pumpsim::{PumpsController, dispatch_line};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    let mut system = PumpsController::default();

    for line in text.lines().take(256) {
        let before = system.clone();
        if dispatch_line(&mut system, line).is_err() {
            assert_eq!(system, before, "rejected line mutated state");
        }
        system.update();

        for s in system.pump_snapshot() {
            assert!(s.current_volume <= 100);
            assert!((-100..=100).contains(&s.flow_speed));
        }
        assert!(system.sync_ids().iter().all(|&id| id < system.pump_count()));
    }
});
