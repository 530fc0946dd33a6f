//! Integration tests: command lines → PumpsController → tick events.
//!
//! Multi-tick scenarios driven only through the public command surface,
//! asserting both the observable state and the emitted event stream.

use pumpsim::app::events::PumpEvent;
use pumpsim::drivers::pump::PumpPhase;
use pumpsim::{PumpsController, dispatch_line};

use super::recorder::RecordingSink;

const PAIR: u16 = 0b11;

fn run(c: &mut PumpsController, lines: &[&str]) {
    for line in lines {
        dispatch_line(c, line).unwrap_or_else(|e| panic!("{line:?} rejected: {e}"));
    }
}

fn volumes(c: &PumpsController) -> Vec<u8> {
    c.pump_snapshot().iter().map(|s| s.current_volume).collect()
}

fn statuses(c: &PumpsController) -> Vec<bool> {
    c.pump_snapshot().iter().map(|s| s.status).collect()
}

// ── Full boundary ─────────────────────────────────────────────

#[test]
fn async_pump_reaching_full_keeps_running_and_sign() {
    let mut c = PumpsController::default();
    let mut sink = RecordingSink::new();
    run(&mut c, &["0 -f 90", "0 -s true"]);
    c.tick(&mut sink);
    run(&mut c, &["0 -f 30"]);
    c.tick(&mut sink);

    let p = c.pump(0).unwrap();
    assert_eq!(p.current_volume(), 100);
    assert_eq!(p.flow_speed(), 30);
    assert!(p.status());
    assert_eq!(sink.boundary_events(), vec![PumpEvent::Filled { id: 0 }]);
    assert_eq!(sink.ticks(), 2);
}

/// Documented contract: the full boundary only normalises the sign, so a
/// filling async pump parks at 100 instead of bouncing back.
#[test]
fn full_boundary_never_reverses_direction() {
    let mut c = PumpsController::default();
    run(&mut c, &["1 -f 40", "1 -s true"]);
    for _ in 0..10 {
        c.update();
    }
    let p = c.pump(1).unwrap();
    assert_eq!(p.current_volume(), 100);
    assert_eq!(p.flow_speed(), 40);
    assert!(p.status());
    assert_eq!(p.phase(), PumpPhase::Full);
}

/// The empty boundary, by contrast, flips the direction.
#[test]
fn draining_async_pump_bounces_off_empty() {
    let mut c = PumpsController::default();
    let mut sink = RecordingSink::new();
    run(&mut c, &["2 -f -40", "2 -s true"]);
    c.tick(&mut sink);
    assert_eq!(c.pump(2).unwrap().flow_speed(), 40);
    assert_eq!(sink.boundary_events(), vec![PumpEvent::Emptied { id: 2 }]);

    c.update();
    c.update();
    assert_eq!(c.pump(2).unwrap().current_volume(), 80);
    assert_eq!(c.pump(2).unwrap().phase(), PumpPhase::Filling);
}

// ── Synchronised group ────────────────────────────────────────

#[test]
fn synced_group_cycle() {
    let mut c = PumpsController::default();
    let mut sink = RecordingSink::new();

    // Collectively empty group restarts and advances in the same tick.
    run(&mut c, &["0 -m sync", "1 -m sync", "0 -f 20", "1 -f 50"]);
    c.tick(&mut sink);
    assert_eq!(volumes(&c), vec![20, 50, 0, 0]);
    assert_eq!(statuses(&c), vec![true, true, false, false]);
    assert_eq!(
        sink.boundary_events(),
        vec![PumpEvent::GroupRestarted { mask: PAIR }]
    );
    sink.clear();

    // Pump 0 runs dry: the whole group stops, pump 1 before it advances.
    run(&mut c, &["0 -f -20"]);
    c.tick(&mut sink);
    assert_eq!(volumes(&c), vec![0, 50, 0, 0]);
    assert_eq!(statuses(&c), vec![false, false, false, false]);
    assert_eq!(c.pump(0).unwrap().flow_speed(), 20);
    assert_eq!(
        sink.boundary_events(),
        vec![
            PumpEvent::Emptied { id: 0 },
            PumpEvent::GroupHalted { mask: PAIR }
        ]
    );
    sink.clear();

    // Mixed volumes: no automatic restart.
    c.tick(&mut sink);
    assert_eq!(statuses(&c), vec![false, false, false, false]);
    assert!(sink.boundary_events().is_empty());

    // Manually restarted member fills and stops on its own.
    run(&mut c, &["1 -s true"]);
    c.tick(&mut sink);
    assert_eq!(volumes(&c), vec![0, 100, 0, 0]);
    assert_eq!(statuses(&c), vec![false, false, false, false]);
    assert_eq!(sink.boundary_events(), vec![PumpEvent::Filled { id: 1 }]);
    sink.clear();

    // Leaving the group makes the remaining member "collectively empty".
    run(&mut c, &["1 -m async"]);
    c.tick(&mut sink);
    assert_eq!(c.sync_ids().as_slice(), &[0]);
    assert_eq!(volumes(&c), vec![20, 100, 0, 0]);
    assert!(c.pump(0).unwrap().status());
    assert_eq!(
        sink.boundary_events(),
        vec![PumpEvent::GroupRestarted { mask: 0b01 }]
    );
}

#[test]
fn full_group_restarts_every_tick_while_flow_positive() {
    let mut c = PumpsController::default();
    run(&mut c, &["0 -m sync", "1 -m sync", "0 -f 50", "1 -f 50"]);
    c.update();
    c.update();
    assert_eq!(volumes(&c), vec![100, 100, 0, 0]);
    assert_eq!(statuses(&c), vec![false, false, false, false]);

    let mut sink = RecordingSink::new();
    c.tick(&mut sink);
    assert_eq!(
        sink.boundary_events(),
        vec![
            PumpEvent::GroupRestarted { mask: PAIR },
            PumpEvent::Filled { id: 0 },
            PumpEvent::Filled { id: 1 },
        ]
    );
    assert_eq!(statuses(&c), vec![false, false, false, false]);
}

#[test]
fn full_group_drains_until_first_member_empties() {
    let mut c = PumpsController::default();
    run(&mut c, &["0 -m sync", "1 -m sync", "0 -f 50", "1 -f 50"]);
    c.update();
    c.update();
    run(&mut c, &["0 -f -50", "1 -f -50"]);

    c.update();
    assert_eq!(volumes(&c), vec![50, 50, 0, 0]);
    assert_eq!(statuses(&c), vec![true, true, false, false]);

    c.update();
    assert_eq!(volumes(&c), vec![0, 50, 0, 0]);
    assert_eq!(statuses(&c), vec![false, false, false, false]);
    assert_eq!(c.pump(0).unwrap().flow_speed(), 50);
    assert_eq!(c.pump(1).unwrap().flow_speed(), -50);
}

#[test]
fn async_pumps_ignore_group_halts() {
    let mut c = PumpsController::default();
    run(&mut c, &["0 -m sync", "0 -f 10", "3 -f 10", "3 -s true"]);
    c.update();
    run(&mut c, &["0 -f -10"]);
    c.update();
    assert!(!c.pump(0).unwrap().status());
    assert!(c.pump(3).unwrap().status());
    assert_eq!(c.pump(3).unwrap().current_volume(), 20);
}

#[test]
fn tick_count_advances_once_per_update() {
    let mut c = PumpsController::default();
    for _ in 0..7 {
        c.update();
    }
    assert_eq!(c.tick_count(), 7);
}
