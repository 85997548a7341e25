use super::*;
use crate::foundation::core::Millis;
use crate::ports::clock::ManualClock;
use crate::ports::surface::MemorySurface;
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn cancel_all_clears_pending_timers() {
    let clock = ManualClock::new();
    let fired = Rc::new(Cell::new(0));
    let mut timers = TimerRegistry::new();
    for i in 0..3 {
        let f = fired.clone();
        timers.track(clock.set_timeout(Millis(10 * i), Box::new(move || f.set(f.get() + 1))));
    }
    clock.advance(Millis(0));
    assert_eq!(fired.get(), 1);
    // The fired handle stays recorded until the wholesale cancel.
    assert_eq!(timers.len(), 3);

    assert_eq!(timers.cancel_all(&clock), 3);
    assert!(timers.is_empty());
    clock.run_until_idle();
    assert_eq!(fired.get(), 1);
    assert_eq!(timers.cancel_all(&clock), 0);
}

#[test]
fn kill_all_tolerates_already_detached_nodes() {
    let surface = MemorySurface::new();
    let mut spawned = SpawnRegistry::new();
    let a = spawned.spawn(&surface, VisualNode::new("a"));
    let b = spawned.spawn(&surface, VisualNode::new("b"));
    surface.detach(a);
    assert!(spawned.contains(a));
    assert_eq!(surface.attached_count(), 1);

    assert_eq!(spawned.kill_all(&surface), 2);
    assert_eq!(surface.attached_count(), 0);
    assert!(!spawned.contains(b));
    assert_eq!(spawned.kill_all(&surface), 0);
}

#[test]
fn reset_forgets_without_detaching() {
    let surface = MemorySurface::new();
    let mut spawned = SpawnRegistry::new();
    spawned.spawn(&surface, VisualNode::new("a"));
    spawned.reset();
    assert!(spawned.is_empty());
    assert_eq!(surface.attached_count(), 1);
}
