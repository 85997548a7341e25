use super::*;
use std::rc::Rc;

fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> TimerCallback) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let l = log.clone();
    let make = move |tag: &'static str| -> TimerCallback {
        let l = l.clone();
        Box::new(move || l.borrow_mut().push(tag))
    };
    (log, make)
}

#[test]
fn fires_in_deadline_order_and_fifo_on_ties() {
    let clock = ManualClock::new();
    let (log, cb) = recorder();
    clock.set_timeout(Millis(300), cb("c"));
    clock.set_timeout(Millis(100), cb("a1"));
    clock.set_timeout(Millis(100), cb("a2"));
    clock.set_timeout(Millis(200), cb("b"));

    assert_eq!(clock.advance(Millis(99)), 0);
    assert_eq!(clock.advance(Millis(301)), 4);
    assert_eq!(*log.borrow(), vec!["a1", "a2", "b", "c"]);
    assert_eq!(clock.now(), Millis(400));
}

#[test]
fn cleared_timers_never_fire() {
    let clock = ManualClock::new();
    let (log, cb) = recorder();
    let h = clock.set_timeout(Millis(10), cb("x"));
    clock.set_timeout(Millis(20), cb("y"));
    clock.clear_timeout(h);
    clock.clear_timeout(h);
    assert_eq!(clock.pending(), 1);
    assert_eq!(clock.next_deadline(), Some(Millis(20)));
    clock.run_until_idle();
    assert_eq!(*log.borrow(), vec!["y"]);
}

#[test]
fn callbacks_can_schedule_more_work() {
    let clock = Rc::new(ManualClock::new());
    let hits = Rc::new(RefCell::new(Vec::<Millis>::new()));
    let (c, h) = (clock.clone(), hits.clone());
    clock.set_timeout(
        Millis(50),
        Box::new(move || {
            h.borrow_mut().push(c.now());
            let (c2, h2) = (c.clone(), h.clone());
            c.set_timeout(Millis(0), Box::new(move || h2.borrow_mut().push(c2.now())));
        }),
    );
    assert_eq!(clock.advance(Millis(50)), 2);
    assert_eq!(*hits.borrow(), vec![Millis(50), Millis(50)]);
}

#[test]
fn callback_time_is_its_deadline() {
    let clock = Rc::new(ManualClock::new());
    let seen = Rc::new(RefCell::new(None));
    let (c, s) = (clock.clone(), seen.clone());
    clock.set_timeout(Millis(70), Box::new(move || *s.borrow_mut() = Some(c.now())));
    clock.advance(Millis(1000));
    assert_eq!(*seen.borrow(), Some(Millis(70)));
    assert_eq!(clock.fired_total(), 1);
}

#[test]
fn run_until_idle_jumps_forward() {
    let clock = ManualClock::new();
    let (log, cb) = recorder();
    clock.set_timeout(Millis(5_000), cb("late"));
    assert_eq!(clock.run_until_idle(), 1);
    assert_eq!(clock.now(), Millis(5_000));
    assert_eq!(*log.borrow(), vec!["late"]);
    assert_eq!(clock.pending(), 0);
    assert_eq!(clock.next_deadline(), None);
}
