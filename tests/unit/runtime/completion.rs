use super::*;

#[test]
fn resolves_exactly_once() {
    let c = Completion::new();
    let hits = Rc::new(Cell::new(0));
    let h = hits.clone();
    c.on_resolve(move || h.set(h.get() + 1));
    assert!(!c.is_resolved());

    assert!(c.resolve());
    assert!(!c.resolve());
    assert!(c.is_resolved());
    assert_eq!(hits.get(), 1);
}

#[test]
fn late_waiters_run_immediately() {
    let c = Completion::new();
    c.resolve();
    let hit = Rc::new(Cell::new(false));
    let h = hit.clone();
    c.on_resolve(move || h.set(true));
    assert!(hit.get());
}

#[test]
fn waiters_run_in_registration_order_and_may_register_more() {
    let c = Completion::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let (l1, l2, c2) = (log.clone(), log.clone(), c.clone());
    c.on_resolve(move || {
        l1.borrow_mut().push(1);
        let l3 = l1.clone();
        c2.on_resolve(move || l3.borrow_mut().push(3));
    });
    c.on_resolve(move || l2.borrow_mut().push(2));
    c.resolve();
    assert_eq!(*log.borrow(), vec![1, 3, 2]);
}

#[test]
fn clones_share_state() {
    let a = Completion::new();
    let b = a.clone();
    a.resolve();
    assert!(b.is_resolved());
    assert!(format!("{b:?}").contains("resolved: true"));
}
