use super::*;

#[test]
fn millis_from_secs_rounds_and_clamps() {
    assert_eq!(Millis::from_secs_f64(1.2345), Millis(1235));
    assert_eq!(Millis::from_secs_f64(-1.0), Millis::ZERO);
    assert_eq!(Millis::from_secs_f64(f64::NAN), Millis::ZERO);
    assert_eq!(Millis(1500).as_secs_f64(), 1.5);
}

#[test]
fn millis_arithmetic_saturates() {
    assert_eq!(Millis(u64::MAX) + Millis(1), Millis(u64::MAX));
    assert_eq!(Millis(5).saturating_sub(Millis(9)), Millis::ZERO);
    assert_eq!(Millis(90) * 3, Millis(270));
    assert_eq!(Millis(1000).scale(1.5), Millis(1500));
}

#[test]
fn rng_is_deterministic() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..10 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn rng_ranges_stay_in_bounds() {
    let mut rng = Rng64::new(7);
    for _ in 0..1000 {
        let f = rng.range_f64(-2.0, 3.0);
        assert!((-2.0..3.0).contains(&f));
        let u = rng.range_u64(4, 6);
        assert!((4..=6).contains(&u));
        assert!(rng.index(5) < 5);
    }
    assert_eq!(rng.range_f64(1.0, 1.0), 1.0);
    assert_eq!(rng.range_u64(9, 3), 9);
    assert_eq!(rng.index(0), 0);
    assert!(rng.pick::<u8>(&[]).is_none());
}

#[test]
fn chance_extremes() {
    let mut rng = Rng64::new(99);
    assert!((0..100).all(|_| !rng.chance(0.0)));
    assert!((0..100).all(|_| rng.chance(1.0)));
}
