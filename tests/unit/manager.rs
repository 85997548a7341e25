use super::*;
use crate::foundation::core::Millis;
use crate::ports::Headless;
use crate::ports::engine::EngineCall;

#[test]
fn new_rejects_unknown_fallback() {
    let h = Headless::new();
    let opts = ManagerOpts {
        fallback_key: "Nope".to_owned(),
        ..ManagerOpts::default()
    };
    let err = CutsceneManager::new(h.ports(), SceneRegistry::builtin(), opts)
        .err()
        .unwrap();
    assert!(err.to_string().contains("Nope"));
}

#[test]
fn custom_fallback_is_used() {
    let h = Headless::new();
    let opts = ManagerOpts {
        fallback_key: "Matrix".to_owned(),
        ..ManagerOpts::default()
    };
    let m = CutsceneManager::new(h.ports(), SceneRegistry::builtin(), opts).unwrap();
    m.play("???", Rarity::default(), || {});
    assert_eq!(m.current_scene(), Some("Matrix"));
}

#[test]
fn completion_releases_before_callback() {
    let h = Headless::new();
    let m = Rc::new(CutsceneManager::with_builtin_scenes(h.ports()));
    let seen = Rc::new(Cell::new(None));
    let (weak, s) = (Rc::downgrade(&m), seen.clone());
    m.play("normal", Rarity::default(), move || {
        s.set(weak.upgrade().map(|m| m.is_playing()));
    });
    assert!(m.is_playing());
    h.clock.advance(Millis(4000));
    assert_eq!(seen.get(), Some(false));
    assert!(m.current().is_none());
}

#[test]
fn stop_always_clears_canvas() {
    let h = Headless::new();
    let m = CutsceneManager::with_builtin_scenes(h.ports());
    m.stop();
    m.stop();
    assert_eq!(h.engine.clear_count(), 2);

    m.play("Supernova", Rarity::default(), || {});
    h.clock.advance(Millis(500));
    m.stop();
    assert!(!m.is_playing());
    assert_eq!(h.engine.clear_count(), 3);
    assert_eq!(h.engine.active_effects(), 0);
    assert_eq!(h.engine.calls().last(), Some(&EngineCall::ClearAll));
}

#[test]
fn each_playback_gets_a_fresh_seed() {
    let h = Headless::new();
    let m = CutsceneManager::with_builtin_scenes(h.ports());
    m.play("normal", Rarity::default(), || {});
    let a = m.current().unwrap().stage().random(0.0, 1.0);
    m.play("normal", Rarity::default(), || {});
    let b = m.current().unwrap().stage().random(0.0, 1.0);
    assert_ne!(a, b);
    assert_eq!(m.generation(), 2);
}
