use super::*;
use crate::config::rarity::Rarity;
use crate::foundation::core::Millis;
use crate::ports::Headless;

fn ctx(h: &Headless) -> SceneCtx {
    SceneCtx {
        ports: h.ports(),
        rarity: Rarity::default(),
        seed: 11,
    }
}

#[test]
fn builtin_registers_every_scene() {
    let reg = SceneRegistry::builtin();
    assert_eq!(
        reg.keys(),
        vec![
            "Eldritch",
            "Matrix",
            "PixelGenesis",
            "Seraphim",
            "StellarCollapse",
            "Supernova",
            "normal",
        ]
    );
    assert_eq!(reg.fallback().name(), "normal");
}

#[test]
fn lookup_normalizes_keys_and_aliases() {
    let reg = SceneRegistry::builtin();
    assert_eq!(reg.lookup("Supernova").name(), "Supernova");
    assert_eq!(reg.lookup("stellar_collapse").name(), "StellarCollapse");
    assert_eq!(reg.lookup("Stellar Collapse").name(), "StellarCollapse");
    assert_eq!(reg.lookup("8-Bit Genesis").name(), "PixelGenesis");
    assert_eq!(reg.lookup("8bit genesis").name(), "PixelGenesis");
    assert_eq!(reg.lookup("MATRIX").name(), "Matrix");
}

#[test]
fn unknown_keys_fall_back() {
    let reg = SceneRegistry::builtin();
    assert!(reg.find("NonexistentKey").is_none());
    assert!(reg.find("").is_none());
    assert_eq!(reg.lookup("NonexistentKey").name(), "normal");
    assert_eq!(reg.lookup("--").name(), "normal");
}

#[test]
fn set_fallback_requires_a_registered_key() {
    let mut reg = SceneRegistry::builtin();
    reg.set_fallback("supernova").unwrap();
    assert_eq!(reg.lookup("nope").name(), "Supernova");

    let err = reg.set_fallback("Nope").unwrap_err();
    assert!(err.to_string().starts_with("config error:"));
    assert!(err.to_string().contains("Matrix"));
}

#[test]
fn every_builtin_timeline_is_valid() {
    let h = Headless::new();
    let reg = SceneRegistry::builtin();
    for key in reg.keys() {
        let scene = Cutscene::new(reg.lookup(key), ctx(&h));
        let tl = scene.timeline();
        tl.validate().unwrap();
        assert!(tl.len() >= 4, "{key} has {} phases", tl.len());
        let summary = tl.summary();
        assert!(summary.windows(2).all(|w| w[0].at <= w[1].at));
        assert_eq!(summary[0].at, Millis::ZERO, "{key} starts late");
    }
    // Building timelines has no side effects.
    assert_eq!(h.surface.attached_total(), 0);
    assert_eq!(h.engine.call_count(), 0);
}

#[test]
fn cutscene_lengths() {
    let h = Headless::new();
    let reg = SceneRegistry::builtin();
    let len = |key: &str| Cutscene::new(reg.lookup(key), ctx(&h)).timeline().resolve_at();
    assert_eq!(len("normal"), Millis(4000));
    assert_eq!(len("Supernova"), Millis(8000));
    assert_eq!(len("Seraphim"), Millis(9000));
    assert_eq!(len("Eldritch"), Millis(10_000));
    assert_eq!(len("Matrix"), Millis(12_000));
    assert_eq!(len("StellarCollapse"), Millis(11_000));
    assert_eq!(len("PixelGenesis"), Millis(9000));
}

#[test]
fn only_pixel_genesis_opens_audio() {
    let h = Headless::new();
    let reg = SceneRegistry::builtin();
    for key in reg.keys() {
        let scene = Cutscene::new(reg.lookup(key), ctx(&h));
        assert_eq!(scene.stage().has_audio(), key == "PixelGenesis", "{key}");
    }
    assert_eq!(h.audio.opened(), 1);
}
