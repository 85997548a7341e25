use super::*;
use serde_json::json;

#[test]
fn recorder_tracks_calls_and_active_effects() {
    let engine = RecordingEngine::new();
    engine.shake(8.0);
    engine.add_effect(CanvasEffect::ParticleBurst(EffectOpts::default()));
    engine.add_effect(CanvasEffect::RayBurst(EffectOpts {
        rays: 12,
        ..Default::default()
    }));
    assert_eq!(engine.shakes(), vec![8.0]);
    assert_eq!(engine.effects().len(), 2);
    assert_eq!(engine.active_effects(), 2);

    engine.clear_all();
    assert_eq!(engine.active_effects(), 0);
    assert_eq!(engine.clear_count(), 1);
    assert_eq!(engine.call_count(), 4);
}

#[test]
fn effect_kind_and_opts() {
    let e = CanvasEffect::RevealText {
        text: "NOVA".to_owned(),
        opts: EffectOpts {
            y: 0.4,
            subtext: Some("sub".to_owned()),
            ..Default::default()
        },
    };
    assert_eq!(e.kind(), "reveal_text");
    assert_eq!(e.opts().y, 0.4);
}

#[test]
fn calls_serialize_with_tags() {
    let v = serde_json::to_value(EngineCall::Shake { intensity: 2.0 }).unwrap();
    assert_eq!(v, json!({"call": "shake", "intensity": 2.0}));

    let v = serde_json::to_value(EngineCall::AddEffect(CanvasEffect::GlowOverlay(
        EffectOpts::default(),
    )))
    .unwrap();
    assert_eq!(v["call"], "add_effect");
    assert_eq!(v["kind"], "glow_overlay");
    assert_eq!(v["color"], "#ffffff");
    assert_eq!(v["shape"], "circle");
}
