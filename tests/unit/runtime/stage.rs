use super::*;
use crate::foundation::color::Color;
use crate::ports::Headless;
use crate::ports::audio::Waveform;
use crate::ports::engine::{EffectOpts, EngineCall};

fn ctx(h: &Headless) -> SceneCtx {
    SceneCtx {
        ports: h.ports(),
        rarity: Rarity::uniform(Color::WHITE),
        seed: 7,
    }
}

fn stage(h: &Headless) -> Stage {
    Stage::new("Test", ctx(h), &FxConfig::new().num("count", 3.0), false)
}

#[test]
fn play_runs_zero_phases_inline_and_resolves_once() {
    let h = Headless::new();
    let st = stage(&h);
    let done = Rc::new(Cell::new(0));
    let d = done.clone();

    let completion = st.play(|_| {
        Timeline::new(Millis(500))
            .phase(Millis(0), "spawn", |s| {
                s.spawn(VisualNode::new("flash"));
            })
            .phase(Millis(200), "more", |s| {
                s.spawn(VisualNode::new("ring"));
            })
    });
    completion.on_resolve(move || d.set(d.get() + 1));

    assert_eq!(st.state(), SceneState::Playing);
    assert_eq!(h.surface.attached_count(), 1);
    h.clock.advance(Millis(200));
    assert_eq!(h.surface.attached_owned_by("Test"), 2);
    h.clock.advance(Millis(300));

    assert!(completion.is_resolved());
    assert_eq!(done.get(), 1);
    assert_eq!(h.surface.attached_count(), 0);
    assert_eq!(st.state(), SceneState::Stopped);
    assert_eq!(h.clock.pending(), 0);
}

#[test]
fn stop_silences_future_phases() {
    let h = Headless::new();
    let st = stage(&h);
    let completion = st.play(|_| {
        Timeline::new(Millis(1000))
            .phase(Millis(100), "early", |s| {
                s.spawn(VisualNode::new("a"));
            })
            .phase(Millis(600), "late", |s| {
                s.spawn(VisualNode::new("b"));
                s.add_effect(CanvasEffect::GlowOverlay(EffectOpts::default()));
                s.shake(Millis(300), 4.0);
            })
    });
    h.clock.advance(Millis(150));
    assert_eq!(h.surface.attached_count(), 1);

    st.stop();
    assert_eq!(h.surface.attached_count(), 0);
    assert_eq!(h.clock.pending(), 0);
    h.clock.run_until_idle();

    assert_eq!(h.surface.attached_total(), 1);
    assert_eq!(h.engine.call_count(), 0);
    assert!(!h.surface.has_global_class(SHAKE_CLASS));
    assert!(!completion.is_resolved());
}

#[test]
fn stop_is_idempotent_and_valid_before_play() {
    let h = Headless::new();
    let st = stage(&h);
    st.stop();
    st.stop();
    assert!(st.is_stopped());

    let completion = st.play(|_| Timeline::new(Millis(10)));
    h.clock.run_until_idle();
    assert!(!completion.is_resolved());
    assert_eq!(h.surface.attached_total(), 0);
    assert!(st.schedule(Millis(1), |_| {}).is_none());
    assert!(st.spawn(VisualNode::new("x")).is_none());
}

#[test]
fn second_play_returns_same_completion() {
    let h = Headless::new();
    let st = stage(&h);
    let ran = Rc::new(Cell::new(0));
    let r = ran.clone();
    let first = st.play(move |_| {
        let r = r.clone();
        Timeline::new(Millis(50)).phase(Millis(0), "count", move |_| r.set(r.get() + 1))
    });
    let second = st.play(|_| Timeline::new(Millis(1)).phase(Millis(0), "never", |_| panic!()));
    h.clock.run_until_idle();
    assert_eq!(ran.get(), 1);
    assert!(first.is_resolved());
    assert!(second.is_resolved());
}

#[test]
fn shake_pulses_class_and_notifies_engine() {
    let h = Headless::new();
    let st = stage(&h);
    st.play(|_| Timeline::new(Millis(1000)));
    st.shake(Millis(400), 12.0);
    assert!(h.surface.has_global_class(SHAKE_CLASS));
    assert_eq!(h.engine.shakes(), vec![12.0]);

    h.clock.advance(Millis(400));
    assert!(!h.surface.has_global_class(SHAKE_CLASS));

    st.shake(Millis(400), 3.0);
    st.stop();
    assert!(!h.surface.has_global_class(SHAKE_CLASS));
}

#[test]
fn stop_does_not_clear_canvas() {
    let h = Headless::new();
    let st = stage(&h);
    st.play(|_| {
        Timeline::new(Millis(100)).phase(Millis(0), "glow", |s| {
            s.add_effect(CanvasEffect::GlowOverlay(EffectOpts::default()));
        })
    });
    st.stop();
    assert_eq!(h.engine.active_effects(), 1);
    assert!(!h.engine.calls().contains(&EngineCall::ClearAll));
}

#[test]
fn spawn_for_removes_early_and_kill_all_tolerates_it() {
    let h = Headless::new();
    let st = stage(&h);
    st.play(|_| Timeline::new(Millis(1000)));
    st.spawn_for(VisualNode::new("ember"), Millis(100));
    st.spawn(VisualNode::new("title"));
    h.clock.advance(Millis(100));
    assert_eq!(h.surface.attached_count(), 1);
    assert_eq!(st.tracked_nodes(), 2);
    h.clock.run_until_idle();
    assert_eq!(h.surface.attached_count(), 0);
}

#[test]
fn audio_failure_degrades_to_silence() {
    let h = Headless::new();
    let quiet = SceneCtx {
        ports: h.ports_without_audio(),
        rarity: Rarity::default(),
        seed: 1,
    };
    let st = Stage::new("Quiet", quiet, &FxConfig::new(), true);
    assert!(!st.has_audio());
    assert!(!st.play_tone(&Tone::new(440.0, Millis(100))));

    let loud = Stage::new("Loud", ctx(&h), &FxConfig::new(), true);
    assert!(loud.has_audio());
    assert!(loud.play_tone(&Tone::new(440.0, Millis(100)).wave(Waveform::Square)));
    loud.stop();
    assert_eq!(h.audio.closed(), 1);
    assert!(!loud.play_tone(&Tone::new(220.0, Millis(100))));
    assert_eq!(h.audio.tones().len(), 1);
}

#[test]
fn rarity_overrides_merge_into_fx() {
    let h = Headless::new();
    let mut c = ctx(&h);
    c.rarity = c.rarity.with_effects(FxConfig::new().num("count", 9.0).text("count2", "x"));
    let st = Stage::new("Fx", c, &FxConfig::new().num("count", 3.0), false);
    assert_eq!(st.fx().count("count"), 9);
    assert_eq!(st.fx().string("count2"), "x");
}

#[test]
fn dropping_a_playing_stage_cleans_up() {
    let h = Headless::new();
    {
        let st = stage(&h);
        st.play(|_| {
            Timeline::new(Millis(1000)).phase(Millis(0), "a", |s| {
                s.spawn(VisualNode::new("a"));
                s.set_global_class("tint", true);
            })
        });
        assert_eq!(h.surface.attached_count(), 1);
    }
    assert_eq!(h.surface.attached_count(), 0);
    assert!(!h.surface.has_global_class("tint"));
    assert_eq!(h.clock.pending(), 0);
}

#[test]
fn seeded_rng_is_reproducible() {
    let h = Headless::new();
    let a = stage(&h);
    let b = stage(&h);
    let xs = (0..4).map(|_| a.random(0.0, 1.0)).collect::<Vec<_>>();
    let ys = (0..4).map(|_| b.random(0.0, 1.0)).collect::<Vec<_>>();
    assert_eq!(xs, ys);
    assert!(xs.iter().all(|x| (0.0..1.0).contains(x)));
}
