use crate::config::fx::FxConfig;
use crate::foundation::color::Color;
use crate::foundation::core::Millis;
use crate::ports::engine::{CanvasEffect, EffectOpts, ParticleShape};
use crate::runtime::stage::Stage;
use crate::runtime::timeline::Timeline;
use crate::runtime::typewriter::{Typewriter, TypewriterCfg};
use crate::scenes::SceneScript;
use crate::scenes::common::{burst, flash, glow, place_presets, reveal_title, text_line, title_for};

const TENDRILS: [(f64, f64); 8] = [
    (4.0, 92.0),
    (18.0, 100.0),
    (34.0, 96.0),
    (66.0, 96.0),
    (82.0, 100.0),
    (96.0, 92.0),
    (0.0, 60.0),
    (100.0, 60.0),
];
const TENDRIL_ANGLES: [f64; 8] = [-60.0, -75.0, -85.0, -95.0, -105.0, -120.0, -20.0, -160.0];
const EYES: [(f64, f64); 7] = [
    (22.0, 24.0),
    (76.0, 20.0),
    (12.0, 52.0),
    (88.0, 48.0),
    (30.0, 74.0),
    (70.0, 72.0),
    (50.0, 14.0),
];
// Offsets of the three glitch hits.
const GLITCH_HITS: [u64; 3] = [0, 350, 700];

/// Void, tendrils and watching eyes; a whispered line; glitches and a rupture.
pub struct Eldritch;

impl SceneScript for Eldritch {
    fn name(&self) -> &'static str {
        "Eldritch"
    }

    fn defaults(&self) -> FxConfig {
        FxConfig::new()
            .num("eyeCount", 7.0)
            .num("particleCount", 90.0)
            .num("shakeIntensity", 10.0)
            .text("whisper", "it sees you...")
            .text("title", "")
    }

    fn timeline(&self, _stage: &Stage) -> Timeline {
        Timeline::new(Millis(10_000))
            .phase(Millis(0), "void", |s| {
                s.set_global_class("el-void", true);
                glow(s, s.rarity().glow_color.mix(Color::BLACK, 0.6), Millis(5000), 0.7);
            })
            .phase(Millis(700), "tendrils", |s| {
                let color = s.rarity().color.mix(Color::BLACK, 0.4);
                place_presets(s, "el-tendril", &TENDRILS, &TENDRIL_ANGLES, color, TENDRILS.len());
            })
            .phase(Millis(2000), "eyes", |s| {
                let n = s.fx().count("eyeCount");
                place_presets(s, "el-eye", &EYES, &[], s.rarity().glow_color, n);
            })
            .phase(Millis(3200), "whisper", |s| {
                let cfg = TypewriterCfg {
                    char_delay: Millis(90),
                    jitter: Millis(60),
                    hesitation_chance: 0.2,
                    hesitation: Millis(320),
                    cursor_hold: Millis(500),
                    ..TypewriterCfg::default()
                };
                let text = s.fx().string("whisper").to_owned();
                let line = text_line("el-whisper", 82.0, s.rarity().particle_color);
                if let Some(tw) = Typewriter::mount(s, line, &text, cfg) {
                    tw.start(s, Millis::ZERO);
                }
            })
            .phase(Millis(5200), "glitch", |s| {
                for at in GLITCH_HITS {
                    s.schedule(Millis(at), |s| {
                        s.pulse_class("el-glitch", Millis(180));
                        s.shake(Millis(200), s.fx().number("shakeIntensity") * 0.6);
                    });
                }
            })
            .phase(Millis(6800), "rupture", |s| {
                let r = s.rarity().clone();
                flash(s, r.glow_color.mix(Color::BLACK, 0.3), Millis(450));
                burst(s, r.particle_color, s.fx().count("particleCount"), ParticleShape::Spark);
                s.add_effect(CanvasEffect::ContinuousParticles(EffectOpts {
                    color: r.color,
                    rate: 18.0,
                    duration: Millis(2600),
                    gravity: -0.03,
                    ..EffectOpts::default()
                }));
                s.shake(Millis(600), s.fx().number("shakeIntensity"));
            })
            .phase(Millis(7600), "title", |s| {
                let title = title_for(s, "ELDRITCH");
                reveal_title(s, &title, "", s.rarity().color, Millis(2200));
            })
    }
}
