use crate::config::fx::FxConfig;
use crate::foundation::core::Millis;
use crate::ports::engine::{CanvasEffect, EffectOpts, ParticleShape};
use crate::ports::surface::VisualNode;
use crate::runtime::stage::Stage;
use crate::runtime::timeline::Timeline;
use crate::runtime::typewriter::{MessageChain, TypewriterCfg};
use crate::scenes::SceneScript;
use crate::scenes::common::{burst, flash, text_line, title_for};

const COLUMNS: [f64; 12] = [
    4.0, 12.0, 21.0, 29.0, 38.0, 46.0, 54.0, 62.0, 71.0, 79.0, 88.0, 96.0,
];
const GLYPHS: &[char] = &[
    'ア', 'カ', 'サ', 'タ', 'ナ', 'ハ', 'マ', 'ヤ', 'ラ', 'ワ', '0', '1', '7', 'Z', ':', '=',
];
const MESSAGE: [&str; 3] = ["wake up...", "the system has you", "follow the signal"];
const LINE_Y: [f64; 4] = [34.0, 42.0, 50.0, 60.0];

/// Code rain and a four-line typed message ending in a flourish.
pub struct Matrix;

impl SceneScript for Matrix {
    fn name(&self) -> &'static str {
        "Matrix"
    }

    fn defaults(&self) -> FxConfig {
        FxConfig::new()
            .num("columnLength", 18.0)
            .num("glyphRate", 40.0)
            .num("particleCount", 100.0)
            .num("shakeIntensity", 12.0)
            .num("linePause", 500.0)
            .text("title", "")
    }

    fn timeline(&self, _stage: &Stage) -> Timeline {
        Timeline::new(Millis(12_000))
            .phase(Millis(0), "rain", |s| {
                s.set_global_class("mx-rain", true);
                let len = s.fx().count("columnLength");
                let color = s.rarity().color;
                for (i, x) in COLUMNS.iter().enumerate() {
                    let column = (0..len)
                        .filter_map(|_| s.with_rng(|r| r.pick(GLYPHS).copied()))
                        .collect::<String>();
                    let speed = s.random(1400.0, 3200.0);
                    s.spawn(
                        VisualNode::new("mx-column")
                            .text(column)
                            .at_percent(*x, -10.0)
                            .style("color", color.to_css())
                            .style("animation-duration", format!("{speed:.0}ms"))
                            .style("animation-delay", format!("{}ms", i * 90)),
                    );
                }
            })
            .phase(Millis(800), "glyphs", |s| {
                s.add_effect(CanvasEffect::ContinuousParticles(EffectOpts {
                    y: 0.0,
                    color: s.rarity().particle_color,
                    rate: s.fx().number("glyphRate"),
                    duration: Millis(9000),
                    gravity: 0.08,
                    spread: 30.0,
                    shape: ParticleShape::Glyph,
                    glow: false,
                    ..EffectOpts::default()
                }));
            })
            .phase(Millis(1500), "message", |s| {
                let cfg = TypewriterCfg {
                    char_delay: Millis(28),
                    jitter: Millis(14),
                    hesitation_chance: 0.03,
                    hesitation: Millis(200),
                    cursor_hold: Millis(400),
                    cursor_class: "mx-cursor".to_owned(),
                };
                let color = s.rarity().glow_color;
                let last = title_for(s, "access granted");
                let mut chain = MessageChain::new(cfg, s.fx().millis("linePause"));
                let lines = MESSAGE.iter().copied().chain([last.as_str()]);
                for (text, y) in lines.zip(LINE_Y) {
                    if let Some(node) = s.spawn(text_line("mx-line", y, color)) {
                        chain = chain.line(node, text);
                    }
                }
                chain
                    .finale(|s| {
                        let r = s.rarity().clone();
                        flash(s, r.glow_color, Millis(350));
                        burst(
                            s,
                            r.particle_color,
                            s.fx().count("particleCount"),
                            ParticleShape::Glyph,
                        );
                        s.shake(Millis(500), s.fx().number("shakeIntensity"));
                    })
                    .start(s, Millis::ZERO);
            })
    }
}
