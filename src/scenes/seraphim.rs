use crate::config::fx::FxConfig;
use crate::foundation::core::Millis;
use crate::ports::engine::{CanvasEffect, EffectOpts, ParticleShape};
use crate::ports::surface::VisualNode;
use crate::runtime::stage::Stage;
use crate::runtime::timeline::Timeline;
use crate::runtime::typewriter::{Typewriter, TypewriterCfg};
use crate::scenes::SceneScript;
use crate::scenes::common::{glow, place_presets, polar, scatter, text_line, title_for};

const PILLARS: [(f64, f64); 5] = [
    (14.0, 0.0),
    (32.0, 0.0),
    (50.0, 0.0),
    (68.0, 0.0),
    (86.0, 0.0),
];
// Feather angles of one wing, mirrored for the other.
const WING_ANGLES: [f64; 7] = [200.0, 188.0, 176.0, 164.0, 152.0, 140.0, 128.0];

/// Pillars of light, unfolding wings and a typed title.
pub struct Seraphim;

impl SceneScript for Seraphim {
    fn name(&self) -> &'static str {
        "Seraphim"
    }

    fn defaults(&self) -> FxConfig {
        FxConfig::new()
            .num("featherCount", 26.0)
            .num("featherRate", 14.0)
            .num("rayCount", 24.0)
            .num("wingSpan", 22.0)
            .num("shakeIntensity", 6.0)
            .text("title", "")
    }

    fn timeline(&self, _stage: &Stage) -> Timeline {
        Timeline::new(Millis(9000))
            .phase(Millis(0), "heaven", |s| {
                s.set_global_class("sr-heaven", true);
                glow(s, s.rarity().glow_color.lighten(0.4), Millis(4000), 0.45);
            })
            .phase(Millis(600), "pillars", |s| {
                place_presets(s, "sr-pillar", &PILLARS, &[], s.rarity().glow_color, PILLARS.len());
            })
            .phase(Millis(1600), "wings", |s| {
                let span = s.fx().number("wingSpan");
                let color = s.rarity().color.lighten(0.3);
                for (i, angle) in WING_ANGLES.iter().enumerate() {
                    let reach = span * (1.0 - i as f64 * 0.06);
                    for mirrored in [*angle, 180.0 - *angle] {
                        let (x, y) = polar(50.0, 46.0, mirrored, reach);
                        s.spawn(
                            VisualNode::new("sr-wing")
                                .at_percent(x, y)
                                .style("transform", format!("rotate({mirrored:.0}deg)"))
                                .style("color", color.to_css())
                                .style("animation-delay", format!("{}ms", i * 70)),
                        );
                    }
                }
                s.shake(Millis(300), s.fx().number("shakeIntensity"));
            })
            .phase(Millis(2600), "feathers", |s| {
                let color = s.rarity().particle_color;
                s.add_effect(CanvasEffect::ContinuousParticles(EffectOpts {
                    color,
                    rate: s.fx().number("featherRate"),
                    duration: Millis(5000),
                    gravity: 0.02,
                    min_speed: 0.3,
                    max_speed: 1.2,
                    min_size: 6.0,
                    max_size: 12.0,
                    shape: ParticleShape::Feather,
                    glow: false,
                    ..EffectOpts::default()
                }));
                let n = s.fx().count("featherCount");
                scatter(
                    s,
                    "sr-feather",
                    n,
                    (50.0, 30.0),
                    45.0,
                    color,
                    (Millis(1800), Millis(3600)),
                );
            })
            .phase(Millis(3600), "halo", |s| {
                let r = s.rarity().clone();
                s.spawn(
                    VisualNode::new("sr-halo")
                        .at_percent(50.0, 30.0)
                        .style("border-color", r.glow_color.to_css()),
                );
                s.add_effect(CanvasEffect::RayBurst(EffectOpts {
                    y: 0.3,
                    color: r.glow_color,
                    rays: s.fx().count("rayCount") as u32,
                    duration: Millis(4200),
                    intensity: 0.6,
                    ..EffectOpts::default()
                }));
            })
            .phase(Millis(4400), "title", |s| {
                let title = title_for(s, "SERAPHIM");
                let line = text_line("sr-title", 72.0, s.rarity().color);
                if let Some(tw) = Typewriter::mount(s, line, &title, TypewriterCfg::default()) {
                    tw.start(s, Millis::ZERO);
                }
            })
    }
}
