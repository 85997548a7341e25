use crate::config::fx::FxConfig;
use crate::foundation::color::Color;
use crate::foundation::core::Millis;
use crate::ports::engine::{CanvasEffect, EffectOpts, ParticleShape};
use crate::ports::surface::VisualNode;
use crate::runtime::stage::Stage;
use crate::runtime::timeline::Timeline;
use crate::scenes::SceneScript;
use crate::scenes::common::{burst, flash, glow, place_presets, reveal_title, scatter, title_for};

// Crack endpoints around the core, in percent of the surface.
const CRACKS: [(f64, f64); 12] = [
    (50.0, 38.0),
    (58.5, 42.0),
    (61.0, 50.0),
    (58.0, 58.5),
    (50.0, 62.0),
    (42.0, 58.0),
    (39.0, 50.0),
    (41.5, 41.5),
    (54.0, 34.0),
    (64.0, 46.0),
    (46.0, 66.0),
    (36.0, 54.0),
];
const CRACK_ANGLES: [f64; 6] = [-90.0, -30.0, 0.0, 45.0, 90.0, 150.0];

/// Star core ignites, cracks, collapses and detonates.
pub struct Supernova;

impl SceneScript for Supernova {
    fn name(&self) -> &'static str {
        "Supernova"
    }

    fn defaults(&self) -> FxConfig {
        FxConfig::new()
            .num("crackCount", 8.0)
            .num("debrisCount", 24.0)
            .num("particleCount", 120.0)
            .num("emberCount", 30.0)
            .num("rayCount", 16.0)
            .num("shakeIntensity", 14.0)
            .text("title", "")
            .text("subtitle", "A star is born")
    }

    fn timeline(&self, _stage: &Stage) -> Timeline {
        Timeline::new(Millis(8000))
            .phase(Millis(0), "dim", |s| {
                s.set_global_class("sn-dim", true);
                s.spawn(
                    VisualNode::new("sn-core")
                        .at_percent(50.0, 50.0)
                        .style("background", s.rarity().color.to_css()),
                );
            })
            .phase(Millis(400), "ignite", |s| {
                glow(s, s.rarity().glow_color, Millis(2200), 0.5);
                s.pulse_class("sn-core-pulse", Millis(1400));
            })
            .phase(Millis(1200), "cracks", |s| {
                let n = s.fx().count("crackCount");
                place_presets(s, "sn-crack", &CRACKS, &CRACK_ANGLES, s.rarity().glow_color, n);
            })
            .phase(Millis(2600), "collapse", |s| {
                let intensity = s.fx().number("shakeIntensity");
                s.shake(Millis(600), intensity * 0.5);
                let n = s.fx().count("debrisCount");
                let color = s.rarity().particle_color;
                scatter(s, "sn-debris", n, (50.0, 50.0), 40.0, color, (Millis(500), Millis(900)));
            })
            .phase(Millis(3400), "detonate", |s| {
                let r = s.rarity().clone();
                flash(s, Color::WHITE, Millis(500));
                burst(s, r.particle_color, s.fx().count("particleCount"), ParticleShape::Star);
                s.add_effect(CanvasEffect::RayBurst(EffectOpts {
                    color: r.glow_color,
                    rays: s.fx().count("rayCount") as u32,
                    duration: Millis(2400),
                    intensity: 0.8,
                    ..EffectOpts::default()
                }));
                s.shake(Millis(800), s.fx().number("shakeIntensity"));
            })
            .phase(Millis(4200), "embers", |s| {
                let color = s.rarity().particle_color;
                s.add_effect(CanvasEffect::ContinuousParticles(EffectOpts {
                    color,
                    rate: 24.0,
                    duration: Millis(3000),
                    gravity: 0.04,
                    min_speed: 0.5,
                    max_speed: 2.0,
                    shape: ParticleShape::Spark,
                    ..EffectOpts::default()
                }));
                let n = s.fx().count("emberCount");
                scatter(s, "sn-ember", n, (50.0, 55.0), 35.0, color, (Millis(1200), Millis(2600)));
            })
            .phase(Millis(5200), "title", |s| {
                let title = title_for(s, "SUPERNOVA");
                let sub = s.fx().string("subtitle").to_owned();
                reveal_title(s, &title, &sub, s.rarity().color, Millis(2600));
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/supernova.rs"]
mod tests;
