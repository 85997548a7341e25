use crate::config::fx::FxConfig;
use crate::foundation::color::Color;
use crate::foundation::core::Millis;
use crate::ports::engine::{CanvasEffect, EffectOpts, ParticleShape};
use crate::ports::surface::VisualNode;
use crate::runtime::stage::Stage;
use crate::runtime::timeline::Timeline;
use crate::scenes::SceneScript;
use crate::scenes::common::{burst, flash, glow, reveal_title, scatter, title_for};

// Orbit ring radii (percent of the shorter side) with their tilt.
const ORBITS: [(f64, f64); 5] = [
    (12.0, 8.0),
    (18.0, -14.0),
    (25.0, 20.0),
    (33.0, -6.0),
    (42.0, 12.0),
];

/// Rings fall inward into a singularity that throws out a shockwave.
pub struct StellarCollapse;

impl SceneScript for StellarCollapse {
    fn name(&self) -> &'static str {
        "StellarCollapse"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["Stellar Collapse"]
    }

    fn defaults(&self) -> FxConfig {
        FxConfig::new()
            .num("starCount", 40.0)
            .num("implosionRate", 60.0)
            .num("particleCount", 150.0)
            .num("rayCount", 20.0)
            .num("shakeIntensity", 16.0)
            .text("title", "")
            .text("subtitle", "Event horizon reached")
    }

    fn timeline(&self, _stage: &Stage) -> Timeline {
        Timeline::new(Millis(11_000))
            .phase(Millis(0), "starfield", |s| {
                let n = s.fx().count("starCount");
                let color = s.rarity().particle_color.lighten(0.5);
                scatter(s, "sc-star", n, (50.0, 50.0), 60.0, color, (Millis(3000), Millis(6000)));
                glow(s, s.rarity().glow_color, Millis(3000), 0.3);
            })
            .phase(Millis(600), "orbits", |s| {
                let color = s.rarity().color;
                for (i, (radius, tilt)) in ORBITS.iter().enumerate() {
                    s.spawn(
                        VisualNode::new("sc-orbit")
                            .at_percent(50.0, 50.0)
                            .style("width", format!("{:.0}vmin", radius * 2.0))
                            .style("height", format!("{:.0}vmin", radius * 2.0))
                            .style("transform", format!("rotateX(70deg) rotate({tilt:.0}deg)"))
                            .style("border-color", color.css_alpha(0.9 - i as f64 * 0.12))
                            .style("animation-delay", format!("{}ms", i * 120)),
                    );
                }
            })
            .phase(Millis(2000), "implosion", |s| {
                s.add_effect(CanvasEffect::ContinuousParticles(EffectOpts {
                    color: s.rarity().particle_color,
                    rate: s.fx().number("implosionRate"),
                    duration: Millis(3400),
                    gravity: -0.12,
                    min_speed: 1.0,
                    max_speed: 4.0,
                    trail: true,
                    ..EffectOpts::default()
                }));
                s.pulse_class("sc-contract", Millis(3400));
            })
            .phase(Millis(4000), "accretion", |s| {
                let r = s.rarity().clone();
                s.spawn(
                    VisualNode::new("sc-accretion")
                        .at_percent(50.0, 50.0)
                        .style("border-color", r.glow_color.to_css()),
                );
                s.add_effect(CanvasEffect::RayBurst(EffectOpts {
                    color: r.glow_color,
                    rays: s.fx().count("rayCount") as u32,
                    duration: Millis(2000),
                    intensity: 0.5,
                    ..EffectOpts::default()
                }));
            })
            .phase(Millis(5600), "singularity", |s| {
                s.set_global_class("sc-singularity", true);
                s.spawn(VisualNode::new("sc-core").at_percent(50.0, 50.0));
                s.shake(Millis(700), s.fx().number("shakeIntensity") * 0.4);
            })
            .phase(Millis(6600), "shockwave", |s| {
                let r = s.rarity().clone();
                s.set_global_class("sc-singularity", false);
                flash(s, Color::WHITE, Millis(450));
                s.spawn_for(
                    VisualNode::new("sc-shockwave")
                        .at_percent(50.0, 50.0)
                        .style("border-color", r.color.to_css()),
                    Millis(1200),
                );
                burst(s, r.particle_color, s.fx().count("particleCount"), ParticleShape::Star);
                s.shake(Millis(900), s.fx().number("shakeIntensity"));
            })
            .phase(Millis(7600), "title", |s| {
                let title = title_for(s, "STELLAR COLLAPSE");
                let sub = s.fx().string("subtitle").to_owned();
                reveal_title(s, &title, &sub, s.rarity().color, Millis(3000));
            })
    }
}
