//! Authoring helpers shared by scene scripts.
//!
//! Structural elements take fixed preset lists; particle-level elements sample the stage RNG.

use crate::foundation::color::Color;
use crate::foundation::core::Millis;
use crate::ports::engine::{CanvasEffect, EffectOpts, ParticleShape};
use crate::ports::surface::VisualNode;
use crate::runtime::stage::Stage;

/// Point at `dist` percent from (`cx`, `cy`) along `angle_deg`.
pub(crate) fn polar(cx: f64, cy: f64, angle_deg: f64, dist: f64) -> (f64, f64) {
    let a = angle_deg.to_radians();
    (cx + a.cos() * dist, cy + a.sin() * dist)
}

/// Full-screen flash node removed after `ttl`.
pub(crate) fn flash(stage: &Stage, color: Color, ttl: Millis) {
    stage.spawn_for(
        VisualNode::new("cutscene-flash")
            .style("background", color.to_css())
            .style("animation-duration", format!("{}ms", ttl.0)),
        ttl,
    );
}

/// Full-screen canvas glow.
pub(crate) fn glow(stage: &Stage, color: Color, duration: Millis, intensity: f64) {
    stage.add_effect(CanvasEffect::GlowOverlay(EffectOpts {
        color,
        duration,
        intensity,
        ..EffectOpts::default()
    }));
}

/// One-shot radial particle burst from the center.
pub(crate) fn burst(stage: &Stage, color: Color, count: usize, shape: ParticleShape) {
    stage.add_effect(CanvasEffect::ParticleBurst(EffectOpts {
        color,
        count: count as u32,
        shape,
        min_speed: 3.0,
        max_speed: 11.0,
        duration: Millis(2200),
        trail: true,
        ..EffectOpts::default()
    }));
}

/// Canvas title with glow.
pub(crate) fn reveal_title(
    stage: &Stage,
    text: &str,
    subtext: &str,
    color: Color,
    duration: Millis,
) {
    stage.add_effect(CanvasEffect::RevealText {
        text: text.to_owned(),
        opts: EffectOpts {
            color,
            duration,
            y: 0.42,
            font: Some("700 64px 'Cinzel', serif".to_owned()),
            subtext: (!subtext.is_empty()).then(|| subtext.to_owned()),
            ..EffectOpts::default()
        },
    });
}

/// Spawn `count` short-lived particles at random positions around (`cx`, `cy`).
///
/// Each particle picks its own angle, distance, size and lifetime.
pub(crate) fn scatter(
    stage: &Stage,
    class: &str,
    count: usize,
    (cx, cy): (f64, f64),
    max_dist: f64,
    color: Color,
    ttl: (Millis, Millis),
) -> usize {
    let mut spawned = 0;
    for _ in 0..count {
        let angle = stage.random(0.0, 360.0);
        let dist = stage.random(0.0, max_dist);
        let size = stage.random(2.0, 7.0);
        let life = stage.random_millis(ttl.0, ttl.1);
        let (x, y) = polar(cx, cy, angle, dist);
        let node = VisualNode::new(class)
            .at_percent(x, y)
            .style("width", format!("{size:.1}px"))
            .style("height", format!("{size:.1}px"))
            .style("background", color.to_css())
            .style("--angle", format!("{angle:.1}deg"))
            .style("animation-duration", format!("{}ms", life.0));
        if stage.spawn_for(node, life).is_some() {
            spawned += 1;
        }
    }
    spawned
}

/// Spawn one node per preset position, cycling through `rotations` by index.
pub(crate) fn place_presets(
    stage: &Stage,
    class: &str,
    presets: &[(f64, f64)],
    rotations: &[f64],
    color: Color,
    limit: usize,
) -> usize {
    let mut spawned = 0;
    for (i, &(x, y)) in presets.iter().take(limit).enumerate() {
        let rot = if rotations.is_empty() {
            0.0
        } else {
            rotations[i % rotations.len()]
        };
        let node = VisualNode::new(class)
            .at_percent(x, y)
            .style("transform", format!("rotate({rot:.0}deg)"))
            .style("color", color.to_css())
            .style("animation-delay", format!("{}ms", i * 60));
        if stage.spawn(node).is_some() {
            spawned += 1;
        }
    }
    spawned
}

/// Title text: the `title` knob, else the rarity name, else `default`.
pub(crate) fn title_for(stage: &Stage, default: &str) -> String {
    let knob = stage.fx().string("title");
    if !knob.is_empty() {
        return knob.to_owned();
    }
    match stage.rarity().name.as_deref() {
        Some(name) if !name.is_empty() => name.to_uppercase(),
        _ => default.to_owned(),
    }
}

/// Centered text node for typewriter reveals.
pub(crate) fn text_line(class: &str, y: f64, color: Color) -> VisualNode {
    VisualNode::new(class)
        .at_percent(50.0, y)
        .style("color", color.to_css())
        .style("text-shadow", format!("0 0 18px {}", color.css_alpha(0.8)))
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/common.rs"]
mod tests;
