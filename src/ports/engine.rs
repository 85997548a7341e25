use crate::foundation::color::Color;
use crate::foundation::core::Millis;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

/// Particle sprite variant understood by the canvas engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleShape {
    /// Soft round dot.
    #[default]
    Circle,
    /// Hard-edged pixel.
    Square,
    /// Four-point star.
    Star,
    /// Elongated streak.
    Spark,
    /// Drifting feather.
    Feather,
    /// Random text glyph.
    Glyph,
}

/// Options shared by every canvas effect. Effects ignore the fields they do not use.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EffectOpts {
    /// Origin, as a fraction of the canvas width.
    pub x: f64,
    /// Origin (or text baseline), as a fraction of the canvas height.
    pub y: f64,
    /// Main color.
    pub color: Color,
    /// Lifetime; the effect expires on its own afterwards.
    pub duration: Millis,
    /// Particles emitted by a burst.
    pub count: u32,
    /// Minimum particle speed (px/frame).
    pub min_speed: f64,
    /// Maximum particle speed (px/frame).
    pub max_speed: f64,
    /// Minimum particle size (px).
    pub min_size: f64,
    /// Maximum particle size (px).
    pub max_size: f64,
    /// Downward acceleration; negative values pull inward/upward.
    pub gravity: f64,
    /// Emission cone in degrees.
    pub spread: f64,
    /// Additive glow around particles.
    pub glow: bool,
    /// Motion trails.
    pub trail: bool,
    /// Particles per second for continuous emitters.
    pub rate: f64,
    /// Particle sprite.
    pub shape: ParticleShape,
    /// Ray count for ray bursts.
    pub rays: u32,
    /// Peak opacity for overlays and rays, `[0, 1]`.
    pub intensity: f64,
    /// Font for reveal text.
    pub font: Option<String>,
    /// Secondary line for reveal text.
    pub subtext: Option<String>,
}

impl Default for EffectOpts {
    fn default() -> Self {
        Self {
            x: 0.5,
            y: 0.5,
            color: Color::WHITE,
            duration: Millis(1000),
            count: 30,
            min_speed: 2.0,
            max_speed: 6.0,
            min_size: 2.0,
            max_size: 5.0,
            gravity: 0.0,
            spread: 360.0,
            glow: true,
            trail: false,
            rate: 0.0,
            shape: ParticleShape::Circle,
            rays: 0,
            intensity: 1.0,
            font: None,
            subtext: None,
        }
    }
}

/// Self-expiring canvas effect registered with [`RenderEngine::add_effect`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CanvasEffect {
    /// One-shot radial emission.
    ParticleBurst(EffectOpts),
    /// Rate-based emission over the effect duration.
    ContinuousParticles(EffectOpts),
    /// Full-screen glow with fade in/out.
    GlowOverlay(EffectOpts),
    /// Rotating radial rays.
    RayBurst(EffectOpts),
    /// Timed canvas text with glow.
    RevealText {
        /// Main line.
        text: String,
        /// Styling and placement.
        opts: EffectOpts,
    },
}

impl CanvasEffect {
    /// Stable kind name.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ParticleBurst(_) => "particle_burst",
            Self::ContinuousParticles(_) => "continuous_particles",
            Self::GlowOverlay(_) => "glow_overlay",
            Self::RayBurst(_) => "ray_burst",
            Self::RevealText { .. } => "reveal_text",
        }
    }

    /// Effect options.
    pub fn opts(&self) -> &EffectOpts {
        match self {
            Self::ParticleBurst(o)
            | Self::ContinuousParticles(o)
            | Self::GlowOverlay(o)
            | Self::RayBurst(o) => o,
            Self::RevealText { opts, .. } => opts,
        }
    }
}

/// Canvas render engine and screen-shake host.
pub trait RenderEngine {
    /// Impulse-style screen shake; fire-and-forget.
    fn shake(&self, intensity: f64);
    /// Register a self-expiring canvas effect.
    fn add_effect(&self, effect: CanvasEffect);
    /// Remove every active canvas effect immediately.
    fn clear_all(&self);
}

/// Engine that ignores every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullEngine;

impl RenderEngine for NullEngine {
    fn shake(&self, _intensity: f64) {}
    fn add_effect(&self, _effect: CanvasEffect) {}
    fn clear_all(&self) {}
}

/// One call observed by [`RecordingEngine`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum EngineCall {
    /// `shake(intensity)`.
    Shake {
        /// Requested intensity.
        intensity: f64,
    },
    /// `add_effect(effect)`.
    AddEffect(CanvasEffect),
    /// `clear_all()`.
    ClearAll,
}

/// Engine that records every call and tracks the effects added since the last `clear_all`.
#[derive(Default)]
pub struct RecordingEngine {
    calls: RefCell<Vec<EngineCall>>,
    active: RefCell<Vec<CanvasEffect>>,
}

impl RecordingEngine {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call in order.
    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.borrow().clone()
    }

    /// Number of calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Intensities of every shake request.
    pub fn shakes(&self) -> Vec<f64> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                EngineCall::Shake { intensity } => Some(*intensity),
                _ => None,
            })
            .collect()
    }

    /// Every effect ever added.
    pub fn effects(&self) -> Vec<CanvasEffect> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                EngineCall::AddEffect(e) => Some(e.clone()),
                _ => None,
            })
            .collect()
    }

    /// Effects added since the last `clear_all` (expiry is not simulated).
    pub fn active_effects(&self) -> usize {
        self.active.borrow().len()
    }

    /// Number of `clear_all` calls.
    pub fn clear_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, EngineCall::ClearAll))
            .count()
    }
}

impl RenderEngine for RecordingEngine {
    fn shake(&self, intensity: f64) {
        self.calls
            .borrow_mut()
            .push(EngineCall::Shake { intensity });
    }

    fn add_effect(&self, effect: CanvasEffect) {
        self.active.borrow_mut().push(effect.clone());
        self.calls.borrow_mut().push(EngineCall::AddEffect(effect));
    }

    fn clear_all(&self) {
        self.active.borrow_mut().clear();
        self.calls.borrow_mut().push(EngineCall::ClearAll);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ports/engine.rs"]
mod tests;
