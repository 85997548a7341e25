use crate::config::fx::FxConfig;
use crate::foundation::color::Color;
use crate::foundation::core::Millis;
use crate::ports::audio::{Tone, Waveform};
use crate::ports::engine::{CanvasEffect, EffectOpts, ParticleShape};
use crate::ports::surface::VisualNode;
use crate::runtime::stage::Stage;
use crate::runtime::timeline::Timeline;
use crate::runtime::typewriter::{Typewriter, TypewriterCfg};
use crate::scenes::SceneScript;
use crate::scenes::common::{flash, scatter, text_line, title_for};

const GRID_COLS: usize = 8;
const GRID_ROWS: usize = 5;
// C major arpeggio, two octaves.
const ARPEGGIO: [f64; 8] = [261.63, 329.63, 392.0, 523.25, 659.25, 783.99, 1046.5, 1318.5];
const FANFARE: [f64; 3] = [523.25, 659.25, 783.99];
const NOTE: Millis = Millis(110);

/// Retro boot sequence with chiptune audio.
pub struct PixelGenesis;

fn grid_cell(i: usize) -> (f64, f64) {
    let col = i % GRID_COLS;
    let row = i / GRID_COLS;
    (
        20.0 + col as f64 * (60.0 / (GRID_COLS - 1) as f64),
        25.0 + row as f64 * (40.0 / (GRID_ROWS - 1) as f64),
    )
}

impl SceneScript for PixelGenesis {
    fn name(&self) -> &'static str {
        "PixelGenesis"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["8-Bit Genesis"]
    }

    fn wants_audio(&self) -> bool {
        true
    }

    fn defaults(&self) -> FxConfig {
        FxConfig::new()
            .num("pixelCount", 48.0)
            .num("particleCount", 80.0)
            .num("shakeIntensity", 8.0)
            .num("volume", 0.18)
            .flag("sound", true)
            .text("title", "")
    }

    fn timeline(&self, _stage: &Stage) -> Timeline {
        Timeline::new(Millis(9000))
            .phase(Millis(0), "boot", |s| {
                s.set_global_class("px-crt", true);
                let r = s.rarity().clone();
                for i in 0..GRID_COLS * GRID_ROWS {
                    let (x, y) = grid_cell(i);
                    let shade = r.color.mix(r.glow_color, (i % 3) as f64 / 2.0);
                    s.spawn(
                        VisualNode::new("px-cell")
                            .at_percent(x, y)
                            .style("background", shade.to_css())
                            .style("animation-delay", format!("{}ms", (i * 17) % 600)),
                    );
                }
                chirp(s, &Tone::new(110.0, Millis(180)).wave(Waveform::Square).slide_to(220.0));
            })
            .phase(Millis(700), "arpeggio", |s| {
                for (i, hz) in ARPEGGIO.iter().enumerate() {
                    chirp(s, &Tone::new(*hz, NOTE).wave(Waveform::Square).at(NOTE * i as u64));
                }
            })
            .phase(Millis(1400), "pixels", |s| {
                let r = s.rarity().clone();
                s.add_effect(CanvasEffect::ParticleBurst(EffectOpts {
                    color: r.particle_color,
                    count: s.fx().count("particleCount") as u32,
                    shape: ParticleShape::Square,
                    glow: false,
                    min_size: 4.0,
                    max_size: 8.0,
                    gravity: 0.15,
                    ..EffectOpts::default()
                }));
                let n = s.fx().count("pixelCount");
                scatter(
                    s,
                    "px-pixel",
                    n,
                    (50.0, 45.0),
                    40.0,
                    r.particle_color,
                    (Millis(700), Millis(1600)),
                );
                chirp(s, &Tone::new(0.0, Millis(240)).wave(Waveform::Noise));
            })
            .phase(Millis(2800), "powerup", |s| {
                chirp(
                    s,
                    &Tone::new(220.0, Millis(600))
                        .wave(Waveform::Square)
                        .slide_to(880.0),
                );
                flash(s, Color::WHITE, Millis(300));
                s.shake(Millis(400), s.fx().number("shakeIntensity"));
            })
            .phase(Millis(3600), "title", |s| {
                let title = title_for(s, "PIXEL GENESIS");
                let cfg = TypewriterCfg {
                    char_delay: Millis(70),
                    jitter: Millis(10),
                    hesitation_chance: 0.0,
                    cursor_class: "px-cursor".to_owned(),
                    ..TypewriterCfg::default()
                };
                let line = text_line("px-title", 78.0, s.rarity().color);
                if let Some(tw) = Typewriter::mount(s, line, &title, cfg) {
                    tw.start(s, Millis::ZERO);
                }
                for i in 0..title.chars().count() as u64 {
                    chirp(
                        s,
                        &Tone::new(1760.0, Millis(30))
                            .wave(Waveform::Triangle)
                            .at(Millis(75) * i),
                    );
                }
            })
            .phase(Millis(6000), "fanfare", |s| {
                for (i, hz) in FANFARE.iter().enumerate() {
                    chirp(s, &Tone::new(*hz, Millis(160)).at(Millis(160) * i as u64));
                }
                chirp(
                    s,
                    &Tone::new(FANFARE[0] * 2.0, Millis(900)).at(Millis(480)),
                );
            })
    }
}

// Tone through the stage channel, honoring the sound knobs.
fn chirp(stage: &Stage, tone: &Tone) {
    if !stage.fx().enabled("sound") {
        return;
    }
    let gain = (tone.gain * stage.fx().number("volume") as f32 / 0.2).clamp(0.0, 1.0);
    stage.play_tone(&tone.clone().gain(gain));
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/pixel_genesis.rs"]
mod tests;
