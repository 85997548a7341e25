use crate::foundation::core::{Millis, Rng64};
use crate::foundation::error::{CutsceneError, CutsceneResult};
use crate::ports::audio::{AudioFactory, AudioOutput, Tone, Waveform};
use crate::ports::clock::TimerHost;
use std::cell::{Cell, RefCell};
use std::path::Path;
use std::rc::Rc;

/// Default output sample rate.
pub const SYNTH_SAMPLE_RATE: u32 = 48_000;

// Attack/release ramps that keep square waves from clicking.
const RAMP_SEC: f64 = 0.004;

/// A tone pinned to absolute clock time.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledTone {
    /// Absolute start time.
    pub at: Millis,
    /// Tone parameters.
    pub tone: Tone,
}

/// Render scheduled tones into mono `f32` PCM starting at clock time zero.
///
/// Overlapping tones are summed and the result clamped to `[-1, 1]`.
pub fn render_mono(tones: &[ScheduledTone], sample_rate: u32) -> Vec<f32> {
    let end = tones
        .iter()
        .map(|t| t.at + t.tone.duration)
        .max()
        .unwrap_or(Millis::ZERO);
    let mut out = vec![0.0f32; ms_to_samples(end, sample_rate)];

    for (i, st) in tones.iter().enumerate() {
        mix_tone(&mut out, st, sample_rate, i as u64);
    }

    for s in &mut out {
        *s = s.clamp(-1.0, 1.0);
    }
    out
}

fn ms_to_samples(ms: Millis, sample_rate: u32) -> usize {
    let num = u128::from(ms.0) * u128::from(sample_rate);
    ((num + 500) / 1000) as usize
}

fn mix_tone(out: &mut [f32], st: &ScheduledTone, sample_rate: u32, noise_seed: u64) {
    let start = ms_to_samples(st.at, sample_rate);
    let len = ms_to_samples(st.tone.duration, sample_rate);
    // Noise ignores frequency.
    if len == 0 || (st.tone.wave != Waveform::Noise && st.tone.freq_hz <= 0.0) {
        return;
    }

    let sr = f64::from(sample_rate);
    let len_sec = (len as f64) / sr;
    let f0 = st.tone.freq_hz;
    let f1 = st.tone.slide_to_hz.unwrap_or(f0);
    let mut phase = 0.0f64;
    let mut rng = Rng64::new(noise_seed ^ st.at.0);

    for rel in 0..len {
        let Some(slot) = out.get_mut(start + rel) else {
            break;
        };
        let rel_sec = (rel as f64) / sr;
        let freq = f0 + (f1 - f0) * (rel_sec / len_sec);

        let v = match st.tone.wave {
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
            Waveform::Sawtooth => 2.0 * phase - 1.0,
            Waveform::Sine => (std::f64::consts::TAU * phase).sin(),
            Waveform::Noise => rng.range_f64(-1.0, 1.0),
        };

        let gain = ramp_gain(rel_sec, len_sec) * st.tone.gain;
        *slot += (v as f32) * gain;

        phase = (phase + freq / sr).fract();
    }
}

fn ramp_gain(rel_sec: f64, len_sec: f64) -> f32 {
    let mut gain = 1.0f32;
    let ramp = RAMP_SEC.min(len_sec / 2.0);
    if ramp > 0.0 {
        gain *= (rel_sec / ramp).clamp(0.0, 1.0) as f32;
        let rem = (len_sec - rel_sec).max(0.0);
        gain *= (rem / ramp).clamp(0.0, 1.0) as f32;
    }
    gain
}

/// Write `f32` PCM samples to a raw little-endian `.f32le` file.
pub fn write_f32le(samples: &[f32], out_path: &Path) -> CutsceneResult<()> {
    if let Some(parent) = out_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            CutsceneError::audio(format!(
                "failed to create audio output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }

    let mut bytes = Vec::<u8>::with_capacity(samples.len() * 4);
    for &sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    std::fs::write(out_path, bytes).map_err(|e| {
        CutsceneError::audio(format!(
            "failed to write audio file '{}': {e}",
            out_path.display()
        ))
    })
}

/// Audio factory that pins tones to the clock and renders them on demand.
pub struct SynthAudio {
    clock: Rc<dyn TimerHost>,
    sample_rate: u32,
    track: Rc<RefCell<Vec<ScheduledTone>>>,
}

impl SynthAudio {
    /// Synth stamping tones with `clock` time.
    pub fn new(clock: Rc<dyn TimerHost>, sample_rate: u32) -> Self {
        Self {
            clock,
            sample_rate,
            track: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Tones received so far, in request order.
    pub fn scheduled(&self) -> Vec<ScheduledTone> {
        self.track.borrow().clone()
    }

    /// Render every received tone.
    pub fn render(&self) -> Vec<f32> {
        render_mono(&self.track.borrow(), self.sample_rate)
    }

    /// Output sample rate.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

impl AudioFactory for SynthAudio {
    fn open(&self) -> CutsceneResult<Box<dyn AudioOutput>> {
        if self.sample_rate == 0 {
            return Err(CutsceneError::audio("synth sample rate must be > 0"));
        }
        Ok(Box::new(SynthOutput {
            clock: self.clock.clone(),
            track: self.track.clone(),
            open: Cell::new(true),
        }))
    }
}

struct SynthOutput {
    clock: Rc<dyn TimerHost>,
    track: Rc<RefCell<Vec<ScheduledTone>>>,
    open: Cell<bool>,
}

impl AudioOutput for SynthOutput {
    fn play(&self, tone: &Tone) {
        if !self.open.get() {
            return;
        }
        self.track.borrow_mut().push(ScheduledTone {
            at: self.clock.now() + tone.start,
            tone: tone.clone(),
        });
    }

    fn close(&self) {
        self.open.set(false);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/synth.rs"]
mod tests;
