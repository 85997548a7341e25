use crate::foundation::core::Millis;
use crate::foundation::error::{CutsceneError, CutsceneResult};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Oscillator shape for procedural tones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    /// 50% pulse, the classic chip lead.
    #[default]
    Square,
    /// Triangle, the chip bass.
    Triangle,
    /// Rising ramp.
    Sawtooth,
    /// Pure sine.
    Sine,
    /// White noise (percussion).
    Noise,
}

/// One procedural tone request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tone {
    /// Start frequency.
    pub freq_hz: f64,
    /// Linear pitch slide target reached at the end of the tone.
    pub slide_to_hz: Option<f64>,
    /// Start offset relative to the moment the tone is requested.
    pub start: Millis,
    /// Length.
    pub duration: Millis,
    /// Oscillator shape.
    pub wave: Waveform,
    /// Linear peak gain.
    pub gain: f32,
}

impl Tone {
    /// Square tone starting immediately at moderate gain.
    pub fn new(freq_hz: f64, duration: Millis) -> Self {
        Self {
            freq_hz,
            slide_to_hz: None,
            start: Millis::ZERO,
            duration,
            wave: Waveform::Square,
            gain: 0.2,
        }
    }

    /// Builder: start offset.
    pub fn at(mut self, start: Millis) -> Self {
        self.start = start;
        self
    }

    /// Builder: waveform.
    pub fn wave(mut self, wave: Waveform) -> Self {
        self.wave = wave;
        self
    }

    /// Builder: gain.
    pub fn gain(mut self, gain: f32) -> Self {
        self.gain = gain;
        self
    }

    /// Builder: pitch slide.
    pub fn slide_to(mut self, hz: f64) -> Self {
        self.slide_to_hz = Some(hz);
        self
    }
}

/// An open audio channel.
pub trait AudioOutput {
    /// Queue a tone.
    fn play(&self, tone: &Tone);
    /// Release the channel; further tones are dropped.
    fn close(&self);
}

/// Opens audio channels. Opening may fail (no device, permission denied); callers degrade to
/// silence.
pub trait AudioFactory {
    /// Open a channel for one cutscene.
    fn open(&self) -> CutsceneResult<Box<dyn AudioOutput>>;
}

/// Factory that never has an audio device.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAudio;

impl AudioFactory for NoAudio {
    fn open(&self) -> CutsceneResult<Box<dyn AudioOutput>> {
        Err(CutsceneError::audio("no audio output available"))
    }
}

#[derive(Default)]
struct AudioLog {
    tones: RefCell<Vec<Tone>>,
    opened: Cell<u32>,
    closed: Cell<u32>,
}

/// Factory whose channels record every tone.
#[derive(Default)]
pub struct RecordingAudio {
    log: Rc<AudioLog>,
}

impl RecordingAudio {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every tone played on any channel.
    pub fn tones(&self) -> Vec<Tone> {
        self.log.tones.borrow().clone()
    }

    /// Channels opened.
    pub fn opened(&self) -> u32 {
        self.log.opened.get()
    }

    /// Channels closed.
    pub fn closed(&self) -> u32 {
        self.log.closed.get()
    }
}

impl AudioFactory for RecordingAudio {
    fn open(&self) -> CutsceneResult<Box<dyn AudioOutput>> {
        self.log.opened.set(self.log.opened.get() + 1);
        Ok(Box::new(RecordingOutput {
            log: self.log.clone(),
            open: Cell::new(true),
        }))
    }
}

struct RecordingOutput {
    log: Rc<AudioLog>,
    open: Cell<bool>,
}

impl AudioOutput for RecordingOutput {
    fn play(&self, tone: &Tone) {
        if self.open.get() {
            self.log.tones.borrow_mut().push(tone.clone());
        }
    }

    fn close(&self) {
        if self.open.replace(false) {
            self.log.closed.set(self.log.closed.get() + 1);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ports/audio.rs"]
mod tests;
