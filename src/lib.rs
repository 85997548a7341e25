//! Timed, cancellable cutscene orchestration for gacha reveals.
//!
//! A cutscene is a data-first [`Timeline`] of phases executed by a per-instance [`Stage`] that
//! owns every timer and visual node it creates. Completion or [`Cutscene::stop`] always leaves
//! the surface clean. The [`CutsceneManager`] keeps at most one cutscene active.
//!
//! Everything the core touches goes through injected ports:
//!
//! - [`TimerHost`] for deferred callbacks ([`ManualClock`] for headless runs)
//! - [`Surface`] for visual nodes and surface-wide classes ([`MemorySurface`])
//! - [`RenderEngine`] for canvas effects and screen shake ([`RecordingEngine`])
//! - [`AudioFactory`] for optional tones ([`RecordingAudio`], [`SynthAudio`], [`NoAudio`])
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod audio;
mod config;
mod foundation;
mod manager;
/// Injected capability ports and their headless implementations.
pub mod ports;
mod runtime;
mod scenes;

pub use crate::audio::synth::{
    SYNTH_SAMPLE_RATE, ScheduledTone, SynthAudio, render_mono, write_f32le,
};
pub use crate::config::fx::{FxConfig, FxValue};
pub use crate::config::rarity::{Rarity, RarityTable};
pub use crate::foundation::color::Color;
pub use crate::foundation::core::{Millis, NodeId, Rng64, TimerHandle};
pub use crate::foundation::error::{CutsceneError, CutsceneResult};
pub use crate::manager::{CutsceneManager, ManagerOpts};
pub use crate::ports::audio::{AudioFactory, AudioOutput, NoAudio, RecordingAudio, Tone, Waveform};
pub use crate::ports::clock::{ManualClock, TimerCallback, TimerHost};
pub use crate::ports::engine::{
    CanvasEffect, EffectOpts, EngineCall, NullEngine, ParticleShape, RecordingEngine, RenderEngine,
};
pub use crate::ports::surface::{MemorySurface, Surface, VisualNode};
pub use crate::ports::{Headless, Ports};
pub use crate::runtime::completion::Completion;
pub use crate::runtime::registry::{SpawnRegistry, TimerRegistry};
pub use crate::runtime::stage::{SHAKE_CLASS, SceneCtx, SceneState, Stage};
pub use crate::runtime::timeline::{Phase, PhaseAction, PhaseSummary, RESOLVE_LABEL, Timeline};
pub use crate::runtime::typewriter::{
    Finale, MessageChain, RevealProgress, Tick, Ticker, Typewriter, TypewriterCfg,
};
pub use crate::scenes::{Cutscene, SceneRegistry, SceneScript};
