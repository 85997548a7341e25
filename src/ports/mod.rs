//! Capability ports consumed by the orchestration core.
//!
//! Each port is a small `&self` trait so one instance can be shared (`Rc`) between the manager,
//! every stage and the host. Every port ships a headless implementation used by tests and the
//! `cutscene` binary.

/// Optional audio output.
pub mod audio;
/// Timer primitive and the manual (fake) clock.
pub mod clock;
/// Canvas render engine collaborator.
pub mod engine;
/// Visual node surface.
pub mod surface;

use std::rc::Rc;

/// Bundle of the four ports a cutscene needs.
#[derive(Clone)]
pub struct Ports {
    /// Timer primitive.
    pub clock: Rc<dyn clock::TimerHost>,
    /// Visible surface for spawned nodes.
    pub surface: Rc<dyn surface::Surface>,
    /// Canvas effects and screen shake.
    pub engine: Rc<dyn engine::RenderEngine>,
    /// Optional audio.
    pub audio: Rc<dyn audio::AudioFactory>,
}

impl Ports {
    /// Bundle ports.
    pub fn new(
        clock: Rc<dyn clock::TimerHost>,
        surface: Rc<dyn surface::Surface>,
        engine: Rc<dyn engine::RenderEngine>,
        audio: Rc<dyn audio::AudioFactory>,
    ) -> Self {
        Self {
            clock,
            surface,
            engine,
            audio,
        }
    }
}

/// Concrete headless ports, keeping typed handles for inspection.
#[derive(Clone)]
pub struct Headless {
    /// Fake clock.
    pub clock: Rc<clock::ManualClock>,
    /// In-memory surface.
    pub surface: Rc<surface::MemorySurface>,
    /// Call-recording engine.
    pub engine: Rc<engine::RecordingEngine>,
    /// Tone-recording audio.
    pub audio: Rc<audio::RecordingAudio>,
}

impl Headless {
    /// Fresh headless ports with working (recording) audio.
    pub fn new() -> Self {
        Self {
            clock: Rc::new(clock::ManualClock::new()),
            surface: Rc::new(surface::MemorySurface::new()),
            engine: Rc::new(engine::RecordingEngine::new()),
            audio: Rc::new(audio::RecordingAudio::new()),
        }
    }

    /// Erase to the trait-object bundle.
    pub fn ports(&self) -> Ports {
        Ports::new(
            self.clock.clone(),
            self.surface.clone(),
            self.engine.clone(),
            self.audio.clone(),
        )
    }

    /// Same ports but with an audio factory that always fails to open.
    pub fn ports_without_audio(&self) -> Ports {
        Ports::new(
            self.clock.clone(),
            self.surface.clone(),
            self.engine.clone(),
            Rc::new(audio::NoAudio),
        )
    }
}

impl Default for Headless {
    fn default() -> Self {
        Self::new()
    }
}
