use crate::config::fx::FxConfig;
use crate::config::rarity::Rarity;
use crate::foundation::core::{Millis, NodeId, Rng64, TimerHandle};
use crate::ports::Ports;
use crate::ports::audio::{AudioOutput, Tone};
use crate::ports::engine::CanvasEffect;
use crate::ports::surface::VisualNode;
use crate::runtime::completion::Completion;
use crate::runtime::registry::{SpawnRegistry, TimerRegistry};
use crate::runtime::timeline::{Phase, RESOLVE_LABEL, Timeline};
use crate::runtime::typewriter::{Tick, Ticker};
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

/// Surface-wide class toggled while the screen shakes.
pub const SHAKE_CLASS: &str = "cutscene-shake";

/// Lifecycle of one cutscene instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneState {
    /// Constructed, not yet played.
    Idle,
    /// Timeline running.
    Playing,
    /// Terminal: stopped or completed.
    Stopped,
}

/// Everything a cutscene is constructed from.
#[derive(Clone)]
pub struct SceneCtx {
    /// Injected ports.
    pub ports: Ports,
    /// Color scheme and fx overrides.
    pub rarity: Rarity,
    /// Seed for per-particle randomness.
    pub seed: u64,
}

/// Per-instance runtime of one cutscene.
///
/// Owns the terminal flag, the timer and spawn registries, the merged fx knobs, the RNG and the
/// optional audio channel. Cheap to clone; clones share state. Timer callbacks hold weak
/// references, and dropping the last handle of a stage that never stopped cleans up like
/// [`Stage::stop`].
#[derive(Clone)]
pub struct Stage {
    inner: Rc<StageInner>,
}

struct StageInner {
    scene: &'static str,
    ports: Ports,
    rarity: Rarity,
    fx: FxConfig,
    state: Cell<SceneState>,
    timers: RefCell<TimerRegistry>,
    spawned: RefCell<SpawnRegistry>,
    global_classes: RefCell<BTreeSet<String>>,
    rng: RefCell<Rng64>,
    audio: RefCell<Option<Box<dyn AudioOutput>>>,
    completion: Completion,
}

impl StageInner {
    fn is_stopped(&self) -> bool {
        self.state.get() == SceneState::Stopped
    }

    // Cancel timers, restore global classes, detach nodes, release audio.
    fn halt(&self) {
        let cancelled = self
            .timers
            .borrow_mut()
            .cancel_all(self.ports.clock.as_ref());

        let classes = std::mem::take(&mut *self.global_classes.borrow_mut());
        for class in &classes {
            self.ports.surface.set_global_class(class, false);
        }

        let killed = self
            .spawned
            .borrow_mut()
            .kill_all(self.ports.surface.as_ref());

        if let Some(audio) = self.audio.borrow_mut().take() {
            audio.close();
        }

        tracing::trace!(scene = self.scene, cancelled, killed, "stage halted");
    }
}

impl Drop for StageInner {
    fn drop(&mut self) {
        if !self.is_stopped() {
            self.state.set(SceneState::Stopped);
            self.halt();
        }
    }
}

impl Stage {
    /// Build a stage for scene `scene`, merging the rarity's overrides over `defaults`.
    ///
    /// When `wants_audio` is set an audio channel is opened; failure leaves the stage silent.
    pub fn new(scene: &'static str, ctx: SceneCtx, defaults: &FxConfig, wants_audio: bool) -> Self {
        let fx = FxConfig::merged(defaults, &ctx.rarity.effects);
        let audio = if wants_audio {
            match ctx.ports.audio.open() {
                Ok(out) => Some(out),
                Err(e) => {
                    tracing::debug!(scene, error = %e, "audio unavailable, playing silently");
                    None
                }
            }
        } else {
            None
        };

        Self {
            inner: Rc::new(StageInner {
                scene,
                ports: ctx.ports,
                rarity: ctx.rarity,
                fx,
                state: Cell::new(SceneState::Idle),
                timers: RefCell::new(TimerRegistry::new()),
                spawned: RefCell::new(SpawnRegistry::new()),
                global_classes: RefCell::new(BTreeSet::new()),
                rng: RefCell::new(Rng64::new(ctx.seed)),
                audio: RefCell::new(audio),
                completion: Completion::new(),
            }),
        }
    }

    /// Scene name; stamped as owner on every spawned node.
    pub fn scene(&self) -> &'static str {
        self.inner.scene
    }

    /// Lifecycle state.
    pub fn state(&self) -> SceneState {
        self.inner.state.get()
    }

    /// Return `true` once stopped or completed.
    pub fn is_stopped(&self) -> bool {
        self.inner.is_stopped()
    }

    /// Rarity this stage plays for.
    pub fn rarity(&self) -> &Rarity {
        &self.inner.rarity
    }

    /// Merged fx knobs.
    pub fn fx(&self) -> &FxConfig {
        &self.inner.fx
    }

    /// Clock time.
    pub fn now(&self) -> Millis {
        self.inner.ports.clock.now()
    }

    /// The completion signal `play()` returns.
    pub fn completion(&self) -> Completion {
        self.inner.completion.clone()
    }

    /// Return `true` when an audio channel is open.
    pub fn has_audio(&self) -> bool {
        self.inner.audio.borrow().is_some()
    }

    /// Outstanding timer handles (fired ones included until the next wholesale cancel).
    pub fn tracked_timers(&self) -> usize {
        self.inner.timers.borrow().len()
    }

    /// Nodes spawned and not yet killed by [`Stage::kill_all`].
    pub fn tracked_nodes(&self) -> usize {
        self.inner.spawned.borrow().len()
    }

    /// Run `action` after `delay` from now unless the stage stops first.
    ///
    /// Returns `None` without scheduling anything once stopped.
    pub fn schedule(
        &self,
        delay: Millis,
        action: impl FnOnce(&Stage) + 'static,
    ) -> Option<TimerHandle> {
        if self.is_stopped() {
            return None;
        }
        let weak: Weak<StageInner> = Rc::downgrade(&self.inner);
        let handle = self.inner.ports.clock.set_timeout(
            delay,
            Box::new(move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let stage = Stage { inner };
                if stage.is_stopped() {
                    return;
                }
                action(&stage);
            }),
        );
        self.inner.timers.borrow_mut().track(handle);
        Some(handle)
    }

    /// Tick `ticker` after `delay`, rescheduling for as long as it asks to.
    pub fn run_ticker<T: Ticker + 'static>(&self, delay: Millis, ticker: T) {
        self.schedule(delay, move |stage| {
            let mut ticker = ticker;
            if let Tick::Again(next) = ticker.tick(stage) {
                stage.run_ticker(next, ticker);
            }
        });
    }

    /// Attach `node` (owned by this scene) and record it for cleanup.
    ///
    /// Returns `None` without attaching once stopped.
    pub fn spawn(&self, node: VisualNode) -> Option<NodeId> {
        if self.is_stopped() {
            return None;
        }
        let mut node = node;
        node.owner.clear();
        node.owner.push_str(self.inner.scene);
        let id = self
            .inner
            .spawned
            .borrow_mut()
            .spawn(self.inner.ports.surface.as_ref(), node);
        Some(id)
    }

    /// [`Stage::spawn`] plus a one-shot removal after `ttl`.
    pub fn spawn_for(&self, node: VisualNode, ttl: Millis) -> Option<NodeId> {
        let id = self.spawn(node)?;
        self.schedule(ttl, move |stage| stage.remove(id));
        Some(id)
    }

    /// Detach one node early. The record stays until [`Stage::kill_all`].
    pub fn remove(&self, id: NodeId) {
        self.inner.ports.surface.detach(id);
    }

    /// Replace a node's text.
    pub fn set_text(&self, id: NodeId, text: &str) {
        if !self.is_stopped() {
            self.inner.ports.surface.set_text(id, text);
        }
    }

    /// Set one inline style property.
    pub fn set_style(&self, id: NodeId, key: &str, value: &str) {
        if !self.is_stopped() {
            self.inner.ports.surface.set_style(id, key, value);
        }
    }

    /// Detach every recorded node. Safe to call repeatedly.
    pub fn kill_all(&self) -> usize {
        self.inner
            .spawned
            .borrow_mut()
            .kill_all(self.inner.ports.surface.as_ref())
    }

    /// Toggle a surface-wide class; enabled classes are reset on stop and completion.
    pub fn set_global_class(&self, class: &str, enabled: bool) {
        if enabled {
            if self.is_stopped() {
                return;
            }
            self.inner
                .global_classes
                .borrow_mut()
                .insert(class.to_owned());
        } else {
            self.inner.global_classes.borrow_mut().remove(class);
        }
        self.inner.ports.surface.set_global_class(class, enabled);
    }

    /// Enable a surface-wide class for `duration`.
    pub fn pulse_class(&self, class: &'static str, duration: Millis) {
        if self.is_stopped() {
            return;
        }
        self.set_global_class(class, true);
        self.schedule(duration, move |stage| stage.set_global_class(class, false));
    }

    /// Shake the screen: the shake class for `duration` plus an engine impulse.
    pub fn shake(&self, duration: Millis, intensity: f64) {
        if self.is_stopped() {
            return;
        }
        self.pulse_class(SHAKE_CLASS, duration);
        self.inner.ports.engine.shake(intensity);
    }

    /// Register a canvas effect with the engine.
    pub fn add_effect(&self, effect: CanvasEffect) {
        if !self.is_stopped() {
            self.inner.ports.engine.add_effect(effect);
        }
    }

    /// Play a tone if audio is available. Returns `true` when the tone was queued.
    pub fn play_tone(&self, tone: &Tone) -> bool {
        if self.is_stopped() {
            return false;
        }
        match self.inner.audio.borrow().as_ref() {
            Some(out) => {
                out.play(tone);
                true
            }
            None => false,
        }
    }

    /// Borrow the RNG.
    pub fn with_rng<R>(&self, f: impl FnOnce(&mut Rng64) -> R) -> R {
        f(&mut self.inner.rng.borrow_mut())
    }

    /// Uniform value in `[lo, hi)`.
    pub fn random(&self, lo: f64, hi: f64) -> f64 {
        self.with_rng(|r| r.range_f64(lo, hi))
    }

    /// Uniform delay in `[lo, hi]`.
    pub fn random_millis(&self, lo: Millis, hi: Millis) -> Millis {
        self.with_rng(|r| r.range_millis(lo, hi))
    }

    /// `true` with probability `p`.
    pub fn chance(&self, p: f64) -> bool {
        self.with_rng(|r| r.chance(p))
    }

    /// Start playback of the timeline produced by `build`.
    ///
    /// Phases at `0` run before this returns; every later phase and the resolve phase go through
    /// the timer host. A stage plays once: later calls log a warning and return the same
    /// completion.
    pub fn play(&self, build: impl FnOnce(&Stage) -> Timeline) -> Completion {
        let completion = self.completion();
        if self.state() != SceneState::Idle {
            tracing::warn!(
                scene = self.scene(),
                state = ?self.state(),
                "play() on a used cutscene ignored"
            );
            return completion;
        }

        let timeline = build(self);
        let mut resolve_at = timeline.resolve_at();
        if let Err(e) = timeline.validate() {
            tracing::warn!(
                scene = self.scene(),
                error = %e,
                "timeline invalid, resolving after last phase"
            );
            resolve_at = resolve_at.max(timeline.last_phase_at());
        }
        let (phases, _) = timeline.into_parts();

        self.inner.state.set(SceneState::Playing);
        self.inner.spawned.borrow_mut().reset();
        tracing::debug!(
            scene = self.scene(),
            phases = phases.len(),
            resolve_ms = resolve_at.0,
            "cutscene play"
        );

        let mut immediate = Vec::new();
        for phase in phases {
            if phase.at == Millis::ZERO {
                immediate.push(phase);
                continue;
            }
            let Phase { at, label, action } = phase;
            self.schedule(at, move |stage| {
                tracing::trace!(scene = stage.scene(), label, at_ms = at.0, "phase");
                action(stage);
            });
        }
        self.schedule(resolve_at, |stage| stage.finish());

        for Phase { label, action, .. } in immediate {
            if self.is_stopped() {
                break;
            }
            tracing::trace!(scene = self.scene(), label, at_ms = 0u64, "phase");
            action(self);
        }

        completion
    }

    /// Cancel everything: flag, timers, global classes, nodes, audio.
    ///
    /// Idempotent; valid before `play()` and after completion. Canvas effects already handed to
    /// the engine are left to expire or to the manager's `clear_all`.
    pub fn stop(&self) {
        let was = self.inner.state.replace(SceneState::Stopped);
        self.inner.halt();
        if was != SceneState::Stopped {
            tracing::debug!(scene = self.scene(), from = ?was, "cutscene stopped");
        }
    }

    // Terminal phase of a natural run.
    fn finish(&self) {
        tracing::trace!(scene = self.scene(), label = RESOLVE_LABEL, "phase");
        self.inner.state.set(SceneState::Stopped);
        self.inner.halt();
        tracing::debug!(scene = self.scene(), "cutscene complete");
        self.inner.completion.resolve();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/stage.rs"]
mod tests;
