use crate::config::rarity::Rarity;
use crate::foundation::core::Rng64;
use crate::foundation::error::CutsceneResult;
use crate::ports::Ports;
use crate::runtime::completion::Completion;
use crate::runtime::stage::SceneCtx;
use crate::scenes::{Cutscene, SceneRegistry};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Manager construction options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManagerOpts {
    /// Seed of the per-playback seed sequence.
    pub seed: u64,
    /// Scene played for unknown keys.
    pub fallback_key: String,
}

impl Default for ManagerOpts {
    fn default() -> Self {
        Self {
            seed: 0x5EED_C0DE,
            fallback_key: "normal".to_owned(),
        }
    }
}

#[derive(Default)]
struct ManagerState {
    current: RefCell<Option<Cutscene>>,
    generation: Cell<u64>,
}

/// Single entry point for playback. At most one cutscene is active at a time.
///
/// `play` while another cutscene runs stops the old one first. A superseded cutscene never
/// resolves, so its completion callback never runs.
pub struct CutsceneManager {
    ports: Ports,
    registry: SceneRegistry,
    seeds: RefCell<Rng64>,
    state: Rc<ManagerState>,
}

impl CutsceneManager {
    /// Manager over `registry`, with `opts.fallback_key` as the fallback scene.
    pub fn new(ports: Ports, registry: SceneRegistry, opts: ManagerOpts) -> CutsceneResult<Self> {
        let mut registry = registry;
        registry.set_fallback(&opts.fallback_key)?;
        Ok(Self {
            ports,
            registry,
            seeds: RefCell::new(Rng64::new(opts.seed)),
            state: Rc::new(ManagerState::default()),
        })
    }

    /// Manager over the built-in scenes with default options.
    pub fn with_builtin_scenes(ports: Ports) -> Self {
        Self {
            ports,
            registry: SceneRegistry::builtin(),
            seeds: RefCell::new(Rng64::new(ManagerOpts::default().seed)),
            state: Rc::new(ManagerState::default()),
        }
    }

    /// Play the scene registered under `key` (or the fallback) for `rarity`.
    ///
    /// `on_complete` runs once the cutscene finished naturally, after the manager went idle.
    #[tracing::instrument(level = "debug", skip(self, rarity, on_complete))]
    pub fn play(
        &self,
        key: &str,
        rarity: Rarity,
        on_complete: impl FnOnce() + 'static,
    ) -> Completion {
        if self.is_playing() {
            tracing::debug!(
                superseded = self.current_scene().unwrap_or_default(),
                "stopping active cutscene"
            );
            self.stop();
        }

        let script = self.registry.lookup(key);
        let seed = self.seeds.borrow_mut().fork();
        let scene = Cutscene::new(
            script,
            SceneCtx {
                ports: self.ports.clone(),
                rarity,
                seed,
            },
        );

        let generation = self.state.generation.get() + 1;
        self.state.generation.set(generation);
        *self.state.current.borrow_mut() = Some(scene.clone());
        tracing::debug!(scene = scene.name(), generation, "cutscene started");

        let completion = scene.play();
        let state = Rc::downgrade(&self.state);
        completion.on_resolve(move || {
            if let Some(state) = state.upgrade()
                && state.generation.get() == generation
            {
                let finished = state.current.borrow_mut().take();
                drop(finished);
            }
            on_complete();
        });
        completion
    }

    /// Stop and release the active cutscene, then clear the canvas. Idempotent.
    pub fn stop(&self) {
        let current = self.state.current.borrow_mut().take();
        if let Some(scene) = current {
            scene.stop();
            tracing::debug!(scene = scene.name(), "cutscene released");
        }
        self.ports.engine.clear_all();
    }

    /// Return `true` while a cutscene is active.
    pub fn is_playing(&self) -> bool {
        self.state.current.borrow().is_some()
    }

    /// Name of the active scene.
    pub fn current_scene(&self) -> Option<&'static str> {
        self.state.current.borrow().as_ref().map(Cutscene::name)
    }

    /// The active cutscene.
    pub fn current(&self) -> Option<Cutscene> {
        self.state.current.borrow().clone()
    }

    /// Number of `play` calls so far.
    pub fn generation(&self) -> u64 {
        self.state.generation.get()
    }

    /// Scene registry.
    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }
}

#[cfg(test)]
#[path = "../tests/unit/manager.rs"]
mod tests;
