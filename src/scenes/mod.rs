//! Scene scripts, the [`Cutscene`] that plays one, and the key → script registry.

pub(crate) mod common;
pub(crate) mod eldritch;
pub(crate) mod matrix;
pub(crate) mod normal;
pub(crate) mod pixel_genesis;
pub(crate) mod seraphim;
pub(crate) mod stellar_collapse;
pub(crate) mod supernova;

use crate::config::fx::FxConfig;
use crate::foundation::error::{CutsceneError, CutsceneResult};
use crate::runtime::completion::Completion;
use crate::runtime::stage::{SceneCtx, SceneState, Stage};
use crate::runtime::timeline::Timeline;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// What a cutscene does: its fx defaults and its timeline.
pub trait SceneScript {
    /// Registry key and owner tag of spawned nodes.
    fn name(&self) -> &'static str;

    /// Extra keys resolving to this script.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Default fx knobs; rarity overrides are merged on top.
    fn defaults(&self) -> FxConfig;

    /// Open an audio channel for this scene.
    fn wants_audio(&self) -> bool {
        false
    }

    /// Build the timeline. Must not cause side effects; the actions do.
    fn timeline(&self, stage: &Stage) -> Timeline;
}

/// One single-use playback of a script.
#[derive(Clone)]
pub struct Cutscene {
    script: Rc<dyn SceneScript>,
    stage: Stage,
}

impl Cutscene {
    /// Construct in the idle state.
    pub fn new(script: Rc<dyn SceneScript>, ctx: SceneCtx) -> Self {
        let defaults = script.defaults();
        let stage = Stage::new(script.name(), ctx, &defaults, script.wants_audio());
        Self { script, stage }
    }

    /// Script name.
    pub fn name(&self) -> &'static str {
        self.script.name()
    }

    /// The timeline `play()` would run, for inspection.
    pub fn timeline(&self) -> Timeline {
        self.script.timeline(&self.stage)
    }

    /// Start playback; see [`Stage::play`].
    pub fn play(&self) -> Completion {
        let script = self.script.clone();
        self.stage.play(move |stage| script.timeline(stage))
    }

    /// Stop playback; see [`Stage::stop`].
    pub fn stop(&self) {
        self.stage.stop();
    }

    /// Lifecycle state.
    pub fn state(&self) -> SceneState {
        self.stage.state()
    }

    /// Underlying runtime.
    pub fn stage(&self) -> &Stage {
        &self.stage
    }
}

impl fmt::Debug for Cutscene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cutscene")
            .field("name", &self.name())
            .field("state", &self.state())
            .finish()
    }
}

fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Scene key → script, with a fallback for unknown keys.
#[derive(Clone)]
pub struct SceneRegistry {
    scripts: BTreeMap<&'static str, Rc<dyn SceneScript>>,
    aliases: BTreeMap<&'static str, &'static str>,
    fallback: Rc<dyn SceneScript>,
}

impl SceneRegistry {
    /// Registry holding only `fallback`.
    pub fn new(fallback: Rc<dyn SceneScript>) -> Self {
        let mut reg = Self {
            scripts: BTreeMap::new(),
            aliases: BTreeMap::new(),
            fallback: fallback.clone(),
        };
        reg.register(fallback);
        reg
    }

    /// Every built-in scene, falling back to `normal`.
    pub fn builtin() -> Self {
        let mut reg = Self::new(Rc::new(normal::Normal));
        reg.register(Rc::new(supernova::Supernova));
        reg.register(Rc::new(seraphim::Seraphim));
        reg.register(Rc::new(eldritch::Eldritch));
        reg.register(Rc::new(matrix::Matrix));
        reg.register(Rc::new(stellar_collapse::StellarCollapse));
        reg.register(Rc::new(pixel_genesis::PixelGenesis));
        reg
    }

    /// Add or replace a script under its name and aliases.
    pub fn register(&mut self, script: Rc<dyn SceneScript>) {
        let name = script.name();
        for &alias in script.aliases() {
            self.aliases.insert(alias, name);
        }
        if self.scripts.insert(name, script.clone()).is_some() {
            tracing::debug!(scene = name, "scene script replaced");
        }
        if self.fallback.name() == name {
            self.fallback = script;
        }
    }

    /// Use the script registered under `key` as the fallback.
    pub fn set_fallback(&mut self, key: &str) -> CutsceneResult<()> {
        let script = self.find(key).ok_or_else(|| {
            CutsceneError::config(format!(
                "fallback scene '{key}' is not registered (known: {})",
                self.keys().join(", ")
            ))
        })?;
        self.fallback = script;
        Ok(())
    }

    /// Exact key or alias first, then a match ignoring case, `-`, `_` and spaces.
    pub fn find(&self, key: &str) -> Option<Rc<dyn SceneScript>> {
        if let Some(s) = self.scripts.get(key) {
            return Some(s.clone());
        }
        if let Some(name) = self.aliases.get(key) {
            return self.scripts.get(name).cloned();
        }
        let wanted = normalize_key(key);
        if wanted.is_empty() {
            return None;
        }
        let name = self
            .scripts
            .keys()
            .chain(self.aliases.keys())
            .find(|k| normalize_key(k) == wanted)?;
        let name = self.aliases.get(name).unwrap_or(name);
        self.scripts.get(name).cloned()
    }

    /// [`SceneRegistry::find`], or the fallback. Never fails.
    pub fn lookup(&self, key: &str) -> Rc<dyn SceneScript> {
        match self.find(key) {
            Some(s) => s,
            None => {
                tracing::debug!(
                    key,
                    fallback = self.fallback.name(),
                    "unknown scene key, using fallback"
                );
                self.fallback.clone()
            }
        }
    }

    /// Registered names, sorted.
    pub fn keys(&self) -> Vec<&'static str> {
        self.scripts.keys().copied().collect()
    }

    /// Aliases with the names they resolve to.
    pub fn aliases(&self) -> Vec<(&'static str, &'static str)> {
        self.aliases.iter().map(|(a, n)| (*a, *n)).collect()
    }

    /// The fallback script.
    pub fn fallback(&self) -> Rc<dyn SceneScript> {
        self.fallback.clone()
    }
}

impl Default for SceneRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for SceneRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneRegistry")
            .field("keys", &self.keys())
            .field("fallback", &self.fallback.name())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/registry.rs"]
mod tests;
