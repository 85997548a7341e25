//! Orchestration core: registries, the completion signal, data-first timelines, the per-instance
//! stage that executes them, and tick-driven text reveals.

pub(crate) mod completion;
pub(crate) mod registry;
pub(crate) mod stage;
pub(crate) mod timeline;
pub(crate) mod typewriter;
