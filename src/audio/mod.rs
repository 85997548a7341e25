//! Procedural tone synthesis behind the [`crate::AudioFactory`] port.

pub(crate) mod synth;
