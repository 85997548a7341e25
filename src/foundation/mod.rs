//! Shared primitives: time units, ids, deterministic randomness, colors and errors.

pub(crate) mod color;
pub(crate) mod core;
pub(crate) mod error;
