//! Caller-supplied configuration: rarity color schemes and effect-intensity knobs.

pub(crate) mod fx;
pub(crate) mod rarity;
