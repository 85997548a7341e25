use crate::foundation::core::Millis;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::mem::discriminant;

/// One effect-intensity knob value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FxValue {
    /// Counts, intensities, durations in milliseconds.
    Number(f64),
    /// Toggles.
    Flag(bool),
    /// Titles, subtitles, symbolic variants.
    Text(String),
}

impl FxValue {
    fn kind(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Flag(_) => "flag",
            Self::Text(_) => "text",
        }
    }
}

/// Flat map of named effect knobs (`shakeIntensity`, `particleCount`, ...).
///
/// A scene builds its defaults once and the rarity's overrides are shallow-merged on top with
/// [`FxConfig::merged`]. The merged map is never mutated during playback.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FxConfig {
    values: BTreeMap<String, FxValue>,
}

impl FxConfig {
    /// Empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: numeric knob.
    pub fn num(mut self, key: impl Into<String>, value: f64) -> Self {
        self.values.insert(key.into(), FxValue::Number(value));
        self
    }

    /// Builder: text knob.
    pub fn text(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), FxValue::Text(value.into()));
        self
    }

    /// Builder: boolean knob.
    pub fn flag(mut self, key: impl Into<String>, value: bool) -> Self {
        self.values.insert(key.into(), FxValue::Flag(value));
        self
    }

    /// Insert or replace one knob.
    pub fn set(&mut self, key: impl Into<String>, value: FxValue) {
        self.values.insert(key.into(), value);
    }

    /// Raw lookup.
    pub fn get(&self, key: &str) -> Option<&FxValue> {
        self.values.get(key)
    }

    /// Knob names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of knobs.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Return `true` when no knob is set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Shallow merge of `overrides` over `defaults`.
    ///
    /// An override whose value kind differs from the default's is dropped with a warning, so a
    /// scene always reads the kind it declared. Keys unknown to the defaults are kept.
    pub fn merged(defaults: &FxConfig, overrides: &FxConfig) -> FxConfig {
        let mut out = defaults.clone();
        for (key, value) in &overrides.values {
            if let Some(default) = defaults.values.get(key)
                && discriminant(default) != discriminant(value)
            {
                tracing::warn!(
                    key = key.as_str(),
                    expected = default.kind(),
                    got = value.kind(),
                    "ignoring fx override with mismatched type"
                );
                continue;
            }
            out.values.insert(key.clone(), value.clone());
        }
        out
    }

    /// Numeric knob; missing or non-numeric knobs read as `0.0`.
    pub fn number(&self, key: &str) -> f64 {
        match self.values.get(key) {
            Some(FxValue::Number(v)) if v.is_finite() => *v,
            Some(_) => {
                tracing::warn!(key, "fx knob is not a finite number");
                0.0
            }
            None => {
                tracing::warn!(key, "fx knob missing");
                0.0
            }
        }
    }

    /// Numeric knob rounded to a non-negative count.
    pub fn count(&self, key: &str) -> usize {
        self.number(key).round().max(0.0) as usize
    }

    /// Numeric knob interpreted as milliseconds.
    pub fn millis(&self, key: &str) -> Millis {
        Millis(self.number(key).round().max(0.0) as u64)
    }

    /// Text knob; missing or non-text knobs read as `""`.
    pub fn string(&self, key: &str) -> &str {
        match self.values.get(key) {
            Some(FxValue::Text(s)) => s.as_str(),
            _ => "",
        }
    }

    /// Boolean knob; missing or non-boolean knobs read as `false`.
    pub fn enabled(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(FxValue::Flag(true)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/fx.rs"]
mod tests;
