use crate::config::fx::{FxConfig, FxValue};
use crate::foundation::color::Color;
use crate::foundation::error::{CutsceneError, CutsceneResult};
use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Color scheme and effect overrides for one rarity tier.
///
/// Owned by the caller; a cutscene receives its own clone and only reads it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rarity {
    /// Display name of the tier, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Primary color.
    pub color: Color,
    /// Glow / halo color.
    pub glow_color: Color,
    /// Particle color.
    pub particle_color: Color,
    /// Knob overrides merged over each scene's defaults.
    #[serde(default, skip_serializing_if = "FxConfig::is_empty")]
    pub effects: FxConfig,
}

impl Default for Rarity {
    fn default() -> Self {
        Self::uniform(Color::WHITE)
    }
}

impl Rarity {
    /// Parse a rarity from three CSS hex colors.
    pub fn new(color: &str, glow_color: &str, particle_color: &str) -> CutsceneResult<Self> {
        fn parse(field: &str, s: &str) -> CutsceneResult<Color> {
            s.parse()
                .map_err(|e| CutsceneError::config(format!("rarity {field}: {e}")))
        }

        Ok(Self {
            name: None,
            color: parse("color", color)?,
            glow_color: parse("glowColor", glow_color)?,
            particle_color: parse("particleColor", particle_color)?,
            effects: FxConfig::default(),
        })
    }

    /// Single color used for every role.
    pub fn uniform(color: Color) -> Self {
        Self {
            name: None,
            color,
            glow_color: color,
            particle_color: color,
            effects: FxConfig::default(),
        }
    }

    /// Attach a display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the effect overrides.
    pub fn with_effects(mut self, effects: FxConfig) -> Self {
        self.effects = effects;
        self
    }

    /// Parse and validate from a JSON string.
    pub fn from_json_str(s: &str) -> CutsceneResult<Self> {
        let rarity: Self = serde_json::from_str(s)?;
        rarity.validate()?;
        Ok(rarity)
    }

    /// Reject non-finite numeric overrides.
    pub fn validate(&self) -> CutsceneResult<()> {
        for key in self.effects.keys() {
            if let Some(FxValue::Number(v)) = self.effects.get(key)
                && !v.is_finite()
            {
                return Err(CutsceneError::config(format!(
                    "rarity effect '{key}' must be finite"
                )));
            }
        }
        Ok(())
    }
}

/// Named rarity tiers loaded from a JSON object (`{"legendary": {...}, ...}`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RarityTable {
    tiers: BTreeMap<String, Rarity>,
}

impl RarityTable {
    /// Parse and validate a table from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CutsceneResult<Self> {
        let table: Self = serde_json::from_reader(r)
            .map_err(|e| CutsceneError::serde(format!("parse rarity table JSON: {e}")))?;
        table.validate()?;
        Ok(table)
    }

    /// Parse and validate a table from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CutsceneResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open rarity table '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Validate every tier.
    pub fn validate(&self) -> CutsceneResult<()> {
        for (name, rarity) in &self.tiers {
            rarity
                .validate()
                .map_err(|e| CutsceneError::config(format!("tier '{name}': {e}")))?;
        }
        Ok(())
    }

    /// Insert a tier; the tier's `name` defaults to its key.
    pub fn insert(&mut self, key: impl Into<String>, mut rarity: Rarity) {
        let key = key.into();
        if rarity.name.is_none() {
            rarity.name = Some(key.clone());
        }
        self.tiers.insert(key, rarity);
    }

    /// Look up a tier; the tier's `name` defaults to its key.
    pub fn get(&self, key: &str) -> CutsceneResult<Rarity> {
        let Some(rarity) = self.tiers.get(key) else {
            let known = self.names().collect::<Vec<_>>().join(", ");
            return Err(CutsceneError::config(format!(
                "unknown rarity tier '{key}' (known: {known})"
            )));
        };
        let mut rarity = rarity.clone();
        if rarity.name.is_none() {
            rarity.name = Some(key.to_owned());
        }
        Ok(rarity)
    }

    /// Tier names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tiers.keys().map(String::as_str)
    }

    /// Number of tiers.
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Return `true` when the table has no tiers.
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/rarity.rs"]
mod tests;
