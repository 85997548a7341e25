/// Convenience result type used across the crate.
pub type CutsceneResult<T> = Result<T, CutsceneError>;

/// Top-level error taxonomy.
///
/// Playback itself never surfaces these: they come from configuration loading, manager
/// construction and optional side channels (audio), which degrade instead of failing.
#[derive(thiserror::Error, Debug)]
pub enum CutsceneError {
    /// Invalid user-provided configuration (rarities, fx overrides, manager options).
    #[error("config error: {0}")]
    Config(String),

    /// A timeline whose shape breaks scheduling invariants.
    #[error("timeline error: {0}")]
    Timeline(String),

    /// The optional audio channel could not be opened or used.
    #[error("audio error: {0}")]
    Audio(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CutsceneError {
    /// Build a [`CutsceneError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`CutsceneError::Timeline`] value.
    pub fn timeline(msg: impl Into<String>) -> Self {
        Self::Timeline(msg.into())
    }

    /// Build a [`CutsceneError::Audio`] value.
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    /// Build a [`CutsceneError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for CutsceneError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
