use crate::foundation::core::Millis;
use crate::foundation::error::{CutsceneError, CutsceneResult};
use crate::runtime::stage::Stage;
use serde::Serialize;
use std::fmt;

/// Deferred phase body.
pub type PhaseAction = Box<dyn FnOnce(&Stage)>;

/// Label reported for the terminal phase that cleans up and resolves the completion.
pub const RESOLVE_LABEL: &str = "resolve";

/// One timeline record: run `action` at `at` after playback start.
pub struct Phase {
    /// Offset from playback start.
    pub at: Millis,
    /// Human-readable name, used in logs and summaries.
    pub label: &'static str,
    pub(crate) action: PhaseAction,
}

/// Shape of one phase, without its action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PhaseSummary {
    /// Offset from playback start.
    pub at: Millis,
    /// Phase label.
    pub label: &'static str,
}

/// Ordered list of phases plus the terminal resolve time, built up front and then executed by
/// [`Stage::play`].
///
/// Every `at` is relative to playback start; phases do not chain on each other.
pub struct Timeline {
    phases: Vec<Phase>,
    resolve_at: Millis,
}

impl Timeline {
    /// Empty timeline resolving at `resolve_at`.
    pub fn new(resolve_at: Millis) -> Self {
        Self {
            phases: Vec::new(),
            resolve_at,
        }
    }

    /// Append a phase.
    pub fn phase(
        mut self,
        at: Millis,
        label: &'static str,
        action: impl FnOnce(&Stage) + 'static,
    ) -> Self {
        self.phases.push(Phase {
            at,
            label,
            action: Box::new(action),
        });
        self
    }

    /// Time of the terminal resolve phase.
    pub fn resolve_at(&self) -> Millis {
        self.resolve_at
    }

    /// Number of phases, not counting the resolve phase.
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Return `true` when only the resolve phase exists.
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Phases in firing order (stable by `at`), ending with the resolve phase.
    pub fn summary(&self) -> Vec<PhaseSummary> {
        let mut out = self
            .phases
            .iter()
            .map(|p| PhaseSummary {
                at: p.at,
                label: p.label,
            })
            .collect::<Vec<_>>();
        out.sort_by_key(|p| p.at);
        out.push(PhaseSummary {
            at: self.resolve_at,
            label: RESOLVE_LABEL,
        });
        out
    }

    /// Latest phase offset, `0` for an empty timeline.
    pub fn last_phase_at(&self) -> Millis {
        self.phases
            .iter()
            .map(|p| p.at)
            .max()
            .unwrap_or(Millis::ZERO)
    }

    /// Check that the resolve phase comes last and every phase is labelled.
    pub fn validate(&self) -> CutsceneResult<()> {
        if let Some(p) = self.phases.iter().find(|p| p.label.trim().is_empty()) {
            return Err(CutsceneError::timeline(format!(
                "phase at {}ms has an empty label",
                p.at.0
            )));
        }
        if let Some(p) = self.phases.iter().find(|p| p.at > self.resolve_at) {
            return Err(CutsceneError::timeline(format!(
                "phase '{}' at {}ms runs after resolve at {}ms",
                p.label, p.at.0, self.resolve_at.0
            )));
        }
        Ok(())
    }

    pub(crate) fn into_parts(self) -> (Vec<Phase>, Millis) {
        (self.phases, self.resolve_at)
    }
}

impl fmt::Debug for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field("phases", &self.summary())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/timeline.rs"]
mod tests;
