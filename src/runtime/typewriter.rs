//! Tick-driven text reveals.
//!
//! A [`Ticker`] is a small state machine driven by [`Stage::run_ticker`]: every tick returns the
//! delay until the next one, and the stage's gated scheduler stops ticking the moment the scene
//! stops.

use crate::foundation::core::{Millis, NodeId};
use crate::ports::surface::VisualNode;
use crate::runtime::stage::Stage;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Result of one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Tick again after the delay.
    Again(Millis),
    /// Terminal.
    Done,
}

/// State machine advanced by a repeating timer.
pub trait Ticker {
    /// Advance one step.
    fn tick(&mut self, stage: &Stage) -> Tick;
}

/// Typewriter pacing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypewriterCfg {
    /// Base delay between characters.
    pub char_delay: Millis,
    /// Uniform extra delay in `[0, jitter]` per character.
    pub jitter: Millis,
    /// Probability of a hesitation pause after a character.
    pub hesitation_chance: f64,
    /// Extra delay of a hesitation pause.
    pub hesitation: Millis,
    /// How long the cursor stays after the last character.
    pub cursor_hold: Millis,
    /// Class of the cursor node.
    pub cursor_class: String,
}

impl Default for TypewriterCfg {
    fn default() -> Self {
        Self {
            char_delay: Millis(55),
            jitter: Millis(35),
            hesitation_chance: 0.06,
            hesitation: Millis(280),
            cursor_hold: Millis(900),
            cursor_class: "tw-cursor".to_owned(),
        }
    }
}

/// Shared view of a reveal's progress.
#[derive(Clone)]
pub struct RevealProgress {
    inner: Rc<ProgressInner>,
}

struct ProgressInner {
    revealed: Cell<usize>,
    total: usize,
    finished: Cell<bool>,
}

impl RevealProgress {
    fn new(total: usize) -> Self {
        Self {
            inner: Rc::new(ProgressInner {
                revealed: Cell::new(0),
                total,
                finished: Cell::new(false),
            }),
        }
    }

    /// Characters revealed so far. Never decreases.
    pub fn revealed(&self) -> usize {
        self.inner.revealed.get()
    }

    /// Characters in the full string.
    pub fn total(&self) -> usize {
        self.inner.total
    }

    /// Return `true` once every character is visible.
    pub fn is_complete(&self) -> bool {
        self.revealed() == self.total()
    }

    /// Return `true` once the cursor hold elapsed and the cursor is gone.
    pub fn is_finished(&self) -> bool {
        self.inner.finished.get()
    }
}

impl fmt::Debug for RevealProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RevealProgress({}/{}", self.revealed(), self.total())?;
        if self.is_finished() {
            f.write_str(", finished")?;
        }
        f.write_str(")")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TwState {
    Typing,
    Holding,
    Finished,
}

/// One string revealed a character at a time into an existing node.
pub struct Typewriter {
    cfg: TypewriterCfg,
    node: NodeId,
    chars: Vec<char>,
    cursor: Option<NodeId>,
    state: TwState,
    progress: RevealProgress,
}

impl Typewriter {
    /// Reveal `text` into `node`.
    pub fn new(cfg: TypewriterCfg, node: NodeId, text: &str) -> Self {
        let chars = text.chars().collect::<Vec<_>>();
        let progress = RevealProgress::new(chars.len());
        Self {
            cfg,
            node,
            chars,
            cursor: None,
            state: TwState::Typing,
            progress,
        }
    }

    /// Spawn `node` with empty text and reveal `text` into it.
    ///
    /// Returns `None` once the stage stopped.
    pub fn mount(stage: &Stage, node: VisualNode, text: &str, cfg: TypewriterCfg) -> Option<Self> {
        let mut node = node;
        node.text.clear();
        let id = stage.spawn(node)?;
        Some(Self::new(cfg, id, text))
    }

    /// Progress handle, valid after the typewriter moved into a stage.
    pub fn progress(&self) -> RevealProgress {
        self.progress.clone()
    }

    /// Begin typing after `delay`.
    pub fn start(self, stage: &Stage, delay: Millis) -> RevealProgress {
        let progress = self.progress();
        stage.run_ticker(delay, self);
        progress
    }

    fn next_delay(&self, stage: &Stage) -> Millis {
        let mut delay = self.cfg.char_delay + stage.random_millis(Millis::ZERO, self.cfg.jitter);
        if stage.chance(self.cfg.hesitation_chance) {
            delay = delay + self.cfg.hesitation;
        }
        delay
    }

    fn type_next(&mut self, stage: &Stage) -> Tick {
        if self.cursor.is_none() {
            self.cursor = stage.spawn(
                VisualNode::new(self.cfg.cursor_class.as_str())
                    .style("anchor", self.node.0.to_string()),
            );
        }

        let revealed = self.progress.revealed();
        if revealed < self.chars.len() {
            let shown = revealed + 1;
            let text = self.chars[..shown].iter().collect::<String>();
            stage.set_text(self.node, &text);
            self.progress.inner.revealed.set(shown);
        }

        if self.progress.is_complete() {
            self.state = TwState::Holding;
            Tick::Again(self.cfg.cursor_hold)
        } else {
            Tick::Again(self.next_delay(stage))
        }
    }
}

impl Ticker for Typewriter {
    fn tick(&mut self, stage: &Stage) -> Tick {
        match self.state {
            TwState::Typing => self.type_next(stage),
            TwState::Holding => {
                if let Some(cursor) = self.cursor.take() {
                    stage.remove(cursor);
                }
                self.state = TwState::Finished;
                self.progress.inner.finished.set(true);
                Tick::Done
            }
            TwState::Finished => Tick::Done,
        }
    }
}

/// Deferred action run when the last line of a [`MessageChain`] finishes.
pub type Finale = Box<dyn FnOnce(&Stage)>;

/// Lines typed one after another with a pause between them.
///
/// Only the final line triggers the finale.
pub struct MessageChain {
    cfg: TypewriterCfg,
    pause: Millis,
    lines: Vec<Typewriter>,
    current: usize,
    finale: Option<Finale>,
}

impl MessageChain {
    /// Empty chain pausing `pause` between lines.
    pub fn new(cfg: TypewriterCfg, pause: Millis) -> Self {
        Self {
            cfg,
            pause,
            lines: Vec::new(),
            current: 0,
            finale: None,
        }
    }

    /// Append a line revealed into `node`.
    pub fn line(mut self, node: NodeId, text: &str) -> Self {
        self.lines
            .push(Typewriter::new(self.cfg.clone(), node, text));
        self
    }

    /// Action run once the last line finished.
    pub fn finale(mut self, f: impl FnOnce(&Stage) + 'static) -> Self {
        self.finale = Some(Box::new(f));
        self
    }

    /// Progress of each line, in order.
    pub fn progress(&self) -> Vec<RevealProgress> {
        self.lines.iter().map(Typewriter::progress).collect()
    }

    /// Begin the first line after `delay`.
    pub fn start(self, stage: &Stage, delay: Millis) -> Vec<RevealProgress> {
        let progress = self.progress();
        stage.run_ticker(delay, self);
        progress
    }
}

impl Ticker for MessageChain {
    fn tick(&mut self, stage: &Stage) -> Tick {
        let Some(line) = self.lines.get_mut(self.current) else {
            return Tick::Done;
        };
        match line.tick(stage) {
            Tick::Again(next) => Tick::Again(next),
            Tick::Done => {
                self.current += 1;
                if self.current < self.lines.len() {
                    return Tick::Again(self.pause);
                }
                if let Some(finale) = self.finale.take() {
                    finale(stage);
                }
                Tick::Done
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/typewriter.rs"]
mod tests;
