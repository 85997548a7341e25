use crate::foundation::core::{Millis, TimerHandle};
use std::cell::RefCell;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Deferred callback registered with a [`TimerHost`].
pub type TimerCallback = Box<dyn FnOnce()>;

/// One-shot timer primitive (the host's `setTimeout`/`clearTimeout`).
///
/// Ordering contract: callbacks fire in non-decreasing deadline order, and callbacks with equal
/// deadlines fire in registration order.
pub trait TimerHost {
    /// Current clock time.
    fn now(&self) -> Millis;
    /// Run `callback` once, `delay` after now.
    fn set_timeout(&self, delay: Millis, callback: TimerCallback) -> TimerHandle;
    /// Cancel a pending callback. Unknown or already-fired handles are ignored.
    fn clear_timeout(&self, handle: TimerHandle);
}

/// Manually advanced clock for headless playback.
///
/// No borrow is held while a callback runs, so callbacks may freely schedule or cancel timers.
#[derive(Default)]
pub struct ManualClock {
    state: RefCell<ClockState>,
}

#[derive(Default)]
struct ClockState {
    now: Millis,
    next_id: u64,
    // Min-heap over (deadline, registration id); the id keeps equal deadlines FIFO.
    queue: BinaryHeap<Reverse<(Millis, u64)>>,
    callbacks: HashMap<u64, TimerCallback>,
    fired: u64,
}

impl ClockState {
    fn pop_due(&mut self, target: Millis) -> Option<TimerCallback> {
        while let Some(&Reverse((at, id))) = self.queue.peek() {
            if at > target {
                return None;
            }
            self.queue.pop();
            // Cancelled timers leave stale heap entries behind.
            if let Some(cb) = self.callbacks.remove(&id) {
                self.now = self.now.max(at);
                self.fired += 1;
                return Some(cb);
            }
        }
        None
    }

    fn next_deadline(&mut self) -> Option<Millis> {
        while let Some(&Reverse((at, id))) = self.queue.peek() {
            if self.callbacks.contains_key(&id) {
                return Some(at);
            }
            self.queue.pop();
        }
        None
    }
}

/// Upper bound on callbacks fired by [`ManualClock::run_until_idle`].
pub const RUN_UNTIL_IDLE_LIMIT: usize = 1_000_000;

impl ManualClock {
    /// Clock at time zero with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks still pending.
    pub fn pending(&self) -> usize {
        self.state.borrow().callbacks.len()
    }

    /// Total callbacks fired so far.
    pub fn fired_total(&self) -> u64 {
        self.state.borrow().fired
    }

    /// Deadline of the earliest pending callback.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.state.borrow_mut().next_deadline()
    }

    /// Advance by `by`, firing every callback that comes due. Returns the number fired.
    pub fn advance(&self, by: Millis) -> usize {
        let target = self.now() + by;
        self.advance_to(target)
    }

    /// Advance to absolute time `target` (no-op backwards). Returns the number fired.
    pub fn advance_to(&self, target: Millis) -> usize {
        let mut fired = 0usize;
        loop {
            let next = self.state.borrow_mut().pop_due(target);
            let Some(cb) = next else {
                break;
            };
            cb();
            fired += 1;
        }
        let mut st = self.state.borrow_mut();
        st.now = st.now.max(target);
        fired
    }

    /// Fire callbacks until none are pending, jumping the clock forward as needed.
    ///
    /// Stops after [`RUN_UNTIL_IDLE_LIMIT`] callbacks to bound runaway rescheduling.
    pub fn run_until_idle(&self) -> usize {
        let mut fired = 0usize;
        while let Some(at) = self.next_deadline() {
            fired += self.advance_to(at);
            if fired >= RUN_UNTIL_IDLE_LIMIT {
                tracing::warn!(fired, "manual clock still busy after run limit");
                break;
            }
        }
        fired
    }
}

impl TimerHost for ManualClock {
    fn now(&self) -> Millis {
        self.state.borrow().now
    }

    fn set_timeout(&self, delay: Millis, callback: TimerCallback) -> TimerHandle {
        let mut st = self.state.borrow_mut();
        let id = st.next_id;
        st.next_id += 1;
        let at = st.now + delay;
        st.queue.push(Reverse((at, id)));
        st.callbacks.insert(id, callback);
        TimerHandle(id)
    }

    fn clear_timeout(&self, handle: TimerHandle) {
        self.state.borrow_mut().callbacks.remove(&handle.0);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ports/clock.rs"]
mod tests;
