use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

type Waiter = Box<dyn FnOnce()>;

/// Single-resolution completion signal returned by `play()`.
///
/// Resolves at most once. Waiters registered after resolution run immediately.
#[derive(Clone, Default)]
pub struct Completion {
    inner: Rc<CompletionInner>,
}

#[derive(Default)]
struct CompletionInner {
    resolved: Cell<bool>,
    waiters: RefCell<Vec<Waiter>>,
}

impl Completion {
    /// Unresolved signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `true` once resolved.
    pub fn is_resolved(&self) -> bool {
        self.inner.resolved.get()
    }

    /// Run `f` on resolution (or now, if already resolved).
    pub fn on_resolve(&self, f: impl FnOnce() + 'static) {
        if self.is_resolved() {
            f();
            return;
        }
        self.inner.waiters.borrow_mut().push(Box::new(f));
    }

    /// Resolve and run every waiter in registration order.
    ///
    /// Returns `false` (and does nothing) when already resolved.
    pub(crate) fn resolve(&self) -> bool {
        if self.inner.resolved.replace(true) {
            return false;
        }
        let waiters = std::mem::take(&mut *self.inner.waiters.borrow_mut());
        for w in waiters {
            w();
        }
        true
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("resolved", &self.is_resolved())
            .field("waiters", &self.inner.waiters.borrow().len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/completion.rs"]
mod tests;
