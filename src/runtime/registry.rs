use crate::foundation::core::{NodeId, TimerHandle};
use crate::ports::clock::TimerHost;
use crate::ports::surface::{Surface, VisualNode};

/// Outstanding timer handles of one cutscene.
///
/// Fired timers are not pruned; the whole set is cancelled and discarded at once.
#[derive(Debug, Default)]
pub struct TimerRegistry {
    handles: Vec<TimerHandle>,
}

impl TimerRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a handle.
    pub fn track(&mut self, handle: TimerHandle) {
        self.handles.push(handle);
    }

    /// Handles recorded since the last cancel.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Return `true` when nothing is recorded.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Cancel every recorded handle and empty the registry. Returns the number of handles.
    pub fn cancel_all(&mut self, host: &dyn TimerHost) -> usize {
        let n = self.handles.len();
        for handle in self.handles.drain(..) {
            host.clear_timeout(handle);
        }
        n
    }
}

/// Nodes attached by one cutscene.
///
/// Every node goes through [`SpawnRegistry::spawn`], so [`SpawnRegistry::kill_all`] is the
/// authoritative backstop regardless of any per-node TTL removal.
#[derive(Debug, Default)]
pub struct SpawnRegistry {
    nodes: Vec<NodeId>,
}

impl SpawnRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `node` and record it.
    pub fn spawn(&mut self, surface: &dyn Surface, node: VisualNode) -> NodeId {
        let id = surface.attach(node);
        self.nodes.push(id);
        id
    }

    /// Return `true` if `id` was spawned through this registry and not killed yet.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }

    /// Recorded nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Return `true` when nothing is recorded.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Forget every record without detaching.
    pub fn reset(&mut self) {
        self.nodes.clear();
    }

    /// Detach every recorded node and empty the registry. Returns the number of records.
    ///
    /// Nodes already detached by their own TTL are detached again, which surfaces ignore.
    pub fn kill_all(&mut self, surface: &dyn Surface) -> usize {
        let n = self.nodes.len();
        for id in self.nodes.drain(..) {
            surface.detach(id);
        }
        n
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/registry.rs"]
mod tests;
