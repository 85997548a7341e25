use crate::foundation::core::NodeId;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

/// Description of one visual element (the DOM node of a browser host).
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct VisualNode {
    /// Style class, e.g. `sn-crack`.
    pub class: String,
    /// Name of the scene that spawned the node; stamped by the stage.
    pub owner: String,
    /// Text content.
    pub text: String,
    /// Inline style properties.
    pub style: BTreeMap<String, String>,
}

impl VisualNode {
    /// Node with a class and nothing else.
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            ..Self::default()
        }
    }

    /// Builder: text content.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Builder: one inline style property.
    pub fn style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(key.into(), value.into());
        self
    }

    /// Builder: `left`/`top` as percentages of the surface.
    pub fn at_percent(self, x: f64, y: f64) -> Self {
        self.style("left", format!("{x:.2}%"))
            .style("top", format!("{y:.2}%"))
    }

    /// Style property lookup.
    pub fn style_value(&self, key: &str) -> Option<&str> {
        self.style.get(key).map(String::as_str)
    }
}

/// The visible surface nodes are attached to.
///
/// `detach` must be idempotent: detaching an unknown or already-detached node is a no-op.
/// Mutations of detached nodes are ignored.
pub trait Surface {
    /// Attach a node and return its id.
    fn attach(&self, node: VisualNode) -> NodeId;
    /// Detach a node.
    fn detach(&self, id: NodeId);
    /// Replace a node's text.
    fn set_text(&self, id: NodeId, text: &str);
    /// Set one inline style property of a node.
    fn set_style(&self, id: NodeId, key: &str, value: &str);
    /// Toggle a surface-wide class (the `body` classes of a browser host).
    fn set_global_class(&self, class: &str, enabled: bool);
}

/// In-memory surface that keeps attached nodes inspectable.
#[derive(Default)]
pub struct MemorySurface {
    state: RefCell<SurfaceState>,
}

#[derive(Default)]
struct SurfaceState {
    next_id: u64,
    attached: BTreeMap<NodeId, VisualNode>,
    classes: BTreeSet<String>,
    attached_total: u64,
    peak: usize,
}

impl MemorySurface {
    /// Empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes currently attached.
    pub fn attached_count(&self) -> usize {
        self.state.borrow().attached.len()
    }

    /// Nodes currently attached that were spawned by `owner`.
    pub fn attached_owned_by(&self, owner: &str) -> usize {
        self.state
            .borrow()
            .attached
            .values()
            .filter(|n| n.owner == owner)
            .count()
    }

    /// Nodes currently attached with class `class`.
    pub fn attached_with_class(&self, class: &str) -> usize {
        self.state
            .borrow()
            .attached
            .values()
            .filter(|n| n.class == class)
            .count()
    }

    /// Snapshot of one attached node.
    pub fn node(&self, id: NodeId) -> Option<VisualNode> {
        self.state.borrow().attached.get(&id).cloned()
    }

    /// Snapshot of every attached node in attach order.
    pub fn nodes(&self) -> Vec<(NodeId, VisualNode)> {
        self.state
            .borrow()
            .attached
            .iter()
            .map(|(id, n)| (*id, n.clone()))
            .collect()
    }

    /// Return `true` when `class` is set surface-wide.
    pub fn has_global_class(&self, class: &str) -> bool {
        self.state.borrow().classes.contains(class)
    }

    /// Surface-wide classes in sorted order.
    pub fn global_classes(&self) -> Vec<String> {
        self.state.borrow().classes.iter().cloned().collect()
    }

    /// Total nodes ever attached.
    pub fn attached_total(&self) -> u64 {
        self.state.borrow().attached_total
    }

    /// Largest number of simultaneously attached nodes.
    pub fn peak_attached(&self) -> usize {
        self.state.borrow().peak
    }
}

impl Surface for MemorySurface {
    fn attach(&self, node: VisualNode) -> NodeId {
        let mut st = self.state.borrow_mut();
        let id = NodeId(st.next_id);
        st.next_id += 1;
        st.attached.insert(id, node);
        st.attached_total += 1;
        st.peak = st.peak.max(st.attached.len());
        id
    }

    fn detach(&self, id: NodeId) {
        self.state.borrow_mut().attached.remove(&id);
    }

    fn set_text(&self, id: NodeId, text: &str) {
        if let Some(node) = self.state.borrow_mut().attached.get_mut(&id) {
            node.text.clear();
            node.text.push_str(text);
        }
    }

    fn set_style(&self, id: NodeId, key: &str, value: &str) {
        if let Some(node) = self.state.borrow_mut().attached.get_mut(&id) {
            node.style.insert(key.to_owned(), value.to_owned());
        }
    }

    fn set_global_class(&self, class: &str, enabled: bool) {
        let mut st = self.state.borrow_mut();
        if enabled {
            st.classes.insert(class.to_owned());
        } else {
            st.classes.remove(class);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ports/surface.rs"]
mod tests;
