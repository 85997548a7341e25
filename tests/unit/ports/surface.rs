use super::*;

#[test]
fn attach_detach_is_idempotent() {
    let s = MemorySurface::new();
    let a = s.attach(VisualNode::new("a"));
    let b = s.attach(VisualNode::new("b"));
    assert_ne!(a, b);
    assert_eq!(s.attached_count(), 2);

    s.detach(a);
    s.detach(a);
    s.detach(NodeId(999));
    assert_eq!(s.attached_count(), 1);
    assert_eq!(s.attached_total(), 2);
    assert_eq!(s.peak_attached(), 2);
}

#[test]
fn mutations_of_detached_nodes_are_ignored() {
    let s = MemorySurface::new();
    let id = s.attach(VisualNode::new("title").text("x"));
    s.set_text(id, "hello");
    s.set_style(id, "opacity", "0.5");
    let node = s.node(id).unwrap();
    assert_eq!(node.text, "hello");
    assert_eq!(node.style_value("opacity"), Some("0.5"));

    s.detach(id);
    s.set_text(id, "ghost");
    assert!(s.node(id).is_none());
}

#[test]
fn owner_and_class_queries() {
    let s = MemorySurface::new();
    let mut n = VisualNode::new("spark").at_percent(12.5, 50.0);
    n.owner = "Supernova".to_owned();
    s.attach(n.clone());
    s.attach(n);
    s.attach(VisualNode::new("spark"));
    assert_eq!(s.attached_owned_by("Supernova"), 2);
    assert_eq!(s.attached_with_class("spark"), 3);
    let (_, first) = &s.nodes()[0];
    assert_eq!(first.style_value("left"), Some("12.50%"));
}

#[test]
fn global_classes_toggle() {
    let s = MemorySurface::new();
    s.set_global_class("shake", true);
    s.set_global_class("void", true);
    assert!(s.has_global_class("shake"));
    s.set_global_class("shake", false);
    s.set_global_class("shake", false);
    assert_eq!(s.global_classes(), vec!["void".to_owned()]);
}
