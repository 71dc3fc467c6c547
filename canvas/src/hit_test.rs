use super::*;
use crate::doc::{LayoutMode, Mutation, PageMeta};
use crate::geom::{Position, Size};
use crate::props::{ComponentKind, ComponentProps};

fn placed(id: &str, top: f64, left: f64, z: i64) -> ComponentInstance {
    let position = Position::new(Offset::new(top, left), Size::new(100.0, 50.0), z);
    ComponentInstance::new(id.into(), ComponentProps::defaults(ComponentKind::Button), Some(position))
}

fn doc_of(instances: Vec<ComponentInstance>) -> PageDocument {
    let mut doc = PageDocument::default();
    for (index, instance) in instances.into_iter().enumerate() {
        doc.apply(Mutation::Insert { index, instance }).unwrap();
    }
    doc
}

#[test]
fn miss_on_empty_canvas() {
    let doc = PageDocument::default();
    assert!(hit_test(&doc, Offset::new(10.0, 10.0)).is_none());
}

#[test]
fn hit_inside_box() {
    let doc = doc_of(vec![placed("a", 20.0, 20.0, 0)]);
    assert_eq!(hit_test(&doc, Offset::new(30.0, 30.0)).unwrap().id().as_str(), "a");
}

#[test]
fn box_edges_are_half_open() {
    let doc = doc_of(vec![placed("a", 0.0, 0.0, 0)]);
    assert!(hit_test(&doc, Offset::new(0.0, 0.0)).is_some());
    assert!(hit_test(&doc, Offset::new(50.0, 10.0)).is_none());
    assert!(hit_test(&doc, Offset::new(10.0, 100.0)).is_none());
}

#[test]
fn later_sequence_wins_on_equal_z() {
    let doc = doc_of(vec![placed("under", 0.0, 0.0, 0), placed("over", 10.0, 10.0, 0)]);
    assert_eq!(hit_test(&doc, Offset::new(20.0, 20.0)).unwrap().id().as_str(), "over");
}

#[test]
fn higher_z_wins_over_sequence() {
    let doc = doc_of(vec![placed("raised", 0.0, 0.0, 3), placed("later", 10.0, 10.0, 1)]);
    assert_eq!(hit_test(&doc, Offset::new(20.0, 20.0)).unwrap().id().as_str(), "raised");
}

#[test]
fn hit_all_lists_topmost_first() {
    let doc = doc_of(vec![placed("a", 0.0, 0.0, 0), placed("b", 10.0, 10.0, 0), placed("far", 300.0, 0.0, 0)]);
    let ids: Vec<_> = hit_all(&doc, Offset::new(20.0, 20.0)).iter().map(|c| c.id().as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);
}

#[test]
fn auto_flow_components_are_never_hit() {
    let meta = PageMeta { layout_mode: LayoutMode::AutoFlow, ..PageMeta::default() };
    let bare = ComponentInstance::new("a".into(), ComponentProps::defaults(ComponentKind::Text), None);
    let doc = PageDocument::assemble(meta, vec![bare]).unwrap();
    assert!(hit_test(&doc, Offset::new(0.0, 0.0)).is_none());
}

#[test]
fn kept_positions_stop_hitting_after_switch_to_auto_flow() {
    let mut doc = doc_of(vec![placed("a", 0.0, 0.0, 0)]);
    assert_eq!(hit_all(&doc, Offset::new(5.0, 5.0)).len(), 1);

    doc.apply(Mutation::SetLayout { mode: LayoutMode::AutoFlow, placements: Vec::new() }).unwrap();
    assert!(doc.components()[0].position().is_some());
    assert!(hit_test(&doc, Offset::new(5.0, 5.0)).is_none());
    assert!(hit_all(&doc, Offset::new(5.0, 5.0)).is_empty());
}
