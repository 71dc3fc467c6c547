#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::{ComponentInstance, LayoutMode, PageDocument};
use crate::geom::Offset;

/// The topmost component whose box contains `point`, in z-honoring paint
/// order.
#[must_use]
pub fn hit_test(doc: &PageDocument, point: Offset) -> Option<&ComponentInstance> {
    hits(doc, point).next()
}

/// Every component under `point`, topmost first.
#[must_use]
pub fn hit_all(doc: &PageDocument, point: Offset) -> Vec<&ComponentInstance> {
    hits(doc, point).collect()
}

/// Auto-flow pages have no boxes, even for components that kept a stored
/// position from free layout.
fn hits(doc: &PageDocument, point: Offset) -> impl Iterator<Item = &ComponentInstance> {
    let boxed = doc.layout_mode() == LayoutMode::FreePosition;
    doc.paint_order(true)
        .into_iter()
        .rev()
        .filter(move |c| boxed && c.position().is_some_and(|p| p.contains(point)))
}
