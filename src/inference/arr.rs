use serde_json::Value;

use crate::shape::Shape;

/// One shape for every element; `[]` leaves the placeholder.
pub(super) fn observe(xs: &[Value]) -> Shape {
    let mut item = Shape::empty();
    for el in xs { item = super::merge(&item, &super::infer(el)); }
    item
}

pub(super) fn join_items(a: Option<&Shape>, b: Option<&Shape>) -> Option<Box<Shape>> {
    match (a, b) {
        (None, None) => None,
        (Some(x), None) | (None, Some(x)) => Some(Box::new(x.clone())),
        (Some(x), Some(y)) => Some(Box::new(super::merge(x, y))),
    }
}
