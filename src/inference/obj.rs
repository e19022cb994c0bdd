use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Value};

use crate::shape::Shape;

/// (properties, required) for one observed object: every present key is required.
pub(super) fn observe(map: &Map<String, Value>) -> (BTreeMap<String, Shape>, BTreeSet<String>) {
    let mut properties = BTreeMap::new();
    let mut required = BTreeSet::new();
    for (k, v) in map {
        properties.insert(k.clone(), super::infer(v));
        required.insert(k.clone());
    }
    (properties, required)
}

pub(super) fn join_properties(
    a: &BTreeMap<String, Shape>,
    b: &BTreeMap<String, Shape>,
) -> BTreeMap<String, Shape> {
    let mut out = BTreeMap::new();

    // merge keys from a
    for (k, sa) in a {
        let merged = match b.get(k) {
            None => sa.clone(),
            Some(sb) => super::merge(sa, sb),
        };
        out.insert(k.clone(), merged);
    }
    // add keys only in b
    for (k, sb) in b {
        if !out.contains_key(k) {
            out.insert(k.clone(), sb.clone());
        }
    }

    out
}

/// Keys required on both sides and described on both sides.
pub(super) fn join_required(a: &Shape, b: &Shape) -> BTreeSet<String> {
    a.required
        .intersection(&b.required)
        .filter(|k| a.properties.contains_key(*k) && b.properties.contains_key(*k))
        .cloned()
        .collect()
}
