//! Shape inference and merge.
//!
//! Every JSON sample maps to a [`Shape`]; samples are combined with [`merge`],
//! a pure join that is associative, commutative and idempotent, so the folded
//! result does not depend on the order in which samples (or a base schema)
//! arrive.
//!
//! - Types widen to a union on conflict, never an error.
//! - `required` narrows by intersection across object samples.
//! - Arrays keep one pooled item shape, not per-position evidence.
pub mod num;
mod obj;
mod arr;

use serde_json::Value;

use crate::shape::{Kind, Shape};

// ------------------------------ Observe ---------------------------------- //

pub fn infer(v: &Value) -> Shape {
    match v {
        Value::Null => Shape::of_kind(Kind::Null),
        Value::Bool(_) => Shape::of_kind(Kind::Boolean),
        Value::Number(n) => Shape::of_kind(num::classify(n)),
        Value::String(_) => Shape::of_kind(Kind::String),
        Value::Array(xs) => {
            let item = arr::observe(xs);
            Shape { items: Some(Box::new(item)), ..Shape::of_kind(Kind::Array) }
        }
        Value::Object(m) => {
            let (properties, required) = obj::observe(m);
            Shape { properties, required, ..Shape::of_kind(Kind::Object) }
        }
    }
}

// -------------------------------- Merge (⊔) ------------------------------- //

static PLACEHOLDER: Shape = Shape {
    types: std::collections::BTreeSet::new(),
    properties: std::collections::BTreeMap::new(),
    required: std::collections::BTreeSet::new(),
    items: None,
};

pub fn merge(a: &Shape, b: &Shape) -> Shape {
    let mut out = Shape::empty();

    out.types = &a.types | &b.types;

    // Object keywords only count for sides that actually saw objects.
    match (a.has(Kind::Object), b.has(Kind::Object)) {
        (false, false) => {}
        (true, false) => {
            out.properties = a.properties.clone();
            out.required = a.required.clone();
        }
        (false, true) => {
            out.properties = b.properties.clone();
            out.required = b.required.clone();
        }
        (true, true) => {
            out.properties = obj::join_properties(&a.properties, &b.properties);
            out.required = obj::join_required(a, b);
        }
    }

    out.items = arr::join_items(items_of(a), items_of(b));

    out
}

fn items_of(s: &Shape) -> Option<&Shape> {
    if !s.has(Kind::Array) { return None; }
    Some(s.items.as_deref().unwrap_or(&PLACEHOLDER))
}

// ------------------------------- Front API -------------------------------- //

#[derive(Debug, Default)]
pub struct Inference { state: Shape, samples: u64 }

impl Inference {
    pub fn new() -> Self { Self::default() }

    /// Seed the accumulator with an existing shape (e.g. a lifted base schema).
    pub fn with_base(base: Shape) -> Self { Self { state: base, samples: 0 } }

    pub fn observe_value(&mut self, v: &Value) {
        let obs = infer(v);
        self.observe_shape(&obs);
        self.samples += 1;
    }

    pub fn observe_shape(&mut self, shape: &Shape) {
        self.state = merge(&self.state, shape);
    }

    pub fn samples(&self) -> u64 { self.samples }

    pub fn solve(&self) -> Shape { self.state.clone() }

    pub fn into_shape(self) -> Shape { self.state }
}

pub fn infer_from_values<'a, I>(values: I) -> Shape
where
    I: IntoIterator<Item = &'a Value>
{
    let mut st = Shape::empty();
    for v in values {
        st = merge(&st, &infer(v));
    }
    st
}

// ------------------------------- Tests ------------------------------------ //
