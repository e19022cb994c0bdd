// Shape tree shared by inference, merge, lift and emit. No serde_json::Value here.

use std::collections::{BTreeMap, BTreeSet};

/// Primitive kind tags. Declaration order is the emission order for `type` lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    Array,
    Boolean,
    Integer,
    Null,
    Number,
    Object,
    String,
}

impl Kind {
    pub const ALL: [Kind; 7] = [
        Kind::Array,
        Kind::Boolean,
        Kind::Integer,
        Kind::Null,
        Kind::Number,
        Kind::Object,
        Kind::String,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Array   => "array",
            Kind::Boolean => "boolean",
            Kind::Integer => "integer",
            Kind::Null    => "null",
            Kind::Number  => "number",
            Kind::Object  => "object",
            Kind::String  => "string",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

/// One schema node.
///
/// - `properties`/`required` only carry meaning while `Kind::Object` is in `types`.
/// - `items` is `Some` exactly when `Kind::Array` is in `types`.
/// - `required ⊆ properties.keys()`.
///
/// The default value (no types, nothing else) is the "unknown" placeholder:
/// it accepts anything and is the identity for [`crate::inference::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shape {
    pub types: BTreeSet<Kind>,
    pub properties: BTreeMap<String, Shape>,
    pub required: BTreeSet<String>,
    pub items: Option<Box<Shape>>,
}

impl Shape {
    pub fn empty() -> Self { Self::default() }

    pub fn of_kind(kind: Kind) -> Self {
        Self { types: BTreeSet::from([kind]), ..Self::default() }
    }

    pub fn is_placeholder(&self) -> bool {
        self.types.is_empty() && self.properties.is_empty() && self.items.is_none()
    }

    pub fn has(&self, kind: Kind) -> bool {
        self.types.contains(&kind)
    }

    pub fn property(&self, name: &str) -> Option<&Shape> {
        self.properties.get(name)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }
}
