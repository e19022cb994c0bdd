//! Shape → JSON Schema document.
//!
//! Output is byte-stable: keyword order inside a node is fixed
//! (`type`, `properties`, `required`, `items`), `type` lists follow the
//! [`Kind`] order, and properties/required come out of ordered containers.
use serde_json::{Map, Value};

use crate::shape::{Kind, Shape};

/// Document-level annotations that sit next to the root shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMeta {
    pub schema_uri: Option<String>,
    pub title: Option<String>,
}

impl DocumentMeta {
    pub fn is_empty(&self) -> bool {
        self.schema_uri.is_none() && self.title.is_none()
    }

    /// Values set on `overrides` win; the rest come from `self`.
    pub fn overridden_by(&self, overrides: &DocumentMeta) -> DocumentMeta {
        DocumentMeta {
            schema_uri: overrides.schema_uri.clone().or_else(|| self.schema_uri.clone()),
            title: overrides.title.clone().or_else(|| self.title.clone()),
        }
    }
}

pub fn emit_schema(s: &Shape) -> Value {
    Value::Object(emit_node(s))
}

/// Root schema with the optional `$schema`/`title` header in front.
pub fn emit_document(s: &Shape, meta: &DocumentMeta) -> Value {
    let mut doc = Map::new();
    if let Some(uri) = &meta.schema_uri {
        doc.insert("$schema".into(), Value::from(uri.clone()));
    }
    if let Some(title) = &meta.title {
        doc.insert("title".into(), Value::from(title.clone()));
    }
    doc.extend(emit_node(s));
    Value::Object(doc)
}

pub fn to_pretty_string(doc: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(doc)
}

fn emit_node(s: &Shape) -> Map<String, Value> {
    let mut o = Map::new();

    if let Some(ty) = emit_type(s) {
        o.insert("type".into(), ty);
    }

    if s.has(Kind::Object) {
        let props: Map<String, Value> = s.properties.iter()
            .map(|(k, child)| (k.clone(), emit_schema(child)))
            .collect();
        o.insert("properties".into(), Value::Object(props));
        if !s.required.is_empty() {
            o.insert(
                "required".into(),
                Value::Array(s.required.iter().cloned().map(Value::from).collect()),
            );
        }
    }

    if s.has(Kind::Array) {
        // unresolved item shape → no `items` keyword at all
        if let Some(item) = s.items.as_deref().filter(|i| !i.is_placeholder()) {
            o.insert("items".into(), emit_schema(item));
        }
    }

    o
}

fn emit_type(s: &Shape) -> Option<Value> {
    match s.types.len() {
        0 => None,
        1 => s.types.first().map(|k| Value::from(k.as_str())),
        _ => Some(Value::Array(s.types.iter().map(|k| Value::from(k.as_str())).collect())),
    }
}
