//! JSON Schema document → Shape (the inverse of `emit`).
//!
//! Only `type`, `properties`, `required` and `items` carry meaning; every
//! other keyword is skipped by serde. A recognized keyword with a malformed
//! value is a parse error.
use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::value::MapAccessDeserializer;
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::emit::DocumentMeta;
use crate::error::{Error, Result};
use crate::inference::merge;
use crate::path_de::{from_slice_with_path, PathError};
use crate::shape::{Kind, Shape};

// ------------------------------- Document --------------------------------- //

#[derive(Debug, Default, Deserialize)]
pub struct SchemaDocument {
    #[serde(rename = "$schema", default)]
    pub schema_uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "type", default)]
    pub type_: Option<TypeKeyword>,
    #[serde(default)]
    pub properties: Option<IndexMap<String, SchemaNode>>,
    #[serde(default)]
    pub required: Option<Vec<String>>,
    #[serde(default)]
    pub items: Option<ItemsKeyword>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TypeKeyword {
    One(String),
    Many(Vec<String>),
}

/// Sub-schema position: a schema object or a boolean schema.
#[derive(Debug)]
pub enum SchemaNode {
    Bool(bool),
    Schema(Box<SchemaDocument>),
}

/// `items` as one schema, or draft-07 tuple form.
#[derive(Debug)]
pub enum ItemsKeyword {
    Tuple(Vec<SchemaNode>),
    One(SchemaNode),
}

// Sub-schemas dispatch on the JSON token so a nested error keeps its full path.

impl<'de> Deserialize<'de> for SchemaNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NodeVisitor;

        impl<'de> Visitor<'de> for NodeVisitor {
            type Value = SchemaNode;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a schema object or a boolean")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<SchemaNode, E> {
                Ok(SchemaNode::Bool(v))
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<SchemaNode, A::Error> {
                let doc = SchemaDocument::deserialize(MapAccessDeserializer::new(map))?;
                Ok(SchemaNode::Schema(Box::new(doc)))
            }
        }

        deserializer.deserialize_any(NodeVisitor)
    }
}

impl<'de> Deserialize<'de> for ItemsKeyword {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ItemsVisitor;

        impl<'de> Visitor<'de> for ItemsVisitor {
            type Value = ItemsKeyword;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a schema object, a boolean, or an array of schemas")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<ItemsKeyword, E> {
                Ok(ItemsKeyword::One(SchemaNode::Bool(v)))
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<ItemsKeyword, A::Error> {
                let doc = SchemaDocument::deserialize(MapAccessDeserializer::new(map))?;
                Ok(ItemsKeyword::One(SchemaNode::Schema(Box::new(doc))))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ItemsKeyword, A::Error> {
                let mut nodes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(node) = seq.next_element::<SchemaNode>()? {
                    nodes.push(node);
                }
                Ok(ItemsKeyword::Tuple(nodes))
            }
        }

        deserializer.deserialize_any(ItemsVisitor)
    }
}

impl TypeKeyword {
    fn names(&self) -> &[String] {
        match self {
            TypeKeyword::One(name) => std::slice::from_ref(name),
            TypeKeyword::Many(names) => names,
        }
    }
}

impl SchemaDocument {
    pub fn parse(bytes: &[u8]) -> Result<Self, PathError> {
        from_slice_with_path(bytes)
    }

    pub fn meta(&self) -> DocumentMeta {
        DocumentMeta {
            schema_uri: self.schema_uri.clone(),
            title: self.title.clone(),
        }
    }
}

// --------------------------------- Lift ----------------------------------- //

pub fn lift(doc: &SchemaDocument) -> Shape {
    let mut s = Shape::empty();

    match &doc.type_ {
        Some(ty) => {
            for name in ty.names() {
                match Kind::from_name(name) {
                    Some(kind) => { s.types.insert(kind); }
                    None => warn!("ignoring unknown schema type `{name}`"),
                }
            }
        }
        // no `type`: infer the kind from the structural keywords present
        None => {
            if doc.properties.is_some() || doc.required.is_some() {
                s.types.insert(Kind::Object);
            }
            if doc.items.is_some() {
                s.types.insert(Kind::Array);
            }
        }
    }

    if s.has(Kind::Object) {
        for (k, node) in doc.properties.iter().flatten() {
            s.properties.insert(k.clone(), lift_node(node));
        }
        for k in doc.required.iter().flatten() {
            s.properties.entry(k.clone()).or_default();
            s.required.insert(k.clone());
        }
    }

    if s.has(Kind::Array) {
        let item = match &doc.items {
            None => Shape::empty(),
            Some(ItemsKeyword::One(node)) => lift_node(node),
            Some(ItemsKeyword::Tuple(nodes)) => nodes
                .iter()
                .map(lift_node)
                .fold(Shape::empty(), |acc, x| merge(&acc, &x)),
        };
        s.items = Some(Box::new(item));
    }

    s
}

// `true` and `false` both lift to the permissive placeholder
fn lift_node(node: &SchemaNode) -> Shape {
    match node {
        SchemaNode::Bool(_) => Shape::empty(),
        SchemaNode::Schema(doc) => lift(doc),
    }
}

pub fn read_base_schema(path: &Path) -> Result<(Shape, DocumentMeta)> {
    let bytes = std::fs::read(path).map_err(|source| Error::BaseSchemaNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let doc = SchemaDocument::parse(&bytes).map_err(|err| Error::BaseSchemaParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    debug!(path = %path.display(), "lifted base schema");
    Ok((lift(&doc), doc.meta()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::emit_schema;
    use crate::inference::infer;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::collections::BTreeSet;

    fn lift_value(v: Value) -> Shape {
        let bytes = serde_json::to_vec(&v).unwrap();
        lift(&SchemaDocument::parse(&bytes).unwrap())
    }

    #[test]
    fn emitted_schemas_lift_back_unchanged() {
        let samples = [
            json!({"a": 1, "b": [1, "x", {"c": null}], "d": {}, "e": []}),
            json!([[], [true, 2.5]]),
            json!("plain"),
        ];
        for v in samples {
            let s = infer(&v);
            assert_eq!(lift_value(emit_schema(&s)), s);
        }
        assert_eq!(lift_value(json!({})), Shape::empty());
    }

    #[test]
    fn extending_with_conflicting_type() {
        let base = lift_value(json!({
            "type": "object",
            "properties": {"a": {"type": "integer"}},
            "required": ["a"]
        }));
        let out = emit_schema(&merge(&base, &infer(&json!({"a": "x"}))));
        assert_eq!(out["properties"]["a"], json!({"type": ["integer", "string"]}));
        assert_eq!(out["required"], json!(["a"]));
    }

    #[test]
    fn extending_drops_missing_required() {
        let base = lift_value(json!({
            "type": "object",
            "properties": {"a": {"type": "integer"}, "b": {"type": "string"}},
            "required": ["a", "b"]
        }));
        let out = emit_schema(&merge(&base, &infer(&json!({"a": 1}))));
        assert_eq!(out["required"], json!(["a"]));
        assert_eq!(out["properties"]["b"], json!({"type": "string"}));
    }

    #[test]
    fn unknown_keywords_and_types_are_ignored() {
        let s = lift_value(json!({
            "type": ["string", "any"],
            "minLength": 3,
            "description": "free text",
            "$id": "urn:x"
        }));
        assert_eq!(s, Shape::of_kind(Kind::String));
    }

    #[test]
    fn kinds_implied_by_structure() {
        let s = lift_value(json!({
            "properties": {"a": {"type": "null"}},
            "required": ["a", "z"]
        }));
        assert_eq!(s.types, BTreeSet::from([Kind::Object]));
        // required-only names get a permissive property
        assert!(s.property("z").unwrap().is_placeholder());
        assert!(s.is_required("z"));

        let a = lift_value(json!({"items": {"type": "boolean"}}));
        assert_eq!(a.types, BTreeSet::from([Kind::Array]));
        assert_eq!(a.items.unwrap().types, BTreeSet::from([Kind::Boolean]));
    }

    #[test]
    fn properties_ignored_without_object_type() {
        let s = lift_value(json!({"type": "string", "properties": {"a": {}}}));
        assert!(s.properties.is_empty());
    }

    #[test]
    fn tuple_items_collapse_to_one_shape() {
        let s = lift_value(json!({
            "type": "array",
            "items": [{"type": "string"}, {"type": "integer"}, true],
            "additionalItems": false
        }));
        assert_eq!(s.items.unwrap().types, BTreeSet::from([Kind::Integer, Kind::String]));
    }

    #[test]
    fn boolean_subschemas_are_permissive() {
        let s = lift_value(json!({"type": "object", "properties": {"any": true}}));
        assert!(s.property("any").unwrap().is_placeholder());
    }

    #[test]
    fn header_is_kept() {
        let bytes = br#"{"$schema": "http://json-schema.org/draft-07/schema#", "title": "Root", "type": "null"}"#;
        let doc = SchemaDocument::parse(bytes).unwrap();
        let meta = doc.meta();
        assert_eq!(meta.title.as_deref(), Some("Root"));
        assert_eq!(meta.schema_uri.as_deref(), Some("http://json-schema.org/draft-07/schema#"));
    }

    #[test]
    fn malformed_keyword_reports_path() {
        let err = SchemaDocument::parse(br#"{"type": "object", "required": "a"}"#).unwrap_err();
        assert_eq!(err.path, "required");
    }

    #[test]
    fn malformed_nested_keyword_reports_full_path() {
        let err = SchemaDocument::parse(
            br#"{"type": "object", "properties": {"a": {"type": "object", "required": "x"}}}"#,
        )
        .unwrap_err();
        assert_eq!(err.path, "properties.a.required");

        let err = SchemaDocument::parse(br#"{"type": "array", "items": {"required": 7}}"#).unwrap_err();
        assert_eq!(err.path, "items.required");

        let err = SchemaDocument::parse(
            br#"{"type": "array", "items": [{"type": "string"}, {"properties": []}]}"#,
        )
        .unwrap_err();
        assert_eq!(err.path, "items[1].properties");
    }

    #[test]
    fn subschema_must_be_object_or_boolean() {
        let err = SchemaDocument::parse(br#"{"properties": {"a": 3}}"#).unwrap_err();
        assert_eq!(err.path, "properties.a");
        assert!(err.to_string().contains("a schema object or a boolean"), "{err}");
    }

    #[test]
    fn read_missing_base_schema() {
        let err = read_base_schema(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, Error::BaseSchemaNotFound { .. }));
    }
}
