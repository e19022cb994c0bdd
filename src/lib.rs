//! Infer JSON Schemas from JSON samples and extend existing schemas with new data.
//!
//! Pipeline: [`inference::infer`] each sample into a [`shape::Shape`], fold
//! samples (and an optional base schema read back through [`lift`]) with
//! [`inference::merge`], then render with [`emit::emit_document`].
pub mod shape;
pub mod inference;
pub mod emit;
pub mod lift;
pub mod error;
pub mod path_de;
pub mod jq_exec;
pub mod cli;

pub use emit::{emit_document, emit_schema, DocumentMeta};
pub use error::Error;
pub use inference::{infer, infer_from_values, merge, Inference};
pub use shape::{Kind, Shape};
