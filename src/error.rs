//! Errors surfaced by the CLI pipeline.
//!
//! Inference, merge and emission are total; everything here comes from files,
//! parsing, or the input pre-processing options.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    // ---- inputs ----
    #[error("input file not found or unreadable ({path}): {source}")]
    InputNotFound { path: PathBuf, source: std::io::Error },

    #[error("invalid JSON in input file ({path}): {source}")]
    InputParse { path: PathBuf, source: serde_json::Error },

    #[error("invalid JSON on line {line} of NDJSON input ({path}): {source}")]
    NdjsonLine { path: PathBuf, line: usize, source: serde_json::Error },

    #[error("invalid glob pattern `{pattern}`: {source}")]
    GlobPattern { pattern: String, source: glob::PatternError },

    #[error("glob pattern matched no files: {pattern}")]
    NoGlobMatch { pattern: String },

    #[error("failed to read glob match: {0}")]
    GlobEntry(#[from] glob::GlobError),

    #[error("JSON pointer `{pointer}` does not resolve in input file ({path})")]
    JsonPointer { path: PathBuf, pointer: String },

    #[error("failed to apply jq expression to input file ({path}): {source}")]
    JqFilter { path: PathBuf, source: JqError },

    // ---- base schema ----
    #[error("base schema not found or unreadable ({path}): {source}")]
    BaseSchemaNotFound { path: PathBuf, source: std::io::Error },

    #[error("invalid base schema ({path}): {message}")]
    BaseSchemaParse { path: PathBuf, message: String },

    // ---- output ----
    #[error("failed to render schema: {0}")]
    Render(#[from] serde_json::Error),

    #[error("failed to write schema ({path}): {source}")]
    OutputWrite { path: PathBuf, source: std::io::Error },
}

/// Why a `--jq-expr` filter produced no samples for a document.
#[derive(Error, Debug)]
pub enum JqError {
    #[error("jq syntax error: {details}")]
    Parse { details: String },

    #[error("undefined jq function or variable: {names}")]
    Undefined { names: String },

    #[error("jq runtime error: {message}")]
    Runtime { message: String },
}
