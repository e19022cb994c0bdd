//! CLI: infer → (optionally) extend a base schema → emit
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::emit::{emit_document, to_pretty_string, DocumentMeta};
use crate::error::{Error, Result};
use crate::inference::Inference;
use crate::lift::read_base_schema;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer a JSON Schema from JSON samples, or extend an existing schema with new samples
#[derive(Parser, Debug)]
#[command(name = "json-shape", version)]
pub struct CommandLineInterface {
    #[command(flatten)]
    input_settings: InputSettings,

    /// existing JSON Schema to extend with the new samples
    #[arg(long, short = 'b')]
    base_schema: Option<PathBuf>,

    #[command(flatten)]
    output_settings: OutputSettings,

    /// only log warnings and errors
    #[arg(long, short, default_value_t = false)]
    pub quiet: bool,
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more input JSON files. May be literal paths or quoted glob patterns
    #[arg(required = true, num_args = 1..)]
    input: Vec<String>,

    /// treat input as newline-delimited JSON (NDJSON), one sample per line
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document; every output is a sample
    #[arg(long)]
    jq_expr: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct OutputSettings {
    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// `title` for the emitted document (overrides the base schema's)
    #[arg(long)]
    title: Option<String>,

    /// `$schema` URI for the emitted document (overrides the base schema's)
    #[arg(long)]
    schema_uri: Option<String>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_process(&self, mut apply: impl FnMut(Value)) -> Result<()> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        for source_path in source_paths {
            debug!(path = %source_path.display(), "reading input");
            let bytes = std::fs::read(&source_path).map_err(|source| Error::InputNotFound {
                path: source_path.clone(),
                source,
            })?;
            if self.ndjson {
                for (ix, line) in bytes.split(|b| *b == b'\n').enumerate() {
                    let line = line.strip_suffix(b"\r").unwrap_or(line);
                    if line.iter().all(u8::is_ascii_whitespace) {
                        continue;
                    }
                    let json_value = serde_json::from_slice::<Value>(line).map_err(|source| {
                        Error::NdjsonLine { path: source_path.clone(), line: ix + 1, source }
                    })?;
                    self.select(&source_path, json_value, &mut apply)?;
                }
            } else {
                let json_value = serde_json::from_slice::<Value>(&bytes).map_err(|source| {
                    Error::InputParse { path: source_path.clone(), source }
                })?;
                self.select(&source_path, json_value, &mut apply)?;
            }
        }
        Ok(())
    }

    /// Apply `--json-pointer` then `--jq-expr` to one document.
    fn select(&self, source_path: &Path, json_value: Value, apply: &mut impl FnMut(Value)) -> Result<()> {
        let json_value = match self.json_pointer.as_deref() {
            None => json_value,
            Some(pointer) => json_value.pointer(pointer).cloned().ok_or_else(|| {
                Error::JsonPointer { path: source_path.to_path_buf(), pointer: pointer.to_string() }
            })?,
        };
        match self.jq_expr.as_ref() {
            None => apply(json_value),
            Some(jq_expr) => {
                let result = crate::jq_exec::run_jaq(jq_expr, &json_value).map_err(|source| {
                    Error::JqFilter { path: source_path.to_path_buf(), source }
                })?;
                for json_value in result {
                    apply(json_value);
                }
            }
        }
        Ok(())
    }
}

impl OutputSettings {
    fn meta(&self) -> DocumentMeta {
        DocumentMeta { schema_uri: self.schema_uri.clone(), title: self.title.clone() }
    }

    fn write(&self, schema_src: &str) -> Result<()> {
        match self.output.as_ref() {
            Some(out) => {
                if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).map_err(|source| Error::OutputWrite {
                        path: out.clone(),
                        source,
                    })?;
                }
                std::fs::write(out, format!("{schema_src}\n")).map_err(|source| {
                    Error::OutputWrite { path: out.clone(), source }
                })?;
                info!("schema written to {}", out.display());
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{schema_src}")
                    .and_then(|()| stdout.flush())
                    .map_err(|source| Error::OutputWrite { path: PathBuf::from("<stdout>"), source })?;
            }
        }
        Ok(())
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        // 1) seed the state with the base schema, if any
        let (mut inf, meta) = match self.base_schema.as_ref() {
            Some(path) => {
                info!("extending existing schema {} with new data", path.display());
                let (base, meta) = read_base_schema(path)?;
                (Inference::with_base(base), meta)
            }
            None => (Inference::new(), DocumentMeta::default()),
        };

        // 2) fold in the new samples
        self.input_settings.load_process(|value| {
            inf.observe_value(&value);
        })?;
        debug!(samples = inf.samples(), "observed input samples");
        if inf.samples() == 0 {
            warn!("no samples were observed; the schema only reflects the base schema, if any");
        }

        // 3) emit
        let meta = meta.overridden_by(&self.output_settings.meta());
        let schema = emit_document(&inf.into_shape(), &meta);
        let schema_src = to_pretty_string(&schema)?;
        self.output_settings.write(&schema_src)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let entries = glob::glob(pattern).map_err(|source| Error::GlobPattern {
                pattern: pattern.to_string(),
                source,
            })?;
            let before = out.len();
            for entry in entries {
                out.push(entry?);
            }
            if out.len() == before {
                return Err(Error::NoGlobMatch { pattern: pattern.to_string() });
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
