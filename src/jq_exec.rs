//! jq pre-filter: every output of the filter becomes one sample.
use jaq_core::{compile::Undefined, load, Compiler, Ctx, RcIter};
use jaq_json::Val;
use serde_json::Value;

use crate::error::JqError;

/// Compile `filter_src` and run it once over `input`, collecting every output.
///
/// An error part way through the output stream discards the outputs before it;
/// a document only contributes samples when the whole filter succeeds on it.
pub fn run_jaq(filter_src: &str, input: &Value) -> Result<Vec<Value>, JqError> {
    let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = load::Arena::default();
    let program = load::File { code: filter_src, path: () };

    let modules = loader.load(&arena, program).map_err(parse_error)?;

    let filter = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(undefined_error)?;

    let inputs = RcIter::new(core::iter::empty());
    let outputs = filter
        .run((Ctx::new([], &inputs), Val::from(input.clone())))
        .map(|output| {
            output
                .map(Value::from)
                .map_err(|error| JqError::Runtime { message: error.to_string() })
        })
        .collect();
    outputs
}

fn parse_error(errs: Vec<(load::File<&str, ()>, load::Error<&str>)>) -> JqError {
    let details = errs.iter().map(|(_, err)| format!("{err:?}")).collect::<Vec<_>>();
    JqError::Parse { details: details.join("; ") }
}

fn undefined_error(errs: Vec<(load::File<&str, ()>, Vec<(&str, Undefined)>)>) -> JqError {
    let names = errs
        .iter()
        .flat_map(|(_, list)| list.iter().map(|(name, undef)| format!("`{name}` ({undef:?})")))
        .collect::<Vec<_>>();
    JqError::Undefined { names: names.join(", ") }
}
