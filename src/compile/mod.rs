pub(crate) mod session;

use std::path::Path;

use crate::config::GeneratorOptions;
use crate::foundation::error::{DevconfError, DevconfResult};
use crate::generate::macros::MacroTable;

pub use session::Compiled;

/// Parse and validate `source` without generating output.
#[tracing::instrument(skip(source), fields(bytes = source.len()))]
pub fn parse_source(source: &str, file_name: &str) -> DevconfResult<Compiled> {
    let compiled = crate::frontend::parser::parse(source, file_name)?;
    tracing::debug!(
        declarations = compiled.configuration.declaration_count(),
        "configuration built"
    );
    Ok(compiled)
}

/// Compile one source document into its macro table.
///
/// `file_name` only feeds diagnostics.
#[tracing::instrument(skip(source, options), fields(bytes = source.len()))]
pub fn compile_str(
    source: &str,
    file_name: &str,
    options: &GeneratorOptions,
) -> DevconfResult<MacroTable> {
    options.validate()?;
    let compiled = parse_source(source, file_name)?;
    Ok(compiled.generate(options)?)
}

/// Read `path` and compile it; diagnostics name the path as given.
#[tracing::instrument(skip(options))]
pub fn compile_file(path: &Path, options: &GeneratorOptions) -> DevconfResult<MacroTable> {
    let source = std::fs::read_to_string(path).map_err(|e| DevconfError::io(path, e))?;
    compile_str(&source, &path.display().to_string(), options)
}
