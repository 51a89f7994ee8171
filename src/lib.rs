//! devconf compiles declarative device configuration descriptions into a flat table of C
//! preprocessor macros.
//!
//! A source document declares namespaces, typed variables with value constraints (allow/deny
//! filters, display maps, constant lists, defaults), struct templates and their instances, and
//! assignments. Compilation validates every construct as it is built, then flattens the resolved
//! tree into `#define` lines:
//!
//! - [`compile_str`] / [`compile_file`] run the whole pipeline
//! - [`MacroTable::render_header`] renders the header text
//! - [`GeneratorOptions`] controls macro naming
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod ast;
pub(crate) mod compile;
pub(crate) mod config;
pub(crate) mod frontend;
pub(crate) mod generate;
pub(crate) mod model;
pub(crate) mod symbols;

pub use crate::compile::{Compiled, compile_file, compile_str, parse_source};
pub use crate::config::GeneratorOptions;
pub use crate::foundation::error::{
    CompileError, CompileResult, DescriptionKind, DevconfError, DevconfResult, ErrorKind,
};
pub use crate::foundation::position::SourcePosition;
pub use crate::generate::macros::{MacroEntry, MacroTable, OutputFormat};
pub use crate::model::types::{BuiltinType, Type};
pub use crate::model::value::Value;
