use std::fmt;
use std::path::PathBuf;

use crate::foundation::position::SourcePosition;

/// Result of a construction step inside one compilation.
pub type CompileResult<T> = Result<T, CompileError>;

/// Convenience result type used by the crate's public entry points.
pub type DevconfResult<T> = Result<T, DevconfError>;

/// The parts a variable description set can hold at most once each.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DescriptionKind {
    Allow,
    Deny,
    Map,
    Constants,
    Default,
}

impl fmt::Display for DescriptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Allow => "allow filters",
            Self::Deny => "deny filters",
            Self::Map => "maps",
            Self::Constants => "constant lists",
            Self::Default => "default values",
        };
        f.write_str(s)
    }
}

/// What went wrong, independent of where.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum ErrorKind {
    /// Lookup found no symbol with this name.
    #[error("Name \"{0}\" is not defined.")]
    UndefinedName(String),

    /// A scope already holds a symbol with this name.
    #[error("Name \"{0}\" is already defined in this scope.")]
    NameRedefinition(String),

    /// A declaration arrived with no scope open.
    #[error("No active scope.")]
    NoActiveScope,

    /// A typed slot was read before any type was bound.
    #[error("Type is not defined.")]
    UndefinedType,

    /// A typed slot was bound a second time.
    #[error("Type \"{existing}\" cannot be redefined as \"{attempted}\".")]
    RedefinedType { existing: String, attempted: String },

    /// A value or part disagrees with the type already in force.
    #[error("Type \"{found}\" is incompatible with type \"{expected}\".")]
    IncompatibleTypes { expected: String, found: String },

    /// A range bound is neither `int` nor `float`.
    #[error("Members of a range must be of a numeric type, got \"{0}\".")]
    NonNumericRangeMember(String),

    /// Instantiation named a type that is not a struct.
    #[error("\"{0}\" is not a struct type.")]
    NotAStruct(String),

    /// Second write to a `const` slot.
    #[error("Constants can be assigned to only once.")]
    ConstAssignment,

    /// A description set received the same kind of part twice.
    #[error("Multiple {kind} in description set: First: {first}; Second: {second}.")]
    DuplicateDescription {
        kind: DescriptionKind,
        first: String,
        second: String,
    },

    /// The allow/deny filters refused a written value.
    #[error("Value {value} is rejected by the filters of \"{target}\".")]
    ValueRejectedByFilter { target: String, value: String },

    /// A slot was read with no value and no default.
    #[error("Expression has neither a value nor a default value.")]
    NoValue,

    /// Literal text does not parse as the expected type.
    #[error("Invalid {ty} literal \"{text}\".")]
    InvalidLiteral { ty: String, text: String },

    /// An access resolved to something other than a variable or constant.
    #[error("\"{0}\" does not denote a value.")]
    NotAValue(String),

    /// An assignment target is neither a variable nor a constant.
    #[error("\"{0}\" cannot be assigned to.")]
    NotAssignable(String),

    /// A named node was read before its name was bound.
    #[error("Node has no name.")]
    Unnamed,

    /// A named node was renamed.
    #[error("Name \"{existing}\" cannot be changed to \"{attempted}\".")]
    Renamed { existing: String, attempted: String },

    /// Grammar error reported by the parser.
    #[error("{0}")]
    Syntax(String),
}

impl ErrorKind {
    /// Build an [`ErrorKind::IncompatibleTypes`] from anything printable as a type name.
    pub fn incompatible(expected: impl fmt::Display, found: impl fmt::Display) -> Self {
        Self::IncompatibleTypes {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Build an [`ErrorKind::Syntax`] value.
    pub fn syntax(msg: impl Into<String>) -> Self {
        Self::Syntax(msg.into())
    }

    /// Attach the position of the offending node.
    pub fn at(self, pos: &SourcePosition) -> CompileError {
        CompileError {
            pos: pos.clone(),
            kind: self,
        }
    }
}

/// A fatal construction error, located at the node that caused it.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
#[error("Error: {pos} : {kind}")]
pub struct CompileError {
    pub pos: SourcePosition,
    pub kind: ErrorKind,
}

impl CompileError {
    /// Same error, reported at another node.
    pub fn relocate(self, pos: &SourcePosition) -> Self {
        self.kind.at(pos)
    }
}

pub(crate) trait ResultExt<T> {
    fn at(self, pos: &SourcePosition) -> CompileResult<T>;
}

impl<T> ResultExt<T> for Result<T, ErrorKind> {
    fn at(self, pos: &SourcePosition) -> CompileResult<T> {
        self.map_err(|kind| kind.at(pos))
    }
}

/// Top-level error taxonomy used by the pipeline and the CLI.
#[derive(thiserror::Error, Debug)]
pub enum DevconfError {
    /// The source document was rejected.
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// Reading the source or writing the table failed.
    #[error("Error: cannot access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid generator configuration.
    #[error("Error: invalid configuration: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DevconfError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
