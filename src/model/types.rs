use std::fmt;

use crate::ast::structure::StructId;

/// The four types every source document starts with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    Int,
    Bool,
    String,
    Float,
}

impl BuiltinType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Float => "float",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }
}

/// A nominal type. Two types are the same type iff their names are equal.
#[derive(Clone, Debug)]
pub enum Type {
    Builtin(BuiltinType),
    /// A struct definition used as a type.
    Struct { name: String, def: StructId },
}

impl Type {
    pub const INT: Type = Type::Builtin(BuiltinType::Int);
    pub const BOOL: Type = Type::Builtin(BuiltinType::Bool);
    pub const STRING: Type = Type::Builtin(BuiltinType::String);
    pub const FLOAT: Type = Type::Builtin(BuiltinType::Float);

    pub fn structure(name: impl Into<String>, def: StructId) -> Self {
        Self::Struct {
            name: name.into(),
            def,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Builtin(b) => b.name(),
            Self::Struct { name, .. } => name,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Builtin(b) if b.is_numeric())
    }

    pub fn as_struct(&self) -> Option<StructId> {
        match self {
            Self::Struct { def, .. } => Some(*def),
            Self::Builtin(_) => None,
        }
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for Type {}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/types.rs"]
mod tests;
