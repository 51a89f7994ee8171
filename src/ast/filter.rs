use std::fmt;

use crate::ast::capability::{Node, Typed};
use crate::ast::range::Range;
use crate::foundation::error::{CompileResult, ResultExt};
use crate::foundation::position::SourcePosition;
use crate::model::types::Type;
use crate::model::value::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    Allow,
    Deny,
}

impl Polarity {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Deny => "deny",
        }
    }
}

/// One member of a filter's list.
#[derive(Clone, Debug)]
pub enum Predicate {
    Value(Value),
    Range(Range),
}

impl Predicate {
    fn ty(&self) -> CompileResult<Type> {
        match self {
            Self::Value(v) => Ok(v.ty()),
            Self::Range(r) => r.ty().cloned(),
        }
    }

    fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Value(v) => v == value,
            Self::Range(r) => r.contains(value),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => f.write_str(&v.raw()),
            Self::Range(r) => r.fmt(f),
        }
    }
}

/// `allow { ... }` or `deny { ... }`: a value matches if any predicate matches it.
#[derive(Clone, Debug)]
pub struct Filter {
    node: Node,
    polarity: Polarity,
    typed: Typed,
    predicates: Vec<Predicate>,
}

impl Filter {
    pub fn new(polarity: Polarity, pos: SourcePosition) -> Self {
        Self {
            node: Node::new(pos),
            polarity,
            typed: Typed::default(),
            predicates: Vec::new(),
        }
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn pos(&self) -> &SourcePosition {
        self.node.pos()
    }

    pub fn ty(&self) -> Option<&Type> {
        self.typed.get_opt()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn add(&mut self, predicate: Predicate) -> CompileResult<()> {
        let ty = predicate.ty()?;
        self.typed.ensure(&ty).at(self.node.pos())?;
        self.predicates.push(predicate);
        Ok(())
    }

    pub fn contains(&self, value: &Value) -> bool {
        match self.typed.get_opt() {
            Some(ty) if *ty != value.ty() => false,
            _ => self.predicates.iter().any(|p| p.matches(value)),
        }
    }

    /// Internal consistency: every predicate carries the filter's type.
    pub fn check(&self) -> CompileResult<()> {
        let mut typed = Typed::default();
        for p in &self.predicates {
            typed.ensure(&p.ty()?).at(self.node.pos())?;
        }
        Ok(())
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.polarity.keyword())?;
        for (i, p) in self.predicates.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{p}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ast/filter.rs"]
mod tests;
