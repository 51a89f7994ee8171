use std::cmp::Ordering;
use std::fmt;

use crate::ast::capability::{Node, Typed};
use crate::foundation::error::{CompileResult, ErrorKind, ResultExt};
use crate::foundation::position::SourcePosition;
use crate::model::types::Type;
use crate::model::value::Value;

/// Inclusive numeric interval; either bound may be left open.
#[derive(Clone, Debug)]
pub struct Range {
    node: Node,
    typed: Typed,
    lower: Option<Value>,
    upper: Option<Value>,
}

impl Range {
    pub fn new(pos: SourcePosition) -> Self {
        Self {
            node: Node::new(pos),
            typed: Typed::default(),
            lower: None,
            upper: None,
        }
    }

    pub fn pos(&self) -> &SourcePosition {
        self.node.pos()
    }

    pub fn set_lower(&mut self, value: Value) -> CompileResult<()> {
        self.accept(&value)?;
        self.lower = Some(value);
        Ok(())
    }

    pub fn set_upper(&mut self, value: Value) -> CompileResult<()> {
        self.accept(&value)?;
        self.upper = Some(value);
        Ok(())
    }

    fn accept(&mut self, value: &Value) -> CompileResult<()> {
        if !value.kind().is_numeric() {
            return Err(ErrorKind::NonNumericRangeMember(value.kind().name().to_owned())
                .at(self.node.pos()));
        }
        self.typed.ensure(&value.ty()).at(self.node.pos())
    }

    /// Type of the bounds; an unbounded range has none.
    pub fn ty(&self) -> CompileResult<&Type> {
        self.typed.get().at(self.node.pos())
    }

    pub fn contains(&self, value: &Value) -> bool {
        let within = |bound: &Option<Value>, reject: Ordering| match bound {
            None => true,
            Some(b) => matches!(value.compare(b), Ok(o) if o != reject),
        };
        within(&self.lower, Ordering::Less) && within(&self.upper, Ordering::Greater)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = |b: &Option<Value>| b.as_ref().map(Value::raw).unwrap_or_default();
        write!(f, "[{}..{}]", raw(&self.lower), raw(&self.upper))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ast/range.rs"]
mod tests;
