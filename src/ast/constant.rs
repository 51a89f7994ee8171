use std::fmt;

use crate::ast::capability::{Named, Node, Typed};
use crate::ast::expression::Expression;
use crate::ast::structure::ConstantId;
use crate::foundation::arena::Arena;
use crate::foundation::error::{CompileResult, ResultExt};
use crate::foundation::position::SourcePosition;
use crate::model::types::Type;
use crate::model::value::Value;

/// A named value fixed at declaration.
#[derive(Clone, Debug)]
pub struct Constant {
    named: Named,
    expr: Expression,
}

impl Constant {
    pub fn new(name: impl Into<String>, value: Value, pos: SourcePosition) -> CompileResult<Self> {
        let mut expr = Expression::constant(pos);
        expr.write(value)?;
        Ok(Self {
            named: Named::with(name),
            expr,
        })
    }

    pub fn name(&self) -> &str {
        self.named.get_or("")
    }

    pub fn pos(&self) -> &SourcePosition {
        self.expr.pos()
    }

    pub fn ty(&self) -> CompileResult<&Type> {
        self.expr.ty()
    }

    pub fn value(&self) -> CompileResult<&Value> {
        self.expr.read()
    }

    /// Constants are written at construction; any further write fails.
    pub fn write(&mut self, value: Value) -> CompileResult<()> {
        self.expr.write(value)
    }
}

/// `const { a = 1, b = 2 };` All members share the type of the first.
#[derive(Clone, Debug)]
pub struct ConstantList {
    node: Node,
    typed: Typed,
    constants: Vec<ConstantId>,
}

impl ConstantList {
    pub fn new(pos: SourcePosition) -> Self {
        Self {
            node: Node::new(pos),
            typed: Typed::default(),
            constants: Vec::new(),
        }
    }

    pub fn pos(&self) -> &SourcePosition {
        self.node.pos()
    }

    pub fn ty(&self) -> Option<&Type> {
        self.typed.get_opt()
    }

    pub fn ids(&self) -> &[ConstantId] {
        &self.constants
    }

    pub fn add(&mut self, id: ConstantId, constant: &Constant) -> CompileResult<()> {
        self.typed.ensure(constant.ty()?).at(constant.pos())?;
        self.constants.push(id);
        Ok(())
    }

    pub fn check(&self, arena: &Arena<Constant>) -> CompileResult<()> {
        let mut typed = Typed::default();
        for id in &self.constants {
            let c = &arena[*id];
            typed.ensure(c.ty()?).at(c.pos())?;
        }
        Ok(())
    }
}

impl fmt::Display for ConstantList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "const {{{} constants}}", self.constants.len())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ast/constant.rs"]
mod tests;
