use crate::ast::capability::{Node, Typed};
use crate::ast::qualifier::{Qualified, Qualifier};
use crate::foundation::error::{CompileResult, ErrorKind, ResultExt};
use crate::foundation::position::SourcePosition;
use crate::model::types::Type;
use crate::model::value::Value;

/// Value slot shared by variables and constants.
#[derive(Clone, Debug)]
pub struct Expression {
    node: Node,
    typed: Typed,
    qualified: Qualified,
    value: Option<Value>,
    default: Option<Value>,
}

impl Expression {
    pub fn assignable(pos: SourcePosition) -> Self {
        Self {
            node: Node::new(pos),
            typed: Typed::default(),
            qualified: Qualified::default(),
            value: None,
            default: None,
        }
    }

    /// A slot that carries an implicit `const` qualifier from the start.
    pub fn constant(pos: SourcePosition) -> Self {
        let mut qualified = Qualified::default();
        qualified.add(Qualifier::constant(pos.clone()));
        Self {
            qualified,
            ..Self::assignable(pos)
        }
    }

    /// Declare the slot's type; a slot is typed at most once.
    pub fn with_type(mut self, ty: Type) -> CompileResult<Self> {
        self.typed.bind(ty).at(self.node.pos())?;
        Ok(self)
    }

    pub fn with_qualifiers(mut self, qualified: Qualified) -> Self {
        for q in qualified.iter() {
            self.qualified.add(q.clone());
        }
        self
    }

    pub fn pos(&self) -> &SourcePosition {
        self.node.pos()
    }

    pub fn ty(&self) -> CompileResult<&Type> {
        self.typed.get().at(self.node.pos())
    }

    pub fn is_const(&self) -> bool {
        self.qualified.is_const()
    }

    pub fn set_default(&mut self, value: Value) -> CompileResult<()> {
        self.typed.ensure(&value.ty()).at(self.node.pos())?;
        self.default = Some(value);
        Ok(())
    }

    /// Current value, falling back to the default.
    pub fn read(&self) -> CompileResult<&Value> {
        self.value
            .as_ref()
            .or(self.default.as_ref())
            .ok_or_else(|| ErrorKind::NoValue.at(self.node.pos()))
    }

    /// Whether an explicit value was ever stored.
    pub fn is_written(&self) -> bool {
        self.value.is_some()
    }

    pub fn write(&mut self, value: Value) -> CompileResult<()> {
        self.typed.ensure(&value.ty()).at(self.node.pos())?;
        self.qualified.write()?;
        self.value = Some(value);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ast/expression.rs"]
mod tests;
