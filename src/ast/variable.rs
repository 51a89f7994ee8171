use std::rc::Rc;

use crate::ast::capability::Named;
use crate::ast::description::VariableDescriptionSet;
use crate::ast::expression::Expression;
use crate::ast::qualifier::Qualified;
use crate::ast::structure::Member;
use crate::foundation::error::{CompileResult, ErrorKind};
use crate::foundation::position::SourcePosition;
use crate::model::types::Type;
use crate::model::value::Value;

/// A typed, named value slot, optionally constrained by a description set.
#[derive(Clone, Debug)]
pub struct Variable {
    named: Named,
    expr: Expression,
    description: Option<Rc<VariableDescriptionSet>>,
}

impl Variable {
    pub fn new(
        name: impl Into<String>,
        ty: Type,
        qualified: Qualified,
        description: Option<Rc<VariableDescriptionSet>>,
        pos: SourcePosition,
    ) -> CompileResult<Self> {
        if let Some(desc) = &description {
            desc.check_against(&ty)?;
        }
        let mut expr = Expression::assignable(pos)
            .with_type(ty)?
            .with_qualifiers(qualified);
        if let Some(default) = description.as_deref().and_then(|d| d.default_value()) {
            expr.set_default(default.clone())?;
        }
        Ok(Self {
            named: Named::with(name),
            expr,
            description,
        })
    }

    /// Fresh storage for one instantiation of `member`.
    pub fn from_member(member: &Member, pos: SourcePosition) -> CompileResult<Self> {
        Self::new(
            member.name(),
            member.ty()?.clone(),
            member.qualified().fresh(),
            member.description().cloned(),
            pos,
        )
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

    pub fn is_const(&self) -> bool {
        self.expr.is_const()
    }

    pub fn description(&self) -> Option<&VariableDescriptionSet> {
        self.description.as_deref()
    }

    pub fn is_written(&self) -> bool {
        self.expr.is_written()
    }

    /// Stored value, or the description's default.
    pub fn read(&self) -> CompileResult<&Value> {
        self.expr.read()
    }

    /// The stored value translated through the description's map.
    pub fn display_value(&self) -> CompileResult<&Value> {
        let raw = self.expr.read()?;
        Ok(match &self.description {
            Some(desc) => desc.resolve_display(raw, raw),
            None => raw,
        })
    }

    pub fn write(&mut self, value: Value) -> CompileResult<()> {
        let ty = self.expr.ty()?;
        if *ty != value.ty() {
            return Err(ErrorKind::incompatible(ty, value.ty()).at(self.expr.pos()));
        }
        if let Some(desc) = &self.description
            && !desc.check_value(&value)
        {
            return Err(ErrorKind::ValueRejectedByFilter {
                target: self.name().to_owned(),
                value: value.raw(),
            }
            .at(self.expr.pos()));
        }
        self.expr.write(value)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ast/variable.rs"]
mod tests;
