use crate::ast::capability::Node;
use crate::foundation::error::{CompileResult, ErrorKind};
use crate::foundation::position::SourcePosition;

/// Single-assignment marker. Its first write flips `assigned`, every later write fails.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstQualifier {
    node: Node,
    assigned: bool,
}

impl ConstQualifier {
    pub fn new(pos: SourcePosition) -> Self {
        Self {
            node: Node::new(pos),
            assigned: false,
        }
    }

    fn write(&mut self) -> CompileResult<()> {
        if self.assigned {
            return Err(ErrorKind::ConstAssignment.at(self.node.pos()));
        }
        self.assigned = true;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Qualifier {
    Const(ConstQualifier),
}

impl Qualifier {
    pub fn constant(pos: SourcePosition) -> Self {
        Self::Const(ConstQualifier::new(pos))
    }

    pub fn pos(&self) -> &SourcePosition {
        match self {
            Self::Const(q) => q.node.pos(),
        }
    }

    /// Veto point for a pending write.
    fn write(&mut self) -> CompileResult<()> {
        match self {
            Self::Const(q) => q.write(),
        }
    }

    /// Same qualifier with its write history cleared.
    fn fresh(&self) -> Self {
        match self {
            Self::Const(q) => Self::Const(ConstQualifier::new(q.node.pos().clone())),
        }
    }
}

/// Ordered qualifier list of an expression.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Qualified {
    qualifiers: Vec<Qualifier>,
}

impl Qualified {
    pub fn add(&mut self, qualifier: Qualifier) {
        self.qualifiers.push(qualifier);
    }

    /// Let every qualifier veto the write, in attachment order.
    pub fn write(&mut self) -> CompileResult<()> {
        for q in &mut self.qualifiers {
            q.write()?;
        }
        Ok(())
    }

    pub fn is_const(&self) -> bool {
        self.qualifiers
            .iter()
            .any(|q| matches!(q, Qualifier::Const(_)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Qualifier> {
        self.qualifiers.iter()
    }

    /// Copy for a new instantiation: same qualifiers, nothing written yet.
    pub fn fresh(&self) -> Self {
        Self {
            qualifiers: self.qualifiers.iter().map(Qualifier::fresh).collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ast/qualifier.rs"]
mod tests;
