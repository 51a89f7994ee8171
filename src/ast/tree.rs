use crate::ast::capability::{Named, Node};
use crate::ast::constant::{Constant, ConstantList};
use crate::ast::structure::{
    ConstantId, InstanceId, InstanceMember, Member, StructDef, StructId, StructInstance,
    VariableId,
};
use crate::ast::variable::Variable;
use crate::foundation::arena::Arena;
use crate::foundation::error::{CompileResult, ResultExt};
use crate::foundation::position::SourcePosition;
use crate::model::value::Value;

/// Arena storage for every entity of one compilation.
#[derive(Debug, Default)]
pub struct Ast {
    pub variables: Arena<Variable>,
    pub constants: Arena<Constant>,
    pub structs: Arena<StructDef>,
    pub members: Arena<Member>,
    pub instances: Arena<StructInstance>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fresh instance tree of `def` named `name`.
    ///
    /// Every leaf member becomes a new variable and every struct-typed member a nested instance,
    /// so no storage is shared with any other instance of `def`.
    pub fn instantiate(
        &mut self,
        def: StructId,
        name: &str,
        pos: &SourcePosition,
    ) -> CompileResult<InstanceId> {
        let ty = self.structs[def].ty(def);
        let mut instance = StructInstance::new(name, ty, pos.clone())?;
        let members = self.structs[def].members().to_vec();
        for id in members {
            let member = &self.members[id];
            let member_name = member.name().to_owned();
            let nested = member.ty()?.as_struct();
            let slot = match nested {
                Some(nested) => {
                    InstanceMember::Struct(self.instantiate(nested, &member_name, pos)?)
                }
                None => {
                    let var = Variable::from_member(member, pos.clone())?;
                    InstanceMember::Variable(self.variables.alloc(var))
                }
            };
            instance.push(member_name, slot);
        }
        Ok(self.instances.alloc(instance))
    }

    /// Member `name` of instance `id`.
    pub fn instance_member(
        &self,
        id: InstanceId,
        name: &str,
        pos: &SourcePosition,
    ) -> CompileResult<InstanceMember> {
        self.instances[id].member(name).at(pos)
    }
}

/// Storage slot an assignment writes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Place {
    Variable(VariableId),
    Constant(ConstantId),
}

#[derive(Clone, Debug)]
pub struct Assignment {
    node: Node,
    target: Place,
    value: Value,
}

impl Assignment {
    pub fn new(target: Place, value: Value, pos: SourcePosition) -> Self {
        Self {
            node: Node::new(pos),
            target,
            value,
        }
    }

    pub fn target(&self) -> Place {
        self.target
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn pos(&self) -> &SourcePosition {
        self.node.pos()
    }
}

/// `namespace name { ... }`
#[derive(Clone, Debug)]
pub struct NamespaceDecl {
    node: Node,
    named: Named,
    items: Vec<Declaration>,
}

impl NamespaceDecl {
    pub fn new(name: impl Into<String>, items: Vec<Declaration>, pos: SourcePosition) -> Self {
        Self {
            node: Node::new(pos),
            named: Named::with(name),
            items,
        }
    }

    pub fn name(&self) -> &str {
        self.named.get_or("")
    }

    pub fn pos(&self) -> &SourcePosition {
        self.node.pos()
    }

    pub fn items(&self) -> &[Declaration] {
        &self.items
    }
}

/// One top-level or namespace-level statement, in source order.
#[derive(Clone, Debug)]
pub enum Declaration {
    Namespace(NamespaceDecl),
    Struct(StructId),
    Instance(InstanceId),
    Variable(VariableId),
    Constants(ConstantList),
    Assignment(Assignment),
}

/// Root of the declaration tree.
#[derive(Clone, Debug)]
pub struct Configuration {
    node: Node,
    items: Vec<Declaration>,
}

impl Configuration {
    pub fn new(items: Vec<Declaration>, pos: SourcePosition) -> Self {
        Self {
            node: Node::new(pos),
            items,
        }
    }

    pub fn pos(&self) -> &SourcePosition {
        self.node.pos()
    }

    pub fn items(&self) -> &[Declaration] {
        &self.items
    }

    /// Number of declarations, nested namespaces included.
    pub fn declaration_count(&self) -> usize {
        fn count(items: &[Declaration]) -> usize {
            items
                .iter()
                .map(|d| match d {
                    Declaration::Namespace(ns) => 1 + count(ns.items()),
                    _ => 1,
                })
                .sum()
        }
        count(&self.items)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ast/tree.rs"]
mod tests;
