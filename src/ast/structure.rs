use std::rc::Rc;

use crate::ast::capability::{Named, Node, Typed};
use crate::ast::constant::Constant;
use crate::ast::description::VariableDescriptionSet;
use crate::ast::qualifier::Qualified;
use crate::ast::variable::Variable;
use crate::foundation::arena::Id;
use crate::foundation::error::{CompileResult, ErrorKind, ResultExt};
use crate::foundation::position::SourcePosition;
use crate::model::types::Type;

pub type StructId = Id<StructDef>;
pub type MemberId = Id<Member>;
pub type InstanceId = Id<StructInstance>;
pub type VariableId = Id<Variable>;
pub type ConstantId = Id<Constant>;

/// One declaration inside a struct body. Members are templates and hold no value.
#[derive(Clone, Debug)]
pub struct Member {
    node: Node,
    named: Named,
    typed: Typed,
    qualified: Qualified,
    description: Option<Rc<VariableDescriptionSet>>,
}

impl Member {
    pub fn new(
        name: impl Into<String>,
        ty: Type,
        qualified: Qualified,
        description: Option<Rc<VariableDescriptionSet>>,
        pos: SourcePosition,
    ) -> CompileResult<Self> {
        let mut typed = Typed::default();
        typed.bind(ty).at(&pos)?;
        Ok(Self {
            node: Node::new(pos),
            named: Named::with(name),
            typed,
            qualified,
            description,
        })
    }

    pub fn name(&self) -> &str {
        self.named.get_or("")
    }

    pub fn pos(&self) -> &SourcePosition {
        self.node.pos()
    }

    pub fn ty(&self) -> CompileResult<&Type> {
        self.typed.get().at(self.node.pos())
    }

    pub fn qualified(&self) -> &Qualified {
        &self.qualified
    }

    pub fn description(&self) -> Option<&Rc<VariableDescriptionSet>> {
        self.description.as_ref()
    }
}

/// A struct type: an ordered list of members.
#[derive(Clone, Debug)]
pub struct StructDef {
    node: Node,
    named: Named,
    members: Vec<MemberId>,
}

impl StructDef {
    pub fn new(name: impl Into<String>, pos: SourcePosition) -> Self {
        Self {
            node: Node::new(pos),
            named: Named::with(name),
            members: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.named.get_or("")
    }

    pub fn pos(&self) -> &SourcePosition {
        self.node.pos()
    }

    pub fn members(&self) -> &[MemberId] {
        &self.members
    }

    pub fn push_member(&mut self, id: MemberId) {
        self.members.push(id);
    }

    /// This definition used as a type.
    pub fn ty(&self, id: StructId) -> Type {
        Type::structure(self.name(), id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstanceMember {
    Variable(VariableId),
    Struct(InstanceId),
}

#[derive(Clone, Debug)]
struct InstanceSlot {
    name: String,
    member: InstanceMember,
}

/// Storage produced by instantiating a [`StructDef`]; never shared with another instance.
#[derive(Clone, Debug)]
pub struct StructInstance {
    node: Node,
    named: Named,
    typed: Typed,
    members: Vec<InstanceSlot>,
}

impl StructInstance {
    pub fn new(name: impl Into<String>, ty: Type, pos: SourcePosition) -> CompileResult<Self> {
        let mut typed = Typed::default();
        typed.bind(ty).at(&pos)?;
        Ok(Self {
            node: Node::new(pos),
            named: Named::with(name),
            typed,
            members: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        self.named.get_or("")
    }

    pub fn pos(&self) -> &SourcePosition {
        self.node.pos()
    }

    pub fn ty(&self) -> CompileResult<&Type> {
        self.typed.get().at(self.node.pos())
    }

    pub(crate) fn push(&mut self, name: impl Into<String>, member: InstanceMember) {
        self.members.push(InstanceSlot {
            name: name.into(),
            member,
        });
    }

    /// Members in declaration order.
    pub fn members(&self) -> impl Iterator<Item = (&str, InstanceMember)> {
        self.members.iter().map(|s| (s.name.as_str(), s.member))
    }

    pub fn member(&self, name: &str) -> Result<InstanceMember, ErrorKind> {
        self.members
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.member)
            .ok_or_else(|| ErrorKind::UndefinedName(name.to_owned()))
    }
}
