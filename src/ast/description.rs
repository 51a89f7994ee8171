use std::fmt;

use crate::ast::capability::{Node, Typed};
use crate::ast::constant::ConstantList;
use crate::ast::filter::{Filter, Polarity};
use crate::ast::map::Map;
use crate::foundation::error::{CompileResult, DescriptionKind, ErrorKind, ResultExt};
use crate::foundation::position::SourcePosition;
use crate::model::types::Type;
use crate::model::value::Value;

/// `default = <value>;` inside a description block.
#[derive(Clone, Debug)]
pub struct DefaultValue {
    node: Node,
    value: Value,
}

impl DefaultValue {
    pub fn new(value: Value, pos: SourcePosition) -> Self {
        Self {
            node: Node::new(pos),
            value,
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn pos(&self) -> &SourcePosition {
        self.node.pos()
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "default = {}", self.value.raw())
    }
}

/// Constraints and presentation attached to a variable or struct member.
///
/// Holds at most one part of each [`DescriptionKind`]. Once a declaration is complete the set is
/// frozen and shared by every variable instantiated from it.
#[derive(Clone, Debug)]
pub struct VariableDescriptionSet {
    node: Node,
    allow: Option<Filter>,
    deny: Option<Filter>,
    map: Option<Map>,
    constants: Option<ConstantList>,
    default: Option<DefaultValue>,
}

fn attach<T: fmt::Display>(
    slot: &mut Option<T>,
    part: T,
    kind: DescriptionKind,
    pos: &SourcePosition,
) -> CompileResult<()> {
    if let Some(first) = slot {
        return Err(ErrorKind::DuplicateDescription {
            kind,
            first: first.to_string(),
            second: part.to_string(),
        }
        .at(pos));
    }
    *slot = Some(part);
    Ok(())
}

impl VariableDescriptionSet {
    pub fn new(pos: SourcePosition) -> Self {
        Self {
            node: Node::new(pos),
            allow: None,
            deny: None,
            map: None,
            constants: None,
            default: None,
        }
    }

    pub fn pos(&self) -> &SourcePosition {
        self.node.pos()
    }

    pub fn set_filter(&mut self, filter: Filter) -> CompileResult<()> {
        match filter.polarity() {
            Polarity::Allow => self.set_allow(filter),
            Polarity::Deny => self.set_deny(filter),
        }
    }

    pub fn set_allow(&mut self, filter: Filter) -> CompileResult<()> {
        let pos = filter.pos().clone();
        attach(&mut self.allow, filter, DescriptionKind::Allow, &pos)
    }

    pub fn set_deny(&mut self, filter: Filter) -> CompileResult<()> {
        let pos = filter.pos().clone();
        attach(&mut self.deny, filter, DescriptionKind::Deny, &pos)
    }

    pub fn set_map(&mut self, map: Map) -> CompileResult<()> {
        let pos = map.pos().clone();
        attach(&mut self.map, map, DescriptionKind::Map, &pos)
    }

    pub fn set_constants(&mut self, list: ConstantList) -> CompileResult<()> {
        let pos = list.pos().clone();
        attach(&mut self.constants, list, DescriptionKind::Constants, &pos)
    }

    pub fn set_default(&mut self, default: DefaultValue) -> CompileResult<()> {
        let pos = default.pos().clone();
        attach(&mut self.default, default, DescriptionKind::Default, &pos)
    }

    pub fn allow(&self) -> Option<&Filter> {
        self.allow.as_ref()
    }

    pub fn deny(&self) -> Option<&Filter> {
        self.deny.as_ref()
    }

    pub fn map(&self) -> Option<&Map> {
        self.map.as_ref()
    }

    pub fn constants(&self) -> Option<&ConstantList> {
        self.constants.as_ref()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref().map(DefaultValue::value)
    }

    /// Deny wins over allow; an absent filter does not constrain.
    pub fn check_value(&self, value: &Value) -> bool {
        let denied = self.deny.as_ref().is_some_and(|f| f.contains(value));
        let allowed = self.allow.as_ref().is_none_or(|f| f.contains(value));
        !denied && allowed
    }

    /// Mapped display value for `key`, or `fallback` when unmapped.
    pub fn resolve_display<'a>(&'a self, key: &Value, fallback: &'a Value) -> &'a Value {
        self.map
            .as_ref()
            .and_then(|m| m.get(key))
            .unwrap_or(fallback)
    }

    /// Cross-part consistency. Returns the type the parts agree on, if any part is typed.
    pub fn check(&self) -> CompileResult<Option<Type>> {
        let mut typed = Typed::default();
        let parts = [
            self.allow.as_ref().and_then(|f| f.ty().map(|t| (t.clone(), f.pos()))),
            self.deny.as_ref().and_then(|f| f.ty().map(|t| (t.clone(), f.pos()))),
            self.map
                .as_ref()
                .and_then(|m| m.key_type().map(|t| (t.clone(), m.pos()))),
            self.constants
                .as_ref()
                .and_then(|c| c.ty().map(|t| (t.clone(), c.pos()))),
            self.default.as_ref().map(|d| (d.value.ty(), d.pos())),
        ];
        for (ty, pos) in parts.into_iter().flatten() {
            typed.ensure(&ty).at(pos)?;
        }

        if let Some(default) = &self.default
            && !self.check_value(&default.value)
        {
            return Err(ErrorKind::ValueRejectedByFilter {
                target: "default".to_owned(),
                value: default.value.raw(),
            }
            .at(default.pos()));
        }

        Ok(typed.get_opt().cloned())
    }

    /// [`check`](Self::check), then require the common type to be `ty`.
    pub fn check_against(&self, ty: &Type) -> CompileResult<()> {
        match self.check()? {
            Some(found) if found != *ty => {
                Err(ErrorKind::incompatible(ty, &found).at(self.pos()))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ast/description.rs"]
mod tests;
