use crate::ast::capability::Named;
use crate::ast::structure::{ConstantId, InstanceId, MemberId, StructId, VariableId};
use crate::foundation::arena::{Arena, Id};
use crate::foundation::error::ErrorKind;

/// What a declared name refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbol {
    Variable(VariableId),
    Constant(ConstantId),
    Struct(StructId),
    Member(MemberId),
    Instance(InstanceId),
}

#[derive(Clone, Debug)]
pub struct Entry {
    pub name: String,
    pub symbol: Symbol,
}

pub type ScopeId = Id<Scope>;

/// One lexical block: a namespace body, a struct body or a description block.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    named: Named,
    parent: Option<ScopeId>,
    members: Vec<Entry>,
    children: Vec<ScopeId>,
}

impl Scope {
    /// `None` until the scope is sealed with a name.
    pub fn name(&self) -> Option<&str> {
        self.named.get().ok()
    }

    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    /// Declarations in source order.
    pub fn members(&self) -> &[Entry] {
        &self.members
    }

    /// Sealed child scopes, in the order they were sealed.
    pub fn children(&self) -> &[ScopeId] {
        &self.children
    }

    pub fn member(&self, name: &str) -> Option<Symbol> {
        self.members
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.symbol)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.member(name).is_some()
    }
}

/// Result of one qualified lookup step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// The member `name` itself, if it is a declared symbol.
    pub symbol: Option<Symbol>,
    /// The scope `name` opens for the next path segment.
    pub scope: Option<ScopeId>,
}

/// Hierarchical scopes with declaration-order member lists.
#[derive(Debug, Default)]
pub struct SymbolTable {
    scopes: Arena<Scope>,
    root: Option<ScopeId>,
    current: Option<ScopeId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an anonymous scope under the current one. The first push creates the root.
    pub fn push_scope(&mut self) -> ScopeId {
        let id = self.scopes.alloc(Scope {
            parent: self.current,
            ..Scope::default()
        });
        if self.root.is_none() {
            self.root = Some(id);
        }
        self.current = Some(id);
        tracing::trace!(scope = id.index(), "push scope");
        id
    }

    /// Seal the current scope, optionally naming it, and return to its parent.
    pub fn pop_scope(&mut self, name: Option<&str>) -> Result<ScopeId, ErrorKind> {
        let id = self.current.ok_or(ErrorKind::NoActiveScope)?;
        if let Some(name) = name {
            self.scopes[id].named.bind(name)?;
        }
        let parent = self.scopes[id].parent;
        if let Some(parent) = parent {
            self.scopes[parent].children.push(id);
        }
        self.current = parent;
        tracing::trace!(scope = id.index(), name = ?name, "pop scope");
        Ok(id)
    }

    pub fn current(&self) -> Option<ScopeId> {
        self.current
    }

    /// Declare `name` in the current scope. Shadowing an ancestor's name is allowed.
    pub fn declare(&mut self, name: &str, symbol: Symbol) -> Result<(), ErrorKind> {
        let id = self.current.ok_or(ErrorKind::NoActiveScope)?;
        let scope = &mut self.scopes[id];
        if scope.contains(name) {
            return Err(ErrorKind::NameRedefinition(name.to_owned()));
        }
        scope.members.push(Entry {
            name: name.to_owned(),
            symbol,
        });
        tracing::debug!(name, ?symbol, scope = id.index(), "declare");
        Ok(())
    }

    /// Unqualified lookup: the current scope, then each ancestor.
    pub fn lookup(&self, name: &str) -> Result<Symbol, ErrorKind> {
        let mut at = self.current;
        while let Some(id) = at {
            let scope = &self.scopes[id];
            if let Some(symbol) = scope.member(name) {
                return Ok(symbol);
            }
            at = scope.parent;
        }
        Err(ErrorKind::UndefinedName(name.to_owned()))
    }

    /// One step of a qualified name.
    ///
    /// With an anchor, the symbol must be a direct member of the anchor scope; without one the
    /// unqualified lookup applies. The scope is the first child of the anchor (or of one of its
    /// ancestors) that is named `name` or declares a member `name`.
    pub fn resolve(&self, name: &str, anchor: Option<ScopeId>) -> Result<Resolution, ErrorKind> {
        let symbol = match anchor {
            Some(id) => self.scopes[id].member(name),
            None => self.lookup(name).ok(),
        };

        let mut at = anchor.or(self.current);
        let mut scope = None;
        while let Some(ns) = at {
            scope = self
                .scopes
                .iter()
                .find(|(_, s)| {
                    s.parent == Some(ns) && (s.name() == Some(name) || s.contains(name))
                })
                .map(|(id, _)| id);
            if scope.is_some() {
                break;
            }
            at = self.scopes[ns].parent;
        }

        if symbol.is_none() && scope.is_none() {
            return Err(ErrorKind::UndefinedName(name.to_owned()));
        }
        Ok(Resolution { symbol, scope })
    }

    /// Chain [`resolve`](Self::resolve) across `a::b::c`; `rooted` anchors at the root scope.
    pub fn resolve_path(&self, segments: &[&str], rooted: bool) -> Result<Symbol, ErrorKind> {
        let Some((last, init)) = segments.split_last() else {
            return Err(ErrorKind::UndefinedName(String::new()));
        };
        let mut anchor = if rooted {
            Some(self.root.ok_or(ErrorKind::NoActiveScope)?)
        } else {
            None
        };
        for segment in init {
            let step = self.resolve(segment, anchor)?;
            anchor = Some(
                step.scope
                    .ok_or_else(|| ErrorKind::UndefinedName((*segment).to_owned()))?,
            );
        }
        self.resolve(last, anchor)?
            .symbol
            .ok_or_else(|| ErrorKind::UndefinedName(segments.join("::")))
    }

    pub fn root(&self) -> Option<ScopeId> {
        self.root
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/symbols/table.rs"]
mod tests;
