use std::fmt;
use std::rc::Rc;

use crate::ast::constant::{Constant, ConstantList};
use crate::ast::description::VariableDescriptionSet;
use crate::ast::qualifier::Qualified;
use crate::ast::structure::{
    ConstantId, InstanceId, InstanceMember, Member, MemberId, StructDef, StructId, VariableId,
};
use crate::ast::tree::{Assignment, Ast, Configuration, Declaration, NamespaceDecl, Place};
use crate::ast::variable::Variable;
use crate::config::GeneratorOptions;
use crate::foundation::error::{CompileResult, ErrorKind, ResultExt};
use crate::foundation::position::SourcePosition;
use crate::generate::macros::{MacroGenerator, MacroTable};
use crate::model::types::{BuiltinType, Type};
use crate::model::value::Value;
use crate::symbols::table::{Symbol, SymbolTable};

/// Literal text as written, tagged with the kind its token implies.
#[derive(Clone, Debug, PartialEq)]
pub struct Literal {
    pub kind: BuiltinType,
    pub text: String,
    pub pos: SourcePosition,
}

impl Literal {
    pub fn new(kind: BuiltinType, text: impl Into<String>, pos: SourcePosition) -> Self {
        Self {
            kind,
            text: text.into(),
            pos,
        }
    }

    /// Typed value of this literal. Integer text becomes a float where a float is expected.
    pub fn value(&self, expected: Option<&Type>) -> CompileResult<Value> {
        let kind = match expected {
            Some(Type::Builtin(BuiltinType::Float)) if self.kind == BuiltinType::Int => {
                BuiltinType::Float
            }
            _ => self.kind,
        };
        Value::parse(kind, &self.text).at(&self.pos)
    }
}

/// `::a::b.c.d`: an optional root anchor, a namespace path, then struct member steps.
#[derive(Clone, Debug, PartialEq)]
pub struct Access {
    pub rooted: bool,
    pub path: Vec<String>,
    pub members: Vec<String>,
    pub pos: SourcePosition,
}

impl Access {
    #[cfg(test)]
    pub fn name(name: impl Into<String>, pos: SourcePosition) -> Self {
        Self {
            rooted: false,
            path: vec![name.into()],
            members: Vec::new(),
            pos,
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rooted {
            f.write_str("::")?;
        }
        f.write_str(&self.path.join("::"))?;
        for m in &self.members {
            write!(f, ".{m}")?;
        }
        Ok(())
    }
}

/// Right-hand side of an assignment, default, map entry or constant.
#[derive(Clone, Debug, PartialEq)]
pub enum Rvalue {
    Literal(Literal),
    Access(Access),
}

/// Everything a variable or struct member declaration carries.
#[derive(Clone, Debug)]
pub struct VariableDecl {
    pub name: String,
    pub ty: Type,
    pub qualified: Qualified,
    pub description: Option<VariableDescriptionSet>,
    pub pos: SourcePosition,
}

struct OpenNamespace {
    name: String,
    pos: SourcePosition,
    items: Vec<Declaration>,
}

/// The result of a successful construction pass.
#[derive(Debug)]
pub struct Compiled {
    pub ast: Ast,
    pub symbols: SymbolTable,
    pub configuration: Configuration,
}

impl Compiled {
    pub fn generate(&self, options: &GeneratorOptions) -> CompileResult<MacroTable> {
        MacroGenerator::new(&self.ast, &self.symbols, options).generate()
    }
}

/// Construction surface driven by the parser.
///
/// A session owns the arenas, the symbol table and the declaration lists of one compilation.
/// Every call validates as it builds, so the first error aborts the whole compilation.
pub struct Session {
    ast: Ast,
    symbols: SymbolTable,
    pos: SourcePosition,
    items: Vec<Declaration>,
    namespaces: Vec<OpenNamespace>,
    open_struct: Option<StructId>,
}

impl Session {
    /// Start a compilation with the root scope open.
    pub fn new(pos: SourcePosition) -> Self {
        let mut symbols = SymbolTable::new();
        symbols.push_scope();
        Self {
            ast: Ast::new(),
            symbols,
            pos,
            items: Vec::new(),
            namespaces: Vec::new(),
            open_struct: None,
        }
    }

    fn items_mut(&mut self) -> &mut Vec<Declaration> {
        match self.namespaces.last_mut() {
            Some(ns) => &mut ns.items,
            None => &mut self.items,
        }
    }

    pub fn push_scope(&mut self) {
        self.symbols.push_scope();
    }

    pub fn pop_scope(&mut self, name: Option<&str>, pos: &SourcePosition) -> CompileResult<()> {
        self.symbols.pop_scope(name).at(pos)?;
        Ok(())
    }

    fn declare(&mut self, name: &str, symbol: Symbol, pos: &SourcePosition) -> CompileResult<()> {
        self.symbols.declare(name, symbol).at(pos)
    }

    pub fn begin_namespace(&mut self, name: impl Into<String>, pos: SourcePosition) {
        self.symbols.push_scope();
        self.namespaces.push(OpenNamespace {
            name: name.into(),
            pos,
            items: Vec::new(),
        });
    }

    pub fn end_namespace(&mut self, pos: &SourcePosition) -> CompileResult<()> {
        let ns = self
            .namespaces
            .pop()
            .ok_or_else(|| ErrorKind::NoActiveScope.at(pos))?;
        self.symbols.pop_scope(Some(&ns.name)).at(pos)?;
        tracing::debug!(name = %ns.name, items = ns.items.len(), "namespace sealed");
        let decl = NamespaceDecl::new(ns.name, ns.items, ns.pos);
        self.items_mut().push(Declaration::Namespace(decl));
        Ok(())
    }

    /// Open a struct body. The struct becomes visible by name once [`end_struct`] seals it.
    ///
    /// [`end_struct`]: Self::end_struct
    pub fn begin_struct(&mut self, name: &str, pos: SourcePosition) -> CompileResult<StructId> {
        if self.open_struct.is_some() {
            return Err(ErrorKind::syntax("struct declarations cannot be nested").at(&pos));
        }
        let id = self.ast.structs.alloc(StructDef::new(name, pos));
        self.symbols.push_scope();
        self.open_struct = Some(id);
        Ok(id)
    }

    fn struct_body(&self, pos: &SourcePosition) -> CompileResult<StructId> {
        self.open_struct
            .ok_or_else(|| ErrorKind::syntax("member declared outside a struct body").at(pos))
    }

    /// Add a builtin-typed member to the open struct.
    pub fn add_member(&mut self, decl: VariableDecl) -> CompileResult<MemberId> {
        let def = self.struct_body(&decl.pos)?;
        if let Some(desc) = &decl.description {
            desc.check_against(&decl.ty)?;
        }
        let member = Member::new(
            decl.name.clone(),
            decl.ty,
            decl.qualified,
            decl.description.map(Rc::new),
            decl.pos.clone(),
        )?;
        let id = self.ast.members.alloc(member);
        self.declare(&decl.name, Symbol::Member(id), &decl.pos)?;
        self.ast.structs[def].push_member(id);
        Ok(id)
    }

    /// Add a member typed by a previously declared struct.
    pub fn add_struct_member(
        &mut self,
        type_name: &str,
        name: &str,
        pos: SourcePosition,
    ) -> CompileResult<MemberId> {
        let def = self.struct_body(&pos)?;
        let ty = self.struct_type(type_name, &pos)?;
        let member = Member::new(name, ty, Qualified::default(), None, pos.clone())?;
        let id = self.ast.members.alloc(member);
        self.declare(name, Symbol::Member(id), &pos)?;
        self.ast.structs[def].push_member(id);
        Ok(id)
    }

    pub fn end_struct(&mut self, pos: &SourcePosition) -> CompileResult<StructId> {
        let id = self.struct_body(pos)?;
        let name = self.ast.structs[id].name().to_owned();
        self.symbols.pop_scope(Some(&name)).at(pos)?;
        self.open_struct = None;
        let decl_pos = self.ast.structs[id].pos().clone();
        self.declare(&name, Symbol::Struct(id), &decl_pos)?;
        self.items_mut().push(Declaration::Struct(id));
        Ok(id)
    }

    /// The struct type named `name`, as visible from the current scope.
    pub fn struct_type(&self, name: &str, pos: &SourcePosition) -> CompileResult<Type> {
        match self.symbols.lookup(name).at(pos)? {
            Symbol::Struct(id) => Ok(self.ast.structs[id].ty(id)),
            _ => Err(ErrorKind::NotAStruct(name.to_owned()).at(pos)),
        }
    }

    pub fn declare_variable(&mut self, decl: VariableDecl) -> CompileResult<VariableId> {
        let var = Variable::new(
            decl.name.clone(),
            decl.ty,
            decl.qualified,
            decl.description.map(Rc::new),
            decl.pos.clone(),
        )?;
        let id = self.ast.variables.alloc(var);
        self.declare(&decl.name, Symbol::Variable(id), &decl.pos)?;
        self.items_mut().push(Declaration::Variable(id));
        Ok(id)
    }

    /// `struct Type name;` outside a struct body.
    pub fn instantiate_struct(
        &mut self,
        type_name: &str,
        name: &str,
        pos: SourcePosition,
    ) -> CompileResult<InstanceId> {
        let def = self
            .struct_type(type_name, &pos)?
            .as_struct()
            .ok_or_else(|| ErrorKind::NotAStruct(type_name.to_owned()).at(&pos))?;
        let id = self.ast.instantiate(def, name, &pos)?;
        self.declare(name, Symbol::Instance(id), &pos)?;
        self.items_mut().push(Declaration::Instance(id));
        Ok(id)
    }

    /// Declare one element of `list` in the current scope.
    pub fn declare_constant(
        &mut self,
        list: &mut ConstantList,
        name: &str,
        value: Value,
        pos: SourcePosition,
    ) -> CompileResult<ConstantId> {
        let constant = Constant::new(name, value, pos.clone())?;
        let id = self.ast.constants.alloc(constant);
        list.add(id, &self.ast.constants[id])?;
        self.declare(name, Symbol::Constant(id), &pos)?;
        Ok(id)
    }

    /// Record a namespace-level constant list.
    pub fn push_constants(&mut self, list: ConstantList) -> CompileResult<()> {
        list.check(&self.ast.constants)?;
        self.items_mut().push(Declaration::Constants(list));
        Ok(())
    }

    /// Resolve the namespace path, then follow struct member steps.
    pub fn resolve_symbol(&self, access: &Access) -> CompileResult<Symbol> {
        let segments: Vec<&str> = access.path.iter().map(String::as_str).collect();
        let mut symbol = self
            .symbols
            .resolve_path(&segments, access.rooted)
            .at(&access.pos)?;
        for member in &access.members {
            let Symbol::Instance(inst) = symbol else {
                return Err(ErrorKind::NotAStruct(access.to_string()).at(&access.pos));
            };
            symbol = match self.ast.instance_member(inst, member, &access.pos)? {
                InstanceMember::Variable(v) => Symbol::Variable(v),
                InstanceMember::Struct(i) => Symbol::Instance(i),
            };
        }
        Ok(symbol)
    }

    /// Current value of the variable or constant `access` names.
    pub fn resolve_value(&self, access: &Access) -> CompileResult<Value> {
        let value = match self.resolve_symbol(access)? {
            Symbol::Variable(v) => self.ast.variables[v].read(),
            Symbol::Constant(c) => self.ast.constants[c].value(),
            _ => return Err(ErrorKind::NotAValue(access.to_string()).at(&access.pos)),
        };
        value.cloned().map_err(|e| e.relocate(&access.pos))
    }

    pub fn resolve_place(&self, access: &Access) -> CompileResult<Place> {
        match self.resolve_symbol(access)? {
            Symbol::Variable(v) => Ok(Place::Variable(v)),
            Symbol::Constant(c) => Ok(Place::Constant(c)),
            _ => Err(ErrorKind::NotAssignable(access.to_string()).at(&access.pos)),
        }
    }

    pub fn place_type(&self, place: Place) -> CompileResult<&Type> {
        match place {
            Place::Variable(v) => self.ast.variables[v].ty(),
            Place::Constant(c) => self.ast.constants[c].ty(),
        }
    }

    /// Evaluate an rvalue; `expected` steers how a bare literal is typed.
    pub fn evaluate(&self, rvalue: &Rvalue, expected: Option<&Type>) -> CompileResult<Value> {
        match rvalue {
            Rvalue::Literal(lit) => lit.value(expected),
            Rvalue::Access(access) => self.resolve_value(access),
        }
    }

    /// Write `value` into `target` and record the assignment.
    ///
    /// Failures are reported at the assignment, except a repeated write to a const slot, which
    /// points at its `const` qualifier.
    pub fn assign(
        &mut self,
        target: Place,
        value: Value,
        pos: SourcePosition,
    ) -> CompileResult<()> {
        let written = match target {
            Place::Variable(v) => self.ast.variables[v].write(value.clone()),
            Place::Constant(c) => self.ast.constants[c].write(value.clone()),
        };
        written.map_err(|e| match e.kind {
            ErrorKind::ConstAssignment => e,
            _ => e.relocate(&pos),
        })?;
        self.items_mut()
            .push(Declaration::Assignment(Assignment::new(target, value, pos)));
        Ok(())
    }

    /// Seal the root scope and hand over the finished tree.
    pub fn finish(mut self, pos: &SourcePosition) -> CompileResult<Compiled> {
        if let Some(ns) = self.namespaces.last() {
            let msg = format!("namespace '{}' is not closed", ns.name);
            return Err(ErrorKind::syntax(msg).at(pos));
        }
        self.symbols.pop_scope(None).at(pos)?;
        Ok(Compiled {
            ast: self.ast,
            symbols: self.symbols,
            configuration: Configuration::new(self.items, self.pos),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/session.rs"]
mod tests;
