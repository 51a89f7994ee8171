use super::*;
use crate::ast::constant::Constant;
use crate::ast::variable::Variable;
use crate::foundation::arena::Arena;

/// Symbols only need distinct ids here; the entities behind them are irrelevant.
struct Ids {
    variables: Arena<Variable>,
    constants: Arena<Constant>,
}

impl Ids {
    fn new() -> Self {
        Self {
            variables: Arena::new(),
            constants: Arena::new(),
        }
    }

    fn var(&mut self, name: &str) -> Symbol {
        use crate::ast::qualifier::Qualified;
        use crate::foundation::position::SourcePosition;
        use crate::model::types::Type;

        let v = Variable::new(
            name,
            Type::INT,
            Qualified::default(),
            None,
            SourcePosition::start_of("s.dc"),
        )
        .unwrap();
        Symbol::Variable(self.variables.alloc(v))
    }

    fn constant(&mut self, name: &str) -> Symbol {
        use crate::foundation::position::SourcePosition;
        use crate::model::value::Value;

        let c = Constant::new(name, Value::Integer(1), SourcePosition::start_of("s.dc")).unwrap();
        Symbol::Constant(self.constants.alloc(c))
    }
}

#[test]
fn nested_scopes_see_ancestors() {
    let mut ids = Ids::new();
    let mut t = SymbolTable::new();
    t.push_scope();
    let x = ids.var("x");
    t.declare("x", x).unwrap();
    t.push_scope();
    let y = ids.var("y");
    t.declare("y", y).unwrap();

    assert_eq!(t.lookup("x"), Ok(x));
    assert_eq!(t.lookup("y"), Ok(y));
    assert_eq!(t.lookup("z"), Err(ErrorKind::UndefinedName("z".into())));

    t.pop_scope(None).unwrap();
    assert_eq!(t.lookup("y"), Err(ErrorKind::UndefinedName("y".into())));
}

#[test]
fn redefinition_is_per_scope() {
    let mut ids = Ids::new();
    let mut t = SymbolTable::new();
    t.push_scope();
    let a = ids.var("a");
    t.declare("a", a).unwrap();
    let again = ids.var("a");
    assert_eq!(
        t.declare("a", again),
        Err(ErrorKind::NameRedefinition("a".into()))
    );

    t.push_scope();
    t.declare("a", again).unwrap();
    assert_eq!(t.lookup("a"), Ok(again));
}

#[test]
fn no_active_scope() {
    let mut ids = Ids::new();
    let mut t = SymbolTable::new();
    let a = ids.var("a");
    assert_eq!(t.declare("a", a), Err(ErrorKind::NoActiveScope));
    assert_eq!(t.pop_scope(None), Err(ErrorKind::NoActiveScope));

    let root = t.push_scope();
    assert_eq!(t.pop_scope(None), Ok(root));
    assert_eq!(t.current(), None);
    assert_eq!(t.pop_scope(None), Err(ErrorKind::NoActiveScope));
}

#[test]
fn popped_scopes_are_named_and_registered() {
    let mut t = SymbolTable::new();
    let root = t.push_scope();
    let a = t.push_scope();
    t.pop_scope(Some("a")).unwrap();
    let anon = t.push_scope();
    t.pop_scope(None).unwrap();
    let b = t.push_scope();
    t.pop_scope(Some("b")).unwrap();

    assert_eq!(t.root(), Some(root));
    assert_eq!(t.scope(root).children(), &[a, anon, b]);
    assert_eq!(t.scope(a).name(), Some("a"));
    assert_eq!(t.scope(anon).name(), None);
    assert_eq!(t.scope(b).parent(), Some(root));
}

#[test]
fn qualified_paths_walk_namespaces() {
    let mut ids = Ids::new();
    let mut t = SymbolTable::new();
    t.push_scope();
    t.push_scope();
    let id = ids.constant("id");
    t.declare("id", id).unwrap();
    t.push_scope();
    let port = ids.var("port");
    t.declare("port", port).unwrap();
    t.pop_scope(Some("inner")).unwrap();
    t.pop_scope(Some("net")).unwrap();

    assert_eq!(t.resolve_path(&["net", "id"], false), Ok(id));
    assert_eq!(t.resolve_path(&["net", "id"], true), Ok(id));
    assert_eq!(t.resolve_path(&["net", "inner", "port"], true), Ok(port));
    assert!(t.resolve_path(&["net", "port"], true).is_err());
    assert!(t.resolve_path(&["missing", "id"], false).is_err());
}

#[test]
fn member_scopes_act_as_namespaces() {
    let mut ids = Ids::new();
    let mut t = SymbolTable::new();
    t.push_scope();
    let mode = ids.var("mode");
    t.declare("mode", mode).unwrap();
    t.push_scope();
    let fast = ids.constant("fast");
    t.declare("fast", fast).unwrap();
    t.pop_scope(Some("mode")).unwrap();

    let step = t.resolve("mode", None).unwrap();
    assert_eq!(step.symbol, Some(mode));
    assert!(step.scope.is_some());
    assert_eq!(t.resolve_path(&["mode", "fast"], false), Ok(fast));
    assert_eq!(t.lookup("fast"), Err(ErrorKind::UndefinedName("fast".into())));
}

#[test]
fn rooted_lookup_ignores_inner_shadowing() {
    let mut ids = Ids::new();
    let mut t = SymbolTable::new();
    t.push_scope();
    let outer = ids.var("x");
    t.declare("x", outer).unwrap();
    t.push_scope();
    let inner = ids.var("x");
    t.declare("x", inner).unwrap();

    assert_eq!(t.resolve_path(&["x"], false), Ok(inner));
    assert_eq!(t.resolve_path(&["x"], true), Ok(outer));
}
