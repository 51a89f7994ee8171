use crate::ast::constant::ConstantList;
use crate::ast::description::{DefaultValue, VariableDescriptionSet};
use crate::ast::filter::{Filter, Polarity, Predicate};
use crate::ast::map::{Map, MapEntry};
use crate::ast::qualifier::{Qualified, Qualifier};
use crate::ast::range::Range;
use crate::compile::session::{Access, Compiled, Literal, Rvalue, Session, VariableDecl};
use crate::foundation::error::{CompileError, CompileResult, ErrorKind};
use crate::foundation::position::SourcePosition;
use crate::frontend::lexer::{Token, TokenKind, lex};
use crate::model::types::{BuiltinType, Type};

/// Parse one source document and drive its construction to completion.
pub(crate) fn parse(src: &str, file: &str) -> CompileResult<Compiled> {
    let tokens = lex(src, file)?;
    tracing::trace!(tokens = tokens.len(), "lexed");
    let mut p = Parser {
        tokens,
        pos: 0,
        session: Session::new(SourcePosition::start_of(file)),
    };
    while p.peek().kind != TokenKind::Eof {
        p.parse_item()?;
    }
    let end = p.peek().pos.clone();
    p.session.finish(&end)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    session: Session,
}

impl Parser {
    fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    fn peek_at(&self, ahead: usize) -> &Token {
        // The token list always ends with `Eof`, which absorbs any look-ahead past the end.
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + ahead).min(last)]
    }

    fn bump(&mut self) -> Token {
        let t = self.peek().clone();
        if t.kind != TokenKind::Eof {
            self.pos += 1;
        }
        t
    }

    fn unexpected(&self, what: &str) -> CompileError {
        let t = self.peek();
        ErrorKind::syntax(format!("expected {what}, found {}", t.kind)).at(&t.pos)
    }

    fn expect(&mut self, kind: TokenKind) -> CompileResult<SourcePosition> {
        if self.peek().kind == kind {
            Ok(self.bump().pos)
        } else {
            Err(self.unexpected(&kind.to_string()))
        }
    }

    fn consume(&mut self, kind: TokenKind) -> bool {
        if self.peek().kind == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect_ident(&mut self) -> CompileResult<(String, SourcePosition)> {
        let t = self.peek();
        let TokenKind::Ident(name) = &t.kind else {
            return Err(self.unexpected("an identifier"));
        };
        let ident = (name.clone(), t.pos.clone());
        self.bump();
        Ok(ident)
    }

    fn parse_item(&mut self) -> CompileResult<()> {
        match &self.peek().kind {
            TokenKind::KwNamespace => self.parse_namespace(),
            TokenKind::KwStruct if self.peek_at(2).kind == TokenKind::LBrace => {
                self.parse_struct_decl()
            }
            TokenKind::KwStruct => self.parse_struct_instance(),
            TokenKind::KwConst if self.peek_at(1).kind == TokenKind::LBrace => {
                let list = self.parse_const_list(None)?;
                self.session.push_constants(list)
            }
            TokenKind::KwConst
            | TokenKind::KwInt
            | TokenKind::KwBool
            | TokenKind::KwFloat
            | TokenKind::KwString => {
                let decl = self.parse_var_decl()?;
                self.session.declare_variable(decl)?;
                Ok(())
            }
            TokenKind::Ident(_) | TokenKind::PathSep => self.parse_assignment(),
            _ => Err(self.unexpected("a declaration or an assignment")),
        }
    }

    fn parse_namespace(&mut self) -> CompileResult<()> {
        let pos = self.expect(TokenKind::KwNamespace)?;
        let (name, _) = self.expect_ident()?;
        self.expect(TokenKind::LBrace)?;
        self.session.begin_namespace(name, pos);
        while !matches!(self.peek().kind, TokenKind::RBrace | TokenKind::Eof) {
            self.parse_item()?;
        }
        let close = self.expect(TokenKind::RBrace)?;
        self.consume(TokenKind::Semi);
        self.session.end_namespace(&close)
    }

    fn parse_struct_decl(&mut self) -> CompileResult<()> {
        let pos = self.expect(TokenKind::KwStruct)?;
        let (name, _) = self.expect_ident()?;
        self.expect(TokenKind::LBrace)?;
        self.session.begin_struct(&name, pos)?;
        loop {
            self.parse_member()?;
            if self.peek().kind == TokenKind::RBrace {
                break;
            }
        }
        let close = self.expect(TokenKind::RBrace)?;
        self.expect(TokenKind::Semi)?;
        self.session.end_struct(&close)?;
        Ok(())
    }

    fn parse_member(&mut self) -> CompileResult<()> {
        if self.peek().kind == TokenKind::KwStruct {
            let pos = self.bump().pos;
            let (type_name, _) = self.expect_ident()?;
            let (name, _) = self.expect_ident()?;
            self.expect(TokenKind::Semi)?;
            self.session.add_struct_member(&type_name, &name, pos)?;
        } else {
            let decl = self.parse_var_decl()?;
            self.session.add_member(decl)?;
        }
        Ok(())
    }

    fn parse_struct_instance(&mut self) -> CompileResult<()> {
        let pos = self.expect(TokenKind::KwStruct)?;
        let (type_name, _) = self.expect_ident()?;
        let (name, _) = self.expect_ident()?;
        self.expect(TokenKind::Semi)?;
        self.session.instantiate_struct(&type_name, &name, pos)?;
        Ok(())
    }

    fn parse_type(&mut self) -> CompileResult<Type> {
        let ty = match self.peek().kind {
            TokenKind::KwInt => Type::INT,
            TokenKind::KwBool => Type::BOOL,
            TokenKind::KwFloat => Type::FLOAT,
            TokenKind::KwString => Type::STRING,
            _ => return Err(self.unexpected("a type")),
        };
        self.bump();
        Ok(ty)
    }

    /// `const? type name (';' | '{' desc+ '}' ';')`
    fn parse_var_decl(&mut self) -> CompileResult<VariableDecl> {
        let pos = self.peek().pos.clone();
        let mut qualified = Qualified::default();
        if self.peek().kind == TokenKind::KwConst {
            qualified.add(Qualifier::constant(self.bump().pos));
        }
        let ty = self.parse_type()?;
        let (name, _) = self.expect_ident()?;
        let description = if self.peek().kind == TokenKind::LBrace {
            Some(self.parse_description(&name, &ty)?)
        } else {
            None
        };
        self.expect(TokenKind::Semi)?;
        Ok(VariableDecl {
            name,
            ty,
            qualified,
            description,
            pos,
        })
    }

    /// The description block gets its own scope, sealed under the variable's name.
    fn parse_description(&mut self, name: &str, ty: &Type) -> CompileResult<VariableDescriptionSet> {
        let open = self.expect(TokenKind::LBrace)?;
        self.session.push_scope();
        let mut desc = VariableDescriptionSet::new(open);
        loop {
            self.parse_desc(&mut desc, ty)?;
            if self.peek().kind == TokenKind::RBrace {
                break;
            }
        }
        let close = self.expect(TokenKind::RBrace)?;
        self.session.pop_scope(Some(name), &close)?;
        Ok(desc)
    }

    fn parse_desc(&mut self, desc: &mut VariableDescriptionSet, ty: &Type) -> CompileResult<()> {
        match self.peek().kind {
            TokenKind::KwAllow | TokenKind::KwDeny => {
                let t = self.bump();
                let polarity = if t.kind == TokenKind::KwAllow {
                    Polarity::Allow
                } else {
                    Polarity::Deny
                };
                let filter = self.parse_filter(polarity, t.pos, ty)?;
                desc.set_filter(filter)
            }
            TokenKind::KwDefault => {
                let pos = self.bump().pos;
                self.expect(TokenKind::Assign)?;
                let rvalue = self.parse_rvalue()?;
                self.expect(TokenKind::Semi)?;
                let value = self.session.evaluate(&rvalue, Some(ty))?;
                desc.set_default(DefaultValue::new(value, pos))
            }
            TokenKind::KwMap => {
                let pos = self.bump().pos;
                let map = self.parse_map(pos, ty)?;
                desc.set_map(map)
            }
            TokenKind::KwConst => {
                let list = self.parse_const_list(Some(ty))?;
                desc.set_constants(list)
            }
            _ => Err(self.unexpected("a description")),
        }
    }

    fn parse_filter(
        &mut self,
        polarity: Polarity,
        pos: SourcePosition,
        ty: &Type,
    ) -> CompileResult<Filter> {
        self.expect(TokenKind::LBrace)?;
        let mut filter = Filter::new(polarity, pos);
        loop {
            let predicate = if self.peek().kind == TokenKind::LBracket {
                Predicate::Range(self.parse_range(ty)?)
            } else {
                Predicate::Value(self.parse_literal()?.value(Some(ty))?)
            };
            filter.add(predicate)?;
            if !self.consume(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace)?;
        self.expect(TokenKind::Semi)?;
        Ok(filter)
    }

    /// `[lo..hi]` with either bound optional, but not both.
    fn parse_range(&mut self, ty: &Type) -> CompileResult<Range> {
        let open = self.expect(TokenKind::LBracket)?;
        let mut range = Range::new(open.clone());
        let mut bounded = false;
        if self.peek().kind != TokenKind::DotDot {
            range.set_lower(self.parse_literal()?.value(Some(ty))?)?;
            bounded = true;
        }
        self.expect(TokenKind::DotDot)?;
        if self.peek().kind != TokenKind::RBracket {
            range.set_upper(self.parse_literal()?.value(Some(ty))?)?;
            bounded = true;
        }
        self.expect(TokenKind::RBracket)?;
        if !bounded {
            return Err(ErrorKind::syntax("a range needs at least one bound").at(&open));
        }
        Ok(range)
    }

    /// Keys are typed like the variable; values carry whatever type they are written with.
    fn parse_map(&mut self, pos: SourcePosition, ty: &Type) -> CompileResult<Map> {
        self.expect(TokenKind::LBrace)?;
        let mut map = Map::new(pos);
        loop {
            let key = self.parse_literal()?;
            self.expect(TokenKind::Assign)?;
            let rvalue = self.parse_rvalue()?;
            let value = self.session.evaluate(&rvalue, map.value_type())?;
            map.add(MapEntry::new(key.value(Some(ty))?, value, key.pos))?;
            if !self.consume(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace)?;
        self.expect(TokenKind::Semi)?;
        Ok(map)
    }

    /// `const { a = 1; b = 2; };` declares each element in the current scope as it is read.
    fn parse_const_list(&mut self, expected: Option<&Type>) -> CompileResult<ConstantList> {
        let pos = self.expect(TokenKind::KwConst)?;
        self.expect(TokenKind::LBrace)?;
        let mut list = ConstantList::new(pos);
        loop {
            let (name, name_pos) = self.expect_ident()?;
            self.expect(TokenKind::Assign)?;
            let rvalue = self.parse_rvalue()?;
            let hint = expected.cloned().or_else(|| list.ty().cloned());
            let value = self.session.evaluate(&rvalue, hint.as_ref())?;
            self.session
                .declare_constant(&mut list, &name, value, name_pos)?;
            let separated = self.consume(TokenKind::Comma) || self.consume(TokenKind::Semi);
            if !separated || self.peek().kind == TokenKind::RBrace {
                break;
            }
        }
        self.expect(TokenKind::RBrace)?;
        self.expect(TokenKind::Semi)?;
        Ok(list)
    }

    fn parse_assignment(&mut self) -> CompileResult<()> {
        let access = self.parse_access()?;
        self.expect(TokenKind::Assign)?;
        let rvalue = self.parse_rvalue()?;
        self.expect(TokenKind::Semi)?;

        let place = self.session.resolve_place(&access)?;
        let expected = self.session.place_type(place)?.clone();
        let value = self.session.evaluate(&rvalue, Some(&expected))?;
        self.session.assign(place, value, access.pos)
    }

    /// `::`? ID (`::` ID)* (`.` ID)*
    fn parse_access(&mut self) -> CompileResult<Access> {
        let pos = self.peek().pos.clone();
        let rooted = self.consume(TokenKind::PathSep);
        let mut path = vec![self.expect_ident()?.0];
        while self.consume(TokenKind::PathSep) {
            path.push(self.expect_ident()?.0);
        }
        let mut members = Vec::new();
        while self.consume(TokenKind::Dot) {
            members.push(self.expect_ident()?.0);
        }
        Ok(Access {
            rooted,
            path,
            members,
            pos,
        })
    }

    fn parse_rvalue(&mut self) -> CompileResult<Rvalue> {
        match self.peek().kind {
            TokenKind::Ident(_) | TokenKind::PathSep => Ok(Rvalue::Access(self.parse_access()?)),
            _ => Ok(Rvalue::Literal(self.parse_literal()?)),
        }
    }

    fn parse_literal(&mut self) -> CompileResult<Literal> {
        let kind = match &self.peek().kind {
            TokenKind::Int(_) => BuiltinType::Int,
            TokenKind::Float(_) => BuiltinType::Float,
            TokenKind::Str(_) => BuiltinType::String,
            TokenKind::True | TokenKind::False => BuiltinType::Bool,
            _ => return Err(self.unexpected("a literal")),
        };
        let t = self.bump();
        let text = match t.kind {
            TokenKind::Int(s) | TokenKind::Float(s) | TokenKind::Str(s) => s,
            TokenKind::True => "true".to_owned(),
            _ => "false".to_owned(),
        };
        Ok(Literal::new(kind, text, t.pos))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frontend/parser.rs"]
mod tests;
