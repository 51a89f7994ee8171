use std::fmt;
use std::sync::Arc;

use crate::foundation::error::{CompileError, CompileResult, ErrorKind};
use crate::foundation::position::SourcePosition;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) pos: SourcePosition,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Ident(String),
    /// Literal text is kept as written; typing happens once the target type is known.
    Int(String),
    Float(String),
    Str(String),
    True,
    False,

    KwInt,
    KwBool,
    KwFloat,
    KwString,
    KwMap,
    KwAllow,
    KwDeny,
    KwConst,
    KwStruct,
    KwDefault,
    KwNamespace,

    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    DotDot,
    Dot,
    Assign,
    PathSep,
    Semi,

    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ident(s) | Self::Int(s) | Self::Float(s) | Self::Str(s) => {
                return write!(f, "'{s}'");
            }
            Self::True => "'true'",
            Self::False => "'false'",
            Self::KwInt => "'int'",
            Self::KwBool => "'bool'",
            Self::KwFloat => "'float'",
            Self::KwString => "'string'",
            Self::KwMap => "'map'",
            Self::KwAllow => "'allow'",
            Self::KwDeny => "'deny'",
            Self::KwConst => "'const'",
            Self::KwStruct => "'struct'",
            Self::KwDefault => "'default'",
            Self::KwNamespace => "'namespace'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::Comma => "','",
            Self::DotDot => "'..'",
            Self::Dot => "'.'",
            Self::Assign => "'='",
            Self::PathSep => "'::'",
            Self::Semi => "';'",
            Self::Eof => "end of input",
        };
        f.write_str(s)
    }
}

fn keyword(s: &str) -> Option<TokenKind> {
    Some(match s {
        "int" => TokenKind::KwInt,
        "bool" => TokenKind::KwBool,
        "float" => TokenKind::KwFloat,
        "string" => TokenKind::KwString,
        "map" => TokenKind::KwMap,
        "allow" => TokenKind::KwAllow,
        "deny" => TokenKind::KwDeny,
        "const" => TokenKind::KwConst,
        "struct" => TokenKind::KwStruct,
        "default" => TokenKind::KwDefault,
        "namespace" => TokenKind::KwNamespace,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        _ => return None,
    })
}

/// Tokenize `input`, tracking `file`/line/column for every token.
///
/// `#line N "file"` (and the preprocessor's `# N "file" flags` form) re-bases the position of the
/// following line.
pub(crate) fn lex(input: &str, file: &str) -> CompileResult<Vec<Token>> {
    let mut lx = Lexer {
        input,
        bytes: input.as_bytes(),
        i: 0,
        line: 1,
        col: 1,
        file: Arc::from(file),
    };
    let mut out = Vec::new();
    loop {
        let tok = lx.next_token()?;
        let done = tok.kind == TokenKind::Eof;
        out.push(tok);
        if done {
            return Ok(out);
        }
    }
}

struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    i: usize,
    line: u32,
    col: u32,
    file: Arc<str>,
}

impl Lexer<'_> {
    fn pos(&self) -> SourcePosition {
        SourcePosition {
            file: Arc::clone(&self.file),
            line: self.line,
            column: self.col,
        }
    }

    fn peek_byte(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.i + ahead).copied()
    }

    fn advance(&mut self) {
        if let Some(b) = self.peek_byte(0) {
            self.i += 1;
            if b == b'\n' {
                self.line += 1;
                self.col = 1;
            } else if b & 0xC0 != 0x80 {
                // Continuation bytes of a UTF-8 sequence do not start a new column.
                self.col += 1;
            }
        }
    }

    fn advance_while(&mut self, pred: impl Fn(u8) -> bool) {
        while self.peek_byte(0).is_some_and(&pred) {
            self.advance();
        }
    }

    fn error(&self, pos: SourcePosition, msg: impl Into<String>) -> CompileError {
        ErrorKind::syntax(msg).at(&pos)
    }

    /// Skip whitespace, comments and line markers.
    fn skip_trivia(&mut self) -> CompileResult<()> {
        loop {
            match (self.peek_byte(0), self.peek_byte(1)) {
                (Some(b), _) if b.is_ascii_whitespace() => self.advance(),
                (Some(b'/'), Some(b'/')) => self.advance_while(|b| b != b'\n'),
                (Some(b'/'), Some(b'*')) => {
                    let start = self.pos();
                    self.advance();
                    self.advance();
                    loop {
                        match (self.peek_byte(0), self.peek_byte(1)) {
                            (Some(b'*'), Some(b'/')) => {
                                self.advance();
                                self.advance();
                                break;
                            }
                            (Some(_), _) => self.advance(),
                            (None, _) => return Err(self.error(start, "unterminated comment")),
                        }
                    }
                }
                (Some(b'#'), _) => self.line_marker()?,
                _ => return Ok(()),
            }
        }
    }

    fn line_marker(&mut self) -> CompileResult<()> {
        let start = self.pos();
        self.advance();
        self.advance_while(|b| b == b' ' || b == b'\t');
        let word = self.i;
        self.advance_while(|b| b.is_ascii_alphabetic());
        match &self.input[word..self.i] {
            "line" | "" => {}
            other => return Err(self.error(start, format!("unknown directive '#{other}'"))),
        }
        self.advance_while(|b| b == b' ' || b == b'\t');

        let digits = self.i;
        self.advance_while(|b| b.is_ascii_digit());
        let line: u32 = self.input[digits..self.i]
            .parse()
            .map_err(|_| self.error(start.clone(), "line marker needs a line number"))?;
        self.advance_while(|b| b == b' ' || b == b'\t');

        let file = if self.peek_byte(0) == Some(b'"') {
            let quoted = self.string_literal()?;
            Some(quoted[1..quoted.len() - 1].to_owned())
        } else {
            None
        };
        // Trailing preprocessor flags are ignored.
        self.advance_while(|b| b != b'\n');
        self.advance();

        self.line = line;
        self.col = 1;
        if let Some(file) = file {
            self.file = Arc::from(file);
        }
        Ok(())
    }

    fn string_literal(&mut self) -> CompileResult<String> {
        let start_pos = self.pos();
        let start = self.i;
        self.advance();
        loop {
            match self.peek_byte(0) {
                Some(b'"') => {
                    self.advance();
                    return Ok(self.input[start..self.i].to_owned());
                }
                Some(b'\\') => {
                    self.advance();
                    if self.peek_byte(0).is_some_and(|b| b != b'\n') {
                        self.advance();
                    }
                }
                Some(b'\n') | None => {
                    return Err(self.error(start_pos, "unterminated string literal"));
                }
                Some(_) => self.advance(),
            }
        }
    }

    fn number(&mut self) -> TokenKind {
        let start = self.i;
        if self.peek_byte(0) == Some(b'-') {
            self.advance();
        }
        let radix_prefix = self.peek_byte(0) == Some(b'0')
            && matches!(
                self.peek_byte(1),
                Some(b'x' | b'X' | b'o' | b'O' | b'b' | b'B')
            );
        if radix_prefix {
            self.advance();
            self.advance();
            self.advance_while(|b| b.is_ascii_alphanumeric());
            return TokenKind::Int(self.input[start..self.i].to_owned());
        }

        let mut float = false;
        self.advance_while(|b| b.is_ascii_digit());
        if self.peek_byte(0) == Some(b'.') && self.peek_byte(1).is_some_and(|b| b.is_ascii_digit())
        {
            float = true;
            self.advance();
            self.advance_while(|b| b.is_ascii_digit());
        }
        if matches!(self.peek_byte(0), Some(b'e' | b'E')) {
            let sign = usize::from(matches!(self.peek_byte(1), Some(b'+' | b'-')));
            if self.peek_byte(1 + sign).is_some_and(|b| b.is_ascii_digit()) {
                float = true;
                for _ in 0..=sign {
                    self.advance();
                }
                self.advance_while(|b| b.is_ascii_digit());
            }
        }
        let text = self.input[start..self.i].to_owned();
        if float {
            TokenKind::Float(text)
        } else {
            TokenKind::Int(text)
        }
    }

    fn next_token(&mut self) -> CompileResult<Token> {
        self.skip_trivia()?;
        let pos = self.pos();
        let Some(c) = self.peek_byte(0) else {
            return Ok(Token {
                kind: TokenKind::Eof,
                pos,
            });
        };
        let next = self.peek_byte(1);

        let starts_number = c.is_ascii_digit()
            || (c == b'.' && next.is_some_and(|b| b.is_ascii_digit()))
            || (c == b'-'
                && (next.is_some_and(|b| b.is_ascii_digit())
                    || (next == Some(b'.')
                        && self.peek_byte(2).is_some_and(|b| b.is_ascii_digit()))));
        if starts_number {
            let kind = self.number();
            return Ok(Token { kind, pos });
        }

        if c.is_ascii_alphabetic() || c == b'_' {
            let start = self.i;
            self.advance_while(|b| b.is_ascii_alphanumeric() || b == b'_');
            let s = &self.input[start..self.i];
            let kind = keyword(s).unwrap_or_else(|| TokenKind::Ident(s.to_owned()));
            return Ok(Token { kind, pos });
        }

        if c == b'"' {
            let kind = TokenKind::Str(self.string_literal()?);
            return Ok(Token { kind, pos });
        }

        let (kind, len) = match (c, next) {
            (b'.', Some(b'.')) => (TokenKind::DotDot, 2),
            (b':', Some(b':')) => (TokenKind::PathSep, 2),
            (b'.', _) => (TokenKind::Dot, 1),
            (b'{', _) => (TokenKind::LBrace, 1),
            (b'}', _) => (TokenKind::RBrace, 1),
            (b'[', _) => (TokenKind::LBracket, 1),
            (b']', _) => (TokenKind::RBracket, 1),
            (b',', _) => (TokenKind::Comma, 1),
            (b'=', _) => (TokenKind::Assign, 1),
            (b';', _) => (TokenKind::Semi, 1),
            _ => {
                let ch = self.input[self.i..].chars().next().unwrap_or('?');
                return Err(self.error(pos, format!("unexpected character '{ch}'")));
            }
        };
        for _ in 0..len {
            self.advance();
        }
        Ok(Token { kind, pos })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frontend/lexer.rs"]
mod tests;
