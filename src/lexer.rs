//! Tokenizer for the configuration language.
//!
//! Whitespace (newlines included) and comments (`#`, `//`, `/* */`) are
//! skipped. Every token carries the 1-based line and column it starts at.

use std::str::Chars;

use crate::error::HclError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A bare word. Dash-joined runs such as `flag-name` are a single token.
    Ident(String),
    /// A double-quoted, single-quoted or backtick string, already unescaped.
    Str(String),
    Number(f64),
    Equals,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Eof,
}

impl Token {
    /// Human-readable form for "expected X, found Y" messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Ident(s) => format!("identifier '{s}'"),
            Token::Str(_) => "string".into(),
            Token::Number(n) => format!("number {n}"),
            Token::Equals => "'='".into(),
            Token::LBrace => "'{'".into(),
            Token::RBrace => "'}'".into(),
            Token::LBracket => "'['".into(),
            Token::RBracket => "']'".into(),
            Token::Comma => "','".into(),
            Token::Dot => "'.'".into(),
            Token::Eof => "end of input".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub line: usize,
    pub column: usize,
}

pub struct Lexer<'a> {
    input: Chars<'a>,
    peek: Option<char>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer {
            input: input.chars(),
            peek: None,
            line: 1,
            column: 1,
        };
        lexer.peek = lexer.input.next();
        lexer
    }

    pub fn next_token(&mut self) -> Result<Spanned, HclError> {
        self.skip_trivia()?;
        let (line, column) = (self.line, self.column);

        let token = match self.peek {
            None => Token::Eof,
            Some('=') => self.symbol(Token::Equals),
            Some('{') => self.symbol(Token::LBrace),
            Some('}') => self.symbol(Token::RBrace),
            Some('[') => self.symbol(Token::LBracket),
            Some(']') => self.symbol(Token::RBracket),
            Some(',') => self.symbol(Token::Comma),
            Some('.') => self.symbol(Token::Dot),
            Some('"') => self.string(line, column)?,
            Some('\'') => self.char_literal(line, column)?,
            Some('`') => self.raw_string(line, column)?,
            Some(c) if c.is_ascii_digit() => self.number(line, column)?,
            Some('-') if self.second().is_some_and(|c| c.is_ascii_digit()) => {
                self.number(line, column)?
            }
            Some(c) if c.is_alphabetic() || c == '_' => self.identifier(),
            Some(c) => {
                return Err(syntax(line, column, format!("unexpected character '{c}'")));
            }
        };

        Ok(Spanned {
            token,
            line,
            column,
        })
    }

    fn bump(&mut self) -> Option<char> {
        let curr = self.peek;
        if let Some(c) = curr {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.peek = self.input.next();
        curr
    }

    /// The character after `peek`, without consuming anything.
    fn second(&self) -> Option<char> {
        self.input.clone().next()
    }

    fn symbol(&mut self, token: Token) -> Token {
        self.bump();
        token
    }

    fn skip_trivia(&mut self) -> Result<(), HclError> {
        while let Some(c) = self.peek {
            match c {
                c if c.is_whitespace() => {
                    self.bump();
                }
                '#' => self.skip_line(),
                '/' if self.second() == Some('/') => self.skip_line(),
                '/' if self.second() == Some('*') => {
                    let (line, column) = (self.line, self.column);
                    self.bump();
                    self.bump();
                    loop {
                        match self.bump() {
                            Some('*') if self.peek == Some('/') => {
                                self.bump();
                                break;
                            }
                            Some(_) => {}
                            None => return Err(syntax(line, column, "unterminated comment")),
                        }
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn skip_line(&mut self) {
        while let Some(ch) = self.bump() {
            if ch == '\n' {
                break;
            }
        }
    }

    fn identifier(&mut self) -> Token {
        let mut ident = String::new();
        while let Some(c) = self.peek {
            if c.is_alphanumeric() || c == '_' {
                ident.push(c);
                self.bump();
            } else if c == '-' && self.second().is_some_and(|n| n.is_alphanumeric() || n == '_') {
                ident.push(c);
                self.bump();
            } else {
                break;
            }
        }
        Token::Ident(ident)
    }

    fn number(&mut self, line: usize, column: usize) -> Result<Token, HclError> {
        let mut text = String::new();
        if self.peek == Some('-') {
            text.push('-');
            self.bump();
        }
        self.digits(&mut text);

        if self.peek == Some('.') && self.second().is_some_and(|c| c.is_ascii_digit()) {
            text.push('.');
            self.bump();
            self.digits(&mut text);
        }

        if matches!(self.peek, Some('e' | 'E')) && self.exponent_follows() {
            text.push('e');
            self.bump();
            if let Some(sign @ ('+' | '-')) = self.peek {
                text.push(sign);
                self.bump();
            }
            self.digits(&mut text);
        }

        match text.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Token::Number(n)),
            Ok(_) => Err(syntax(line, column, format!("number out of range '{text}'"))),
            Err(_) => Err(syntax(line, column, format!("invalid number '{text}'"))),
        }
    }

    fn digits(&mut self, out: &mut String) {
        while let Some(c) = self.peek {
            if !c.is_ascii_digit() {
                break;
            }
            out.push(c);
            self.bump();
        }
    }

    /// `e`/`E` only starts an exponent when digits follow, optionally signed.
    fn exponent_follows(&self) -> bool {
        let mut rest = self.input.clone();
        match rest.next() {
            Some(c) if c.is_ascii_digit() => true,
            Some('+' | '-') => rest.next().is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    fn string(&mut self, line: usize, column: usize) -> Result<Token, HclError> {
        self.bump();
        let mut content = String::new();
        loop {
            match self.bump() {
                Some('"') => break,
                Some('\\') => content.push(self.escape(line, column)?),
                Some('\n') | None => return Err(syntax(line, column, "unterminated string")),
                Some(c) => content.push(c),
            }
        }
        Ok(Token::Str(content))
    }

    fn char_literal(&mut self, line: usize, column: usize) -> Result<Token, HclError> {
        self.bump();
        let ch = match self.bump() {
            Some('\\') => self.escape(line, column)?,
            Some('\'') => return Err(syntax(line, column, "empty character literal")),
            Some('\n') | None => return Err(syntax(line, column, "unterminated character literal")),
            Some(c) => c,
        };
        if self.bump() != Some('\'') {
            return Err(syntax(
                line,
                column,
                "character literal must contain exactly one character",
            ));
        }
        Ok(Token::Str(ch.to_string()))
    }

    fn raw_string(&mut self, line: usize, column: usize) -> Result<Token, HclError> {
        self.bump();
        let mut content = String::new();
        loop {
            match self.bump() {
                Some('`') => break,
                Some(c) => content.push(c),
                None => return Err(syntax(line, column, "unterminated raw string")),
            }
        }
        Ok(Token::Str(content))
    }

    fn escape(&mut self, line: usize, column: usize) -> Result<char, HclError> {
        let ch = match self.bump() {
            Some('n') => '\n',
            Some('t') => '\t',
            Some('r') => '\r',
            Some('0') => '\0',
            Some('\\') => '\\',
            Some('"') => '"',
            Some('\'') => '\'',
            Some('u') => {
                let mut hex = String::with_capacity(4);
                for _ in 0..4 {
                    match self.bump() {
                        Some(c) if c.is_ascii_hexdigit() => hex.push(c),
                        _ => return Err(syntax(line, column, "invalid \\u escape")),
                    }
                }
                u32::from_str_radix(&hex, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| syntax(line, column, format!("invalid code point \\u{hex}")))?
            }
            Some(other) => {
                return Err(syntax(line, column, format!("unknown escape sequence '\\{other}'")));
            }
            None => return Err(syntax(line, column, "unterminated string")),
        };
        Ok(ch)
    }
}

pub(crate) fn syntax(line: usize, column: usize, message: impl Into<String>) -> HclError {
    HclError::Syntax {
        line,
        column,
        message: message.into(),
    }
}
