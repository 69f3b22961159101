//! Recursive-descent parser for the configuration language.
//!
//! ```text
//! Document  := Entry* EOF
//! Block     := Value* "{" Entry* "}"
//! Entry     := Key ("=" Value | Block)
//! Value     := Bool | Identifier ("." Identifier)* | String | Number
//!            | "[" (Value ","?)* "]"
//! ```
//!
//! The first error aborts the parse; there is no recovery.

use crate::ast::{Block, Document, Entry, EntryBody};
use crate::error::HclError;
use crate::lexer::{Lexer, Spanned, Token, syntax};
use crate::value::Value;

/// Parse a complete document.
pub fn parse(input: &str) -> Result<Document, HclError> {
    Parser::new(input)?.parse_document()
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    peek: Spanned,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Result<Self, HclError> {
        let mut lexer = Lexer::new(input);
        let peek = lexer.next_token()?;
        Ok(Self { lexer, peek })
    }

    pub fn parse_document(&mut self) -> Result<Document, HclError> {
        let mut entries = Vec::new();
        while self.peek.token != Token::Eof {
            entries.push(self.parse_entry()?);
        }
        Ok(Document { entries })
    }

    fn bump(&mut self) -> Result<Spanned, HclError> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.peek, next))
    }

    fn peek(&self) -> &Token {
        &self.peek.token
    }

    fn expect(&mut self, expected: Token) -> Result<Spanned, HclError> {
        if *self.peek() != expected {
            return Err(self.unexpected(&expected.describe()));
        }
        self.bump()
    }

    fn unexpected(&self, expected: &str) -> HclError {
        syntax(
            self.peek.line,
            self.peek.column,
            format!("expected {expected}, found {}", self.peek.token.describe()),
        )
    }

    fn parse_entry(&mut self) -> Result<Entry, HclError> {
        let key = match self.peek() {
            Token::Ident(key) => key.clone(),
            _ => return Err(self.unexpected("key")),
        };
        self.bump()?;

        let body = if *self.peek() == Token::Equals {
            self.bump()?;
            EntryBody::Value(self.parse_value()?)
        } else {
            EntryBody::Block(self.parse_block()?)
        };
        Ok(Entry { key, body })
    }

    fn parse_block(&mut self) -> Result<Block, HclError> {
        let mut parameters = Vec::new();
        loop {
            match self.peek() {
                Token::LBrace => break,
                Token::Ident(_) | Token::Str(_) | Token::Number(_) | Token::LBracket => {
                    parameters.push(self.parse_value()?);
                }
                _ => return Err(self.unexpected("'=' or '{'")),
            }
        }
        let open = self.expect(Token::LBrace)?;

        let mut entries = Vec::new();
        loop {
            match self.peek() {
                Token::RBrace => {
                    self.bump()?;
                    break;
                }
                Token::Eof => {
                    return Err(syntax(open.line, open.column, "unterminated block"));
                }
                _ => entries.push(self.parse_entry()?),
            }
        }
        Ok(Block {
            parameters,
            entries,
        })
    }

    fn parse_value(&mut self) -> Result<Value, HclError> {
        let Spanned { token, line, column } = self.bump()?;
        match token {
            Token::Ident(word) if word == "true" => Ok(Value::Bool(true)),
            Token::Ident(word) if word == "false" => Ok(Value::Bool(false)),
            Token::Ident(mut word) => {
                while *self.peek() == Token::Dot {
                    self.bump()?;
                    match self.bump()?.token {
                        Token::Ident(part) => {
                            word.push('.');
                            word.push_str(&part);
                        }
                        other => {
                            let found = other.describe();
                            return Err(syntax(
                                line,
                                column,
                                format!("expected identifier after '.', found {found}"),
                            ));
                        }
                    }
                }
                Ok(Value::Identifier(word))
            }
            Token::Str(s) => Ok(Value::Str(s)),
            Token::Number(n) => Ok(Value::Number(n)),
            Token::LBracket => self.parse_array(line, column),
            other => Err(syntax(
                line,
                column,
                format!("expected value, found {}", other.describe()),
            )),
        }
    }

    fn parse_array(&mut self, line: usize, column: usize) -> Result<Value, HclError> {
        let mut items = Vec::new();
        loop {
            match self.peek() {
                Token::RBracket => {
                    self.bump()?;
                    break;
                }
                Token::Eof => return Err(syntax(line, column, "unterminated array")),
                _ => {
                    items.push(self.parse_value()?);
                    if *self.peek() == Token::Comma {
                        self.bump()?;
                    }
                }
            }
        }
        Ok(Value::Array(items))
    }
}
