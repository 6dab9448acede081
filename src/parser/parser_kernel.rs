//parser state and token helpers,
//every production hands its children to the semantic actions after they are parsed

use crate::ast::{Identifier, Program};
use crate::error::CompileError;
use crate::lexer_tokenizer::{PositionedToken, Span, Token};
use crate::parser::parser_error::ParseError;
use crate::semantic::CompilationContext;

pub struct Parser<'a> {
    pub tokens: &'a [PositionedToken],
    pub pos: usize,
    pub ctx: &'a mut CompilationContext,
    eof: Span,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [PositionedToken], ctx: &'a mut CompilationContext) -> Self {
        let end = tokens.last().map(|t| t.span.end).unwrap_or(0);
        Self {
            tokens,
            pos: 0,
            ctx,
            eof: Span::new(end, end),
        }
    }

    pub fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    pub fn peek(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset).map(|t| &t.token)
    }

    pub fn advance(&mut self) {
        self.pos += 1;
    }

    pub fn current_span(&self) -> Span {
        self.tokens.get(self.pos).map(|t| t.span).unwrap_or(self.eof)
    }

    // Span from `start` up to the end of the last consumed token
    pub fn span_from(&self, start: usize) -> Span {
        let end = self
            .pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.span.end)
            .unwrap_or(start);
        Span::new(start, end.max(start))
    }

    pub fn match_token(&mut self, expected: &Token) -> bool {
        if self.current() == Some(expected) {
            self.advance();
            return true;
        }
        false
    }

    pub fn expect(&mut self, expected: &Token) -> Result<Span, CompileError> {
        match self.tokens.get(self.pos) {
            Some(token) if &token.token == expected => {
                self.pos += 1;
                Ok(token.span)
            }
            _ => Err(self.unexpected(&expected.to_string())),
        }
    }

    pub fn expect_identifier(&mut self) -> Result<Identifier, CompileError> {
        match self.tokens.get(self.pos) {
            Some(PositionedToken {
                token: Token::Identifier(name),
                span,
            }) => {
                let ident = Identifier::new(name.clone(), *span);
                self.pos += 1;
                Ok(ident)
            }
            _ => Err(self.unexpected("an identifier")),
        }
    }

    pub fn unexpected(&self, expected: &str) -> CompileError {
        match self.tokens.get(self.pos) {
            Some(token) => ParseError::unexpected(expected, &token.token, token.span).into(),
            None => ParseError::eof(expected, self.eof).into(),
        }
    }

    pub fn parse_program(&mut self) -> Result<Program, CompileError> {
        let mut statements = Vec::new();
        while self.current().is_some() {
            statements.push(self.parse_statement()?);
        }
        Ok(self.ctx.program(statements)?)
    }
}
