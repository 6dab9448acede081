//parsing statements: declarations, assignments, tree calls,
//iterate, if/else, for loops and blocks

use crate::ast::*;
use crate::error::CompileError;
use crate::lexer_tokenizer::{Span, Token};
use crate::parser::parser_kernel::Parser;

fn call_kind(token: &Token) -> Option<CallKind> {
    let kind = match token {
        Token::Insert => CallKind::Insert,
        Token::Remove => CallKind::Remove,
        Token::Includes => CallKind::Includes,
        Token::Height => CallKind::Height,
        Token::Depth => CallKind::Depth,
        Token::Calculate => CallKind::Calculate,
        Token::Visualize => CallKind::Visualize,
        Token::Add => CallKind::Add,
        Token::Sub => CallKind::Sub,
        _ => return None,
    };
    Some(kind)
}

fn declaration_kind(token: &Token) -> Option<VarType> {
    let kind = match token {
        Token::Int => VarType::Int,
        Token::Bool => VarType::Bool,
        Token::Const => VarType::Constant,
        Token::Rbt => VarType::RedBlackTree,
        Token::Avl => VarType::AvlTree,
        Token::Bst => VarType::BinarySearchTree,
        Token::Exp => VarType::ExpressionTree,
        _ => return None,
    };
    Some(kind)
}

fn traversal_order(token: &Token) -> Option<TraversalOrder> {
    match token {
        Token::Inorder => Some(TraversalOrder::Inorder),
        Token::Preorder => Some(TraversalOrder::Preorder),
        Token::Postorder => Some(TraversalOrder::Postorder),
        _ => None,
    }
}

impl<'a> Parser<'a> {
    pub fn parse_statement(&mut self) -> Result<Statement, CompileError> {
        match self.current() {
            Some(Token::Identifier(_)) => match self.peek(1) {
                Some(Token::Colon) => {
                    let decl = self.parse_declaration()?;
                    self.expect(&Token::EndStr)?;
                    Ok(Statement::Declaration(decl))
                }
                Some(Token::Assign) => {
                    let target = self.expect_identifier()?;
                    self.advance();
                    let assignment = self.parse_assignment(target)?;
                    self.expect(&Token::EndStr)?;
                    Ok(Statement::Assignment(assignment))
                }
                Some(Token::Dot) => {
                    let call = self.parse_call()?;
                    self.expect(&Token::EndStr)?;
                    Ok(Statement::FunctionCall(call))
                }
                _ => {
                    self.advance();
                    Err(self.unexpected("':', '=' or '.'"))
                }
            },
            Some(Token::If) => Ok(Statement::If(self.parse_if()?)),
            Some(Token::For) => Ok(Statement::For(self.parse_for()?)),
            Some(Token::Iterate) => {
                let iterate = self.parse_iterate()?;
                self.expect(&Token::EndStr)?;
                Ok(Statement::Iterate(iterate))
            }
            _ => Err(self.unexpected("a statement")),
        }
    }

    // name ':' kind ('=' value)?
    fn parse_declaration(&mut self) -> Result<Declaration, CompileError> {
        let name = self.expect_identifier()?;
        self.expect(&Token::Colon)?;
        let Some(var_type) = self.current().and_then(declaration_kind) else {
            return Err(self.unexpected("a type (int, bool, const, rbt, avl, bst or exp)"));
        };
        self.advance();

        let init = match var_type {
            VarType::Constant => {
                self.expect(&Token::Assign)?;
                Some(self.parse_value()?)
            }
            VarType::Int | VarType::Bool if self.match_token(&Token::Assign) => {
                Some(self.parse_value()?)
            }
            _ => None,
        };
        let span = match &init {
            Some((_, span)) => *span,
            None => name.span,
        };
        Ok(self
            .ctx
            .declaration(name, var_type, init.map(|(value, _)| value), span)?)
    }

    fn parse_assignment(&mut self, target: Identifier) -> Result<Assignment, CompileError> {
        let (value, span) = self.parse_value()?;
        Ok(self.ctx.assignment(target, value, span)?)
    }

    fn parse_value(&mut self) -> Result<(AssignedValue, Span), CompileError> {
        let start = self.current_span().start;
        let is_call = matches!(self.current(), Some(Token::Identifier(_)))
            && self.peek(1) == Some(&Token::Dot);
        let value = if is_call {
            AssignedValue::Call(self.parse_call()?)
        } else {
            AssignedValue::Expression(self.parse_expr()?)
        };
        Ok((value, self.span_from(start)))
    }

    // receiver '.' kind '(' expr? ')'
    fn parse_call(&mut self) -> Result<FunctionCall, CompileError> {
        let start = self.current_span().start;
        let receiver = self.expect_identifier()?;
        self.expect(&Token::Dot)?;
        let Some(kind) = self.current().and_then(call_kind) else {
            return Err(self.unexpected("a tree operation"));
        };
        self.advance();
        self.expect(&Token::LParen)?;
        let argument = if self.current() == Some(&Token::RParen) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(&Token::RParen)?;
        let span = self.span_from(start);
        Ok(self.ctx.function_call(receiver, kind, argument, span)?)
    }

    fn parse_iterate(&mut self) -> Result<IterateStatement, CompileError> {
        self.expect(&Token::Iterate)?;
        let target = self.expect_identifier()?;
        let Some(order) = self.current().and_then(traversal_order) else {
            return Err(self.unexpected("inorder, preorder or postorder"));
        };
        self.advance();
        Ok(self.ctx.iterate_statement(target, order)?)
    }

    fn parse_if(&mut self) -> Result<IfStatement, CompileError> {
        self.expect(&Token::If)?;
        self.expect(&Token::LParen)?;
        let start = self.current_span().start;
        let condition = self.parse_expr()?;
        let condition_span = self.span_from(start);
        self.expect(&Token::RParen)?;
        let then_block = self.parse_block()?;
        let else_block = if self.match_token(&Token::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };
        Ok(self
            .ctx
            .if_statement(condition, then_block, else_block, condition_span)?)
    }

    // for i in start to end { ... }
    fn parse_for(&mut self) -> Result<ForStatement, CompileError> {
        self.expect(&Token::For)?;
        let variable = self.expect_identifier()?;
        self.expect(&Token::In)?;
        let start = self.current_span().start;
        let from = self.parse_expr()?;
        self.expect(&Token::To)?;
        let to = self.parse_expr()?;
        let span = self.span_from(start);
        let range = self.ctx.range_expression(from, to, span)?;
        self.ctx.for_header(&variable)?;
        let block = self.parse_block()?;
        Ok(self.ctx.for_statement(variable, range, block))
    }

    pub fn parse_block(&mut self) -> Result<Block, CompileError> {
        self.expect(&Token::LBrace)?;
        self.ctx.begin_block();
        let mut statements = Vec::new();
        while self.current() != Some(&Token::RBrace) {
            if self.current().is_none() {
                return Err(self.unexpected("'}'"));
            }
            statements.push(self.parse_statement()?);
        }
        self.advance();
        Ok(self.ctx.block(statements))
    }
}
