//parsing expressions with precedence climbing,
//all binary operators are left associative and bind like their java counterparts

use crate::ast::{BinaryOperator, Expression, Factor, Identifier};
use crate::error::CompileError;
use crate::lexer_tokenizer::Token;
use crate::parser::parser_kernel::Parser;

fn token_to_operator(token: &Token) -> Option<BinaryOperator> {
    let op = match token {
        Token::Or => BinaryOperator::Or,
        Token::And => BinaryOperator::And,
        Token::Equal => BinaryOperator::Equal,
        Token::NotEqual => BinaryOperator::NotEqual,
        Token::Less => BinaryOperator::Less,
        Token::LessEqual => BinaryOperator::LessEqual,
        Token::Greater => BinaryOperator::Greater,
        Token::GreaterEqual => BinaryOperator::GreaterEqual,
        Token::Plus => BinaryOperator::Add,
        Token::Minus => BinaryOperator::Sub,
        Token::Star => BinaryOperator::Mul,
        Token::Slash => BinaryOperator::Div,
        Token::Mod => BinaryOperator::Mod,
        _ => return None,
    };
    Some(op)
}

fn operator_precedence(op: BinaryOperator) -> u8 {
    match op {
        BinaryOperator::Or => 1,
        BinaryOperator::And => 2,
        BinaryOperator::Equal | BinaryOperator::NotEqual => 3,
        BinaryOperator::Less
        | BinaryOperator::LessEqual
        | BinaryOperator::Greater
        | BinaryOperator::GreaterEqual => 4,
        BinaryOperator::Add | BinaryOperator::Sub => 5,
        BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Mod => 6,
    }
}

impl<'a> Parser<'a> {
    pub fn parse_expr(&mut self) -> Result<Expression, CompileError> {
        self.parse_binary_op(1)
    }

    fn parse_binary_op(&mut self, min_precedence: u8) -> Result<Expression, CompileError> {
        let start = self.current_span().start;
        let mut result = self.parse_unary()?;

        while let Some(op) = self.current().and_then(token_to_operator) {
            let prec = operator_precedence(op);
            if prec < min_precedence {
                break;
            }
            self.advance();
            let right = self.parse_binary_op(prec + 1)?;
            let span = self.span_from(start);
            result = self.ctx.binary_expression(op, result, right, span)?;
        }
        Ok(result)
    }

    fn parse_unary(&mut self) -> Result<Expression, CompileError> {
        let start = self.current_span().start;
        if self.match_token(&Token::Not) {
            let operand = self.parse_unary()?;
            let span = self.span_from(start);
            return Ok(self.ctx.not_expression(operand, span)?);
        }
        let factor = self.parse_factor()?;
        Ok(self.ctx.factor_expression(factor))
    }

    fn parse_factor(&mut self) -> Result<Factor, CompileError> {
        let span = self.current_span();
        match self.current().cloned() {
            Some(Token::Number(n)) => {
                self.advance();
                let constant = self.ctx.integer_constant(n);
                Ok(self.ctx.constant_factor(constant))
            }
            Some(Token::True) | Some(Token::False) => {
                let value = self.current() == Some(&Token::True);
                self.advance();
                let constant = self.ctx.boolean_constant(value);
                Ok(self.ctx.constant_factor(constant))
            }
            Some(Token::Identifier(name)) => {
                self.advance();
                Ok(self.ctx.variable_factor(Identifier::new(name, span)))
            }
            Some(Token::LParen) => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(&Token::RParen)?;
                Ok(self.ctx.expression_factor(inner))
            }
            _ => Err(self.unexpected("an expression")),
        }
    }
}
