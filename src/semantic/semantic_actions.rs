//one action per grammar reduction, called by the parser in post-order.
//each action numbers the reduction, runs the rules for the node and returns it

use super::compilation_context::CompilationContext;
use super::semantic_error::SemanticError;
use crate::ast::*;
use crate::lexer_tokenizer::Span;
use tracing::debug;

impl CompilationContext {
    pub fn integer_constant(&mut self, value: i32) -> Constant {
        self.next_step();
        debug!(value, "integer_constant");
        Constant::Int(value)
    }

    pub fn boolean_constant(&mut self, value: bool) -> Constant {
        self.next_step();
        debug!(value, "boolean_constant");
        Constant::Bool(value)
    }

    pub fn constant_factor(&mut self, constant: Constant) -> Factor {
        self.next_step();
        debug!("constant_factor");
        Factor::Constant(constant)
    }

    pub fn expression_factor(&mut self, inner: Expression) -> Factor {
        self.next_step();
        debug!("expression_factor");
        Factor::Parenthesized(Box::new(inner))
    }

    pub fn variable_factor(&mut self, ident: Identifier) -> Factor {
        self.next_step();
        debug!(name = %ident.name, "variable_factor");
        self.record_use(&ident);
        Factor::Variable(ident)
    }

    pub fn factor_expression(&mut self, factor: Factor) -> Expression {
        self.next_step();
        debug!("factor_expression");
        Expression::Factor(factor)
    }

    pub fn binary_expression(
        &mut self,
        op: BinaryOperator,
        left: Expression,
        right: Expression,
        span: Span,
    ) -> Result<Expression, SemanticError> {
        self.next_step();
        debug!(op = op.symbol(), "binary_expression");
        self.check_binary(op, &left, &right, span)?;
        Ok(Expression::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn not_expression(&mut self, operand: Expression, span: Span) -> Result<Expression, SemanticError> {
        self.next_step();
        debug!("not_expression");
        self.require(&operand, VarType::Bool, span)?;
        Ok(Expression::Not(Box::new(operand)))
    }

    pub fn function_call(
        &mut self,
        receiver: Identifier,
        kind: CallKind,
        argument: Option<Expression>,
        span: Span,
    ) -> Result<FunctionCall, SemanticError> {
        self.next_step();
        debug!(receiver = %receiver.name, call = kind.method_name(), "function_call");
        let call = FunctionCall {
            receiver,
            kind,
            argument,
        };
        self.check_call(&call, span)?;
        Ok(call)
    }

    pub fn assignment(
        &mut self,
        target: Identifier,
        value: AssignedValue,
        span: Span,
    ) -> Result<Assignment, SemanticError> {
        self.next_step();
        debug!(target = %target.name, "assignment");
        self.check_assignment(&target, &value, span)?;
        Ok(Assignment { target, value })
    }

    pub fn declaration(
        &mut self,
        name: Identifier,
        var_type: VarType,
        init: Option<AssignedValue>,
        span: Span,
    ) -> Result<Declaration, SemanticError> {
        self.next_step();
        debug!(name = %name.name, %var_type, initialized = init.is_some(), "declaration");
        self.check_declaration(&name, var_type, init.as_ref(), span)?;
        let assignment = init.map(|value| Assignment {
            target: name.clone(),
            value,
        });
        Ok(Declaration {
            name,
            var_type,
            assignment,
        })
    }

    pub fn if_statement(
        &mut self,
        condition: Expression,
        then_block: Block,
        else_block: Option<Block>,
        condition_span: Span,
    ) -> Result<IfStatement, SemanticError> {
        self.next_step();
        debug!(has_else = else_block.is_some(), "if_statement");
        self.check_condition(&condition, condition_span)?;
        Ok(IfStatement {
            condition,
            then_block,
            else_block,
        })
    }

    pub fn range_expression(
        &mut self,
        start: Expression,
        end: Expression,
        span: Span,
    ) -> Result<RangeExpression, SemanticError> {
        self.next_step();
        debug!("range_expression");
        self.check_range(&start, &end, span)?;
        Ok(RangeExpression { start, end })
    }

    // Mid-rule action, runs after the range and before the loop body
    pub fn for_header(&mut self, variable: &Identifier) -> Result<(), SemanticError> {
        self.next_step();
        debug!(variable = %variable.name, "for_header");
        self.declare_loop_variable(variable)
    }

    pub fn for_statement(
        &mut self,
        variable: Identifier,
        range: RangeExpression,
        block: Block,
    ) -> ForStatement {
        self.next_step();
        debug!(variable = %variable.name, "for_statement");
        self.finish_loop();
        ForStatement {
            variable,
            range,
            block,
        }
    }

    pub fn iterate_statement(
        &mut self,
        target: Identifier,
        order: TraversalOrder,
    ) -> Result<IterateStatement, SemanticError> {
        self.next_step();
        debug!(target = %target.name, order = order.method_name(), "iterate_statement");
        self.check_iterate(&target)?;
        Ok(IterateStatement { target, order })
    }

    // Mid-rule action on '{'
    pub fn begin_block(&mut self) {
        debug!("begin_block");
        self.open_scope();
    }

    pub fn block(&mut self, statements: Vec<Statement>) -> Block {
        self.next_step();
        debug!(statements = statements.len(), "block");
        self.close_scope();
        Block { statements }
    }

    // Root reduction, the deferred checks run once the whole program exists
    pub fn program(&mut self, statements: Vec<Statement>) -> Result<Program, SemanticError> {
        self.next_step();
        debug!(statements = statements.len(), step = self.step(), "program");
        self.validate_pending_uses()?;
        Ok(Program { statements })
    }
}
