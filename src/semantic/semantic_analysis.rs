//semantic analysis,
//the rules every node has to pass when its reduction runs:
//declarations, assignments, expression types, calls, conditions, ranges,
//and the deferred used-before-assigned pass over the whole program

use super::compilation_context::CompilationContext;
use super::pending_uses::Expected;
use super::semantic_error::SemanticError;
use super::symbol_table::{AlreadyDeclared, SymbolEntry};
use crate::ast::*;
use crate::lexer_tokenizer::Span;

#[derive(Debug, Clone, PartialEq)]
pub enum Inferred<'e> {
    Known(VarType),
    // a variable that is not declared yet when the expression is reduced
    Unresolved(&'e Identifier),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallResult {
    Value(VarType),
    // calculate returns a java double
    Numeric,
    Void,
}

impl CallResult {
    pub fn of(kind: CallKind) -> Self {
        match kind {
            CallKind::Height | CallKind::Depth => CallResult::Value(VarType::Int),
            CallKind::Includes => CallResult::Value(VarType::Bool),
            CallKind::Calculate => CallResult::Numeric,
            CallKind::Insert
            | CallKind::Remove
            | CallKind::Visualize
            | CallKind::Add
            | CallKind::Sub => CallResult::Void,
        }
    }
}

// java keywords and literals, plus the parameter of the generated main
const RESERVED_NAMES: &[&str] = &[
    "abstract", "args", "assert", "boolean", "break", "byte", "case", "catch", "char",
    "class", "const", "continue", "default", "do", "double", "else", "enum", "extends",
    "false", "final", "finally", "float", "for", "goto", "if", "implements", "import",
    "instanceof", "int", "interface", "long", "native", "new", "null", "package",
    "private", "protected", "public", "return", "short", "static", "strictfp", "super",
    "switch", "synchronized", "this", "throw", "throws", "transient", "true", "try",
    "void", "volatile", "while", "yield", "_",
];

fn check_local_name(name: &Identifier) -> Result<(), SemanticError> {
    if RESERVED_NAMES.contains(&name.name.as_str()) {
        return Err(SemanticError::ReservedName {
            name: name.name.clone(),
            span: name.span,
        });
    }
    Ok(())
}

fn already_declared(name: &Identifier) -> SemanticError {
    SemanticError::AlreadyDeclared {
        name: name.name.clone(),
        span: name.span,
    }
}

fn bare_variable(expr: &Expression) -> Option<&Identifier> {
    match expr {
        Expression::Factor(Factor::Variable(ident)) => Some(ident),
        Expression::Factor(Factor::Parenthesized(inner)) => bare_variable(inner),
        _ => None,
    }
}

impl CompilationContext {
    // Declared and reachable from the block being reduced
    fn visible_symbol(&self, ident: &Identifier) -> Result<&SymbolEntry, SemanticError> {
        self.symbols
            .lookup(&ident.name)
            .filter(|entry| entry.visible_from(self.scope_path()))
            .ok_or_else(|| SemanticError::UndeclaredVariable {
                name: ident.name.clone(),
                span: ident.span,
            })
    }

    pub fn infer_type<'e>(&self, expr: &'e Expression) -> Inferred<'e> {
        match expr {
            Expression::Binary { op, .. } => match op.class() {
                OperatorClass::Arithmetic => Inferred::Known(VarType::Int),
                _ => Inferred::Known(VarType::Bool),
            },
            Expression::Not(_) => Inferred::Known(VarType::Bool),
            Expression::Factor(Factor::Constant(Constant::Int(_))) => Inferred::Known(VarType::Int),
            Expression::Factor(Factor::Constant(Constant::Bool(_))) => {
                Inferred::Known(VarType::Bool)
            }
            Expression::Factor(Factor::Parenthesized(inner)) => self.infer_type(inner),
            Expression::Factor(Factor::Variable(ident)) => match self.symbols.lookup(&ident.name) {
                Some(entry) => Inferred::Known(entry.var_type.value_type()),
                None => Inferred::Unresolved(ident),
            },
        }
    }

    // Known types are checked now, unresolved ones are handed to the worklist
    pub(crate) fn require(
        &mut self,
        expr: &Expression,
        expected: VarType,
        span: Span,
    ) -> Result<(), SemanticError> {
        match self.infer_type(expr) {
            Inferred::Known(found) if found == expected => Ok(()),
            Inferred::Known(found) => Err(SemanticError::type_mismatch(expected, found, span)),
            Inferred::Unresolved(ident) => {
                self.pending.expect(ident, Expected::Type(expected));
                Ok(())
            }
        }
    }

    pub(crate) fn check_binary(
        &mut self,
        op: BinaryOperator,
        left: &Expression,
        right: &Expression,
        span: Span,
    ) -> Result<(), SemanticError> {
        match op.class() {
            OperatorClass::Arithmetic | OperatorClass::Ordering => {
                self.require(left, VarType::Int, span)?;
                self.require(right, VarType::Int, span)
            }
            OperatorClass::Logical => {
                self.require(left, VarType::Bool, span)?;
                self.require(right, VarType::Bool, span)
            }
            OperatorClass::Equality => self.check_equality(left, right, span),
        }
    }

    fn check_equality(
        &mut self,
        left: &Expression,
        right: &Expression,
        span: Span,
    ) -> Result<(), SemanticError> {
        let primitive = |t: VarType, span: Span| {
            if t.is_primitive() {
                Ok(())
            } else {
                Err(SemanticError::type_mismatch("int or bool", t, span))
            }
        };
        match (self.infer_type(left), self.infer_type(right)) {
            (Inferred::Known(l), Inferred::Known(r)) => {
                primitive(l, span)?;
                primitive(r, span)?;
                if l != r {
                    return Err(SemanticError::type_mismatch(l, r, span));
                }
                Ok(())
            }
            (Inferred::Known(l), Inferred::Unresolved(ident))
            | (Inferred::Unresolved(ident), Inferred::Known(l)) => {
                primitive(l, span)?;
                self.pending.expect(ident, Expected::Type(l));
                Ok(())
            }
            (Inferred::Unresolved(l), Inferred::Unresolved(r)) => {
                self.pending.expect(l, Expected::SameAs(r.name.clone()));
                Ok(())
            }
        }
    }

    pub(crate) fn check_value(
        &mut self,
        target: VarType,
        value: &AssignedValue,
        span: Span,
    ) -> Result<(), SemanticError> {
        match value {
            AssignedValue::Expression(expr) => self.require(expr, target, span),
            AssignedValue::Call(call) => match CallResult::of(call.kind) {
                CallResult::Value(found) if found == target => Ok(()),
                CallResult::Numeric if target == VarType::Int => Ok(()),
                CallResult::Value(found) => Err(SemanticError::type_mismatch(target, found, span)),
                CallResult::Numeric => Err(SemanticError::type_mismatch(target, "numeric", span)),
                CallResult::Void => Err(SemanticError::type_mismatch(
                    target,
                    format!("void ('{}' returns nothing)", call.kind.method_name()),
                    span,
                )),
            },
        }
    }

    pub(crate) fn check_declaration(
        &mut self,
        name: &Identifier,
        var_type: VarType,
        init: Option<&AssignedValue>,
        span: Span,
    ) -> Result<(), SemanticError> {
        check_local_name(name)?;
        let scope = self.scope_path().to_vec();
        self.symbols
            .declare(&name.name, var_type, false, &scope)
            .map_err(|AlreadyDeclared| already_declared(name))?;
        if let Some(value) = init {
            self.check_value(var_type.value_type(), value, span)?;
        }
        if var_type.is_tree() || init.is_some() {
            self.record_assignment(&name.name);
        }
        Ok(())
    }

    pub(crate) fn check_assignment(
        &mut self,
        target: &Identifier,
        value: &AssignedValue,
        span: Span,
    ) -> Result<(), SemanticError> {
        let var_type = self.visible_symbol(target)?.var_type;
        if !matches!(var_type, VarType::Int | VarType::Bool) {
            return Err(SemanticError::type_mismatch(
                "int or bool variable",
                var_type,
                target.span,
            ));
        }
        self.check_value(var_type, value, span)?;
        self.record_assignment(&target.name);
        Ok(())
    }

    pub(crate) fn check_call(&mut self, call: &FunctionCall, span: Span) -> Result<(), SemanticError> {
        let receiver = &call.receiver;
        let var_type = self.visible_symbol(receiver)?.var_type;
        let invalid = |detail: &str| {
            SemanticError::invalid_call(&receiver.name, call.kind, var_type, detail, span)
        };

        let applicable = match call.kind {
            CallKind::Calculate => var_type == VarType::ExpressionTree,
            _ => var_type.is_ordered_tree(),
        };
        if !applicable {
            return Err(invalid(""));
        }

        let argument_check = match (call.kind, &call.argument) {
            (CallKind::Height | CallKind::Visualize, Some(_)) => {
                Err(invalid(" (it takes no argument)"))
            }
            (CallKind::Height | CallKind::Visualize, None) => Ok(()),
            (_, None) => Err(invalid(" (it expects an argument)")),
            (CallKind::Add | CallKind::Sub, Some(arg)) => {
                let Some(other) = bare_variable(arg) else {
                    return Err(SemanticError::type_mismatch(
                        "tree variable",
                        "expression",
                        span,
                    ));
                };
                match self.symbols.lookup(&other.name) {
                    Some(e) if !e.var_type.is_ordered_tree() => Err(SemanticError::type_mismatch(
                        "rbt, avl or bst",
                        e.var_type,
                        other.span,
                    )),
                    _ => Ok(()),
                }
            }
            (_, Some(arg)) => self.require(arg, VarType::Int, span),
        };
        argument_check?;

        self.record_use(receiver);
        Ok(())
    }

    pub(crate) fn check_iterate(&mut self, target: &Identifier) -> Result<(), SemanticError> {
        let var_type = self.visible_symbol(target)?.var_type;
        if !var_type.is_ordered_tree() {
            return Err(SemanticError::InvalidTraversalTarget {
                name: target.name.clone(),
                var_type,
                span: target.span,
            });
        }
        self.record_use(target);
        Ok(())
    }

    pub(crate) fn check_condition(&mut self, condition: &Expression, span: Span) -> Result<(), SemanticError> {
        self.require(condition, VarType::Bool, span)
    }

    pub(crate) fn check_range(
        &mut self,
        start: &Expression,
        end: &Expression,
        span: Span,
    ) -> Result<(), SemanticError> {
        self.require(start, VarType::Int, span)?;
        self.require(end, VarType::Int, span)
    }

    // A finished loop's variable may be reused by a later loop header
    pub(crate) fn declare_loop_variable(&mut self, variable: &Identifier) -> Result<(), SemanticError> {
        check_local_name(variable)?;
        let reusable = self.loop_variables.contains(&variable.name)
            && !self.active_loops.contains(&variable.name);

        // the variable and its header assignment are only visible inside the loop
        self.open_scope();
        let scope = self.scope_path().to_vec();
        if reusable {
            self.symbols.move_to_scope(&variable.name, &scope);
        } else {
            self.symbols
                .declare(&variable.name, VarType::Int, false, &scope)
                .map_err(|AlreadyDeclared| already_declared(variable))?;
            self.loop_variables.insert(variable.name.clone());
        }
        self.active_loops.push(variable.name.clone());
        self.record_assignment(&variable.name);
        Ok(())
    }

    pub(crate) fn finish_loop(&mut self) {
        self.close_scope();
        self.active_loops.pop();
    }

    // Deferred pass, every violation goes to the diagnostics and the first one is returned
    pub fn validate_pending_uses(&mut self) -> Result<(), SemanticError> {
        let mut violations = Vec::new();
        for pending in self.pending.iter() {
            let Some(entry) = self.symbols.lookup(&pending.name) else {
                violations.push(SemanticError::UndeclaredVariable {
                    name: pending.name.clone(),
                    span: pending.span,
                });
                continue;
            };
            let declared = entry.var_type.value_type();
            let mismatch = match &pending.expected {
                Expected::Any => None,
                Expected::Type(expected) if *expected != declared => Some(expected.to_string()),
                Expected::Type(_) => None,
                Expected::SameAs(other) => match self.symbols.lookup(other) {
                    _ if !declared.is_primitive() => Some("int or bool".to_string()),
                    Some(o) if o.var_type.value_type() != declared => {
                        Some(o.var_type.value_type().to_string())
                    }
                    _ => None,
                },
            };
            if let Some(expected) = mismatch {
                violations.push(SemanticError::type_mismatch(expected, declared, pending.span));
                continue;
            }
            if !entry.has_value || !self.assignments.covers(pending) {
                violations.push(SemanticError::UseBeforeAssignment {
                    name: pending.name.clone(),
                    span: pending.span,
                });
            }
        }
        tracing::debug!(
            uses = self.pending.len(),
            violations = violations.len(),
            "validated pending uses"
        );

        let first = violations.first().cloned();
        for violation in violations {
            self.push_diagnostic(violation);
        }
        match first {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str, start: usize) -> Expression {
        Expression::Factor(Factor::Variable(Identifier::new(
            name,
            Span::new(start, start + name.len()),
        )))
    }

    #[test]
    fn infers_through_parentheses_and_constants() {
        let mut ctx = CompilationContext::new();
        ctx.symbols.declare("k", VarType::Constant, true, &[0]).unwrap();
        let paren = Expression::Factor(Factor::Parenthesized(Box::new(var("k", 0))));
        assert_eq!(ctx.infer_type(&paren), Inferred::Known(VarType::Int));
    }

    #[test]
    fn undeclared_variable_is_unresolved() {
        let ctx = CompilationContext::new();
        let expr = var("later", 3);
        assert!(matches!(ctx.infer_type(&expr), Inferred::Unresolved(id) if id.name == "later"));
    }

    #[test]
    fn unresolved_operand_defers_its_type_check() {
        let mut ctx = CompilationContext::new();
        let ident = Identifier::new("y", Span::new(0, 1));
        ctx.next_step();
        ctx.record_use(&ident);
        let expr = Expression::Factor(Factor::Variable(ident));
        assert!(ctx.require(&expr, VarType::Int, Span::new(0, 1)).is_ok());

        ctx.symbols.declare("y", VarType::Bool, true, &[0]).unwrap();
        let err = ctx.validate_pending_uses().unwrap_err();
        assert!(matches!(err, SemanticError::TypeMismatch { .. }));
        assert_eq!(ctx.diagnostics().len(), 1);
    }

    #[test]
    fn java_keywords_and_main_parameter_cannot_be_declared() {
        let mut ctx = CompilationContext::new();
        for name in ["new", "class", "args", "while", "null"] {
            let ident = Identifier::new(name, Span::new(0, name.len()));
            let err = ctx.check_declaration(&ident, VarType::Int, None, ident.span).unwrap_err();
            assert!(matches!(err, SemanticError::ReservedName { .. }), "{}", name);
        }
        assert!(ctx.symbols().is_empty());

        let loop_var = Identifier::new("this", Span::new(4, 8));
        assert!(matches!(
            ctx.declare_loop_variable(&loop_var),
            Err(SemanticError::ReservedName { .. })
        ));
    }

    #[test]
    fn assignment_outside_the_declaring_block_is_undeclared() {
        let mut ctx = CompilationContext::new();
        let value = AssignedValue::Expression(Expression::Factor(Factor::Constant(Constant::Int(5))));
        let x = Identifier::new("x", Span::new(0, 1));

        ctx.open_scope();
        ctx.check_declaration(&x, VarType::Int, None, x.span).unwrap();
        assert!(ctx.check_assignment(&x, &value, x.span).is_ok());
        ctx.close_scope();

        let err = ctx.check_assignment(&x, &value, x.span).unwrap_err();
        assert!(matches!(err, SemanticError::UndeclaredVariable { .. }));
    }

    #[test]
    fn call_results() {
        assert_eq!(CallResult::of(CallKind::Height), CallResult::Value(VarType::Int));
        assert_eq!(CallResult::of(CallKind::Includes), CallResult::Value(VarType::Bool));
        assert_eq!(CallResult::of(CallKind::Calculate), CallResult::Numeric);
        assert_eq!(CallResult::of(CallKind::Visualize), CallResult::Void);
    }
}
