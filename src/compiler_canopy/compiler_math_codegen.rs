//java text for expressions,
//infix with single spaces, parentheses only where the source had them

use crate::ast::{Constant, Expression, Factor};

pub fn codegen_constant(constant: &Constant) -> String {
    match constant {
        Constant::Int(n) => n.to_string(),
        Constant::Bool(true) => "true".to_string(),
        Constant::Bool(false) => "false".to_string(),
    }
}

pub fn codegen_factor(factor: &Factor) -> String {
    match factor {
        Factor::Constant(constant) => codegen_constant(constant),
        Factor::Parenthesized(inner) => format!("({})", codegen_expression(inner)),
        Factor::Variable(ident) => ident.name.clone(),
    }
}

pub fn codegen_expression(expr: &Expression) -> String {
    match expr {
        Expression::Binary { op, left, right } => format!(
            "{} {} {}",
            codegen_expression(left),
            op.symbol(),
            codegen_expression(right)
        ),
        Expression::Not(operand) => format!("!{}", codegen_expression(operand)),
        Expression::Factor(factor) => codegen_factor(factor),
    }
}
