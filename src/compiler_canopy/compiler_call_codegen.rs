//java code for tree operations and traversals

use super::compiler_context::Compiler;
use super::compiler_math_codegen::codegen_expression;
use crate::ast::{CallKind, FunctionCall, IterateStatement};
use std::fmt;

pub fn codegen_call(call: &FunctionCall) -> String {
    let argument = match (&call.argument, call.kind) {
        (Some(arg), CallKind::Calculate) => format!("\"{}\"", codegen_expression(arg)),
        (Some(arg), _) => codegen_expression(arg),
        (None, _) => String::new(),
    };
    format!(
        "{}.{}({})",
        call.receiver.name,
        call.kind.method_name(),
        argument
    )
}

pub fn codegen_call_statement(c: &mut Compiler, call: &FunctionCall) -> fmt::Result {
    c.line(&format!("{};", codegen_call(call)))
}

pub fn codegen_iterate(c: &mut Compiler, stmt: &IterateStatement) -> fmt::Result {
    c.line(&format!(
        "{}.{}();",
        stmt.target.name,
        stmt.order.method_name()
    ))
}
