//java code for ranged loops, the end bound is exclusive

use super::codegen_statements;
use super::compiler_context::Compiler;
use super::compiler_math_codegen::codegen_expression;
use crate::ast::ForStatement;
use std::fmt;

pub fn codegen_for(c: &mut Compiler, stmt: &ForStatement) -> fmt::Result {
    let var = &stmt.variable.name;
    c.open(&format!(
        "for (int {var} = {}; {var} < {}; {var}++)",
        codegen_expression(&stmt.range.start),
        codegen_expression(&stmt.range.end),
    ))?;
    codegen_statements(c, &stmt.block.statements)?;
    c.close("}")
}
