//java code for conditions

use super::codegen_statements;
use super::compiler_context::Compiler;
use super::compiler_math_codegen::codegen_expression;
use crate::ast::IfStatement;
use std::fmt;

pub fn codegen_if(c: &mut Compiler, stmt: &IfStatement) -> fmt::Result {
    c.open(&format!("if ({})", codegen_expression(&stmt.condition)))?;
    codegen_statements(c, &stmt.then_block.statements)?;
    if let Some(else_block) = &stmt.else_block {
        c.close("} else {")?;
        c.indent += 1;
        codegen_statements(c, &else_block.statements)?;
    }
    c.close("}")
}
