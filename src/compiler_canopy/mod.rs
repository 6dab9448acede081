//java code generation kernel,
//all emitters are designated here, and also the walk that
//turns a checked Program into the source of a single java class

use crate::ast::{Program, Statement};
use std::fmt;

pub mod compiler_call_codegen;
pub mod compiler_context;
pub mod compiler_if_codegen;
pub mod compiler_loop_codegen;
pub mod compiler_math_codegen;
pub mod compiler_variable_codegen;

use compiler_context::Compiler;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub class_name: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            class_name: "Main".to_string(),
        }
    }
}

pub fn codegen_statement(compiler: &mut Compiler, stmt: &Statement) -> fmt::Result {
    match stmt {
        Statement::Declaration(decl) => compiler_variable_codegen::codegen_declaration(compiler, decl),
        Statement::Assignment(assignment) => {
            compiler_variable_codegen::codegen_assignment(compiler, assignment)
        }
        Statement::FunctionCall(call) => compiler_call_codegen::codegen_call_statement(compiler, call),
        Statement::Iterate(iterate) => compiler_call_codegen::codegen_iterate(compiler, iterate),
        Statement::If(stmt) => compiler_if_codegen::codegen_if(compiler, stmt),
        Statement::For(stmt) => compiler_loop_codegen::codegen_for(compiler, stmt),
    }
}

pub fn codegen_statements(compiler: &mut Compiler, statements: &[Statement]) -> fmt::Result {
    for stmt in statements {
        codegen_statement(compiler, stmt)?;
    }
    Ok(())
}

// Writes the whole class: imports, main method with the program body, closing braces
pub fn generate<W: fmt::Write>(
    program: &Program,
    options: &GeneratorOptions,
    sink: &mut W,
) -> fmt::Result {
    tracing::debug!(
        statements = program.statements.len(),
        class = %options.class_name,
        "java generation started"
    );
    let mut compiler = Compiler::new(sink);
    compiler.raw_line("import java.util.*;")?;
    compiler.raw_line("import java.io.IOException;")?;
    compiler.raw_line("")?;
    compiler.raw_line(&format!("public class {} {{", options.class_name))?;
    compiler.with_indent(1, |c| {
        c.line("public static void main(String[] args) throws IOException {")?;
        c.with_indent(2, |c| codegen_statements(c, &program.statements))?;
        c.line("}")
    })?;
    compiler.raw_line("}")?;
    tracing::debug!(lines = compiler.lines_written(), "java generation finished");
    Ok(())
}

pub fn generate_to_string(program: &Program, options: &GeneratorOptions) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = generate(program, options, &mut out);
    out
}
