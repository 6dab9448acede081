//arbor compiler library,
//tree-oriented source in, a single java class out

pub mod ast;
pub mod compiler_canopy;
pub mod diagnostic;
pub mod error;
pub mod lexer_tokenizer;
pub mod parser;
pub mod semantic;

pub use compiler_canopy::GeneratorOptions;
pub use error::{CompileError, ErrorCode};
pub use semantic::CompilationContext;

use ast::Program;
use lexer_tokenizer::lex_with_span;
use parser::Parser;

/// Lexes and parses `source`, running every semantic check along the way.
///
/// The returned program has passed the deferred used-before-assigned pass
/// and can be handed to the generator as is.
pub fn parse(source: &str, ctx: &mut CompilationContext) -> Result<Program, CompileError> {
    let tokens = lex_with_span(source)?;
    tracing::info!(tokens = tokens.len(), "lexing finished");
    let program = Parser::new(&tokens, ctx).parse_program()?;
    tracing::info!(
        statements = program.statements.len(),
        symbols = ctx.symbols().len(),
        "parsing and semantic analysis finished"
    );
    Ok(program)
}

pub fn compile_with(
    source: &str,
    ctx: &mut CompilationContext,
    options: &GeneratorOptions,
) -> Result<String, CompileError> {
    let program = parse(source, ctx)?;
    Ok(compiler_canopy::generate_to_string(&program, options))
}

/// Compiles `source` to the text of a `Main` java class.
pub fn compile(source: &str) -> Result<String, CompileError> {
    let mut ctx = CompilationContext::new();
    compile_with(source, &mut ctx, &GeneratorOptions::default())
}
