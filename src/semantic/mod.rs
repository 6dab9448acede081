pub mod compilation_context;
pub mod pending_uses;
pub mod semantic_actions;
pub mod semantic_analysis;
pub mod semantic_error;
pub mod symbol_table;

pub use compilation_context::CompilationContext;
pub use semantic_error::SemanticError;
