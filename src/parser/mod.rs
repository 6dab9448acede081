pub mod parser_error;
pub mod parser_expression;
pub mod parser_kernel;
pub mod parser_statement;

pub use parser_kernel::Parser;
