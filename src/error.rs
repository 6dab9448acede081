//top level compile error, every failure of the pipeline ends up here

use crate::lexer_tokenizer::Span;
use crate::parser::parser_error::{ParseError, ParseErrorKind};
use crate::semantic::SemanticError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    MalformedToken,
    UnexpectedToken,
    AlreadyDeclared,
    UndeclaredVariable,
    TypeMismatch,
    InvalidCallForType,
    InvalidTraversalTarget,
    UseBeforeAssignment,
    ReservedName,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Semantic(#[from] SemanticError),
}

impl CompileError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CompileError::Parse(e) => match e.kind {
                ParseErrorKind::MalformedToken => ErrorCode::MalformedToken,
                ParseErrorKind::UnexpectedToken => ErrorCode::UnexpectedToken,
            },
            CompileError::Semantic(e) => match e {
                SemanticError::AlreadyDeclared { .. } => ErrorCode::AlreadyDeclared,
                SemanticError::UndeclaredVariable { .. } => ErrorCode::UndeclaredVariable,
                SemanticError::TypeMismatch { .. } => ErrorCode::TypeMismatch,
                SemanticError::InvalidCallForType { .. } => ErrorCode::InvalidCallForType,
                SemanticError::InvalidTraversalTarget { .. } => ErrorCode::InvalidTraversalTarget,
                SemanticError::UseBeforeAssignment { .. } => ErrorCode::UseBeforeAssignment,
                SemanticError::ReservedName { .. } => ErrorCode::ReservedName,
            },
        }
    }

    pub fn span(&self) -> Span {
        match self {
            CompileError::Parse(e) => e.span,
            CompileError::Semantic(e) => e.span(),
        }
    }

    pub fn suggestion(&self) -> Option<String> {
        match self {
            CompileError::Parse(e) => e.suggestion.clone(),
            CompileError::Semantic(e) => e.suggestion(),
        }
    }

    // Pipeline stage the error belongs to, shown by the cli
    pub fn stage(&self) -> &'static str {
        match self.code() {
            ErrorCode::MalformedToken => "Lexer",
            ErrorCode::UnexpectedToken => "Parser",
            _ => "Semantic",
        }
    }
}
