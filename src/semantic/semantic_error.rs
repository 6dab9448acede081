//semantic analysis errors,
//every variant carries the span of the offending name or expression

use crate::ast::{CallKind, VarType};
use crate::lexer_tokenizer::Span;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SemanticError {
    #[error("[ERR-SEM-301] variable '{name}' is already declared")]
    AlreadyDeclared { name: String, span: Span },

    #[error("[ERR-SEM-302] variable '{name}' is not declared")]
    UndeclaredVariable { name: String, span: Span },

    #[error("[ERR-SEM-303] type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("[ERR-SEM-304] '{call}' cannot be called on '{receiver}' of type {var_type}{detail}")]
    InvalidCallForType {
        receiver: String,
        call: &'static str,
        var_type: VarType,
        detail: String,
        span: Span,
    },

    #[error("[ERR-SEM-305] '{name}' of type {var_type} cannot be iterated")]
    InvalidTraversalTarget {
        name: String,
        var_type: VarType,
        span: Span,
    },

    #[error("[ERR-SEM-306] variable '{name}' is used before a value is assigned")]
    UseBeforeAssignment { name: String, span: Span },

    #[error("[ERR-SEM-307] '{name}' is reserved in the generated java and cannot name a variable")]
    ReservedName { name: String, span: Span },
}

impl SemanticError {
    pub fn span(&self) -> Span {
        match self {
            SemanticError::AlreadyDeclared { span, .. }
            | SemanticError::UndeclaredVariable { span, .. }
            | SemanticError::TypeMismatch { span, .. }
            | SemanticError::InvalidCallForType { span, .. }
            | SemanticError::InvalidTraversalTarget { span, .. }
            | SemanticError::UseBeforeAssignment { span, .. }
            | SemanticError::ReservedName { span, .. } => *span,
        }
    }

    pub fn suggestion(&self) -> Option<String> {
        match self {
            SemanticError::UseBeforeAssignment { name, .. } => Some(format!(
                "assign '{}' before this point, in the same or an enclosing block",
                name
            )),
            SemanticError::UndeclaredVariable { name, .. } => {
                Some(format!("declare it first, e.g. '{}: int;'", name))
            }
            SemanticError::ReservedName { name, .. } => {
                Some(format!("pick another name, e.g. '{}_value'", name))
            }
            _ => None,
        }
    }

    pub(crate) fn type_mismatch(expected: impl ToString, found: impl ToString, span: Span) -> Self {
        SemanticError::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
            span,
        }
    }

    pub(crate) fn invalid_call(
        receiver: &str,
        call: CallKind,
        var_type: VarType,
        detail: impl Into<String>,
        span: Span,
    ) -> Self {
        SemanticError::InvalidCallForType {
            receiver: receiver.to_string(),
            call: call.method_name(),
            var_type,
            detail: detail.into(),
            span,
        }
    }
}
