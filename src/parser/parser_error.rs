//errors raised while turning source text into reductions,
//both malformed tokens and grammar violations are fatal

use crate::lexer_tokenizer::{LexErrorKind, Span, Token};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    MalformedToken,
    UnexpectedToken,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub span: Span,
    pub suggestion: Option<String>,
}

impl ParseError {
    pub fn malformed(kind: LexErrorKind, text: &str, span: Span) -> Self {
        let (message, suggestion) = match kind {
            LexErrorKind::IntegerOverflow => (
                format!("[ERR-LEX-101] integer literal '{}' does not fit in 32 bits", text),
                Some(format!("use a value between 0 and {}", i32::MAX)),
            ),
            LexErrorKind::UnknownCharacter => (
                format!("[ERR-LEX-102] unexpected character '{}'", text),
                None,
            ),
        };
        ParseError {
            kind: ParseErrorKind::MalformedToken,
            message,
            span,
            suggestion,
        }
    }

    pub fn unexpected(expected: &str, found: &Token, span: Span) -> Self {
        let suggestion = match found {
            Token::RBrace | Token::Identifier(_) if expected.contains("';'") => {
                Some("the previous statement may be missing a ';'".to_string())
            }
            _ => None,
        };
        ParseError {
            kind: ParseErrorKind::UnexpectedToken,
            message: format!("[ERR-SYN-201] expected {}, found {}", expected, found),
            span,
            suggestion,
        }
    }

    pub fn eof(expected: &str, span: Span) -> Self {
        ParseError {
            kind: ParseErrorKind::UnexpectedToken,
            message: format!("[ERR-SYN-202] expected {}, found end of input", expected),
            span,
            suggestion: None,
        }
    }
}
