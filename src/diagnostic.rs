//renders an error against its source: message, offending line, caret underline

use crate::error::CompileError;
use std::fmt::{self, Display, Formatter};

pub struct Diagnostic<'a> {
    pub error: &'a CompileError,
    pub src: &'a str,
}

impl<'a> Diagnostic<'a> {
    pub fn new(error: &'a CompileError, src: &'a str) -> Self {
        Self { error, src }
    }

    // 1-based line and column of the error start
    pub fn location(&self) -> (usize, usize) {
        let start = self.error.span().start.min(self.src.len());
        let before = &self.src[..start];
        let line = before.chars().filter(|&c| c == '\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() + 1;
        (line, column)
    }
}

impl Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let src = self.src;
        let span = self.error.span();
        let start = span.start.min(src.len());
        let end = span.end.clamp(start, src.len());
        let (line_num, column) = self.location();

        writeln!(f, "{}", self.error)?;
        writeln!(f, "  --> {}:{}", line_num, column)?;

        let line_start = src[..start].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let line_end = src[start..].find('\n').map(|i| start + i).unwrap_or(src.len());
        let line_text = &src[line_start..line_end];
        let underline_end = end.min(line_end);
        let width = src[start..underline_end].chars().count().max(1);

        writeln!(f, "{:>4} | {}", line_num, line_text)?;
        writeln!(f, "     | {}{}", " ".repeat(column - 1), "^".repeat(width))?;

        if let Some(suggestion) = self.error.suggestion() {
            writeln!(f, "Suggestion: {}", suggestion)?;
        }
        Ok(())
    }
}
