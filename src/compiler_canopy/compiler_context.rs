//generator state: the output sink and the current indentation level,
//four spaces per level

use std::fmt;

const INDENT: &str = "    ";

pub struct Compiler<'w> {
    sink: &'w mut dyn fmt::Write,
    pub indent: usize,
    lines: usize,
}

impl<'w> Compiler<'w> {
    pub fn new(sink: &'w mut dyn fmt::Write) -> Self {
        Self {
            sink,
            indent: 0,
            lines: 0,
        }
    }

    // Writes one line at the current indentation
    pub fn line(&mut self, text: &str) -> fmt::Result {
        for _ in 0..self.indent {
            self.sink.write_str(INDENT)?;
        }
        self.raw_line(text)
    }

    pub fn raw_line(&mut self, text: &str) -> fmt::Result {
        self.lines += 1;
        self.sink.write_str(text)?;
        self.sink.write_char('\n')
    }

    pub fn with_indent<F>(&mut self, level: usize, body: F) -> fmt::Result
    where
        F: FnOnce(&mut Self) -> fmt::Result,
    {
        let saved = self.indent;
        self.indent = level;
        let result = body(self);
        self.indent = saved;
        result
    }

    // Writes `header {` and moves one level deeper
    pub fn open(&mut self, header: &str) -> fmt::Result {
        self.line(&format!("{} {{", header))?;
        self.indent += 1;
        Ok(())
    }

    // Moves one level out and writes the closing line, `}` or `} else {`
    pub fn close(&mut self, closing: &str) -> fmt::Result {
        self.indent = self.indent.saturating_sub(1);
        self.line(closing)
    }

    pub fn lines_written(&self) -> usize {
        self.lines
    }
}
