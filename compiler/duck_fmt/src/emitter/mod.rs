//! Output Emitter
//!
//! Abstraction for output production during rendering.

/// Trait for emitting rendered output.
pub trait Emitter {
    /// Emit a text fragment.
    fn emit(&mut self, text: &str);

    /// Emit a newline (Unix-style `\n`).
    fn emit_newline(&mut self);

    /// Emit indentation for `level` nesting levels.
    fn emit_indent(&mut self, level: usize);

    /// Emit a single space.
    fn emit_space(&mut self);
}

/// String-based emitter for in-memory rendering.
#[derive(Debug)]
pub struct StringEmitter {
    buffer: String,
    indent_size: usize,
}

impl Default for StringEmitter {
    fn default() -> Self {
        Self::with_indent_size(crate::INDENT_WIDTH)
    }
}

impl StringEmitter {
    /// Create a new string emitter with the default indentation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an emitter indenting `indent_size` spaces per level.
    pub fn with_indent_size(indent_size: usize) -> Self {
        Self {
            buffer: String::new(),
            indent_size,
        }
    }

    /// Get the rendered output.
    pub fn output(self) -> String {
        self.buffer
    }

    /// Get the current buffer contents without consuming.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Remove trailing newlines; rendered code ends at its last character.
    pub fn trim_trailing_newlines(&mut self) {
        while self.buffer.ends_with('\n') {
            self.buffer.pop();
        }
    }
}

impl Emitter for StringEmitter {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn emit_newline(&mut self) {
        self.buffer.push('\n');
    }

    fn emit_indent(&mut self, level: usize) {
        let spaces = level * self.indent_size;
        for _ in 0..spaces {
            self.buffer.push(' ');
        }
    }

    fn emit_space(&mut self) {
        self.buffer.push(' ');
    }
}
