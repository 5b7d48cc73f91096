//! Duck Formatter
//!
//! Renders lowered expression trees as readable C#-style statements, the
//! way a host compiler would print its own `foreach` lowering:
//!
//! ```text
//! var enumerator = enumerable.GetEnumerator();
//! try
//! {
//!     ...
//! }
//! finally
//! {
//!     ((IDisposable)enumerator).Dispose();
//! }
//!
//! return sum;
//! ```
//!
//! # Modules
//!
//! - [`emitter`]: Output abstraction
//! - [`formatter`]: Statement and expression rendering

pub mod emitter;
pub mod formatter;

use duck_ir::{ExprArena, ExprId};
use duck_types::TypeRegistry;

pub use emitter::{Emitter, StringEmitter};
pub use formatter::Formatter;

/// Spaces per indentation level.
pub const INDENT_WIDTH: usize = 4;

/// Configuration for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatConfig {
    /// Indentation size in spaces.
    pub indent_size: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent_size: INDENT_WIDTH,
        }
    }
}

impl FormatConfig {
    /// Create a new config with the specified indent size.
    pub fn with_indent_size(indent_size: usize) -> Self {
        Self { indent_size }
    }
}

/// Render the body of a lambda (or any statement tree) as C#-style text.
///
/// When the body yields a value, its last statement is rendered as
/// `return <value>;`. The output has no trailing newline.
pub fn format_lambda_body(arena: &ExprArena, registry: &TypeRegistry, root: ExprId, config: FormatConfig) -> String {
    let mut formatter = Formatter::new(arena, registry, StringEmitter::with_indent_size(config.indent_size));
    formatter.lambda_body(root);
    let mut emitter = formatter.finish();
    emitter.trim_trailing_newlines();
    emitter.output()
}
