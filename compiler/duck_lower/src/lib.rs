//! Duck Lower - `foreach`/`using` lowering into the expression IR.
//!
//! # Pipeline Position
//!
//! ```text
//! TypeRegistry → ShapeDetector / classify_disposal → **Lower** → duck_eval / duck_fmt
//! ```
//!
//! Entry points live on [`Builder`]:
//! - [`Builder::lower_foreach`]: the full `foreach` over a detected enumerable
//! - [`Builder::using`]: `try`/`finally` disposal of a variable
//! - [`Builder::while_loop`]: `while` as a loop with a labelled break
//!
//! Lowering either returns the root node or a [`LowerError`]; it never returns
//! a partial tree.

mod builder;
mod error;
mod foreach;
mod using;

pub use builder::Builder;
pub use error::{LowerError, MissingMember};
pub use foreach::{ForEachPlan, LoopBinding};
