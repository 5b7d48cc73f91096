//! Duck Eval - tree-walking interpreter for lowered expression trees.
//!
//! Executes the IR produced by `duck_lower` against a [`Heap`] of objects
//! and a [`NativeMethods`] table that supplies the bodies of registered
//! members. There is no compilation step: nodes are evaluated in place.
//!
//! # Dispatch
//!
//! A call to an interface member (`IDisposable.Dispose`, `IEnumerator<T>.Current`)
//! runs the implementation found on the receiver's runtime type through
//! `TypeRegistry::find_implementation`. Calls to class or struct members run
//! the most derived public member with the same signature.
//!
//! # Values
//!
//! Struct instances live on the heap like class instances, so boxing
//! (`Convert`) passes the same handle through.

mod environment;
mod error;
mod heap;
mod interpreter;
mod natives;
mod value;

pub use environment::{BindingError, Environment};
pub use error::{EvalError, EvalResult};
pub use heap::{ArrayRef, Heap, Object, ObjectRef};
pub use interpreter::Interpreter;
pub use natives::{NativeFn, NativeMethods};
pub use value::Value;
