//! Native bodies for registered members.
//!
//! The registry only describes signatures; what a method does (or what a
//! property getter returns) is supplied here, keyed by the member that
//! declares it. Interface members normally have no entry: calls to them
//! dispatch to the implementing member first.

use duck_ir::MemberId;
use rustc_hash::FxHashMap;

use crate::error::EvalResult;
use crate::heap::Heap;
use crate::value::Value;

/// Body of a method or property getter: `(heap, receiver, arguments)`.
pub type NativeFn = Box<dyn Fn(&mut Heap, Value, &[Value]) -> EvalResult<Value> + Send + Sync>;

#[derive(Default)]
pub struct NativeMethods {
    bodies: FxHashMap<MemberId, NativeFn>,
}

impl NativeMethods {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the body of `member`.
    pub fn define<F>(&mut self, member: MemberId, body: F)
    where
        F: Fn(&mut Heap, Value, &[Value]) -> EvalResult<Value> + Send + Sync + 'static,
    {
        self.bodies.insert(member, Box::new(body));
    }

    pub fn get(&self, member: MemberId) -> Option<&NativeFn> {
        self.bodies.get(&member)
    }

    pub fn contains(&self, member: MemberId) -> bool {
        self.bodies.contains_key(&member)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl std::fmt::Debug for NativeMethods {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut members: Vec<_> = self.bodies.keys().copied().collect();
        members.sort_unstable();
        f.debug_struct("NativeMethods").field("members", &members).finish()
    }
}

#[cfg(test)]
mod tests;
