//! Expression arena.
//!
//! Struct-of-arrays storage: parallel `kinds` and `types` arrays indexed by
//! [`ExprId`], plus a flat `Vec<ExprId>` for lists indexed by [`ExprRange`].

use crate::{ExprId, ExprKind, ExprRange, LabelId, TypeId};

/// Convert a length to `u32`, panicking with context on overflow.
#[inline]
fn to_u32(len: usize, what: &str) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("too many {what}: {len} exceeds u32::MAX"))
}

/// Convert a length to `u16`, panicking with context on overflow.
#[inline]
fn to_u16(len: usize, what: &str) -> u16 {
    u16::try_from(len).unwrap_or_else(|_| panic!("{what} too long: {len} exceeds u16::MAX"))
}

/// Arena for expression nodes.
#[derive(Clone, Debug, Default)]
pub struct ExprArena {
    /// Node kinds (parallel with `types`).
    kinds: Vec<ExprKind>,
    /// Result type of each node (parallel with `kinds`).
    types: Vec<TypeId>,
    /// Flattened expression ID lists for ranges.
    expr_lists: Vec<ExprId>,
    /// Next free break label.
    next_label: u32,
}

impl ExprArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node, returning its ID.
    pub fn push(&mut self, kind: ExprKind, ty: TypeId) -> ExprId {
        let id = ExprId::new(to_u32(self.kinds.len(), "expressions"));
        self.kinds.push(kind);
        self.types.push(ty);
        id
    }

    /// Get the kind of a node.
    #[inline]
    pub fn kind(&self, id: ExprId) -> &ExprKind {
        &self.kinds[id.index()]
    }

    /// Get the result type of a node.
    #[inline]
    pub fn ty(&self, id: ExprId) -> TypeId {
        self.types[id.index()]
    }

    /// Number of allocated nodes.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Returns `true` if no nodes have been allocated.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Allocate a contiguous range of expression IDs.
    pub fn push_expr_list(&mut self, ids: &[ExprId]) -> ExprRange {
        if ids.is_empty() {
            return ExprRange::EMPTY;
        }
        let start = to_u32(self.expr_lists.len(), "expression lists");
        self.expr_lists.extend_from_slice(ids);
        ExprRange::new(start, to_u16(ids.len(), "expression list"))
    }

    /// Get expression IDs from a range.
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        if range.is_empty() {
            return &[];
        }
        let start = range.start as usize;
        &self.expr_lists[start..start + range.len()]
    }

    /// Allocate a fresh break label.
    pub fn fresh_label(&mut self) -> LabelId {
        let label = LabelId::new(self.next_label);
        self.next_label += 1;
        label
    }
}
