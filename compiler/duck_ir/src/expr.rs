//! Expression IR nodes.
//!
//! The IR is the symbolic tree lowering produces and the renderer and the
//! interpreter consume. Nodes are flat: children are `ExprId`s into an
//! [`ExprArena`](crate::ExprArena), lists are `ExprRange`s into the arena's
//! flattened list storage.
//!
//! Variables and parameters have identity: the `ExprId` of the declaring
//! node is reused at every reference, so two `Variable` nodes with the same
//! name are still different variables.

use std::fmt;

use crate::{MemberId, Name};

/// Index into an expression arena.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    /// Create a new `ExprId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        ExprId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

/// A contiguous range of expression IDs in an arena's list storage.
///
/// Used for block variables, block statements, call arguments and lambda
/// parameters.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[repr(C)]
pub struct ExprRange {
    pub start: u32,
    pub len: u16,
}

impl ExprRange {
    /// Empty range constant.
    pub const EMPTY: Self = Self { start: 0, len: 0 };

    /// Create a new range.
    #[inline]
    pub const fn new(start: u32, len: u16) -> Self {
        Self { start, len }
    }

    /// Returns `true` if the range contains no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of elements in the range.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }
}

impl fmt::Debug for ExprRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExprRange({}..{})",
            self.start,
            self.start + u32::from(self.len)
        )
    }
}

/// Target of a `Break`, owned by the `Loop` that declares it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct LabelId(u32);

impl LabelId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        LabelId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Literal values.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Constant {
    Int(i64),
    Bool(bool),
    /// The null reference; typed by the node that holds it.
    Null,
}

/// Expression node kinds.
///
/// The result type of every node is stored next to it in the arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    /// Lambda parameter.
    Parameter { name: Name },
    /// Block-scoped local variable.
    Variable { name: Name },
    Constant(Constant),
    /// `target = value`; yields the assigned value.
    Assign { target: ExprId, value: ExprId },
    /// `target += value`; yields the new value.
    AddAssign { target: ExprId, value: ExprId },
    /// Instance method call.
    Call {
        receiver: ExprId,
        method: MemberId,
        args: ExprRange,
    },
    /// Instance property read through its getter.
    Property { receiver: ExprId, property: MemberId },
    /// Conversion of `operand` to the node's type (boxing or interface cast).
    Convert { operand: ExprId },
    /// `left != right` (reference inequality).
    NotEqual { left: ExprId, right: ExprId },
    /// Sequence of statements with scoped variables; yields the last value.
    Block {
        variables: ExprRange,
        statements: ExprRange,
    },
    IfThen {
        condition: ExprId,
        then_branch: ExprId,
    },
    IfThenElse {
        condition: ExprId,
        then_branch: ExprId,
        else_branch: ExprId,
    },
    /// Infinite loop left through `Break { label: break_label }`.
    Loop { body: ExprId, break_label: LabelId },
    Break { label: LabelId },
    TryFinally { body: ExprId, finally: ExprId },
    Lambda { parameters: ExprRange, body: ExprId },
}

impl ExprKind {
    /// Whether this node declares a variable or parameter.
    #[inline]
    pub fn is_binding(&self) -> bool {
        matches!(self, ExprKind::Parameter { .. } | ExprKind::Variable { .. })
    }
}
