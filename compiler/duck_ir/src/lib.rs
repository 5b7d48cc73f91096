//! Duck IR - shared data structures for enumerable-shape analysis.
//!
//! This crate contains the handles and trees every other phase agrees on:
//! - `Name`: interned identifiers (type names, member names, variable names)
//! - `TypeId` / `MemberId`: handles into the type registry owned by `duck_types`
//! - `ExprArena`: flat arena of expression nodes produced by lowering
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: Strings → Name(u32), types → TypeId(u32)
//! - **Flatten Everything**: No `Box<Expr>`, use `ExprId(u32)` indices
//! - **Read-only metadata**: handles are plain indices; the registry that
//!   owns the entries is never mutated by analysis code

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
mod expr;
mod ids;
mod interner;
mod name;

pub use arena::ExprArena;
pub use expr::{Constant, ExprId, ExprKind, ExprRange, LabelId};
pub use ids::{MemberId, TypeId};
pub use interner::{InternError, SharedInterner, StringInterner, StringLookup};
pub use name::Name;

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{ExprId, MemberId, Name, TypeId};
    static_assert_size!(Name, 4);
    static_assert_size!(TypeId, 4);
    static_assert_size!(MemberId, 4);
    static_assert_size!(ExprId, 4);
}
