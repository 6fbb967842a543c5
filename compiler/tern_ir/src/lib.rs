//! Tern IR - handles and the typed AST.
//!
//! This crate holds the data the erasure core consumes from the (external)
//! front end and hands on to instruction emission:
//! - Names for interned identifiers
//! - Typed handles (`TypeId`, `ClassId`, `MemberId`, `LocalId`) into the
//!   tables owned by `tern_types` and the AST arena
//! - The flat AST: expressions, statements and declarations, every
//!   expression stamped with its static type and resolved member
//!
//! # Design
//!
//! - **Intern everything**: strings become `Name(u32)`, types `TypeId(u32)`
//! - **Flatten everything**: no `Box<Expr>`, children are `ExprId(u32)`
//! - **Typed from birth**: the arena has no "unresolved" state; synthetic
//!   nodes are indistinguishable from source-derived ones

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
pub mod ast;
mod expr_id;
mod handles;
mod interner;
mod name;
mod span;
pub mod visitor;

pub use arena::ExprArena;
pub use ast::{
    BinaryOp, ClassDecl, CompilationUnit, ConstructorCallKind, Dispatch, Expr, ExprKind,
    LocalDef, LocalFlags, MemberDecl, MemberDeclKind, Receiver, Stmt, StmtKind, UnaryOp,
};
pub use expr_id::{ExprId, ExprRange, StmtId, StmtRange};
pub use handles::{ClassId, LocalId, MemberId, TypeId};
pub use interner::{SharedInterner, StringInterner};
pub use name::Name;
pub use span::Span;

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{ExprId, ExprRange, Receiver, Span, TypeId};
    static_assert_size!(TypeId, 4);
    static_assert_size!(ExprId, 4);
    static_assert_size!(ExprRange, 8);
    static_assert_size!(Receiver, 8);
    static_assert_size!(Span, 8);
}
