//! Typed AST node definitions.
//!
//! Every expression carries its static type (a [`TypeId`]) and, where it
//! refers to a field, method or constructor, the resolved [`MemberId`].
//! The erasure core never re-runs type checking: what the arena says is
//! what downstream passes emit.

use bitflags::bitflags;

use crate::{ExprId, ExprRange, LocalId, MemberId, Name, Span, StmtId, StmtRange, TypeId};

mod decl;

pub use decl::{ClassDecl, CompilationUnit, MemberDecl, MemberDeclKind};

/// Typed expression node.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: TypeId,
    pub span: Span,
}

impl Expr {
    #[inline]
    pub const fn new(kind: ExprKind, ty: TypeId, span: Span) -> Self {
        Expr { kind, ty, span }
    }
}

/// Target of a field access or call.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Receiver {
    /// Instance receiver.
    Expr(ExprId),
    /// Static access through the named type.
    Type(TypeId),
}

impl Receiver {
    /// The receiver expression, if the access is not static.
    #[inline]
    pub const fn expr(self) -> Option<ExprId> {
        match self {
            Receiver::Expr(e) => Some(e),
            Receiver::Type(_) => None,
        }
    }
}

/// How a call site reaches its target.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Dispatch {
    /// Static method: no receiver.
    Static,
    /// Known target: private, final, or a method of a final class.
    Direct,
    /// Through the interface method table.
    Interface,
    /// Through the class dispatch vector.
    Virtual,
}

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    UShr,
    CondAnd,
    CondOr,
}

impl BinaryOp {
    /// Operator token, for diagnostics.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::UShr => ">>>",
            BinaryOp::CondAnd => "&&",
            BinaryOp::CondOr => "||",
        }
    }

    /// Whether the operator yields `boolean` regardless of operand types.
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq
                | BinaryOp::NotEq
                | BinaryOp::Lt
                | BinaryOp::LtEq
                | BinaryOp::Gt
                | BinaryOp::GtEq
                | BinaryOp::CondAnd
                | BinaryOp::CondOr
        )
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Neg,
    Not,
    BitNot,
}

/// Expression kinds.
///
/// All children are arena ids, so the enum is `Copy` and the arena can be
/// rewritten in place.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ExprKind {
    Bool(bool),
    Int(i64),
    /// IEEE bits; the node type says whether this is `float` or `double`.
    Float(u64),
    /// One UTF-16 code unit.
    Char(u16),
    /// String literal text. Removed by string conversion.
    Str(Name),
    Null,

    Local(LocalId),
    Field {
        receiver: Receiver,
        field: MemberId,
    },
    ArrayAccess {
        base: ExprId,
        index: ExprId,
        /// Bounds and null checks have been emitted for this access.
        guarded: bool,
    },

    Call {
        receiver: Receiver,
        method: MemberId,
        args: ExprRange,
        dispatch: Dispatch,
    },
    /// Object allocation followed by a constructor call.
    New {
        ctor: MemberId,
        /// Enclosing instance for inner classes, or `INVALID`.
        outer: ExprId,
        args: ExprRange,
    },
    /// One-dimensional array built from an initializer list.
    /// The node type is the array type.
    NewArray {
        elems: ExprRange,
    },

    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    Unary {
        op: UnaryOp,
        operand: ExprId,
    },
    Cast {
        expr: ExprId,
        target: TypeId,
    },
    InstanceOf {
        expr: ExprId,
        target: TypeId,
    },
    ClassLit(TypeId),
    Assign {
        target: ExprId,
        value: ExprId,
    },
    /// `this`, or `Outer.this` when the node type names an enclosing class.
    This,
    /// Statements evaluated for effect, then the value of `expr`.
    ESeq {
        stmts: StmtRange,
        expr: ExprId,
    },
}

impl ExprKind {
    /// Whether the node is a literal constant.
    pub const fn is_literal(&self) -> bool {
        matches!(
            self,
            ExprKind::Bool(_)
                | ExprKind::Int(_)
                | ExprKind::Float(_)
                | ExprKind::Char(_)
                | ExprKind::Str(_)
                | ExprKind::Null
        )
    }

    /// Whether the node can appear on the left of an assignment.
    pub const fn is_lvalue(&self) -> bool {
        matches!(
            self,
            ExprKind::Local(_) | ExprKind::Field { .. } | ExprKind::ArrayAccess { .. }
        )
    }
}

/// Typed statement node.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    #[inline]
    pub const fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

/// `this(...)` or `super(...)` at the head of a constructor body.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ConstructorCallKind {
    This,
    Super,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum StmtKind {
    /// Declare a local; `init` may be `INVALID`.
    LocalDecl {
        local: LocalId,
        init: ExprId,
    },
    Eval(ExprId),
    If {
        cond: ExprId,
        then_branch: StmtId,
        /// `INVALID` when there is no else branch.
        else_branch: StmtId,
    },
    Block(StmtRange),
    /// `INVALID` for a bare `return`.
    Return(ExprId),
    Throw(ExprId),
    ConstructorCall {
        kind: ConstructorCallKind,
        ctor: MemberId,
        args: ExprRange,
    },
}

bitflags! {
    /// Local variable properties.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct LocalFlags: u8 {
        const FINAL = 1 << 0;
        /// Compiler-introduced temporary.
        const TEMP = 1 << 1;
        /// Assigned exactly once; may live in a register.
        const SSA = 1 << 2;
    }
}

/// Local variable or formal parameter.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct LocalDef {
    pub name: Name,
    pub ty: TypeId,
    pub flags: LocalFlags,
}

