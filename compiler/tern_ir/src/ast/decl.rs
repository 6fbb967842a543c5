//! Class and member declarations.

use crate::{ClassId, ExprArena, ExprId, LocalId, MemberId, Span, StmtId};

/// Body-bearing part of a member declaration.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum MemberDeclKind {
    Method {
        formals: Vec<LocalId>,
        /// `INVALID` for abstract and interface methods.
        body: StmtId,
    },
    Constructor {
        formals: Vec<LocalId>,
        body: StmtId,
    },
    Field {
        /// `INVALID` when the field has no initializer.
        init: ExprId,
    },
    Initializer {
        body: StmtId,
    },
}

/// Member declaration: the [`MemberId`] instance plus its body.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct MemberDecl {
    pub member: MemberId,
    pub kind: MemberDeclKind,
    pub span: Span,
}

/// Class declaration and the members it declares.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ClassDecl {
    pub class: ClassId,
    pub members: Vec<MemberDecl>,
    pub span: Span,
}

/// Typed AST for one compilation unit.
#[derive(Clone, Default, Debug)]
pub struct CompilationUnit {
    pub arena: ExprArena,
    pub classes: Vec<ClassDecl>,
}

impl CompilationUnit {
    pub fn new() -> Self {
        Self::default()
    }
}
