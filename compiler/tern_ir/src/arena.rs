//! Flat arena holding one compilation unit's typed AST.
//!
//! Struct-of-arrays layout: expression kinds, types and spans are parallel
//! vectors indexed by [`ExprId`]. Child lists live in flat side tables and
//! are addressed by [`ExprRange`] / [`StmtRange`].
//!
//! Rewriting passes replace nodes in place with [`ExprArena::replace_expr`],
//! so a parent keeps pointing at the same id after its child is lowered.

use crate::ast::{Expr, ExprKind, LocalDef, Stmt, StmtKind};
use crate::{ExprId, ExprRange, LocalId, Span, StmtId, StmtRange, TypeId};

#[cold]
#[inline(never)]
fn overflow(what: &str, len: usize) -> ! {
    panic!("arena overflow: {len} {what} exceeds u32 index space")
}

#[inline]
fn to_u32(len: usize, what: &str) -> u32 {
    match u32::try_from(len) {
        Ok(v) => v,
        Err(_) => overflow(what, len),
    }
}

/// Arena for typed expressions, statements and locals.
#[derive(Clone, Default, Debug)]
pub struct ExprArena {
    kinds: Vec<ExprKind>,
    types: Vec<TypeId>,
    spans: Vec<Span>,
    expr_lists: Vec<ExprId>,
    stmts: Vec<Stmt>,
    stmt_lists: Vec<StmtId>,
    locals: Vec<LocalDef>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    // Expressions

    /// Allocate an expression node.
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_u32(self.kinds.len(), "expressions"));
        self.kinds.push(expr.kind);
        self.types.push(expr.ty);
        self.spans.push(expr.span);
        id
    }

    /// Overwrite the node at `id`.
    pub fn replace_expr(&mut self, id: ExprId, expr: Expr) {
        let i = id.index();
        self.kinds[i] = expr.kind;
        self.types[i] = expr.ty;
        self.spans[i] = expr.span;
    }

    #[inline]
    pub fn expr(&self, id: ExprId) -> Expr {
        let i = id.index();
        Expr::new(self.kinds[i], self.types[i], self.spans[i])
    }

    #[inline]
    pub fn kind(&self, id: ExprId) -> ExprKind {
        self.kinds[id.index()]
    }

    #[inline]
    pub fn ty(&self, id: ExprId) -> TypeId {
        self.types[id.index()]
    }

    #[inline]
    pub fn span(&self, id: ExprId) -> Span {
        self.spans[id.index()]
    }

    pub fn expr_count(&self) -> usize {
        self.kinds.len()
    }

    // Expression lists

    /// Allocate a contiguous list of expression ids.
    pub fn alloc_expr_list(&mut self, ids: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = to_u32(self.expr_lists.len(), "expression list entries");
        self.expr_lists.extend(ids);
        let end = to_u32(self.expr_lists.len(), "expression list entries");
        ExprRange::new(start, end - start)
    }

    #[inline]
    pub fn expr_list(&self, range: ExprRange) -> &[ExprId] {
        &self.expr_lists[range.bounds()]
    }

    /// Copy a list out so the arena can be mutated while walking it.
    pub fn expr_list_vec(&self, range: ExprRange) -> Vec<ExprId> {
        self.expr_list(range).to_vec()
    }

    // Statements

    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(to_u32(self.stmts.len(), "statements"));
        self.stmts.push(stmt);
        id
    }

    pub fn replace_stmt_kind(&mut self, id: StmtId, kind: StmtKind) {
        self.stmts[id.index()].kind = kind;
    }

    #[inline]
    pub fn stmt(&self, id: StmtId) -> Stmt {
        self.stmts[id.index()]
    }

    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }

    pub fn alloc_stmt_list(&mut self, ids: impl IntoIterator<Item = StmtId>) -> StmtRange {
        let start = to_u32(self.stmt_lists.len(), "statement list entries");
        self.stmt_lists.extend(ids);
        let end = to_u32(self.stmt_lists.len(), "statement list entries");
        StmtRange::new(start, end - start)
    }

    #[inline]
    pub fn stmt_list(&self, range: StmtRange) -> &[StmtId] {
        &self.stmt_lists[range.bounds()]
    }

    pub fn stmt_list_vec(&self, range: StmtRange) -> Vec<StmtId> {
        self.stmt_list(range).to_vec()
    }

    // Locals

    pub fn alloc_local(&mut self, local: LocalDef) -> LocalId {
        let id = LocalId::from_raw(to_u32(self.locals.len(), "locals"));
        self.locals.push(local);
        id
    }

    #[inline]
    pub fn local(&self, id: LocalId) -> &LocalDef {
        &self.locals[id.index()]
    }

    pub fn local_count(&self) -> usize {
        self.locals.len()
    }
}
