//! Read-only AST traversal.
//!
//! Override `visit_*` to act on particular nodes and call the matching
//! `walk_*` function to continue into children. The arena is never
//! mutated; rewriting passes in `tern_lower` drive their own post-order walk.
//!
//! ```text
//! struct CountCalls(usize);
//!
//! impl Visitor for CountCalls {
//!     fn visit_expr(&mut self, id: ExprId, arena: &ExprArena) {
//!         if matches!(arena.kind(id), ExprKind::Call { .. }) {
//!             self.0 += 1;
//!         }
//!         walk_expr(self, id, arena);
//!     }
//! }
//! ```

use tern_stack::ensure_sufficient_stack;

use crate::ast::{ClassDecl, CompilationUnit, ExprKind, MemberDecl, MemberDeclKind, StmtKind};
use crate::{ExprArena, ExprId, Receiver, StmtId};

pub trait Visitor {
    fn visit_unit(&mut self, unit: &CompilationUnit) {
        walk_unit(self, unit);
    }

    fn visit_class(&mut self, class: &ClassDecl, arena: &ExprArena) {
        walk_class(self, class, arena);
    }

    fn visit_member_decl(&mut self, decl: &MemberDecl, arena: &ExprArena) {
        walk_member_decl(self, decl, arena);
    }

    fn visit_expr(&mut self, id: ExprId, arena: &ExprArena) {
        walk_expr(self, id, arena);
    }

    fn visit_stmt(&mut self, id: StmtId, arena: &ExprArena) {
        walk_stmt(self, id, arena);
    }
}

pub fn walk_unit<V: Visitor + ?Sized>(visitor: &mut V, unit: &CompilationUnit) {
    for class in &unit.classes {
        visitor.visit_class(class, &unit.arena);
    }
}

pub fn walk_class<V: Visitor + ?Sized>(visitor: &mut V, class: &ClassDecl, arena: &ExprArena) {
    for member in &class.members {
        visitor.visit_member_decl(member, arena);
    }
}

pub fn walk_member_decl<V: Visitor + ?Sized>(
    visitor: &mut V,
    decl: &MemberDecl,
    arena: &ExprArena,
) {
    match &decl.kind {
        MemberDeclKind::Method { body, .. }
        | MemberDeclKind::Constructor { body, .. }
        | MemberDeclKind::Initializer { body } => {
            if body.is_valid() {
                visitor.visit_stmt(*body, arena);
            }
        }
        MemberDeclKind::Field { init } => {
            if init.is_valid() {
                visitor.visit_expr(*init, arena);
            }
        }
    }
}

pub fn walk_expr<V: Visitor + ?Sized>(visitor: &mut V, id: ExprId, arena: &ExprArena) {
    ensure_sufficient_stack(|| match arena.kind(id) {
        ExprKind::Bool(_)
        | ExprKind::Int(_)
        | ExprKind::Float(_)
        | ExprKind::Char(_)
        | ExprKind::Str(_)
        | ExprKind::Null
        | ExprKind::Local(_)
        | ExprKind::ClassLit(_)
        | ExprKind::This => {}

        ExprKind::Field { receiver, .. } => {
            if let Receiver::Expr(e) = receiver {
                visitor.visit_expr(e, arena);
            }
        }
        ExprKind::ArrayAccess { base, index, .. } => {
            visitor.visit_expr(base, arena);
            visitor.visit_expr(index, arena);
        }
        ExprKind::Call { receiver, args, .. } => {
            if let Receiver::Expr(e) = receiver {
                visitor.visit_expr(e, arena);
            }
            for &arg in arena.expr_list(args) {
                visitor.visit_expr(arg, arena);
            }
        }
        ExprKind::New { outer, args, .. } => {
            if outer.is_valid() {
                visitor.visit_expr(outer, arena);
            }
            for &arg in arena.expr_list(args) {
                visitor.visit_expr(arg, arena);
            }
        }
        ExprKind::NewArray { elems } => {
            for &elem in arena.expr_list(elems) {
                visitor.visit_expr(elem, arena);
            }
        }
        ExprKind::Binary { left, right, .. } => {
            visitor.visit_expr(left, arena);
            visitor.visit_expr(right, arena);
        }
        ExprKind::Unary { operand, .. } => visitor.visit_expr(operand, arena),
        ExprKind::Cast { expr, .. } | ExprKind::InstanceOf { expr, .. } => {
            visitor.visit_expr(expr, arena);
        }
        ExprKind::Assign { target, value } => {
            visitor.visit_expr(target, arena);
            visitor.visit_expr(value, arena);
        }
        ExprKind::ESeq { stmts, expr } => {
            for &stmt in arena.stmt_list(stmts) {
                visitor.visit_stmt(stmt, arena);
            }
            visitor.visit_expr(expr, arena);
        }
    });
}

pub fn walk_stmt<V: Visitor + ?Sized>(visitor: &mut V, id: StmtId, arena: &ExprArena) {
    ensure_sufficient_stack(|| match arena.stmt(id).kind {
        StmtKind::LocalDecl { init, .. } => {
            if init.is_valid() {
                visitor.visit_expr(init, arena);
            }
        }
        StmtKind::Eval(e) | StmtKind::Throw(e) => visitor.visit_expr(e, arena),
        StmtKind::Return(e) => {
            if e.is_valid() {
                visitor.visit_expr(e, arena);
            }
        }
        StmtKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            visitor.visit_expr(cond, arena);
            visitor.visit_stmt(then_branch, arena);
            if else_branch.is_valid() {
                visitor.visit_stmt(else_branch, arena);
            }
        }
        StmtKind::Block(stmts) => {
            for &stmt in arena.stmt_list(stmts) {
                visitor.visit_stmt(stmt, arena);
            }
        }
        StmtKind::ConstructorCall { args, .. } => {
            for &arg in arena.expr_list(args) {
                visitor.visit_expr(arg, arena);
            }
        }
    });
}
