//! Bottom-up rewrite driver.
//!
//! Children are rewritten before their parent. A replacement is written
//! into the original node's slot, so parents keep pointing at the right id
//! and nothing above the rewritten node has to be rebuilt.

use tern_ir::{CompilationUnit, ExprId, ExprKind, MemberDeclKind, Receiver, StmtId, StmtKind};
use tern_stack::ensure_sufficient_stack;
use tern_types::TypeSystem;

use crate::{LowerError, TypedBuilder};

#[cfg(test)]
mod tests;

/// A single-node rewrite.
pub trait ExprRewriter {
    /// Called once per expression after its children. Returns the
    /// replacement, built with `builder`, or `None` to keep the node.
    ///
    /// The builder's span is the node's span while this runs.
    fn leave_expr(&mut self, builder: &mut TypedBuilder<'_>, id: ExprId) -> Result<Option<ExprId>, LowerError>;
}

/// Run `rewriter` over every body and field initializer in `unit`.
///
/// Returns the number of nodes replaced.
pub fn rewrite_unit<R: ExprRewriter + ?Sized>(
    ts: &mut TypeSystem,
    unit: &mut CompilationUnit,
    rewriter: &mut R,
) -> Result<usize, LowerError> {
    let roots: Vec<Root> = unit
        .classes
        .iter()
        .flat_map(|class| &class.members)
        .map(|decl| match &decl.kind {
            MemberDeclKind::Method { body, .. }
            | MemberDeclKind::Constructor { body, .. }
            | MemberDeclKind::Initializer { body } => Root::Stmt(*body),
            MemberDeclKind::Field { init } => Root::Expr(*init),
        })
        .collect();

    let mut walker = Walker { builder: TypedBuilder::new(ts, &mut unit.arena), rewriter, replaced: 0 };
    for root in roots {
        match root {
            Root::Stmt(id) => walker.stmt(id)?,
            Root::Expr(id) => walker.expr(id)?,
        }
    }
    Ok(walker.replaced)
}

enum Root {
    Stmt(StmtId),
    Expr(ExprId),
}

struct Walker<'a, 'r, R: ?Sized> {
    builder: TypedBuilder<'a>,
    rewriter: &'r mut R,
    replaced: usize,
}

impl<R: ExprRewriter + ?Sized> Walker<'_, '_, R> {
    fn expr(&mut self, id: ExprId) -> Result<(), LowerError> {
        if !id.is_valid() {
            return Ok(());
        }
        ensure_sufficient_stack(|| {
            self.children(id)?;
            let original = self.builder.arena().expr(id);
            self.builder.set_span(original.span);
            if let Some(replacement) = self.rewriter.leave_expr(&mut self.builder, id)? {
                let mut node = self.builder.arena().expr(replacement);
                node.span = original.span;
                self.builder.arena_mut().replace_expr(id, node);
                self.replaced += 1;
            }
            Ok(())
        })
    }

    fn children(&mut self, id: ExprId) -> Result<(), LowerError> {
        match self.builder.arena().kind(id) {
            ExprKind::Bool(_)
            | ExprKind::Int(_)
            | ExprKind::Float(_)
            | ExprKind::Char(_)
            | ExprKind::Str(_)
            | ExprKind::Null
            | ExprKind::Local(_)
            | ExprKind::ClassLit(_)
            | ExprKind::This => Ok(()),
            ExprKind::Field { receiver, .. } => self.receiver(receiver),
            ExprKind::ArrayAccess { base, index, .. } => {
                self.expr(base)?;
                self.expr(index)
            }
            ExprKind::Call { receiver, args, .. } => {
                self.receiver(receiver)?;
                let args = self.builder.arena().expr_list_vec(args);
                self.list(args)
            }
            ExprKind::New { outer, args, .. } => {
                self.expr(outer)?;
                let args = self.builder.arena().expr_list_vec(args);
                self.list(args)
            }
            ExprKind::NewArray { elems } => {
                let elems = self.builder.arena().expr_list_vec(elems);
                self.list(elems)
            }
            ExprKind::Binary { left, right, .. } | ExprKind::Assign { target: left, value: right } => {
                self.expr(left)?;
                self.expr(right)
            }
            ExprKind::Unary { operand: inner, .. }
            | ExprKind::Cast { expr: inner, .. }
            | ExprKind::InstanceOf { expr: inner, .. } => self.expr(inner),
            ExprKind::ESeq { stmts, expr } => {
                for stmt in self.builder.arena().stmt_list_vec(stmts) {
                    self.stmt(stmt)?;
                }
                self.expr(expr)
            }
        }
    }

    fn receiver(&mut self, receiver: Receiver) -> Result<(), LowerError> {
        match receiver {
            Receiver::Expr(e) => self.expr(e),
            Receiver::Type(_) => Ok(()),
        }
    }

    fn list(&mut self, ids: Vec<ExprId>) -> Result<(), LowerError> {
        for id in ids {
            self.expr(id)?;
        }
        Ok(())
    }

    fn stmt(&mut self, id: StmtId) -> Result<(), LowerError> {
        if !id.is_valid() {
            return Ok(());
        }
        ensure_sufficient_stack(|| match self.builder.arena().stmt(id).kind {
            StmtKind::LocalDecl { init: e, .. } | StmtKind::Eval(e) | StmtKind::Return(e) | StmtKind::Throw(e) => {
                self.expr(e)
            }
            StmtKind::If { cond, then_branch, else_branch } => {
                self.expr(cond)?;
                self.stmt(then_branch)?;
                self.stmt(else_branch)
            }
            StmtKind::Block(stmts) => {
                for stmt in self.builder.arena().stmt_list_vec(stmts) {
                    self.stmt(stmt)?;
                }
                Ok(())
            }
            StmtKind::ConstructorCall { args, .. } => {
                let args = self.builder.arena().expr_list_vec(args);
                self.list(args)
            }
        })
    }
}
