//! Post-desugaring checks.
//!
//! - No string literal node remains.
//! - No `+` node has a string operand.
//! - Every field, method and constructor a node refers to reconciles to a
//!   declaration, so mangling can run on the whole unit.

use tern_erase::Eraser;
use tern_ir::visitor::{walk_expr, walk_stmt, Visitor};
use tern_ir::{BinaryOp, CompilationUnit, ExprArena, ExprId, ExprKind, MemberId, StmtId, StmtKind};
use tern_types::TypeSystem;

use crate::LowerError;


/// Validate `unit`, stopping at the first violation.
///
/// Returns how many member references were checked.
#[tracing::instrument(level = "debug", skip_all)]
pub fn validate_unit(ts: &mut TypeSystem, eraser: &mut Eraser, unit: &CompilationUnit) -> Result<usize, LowerError> {
    let mut validator = Validator { ts, eraser, checked: 0, error: None };
    validator.visit_unit(unit);
    match validator.error {
        Some(error) => {
            tracing::error!(%error, "validation failed");
            Err(error)
        }
        None => Ok(validator.checked),
    }
}

struct Validator<'a> {
    ts: &'a mut TypeSystem,
    eraser: &'a mut Eraser,
    checked: usize,
    error: Option<LowerError>,
}

impl Validator<'_> {
    fn check_member(&mut self, member: MemberId) {
        match self.eraser.canonicalize_member(self.ts, member) {
            Ok(_) => self.checked += 1,
            Err(error) => self.error = Some(error.into()),
        }
    }
}

impl Visitor for Validator<'_> {
    fn visit_expr(&mut self, id: ExprId, arena: &ExprArena) {
        if self.error.is_some() {
            return;
        }
        match arena.kind(id) {
            ExprKind::Str(_) => {
                self.error = Some(LowerError::StringLiteralRemains { span: arena.span(id) });
                return;
            }
            ExprKind::Binary { op: BinaryOp::Add, left, right }
                if self.ts.is_string(arena.ty(left)) || self.ts.is_string(arena.ty(right)) =>
            {
                self.error = Some(LowerError::StringConcatRemains { span: arena.span(id) });
                return;
            }
            ExprKind::Field { field: member, .. }
            | ExprKind::Call { method: member, .. }
            | ExprKind::New { ctor: member, .. } => self.check_member(member),
            _ => {}
        }
        walk_expr(self, id, arena);
    }

    fn visit_stmt(&mut self, id: StmtId, arena: &ExprArena) {
        if self.error.is_some() {
            return;
        }
        if let StmtKind::ConstructorCall { ctor, .. } = arena.stmt(id).kind {
            self.check_member(ctor);
        }
        walk_stmt(self, id, arena);
    }
}
