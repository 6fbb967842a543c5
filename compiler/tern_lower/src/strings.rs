//! String literal and concatenation desugaring.
//!
//! - `"ab"` becomes `new core.String(new char[] { 'a', 'b' })`.
//! - `l + r` with a string operand becomes `str(l).concat(str(r))`, where
//!   `str` leaves strings alone, spells out `"null"` for the null type,
//!   calls `core.String.valueOf` on primitives and `toString()` on any
//!   other reference.
//!
//! Runs before canonicalization; every node it introduces targets
//! `core.String` or `core.Object`, neither of which is generic.

use tern_ir::{BinaryOp, CompilationUnit, ExprId, ExprKind, Receiver};
use tern_types::{TypeKind, TypeSystem};

use crate::{rewrite_unit, ExprRewriter, LowerError, TypedBuilder};


const NULL_TEXT: &str = "null";

/// The desugaring rewrite, with counts of what it replaced.
#[derive(Default, Debug)]
pub struct StringConversion {
    literals: usize,
    concatenations: usize,
}

impl StringConversion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn literals(&self) -> usize {
        self.literals
    }

    pub fn concatenations(&self) -> usize {
        self.concatenations
    }
}

impl ExprRewriter for StringConversion {
    fn leave_expr(&mut self, builder: &mut TypedBuilder<'_>, id: ExprId) -> Result<Option<ExprId>, LowerError> {
        match builder.arena().kind(id) {
            ExprKind::Str(text) => {
                let text = builder.ts().name(text);
                tracing::trace!(text, "desugaring string literal");
                self.literals += 1;
                builder.new_string(text).map(Some)
            }
            ExprKind::Binary { op: BinaryOp::Add, left, right } if is_string_concat(builder, left, right) => {
                tracing::trace!(span = ?builder.span(), "desugaring concatenation");
                self.concatenations += 1;
                let left = promote(builder, left)?;
                let right = promote(builder, right)?;
                let string = builder.ts().well_known().string_ty;
                builder.call(Receiver::Expr(left), string, "concat", &[right]).map(Some)
            }
            _ => Ok(None),
        }
    }
}

/// Desugar every string literal and string `+` in `unit`.
#[tracing::instrument(level = "debug", skip_all, fields(classes = unit.classes.len()))]
pub fn desugar_strings(ts: &mut TypeSystem, unit: &mut CompilationUnit) -> Result<StringConversion, LowerError> {
    let mut conversion = StringConversion::new();
    let replaced = rewrite_unit(ts, unit, &mut conversion)?;
    tracing::debug!(
        replaced,
        literals = conversion.literals,
        concatenations = conversion.concatenations,
        "string desugaring done"
    );
    Ok(conversion)
}

pub(crate) fn is_string_concat(builder: &TypedBuilder<'_>, left: ExprId, right: ExprId) -> bool {
    let ts = builder.ts();
    ts.is_string(builder.arena().ty(left)) || ts.is_string(builder.arena().ty(right))
}

/// `expr` converted to `core.String`.
fn promote(builder: &mut TypedBuilder<'_>, expr: ExprId) -> Result<ExprId, LowerError> {
    let ty = builder.arena().ty(expr);
    let ts = builder.ts();
    if ts.is_string(ty) {
        return Ok(expr);
    }
    match ts.kind(ty) {
        TypeKind::Null => builder.new_string(NULL_TEXT),
        TypeKind::Prim(_) => {
            let string = ts.well_known().string_ty;
            builder.static_call(string, "valueOf", &[expr])
        }
        _ => builder.call(Receiver::Expr(expr), ty, "toString", &[]),
    }
}
