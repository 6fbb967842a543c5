#![allow(clippy::unwrap_used)]

use crate::test_support::{binary, Harness};
use crate::{rewrite_unit, ExprRewriter, LowerError, TypedBuilder};
use pretty_assertions::assert_eq;
use tern_ir::{BinaryOp, ExprId, ExprKind, TypeId};

/// Replaces every integer literal with its successor, recording visit order.
#[derive(Default)]
struct Bump {
    seen: Vec<ExprKind>,
}

impl ExprRewriter for Bump {
    fn leave_expr(&mut self, builder: &mut TypedBuilder<'_>, id: ExprId) -> Result<Option<ExprId>, LowerError> {
        let kind = builder.arena().kind(id);
        self.seen.push(kind);
        match kind {
            ExprKind::Int(n) => {
                let next = i32::try_from(n + 1).unwrap_or(i32::MAX);
                Ok(Some(builder.int_lit(next)))
            }
            _ => Ok(None),
        }
    }
}

#[test]
fn children_are_rewritten_before_parents_in_place() {
    let mut h = Harness::new();
    let mut b = h.builder();
    let one = b.int_lit(1);
    let two = b.int_lit(2);
    let sum = binary(&mut b, BinaryOp::Add, one, two, TypeId::INT);
    h.add_method("run", &[sum]);

    let mut bump = Bump::default();
    let replaced = rewrite_unit(&mut h.ts, &mut h.unit, &mut bump).unwrap();

    assert_eq!(replaced, 2);
    assert_eq!(
        bump.seen,
        vec![
            ExprKind::Int(1),
            ExprKind::Int(2),
            ExprKind::Binary { op: BinaryOp::Add, left: one, right: two },
        ]
    );
    assert_eq!(h.unit.arena.kind(one), ExprKind::Int(2));
    assert_eq!(h.unit.arena.kind(two), ExprKind::Int(3));
    assert_eq!(h.unit.arena.kind(sum), ExprKind::Binary { op: BinaryOp::Add, left: one, right: two });
}

struct Fail;

impl ExprRewriter for Fail {
    fn leave_expr(&mut self, builder: &mut TypedBuilder<'_>, id: ExprId) -> Result<Option<ExprId>, LowerError> {
        builder.array_access(id, id, false).map(|_| None)
    }
}

#[test]
fn first_error_aborts_the_walk() {
    let mut h = Harness::new();
    let yes = h.builder().bool_lit(true);
    h.add_method("run", &[yes]);

    let result = rewrite_unit(&mut h.ts, &mut h.unit, &mut Fail);
    assert_eq!(result, Err(LowerError::NotAnArray { ty: "boolean".to_owned() }));
}

#[test]
fn deep_chains_do_not_overflow() {
    let mut h = Harness::new();
    let mut b = h.builder();
    let mut acc = b.int_lit(0);
    for _ in 0..50_000 {
        let one = b.int_lit(1);
        acc = binary(&mut b, BinaryOp::Add, acc, one, TypeId::INT);
    }
    h.add_method("run", &[acc]);

    let replaced = rewrite_unit(&mut h.ts, &mut h.unit, &mut Bump::default()).unwrap();
    assert_eq!(replaced, 50_001);
}
