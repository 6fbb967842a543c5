//! A one-class compilation unit for pass tests.

use tern_ir::{
    BinaryOp, ClassDecl, ClassId, CompilationUnit, Expr, ExprArena, ExprId, ExprKind, Span, StmtId, TypeId,
};
use tern_types::{ClassFlags, MemberFlags, TypeSystem};

use crate::TypedBuilder;

pub struct Harness {
    pub ts: TypeSystem,
    pub unit: CompilationUnit,
    pub main: ClassId,
}

impl Harness {
    pub fn new() -> Self {
        let mut ts = TypeSystem::new();
        let main = ts.declare_class("app.Main", ClassFlags::empty());
        let mut unit = CompilationUnit::new();
        unit.classes.push(ClassDecl { class: main, members: Vec::new(), span: Span::GENERATED });
        Harness { ts, unit, main }
    }

    pub fn builder(&mut self) -> TypedBuilder<'_> {
        TypedBuilder::new(&mut self.ts, &mut self.unit.arena)
    }

    /// Add `void name() { e1; e2; ... }` to `app.Main`.
    pub fn add_method(&mut self, name: &str, exprs: &[ExprId]) {
        let main = self.main;
        let mut b = self.builder();
        let stmts: Vec<StmtId> = exprs.iter().map(|&e| b.eval(e)).collect();
        let body = b.block(&stmts);
        let decl = b.method_decl(main, name, TypeId::VOID, Vec::new(), body, MemberFlags::empty());
        self.unit.classes[0].members.push(decl);
    }
}

/// Source-style binary node, as the type checker would leave it.
pub fn binary(b: &mut TypedBuilder<'_>, op: BinaryOp, left: ExprId, right: ExprId, ty: TypeId) -> ExprId {
    b.arena_mut().alloc_expr(Expr::new(ExprKind::Binary { op, left, right }, ty, Span::new(1, 2)))
}

/// Text of a desugared `new core.String(new char[] { ... })`.
pub fn string_text(arena: &ExprArena, id: ExprId) -> Option<String> {
    let ExprKind::New { args, .. } = arena.kind(id) else { return None };
    let [array] = arena.expr_list(args) else { return None };
    let ExprKind::NewArray { elems } = arena.kind(*array) else { return None };
    let units: Option<Vec<u16>> = arena
        .expr_list(elems)
        .iter()
        .map(|&e| match arena.kind(e) {
            ExprKind::Char(unit) => Some(unit),
            _ => None,
        })
        .collect();
    String::from_utf16(&units?).ok()
}
