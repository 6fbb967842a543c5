//! Declarations of the runtime support library.

use tern_ir::{
    ClassDecl, CompilationUnit, ExprArena, ExprId, LocalDef, LocalFlags, LocalId, MemberDecl, MemberDeclKind, Span,
    Stmt, StmtId, StmtKind, TypeId,
};
use tern_types::{MemberKind, TypeSystem};

/// A unit declaring `core.Object` and `core.String` with empty bodies.
///
/// Compiling it yields the symbols the runtime library must define.
pub fn core_unit(ts: &TypeSystem) -> CompilationUnit {
    let mut unit = CompilationUnit::new();
    let wk = *ts.well_known();
    for class in [wk.object, wk.string] {
        let mut members = Vec::new();
        for &member in &ts.class(class).members {
            let kind = match &ts.member(member).kind {
                MemberKind::Method { formals, .. } => MemberDeclKind::Method {
                    formals: formal_locals(ts, &mut unit.arena, formals),
                    body: empty_body(&mut unit.arena),
                },
                MemberKind::Constructor { formals, .. } => MemberDeclKind::Constructor {
                    formals: formal_locals(ts, &mut unit.arena, formals),
                    body: empty_body(&mut unit.arena),
                },
                MemberKind::Field { .. } => MemberDeclKind::Field { init: ExprId::INVALID },
                MemberKind::Initializer => continue,
            };
            members.push(MemberDecl { member, kind, span: Span::GENERATED });
        }
        unit.classes.push(ClassDecl { class, members, span: Span::GENERATED });
    }
    unit
}

fn formal_locals(ts: &TypeSystem, arena: &mut ExprArena, formals: &[TypeId]) -> Vec<LocalId> {
    formals
        .iter()
        .enumerate()
        .map(|(i, &ty)| {
            let name = ts.intern(&format!("a{i}"));
            arena.alloc_local(LocalDef { name, ty, flags: LocalFlags::FINAL })
        })
        .collect()
}

fn empty_body(arena: &mut ExprArena) -> StmtId {
    let stmts = arena.alloc_stmt_list(std::iter::empty());
    arena.alloc_stmt(Stmt::new(StmtKind::Block(stmts), Span::GENERATED))
}
