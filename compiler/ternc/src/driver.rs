//! The per-unit pipeline.

use std::collections::BTreeSet;

use tern_erase::Eraser;
use tern_ir::visitor::{walk_expr, walk_stmt, Visitor};
use tern_ir::{CompilationUnit, ExprArena, ExprId, ExprKind, MemberDeclKind, MemberId, StmtId, StmtKind, TypeId};
use tern_lower::{desugar_strings, validate_unit};
use tern_mangle::{LayoutCache, Mangler};
use tern_types::{MemberKind, TypeSystem};

use crate::{CompileError, CompileOptions};


/// Names a compilation unit defines and references, sorted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnitSymbols {
    /// Class, interface, dispatch-vector and interface-table type names.
    pub types: BTreeSet<String>,
    /// Symbols whose definition the unit emits.
    pub defined: BTreeSet<String>,
    /// Symbols the unit's code refers to.
    pub referenced: BTreeSet<String>,
}

impl UnitSymbols {
    /// Referenced symbols defined elsewhere.
    pub fn external(&self) -> impl Iterator<Item = &str> {
        self.referenced.difference(&self.defined).map(String::as_str)
    }
}

/// Compile one unit with a fresh [`Compiler`].
pub fn compile_unit(
    ts: &mut TypeSystem,
    unit: &mut CompilationUnit,
    options: &CompileOptions,
) -> Result<UnitSymbols, CompileError> {
    Compiler::new(options.clone()).compile_unit(ts, unit)
}

/// Driver state shared by the units of one type system.
///
/// Canonical forms and layout symbols are memoized across units.
pub struct Compiler {
    options: CompileOptions,
    eraser: Eraser,
    layouts: LayoutCache,
}

/// What a class declaration defines, in canonical form.
struct ClassPlan {
    ty: TypeId,
    is_interface: bool,
    interfaces: Vec<TypeId>,
    procedures: Vec<MemberId>,
    static_fields: Vec<MemberId>,
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        Compiler { options, eraser: Eraser::new(), layouts: LayoutCache::new() }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Desugar, validate, canonicalize and mangle `unit`.
    ///
    /// The unit's arena is rewritten in place by desugaring.
    #[tracing::instrument(level = "debug", skip_all, fields(classes = unit.classes.len()))]
    pub fn compile_unit(
        &mut self,
        ts: &mut TypeSystem,
        unit: &mut CompilationUnit,
    ) -> Result<UnitSymbols, CompileError> {
        desugar_strings(ts, unit)?;
        if self.options.validate {
            let checked = validate_unit(ts, &mut self.eraser, unit)?;
            tracing::debug!(checked, "unit validated");
        }

        let classes = self.plan_classes(ts, unit)?;
        let references = collect_references(ts, unit);
        let calls = references
            .members
            .iter()
            .map(|&m| self.eraser.canonicalize_member(ts, m))
            .collect::<Result<Vec<_>, _>>()?;
        let statics = references
            .static_fields
            .iter()
            .map(|&m| self.eraser.canonicalize_member(ts, m))
            .collect::<Result<Vec<_>, _>>()?;
        let allocations: Vec<TypeId> =
            references.allocations.iter().map(|&ty| self.eraser.canonicalize(ts, ty)).collect();

        let mangler = Mangler::new(ts);
        let mut symbols = UnitSymbols::default();
        for class in &classes {
            let layout = self.layouts.symbols(&mangler, class.ty)?;
            symbols.types.insert(layout.type_name.clone());
            symbols.types.insert(layout.table_type_name.clone());
            symbols.defined.extend([
                layout.size.clone(),
                layout.table.clone(),
                layout.class_init.clone(),
                layout.interfaces_init.clone(),
            ]);
            symbols.defined.extend(layout.descriptor.clone());
            if !class.is_interface {
                for &iface in &class.interfaces {
                    let itable = self.layouts.interface_table(&mangler, iface, class.ty)?;
                    symbols.defined.insert(itable.to_owned());
                }
            }
            for &procedure in &class.procedures {
                symbols.defined.insert(mangler.procedure(procedure)?);
            }
            for &field in &class.static_fields {
                symbols.defined.insert(mangler.static_field(field)?);
            }
        }

        for &member in &calls {
            symbols.referenced.insert(mangler.procedure(member)?);
        }
        for &field in &statics {
            symbols.referenced.insert(mangler.static_field(field)?);
        }
        for &ty in &allocations {
            let layout = self.layouts.symbols(&mangler, ty)?;
            symbols.referenced.insert(layout.size.clone());
            symbols.referenced.insert(layout.table.clone());
        }

        if self.options.verbose {
            for symbol in symbols.defined.iter().chain(&symbols.referenced) {
                tracing::info!(symbol = symbol.as_str(), demangled = tern_mangle::demangle(symbol).as_deref(), "symbol");
            }
        }
        tracing::debug!(
            defined = symbols.defined.len(),
            referenced = symbols.referenced.len(),
            "unit mangled"
        );
        Ok(symbols)
    }

    fn plan_classes(&mut self, ts: &mut TypeSystem, unit: &CompilationUnit) -> Result<Vec<ClassPlan>, CompileError> {
        let mut plans = Vec::with_capacity(unit.classes.len());
        for decl in &unit.classes {
            let class_ty = ts.class_type(decl.class);
            let ty = self.eraser.canonicalize(ts, class_ty);
            let is_interface = ts.class(decl.class).is_interface();
            let interfaces = ts
                .class_closure(decl.class)
                .into_iter()
                .filter(|&c| c != decl.class && ts.class(c).is_interface())
                .collect::<Vec<_>>()
                .into_iter()
                .map(|c| ts.class_type(c))
                .collect();

            let mut procedures = Vec::new();
            let mut static_fields = Vec::new();
            for member in &decl.members {
                let has_definition = match &member.kind {
                    MemberDeclKind::Method { body, .. } | MemberDeclKind::Constructor { body, .. } => {
                        body.is_valid()
                    }
                    MemberDeclKind::Field { .. } => ts.member(member.member).is_static(),
                    MemberDeclKind::Initializer { .. } => false,
                };
                if !has_definition {
                    continue;
                }
                let canonical = self.eraser.canonicalize_member(ts, member.member)?;
                if matches!(ts.member(canonical).kind, MemberKind::Field { .. }) {
                    static_fields.push(canonical);
                } else {
                    procedures.push(canonical);
                }
            }
            plans.push(ClassPlan { ty, is_interface, interfaces, procedures, static_fields });
        }
        Ok(plans)
    }
}

#[derive(Default)]
struct References {
    members: Vec<MemberId>,
    static_fields: Vec<MemberId>,
    allocations: Vec<TypeId>,
}

fn collect_references(ts: &TypeSystem, unit: &CompilationUnit) -> References {
    let mut collector = ReferenceCollector { ts, refs: References::default() };
    collector.visit_unit(unit);
    collector.refs
}

struct ReferenceCollector<'a> {
    ts: &'a TypeSystem,
    refs: References,
}

impl Visitor for ReferenceCollector<'_> {
    fn visit_expr(&mut self, id: ExprId, arena: &ExprArena) {
        match arena.kind(id) {
            ExprKind::Call { method, .. } => self.refs.members.push(method),
            ExprKind::New { ctor, .. } => {
                self.refs.members.push(ctor);
                self.refs.allocations.push(arena.ty(id));
            }
            ExprKind::Field { field, .. } if self.ts.member(field).is_static() => {
                self.refs.static_fields.push(field);
            }
            _ => {}
        }
        walk_expr(self, id, arena);
    }

    fn visit_stmt(&mut self, id: StmtId, arena: &ExprArena) {
        if let StmtKind::ConstructorCall { ctor, .. } = arena.stmt(id).kind {
            self.refs.members.push(ctor);
        }
        walk_stmt(self, id, arena);
    }
}
