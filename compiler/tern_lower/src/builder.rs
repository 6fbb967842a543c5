//! Smart constructors for resolved, typed tree fragments.
//!
//! Each constructor looks up the member it stamps onto the node and sets
//! the node's static type, so the fragment reads to later passes exactly as
//! if it had come out of type checking.

use smallvec::SmallVec;

use tern_ir::{
    BinaryOp, ClassId, ConstructorCallKind, Dispatch, Expr, ExprArena, ExprId, ExprKind, LocalDef,
    LocalFlags, LocalId, MemberDecl, MemberDeclKind, MemberId, Receiver, Span, Stmt, StmtId, StmtKind,
    TypeId, UnaryOp,
};
use tern_types::{Formals, MemberFlags, MemberKind, TypeKind, TypeSystem};

use crate::LowerError;

#[cfg(test)]
mod tests;

/// Builder over one compilation unit's arena.
///
/// New nodes take the builder's current span; compiler-generated by
/// default.
pub struct TypedBuilder<'a> {
    ts: &'a mut TypeSystem,
    arena: &'a mut ExprArena,
    span: Span,
}

impl<'a> TypedBuilder<'a> {
    pub fn new(ts: &'a mut TypeSystem, arena: &'a mut ExprArena) -> Self {
        TypedBuilder { ts, arena, span: Span::GENERATED }
    }

    pub fn ts(&self) -> &TypeSystem {
        &*self.ts
    }

    pub fn ts_mut(&mut self) -> &mut TypeSystem {
        &mut *self.ts
    }

    pub fn arena(&self) -> &ExprArena {
        &*self.arena
    }

    pub fn arena_mut(&mut self) -> &mut ExprArena {
        &mut *self.arena
    }

    /// Span stamped on subsequently built nodes.
    pub fn set_span(&mut self, span: Span) {
        self.span = span;
    }

    pub fn span(&self) -> Span {
        self.span
    }

    // Declarations

    /// Declare a field on `container` and return its declaration.
    pub fn field_decl(
        &mut self,
        container: ClassId,
        name: &str,
        ty: TypeId,
        init: ExprId,
        flags: MemberFlags,
    ) -> MemberDecl {
        let kind = MemberKind::Field { name: self.ts.intern(name), ty };
        let member = self.ts.declare_member(container, kind, flags);
        MemberDecl { member, kind: MemberDeclKind::Field { init }, span: self.span }
    }

    /// Declare a method on `container` whose formals are the given locals.
    pub fn method_decl(
        &mut self,
        container: ClassId,
        name: &str,
        ret: TypeId,
        formals: Vec<LocalId>,
        body: StmtId,
        flags: MemberFlags,
    ) -> MemberDecl {
        let kind = MemberKind::Method {
            name: self.ts.intern(name),
            formals: self.formal_types(&formals),
            ret,
            type_params: SmallVec::new(),
        };
        let member = self.ts.declare_member(container, kind, flags);
        MemberDecl { member, kind: MemberDeclKind::Method { formals, body }, span: self.span }
    }

    pub fn constructor_decl(&mut self, container: ClassId, formals: Vec<LocalId>, body: StmtId) -> MemberDecl {
        let kind = MemberKind::Constructor { formals: self.formal_types(&formals), type_params: SmallVec::new() };
        let member = self.ts.declare_member(container, kind, MemberFlags::empty());
        MemberDecl { member, kind: MemberDeclKind::Constructor { formals, body }, span: self.span }
    }

    fn formal_types(&self, formals: &[LocalId]) -> Formals {
        formals.iter().map(|&local| self.arena.local(local).ty).collect()
    }

    // Locals

    pub fn formal(&mut self, name: &str, ty: TypeId, flags: LocalFlags) -> LocalId {
        let name = self.ts.intern(name);
        self.arena.alloc_local(LocalDef { name, ty, flags })
    }

    /// Compiler temporary and its declaration. `init` may be `INVALID`.
    pub fn temp_var(&mut self, name: &str, ty: TypeId, init: ExprId) -> (LocalId, StmtId) {
        self.temp(name, ty, init, LocalFlags::TEMP)
    }

    /// Single-assignment temporary typed after its initializer.
    pub fn temp_ssa(&mut self, name: &str, init: ExprId) -> Result<(LocalId, StmtId), LowerError> {
        if !init.is_valid() {
            return Err(LowerError::SsaWithoutInit { name: name.to_owned() });
        }
        let ty = self.arena.ty(init);
        let saved = self.span;
        self.span = self.arena.span(init);
        let temp = self.temp(name, ty, init, LocalFlags::TEMP | LocalFlags::SSA | LocalFlags::FINAL);
        self.span = saved;
        Ok(temp)
    }

    fn temp(&mut self, name: &str, ty: TypeId, init: ExprId, flags: LocalFlags) -> (LocalId, StmtId) {
        let local = self.formal(name, ty, flags);
        let decl = self.stmt(StmtKind::LocalDecl { local, init });
        (local, decl)
    }

    pub fn local(&mut self, local: LocalId) -> ExprId {
        let ty = self.arena.local(local).ty;
        self.expr(ExprKind::Local(local), ty)
    }

    // Member access

    pub fn static_field(&mut self, container: TypeId, name: &str) -> Result<ExprId, LowerError> {
        self.field(Receiver::Type(container), name)
    }

    /// Field `name` looked up on the receiver's static type.
    pub fn field(&mut self, receiver: Receiver, name: &str) -> Result<ExprId, LowerError> {
        let container = self.receiver_type(receiver);
        let field = self.ts.find_field(container, name)?;
        let ty = match self.ts.member(field).kind {
            MemberKind::Field { ty, .. } => ty,
            _ => TypeId::NONE,
        };
        Ok(self.expr(ExprKind::Field { receiver, field }, ty))
    }

    pub fn static_call(&mut self, container: TypeId, name: &str, args: &[ExprId]) -> Result<ExprId, LowerError> {
        self.call(Receiver::Type(container), container, name, args)
    }

    /// Call `name` as declared on (or inherited by) `container`.
    ///
    /// The node is typed with the resolved method's return type and
    /// stamped with its dispatch kind.
    pub fn call(
        &mut self,
        receiver: Receiver,
        container: TypeId,
        name: &str,
        args: &[ExprId],
    ) -> Result<ExprId, LowerError> {
        let arg_types = self.types_of(args);
        let method = self.ts.find_method(container, name, &arg_types)?;
        let ret = match self.ts.member(method).kind {
            MemberKind::Method { ret, .. } => ret,
            _ => TypeId::VOID,
        };
        let dispatch = self.classify(method, container);
        tracing::trace!(method = %self.ts.member_display(method), ?dispatch, "built call");
        let receiver = if dispatch == Dispatch::Static { Receiver::Type(container) } else { receiver };
        let args = self.arena.alloc_expr_list(args.iter().copied());
        Ok(self.expr(ExprKind::Call { receiver, method, args, dispatch }, ret))
    }

    /// How a call to `method` through `container` reaches its target.
    pub fn classify(&self, method: MemberId, container: TypeId) -> Dispatch {
        let data = self.ts.member(method);
        if data.is_static() {
            return Dispatch::Static;
        }
        if data.flags.intersects(MemberFlags::PRIVATE | MemberFlags::FINAL) {
            return Dispatch::Direct;
        }
        let class_of = |ty: TypeId| self.ts.class_of(ty).map(|class| self.ts.class(class));
        if class_of(container).is_some_and(|class| class.is_final()) {
            return Dispatch::Direct;
        }
        if class_of(data.container).is_some_and(|class| class.is_interface()) {
            Dispatch::Interface
        } else {
            Dispatch::Virtual
        }
    }

    /// `this(...)` or `super(...)` resolved against `container`.
    pub fn constructor_call(
        &mut self,
        kind: ConstructorCallKind,
        container: TypeId,
        args: &[ExprId],
    ) -> Result<StmtId, LowerError> {
        let arg_types = self.types_of(args);
        let ctor = self.ts.find_constructor(container, &arg_types)?;
        let args = self.arena.alloc_expr_list(args.iter().copied());
        Ok(self.stmt(StmtKind::ConstructorCall { kind, ctor, args }))
    }

    /// Allocation of `ty` through its most specific applicable constructor.
    pub fn new_object(&mut self, ty: TypeId, outer: ExprId, args: &[ExprId]) -> Result<ExprId, LowerError> {
        let instantiable = self.ts.class_of(ty).is_some_and(|class| !self.ts.class(class).is_interface());
        if !instantiable {
            return Err(LowerError::NotInstantiable { ty: self.ts.display_name(ty) });
        }
        let arg_types = self.types_of(args);
        let ctor = self.ts.find_constructor(ty, &arg_types)?;
        let args = self.arena.alloc_expr_list(args.iter().copied());
        Ok(self.expr(ExprKind::New { ctor, outer, args }, ty))
    }

    /// One-dimensional `elem[]` built from `elems`.
    pub fn new_array_init(&mut self, elem: TypeId, elems: &[ExprId]) -> ExprId {
        let ty = self.ts.array(elem);
        let elems = self.arena.alloc_expr_list(elems.iter().copied());
        self.expr(ExprKind::NewArray { elems }, ty)
    }

    /// Desugared string construction: `new String(new char[] { ... })` with
    /// one element per UTF-16 code unit of `text`.
    pub fn new_string(&mut self, text: &str) -> Result<ExprId, LowerError> {
        let chars: Vec<ExprId> = text.encode_utf16().map(|unit| self.char_lit(unit)).collect();
        let array = self.new_array_init(TypeId::CHAR, &chars);
        let string = self.ts.well_known().string_ty;
        self.new_object(string, ExprId::INVALID, &[array])
    }

    // Expressions

    pub fn cast(&mut self, expr: ExprId, target: TypeId) -> ExprId {
        self.expr(ExprKind::Cast { expr, target }, target)
    }

    /// Class literal; typed `core.Object` since the model carries no
    /// reflection class.
    pub fn class_lit(&mut self, ty: TypeId) -> Result<ExprId, LowerError> {
        self.require_reference(ty)?;
        let object = self.ts.well_known().object_ty;
        Ok(self.expr(ExprKind::ClassLit(ty), object))
    }

    /// `target = value;`
    pub fn eval_assign(&mut self, target: ExprId, value: ExprId) -> Result<StmtId, LowerError> {
        if !self.arena.kind(target).is_lvalue() {
            return Err(LowerError::NotAnLvalue { span: self.arena.span(target) });
        }
        let ty = self.arena.ty(target);
        let assign = self.expr(ExprKind::Assign { target, value }, ty);
        Ok(self.eval(assign))
    }

    /// `this` typed as `container`.
    pub fn this(&mut self, container: TypeId) -> ExprId {
        self.expr(ExprKind::This, container)
    }

    pub fn instance_of(&mut self, expr: ExprId, target: TypeId) -> Result<ExprId, LowerError> {
        self.require_reference(target)?;
        Ok(self.expr(ExprKind::InstanceOf { expr, target }, TypeId::BOOLEAN))
    }

    /// Statements run for effect, then `expr`, typed as `expr`.
    pub fn eseq(&mut self, stmts: &[StmtId], expr: ExprId) -> ExprId {
        let ty = self.arena.ty(expr);
        let stmts = self.arena.alloc_stmt_list(stmts.iter().copied());
        self.expr(ExprKind::ESeq { stmts, expr }, ty)
    }

    pub fn not(&mut self, expr: ExprId) -> Result<ExprId, LowerError> {
        self.require_boolean("operand of `!`", expr)?;
        Ok(self.expr(ExprKind::Unary { op: UnaryOp::Not, operand: expr }, TypeId::BOOLEAN))
    }

    pub fn cond_or(&mut self, left: ExprId, right: ExprId) -> Result<ExprId, LowerError> {
        self.require_boolean("left operand of `||`", left)?;
        self.require_boolean("right operand of `||`", right)?;
        Ok(self.expr(ExprKind::Binary { op: BinaryOp::CondOr, left, right }, TypeId::BOOLEAN))
    }

    /// `base[index]`; `guarded` marks accesses whose checks were already
    /// emitted.
    pub fn array_access(&mut self, base: ExprId, index: ExprId, guarded: bool) -> Result<ExprId, LowerError> {
        let base_ty = self.arena.ty(base);
        let TypeKind::Array(elem) = self.ts.kind(base_ty) else {
            return Err(LowerError::NotAnArray { ty: self.ts.display_name(base_ty) });
        };
        Ok(self.expr(ExprKind::ArrayAccess { base, index, guarded }, elem))
    }

    // Literals

    pub fn string_lit(&mut self, value: &str) -> ExprId {
        let name = self.ts.intern(value);
        let string = self.ts.well_known().string_ty;
        self.expr(ExprKind::Str(name), string)
    }

    pub fn char_lit(&mut self, unit: u16) -> ExprId {
        self.expr(ExprKind::Char(unit), TypeId::CHAR)
    }

    pub fn int_lit(&mut self, value: i32) -> ExprId {
        self.expr(ExprKind::Int(i64::from(value)), TypeId::INT)
    }

    pub fn bool_lit(&mut self, value: bool) -> ExprId {
        self.expr(ExprKind::Bool(value), TypeId::BOOLEAN)
    }

    pub fn null_lit(&mut self) -> ExprId {
        self.expr(ExprKind::Null, TypeId::NULL)
    }

    // Statements

    pub fn eval(&mut self, expr: ExprId) -> StmtId {
        self.stmt(StmtKind::Eval(expr))
    }

    pub fn block(&mut self, stmts: &[StmtId]) -> StmtId {
        let stmts = self.arena.alloc_stmt_list(stmts.iter().copied());
        self.stmt(StmtKind::Block(stmts))
    }

    /// `if (cond) then_branch [else else_branch]`; `else_branch` may be
    /// `INVALID`.
    pub fn if_stmt(&mut self, cond: ExprId, then_branch: StmtId, else_branch: StmtId) -> Result<StmtId, LowerError> {
        self.require_boolean("condition", cond)?;
        Ok(self.stmt(StmtKind::If { cond, then_branch, else_branch }))
    }

    /// `throw new ty(args)`.
    pub fn throw(&mut self, ty: TypeId, args: &[ExprId]) -> Result<StmtId, LowerError> {
        let exception = self.new_object(ty, ExprId::INVALID, args)?;
        Ok(self.stmt(StmtKind::Throw(exception)))
    }

    // Helpers

    fn expr(&mut self, kind: ExprKind, ty: TypeId) -> ExprId {
        self.arena.alloc_expr(Expr::new(kind, ty, self.span))
    }

    fn stmt(&mut self, kind: StmtKind) -> StmtId {
        self.arena.alloc_stmt(Stmt::new(kind, self.span))
    }

    fn types_of(&self, exprs: &[ExprId]) -> Vec<TypeId> {
        exprs.iter().map(|&e| self.arena.ty(e)).collect()
    }

    fn receiver_type(&self, receiver: Receiver) -> TypeId {
        match receiver {
            Receiver::Expr(e) => self.arena.ty(e),
            Receiver::Type(ty) => ty,
        }
    }

    fn require_boolean(&self, context: &'static str, expr: ExprId) -> Result<(), LowerError> {
        let ty = self.arena.ty(expr);
        if ty == TypeId::BOOLEAN {
            Ok(())
        } else {
            Err(LowerError::NotBoolean { context, ty: self.ts.display_name(ty) })
        }
    }

    fn require_reference(&self, ty: TypeId) -> Result<(), LowerError> {
        if self.ts.is_reference(ty) {
            Ok(())
        } else {
            Err(LowerError::NotAReference { ty: self.ts.display_name(ty) })
        }
    }
}
