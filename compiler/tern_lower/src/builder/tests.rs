#![allow(clippy::unwrap_used)]

use crate::test_support::Harness;
use crate::LowerError;
use pretty_assertions::assert_eq;
use tern_ir::{ConstructorCallKind, Dispatch, ExprId, ExprKind, LocalFlags, Receiver, StmtId, StmtKind, TypeId};
use tern_types::{ClassFlags, LookupError, MemberFlags, MemberKind};

#[test]
fn field_access_is_typed_by_the_field() {
    let mut h = Harness::new();
    let main = h.main;
    let main_ty = h.ts.class_type(main);
    let mut b = h.builder();
    let decl = b.field_decl(main, "count", TypeId::INT, ExprId::INVALID, MemberFlags::empty());
    let this = b.this(main_ty);
    let access = b.field(Receiver::Expr(this), "count").unwrap();

    assert_eq!(b.arena().ty(access), TypeId::INT);
    assert_eq!(
        b.arena().kind(access),
        ExprKind::Field { receiver: Receiver::Expr(this), field: decl.member }
    );
    assert_eq!(
        b.static_field(main_ty, "missing"),
        Err(LowerError::Lookup(LookupError::NoField {
            container: "app.Main".to_owned(),
            name: "missing".to_owned(),
        }))
    );
}

#[test]
fn declarations_register_on_the_container() {
    let mut h = Harness::new();
    let main = h.main;
    let main_ty = h.ts.class_type(main);
    let mut b = h.builder();
    let n = b.formal("n", TypeId::INT, LocalFlags::FINAL);
    let body = b.block(&[]);
    let method = b.method_decl(main, "twice", TypeId::INT, vec![n], body, MemberFlags::empty());
    let ctor = b.constructor_decl(main, vec![n], body);

    let this = b.this(main_ty);
    let arg = b.int_lit(2);
    let call = b.call(Receiver::Expr(this), main_ty, "twice", &[arg]).unwrap();
    let ExprKind::Call { method: resolved, .. } = b.arena().kind(call) else { panic!("call expected") };
    assert_eq!(resolved, method.member);
    assert_eq!(b.arena().ty(call), TypeId::INT);

    let members = &h.ts.class(main).members;
    assert!(members.contains(&method.member));
    assert!(members.contains(&ctor.member));
    assert!(matches!(h.ts.member(ctor.member).kind, MemberKind::Constructor { .. }));
}

#[test]
fn dispatch_classification() {
    let mut h = Harness::new();
    let string = h.ts.well_known().string_ty;
    let object = h.ts.well_known().object_ty;
    let leaf_c = h.ts.declare_class("app.Leaf", ClassFlags::FINAL);
    let leaf = h.ts.class_type(leaf_c);
    let shape_c = h.ts.declare_class("app.Shape", ClassFlags::INTERFACE | ClassFlags::ABSTRACT);
    let shape = h.ts.class_type(shape_c);
    let area = h.ts.intern("area");
    h.ts.declare_member(
        shape_c,
        MemberKind::Method { name: area, formals: Default::default(), ret: TypeId::DOUBLE, type_params: Default::default() },
        MemberFlags::ABSTRACT,
    );

    let mut b = h.builder();
    let s = b.formal("s", string, LocalFlags::empty());
    let o = b.formal("o", object, LocalFlags::empty());
    let l = b.formal("l", leaf, LocalFlags::empty());
    let i = b.formal("i", shape, LocalFlags::empty());
    let (s, o, l, i) = (b.local(s), b.local(o), b.local(l), b.local(i));

    let dispatch = |b: &crate::TypedBuilder<'_>, call: ExprId| match b.arena().kind(call) {
        ExprKind::Call { dispatch, .. } => dispatch,
        other => panic!("call expected, got {other:?}"),
    };
    let concat = b.call(Receiver::Expr(s), string, "concat", &[s]).unwrap();
    let to_string = b.call(Receiver::Expr(o), object, "toString", &[]).unwrap();
    let hash = b.call(Receiver::Expr(l), leaf, "hashCode", &[]).unwrap();
    let area = b.call(Receiver::Expr(i), shape, "area", &[]).unwrap();
    let value_of = b.static_call(string, "valueOf", &[o]).unwrap();

    assert_eq!(dispatch(&b, concat), Dispatch::Direct);
    assert_eq!(dispatch(&b, to_string), Dispatch::Virtual);
    assert_eq!(dispatch(&b, hash), Dispatch::Direct);
    assert_eq!(dispatch(&b, area), Dispatch::Interface);
    assert_eq!(dispatch(&b, value_of), Dispatch::Static);
}

#[test]
fn ssa_temporaries_need_an_initializer() {
    let mut h = Harness::new();
    let mut b = h.builder();
    assert_eq!(
        b.temp_ssa("t", ExprId::INVALID),
        Err(LowerError::SsaWithoutInit { name: "t".to_owned() })
    );

    let init = b.int_lit(7);
    let (local, decl) = b.temp_ssa("t", init).unwrap();
    let def = *b.arena().local(local);
    assert_eq!(def.ty, TypeId::INT);
    assert_eq!(def.flags, LocalFlags::TEMP | LocalFlags::SSA | LocalFlags::FINAL);
    assert_eq!(b.arena().stmt(decl).kind, StmtKind::LocalDecl { local, init });

    let (plain, _) = b.temp_var("u", TypeId::LONG, ExprId::INVALID);
    assert_eq!(b.arena().local(plain).flags, LocalFlags::TEMP);
}

#[test]
fn boolean_operands_are_checked() {
    let mut h = Harness::new();
    let mut b = h.builder();
    let yes = b.bool_lit(true);
    let one = b.int_lit(1);
    let then_branch = b.block(&[]);

    let not = b.not(yes).unwrap();
    assert_eq!(b.arena().ty(not), TypeId::BOOLEAN);
    let or = b.cond_or(yes, not).unwrap();
    assert_eq!(b.arena().ty(or), TypeId::BOOLEAN);
    assert!(b.if_stmt(or, then_branch, StmtId::INVALID).is_ok());

    assert_eq!(
        b.if_stmt(one, then_branch, StmtId::INVALID),
        Err(LowerError::NotBoolean { context: "condition", ty: "int".to_owned() })
    );
    assert!(b.not(one).is_err());
    assert!(b.cond_or(yes, one).is_err());
}

#[test]
fn array_access_is_typed_by_the_element() {
    let mut h = Harness::new();
    let mut b = h.builder();
    let zero = b.int_lit(0);
    let c = b.char_lit(u16::from(b'z'));
    let array = b.new_array_init(TypeId::CHAR, &[c]);
    let access = b.array_access(array, zero, true).unwrap();

    assert_eq!(b.arena().ty(access), TypeId::CHAR);
    assert_eq!(b.arena().kind(access), ExprKind::ArrayAccess { base: array, index: zero, guarded: true });
    assert_eq!(
        b.array_access(zero, zero, false),
        Err(LowerError::NotAnArray { ty: "int".to_owned() })
    );
}

#[test]
fn allocation_and_throw() {
    let mut h = Harness::new();
    let object = h.ts.well_known().object_ty;
    let shape_c = h.ts.declare_class("app.Shape", ClassFlags::INTERFACE | ClassFlags::ABSTRACT);
    let shape = h.ts.class_type(shape_c);
    let mut b = h.builder();

    let thrown = b.throw(object, &[]).unwrap();
    let StmtKind::Throw(exception) = b.arena().stmt(thrown).kind else { panic!("throw expected") };
    assert_eq!(b.arena().ty(exception), object);
    assert!(matches!(b.arena().kind(exception), ExprKind::New { .. }));

    assert_eq!(b.new_object(shape, ExprId::INVALID, &[]), Err(LowerError::NotInstantiable { ty: "app.Shape".to_owned() }));
    assert_eq!(
        b.new_object(TypeId::INT, ExprId::INVALID, &[]),
        Err(LowerError::NotInstantiable { ty: "int".to_owned() })
    );
    let one = b.int_lit(1);
    assert!(matches!(b.new_object(object, ExprId::INVALID, &[one]), Err(LowerError::Lookup(_))));
}

#[test]
fn super_constructor_call() {
    let mut h = Harness::new();
    let object = h.ts.well_known().object_ty;
    let mut b = h.builder();
    let stmt = b.constructor_call(ConstructorCallKind::Super, object, &[]).unwrap();
    let StmtKind::ConstructorCall { kind, ctor, args } = b.arena().stmt(stmt).kind else {
        panic!("constructor call expected")
    };
    assert_eq!(kind, ConstructorCallKind::Super);
    assert!(args.is_empty());
    assert_eq!(b.ts().member_display(ctor), "core.Object.<init>()");
}

#[test]
fn assignment_needs_an_lvalue() {
    let mut h = Harness::new();
    let mut b = h.builder();
    let x = b.formal("x", TypeId::INT, LocalFlags::empty());
    let target = b.local(x);
    let one = b.int_lit(1);
    let stmt = b.eval_assign(target, one).unwrap();
    let StmtKind::Eval(assign) = b.arena().stmt(stmt).kind else { panic!("eval expected") };
    assert_eq!(b.arena().kind(assign), ExprKind::Assign { target, value: one });
    assert_eq!(b.arena().ty(assign), TypeId::INT);

    assert!(matches!(b.eval_assign(one, target), Err(LowerError::NotAnLvalue { .. })));
}

#[test]
fn type_tests_and_literals() {
    let mut h = Harness::new();
    let object = h.ts.well_known().object_ty;
    let string = h.ts.well_known().string_ty;
    let mut b = h.builder();
    let null = b.null_lit();
    assert_eq!(b.arena().ty(null), TypeId::NULL);

    let test = b.instance_of(null, string).unwrap();
    assert_eq!(b.arena().ty(test), TypeId::BOOLEAN);
    let cast = b.cast(null, string);
    assert_eq!(b.arena().ty(cast), string);
    let lit = b.class_lit(string).unwrap();
    assert_eq!(b.arena().ty(lit), object);
    assert_eq!(b.class_lit(TypeId::INT), Err(LowerError::NotAReference { ty: "int".to_owned() }));

    let (_, decl) = b.temp_var("t", string, cast);
    let seq = b.eseq(&[decl], test);
    assert_eq!(b.arena().ty(seq), TypeId::BOOLEAN);
}
