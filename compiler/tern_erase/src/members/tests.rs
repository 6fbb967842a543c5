#![allow(clippy::unwrap_used)]

use crate::test_fixtures::{fixture, Fixture};
use crate::{CanonError, Eraser};
use pretty_assertions::assert_eq;
use smallvec::smallvec;
use tern_ir::{MemberId, TypeId};
use tern_types::{ClassFlags, MemberFlags, MemberKind};

fn method_sig(f: &Fixture, m: MemberId) -> (Vec<TypeId>, TypeId) {
    match &f.ts.member(m).kind {
        MemberKind::Method { formals, ret, .. } => (formals.to_vec(), *ret),
        other => panic!("expected method, got {other:?}"),
    }
}

#[test]
fn declaration_in_generic_class_erases_to_bounds() {
    let mut f = fixture();
    let mut eraser = Eraser::new();
    let canonical = eraser.canonicalize_member(&mut f.ts, f.box_get).unwrap();
    let raw_box = f.ts.class_type(f.boxed);

    assert_eq!(f.ts.member(canonical).container, raw_box);
    assert_eq!(method_sig(&f, canonical), (vec![], f.object));
    assert_eq!(f.ts.member(canonical).decl, f.box_get);
}

#[test]
fn instantiations_converge_on_one_member() {
    let mut f = fixture();
    let mut eraser = Eraser::new();
    let of_string = f.ts.instantiate(f.boxed, &[f.string], None);
    let of_number = f.ts.instantiate(f.boxed, &[f.number], None);
    let via_string = f.ts.member_in(f.box_set, of_string);
    let via_number = f.ts.member_in(f.box_set, of_number);
    assert_ne!(via_string, via_number);

    let a = eraser.canonicalize_member(&mut f.ts, via_string).unwrap();
    let b = eraser.canonicalize_member(&mut f.ts, via_number).unwrap();
    let c = eraser.canonicalize_member(&mut f.ts, f.box_set).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, c);
    assert_eq!(method_sig(&f, a), (vec![f.object], TypeId::VOID));
}

#[test]
fn fields_reconcile_like_methods() {
    let mut f = fixture();
    let mut eraser = Eraser::new();
    let of_string = f.ts.instantiate(f.boxed, &[f.string], None);
    let image = f.ts.member_in(f.box_value, of_string);
    let canonical = eraser.canonicalize_member(&mut f.ts, image).unwrap();
    let value = f.ts.intern("value");
    assert_eq!(f.ts.member(canonical).kind, MemberKind::Field { name: value, ty: f.object });
    assert_eq!(canonical, eraser.canonicalize_member(&mut f.ts, f.box_value).unwrap());
}

#[test]
fn inherited_member_through_subclass_instantiation() {
    let mut f = fixture();
    let mut eraser = Eraser::new();
    let sub = f.ts.declare_class("app.Sub", ClassFlags::empty());
    let x = f.ts.add_type_param(sub, "X", None);
    let x_ty = f.ts.type_var_type(x);
    let box_of_x = f.ts.instantiate(f.boxed, &[x_ty], None);
    f.ts.set_superclass(sub, box_of_x);
    let sub_of_string = f.ts.instantiate(sub, &[f.string], None);

    let found = f.ts.find_method(sub_of_string, "get", &[]).unwrap();
    let box_of_string = f.ts.instantiate(f.boxed, &[f.string], None);
    assert_eq!(f.ts.member(found).container, box_of_string);

    let via_sub = eraser.canonicalize_member(&mut f.ts, found).unwrap();
    let direct = eraser.canonicalize_member(&mut f.ts, f.box_get).unwrap();
    assert_eq!(via_sub, direct);
}

#[test]
fn inferred_generic_method_matches_its_declaration() {
    let mut f = fixture();
    let mut eraser = Eraser::new();
    let of_string = f.ts.instantiate(f.boxed, &[f.string], None);
    let image = f.ts.member_in(f.box_map, of_string);
    let inferred = f.ts.instantiate_method(image, &[f.number]);
    assert_eq!(method_sig(&f, inferred), (vec![f.number], f.number));

    let from_call = eraser.canonicalize_member(&mut f.ts, inferred).unwrap();
    let from_decl = eraser.canonicalize_member(&mut f.ts, f.box_map).unwrap();
    assert_eq!(from_call, from_decl);
    assert_eq!(method_sig(&f, from_call), (vec![f.object], f.object));
    assert!(f.ts.member(from_call).kind.type_params().is_empty());
}

#[test]
fn nested_generic_inner_class_member() {
    let mut f = fixture();
    let mut eraser = Eraser::new();
    let outer_of_string = f.ts.instantiate(f.outer, &[f.string], None);
    let inner_inst = f.ts.instantiate(f.inner, &[f.number], Some(outer_of_string));
    let image = f.ts.member_in(f.inner_pick, inner_inst);
    assert_eq!(method_sig(&f, image), (vec![f.number], f.string));

    let canonical = eraser.canonicalize_member(&mut f.ts, image).unwrap();
    let raw_inner = f.ts.class_type(f.inner);
    assert_eq!(f.ts.member(canonical).container, raw_inner);
    assert_eq!(method_sig(&f, canonical), (vec![f.object], f.object));
    assert_eq!(canonical, eraser.canonicalize_member(&mut f.ts, f.inner_pick).unwrap());
    let raw_outer = f.ts.class_type(f.outer);
    assert_eq!(eraser.canonical_outer(&mut f.ts, f.inner), Some(raw_outer));
}

#[test]
fn non_generic_container_erases_signature_only() {
    let mut f = fixture();
    let mut eraser = Eraser::new();
    let canonical = eraser.canonicalize_member(&mut f.ts, f.plain_take).unwrap();
    let raw_box = f.ts.class_type(f.boxed);
    let plain = f.ts.class_type(f.plain);
    assert_eq!(f.ts.member(canonical).container, plain);
    assert_eq!(method_sig(&f, canonical), (vec![raw_box], TypeId::VOID));
}

#[test]
fn already_canonical_members_are_unchanged() {
    let mut f = fixture();
    let mut eraser = Eraser::new();
    let concat = f.ts.find_method(f.string, "concat", &[f.string]).unwrap();
    assert_eq!(eraser.canonicalize_member(&mut f.ts, concat), Ok(concat));

    let init = f.ts.declare_member(f.boxed, MemberKind::Initializer, MemberFlags::STATIC);
    assert_eq!(eraser.canonicalize_member(&mut f.ts, init), Ok(init));
}

#[test]
fn canonicalization_is_idempotent() {
    let mut f = fixture();
    let mut eraser = Eraser::new();
    let of_string = f.ts.instantiate(f.boxed, &[f.string], None);
    for decl in [f.box_value, f.box_get, f.box_set, f.box_map] {
        let image = f.ts.member_in(decl, of_string);
        let once = eraser.canonicalize_member(&mut f.ts, image).unwrap();
        assert_eq!(eraser.canonicalize_member(&mut f.ts, once), Ok(once));
        let mut fresh = Eraser::new();
        assert_eq!(fresh.canonicalize_member(&mut f.ts, once), Ok(once));
    }
}

#[test]
fn unreconcilable_member_is_fatal() {
    let mut f = fixture();
    let mut eraser = Eraser::new();
    let of_string = f.ts.instantiate(f.boxed, &[f.string], None);
    let bogus_name = f.ts.intern("missing");
    // Claims `Box<String>` as container, but Box declares nothing like it.
    let bogus = f.ts.derive_member(
        f.plain_take,
        MemberKind::Method {
            name: bogus_name,
            formals: smallvec![TypeId::INT],
            ret: TypeId::VOID,
            type_params: smallvec![],
        },
        of_string,
    );

    let err = eraser.canonicalize_member(&mut f.ts, bogus).unwrap_err();
    assert_eq!(
        err,
        CanonError::Unreconcilable {
            member: "util.Box<core.String>.missing(int)".to_owned(),
            container: "util.Box<core.String>".to_owned(),
        }
    );
    assert_eq!(eraser.cached_members(), 0);
}
