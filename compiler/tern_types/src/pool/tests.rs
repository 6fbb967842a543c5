use super::*;
use pretty_assertions::assert_eq;
use smallvec::smallvec;

#[test]
fn primitives_are_pre_interned() {
    let pool = Pool::new();
    for prim in PrimKind::ALL {
        assert_eq!(pool.kind(prim.type_id()), TypeKind::Prim(prim));
        assert!(pool.flags(prim.type_id()).contains(TypeFlags::IS_PRIMITIVE));
    }
    assert_eq!(pool.kind(TypeId::NULL), TypeKind::Null);
    assert_eq!(pool.len(), TypeId::FIRST_DYNAMIC as usize);
}

#[test]
fn structural_types_are_hash_consed() {
    let mut pool = Pool::new();
    let a = pool.array(TypeId::INT);
    let b = pool.array(TypeId::INT);
    let c = pool.array(TypeId::LONG);
    assert_eq!(a, b);
    assert_ne!(a, c);
    let aa = pool.array(a);
    assert_eq!(pool.kind(aa), TypeKind::Array(a));
}

#[test]
fn subst_bindings_are_sorted_and_interned() {
    let mut pool = Pool::new();
    let v0 = TypeVarId::from_raw(0);
    let v1 = TypeVarId::from_raw(1);
    let s1 = pool.intern_subst(smallvec![(v1, TypeId::NULL), (v0, TypeId::NULL)]);
    let s2 = pool.intern_subst(smallvec![(v0, TypeId::NULL), (v1, TypeId::NULL)]);
    assert_eq!(s1, s2);
    assert_eq!(pool.subst(s1), &[(v0, TypeId::NULL), (v1, TypeId::NULL)]);
    assert_eq!(pool.subst_lookup(s1, v1), Some(TypeId::NULL));
    assert_eq!(pool.subst_lookup(SubstId::EMPTY, v1), None);
}

#[test]
fn flags_propagate_from_children() {
    let mut pool = Pool::new();
    let var = pool.type_var(TypeVarId::from_raw(0));
    let arr = pool.array(var);
    assert!(pool.flags(arr).contains(TypeFlags::HAS_TYPE_VAR | TypeFlags::IS_ARRAY));
    assert!(!pool.flags(arr).is_erased());

    let class = pool.class(ClassId::from_raw(0));
    let s = pool.intern_subst(smallvec![(TypeVarId::from_raw(0), class)]);
    let inst = pool.subst_class(ClassId::from_raw(1), s, TypeId::NONE);
    assert!(pool.flags(inst).contains(TypeFlags::HAS_SUBST));
    assert!(!pool.flags(inst).contains(TypeFlags::HAS_TYPE_VAR));
    assert!(pool.flags(class).is_erased());
}

#[test]
fn lub_of_single_candidate_collapses() {
    let mut pool = Pool::new();
    let class = pool.class(ClassId::from_raw(3));
    assert_eq!(pool.lub_of(&[class, class]), class);

    let other = pool.class(ClassId::from_raw(4));
    let lub = pool.lub_of(&[other, class]);
    let TypeKind::Lub(id) = pool.kind(lub) else {
        panic!("expected lub, got {:?}", pool.kind(lub));
    };
    assert_eq!(pool.lub(id), &[class, other]);
    assert_eq!(pool.lub_of(&[class, other]), lub);
}
