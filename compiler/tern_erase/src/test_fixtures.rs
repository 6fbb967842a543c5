//! Class hierarchy shared by the canonicalizer tests.
//!
//! ```text
//! class Box<T>                  { T value; T get(); void set(T); <U> U map(U) }
//! class Pair<A, B extends Number>
//! class Number
//! class Outer<T>                { class Inner<U> { T left; U right; T pick(U) } }
//! class Plain                   { void take(Box<String>) }
//! ```

use smallvec::smallvec;

use tern_ir::{ClassId, MemberId, TypeId};
use tern_types::{ClassFlags, MemberFlags, MemberKind, TypeSystem, TypeVarId};

pub struct Fixture {
    pub ts: TypeSystem,
    pub object: TypeId,
    pub string: TypeId,
    pub number: TypeId,
    pub boxed: ClassId,
    pub box_t: TypeVarId,
    pub box_value: MemberId,
    pub box_get: MemberId,
    pub box_set: MemberId,
    pub box_map: MemberId,
    pub pair: ClassId,
    pub outer: ClassId,
    pub inner: ClassId,
    pub inner_pick: MemberId,
    pub plain: ClassId,
    pub plain_take: MemberId,
}

fn method(ts: &TypeSystem, name: &str, formals: &[TypeId], ret: TypeId) -> MemberKind {
    MemberKind::Method {
        name: ts.intern(name),
        formals: formals.iter().copied().collect(),
        ret,
        type_params: smallvec![],
    }
}

pub fn fixture() -> Fixture {
    let mut ts = TypeSystem::new();
    let object = ts.well_known().object_ty;
    let string = ts.well_known().string_ty;

    let number_c = ts.declare_class("lang.Number", ClassFlags::ABSTRACT);
    let number = ts.class_type(number_c);

    let boxed = ts.declare_class("util.Box", ClassFlags::empty());
    let box_t = ts.add_type_param(boxed, "T", None);
    let t = ts.type_var_type(box_t);
    let value = ts.intern("value");
    let box_value = ts.declare_member(boxed, MemberKind::Field { name: value, ty: t }, MemberFlags::empty());
    let box_get = ts.declare_member(boxed, method(&ts, "get", &[], t), MemberFlags::empty());
    let box_set = ts.declare_member(boxed, method(&ts, "set", &[t], TypeId::VOID), MemberFlags::empty());
    let u = ts.new_method_type_param("U", None);
    let u_ty = ts.type_var_type(u);
    let map = ts.intern("map");
    let box_map = ts.declare_member(
        boxed,
        MemberKind::Method { name: map, formals: smallvec![u_ty], ret: u_ty, type_params: smallvec![u] },
        MemberFlags::empty(),
    );

    let pair = ts.declare_class("util.Pair", ClassFlags::FINAL);
    ts.add_type_param(pair, "A", None);
    ts.add_type_param(pair, "B", Some(number));

    let outer = ts.declare_class("util.Outer", ClassFlags::empty());
    let outer_t = ts.add_type_param(outer, "T", None);
    let outer_t_ty = ts.type_var_type(outer_t);
    let outer_self = ts.instantiate(outer, &[outer_t_ty], None);
    let inner = ts.declare_class("util.Outer.Inner", ClassFlags::empty());
    ts.set_outer(inner, outer_self);
    let inner_u = ts.add_type_param(inner, "U", None);
    let inner_u_ty = ts.type_var_type(inner_u);
    let left = ts.intern("left");
    let right = ts.intern("right");
    ts.declare_member(inner, MemberKind::Field { name: left, ty: outer_t_ty }, MemberFlags::empty());
    ts.declare_member(inner, MemberKind::Field { name: right, ty: inner_u_ty }, MemberFlags::empty());
    let inner_pick = ts.declare_member(
        inner,
        method(&ts, "pick", &[inner_u_ty], outer_t_ty),
        MemberFlags::empty(),
    );

    let plain = ts.declare_class("app.Plain", ClassFlags::empty());
    let box_of_string = ts.instantiate(boxed, &[string], None);
    let plain_take = ts.declare_member(
        plain,
        method(&ts, "take", &[box_of_string], TypeId::VOID),
        MemberFlags::empty(),
    );

    Fixture {
        ts,
        object,
        string,
        number,
        boxed,
        box_t,
        box_value,
        box_get,
        box_set,
        box_map,
        pair,
        outer,
        inner,
        inner_pick,
        plain,
        plain_take,
    }
}
