//! The core library every program links against.
//!
//! Only the entry points the runtime support library provides and the
//! lowering passes call are declared here.

use smallvec::{smallvec, SmallVec};

use tern_ir::TypeId;

use crate::class::ClassFlags;
use crate::member::{MemberFlags, MemberKind};
use crate::TypeSystem;

pub const OBJECT: &str = "core.Object";
pub const STRING: &str = "core.String";

pub(crate) fn install(ts: &mut TypeSystem) {
    let object = ts.declare_class(OBJECT, ClassFlags::empty());
    let object_ty = ts.class_type(object);
    {
        let wk = ts.well_known_mut();
        wk.object = object;
        wk.object_ty = object_ty;
    }

    let string = ts.declare_class(STRING, ClassFlags::FINAL);
    let string_ty = ts.class_type(string);
    let char_array = ts.array(TypeId::CHAR);
    {
        let wk = ts.well_known_mut();
        wk.string = string;
        wk.string_ty = string_ty;
        wk.char_array = char_array;
    }

    let ctor = |formals: SmallVec<[TypeId; 4]>| MemberKind::Constructor {
        formals,
        type_params: SmallVec::new(),
    };

    ts.declare_member(object, ctor(smallvec![]), MemberFlags::empty());
    declare_method(ts, object, "toString", smallvec![], string_ty, MemberFlags::empty());
    declare_method(ts, object, "equals", smallvec![object_ty], TypeId::BOOLEAN, MemberFlags::empty());
    declare_method(ts, object, "hashCode", smallvec![], TypeId::INT, MemberFlags::empty());

    ts.declare_member(string, ctor(smallvec![char_array]), MemberFlags::empty());
    declare_method(ts, string, "concat", smallvec![string_ty], string_ty, MemberFlags::FINAL);
    declare_method(ts, string, "length", smallvec![], TypeId::INT, MemberFlags::FINAL);
    declare_method(ts, string, "toString", smallvec![], string_ty, MemberFlags::FINAL);
    for arg in [
        TypeId::BOOLEAN,
        TypeId::CHAR,
        TypeId::INT,
        TypeId::LONG,
        TypeId::FLOAT,
        TypeId::DOUBLE,
        object_ty,
    ] {
        declare_method(ts, string, "valueOf", smallvec![arg], string_ty, MemberFlags::STATIC);
    }
}

fn declare_method(
    ts: &mut TypeSystem,
    class: tern_ir::ClassId,
    name: &str,
    formals: SmallVec<[TypeId; 4]>,
    ret: TypeId,
    flags: MemberFlags,
) {
    let name = ts.intern(name);
    ts.declare_member(
        class,
        MemberKind::Method {
            name,
            formals,
            ret,
            type_params: SmallVec::new(),
        },
        flags,
    );
}
