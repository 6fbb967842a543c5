use crate::{decompose, demangle, is_tern_symbol, ArgCode, Symbol};
use pretty_assertions::assert_eq;

fn reference(name: &str) -> ArgCode {
    ArgCode::Reference(name.to_owned())
}

#[test]
fn methods_and_constructors() {
    assert_eq!(
        decompose("_tern_11core.String_6concat_11core.String"),
        Some(Symbol::Method {
            container: "core.String".to_owned(),
            name: "concat".to_owned(),
            args: vec![reference("core.String")],
        })
    );
    assert_eq!(
        decompose("_tern_11core.Object_8hashCode_void"),
        Some(Symbol::Method { container: "core.Object".to_owned(), name: "hashCode".to_owned(), args: vec![] })
    );
    assert_eq!(
        decompose("_tern_6pkg.Pt__constructor__i32_a_a_11core.Object"),
        Some(Symbol::Constructor {
            container: "pkg.Pt".to_owned(),
            args: vec![
                ArgCode::Int(32),
                ArgCode::Array(Box::new(ArgCode::Array(Box::new(reference("core.Object"))))),
            ],
        })
    );
    assert_eq!(
        decompose("_tern_6pkg.Pt__constructor__void"),
        Some(Symbol::Constructor { container: "pkg.Pt".to_owned(), args: vec![] })
    );
}

#[test]
fn method_names_may_contain_separators() {
    assert_eq!(
        decompose("_tern_6pkg.Pt_7__ctor__b"),
        Some(Symbol::Method { container: "pkg.Pt".to_owned(), name: "__ctor_".to_owned(), args: vec![ArgCode::Boolean] })
    );
}

#[test]
fn layout_symbols() {
    assert_eq!(decompose("_tern_size_6pkg.Pt"), Some(Symbol::Size { class: "pkg.Pt".to_owned() }));
    assert_eq!(
        decompose("_tern_dv_19class.support.Array"),
        Some(Symbol::DispatchVector { class: "class.support.Array".to_owned() })
    );
    assert_eq!(
        decompose("_tern_it_9pkg.Shape_10pkg.Circle"),
        Some(Symbol::InterfaceTable { interface: "pkg.Shape".to_owned(), class: "pkg.Circle".to_owned() })
    );
    assert_eq!(decompose("_tern_init_6pkg.Pt"), Some(Symbol::ClassInit { class: "pkg.Pt".to_owned() }));
    assert_eq!(decompose("_tern_it_init_6pkg.Pt"), Some(Symbol::InterfacesInit { class: "pkg.Pt".to_owned() }));
    assert_eq!(
        decompose("_tern_itype_9pkg.Shape"),
        Some(Symbol::InterfaceDescriptor { interface: "pkg.Shape".to_owned() })
    );
}

#[test]
fn static_fields_split_after_the_class_name() {
    assert_eq!(
        decompose("_tern_static_class.pkg.Pt_MAX_VALUE"),
        Some(Symbol::StaticField { class_type: "class.pkg.Pt".to_owned(), field: "MAX_VALUE".to_owned() })
    );
    assert_eq!(
        decompose("_tern_static_interface.pkg.Shape_SIDES"),
        Some(Symbol::StaticField { class_type: "interface.pkg.Shape".to_owned(), field: "SIDES".to_owned() })
    );
    assert_eq!(decompose("_tern_static_pkg.Pt_X"), None);
    assert_eq!(decompose("_tern_static_class.pkg.Pt_"), None);
}

#[test]
fn malformed_names() {
    for name in [
        "",
        "main",
        "_tern_",
        "_tern_3ab",
        "_tern_6pkg.Pt_1m",
        "_tern_6pkg.Pt_1m_q",
        "_tern_6pkg.Pt_1m_void_b",
        "_tern_6pkg.Pt_1m_i",
        "_tern_99pkg.Pt_1m_void",
        "_tern_size_6pkg.Pt_extra",
        "_tern_it_9pkg.Shape",
        "_tern_0_1m_void",
    ] {
        assert_eq!(decompose(name), None, "{name}");
    }
}

#[test]
fn demangled_rendering() {
    assert_eq!(
        demangle("_tern_11core.String_6concat_11core.String").as_deref(),
        Some("core.String.concat(core.String)")
    );
    assert_eq!(
        demangle("_tern_6pkg.Pt_1m_b_i8_i16_i32_i64_f_d").as_deref(),
        Some("pkg.Pt.m(boolean, byte, short, int, long, float, double)")
    );
    assert_eq!(
        demangle("_tern_11core.String__constructor__a_i16").as_deref(),
        Some("core.String.<init>(short[])")
    );
    assert_eq!(demangle("_tern_static_class.pkg.Pt_ORIGIN").as_deref(), Some("static pkg.Pt.ORIGIN"));
    assert_eq!(
        demangle("_tern_it_9pkg.Shape_10pkg.Circle").as_deref(),
        Some("interface table of pkg.Circle for pkg.Shape")
    );
    assert_eq!(demangle("printf"), None);
}

#[test]
fn symbol_prefix() {
    assert!(is_tern_symbol("_tern_size_6pkg.Pt"));
    assert!(!is_tern_symbol("_ZN3foo3barE"));
}
