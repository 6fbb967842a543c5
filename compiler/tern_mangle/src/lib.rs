//! Symbol mangling for the Tern object model.
//!
//! Every name the generated code shares with the runtime support library
//! comes from here. The runtime splits these names apart when it builds
//! dispatch vectors and interface tables at class-initialization time, so
//! the encoding below is a link-level contract.
//!
//! # Mangling Scheme
//!
//! Variable-length components are prefixed with their byte length, which
//! makes any concatenation of them uniquely splittable.
//!
//! | Symbol | Encoding |
//! |---|---|
//! | Class type name | `class.` + name (arrays: `class.support.Array`) |
//! | Interface type name | `interface.` + name |
//! | Dispatch-vector type name | `dv.` + class name |
//! | Interface-table type name | `itable.` + interface name |
//! | Method | `_tern_` + len(container) container `_` + len(name) name + arg codes, or `_void` |
//! | Constructor | `_tern_` + len(container) container `__constructor_` + arg codes, or `_void` |
//! | Static field | `_tern_static_` + class type name + `_` + field |
//! | Size | `_tern_size_` + len(class) class |
//! | Dispatch vector | `_tern_dv_` + len(class) class |
//! | Interface table | `_tern_it_` + len(iface) iface + `_` + len(class) class |
//! | Class init | `_tern_init_` + len(class) class |
//! | Interfaces init | `_tern_it_init_` + len(type) type |
//! | Interface descriptor | `_tern_itype_` + len(iface) iface |
//!
//! Argument codes: reference `_` + len(name) name, array `_a` + code(element),
//! integral `_i` + bit width, `boolean` `_b`, `float` `_f`, `double` `_d`.
//!
//! # Examples
//!
//! | Member | Mangled Name |
//! |---|---|
//! | `core.String.concat(core.String)` | `_tern_11core.String_6concat_11core.String` |
//! | `core.Object.hashCode()` | `_tern_11core.Object_8hashCode_void` |
//! | `core.String.<init>(char[])` | `_tern_11core.String__constructor__a_i16` |
//!
//! The mangler expects canonical input (see `tern_erase`): instantiations,
//! type variables and lub placeholders are rejected, not erased.

mod decompose;
mod error;
mod layout;
mod mangler;

pub use decompose::{decompose, demangle, is_tern_symbol, ArgCode, Symbol};
pub use error::MangleError;
pub use layout::{LayoutCache, LayoutSymbols};
pub use mangler::Mangler;

/// Prefix of every mangled symbol.
pub const MANGLE_PREFIX: &str = "_tern_";

/// Class name standing in for every array type.
pub const ARRAY_CLASS_NAME: &str = "class.support.Array";

/// Marker between a constructor's container and its argument codes.
pub const CONSTRUCTOR_MARKER: &str = "__constructor_";

/// Argument list of a procedure with no formals.
pub const VOID_ARGS: &str = "_void";

pub(crate) const STATIC_MARKER: &str = "static_";
pub(crate) const SIZE_MARKER: &str = "size_";
pub(crate) const DV_MARKER: &str = "dv_";
pub(crate) const ITABLE_MARKER: &str = "it_";
pub(crate) const INIT_MARKER: &str = "init_";
pub(crate) const IT_INIT_MARKER: &str = "it_init_";
pub(crate) const ITYPE_MARKER: &str = "itype_";
