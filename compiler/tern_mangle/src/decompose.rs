//! Splitting mangled names back into their components.
//!
//! The runtime performs the same split when it matches interface methods
//! against dispatch-vector slots; this module is the compiler-side mirror
//! used by diagnostics and the `ternc demangle` tool.

use std::fmt;

use crate::{
    CONSTRUCTOR_MARKER, DV_MARKER, INIT_MARKER, ITABLE_MARKER, ITYPE_MARKER,
    IT_INIT_MARKER, MANGLE_PREFIX, SIZE_MARKER, STATIC_MARKER, VOID_ARGS,
};

#[cfg(test)]
mod tests;

/// One decoded argument code.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArgCode {
    Boolean,
    Float,
    Double,
    /// Integral type of the given bit width. `char` and `short` share 16.
    Int(u32),
    Array(Box<ArgCode>),
    Reference(String),
}

impl fmt::Display for ArgCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgCode::Boolean => f.write_str("boolean"),
            ArgCode::Float => f.write_str("float"),
            ArgCode::Double => f.write_str("double"),
            ArgCode::Int(8) => f.write_str("byte"),
            ArgCode::Int(16) => f.write_str("short"),
            ArgCode::Int(32) => f.write_str("int"),
            ArgCode::Int(64) => f.write_str("long"),
            ArgCode::Int(bits) => write!(f, "i{bits}"),
            ArgCode::Array(elem) => write!(f, "{elem}[]"),
            ArgCode::Reference(name) => f.write_str(name),
        }
    }
}

/// A decomposed symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Symbol {
    Method { container: String, name: String, args: Vec<ArgCode> },
    Constructor { container: String, args: Vec<ArgCode> },
    /// `class_type` keeps its `class.`/`interface.` prefix.
    StaticField { class_type: String, field: String },
    Size { class: String },
    DispatchVector { class: String },
    InterfaceTable { interface: String, class: String },
    ClassInit { class: String },
    InterfacesInit { class: String },
    InterfaceDescriptor { interface: String },
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Method { container, name, args } => {
                write!(f, "{container}.{name}(")?;
                write_args(f, args)?;
                f.write_str(")")
            }
            Symbol::Constructor { container, args } => {
                write!(f, "{container}.<init>(")?;
                write_args(f, args)?;
                f.write_str(")")
            }
            Symbol::StaticField { class_type, field } => {
                let class = class_type
                    .strip_prefix("class.")
                    .or_else(|| class_type.strip_prefix("interface."))
                    .unwrap_or(class_type);
                write!(f, "static {class}.{field}")
            }
            Symbol::Size { class } => write!(f, "size of {class}"),
            Symbol::DispatchVector { class } => write!(f, "dispatch vector of {class}"),
            Symbol::InterfaceTable { interface, class } => {
                write!(f, "interface table of {class} for {interface}")
            }
            Symbol::ClassInit { class } => write!(f, "class initializer of {class}"),
            Symbol::InterfacesInit { class } => write!(f, "interface tables initializer of {class}"),
            Symbol::InterfaceDescriptor { interface } => write!(f, "interface descriptor of {interface}"),
        }
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[ArgCode]) -> fmt::Result {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{arg}")?;
    }
    Ok(())
}

/// Check if a name was produced by the mangler.
pub fn is_tern_symbol(name: &str) -> bool {
    name.starts_with(MANGLE_PREFIX)
}

/// Human-readable rendering of a mangled symbol.
///
/// - `_tern_11core.String_6concat_11core.String` → `core.String.concat(core.String)`
/// - `_tern_size_6pkg.Pt` → `size of pkg.Pt`
pub fn demangle(mangled: &str) -> Option<String> {
    decompose(mangled).map(|symbol| symbol.to_string())
}

/// Split a mangled name into its components.
///
/// Returns `None` for names the mangler cannot have produced.
///
/// Static-field names carry no length prefixes; the split is taken at the
/// first `_` after the last `.` of the class type name.
pub fn decompose(mangled: &str) -> Option<Symbol> {
    let rest = mangled.strip_prefix(MANGLE_PREFIX)?;

    if let Some(rest) = rest.strip_prefix(STATIC_MARKER) {
        return decompose_static_field(rest);
    }
    if let Some(rest) = rest.strip_prefix(SIZE_MARKER) {
        return whole_component(rest).map(|class| Symbol::Size { class });
    }
    if let Some(rest) = rest.strip_prefix(DV_MARKER) {
        return whole_component(rest).map(|class| Symbol::DispatchVector { class });
    }
    if let Some(rest) = rest.strip_prefix(IT_INIT_MARKER) {
        return whole_component(rest).map(|class| Symbol::InterfacesInit { class });
    }
    if let Some(rest) = rest.strip_prefix(ITYPE_MARKER) {
        return whole_component(rest).map(|interface| Symbol::InterfaceDescriptor { interface });
    }
    if let Some(rest) = rest.strip_prefix(ITABLE_MARKER) {
        let mut cursor = Cursor::new(rest);
        let interface = cursor.component()?;
        cursor.expect("_")?;
        let class = cursor.component()?;
        return cursor.is_done().then(|| Symbol::InterfaceTable {
            interface: interface.to_owned(),
            class: class.to_owned(),
        });
    }
    if let Some(rest) = rest.strip_prefix(INIT_MARKER) {
        return whole_component(rest).map(|class| Symbol::ClassInit { class });
    }
    decompose_procedure(rest)
}

fn decompose_procedure(rest: &str) -> Option<Symbol> {
    let mut cursor = Cursor::new(rest);
    let container = cursor.component()?.to_owned();
    if cursor.expect(CONSTRUCTOR_MARKER).is_some() {
        let args = cursor.arg_codes()?;
        return Some(Symbol::Constructor { container, args });
    }
    cursor.expect("_")?;
    let name = cursor.component()?.to_owned();
    let args = cursor.arg_codes()?;
    Some(Symbol::Method { container, name, args })
}

fn decompose_static_field(rest: &str) -> Option<Symbol> {
    if !(rest.starts_with("class.") || rest.starts_with("interface.")) {
        return None;
    }
    let last_dot = rest.rfind('.')?;
    let split = last_dot + rest[last_dot..].find('_')?;
    let field = &rest[split + 1..];
    if field.is_empty() {
        return None;
    }
    Some(Symbol::StaticField { class_type: rest[..split].to_owned(), field: field.to_owned() })
}

fn whole_component(rest: &str) -> Option<String> {
    let mut cursor = Cursor::new(rest);
    let component = cursor.component()?;
    cursor.is_done().then(|| component.to_owned())
}

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Cursor { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn is_done(&self) -> bool {
        self.pos == self.input.len()
    }

    fn expect(&mut self, literal: &str) -> Option<()> {
        if self.rest().starts_with(literal) {
            self.pos += literal.len();
            Some(())
        } else {
            None
        }
    }

    fn number(&mut self) -> Option<usize> {
        let digits = self.rest().bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        let value = self.rest()[..digits].parse().ok()?;
        self.pos += digits;
        Some(value)
    }

    /// A length-prefixed component.
    fn component(&mut self) -> Option<&'a str> {
        let len = self.number()?;
        let component = self.rest().get(..len)?;
        if component.is_empty() {
            return None;
        }
        self.pos += len;
        Some(component)
    }

    fn arg_codes(&mut self) -> Option<Vec<ArgCode>> {
        if self.rest() == VOID_ARGS {
            self.pos = self.input.len();
            return Some(Vec::new());
        }
        let mut args = Vec::new();
        while !self.is_done() {
            self.expect("_")?;
            args.push(self.arg_code()?);
        }
        (!args.is_empty()).then_some(args)
    }

    /// One argument code, with its leading `_` already consumed.
    fn arg_code(&mut self) -> Option<ArgCode> {
        let next = self.rest().bytes().next()?;
        match next {
            b'b' => {
                self.pos += 1;
                Some(ArgCode::Boolean)
            }
            b'f' => {
                self.pos += 1;
                Some(ArgCode::Float)
            }
            b'd' => {
                self.pos += 1;
                Some(ArgCode::Double)
            }
            b'i' => {
                self.pos += 1;
                let bits = u32::try_from(self.number()?).ok()?;
                Some(ArgCode::Int(bits))
            }
            b'a' => {
                self.pos += 1;
                self.expect("_")?;
                Some(ArgCode::Array(Box::new(self.arg_code()?)))
            }
            b'0'..=b'9' => {
                let name = self.component()?;
                Some(ArgCode::Reference(name.to_owned()))
            }
            _ => None,
        }
    }
}
