//! Per-class layout symbols, computed once per class.

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;

use tern_ir::{ClassId, TypeId};

use crate::{MangleError, Mangler};


/// Every layout name the backend emits for one class, interface or the
/// shared array class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutSymbols {
    /// `class.X` or `interface.X`.
    pub type_name: String,
    /// `dv.X` or `itable.X`.
    pub table_type_name: String,
    pub size: String,
    /// Dispatch-vector instance for classes; the interface's own table for
    /// interfaces.
    pub table: String,
    pub class_init: String,
    pub interfaces_init: String,
    /// Runtime descriptor, interfaces only.
    pub descriptor: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum LayoutKey {
    Class(ClassId),
    Array,
}

/// Memo of [`LayoutSymbols`] and interface-table names.
#[derive(Default, Debug)]
pub struct LayoutCache {
    symbols: FxHashMap<LayoutKey, LayoutSymbols>,
    itables: FxHashMap<(TypeId, TypeId), String>,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layout symbols of `ty`, which must be an erased class or array type.
    pub fn symbols(&mut self, mangler: &Mangler<'_>, ty: TypeId) -> Result<&LayoutSymbols, MangleError> {
        let key = match mangler.type_system().class_of(ty) {
            Some(class) => LayoutKey::Class(class),
            None => {
                mangler.class_name(ty)?;
                LayoutKey::Array
            }
        };
        match self.symbols.entry(key) {
            Entry::Occupied(entry) => Ok(&*entry.into_mut()),
            Entry::Vacant(entry) => {
                let symbols = Self::compute(mangler, ty)?;
                tracing::debug!(class = %symbols.type_name, "computed layout symbols");
                Ok(&*entry.insert(symbols))
            }
        }
    }

    /// Interface table `class` keeps for `iface`.
    pub fn interface_table(
        &mut self,
        mangler: &Mangler<'_>,
        iface: TypeId,
        class: TypeId,
    ) -> Result<&str, MangleError> {
        match self.itables.entry((iface, class)) {
            Entry::Occupied(entry) => Ok(entry.into_mut().as_str()),
            Entry::Vacant(entry) => Ok(entry.insert(mangler.interface_table(iface, class)?).as_str()),
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    fn compute(mangler: &Mangler<'_>, ty: TypeId) -> Result<LayoutSymbols, MangleError> {
        let (table, descriptor) = if mangler.is_interface(ty) {
            (mangler.interface_table(ty, ty)?, Some(mangler.interface_descriptor(ty)?))
        } else {
            (mangler.dispatch_vector(ty)?, None)
        };
        Ok(LayoutSymbols {
            type_name: mangler.class_type_name(ty)?,
            table_type_name: mangler.table_type_name(ty)?,
            size: mangler.size(ty)?,
            table,
            class_init: mangler.class_init(ty)?,
            interfaces_init: mangler.interfaces_init(ty)?,
            descriptor,
        })
    }
}
