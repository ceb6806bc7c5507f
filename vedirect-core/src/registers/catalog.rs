//! Register catalog

use super::def::RegisterDef;
use super::tables::REGISTERS;
use super::text::{TextDef, TEXT_DEFS};
use crate::flavor::FlavorSet;

/// Immutable register table, queryable by address, symbol or TEXT label
#[derive(Debug, Clone, Copy)]
pub struct RegisterCatalog {
    registers: &'static [RegisterDef],
    text_defs: &'static [TextDef],
}

impl Default for RegisterCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RegisterCatalog {
    /// The built-in VE.Direct register table
    pub fn builtin() -> Self {
        Self {
            registers: REGISTERS,
            text_defs: TEXT_DEFS,
        }
    }

    /// Catalog over custom tables
    ///
    /// `registers` must be sorted by address and `text_defs` by label.
    pub fn new(registers: &'static [RegisterDef], text_defs: &'static [TextDef]) -> Self {
        Self {
            registers,
            text_defs,
        }
    }

    pub fn len(&self) -> usize {
        self.registers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'static, RegisterDef> {
        self.registers.iter()
    }

    pub fn by_address(&self, address: u16) -> Option<&'static RegisterDef> {
        let registers = self.registers;
        registers
            .binary_search_by_key(&address, |def| def.address)
            .ok()
            .map(|index| &registers[index])
    }

    pub fn by_symbol(&self, name: &str) -> Option<&'static RegisterDef> {
        self.registers.iter().find(|def| def.name == name)
    }

    /// Registers available with the given (inflated) flavors
    pub fn filter(&self, active: FlavorSet) -> impl Iterator<Item = &'static RegisterDef> {
        self.registers
            .iter()
            .filter(move |def| active.contains(def.flavor))
    }

    pub fn text_def(&self, label: &str) -> Option<&'static TextDef> {
        let text_defs = self.text_defs;
        text_defs
            .binary_search_by(|def| def.label.as_bytes().cmp(label.as_bytes()))
            .ok()
            .map(|index| &text_defs[index])
    }

    /// Register reported by a TEXT label
    pub fn by_text_label(&self, label: &str) -> Option<&'static RegisterDef> {
        self.text_def(label)
            .and_then(|text_def| self.by_symbol(text_def.symbol))
    }

    /// First TEXT label reporting the register named `symbol`
    pub fn text_label_of(&self, symbol: &str) -> Option<&'static str> {
        self.text_defs
            .iter()
            .find(|text_def| text_def.symbol == symbol)
            .map(|text_def| text_def.label)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_address_and_symbol_agree(index in 0..REGISTERS.len()) {
            let catalog = RegisterCatalog::builtin();
            let def = &REGISTERS[index];
            let by_address = catalog.by_address(def.address).unwrap();
            let by_symbol = catalog.by_symbol(&def.name).unwrap();
            prop_assert!(core::ptr::eq(by_address, by_symbol));
        }
    }
}
