use phf::phf_map;
use std::collections::HashMap;

use crate::error::{AsmError, Result};

/// Predefined symbols (compile-time perfect hash map)
pub static PREDEFINED: phf::Map<&'static str, u16> = phf_map! {
    "R0" => 0, "R1" => 1, "R2" => 2, "R3" => 3,
    "R4" => 4, "R5" => 5, "R6" => 6, "R7" => 7,
    "R8" => 8, "R9" => 9, "R10" => 10, "R11" => 11,
    "R12" => 12, "R13" => 13, "R14" => 14, "R15" => 15,
    "SP" => 0, "LCL" => 1, "ARG" => 2, "THIS" => 3, "THAT" => 4,
    "SCREEN" => 16384, "KBD" => 24576,
};

/// Symbol name to address map, seeded with [`PREDEFINED`].
///
/// Entries are single-assignment in practice: the assembler checks
/// [`SymbolTable::contains`] before every [`SymbolTable::add`].
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: HashMap<String, u16>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut symbols = HashMap::with_capacity(64);
        symbols.extend(PREDEFINED.entries().map(|(&name, &addr)| (name.to_string(), addr)));
        Self { symbols }
    }

    /// Insert `name`, replacing any previous address.
    pub fn add(&mut self, name: impl Into<String>, address: u16) {
        self.symbols.insert(name.into(), address);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<u16> {
        self.symbols.get(name).copied()
    }

    pub fn resolve(&self, name: &str) -> Result<u16> {
        self.get(name).ok_or_else(|| AsmError::UnknownSymbol {
            symbol: name.to_string(),
        })
    }

    pub fn is_predefined(name: &str) -> bool {
        PREDEFINED.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u16)> {
        self.symbols.iter().map(|(name, &addr)| (name.as_str(), addr))
    }
}
