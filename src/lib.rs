//! Hack Assembler - two-pass translator from Hack assembly to Hack machine code.
//!
//! Pass 1 walks the normalized commands and binds every `(LABEL)` to the
//! address of the instruction that follows it. Pass 2 walks them again,
//! resolving `@symbol` references (allocating variables from RAM[16]
//! upward in first-use order) and encoding each instruction as a 16-bit word.

pub mod codegen;
pub mod error;
pub mod parser;
pub mod symbols;

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, trace};

use codegen::{HackCodeGen, Word, encode_comp, encode_dest, encode_jump};
pub use error::{AsmError, Result};
use parser::{Command, Instruction, normalize};
use symbols::SymbolTable;

/// First RAM address handed out to variables.
pub const VARIABLE_BASE: u16 = 16;

/// Largest value an A-instruction can carry (15 bits).
pub const MAX_ADDRESS: u16 = 0x7FFF;

/// Two-pass driver owning the symbol table and the variable cursor.
#[derive(Debug, Clone)]
pub struct Assembler {
    symbols: SymbolTable,
    next_variable: u16,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Assembler {
    pub fn new() -> Self {
        Self {
            symbols: SymbolTable::new(),
            next_variable: VARIABLE_BASE,
        }
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Pass 1: bind each label to the number of instructions before it.
    pub fn first_pass(&mut self, commands: &[Command]) -> Result<()> {
        let mut rom_address: usize = 0;
        let mut labels = 0;

        for command in commands {
            match command.instruction()? {
                Instruction::Label(label) => {
                    if self.symbols.contains(label) {
                        return Err(AsmError::DuplicateLabel {
                            label: label.to_string(),
                        });
                    }
                    let address = u16::try_from(rom_address)
                        .ok()
                        .filter(|&addr| addr <= MAX_ADDRESS)
                        .ok_or_else(|| AsmError::AddressOutOfRange {
                            value: rom_address.to_string(),
                        })?;
                    debug!("label {} -> {}", label, address);
                    self.symbols.add(label, address);
                    labels += 1;
                }
                Instruction::Address(_) | Instruction::Compute { .. } => {
                    rom_address += 1;
                }
            }
        }

        debug!("pass 1: {} labels, {} instructions", labels, rom_address);
        Ok(())
    }

    /// Pass 2: resolve symbols and build the instruction words.
    pub fn second_pass(&mut self, commands: &[Command]) -> Result<Vec<Word>> {
        let mut words = Vec::with_capacity(commands.len());

        for command in commands {
            let word = match command.instruction()? {
                Instruction::Label(_) => continue,
                Instruction::Address(symbol) => Word::Address(self.resolve_address(symbol)?),
                Instruction::Compute { dest, comp, jump } => Word::Compute {
                    dest: encode_dest(dest)?,
                    comp: encode_comp(comp)?,
                    jump: encode_jump(jump)?,
                },
            };
            trace!("{} => {:016b}", command.as_str(), word.bits());
            words.push(word);
        }

        debug!(
            "pass 2: {} words, {} variables",
            words.len(),
            self.next_variable - VARIABLE_BASE
        );
        Ok(words)
    }

    /// Literal first, then known symbol, then a fresh variable.
    fn resolve_address(&mut self, symbol: &str) -> Result<u16> {
        if symbol.bytes().all(|b| b.is_ascii_digit()) {
            return symbol
                .parse::<u16>()
                .ok()
                .filter(|&value| value <= MAX_ADDRESS)
                .ok_or_else(|| AsmError::AddressOutOfRange {
                    value: symbol.to_string(),
                });
        }

        if self.symbols.contains(symbol) {
            return self.symbols.resolve(symbol);
        }

        let address = self.next_variable;
        if address > MAX_ADDRESS {
            return Err(AsmError::AddressOutOfRange {
                value: address.to_string(),
            });
        }
        debug!("variable {} -> {}", symbol, address);
        self.symbols.add(symbol, address);
        self.next_variable += 1;
        Ok(address)
    }
}

/// Result of a successful assembly.
#[derive(Debug, Clone)]
pub struct Program {
    pub words: Vec<Word>,
    pub symbols: SymbolTable,
}

impl Program {
    /// Render as `.hack` text, one newline-terminated line per word.
    pub fn to_hack(&self) -> String {
        let codegen = HackCodeGen::hack();
        let mut output = String::with_capacity(self.words.len() * 17);

        for word in &self.words {
            codegen.encode(word, &mut output);
            output.push('\n');
        }

        output
    }

    /// Labels and variables defined by the program, ordered by address.
    pub fn user_symbols(&self) -> Vec<(&str, u16)> {
        let mut entries: Vec<_> = self
            .symbols
            .iter()
            .filter(|(name, _)| !SymbolTable::is_predefined(name))
            .collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(b.0)));
        entries
    }
}

/// Assemble source text, keeping the final symbol table.
pub fn assemble_program(source: &str) -> Result<Program> {
    let commands = normalize(source);

    let mut assembler = Assembler::new();
    assembler.first_pass(&commands)?;
    let words = assembler.second_pass(&commands)?;

    Ok(Program {
        words,
        symbols: assembler.symbols,
    })
}

/// Assemble Hack assembly source to `.hack` text
pub fn assemble(source: &str) -> Result<String> {
    assemble_program(source).map(|program| program.to_hack())
}

/// `Prog.asm` -> `Prog.hack`
pub fn output_path(input: &Path) -> PathBuf {
    input.with_extension("hack")
}

/// Read `input`, assemble it and write the result to `output`.
///
/// Nothing is written when assembly fails.
pub fn assemble_file(input: &Path, output: &Path) -> Result<Program> {
    let source = fs::read_to_string(input).map_err(|e| AsmError::io(input, e))?;
    let program = assemble_program(&source)?;
    fs::write(output, program.to_hack()).map_err(|e| AsmError::io(output, e))?;
    Ok(program)
}
