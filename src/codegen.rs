//! Mnemonic tables and 16-bit word encoding.
//!
//! The three tables are the Hack instruction set's closed enumerations:
//! any mnemonic missing from them is rejected, aliases such as `DM` or
//! `A+D` included.

use phf::phf_map;

use crate::MAX_ADDRESS;
use crate::error::{AsmError, Field, Result};

/// dest field (3 bits: A D M)
static DEST: phf::Map<&'static str, u8> = phf_map! {
    "" => 0b000,
    "M" => 0b001,
    "D" => 0b010,
    "MD" => 0b011,
    "A" => 0b100,
    "AM" => 0b101,
    "AD" => 0b110,
    "AMD" => 0b111,
};

/// comp field (7 bits: a + 6 c-bits).
/// The 'a' bit selects M (a=1) instead of A (a=0).
static COMP: phf::Map<&'static str, u8> = phf_map! {
    // === Constants (a=0) ===
    "0" => 0b0101010,
    "1" => 0b0111111,
    "-1" => 0b0111010,

    // === D-register operations (a=0) ===
    "D" => 0b0001100,
    "!D" => 0b0001101,
    "-D" => 0b0001111,
    "D+1" => 0b0011111,
    "D-1" => 0b0001110,

    // === A-register operations (a=0) ===
    "A" => 0b0110000,
    "!A" => 0b0110001,
    "-A" => 0b0110011,
    "A+1" => 0b0110111,
    "A-1" => 0b0110010,

    // === ALU operations with A-register (a=0) ===
    "D+A" => 0b0000010,
    "D-A" => 0b0010011,
    "A-D" => 0b0000111,
    "D&A" => 0b0000000,
    "D|A" => 0b0010101,

    // === M-register operations (a=1) ===
    "M" => 0b1110000,
    "!M" => 0b1110001,
    "-M" => 0b1110011,
    "M+1" => 0b1110111,
    "M-1" => 0b1110010,

    // === ALU operations with M-register (a=1) ===
    "D+M" => 0b1000010,
    "D-M" => 0b1010011,
    "M-D" => 0b1000111,
    "D&M" => 0b1000000,
    "D|M" => 0b1010101,
};

/// jump field (3 bits)
static JUMP: phf::Map<&'static str, u8> = phf_map! {
    "" => 0b000,
    "JGT" => 0b001,
    "JEQ" => 0b010,
    "JGE" => 0b011,
    "JLT" => 0b100,
    "JNE" => 0b101,
    "JLE" => 0b110,
    "JMP" => 0b111,
};

fn lookup(table: &phf::Map<&'static str, u8>, field: Field, mnemonic: &str) -> Result<u8> {
    table
        .get(mnemonic)
        .copied()
        .ok_or_else(|| AsmError::UnknownMnemonic {
            field,
            mnemonic: mnemonic.to_string(),
        })
}

fn reverse(table: &phf::Map<&'static str, u8>, code: u8) -> Option<&'static str> {
    table
        .entries()
        .find(|&(_, &c)| c == code)
        .map(|(&mnemonic, _)| mnemonic)
}

pub fn encode_dest(mnemonic: &str) -> Result<u8> {
    lookup(&DEST, Field::Dest, mnemonic)
}

pub fn encode_comp(mnemonic: &str) -> Result<u8> {
    lookup(&COMP, Field::Comp, mnemonic)
}

pub fn encode_jump(mnemonic: &str) -> Result<u8> {
    lookup(&JUMP, Field::Jump, mnemonic)
}

pub fn dest_mnemonic(code: u8) -> Option<&'static str> {
    reverse(&DEST, code)
}

pub fn comp_mnemonic(code: u8) -> Option<&'static str> {
    reverse(&COMP, code)
}

pub fn jump_mnemonic(code: u8) -> Option<&'static str> {
    reverse(&JUMP, code)
}

/// Fully resolved instruction word, ready for encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Word {
    /// 15-bit value; callers keep it within `0..=MAX_ADDRESS`.
    Address(u16),
    Compute { dest: u8, comp: u8, jump: u8 },
}

impl Word {
    pub fn bits(self) -> u16 {
        match self {
            Word::Address(value) => {
                debug_assert!(value <= MAX_ADDRESS, "address {} exceeds 15 bits", value);
                value & MAX_ADDRESS
            }
            Word::Compute { dest, comp, jump } => {
                0b1110_0000_0000_0000
                    | ((comp as u16) << 6)
                    | ((dest as u16) << 3)
                    | (jump as u16)
            }
        }
    }
}

/// Output format for assembled words.
pub trait Backend {
    fn encode_a(&self, value: u16, buf: &mut String);
    fn encode_c(&self, dest: u8, comp: u8, jump: u8, buf: &mut String);
}

/// Hack `.hack` text format: 16 ASCII bits per word, MSB first
pub struct HackBinary;

fn push_bits(word: u16, buf: &mut String) {
    for i in (0..16).rev() {
        buf.push(if word & (1 << i) != 0 { '1' } else { '0' });
    }
}

impl Backend for HackBinary {
    fn encode_a(&self, value: u16, buf: &mut String) {
        push_bits(Word::Address(value).bits(), buf);
    }

    fn encode_c(&self, dest: u8, comp: u8, jump: u8, buf: &mut String) {
        push_bits(Word::Compute { dest, comp, jump }.bits(), buf);
    }
}

/// Code generator (generic over backend)
pub struct CodeGen<B: Backend> {
    backend: B,
}

impl<B: Backend> CodeGen<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn encode(&self, word: &Word, buf: &mut String) {
        match *word {
            Word::Address(value) => self.backend.encode_a(value, buf),
            Word::Compute { dest, comp, jump } => self.backend.encode_c(dest, comp, jump, buf),
        }
    }
}

pub type HackCodeGen = CodeGen<HackBinary>;

impl HackCodeGen {
    pub fn hack() -> Self {
        Self::new(HackBinary)
    }
}

/// Disassemble one machine word back to assembly text.
///
/// Returns `None` for compute words whose prefix is not `111` or whose
/// comp bits match no mnemonic.
pub fn decode(word: u16) -> Option<String> {
    if word & 0x8000 == 0 {
        return Some(format!("@{}", word));
    }
    if word & 0xE000 != 0xE000 {
        return None;
    }

    let comp = comp_mnemonic(((word >> 6) & 0x7F) as u8)?;
    let dest = dest_mnemonic(((word >> 3) & 0b111) as u8)?;
    let jump = jump_mnemonic((word & 0b111) as u8)?;

    let mut text = String::with_capacity(12);
    if !dest.is_empty() {
        text.push_str(dest);
        text.push('=');
    }
    text.push_str(comp);
    if !jump.is_empty() {
        text.push(';');
        text.push_str(jump);
    }
    Some(text)
}
