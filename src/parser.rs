//! Source normalization and command classification.
//!
//! Every physical line is reduced to a [`Command`]: comments cut at `//`,
//! all whitespace removed, blank results dropped. A command is classified
//! by its first character and its fields are sliced out of the text on
//! demand.

use crate::error::{AsmError, Result};

/// Kind of a normalized command, decided by its first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// `@value` or `@symbol`
    Address,
    /// `(SYMBOL)` pseudo-instruction
    Label,
    /// `[dest=]comp[;jump]`
    Compute,
}

/// Classified view of a command, borrowing its fields from the command text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction<'a> {
    Address(&'a str),
    Label(&'a str),
    Compute {
        dest: &'a str,
        comp: &'a str,
        jump: &'a str,
    },
}

/// A single normalized source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    text: String,
}

impl Command {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> CommandKind {
        match self.text.as_bytes().first() {
            Some(b'@') => CommandKind::Address,
            Some(b'(') => CommandKind::Label,
            _ => CommandKind::Compute,
        }
    }

    /// Symbol of an address or label command, empty for compute commands.
    pub fn symbol(&self) -> &str {
        match self.kind() {
            CommandKind::Address => &self.text[1..],
            CommandKind::Label => {
                let inner = &self.text[1..];
                inner.strip_suffix(')').unwrap_or(inner)
            }
            CommandKind::Compute => "",
        }
    }

    pub fn dest(&self) -> &str {
        if self.kind() != CommandKind::Compute {
            return "";
        }
        self.text.split_once('=').map_or("", |(dest, _)| dest)
    }

    pub fn comp(&self) -> &str {
        if self.kind() != CommandKind::Compute {
            return "";
        }
        let rest = self.without_dest();
        rest.split_once(';').map_or(rest, |(comp, _)| comp)
    }

    pub fn jump(&self) -> &str {
        if self.kind() != CommandKind::Compute {
            return "";
        }
        self.without_dest()
            .split_once(';')
            .map_or("", |(_, jump)| jump)
    }

    fn without_dest(&self) -> &str {
        self.text.split_once('=').map_or(self.text.as_str(), |(_, rest)| rest)
    }

    /// Classify the command, rejecting shapes the encoder cannot handle.
    pub fn instruction(&self) -> Result<Instruction<'_>> {
        if self.text.is_empty() {
            return Err(AsmError::malformed(&self.text, "empty command"));
        }

        match self.kind() {
            CommandKind::Address => {
                let symbol = self.symbol();
                if symbol.is_empty() {
                    return Err(AsmError::malformed(&self.text, "'@' without a value"));
                }
                Ok(Instruction::Address(symbol))
            }
            CommandKind::Label => {
                if !self.text.ends_with(')') {
                    return Err(AsmError::malformed(&self.text, "label is missing ')'"));
                }
                let symbol = self.symbol();
                if symbol.is_empty() {
                    return Err(AsmError::malformed(&self.text, "empty label"));
                }
                Ok(Instruction::Label(symbol))
            }
            CommandKind::Compute => Ok(Instruction::Compute {
                dest: self.dest(),
                comp: self.comp(),
                jump: self.jump(),
            }),
        }
    }
}

/// Strip the comment and every whitespace character from one line.
fn clean_line(line: &str) -> String {
    let code = line.split("//").next().unwrap_or("");
    code.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Turn raw source into the ordered list of non-empty commands.
pub fn normalize(source: &str) -> Vec<Command> {
    source
        .lines()
        .map(clean_line)
        .filter(|line| !line.is_empty())
        .map(Command::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_line() {
        assert_eq!(clean_line("  @123  "), "@123");
        assert_eq!(clean_line("D=M // comment"), "D=M");
        assert_eq!(clean_line("// only comment"), "");
        assert_eq!(clean_line("\tD = D + A ;\tJGT"), "D=D+A;JGT");
        assert_eq!(clean_line("@x//a//b"), "@x");
    }

    #[test]
    fn test_normalize_drops_blank_lines() {
        let commands = normalize("\n// header\n  @2\n\n D=A // load\r\n\t\n");
        let texts: Vec<&str> = commands.iter().map(Command::as_str).collect();
        assert_eq!(texts, ["@2", "D=A"]);
    }

    #[test]
    fn test_normalize_empty_source() {
        assert!(normalize("").is_empty());
        assert!(normalize("// nothing\n   \n").is_empty());
    }

    #[test]
    fn test_kind() {
        assert_eq!(Command::new("@17").kind(), CommandKind::Address);
        assert_eq!(Command::new("(LOOP)").kind(), CommandKind::Label);
        assert_eq!(Command::new("D=M").kind(), CommandKind::Compute);
        assert_eq!(Command::new("0;JMP").kind(), CommandKind::Compute);
    }

    #[test]
    fn test_symbol() {
        assert_eq!(Command::new("@17").symbol(), "17");
        assert_eq!(Command::new("@LOOP").symbol(), "LOOP");
        assert_eq!(Command::new("(LOOP)").symbol(), "LOOP");
        assert_eq!(Command::new("D=M").symbol(), "");
    }

    #[test]
    fn test_compute_fields() {
        let cmd = Command::new("MD=D+1;JMP");
        assert_eq!((cmd.dest(), cmd.comp(), cmd.jump()), ("MD", "D+1", "JMP"));

        let cmd = Command::new("D;JGT");
        assert_eq!((cmd.dest(), cmd.comp(), cmd.jump()), ("", "D", "JGT"));

        let cmd = Command::new("M=-1");
        assert_eq!((cmd.dest(), cmd.comp(), cmd.jump()), ("M", "-1", ""));

        let cmd = Command::new("0");
        assert_eq!((cmd.dest(), cmd.comp(), cmd.jump()), ("", "0", ""));
    }

    #[test]
    fn test_compute_fields_on_other_kinds() {
        for text in ["@A=D;JMP", "(A=D;JMP)"] {
            let cmd = Command::new(text);
            assert_eq!((cmd.dest(), cmd.comp(), cmd.jump()), ("", "", ""));
        }
    }

    #[test]
    fn test_instruction() {
        assert_eq!(
            Command::new("@i").instruction().unwrap(),
            Instruction::Address("i")
        );
        assert_eq!(
            Command::new("(END)").instruction().unwrap(),
            Instruction::Label("END")
        );
        assert_eq!(
            Command::new("AM=M-1").instruction().unwrap(),
            Instruction::Compute {
                dest: "AM",
                comp: "M-1",
                jump: "",
            }
        );
    }

    #[test]
    fn test_malformed_commands() {
        for text in ["", "@", "(LOOP", "()"] {
            let cmd = Command::new(text);
            let result = cmd.instruction();
            assert!(
                matches!(result, Err(AsmError::MalformedSource { .. })),
                "expected MalformedSource for {text:?}"
            );
        }
    }
}
