use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which part of a compute instruction a mnemonic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Dest,
    Comp,
    Jump,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Dest => "dest",
            Field::Comp => "comp",
            Field::Jump => "jump",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum AsmError {
    #[error("unknown {field} mnemonic: {mnemonic:?}")]
    UnknownMnemonic { field: Field, mnemonic: String },

    #[error("unknown symbol: {symbol}")]
    UnknownSymbol { symbol: String },

    #[error("malformed command {command:?}: {reason}")]
    MalformedSource {
        command: String,
        reason: &'static str,
    },

    #[error("duplicate label: {label}")]
    DuplicateLabel { label: String },

    #[error("address out of range (0..=32767): {value}")]
    AddressOutOfRange { value: String },

    #[error("I/O error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AsmError {
    pub(crate) fn malformed(command: &str, reason: &'static str) -> Self {
        AsmError::MalformedSource {
            command: command.to_string(),
            reason,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AsmError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, AsmError>;
