use std::{io, path::PathBuf};

use thiserror::Error;

use crate::operand::Role;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid arguments: {0}")]
    Arguments(String),

    #[error("stats file `{0}` requested more than once")]
    DuplicateStatsFile(String),

    #[error("stats file name is empty")]
    EmptyStatsFile,

    #[error("cannot write stats file `{}`: {source}", .path.display())]
    StatsFile { path: PathBuf, source: io::Error },

    #[error("no input on stdin")]
    NoInput,

    #[error("missing header `.IPPcode24`")]
    MissingHeader,

    #[error("line {line}: invalid header `{text}`")]
    InvalidHeader { line: usize, text: String },

    #[error("line {line}: unknown opcode `{name}`")]
    UnknownOpcode { line: usize, name: String },

    #[error("line {line}: malformed opcode `{name}`")]
    MalformedOpcode { line: usize, name: String },

    #[error("line {line}: {opcode} expects {expected} operand(s), found {found}")]
    Arity { line: usize, opcode: String, expected: usize, found: usize },

    #[error("line {line}: `{token}` is not a valid {role}")]
    Operand { line: usize, role: Role, token: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Arguments(_) => 10,
            Error::DuplicateStatsFile(_) | Error::EmptyStatsFile | Error::StatsFile { .. } => 12,
            Error::NoInput | Error::MissingHeader | Error::InvalidHeader { .. } => 21,
            Error::UnknownOpcode { .. } => 22,
            Error::MalformedOpcode { .. } | Error::Arity { .. } | Error::Operand { .. } => 23,
            Error::Io(_) => 99,
        }
    }
}
