//! IPPcode24 front end: validates the instruction language line by line,
//! builds the program tree and gathers code statistics.

pub mod cli;
pub mod error;
pub mod lexer;
pub mod opcode;
pub mod operand;
pub mod parser;
pub mod program;
pub mod stats;

pub use error::Error;
pub use parser::{parse, parse_str};
pub use program::{Instruction, Program};
