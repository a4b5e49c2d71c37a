//! Lexical grammar of operand tokens.
//!
//! Every predicate lexes the whole input with a dedicated logos automaton and
//! accepts only when a single token covers it from start to end.

use logos::Logos;

/// Storage frame prefixing a variable name.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Frame {
    #[token("GF")] Global,
    #[token("TF")] Temporary,
    #[token("LF")] Local,
}

/// Data type tag of a literal constant.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum DataType {
    #[token("bool")]   Bool,
    #[token("int")]    Int,
    #[token("string")] Str,
    #[token("nil")]    Nil,
}

impl Frame {
    pub fn as_str(self) -> &'static str {
        match self {
            Frame::Global    => "GF",
            Frame::Temporary => "TF",
            Frame::Local     => "LF",
        }
    }
}

impl DataType {
    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Bool   => "bool",
            DataType::Int    => "int",
            DataType::Str    => "string",
            DataType::Nil    => "nil",
        }
    }
}

#[derive(Logos, Debug, PartialEq)]
enum Name {
    #[regex(r"[A-Za-z_\-$&%*!?][A-Za-z0-9_\-$&%*!?]*")]
    Ident,
}

// Signed decimal, octal (`0`, `0o`, `0O`) or hex (`0x`, `0X`), each with
// `_` between digit groups.
#[derive(Logos, Debug, PartialEq)]
enum IntLiteral {
    #[regex(r"[+-]?(0|[1-9][0-9]*(_[0-9]+)*|0[oO]?[0-7]+(_[0-7]+)*|0[xX][0-9a-fA-F]+(_[0-9a-fA-F]+)*)")]
    Int,
}

// A `\` must be followed by decimal digits (any script): three of them,
// or fewer when a non-ASCII digit ends the run. `\065`, `\1٣` and `\12٣`
// are escapes; `\1`, `\12` and `\12x` are not.
#[derive(Logos, Debug, PartialEq)]
enum StringLiteral {
    #[regex(r"([^\\]|\\([\d&&[^0-9]]|[0-9]([\d&&[^0-9]]|[0-9]\d)))+")]
    Text,
}

/// Lexes `source` and returns the token only if it spans all of it.
fn lex_whole<'s, T>(source: &'s str) -> Option<T>
where
    T: Logos<'s, Source = str>,
    T::Extras: Default,
{
    let mut lex = T::lexer(source);
    match lex.next() {
        Some(Ok(tok)) if lex.span() == (0..source.len()) => Some(tok),
        _ => None,
    }
}

pub fn frame(s: &str) -> Option<Frame> {
    lex_whole::<Frame>(s).filter(|f| f.as_str() == s)
}

pub fn is_frame(s: &str) -> bool {
    frame(s).is_some()
}

/// Variable and label names.
pub fn is_identifier(s: &str) -> bool {
    lex_whole::<Name>(s).is_some()
}

pub fn data_type(s: &str) -> Option<DataType> {
    lex_whole::<DataType>(s).filter(|t| t.as_str() == s)
}

/// A bare type operand (`bool`, `int`, `string`); `nil` is not a type here.
pub fn is_type_tag(s: &str) -> bool {
    matches!(data_type(s), Some(t) if t != DataType::Nil)
}

pub fn is_string_literal(s: &str) -> bool {
    if s.is_empty() {
        return true;
    }
    let quoted = |c: char| c == '"' || c == '\'';
    if s.starts_with(quoted) || s.ends_with(quoted) {
        return false;
    }
    lex_whole::<StringLiteral>(s).is_some()
}

/// Checks `value` against the literal grammar of the type named by `ty`.
pub fn is_typed_literal(ty: &str, value: &str) -> bool {
    match data_type(ty) {
        Some(DataType::Bool)   => value == "true" || value == "false",
        Some(DataType::Int)    => lex_whole::<IntLiteral>(value).is_some(),
        Some(DataType::Nil)    => value == "nil",
        Some(DataType::Str)    => is_string_literal(value),
        None => false,
    }
}
