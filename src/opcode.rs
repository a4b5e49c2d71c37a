//! Opcode vocabulary and operand signatures.

use std::fmt;

use logos::Logos;

use crate::operand::Role;

#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Opcode {
    // ── Frames / calls ────────────────────────
    #[token("MOVE")]        Move,
    #[token("CREATEFRAME")] CreateFrame,
    #[token("PUSHFRAME")]   PushFrame,
    #[token("POPFRAME")]    PopFrame,
    #[token("DEFVAR")]      DefVar,
    #[token("CALL")]        Call,
    #[token("RETURN")]      Return,

    // ── Data stack ────────────────────────────
    #[token("PUSHS")] Pushs,
    #[token("POPS")]  Pops,

    // ── Arithmetic / relational / logic ───────
    #[token("ADD")]      Add,
    #[token("SUB")]      Sub,
    #[token("MUL")]      Mul,
    #[token("IDIV")]     Idiv,
    #[token("LT")]       Lt,
    #[token("GT")]       Gt,
    #[token("EQ")]       Eq,
    #[token("AND")]      And,
    #[token("OR")]       Or,
    #[token("NOT")]      Not,
    #[token("INT2CHAR")] Int2Char,
    #[token("STRI2INT")] Stri2Int,

    // ── I/O ───────────────────────────────────
    #[token("READ")]  Read,
    #[token("WRITE")] Write,

    // ── Strings ───────────────────────────────
    #[token("CONCAT")]  Concat,
    #[token("STRLEN")]  Strlen,
    #[token("GETCHAR")] GetChar,
    #[token("SETCHAR")] SetChar,

    // ── Types ─────────────────────────────────
    #[token("TYPE")] Type,

    // ── Control flow ──────────────────────────
    #[token("LABEL")]     Label,
    #[token("JUMP")]      Jump,
    #[token("JUMPIFEQ")]  JumpIfEq,
    #[token("JUMPIFNEQ")] JumpIfNeq,
    #[token("EXIT")]      Exit,

    // ── Debugging ─────────────────────────────
    #[token("DPRINT")] Dprint,
    #[token("BREAK")]  Break,
}

const V:   &[Role] = &[Role::Var];
const S:   &[Role] = &[Role::Symb];
const L:   &[Role] = &[Role::Label];
const VS:  &[Role] = &[Role::Var, Role::Symb];
const VT:  &[Role] = &[Role::Var, Role::Type];
const VSS: &[Role] = &[Role::Var, Role::Symb, Role::Symb];
const LSS: &[Role] = &[Role::Label, Role::Symb, Role::Symb];

impl Opcode {
    /// Looks up an upper-cased mnemonic. The whole word must match.
    pub fn from_mnemonic(word: &str) -> Option<Self> {
        // The span is not reliable after a failed longer branch
        // (`JUMPIF` falls back to `JUMP` spanning six bytes).
        match Opcode::lexer(word).next() {
            Some(Ok(op)) if op.mnemonic() == word => Some(op),
            _ => None,
        }
    }

    /// Operand roles in order, or `None` for operand-less instructions.
    pub fn signature(self) -> Option<&'static [Role]> {
        use Opcode::*;
        match self {
            CreateFrame | PushFrame | PopFrame | Return | Break => None,
            DefVar | Pops => Some(V),
            Call | Label | Jump => Some(L),
            Pushs | Write | Exit | Dprint => Some(S),
            Move | Int2Char | Strlen | Type | Not => Some(VS),
            Read => Some(VT),
            JumpIfEq | JumpIfNeq => Some(LSS),
            Add | Sub | Mul | Idiv | Lt | Gt | Eq | And | Or | Stri2Int | Concat | GetChar
            | SetChar => Some(VSS),
        }
    }

    pub fn arity(self) -> usize {
        self.signature().map_or(0, <[Role]>::len)
    }

    pub fn mnemonic(self) -> &'static str {
        use Opcode::*;
        match self {
            Move => "MOVE",
            CreateFrame => "CREATEFRAME",
            PushFrame => "PUSHFRAME",
            PopFrame => "POPFRAME",
            DefVar => "DEFVAR",
            Call => "CALL",
            Return => "RETURN",
            Pushs => "PUSHS",
            Pops => "POPS",
            Add => "ADD",
            Sub => "SUB",
            Mul => "MUL",
            Idiv => "IDIV",
            Lt => "LT",
            Gt => "GT",
            Eq => "EQ",
            And => "AND",
            Or => "OR",
            Not => "NOT",
            Int2Char => "INT2CHAR",
            Stri2Int => "STRI2INT",
            Read => "READ",
            Write => "WRITE",
            Concat => "CONCAT",
            Strlen => "STRLEN",
            GetChar => "GETCHAR",
            SetChar => "SETCHAR",
            Type => "TYPE",
            Label => "LABEL",
            Jump => "JUMP",
            JumpIfEq => "JUMPIFEQ",
            JumpIfNeq => "JUMPIFNEQ",
            Exit => "EXIT",
            Dprint => "DPRINT",
            Break => "BREAK",
        }
    }

    /// Jumps that name a target label in their first operand.
    pub fn is_targeted_jump(self) -> bool {
        matches!(self, Opcode::Call | Opcode::Jump | Opcode::JumpIfEq | Opcode::JumpIfNeq)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
