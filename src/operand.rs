//! Operand roles and binding of raw tokens to typed operands.

use std::fmt;

use crate::lexer::{self, DataType};

/// The category an operand position expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Var,
    Symb,
    Label,
    Type,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Var   => "variable",
            Role::Symb  => "symbol",
            Role::Label => "label",
            Role::Type  => "type",
        })
    }
}

/// Kind written to the `type` attribute of an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    Var,
    Label,
    Type,
    Literal(DataType),
}

impl OperandKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OperandKind::Var   => "var",
            OperandKind::Label => "label",
            OperandKind::Type  => "type",
            OperandKind::Literal(ty) => ty.as_str(),
        }
    }
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    pub kind:  OperandKind,
    /// `frame@name` for variables, the part after `type@` for literals.
    pub value: String,
}

impl Operand {
    fn new(kind: OperandKind, value: &str) -> Self {
        Operand { kind, value: value.to_string() }
    }
}

fn is_variable(frame: &str, name: &str) -> bool {
    lexer::is_frame(frame) && lexer::is_identifier(name)
}

/// Validates `token` against `role`. `None` means the token does not fit.
pub fn bind(role: Role, token: &str) -> Option<Operand> {
    match role {
        Role::Var => {
            let (frame, name) = token.split_once('@')?;
            is_variable(frame, name).then(|| Operand::new(OperandKind::Var, token))
        }
        Role::Symb => {
            let (head, tail) = token.split_once('@')?;
            if is_variable(head, tail) {
                return Some(Operand::new(OperandKind::Var, token));
            }
            if !lexer::is_typed_literal(head, tail) {
                return None;
            }
            let ty = lexer::data_type(head)?;
            Some(Operand::new(OperandKind::Literal(ty), tail))
        }
        Role::Label => lexer::is_identifier(token).then(|| Operand::new(OperandKind::Label, token)),
        Role::Type  => lexer::is_type_tag(token).then(|| Operand::new(OperandKind::Type, token)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn op(kind: OperandKind, value: &str) -> Option<Operand> {
        Some(Operand::new(kind, value))
    }

    #[test]
    fn binds_variables() {
        assert_eq!(bind(Role::Var, "GF@x"), op(OperandKind::Var, "GF@x"));
        assert_eq!(bind(Role::Var, "LF@_tmp-1"), op(OperandKind::Var, "LF@_tmp-1"));
        assert_eq!(bind(Role::Var, "GF"), None);
        assert_eq!(bind(Role::Var, "XF@x"), None);
        assert_eq!(bind(Role::Var, "GF@1x"), None);
        assert_eq!(bind(Role::Var, "GF@x@y"), None);
        assert_eq!(bind(Role::Var, "int@5"), None);
    }

    #[test]
    fn binds_symbols() {
        assert_eq!(bind(Role::Symb, "TF@a"), op(OperandKind::Var, "TF@a"));
        assert_eq!(bind(Role::Symb, "int@5"), op(OperandKind::Literal(DataType::Int), "5"));
        assert_eq!(bind(Role::Symb, "bool@true"), op(OperandKind::Literal(DataType::Bool), "true"));
        assert_eq!(bind(Role::Symb, "nil@nil"), op(OperandKind::Literal(DataType::Nil), "nil"));
        assert_eq!(bind(Role::Symb, "string@"), op(OperandKind::Literal(DataType::Str), ""));
        assert_eq!(
            bind(Role::Symb, "string@a@b"),
            op(OperandKind::Literal(DataType::Str), "a@b")
        );
        assert_eq!(bind(Role::Symb, "int@x"), None);
        assert_eq!(bind(Role::Symb, "GF@1"), None);
        assert_eq!(bind(Role::Symb, "float@1.0"), None);
        assert_eq!(bind(Role::Symb, "5"), None);
    }

    #[test]
    fn binds_labels_and_types() {
        assert_eq!(bind(Role::Label, "loop"), op(OperandKind::Label, "loop"));
        assert_eq!(bind(Role::Label, "GF@x"), None);
        assert_eq!(bind(Role::Type, "int"), op(OperandKind::Type, "int"));
        assert_eq!(bind(Role::Type, "nil"), None);
    }

    #[test]
    fn kind_names() {
        assert_eq!(OperandKind::Var.as_str(), "var");
        assert_eq!(OperandKind::Literal(DataType::Str).to_string(), "string");
    }
}
