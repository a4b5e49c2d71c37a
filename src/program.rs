//! Output tree: the validated program and its XML form.

use std::fmt::{self, Write};

use crate::{opcode::Opcode, operand::Operand};

pub const LANGUAGE: &str = "IPPcode24";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub order:    u32,
    pub opcode:   Opcode,
    pub operands: Vec<Operand>,
}

impl Instruction {
    /// Literal value of the first operand, if any.
    pub fn first_value(&self) -> Option<&str> {
        self.operands.first().map(|op| op.value.as_str())
    }
}

/// Instructions in ascending `order`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn push(&mut self, inst: Instruction) {
        debug_assert!(self.instructions.last().map_or(true, |last| last.order < inst.order));
        self.instructions.push(inst);
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

fn escape(out: &mut impl Write, text: &str, in_attr: bool) -> fmt::Result {
    for c in text.chars() {
        match c {
            '&' => out.write_str("&amp;")?,
            '<' => out.write_str("&lt;")?,
            '>' => out.write_str("&gt;")?,
            '"' if in_attr => out.write_str("&quot;")?,
            _ => out.write_char(c)?,
        }
    }
    Ok(())
}

fn attr(f: &mut fmt::Formatter<'_>, name: &str, value: &str) -> fmt::Result {
    write!(f, " {name}=\"")?;
    escape(f, value, true)?;
    f.write_char('"')
}

/// XML document with two-space indentation; childless, textless elements
/// are self-closing. No newline follows the root's closing tag.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<?xml version='1.0' encoding='UTF-8'?>")?;
        f.write_str("<program")?;
        attr(f, "language", LANGUAGE)?;
        if self.is_empty() {
            return f.write_str(" />");
        }
        writeln!(f, ">")?;

        for inst in &self.instructions {
            f.write_str("  <instruction")?;
            attr(f, "order", &inst.order.to_string())?;
            attr(f, "opcode", inst.opcode.mnemonic())?;
            if inst.operands.is_empty() {
                writeln!(f, " />")?;
                continue;
            }
            writeln!(f, ">")?;

            for (i, op) in inst.operands.iter().enumerate() {
                let tag = format!("arg{}", i + 1);
                write!(f, "    <{tag}")?;
                attr(f, "type", op.kind.as_str())?;
                if op.value.is_empty() {
                    writeln!(f, " />")?;
                } else {
                    f.write_char('>')?;
                    escape(f, &op.value, false)?;
                    writeln!(f, "</{tag}>")?;
                }
            }
            writeln!(f, "  </instruction>")?;
        }
        f.write_str("</program>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lexer::DataType, operand::OperandKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_program_is_self_closing() {
        assert_eq!(
            Program::default().to_string(),
            "<?xml version='1.0' encoding='UTF-8'?>\n<program language=\"IPPcode24\" />"
        );
    }

    #[test]
    fn writes_instructions_and_escapes_text() {
        let mut program = Program::default();
        program.push(Instruction {
            order: 1,
            opcode: Opcode::Write,
            operands: vec![Operand {
                kind: OperandKind::Literal(DataType::Str),
                value: "a<b&c>".into(),
            }],
        });
        program.push(Instruction { order: 2, opcode: Opcode::Break, operands: vec![] });
        program.push(Instruction {
            order: 3,
            opcode: Opcode::Pushs,
            operands: vec![Operand { kind: OperandKind::Literal(DataType::Str), value: String::new() }],
        });

        let expected = "\
<?xml version='1.0' encoding='UTF-8'?>
<program language=\"IPPcode24\">
  <instruction order=\"1\" opcode=\"WRITE\">
    <arg1 type=\"string\">a&lt;b&amp;c&gt;</arg1>
  </instruction>
  <instruction order=\"2\" opcode=\"BREAK\" />
  <instruction order=\"3\" opcode=\"PUSHS\">
    <arg1 type=\"string\" />
  </instruction>
</program>";
        assert_eq!(program.to_string(), expected);
    }
}
