use ippcode_parse::{
    lexer::DataType,
    opcode::Opcode,
    operand::{Operand, OperandKind},
    parse, parse_str,
    stats::{Field, StatsCollector},
    Error,
};
use pretty_assertions::assert_eq;

const FACTORIAL: &str = "\
.IPPcode24
# factorial of 5
DEFVAR GF@n
DEFVAR GF@acc
MOVE GF@n int@5
MOVE GF@acc int@1
LABEL loop          # order 5
JUMPIFEQ end GF@n int@0
MUL GF@acc GF@acc GF@n
SUB GF@n GF@n int@1
JUMP loop
LABEL end
WRITE GF@acc
WRITE string@\\010
CALL print_done
JUMP nowhere
RETURN
";

fn stats_of(source: &str, fields: &[Field]) -> String {
    let mut collector = StatsCollector::new();
    let (_, totals) = parse(source.as_bytes(), Some(&mut collector)).unwrap();
    let mut out = Vec::new();
    collector.finalize(totals).render(fields, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn orders_are_sequential() {
    let program = parse_str(FACTORIAL).unwrap();
    let orders: Vec<u32> = program.instructions().iter().map(|i| i.order).collect();
    assert_eq!(orders, (1..=15).collect::<Vec<_>>());
}

#[test]
fn operands_keep_source_order() {
    let program = parse_str(FACTORIAL).unwrap();
    let jumpifeq = &program.instructions()[5];
    assert_eq!(jumpifeq.opcode, Opcode::JumpIfEq);
    assert_eq!(
        jumpifeq.operands,
        vec![
            Operand { kind: OperandKind::Label, value: "end".into() },
            Operand { kind: OperandKind::Var, value: "GF@n".into() },
            Operand { kind: OperandKind::Literal(DataType::Int), value: "0".into() },
        ]
    );
}

#[test]
fn factorial_statistics() {
    let out = stats_of(
        FACTORIAL,
        &[
            Field::Loc,
            Field::Comments,
            Field::Labels,
            Field::Jumps,
            Field::FwJumps,
            Field::BackJumps,
            Field::BadJumps,
            Field::Frequent,
        ],
    );
    // CALL print_done and JUMP nowhere target missing labels
    assert_eq!(out, "15\n2\n2\n5\n1\n1\n2\nDEFVAR,JUMP,LABEL,MOVE,WRITE\n");
}

#[test]
fn forward_backward_and_bad_jump() {
    let forward = ".IPPcode24\nBREAK\nBREAK\nJUMP label1\nBREAK\nBREAK\nBREAK\nLABEL label1\n";
    assert_eq!(stats_of(forward, &[Field::FwJumps, Field::BackJumps, Field::BadJumps]), "1\n0\n0\n");

    let backward = ".IPPcode24\nLABEL label1\nBREAK\nJUMP label1\n";
    assert_eq!(stats_of(backward, &[Field::FwJumps, Field::BackJumps, Field::BadJumps]), "0\n1\n0\n");

    let bad = ".IPPcode24\nJUMP missing\n";
    assert_eq!(stats_of(bad, &[Field::FwJumps, Field::BackJumps, Field::BadJumps]), "0\n0\n1\n");
}

#[test]
fn escape_sequence_scenario() {
    let program = parse_str(".IPPCODE24\nPUSHS string@ab\\065c\n").unwrap();
    assert_eq!(program.instructions()[0].operands[0].value, "ab\\065c");

    let err = parse_str(".IPPCODE24\nPUSHS string@ab\\06c\n").unwrap_err();
    assert_eq!(err.exit_code(), 23);
}

#[test]
fn arity_off_by_one_fails() {
    for src in [".IPPcode24\nADD GF@a GF@b\n", ".IPPcode24\nADD GF@a GF@b GF@c GF@d\n"] {
        assert!(matches!(parse_str(src), Err(Error::Arity { expected: 3, .. })));
    }
}

#[test]
fn unknown_opcode_anywhere() {
    let err = parse_str(".IPPcode24\nDEFVAR GF@x\nFOO GF@x\nBREAK\n").unwrap_err();
    assert_eq!(err.exit_code(), 22);
}

#[test]
fn missing_header_has_no_program() {
    let err = parse_str("DEFVAR GF@x\n").unwrap_err();
    assert_eq!(err.exit_code(), 21);
}

#[test]
fn xml_shape() {
    let program = parse_str(".IPPcode24\nREAD GF@x int\nCREATEFRAME\n").unwrap();
    assert_eq!(
        program.to_string(),
        "\
<?xml version='1.0' encoding='UTF-8'?>
<program language=\"IPPcode24\">
  <instruction order=\"1\" opcode=\"READ\">
    <arg1 type=\"var\">GF@x</arg1>
    <arg2 type=\"type\">int</arg2>
  </instruction>
  <instruction order=\"2\" opcode=\"CREATEFRAME\" />
</program>"
    );
}
