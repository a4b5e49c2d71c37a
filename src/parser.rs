use std::io::BufRead;

use crate::{
    error::Error,
    opcode::Opcode,
    operand::{self, Operand},
    program::{Instruction, Program},
    stats::StatsCollector,
};

const HEADER: &str = ".IPPCODE24";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitingHeader,
    Body,
}

/// What a single source line turned out to be.
#[derive(Debug, PartialEq)]
pub enum Line {
    Blank,
    Header,
    Instruction(Instruction),
}

/// Line counts known once the input is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub loc:      u32,
    pub comments: u32,
}

/// Single-pass line parser. Feed lines in source order, then call [`finish`].
///
/// [`finish`]: Parser::finish
#[derive(Debug)]
pub struct Parser {
    state:    State,
    line:     usize,
    order:    u32,
    comments: u32,
}

impl Default for Parser {
    fn default() -> Self {
        Parser { state: State::AwaitingHeader, line: 0, order: 0, comments: 0 }
    }
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, raw: &str) -> Result<Line, Error> {
        self.line += 1;

        let (code, comment) = match raw.trim().split_once('#') {
            Some((code, _)) => (code, true),
            None => (raw.trim(), false),
        };
        if comment {
            self.comments += 1;
        }
        let code = code.trim();
        if code.is_empty() {
            return Ok(Line::Blank);
        }

        match self.state {
            State::AwaitingHeader => {
                if code.to_uppercase() != HEADER {
                    return Err(Error::InvalidHeader { line: self.line, text: code.to_string() });
                }
                log::debug!("header accepted on line {}", self.line);
                self.state = State::Body;
                Ok(Line::Header)
            }
            State::Body => self.instruction(code).map(Line::Instruction),
        }
    }

    fn instruction(&mut self, code: &str) -> Result<Instruction, Error> {
        let mut words = code.split_whitespace();
        let name = words.next().unwrap_or_default().to_uppercase();
        let args: Vec<&str> = words.collect();

        if !name.chars().all(char::is_alphanumeric) {
            return Err(Error::MalformedOpcode { line: self.line, name });
        }
        let opcode = Opcode::from_mnemonic(&name)
            .ok_or_else(|| Error::UnknownOpcode { line: self.line, name: name.clone() })?;

        let roles = opcode.signature().unwrap_or_default();
        if args.len() != roles.len() {
            return Err(Error::Arity {
                line: self.line,
                opcode: name,
                expected: roles.len(),
                found: args.len(),
            });
        }

        let operands = roles
            .iter()
            .zip(&args)
            .map(|(&role, &token)| {
                operand::bind(role, token).ok_or_else(|| Error::Operand {
                    line: self.line,
                    role,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<Operand>, Error>>()?;

        self.order += 1;
        log::trace!("#{} {} {:?}", self.order, opcode, args);
        Ok(Instruction { order: self.order, opcode, operands })
    }

    /// Ends the pass. Fails if the header never appeared.
    pub fn finish(self) -> Result<Totals, Error> {
        match self.state {
            State::AwaitingHeader => Err(Error::MissingHeader),
            State::Body => Ok(Totals { loc: self.order, comments: self.comments }),
        }
    }
}

/// Parses a whole source stream, feeding every instruction to `stats` when given.
pub fn parse<R: BufRead>(
    input: R,
    mut stats: Option<&mut StatsCollector>,
) -> Result<(Program, Totals), Error> {
    let mut parser = Parser::new();
    let mut program = Program::default();

    for line in input.lines() {
        if let Line::Instruction(inst) = parser.feed(&line?)? {
            if let Some(stats) = stats.as_deref_mut() {
                stats.observe(inst.opcode, inst.first_value(), inst.order);
            }
            program.push(inst);
        }
    }

    let totals = parser.finish()?;
    Ok((program, totals))
}

/// Parses a source held in memory.
pub fn parse_str(source: &str) -> Result<Program, Error> {
    parse(source.as_bytes(), None).map(|(program, _)| program)
}
