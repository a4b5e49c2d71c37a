//! Code statistics: label/jump topology, opcode frequency and report files.

use std::{
    collections::{BTreeMap, HashMap},
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use crate::{error::Error, opcode::Opcode, parser::Totals};

/// Running counters fed by the parser, one instruction at a time.
#[derive(Debug, Default)]
pub struct StatsCollector {
    /// label name -> order of its first declaration
    labels:    HashMap<String, u32>,
    /// jump order -> target label
    targets:   BTreeMap<u32, String>,
    jumps:     usize,
    frequency: HashMap<Opcode, usize>,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// `label` is the first operand's value, present for every opcode that
    /// takes operands.
    pub fn observe(&mut self, opcode: Opcode, label: Option<&str>, order: u32) {
        match (opcode, label) {
            (Opcode::Label, Some(name)) => {
                self.labels.entry(name.to_string()).or_insert(order);
            }
            (Opcode::Return, _) => self.jumps += 1,
            (op, Some(name)) if op.is_targeted_jump() => {
                self.jumps += 1;
                self.targets.insert(order, name.to_string());
            }
            _ => {}
        }
        *self.frequency.entry(opcode).or_insert(0) += 1;
    }

    /// Resolves jump directions and the most frequent opcodes.
    pub fn finalize(self, totals: Totals) -> Stats {
        let mut stats = Stats {
            loc:        totals.loc,
            comments:   totals.comments,
            labels:     self.labels.len(),
            jumps:      self.jumps,
            fw_jumps:   0,
            back_jumps: 0,
            bad_jumps:  0,
            frequent:   Vec::new(),
        };

        for (&order, name) in &self.targets {
            match self.labels.get(name) {
                None => stats.bad_jumps += 1,
                Some(&pos) if pos > order => stats.fw_jumps += 1,
                Some(&pos) if pos < order => stats.back_jumps += 1,
                Some(_) => {}
            }
        }

        if let Some(&max) = self.frequency.values().max() {
            stats.frequent = self
                .frequency
                .iter()
                .filter(|&(_, &count)| count == max)
                .map(|(&op, _)| op)
                .collect();
            stats.frequent.sort_by_key(|op| op.mnemonic());
        }

        log::debug!("{stats:?}");
        stats
    }
}

/// Final values of every statistic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    pub loc:        u32,
    pub comments:   u32,
    pub labels:     usize,
    pub jumps:      usize,
    pub fw_jumps:   usize,
    pub back_jumps: usize,
    pub bad_jumps:  usize,
    /// Opcodes sharing the highest count, alphabetical.
    pub frequent:   Vec<Opcode>,
}

impl Stats {
    pub fn frequent_list(&self) -> String {
        self.frequent.iter().map(|op| op.mnemonic()).collect::<Vec<_>>().join(",")
    }

    /// Writes one line per field, in the given order.
    pub fn render<W: Write>(&self, fields: &[Field], out: &mut W) -> io::Result<()> {
        for field in fields {
            match field {
                Field::Loc        => writeln!(out, "{}", self.loc)?,
                Field::Comments   => writeln!(out, "{}", self.comments)?,
                Field::Labels     => writeln!(out, "{}", self.labels)?,
                Field::Jumps      => writeln!(out, "{}", self.jumps)?,
                Field::FwJumps    => writeln!(out, "{}", self.fw_jumps)?,
                Field::BackJumps  => writeln!(out, "{}", self.back_jumps)?,
                Field::BadJumps   => writeln!(out, "{}", self.bad_jumps)?,
                Field::Frequent   => writeln!(out, "{}", self.frequent_list())?,
                Field::Print(txt) => writeln!(out, "{txt}")?,
                Field::Eol        => writeln!(out)?,
            }
        }
        Ok(())
    }
}

/// A single line of a stats report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Loc,
    Comments,
    Labels,
    Jumps,
    FwJumps,
    BackJumps,
    BadJumps,
    Frequent,
    Print(String),
    Eol,
}

impl Field {
    /// Maps a flag name (without leading dashes) to a field.
    pub fn from_flag(flag: &str) -> Option<Self> {
        Some(match flag {
            "loc"       => Field::Loc,
            "comments"  => Field::Comments,
            "labels"    => Field::Labels,
            "jumps"     => Field::Jumps,
            "fwjumps"   => Field::FwJumps,
            "backjumps" => Field::BackJumps,
            "badjumps"  => Field::BadJumps,
            "frequent"  => Field::Frequent,
            "eol"       => Field::Eol,
            _ => return None,
        })
    }
}

/// One `--stats=FILE` group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsRequest {
    pub path:   PathBuf,
    pub fields: Vec<Field>,
}

impl StatsRequest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StatsRequest { path: path.into(), fields: Vec::new() }
    }
}

/// Writes every report in request order; the first failure aborts the rest.
pub fn write_reports(stats: &Stats, requests: &[StatsRequest]) -> Result<(), Error> {
    for req in requests {
        let wrap = |source| Error::StatsFile { path: req.path.clone(), source };
        let mut out = BufWriter::new(File::create(&req.path).map_err(wrap)?);
        stats.render(&req.fields, &mut out).map_err(wrap)?;
        out.flush().map_err(wrap)?;
        log::info!("stats written to {}", req.path.display());
    }
    Ok(())
}
