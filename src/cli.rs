//! Command line surface.
//!
//! Report fields apply to the most recent `--stats=FILE`, so their order on
//! the command line matters. clap records the argv index of every
//! occurrence, which is used to replay them in order.

use std::ffi::OsString;

use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};

use crate::{error::Error, stats::{Field, StatsRequest}};

pub const USAGE: &str = "\
Desc: validating filter for IPPcode24 source code
in:   source code in IPPcode24 on stdin
out:  XML representation of the program on stdout

usage:
    parse [--help]
    parse [--stats=file] [stats_options] [--stats=file [...]]

optional arguments:
    --help          show this help message and exit
    --stats=file    write the chosen statistics about the source to file

stats_options:
    --loc           lines of code
    --comments      number of comments
    --labels        number of unique labels
    --jumps         number of jumps
    --fwjumps       number of forward jumps
    --backjumps     number of backward jumps
    --badjumps      number of jumps to a missing label
    --frequent      most frequent opcode(s)
    --print=string  literal string
    --eol           newline";

/// Field flags, in the order they are looked up.
const FIELD_FLAGS: [&str; 9] = [
    "loc", "comments", "labels", "jumps", "fwjumps", "backjumps", "badjumps", "frequent", "eol",
];

#[derive(Parser, Debug)]
#[command(name = "parse", disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    #[arg(long, exclusive = true)]
    help: bool,

    #[arg(long, require_equals = true, action = clap::ArgAction::Append)]
    stats: Vec<String>,

    #[arg(long, require_equals = true, action = clap::ArgAction::Append)]
    print: Vec<String>,

    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "", action = clap::ArgAction::Append)]
    loc: Vec<String>,
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "", action = clap::ArgAction::Append)]
    comments: Vec<String>,
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "", action = clap::ArgAction::Append)]
    labels: Vec<String>,
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "", action = clap::ArgAction::Append)]
    jumps: Vec<String>,
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "", action = clap::ArgAction::Append)]
    fwjumps: Vec<String>,
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "", action = clap::ArgAction::Append)]
    backjumps: Vec<String>,
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "", action = clap::ArgAction::Append)]
    badjumps: Vec<String>,
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "", action = clap::ArgAction::Append)]
    frequent: Vec<String>,
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "", action = clap::ArgAction::Append)]
    eol: Vec<String>,
}

/// What the user asked for.
#[derive(Debug, PartialEq, Eq)]
pub enum Invocation {
    Help,
    Run(Vec<StatsRequest>),
}

enum Occurrence {
    Stats(String),
    Field(Field),
}

fn indexed<T>(matches: &ArgMatches, id: &str, values: impl IntoIterator<Item = T>) -> Vec<(usize, T)> {
    matches
        .indices_of(id)
        .into_iter()
        .flatten()
        .zip(values)
        .collect()
}

/// Parses the process arguments (including the program name).
pub fn parse_args<I, T>(args: I) -> Result<Invocation, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    check_in_order(args.get(1..).unwrap_or_default())?;

    let matches = Cli::command()
        .try_get_matches_from(args)
        .map_err(|e| Error::Arguments(e.to_string().trim_end().to_string()))?;
    let cli = Cli::from_arg_matches(&matches).map_err(|e| Error::Arguments(e.to_string()))?;

    if cli.help {
        return Ok(Invocation::Help);
    }

    let mut occurrences: Vec<(usize, Occurrence)> = Vec::new();
    occurrences.extend(indexed(&matches, "stats", cli.stats.into_iter().map(Occurrence::Stats)));
    occurrences.extend(indexed(
        &matches,
        "print",
        cli.print.into_iter().map(|text| Occurrence::Field(Field::Print(text))),
    ));
    for flag in FIELD_FLAGS {
        let values: Vec<String> = matches.get_many::<String>(flag).into_iter().flatten().cloned().collect();
        if let Some(value) = values.iter().find(|v| !v.is_empty()) {
            return Err(Error::Arguments(format!("--{flag} takes no value, got `{value}`")));
        }
        let field = Field::from_flag(flag).ok_or_else(|| Error::Arguments(format!("--{flag}")))?;
        occurrences.extend(indexed(&matches, flag, values.iter().map(|_| Occurrence::Field(field.clone()))));
    }
    occurrences.sort_by_key(|&(idx, _)| idx);

    build_requests(occurrences.into_iter().map(|(_, occ)| occ)).map(Invocation::Run)
}

/// Walks a `--stats` command line in argv order so the first offending
/// argument decides the error: a bad flag is 10, an empty or repeated file
/// name is 12. Command lines not starting with `--stats` are left to clap.
fn check_in_order(args: &[OsString]) -> Result<(), Error> {
    let starts_with_stats = args
        .first()
        .and_then(|arg| arg.to_str())
        .is_some_and(|arg| arg.split('=').next() == Some("--stats"));
    if !starts_with_stats {
        return Ok(());
    }

    let mut files: Vec<&str> = Vec::new();
    for arg in args {
        let arg = arg
            .to_str()
            .ok_or_else(|| Error::Arguments(arg.to_string_lossy().into_owned()))?;
        match arg.split_once('=') {
            Some(("--stats", name)) => {
                if name.is_empty() {
                    return Err(Error::EmptyStatsFile);
                }
                if files.contains(&name) {
                    return Err(Error::DuplicateStatsFile(name.to_string()));
                }
                files.push(name);
            }
            Some(("--print", _)) => {}
            _ if arg.strip_prefix("--").and_then(Field::from_flag).is_some() => {}
            _ => return Err(Error::Arguments(arg.to_string())),
        }
    }
    Ok(())
}

fn build_requests(occurrences: impl Iterator<Item = Occurrence>) -> Result<Vec<StatsRequest>, Error> {
    let mut requests: Vec<StatsRequest> = Vec::new();
    for occ in occurrences {
        match occ {
            Occurrence::Stats(name) => requests.push(StatsRequest::new(name)),
            Occurrence::Field(field) => match requests.last_mut() {
                Some(req) => req.fields.push(field),
                None => return Err(Error::Arguments("stats option before --stats".into())),
            },
        }
    }
    Ok(requests)
}
