//! parse – IPPcode24 source validator (CLI)

use std::{
    io::{self, IsTerminal, Write},
    process::ExitCode,
};

use anyhow::{Context, Result};
use ippcode_parse::{
    cli::{self, Invocation},
    parser,
    stats::{self, StatsCollector},
    Error,
};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

fn main() -> ExitCode {
    // stdout carries the XML, so logs go to stderr only
    let _ = TermLogger::init(
        #[cfg(debug_assertions)]
        LevelFilter::Debug,
        #[cfg(not(debug_assertions))]
        LevelFilter::Warn,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            let code = err
                .chain()
                .find_map(|e| e.downcast_ref::<Error>())
                .map_or(99, Error::exit_code);
            ExitCode::from(code)
        }
    }
}

fn run() -> Result<()> {
    let requests = match cli::parse_args(std::env::args_os())? {
        Invocation::Help => {
            println!("{}", cli::USAGE);
            return Ok(());
        }
        Invocation::Run(requests) => requests,
    };

    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Err(Error::NoInput.into());
    }

    /* 1️⃣  single pass over stdin */
    let mut collector = (!requests.is_empty()).then(StatsCollector::new);
    let (program, totals) = parser::parse(stdin.lock(), collector.as_mut())?;

    /* 2️⃣  XML to stdout */
    let mut out = io::stdout().lock();
    write!(out, "{program}")
        .and_then(|()| out.flush())
        .map_err(Error::from)
        .context("writing XML to stdout")?;

    /* 3️⃣  stats reports */
    if let Some(collector) = collector {
        stats::write_reports(&collector.finalize(totals), &requests)?;
    }
    Ok(())
}
