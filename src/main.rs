use anyhow::Result;
use clap::Parser;
use router_log_analyzer::log_parser::LogParser;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Aggregate request, response-time, and dyno usage metrics from a
/// platform router log.
#[derive(Debug, Parser)]
#[command(name = "router-metrics", version, about)]
struct Cli {
    /// Path to the router log file (one request event per line)
    log_file: PathBuf,

    /// Emit the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Disable colored output (also honored via NO_COLOR)
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut parser = LogParser::new();
    let report = parser.run(&cli.log_file)?;

    let color = !cli.no_color
        && std::env::var_os("NO_COLOR").is_none()
        && io::stdout().is_terminal();

    let mut out = io::stdout().lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        report.render(&mut out, color)?;
    }
    Ok(())
}
