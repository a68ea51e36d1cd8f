use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::io::BufRead;
use std::path::PathBuf;
use stylelog::{Arg, Level, Logger, LoggerOptions};

#[derive(Parser)]
#[command(name = "stylelog")]
#[command(about = "Write gated, styled log lines from shell scripts", long_about = None)]
struct Args {
    /// TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Threshold as a level name or ordinal (overrides config and environment)
    #[arg(long, value_name = "LEVEL", allow_hyphen_values = true)]
    level: Option<String>,

    /// Disable colors
    #[arg(long)]
    no_color: bool,

    /// Prefix lines with the local time
    #[arg(long)]
    timestamp: bool,

    /// Level method to call, or print/eprint to skip gating
    #[arg(value_enum)]
    method: Method,

    /// Message arguments; lines are read from stdin when empty
    message: Vec<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Method {
    Error,
    Warn,
    Info,
    Log,
    Debug,
    Print,
    Eprint,
}

impl Method {
    fn level(self) -> Option<Level> {
        match self {
            Method::Error => Some(Level::Error),
            Method::Warn => Some(Level::Warn),
            Method::Info => Some(Level::Info),
            Method::Log => Some(Level::Log),
            Method::Debug => Some(Level::Debug),
            Method::Print | Method::Eprint => None,
        }
    }
}

fn build_logger(args: &Args) -> anyhow::Result<Logger> {
    let base = match &args.config {
        Some(path) => stylelog::config::load_config_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?
            .into_options()?,
        None => LoggerOptions::new(),
    };

    let mut overrides = LoggerOptions::new();
    if let Some(level) = &args.level {
        overrides = overrides.log_level(level.as_str());
    }
    if args.no_color {
        overrides = overrides.colors(false);
    }
    if args.timestamp {
        overrides = overrides.timestamp(true);
    }

    Ok(Logger::new(base.merge(overrides))?)
}

fn emit(logger: &Logger, method: Method, parts: Vec<Arg>) {
    match method.level() {
        Some(level) => logger.log_at(level, parts),
        None if matches!(method, Method::Eprint) => logger.eprint(parts),
        None => logger.print(parts),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let logger = build_logger(&args)?;

    if args.message.is_empty() {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = line.context("Failed to read stdin")?;
            emit(&logger, args.method, vec![Arg::Text(line)]);
        }
    } else {
        let parts = args.message.iter().map(Arg::from).collect();
        emit(&logger, args.method, parts);
    }

    logger.flush();
    Ok(())
}
