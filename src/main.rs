use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use zcalc::calculator::{ExpressionEngine, copy_to_clipboard};
use zcalc::command::{parse_line, replay};
use zcalc::config::Config;

/// Keypad calculator.
///
/// Each KEYS argument is replayed as key presses: digits, `+ - * / ( ) .`,
/// `=` to evaluate, `c` to clear and `←` for backspace. Without KEYS an
/// interactive session reads one key sequence per line from stdin.
#[derive(Parser, Debug)]
#[command(name = "zcalc", version, about)]
struct Cli {
    /// Key sequences to replay
    keys: Vec<String>,

    /// Print the engine state as JSON instead of the display value
    #[arg(long)]
    json: bool,

    /// Copy the final display value to the clipboard
    #[arg(long)]
    copy: bool,

    /// Path to the configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let mut engine = ExpressionEngine::with_format(config.result_format());

    if cli.keys.is_empty() {
        run_interactive(&mut engine, &config, cli.json)?;
    } else {
        for keys in &cli.keys {
            debug!(%keys, "replaying");
            replay(keys, &mut engine);
        }
        print_state(&mut io::stdout().lock(), &engine, cli.json)?;
    }

    if cli.copy {
        let text = engine.display_value();
        if let Err(e) = copy_to_clipboard(text) {
            warn!("{}", e);
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_interactive(engine: &mut ExpressionEngine, config: &Config, json: bool) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    write!(stdout, "{}", config.prompt)?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        for command in parse_line(&line) {
            command.apply(engine);
        }

        print_state(&mut stdout, engine, json)?;
        write!(stdout, "{}", config.prompt)?;
        stdout.flush()?;
    }

    writeln!(stdout)?;
    Ok(())
}

fn print_state(out: &mut impl Write, engine: &ExpressionEngine, json: bool) -> anyhow::Result<()> {
    if json {
        let snapshot =
            serde_json::to_string(&engine.snapshot()).context("Failed to serialize state")?;
        writeln!(out, "{}", snapshot)?;
    } else {
        writeln!(out, "{}", engine.display_value())?;
    }
    Ok(())
}
