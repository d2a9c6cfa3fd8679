#![cfg(not(tarpaulin_include))]

use apticode::{DecodeError, DecodeOptions, EncodeError, StructuredInput, VariableSchema};
use clap::{Args, Parser, Subcommand};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Test-case and exam-timer utilities for AptiCode.
#[derive(Parser, Debug)]
#[command(name = "apticode", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a raw test case into JSON.
    Decode(DecodeCommand),
    /// Encode a JSON object into a raw test case.
    Encode(EncodeCommand),
    /// Show the time left until a deadline.
    Countdown(CountdownCommand),
}

#[derive(Args, Debug)]
struct DecodeCommand {
    /// Variable schema file, one `name structure type` line per variable.
    #[arg(long, value_name = "PATH")]
    schema: PathBuf,
    /// Raw test-case file.
    #[arg(long, value_name = "PATH")]
    test_case: PathBuf,
    /// Fail on unknown structure tokens instead of reading them as strings.
    #[arg(long)]
    strict: bool,
    /// Print JSON on a single line.
    #[arg(long)]
    compact: bool,
}

#[derive(Args, Debug)]
struct EncodeCommand {
    /// Variable schema file.
    #[arg(long, value_name = "PATH")]
    schema: PathBuf,
    /// JSON object mapping variable names to values.
    #[arg(long, value_name = "PATH")]
    input: PathBuf,
}

#[derive(Args, Debug)]
struct CountdownCommand {
    /// Deadline timestamp, e.g. 2030-01-01T09:00:00Z.
    target: String,
    /// Keep printing until the deadline passes.
    #[arg(long)]
    watch: bool,
    /// Refresh interval for --watch, in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    interval_ms: u64,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn run_decode(cmd: DecodeCommand) -> Result<(), CliError> {
    let schema = read_file(&cmd.schema)?;
    let test_case = read_file(&cmd.test_case)?;
    let options = DecodeOptions {
        strict_structures: cmd.strict,
    };

    let input = apticode::decode_with(&test_case, &schema, &options)?;
    println!("{}", input.to_json(!cmd.compact)?);
    Ok(())
}

fn run_encode(cmd: EncodeCommand) -> Result<(), CliError> {
    let schema = VariableSchema::parse(&read_file(&cmd.schema)?);
    let input: StructuredInput = serde_json::from_str(&read_file(&cmd.input)?)?;

    print!("{}", apticode::encode(&input, &schema)?);
    Ok(())
}

fn run_countdown(cmd: CountdownCommand) -> Result<(), CliError> {
    if !cmd.watch {
        println!("{}", apticode::remaining(&cmd.target).display);
        return Ok(());
    }

    let interval = Duration::from_millis(cmd.interval_ms.max(1));
    let started = Instant::now();
    loop {
        let countdown = apticode::remaining(&cmd.target);
        println!("{}", countdown.display);
        if countdown.is_expired() || countdown.time_left_millis.is_none() {
            break;
        }
        thread::sleep(interval);
    }
    info!(
        "countdown finished after {:.1} seconds",
        started.elapsed().as_secs_f64()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    debug!("running {:?}", cli.command);

    let result = match cli.command {
        Commands::Decode(cmd) => run_decode(cmd),
        Commands::Encode(cmd) => run_encode(cmd),
        Commands::Countdown(cmd) => run_countdown(cmd),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
