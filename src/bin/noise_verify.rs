//! Verify the noise reproduction against reference vectors
//!
//! Run with: cargo run --bin noise-verify -- rng

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use factorio_noise_verify::noise::NoiseSpec;
use factorio_noise_verify::{
    builtin_rng_cases, load_noise_cases, load_rng_cases, run_script, sanity_check, Error, Verifier,
    DEFAULT_MAX_FAILURES,
};

/// Exit status when any sample disagrees with the reference.
const FAILURES_EXIT_CODE: u8 = 2;

#[derive(Parser)]
#[command(name = "noise-verify")]
#[command(about = "Check Factorio noise reproduction against recorded reference output")]
struct Cli {
    /// Abort after this many mismatches
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_FAILURES)]
    max_failures: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify generator output (built-in vectors when no file is given)
    Rng { path: Option<PathBuf> },
    /// Verify noise samples from a JSON vector file
    Noise { path: PathBuf },
    /// Print a single noise sample
    Sample {
        #[arg(long)]
        seed0: u32,
        #[arg(long, default_value_t = 0)]
        seed1: u8,
        /// Octave count; omit for raw basis noise
        #[arg(long)]
        octaves: Option<f64>,
        #[arg(long, default_value_t = 0.5)]
        persistence: f64,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    /// Run a Lua script with the noise functions registered
    Script { path: PathBuf },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<bool, Error> {
    let mut verifier = Verifier::new(cli.max_failures);
    match cli.command {
        Commands::Rng { path } => {
            let cases = match path {
                Some(path) => load_rng_cases(&path)?,
                None => builtin_rng_cases()?,
            };
            let report = verifier.verify_rng_cases(&cases)?;
            println!("Ran {} generator cases over {} draws", report.cases, report.draws);
        }
        Commands::Noise { path } => {
            sanity_check()?;
            let cases = load_noise_cases(&path)?;
            let report = verifier.verify_noise_cases(&cases)?;
            println!(
                "Ran {} different functions over {} samples; average deviation = {}",
                report.cases,
                report.samples,
                report.average_deviation()
            );
        }
        Commands::Sample { seed0, seed1, octaves, persistence, x, y } => {
            let spec = match octaves {
                Some(octaves) => NoiseSpec::multioctave(seed0, seed1, octaves, persistence),
                None => NoiseSpec::basis(seed0, seed1),
            };
            println!("{}", spec.compile().sample(x, y));
            return Ok(true);
        }
        Commands::Script { path } => {
            let source = std::fs::read_to_string(&path).map_err(|source| Error::Io { path, source })?;
            println!("{}", run_script(&source)?);
            return Ok(true);
        }
    }

    for mismatch in verifier.mismatches() {
        eprintln!("Test failure: {mismatch}");
    }
    if verifier.passed() {
        println!("All tests passed!");
    }
    Ok(verifier.passed())
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(FAILURES_EXIT_CODE),
        Err(Error::TooManyFailures { limit }) => {
            eprintln!("Too many test failures (more than {limit}); exiting");
            ExitCode::from(FAILURES_EXIT_CODE)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
