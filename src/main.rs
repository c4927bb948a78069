//! # Main — CLI Entry Point
//!
//! Routes CLI subcommands to the engine and handles shared concerns: logging
//! setup and the Rayon thread pool configuration.
//!
//! ## Subcommands
//!
//! - `test`: parallel Miller-Rabin witness pool over one candidate, with a
//!   Pollard Rho divider hunt on every composite verdict.
//! - `factor`: repeated Rho attempts with fresh random parameters until one
//!   lands a nontrivial divisor.
//! - `convert`: re-render a numeral between the built-in bases (2, 10, 16).
//!
//! ## Global Options
//!
//! - `--threads` / `RHODIUM_THREADS`: Rayon thread pool size (all cores if
//!   unset).
//! - `--seed` / `RHODIUM_SEED`: seed for the run's random draws. One seed
//!   fixes every witness, coefficient, and walk seed, making runs replayable.

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use rhodium::pollard_rho;

#[derive(Parser)]
#[command(
    name = "rhodium",
    about = "Probabilistic primality testing and factorization on arbitrary-precision integers"
)]
struct Cli {
    /// Number of rayon worker threads (defaults to all logical cores)
    #[arg(long, env = "RHODIUM_THREADS")]
    threads: Option<usize>,

    /// Seed for witness/coefficient/walk-seed draws (random when unset)
    #[arg(long, env = "RHODIUM_SEED")]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Test a candidate with a pool of random Miller-Rabin witnesses
    Test {
        /// The candidate, written in --base
        #[arg(long)]
        n: String,
        /// Base the candidate is written in (2, 10, or 16)
        #[arg(long, default_value_t = 10)]
        base: u64,
        /// Witness rounds to run (defaults to one per worker thread)
        #[arg(long)]
        witnesses: Option<usize>,
        /// Iteration cap per Rho divider attempt
        #[arg(long, default_value_t = pollard_rho::DEFAULT_MAX_ITERATIONS)]
        max_iterations: u64,
        /// Emit the report as JSON on stdout
        #[arg(long)]
        json: bool,
    },
    /// Extract one nontrivial divisor via repeated Pollard Rho attempts
    Factor {
        /// The candidate, written in --base
        #[arg(long)]
        n: String,
        /// Base the candidate is written in (2, 10, or 16)
        #[arg(long, default_value_t = 10)]
        base: u64,
        /// Parameter draws to try before giving up
        #[arg(long, default_value_t = 8)]
        attempts: usize,
        /// Iteration cap per Rho attempt
        #[arg(long, default_value_t = pollard_rho::DEFAULT_MAX_ITERATIONS)]
        max_iterations: u64,
        /// Emit the report as JSON on stdout
        #[arg(long)]
        json: bool,
    },
    /// Re-render a numeral in another base
    Convert {
        /// The numeral to convert
        #[arg(long)]
        value: String,
        /// Base the numeral is written in (2, 10, or 16)
        #[arg(long)]
        from: u64,
        /// Base to render into (2, 10, or 16)
        #[arg(long)]
        to: u64,
        /// Left-pad with zeros to at least this many digits
        #[arg(long, default_value_t = 0)]
        min_digits: usize,
    },
}

fn main() -> Result<()> {
    // Initialize structured logging: LOG_FORMAT=json for machine collection,
    // human-readable on stderr otherwise
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt().json().with_target(false).init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();
    cli::configure_rayon(cli.threads);

    match &cli.command {
        Commands::Test { .. } => cli::run_test(&cli),
        Commands::Factor { .. } => cli::run_factor(&cli),
        Commands::Convert { value, from, to, min_digits } => {
            cli::run_convert(value, *from, *to, *min_digits)
        }
    }
}
