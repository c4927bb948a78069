//! # CLI Execution Functions
//!
//! Extracted from `main.rs` to keep the entry point slim. Contains the execution
//! logic for each subcommand: the parallel witness run, the Rho factor hunt,
//! base conversion, and rayon configuration.
//!
//! All randomness for a run is drawn up front from one seeded generator, so a
//! `--seed` run replays the same witnesses and walk parameters regardless of
//! how rayon schedules the workers.

use anyhow::{anyhow, bail, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use rhodium::alphabet::{self, Alphabet};
use rhodium::bigint::BigInt;
use rhodium::{
    estimate_digits, is_small_prime, miller_rabin, modular, pollard_rho, progress, small_factor,
};
use serde::Serialize;
use std::sync::atomic::Ordering;
use std::time::Instant;
use tracing::{info, warn};

use super::{Cli, Commands};

/// One worker's pre-drawn randomness: the Miller-Rabin witness, plus the Rho
/// polynomial coefficient and walk seed used if that witness says composite.
struct Draw {
    witness: BigInt,
    coefficient: BigInt,
    seed: BigInt,
}

/// Outcome of a single witness round, reported after the parallel region.
#[derive(Serialize)]
struct WorkerReport {
    worker: usize,
    witness: String,
    passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    divider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

#[derive(Serialize)]
struct TestReport {
    n: String,
    base: u64,
    digits: u64,
    verdict: String,
    certain: bool,
    witnesses: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    divider: Option<String>,
    elapsed_secs: f64,
    workers: Vec<WorkerReport>,
}

#[derive(Serialize)]
struct FactorReport {
    n: String,
    base: u64,
    divider: String,
    cofactor: String,
    attempts: u64,
    elapsed_secs: f64,
}

// ── Candidate Parsing ───────────────────────────────────────────

fn alphabet_for(base: u64) -> Result<&'static Alphabet> {
    alphabet::for_base(base)
        .ok_or_else(|| anyhow!("unsupported base {} (2, 10, and 16 are built in)", base))
}

/// Parse a candidate numeral. Input is whitespace-trimmed and lowercased
/// first, so pasted uppercase hex works.
fn parse_candidate(text: &str, alphabet: &Alphabet) -> Result<BigInt> {
    let cleaned = text.trim().to_ascii_lowercase();
    Ok(BigInt::parse(&cleaned, alphabet)?)
}

/// One seeded generator per run: `--seed` fixes every draw, entropy otherwise.
fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// Certain verdicts that need no witness work: units, table primes, and
/// candidates with a small factor. Returns `None` when the candidate must go
/// to the witness pool.
fn screen(n: &BigInt) -> Option<(&'static str, Option<u64>)> {
    if *n <= BigInt::one() {
        // 0 and 1 are units, neither prime nor composite
        return Some(("not prime", None));
    }
    if is_small_prime(n) {
        return Some(("prime", None));
    }
    small_factor(n).map(|p| ("composite", Some(p)))
}

// ── Candidate Testing ───────────────────────────────────────────

/// Run the `test` subcommand: trial-division screen, then a pool of random
/// Miller-Rabin witnesses in parallel. Every witness that says composite also
/// hunts for an explicit divider with Pollard's Rho.
pub fn run_test(cli: &Cli) -> Result<()> {
    let (n_text, base, witnesses, max_iterations, json) = match &cli.command {
        Commands::Test { n, base, witnesses, max_iterations, json } => {
            (n.as_str(), *base, *witnesses, *max_iterations, *json)
        }
        _ => unreachable!("run_test dispatched for a non-test command"),
    };
    let source = alphabet_for(base)?;
    let n = parse_candidate(n_text, source)?;
    let digits = estimate_digits(&n);
    let witness_count = witnesses.unwrap_or_else(rayon::current_num_threads);
    let start = Instant::now();

    info!(
        n = %n,
        digits,
        witnesses = witness_count,
        threads = rayon::current_num_threads(),
        "testing candidate"
    );

    // Units, table primes, and small factors settle here with certainty.
    if let Some((verdict, small)) = screen(&n) {
        let report = TestReport {
            n: n.to_string_in(source),
            base,
            digits,
            verdict: verdict.to_string(),
            certain: true,
            witnesses: 0,
            divider: small.map(|p| BigInt::from(p).to_string_in(source)),
            elapsed_secs: start.elapsed().as_secs_f64(),
            workers: Vec::new(),
        };
        return emit_test_report(&report, json);
    }

    // Witnesses and walk parameters live in [1, n-1]; random_below draws
    // below n-1 and incr shifts the range up off zero.
    let bound = n.trunc_sub(&BigInt::one());
    let mut rng = seeded_rng(cli.seed);
    let draws: Vec<Draw> = (0..witness_count)
        .map(|_| Draw {
            witness: modular::random_below(&bound, &mut rng).incr(),
            coefficient: modular::random_below(&bound, &mut rng).incr(),
            seed: modular::random_below(&bound, &mut rng).incr(),
        })
        .collect();

    let progress = progress::Progress::new();
    *progress.current.lock().unwrap() = format!("n = {n} ({digits} digits)");
    let reporter = progress.start_reporter();

    let workers: Vec<WorkerReport> = draws
        .into_par_iter()
        .enumerate()
        .map(|(worker, draw)| {
            let passed = miller_rabin::is_probably_prime(&n, &draw.witness);
            progress.rounds.fetch_add(1, Ordering::Relaxed);

            let (divider, note) = if passed {
                (None, None)
            } else {
                progress.attempts.fetch_add(1, Ordering::Relaxed);
                match pollard_rho::find_factor(&n, &draw.coefficient, &draw.seed, max_iterations) {
                    Ok(d) if !d.is_zero() => {
                        progress.found.fetch_add(1, Ordering::Relaxed);
                        (Some(d.to_string_in(source)), None)
                    }
                    Ok(_) => (
                        None,
                        Some("walk degenerated; retry with new parameters".to_string()),
                    ),
                    Err(e) => (None, Some(e.to_string())),
                }
            };

            WorkerReport {
                worker,
                witness: draw.witness.to_string_in(source),
                passed,
                divider,
                note,
            }
        })
        .collect();

    progress.stop();
    let _ = reporter.join();

    // One composite witness is proof; a full pass is only probable.
    let all_passed = workers.iter().all(|w| w.passed);
    let first_divider = workers.iter().find_map(|w| w.divider.clone());
    let report = TestReport {
        n: n.to_string_in(source),
        base,
        digits,
        verdict: if all_passed { "probably prime" } else { "composite" }.to_string(),
        certain: !all_passed,
        witnesses: witness_count,
        divider: first_divider,
        elapsed_secs: start.elapsed().as_secs_f64(),
        workers,
    };
    info!(
        verdict = %report.verdict,
        elapsed_secs = report.elapsed_secs,
        "test complete"
    );
    emit_test_report(&report, json)
}

fn emit_test_report(report: &TestReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    println!("n = {} (base {}, ~{} digits)", report.n, report.base, report.digits);
    for w in &report.workers {
        if w.passed {
            println!("worker {:>2}: witness {} -> pass", w.worker, w.witness);
        } else {
            match (&w.divider, &w.note) {
                (Some(d), _) => println!(
                    "worker {:>2}: witness {} -> composite, divider {}",
                    w.worker, w.witness, d
                ),
                (None, Some(note)) => println!(
                    "worker {:>2}: witness {} -> composite ({})",
                    w.worker, w.witness, note
                ),
                (None, None) => println!(
                    "worker {:>2}: witness {} -> composite",
                    w.worker, w.witness
                ),
            }
        }
    }
    println!("verdict: {}", report.verdict);
    if let Some(d) = &report.divider {
        println!("divider: {d}");
    }
    Ok(())
}

// ── Factor Extraction ───────────────────────────────────────────

/// Run the `factor` subcommand: trial-division screen, then parallel Rho
/// attempts with fresh random parameters until one lands a divisor.
pub fn run_factor(cli: &Cli) -> Result<()> {
    let (n_text, base, attempts, max_iterations, json) = match &cli.command {
        Commands::Factor { n, base, attempts, max_iterations, json } => {
            (n.as_str(), *base, *attempts, *max_iterations, *json)
        }
        _ => unreachable!("run_factor dispatched for a non-factor command"),
    };
    let source = alphabet_for(base)?;
    let n = parse_candidate(n_text, source)?;

    if n <= BigInt::one() {
        bail!("{} has no nontrivial divisors", n.to_string_in(source));
    }
    if is_small_prime(&n) {
        bail!("{} is prime", n.to_string_in(source));
    }

    let start = Instant::now();
    info!(n = %n, attempts, "hunting for a divisor");

    let progress = progress::Progress::new();
    *progress.current.lock().unwrap() = format!("n = {n}");
    let reporter = progress.start_reporter();

    let mut divider = small_factor(&n).map(BigInt::from);
    if divider.is_none() {
        let bound = n.trunc_sub(&BigInt::one());
        let mut rng = seeded_rng(cli.seed);
        let params: Vec<(BigInt, BigInt)> = (0..attempts)
            .map(|_| {
                (
                    modular::random_below(&bound, &mut rng).incr(),
                    modular::random_below(&bound, &mut rng).incr(),
                )
            })
            .collect();

        divider = params.into_par_iter().find_map_any(|(coefficient, seed)| {
            progress.attempts.fetch_add(1, Ordering::Relaxed);
            match pollard_rho::find_factor(&n, &coefficient, &seed, max_iterations) {
                Ok(d) if !d.is_zero() => {
                    progress.found.fetch_add(1, Ordering::Relaxed);
                    Some(d)
                }
                Ok(_) => None,
                Err(e) => {
                    warn!(error = %e, "rho attempt gave up");
                    None
                }
            }
        });
    }

    progress.stop();
    let _ = reporter.join();

    let divider = match divider {
        Some(d) => d,
        None => bail!(
            "no nontrivial divisor found after {} attempts (candidate may be prime)",
            attempts
        ),
    };

    // Cross-check before reporting: the quotient must come out exact.
    let (cofactor, remainder) = n.div_rem(&divider)?;
    if !remainder.is_zero() {
        bail!(
            "divisor cross-check failed: {} does not divide {}",
            divider.to_string_in(source),
            n.to_string_in(source)
        );
    }

    let report = FactorReport {
        n: n.to_string_in(source),
        base,
        divider: divider.to_string_in(source),
        cofactor: cofactor.to_string_in(source),
        attempts: progress.attempts.load(Ordering::Relaxed),
        elapsed_secs: start.elapsed().as_secs_f64(),
    };
    info!(
        divider = %report.divider,
        attempts = report.attempts,
        elapsed_secs = report.elapsed_secs,
        "factor complete"
    );
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{} = {} × {}", report.n, report.divider, report.cofactor);
    }
    Ok(())
}

// ── Base Conversion ─────────────────────────────────────────────

/// Run the `convert` subcommand: re-render a numeral between built-in bases.
pub fn run_convert(value: &str, from: u64, to: u64, min_digits: usize) -> Result<()> {
    let source = alphabet_for(from)?;
    let target = alphabet_for(to)?;
    let cleaned = value.trim().to_ascii_lowercase();
    let converted = alphabet::convert(&cleaned, source, target, min_digits)?;
    println!("{converted}");
    Ok(())
}

// ── Rayon Configuration ─────────────────────────────────────────

/// Configure the global rayon thread pool size. Zero or unset means one
/// worker per logical core.
pub fn configure_rayon(threads: Option<usize>) {
    let num_threads = threads.unwrap_or(0);
    if num_threads > 0 {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
        {
            warn!(error = %e, "Could not configure rayon thread pool");
        }
    }
}
