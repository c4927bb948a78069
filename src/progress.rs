//! # Progress — Atomic Run Progress Counters
//!
//! Thread-safe progress tracking shared between parallel witness workers and
//! the background status reporter. Counters are atomics for lock-free updates
//! from Rayon workers; a Mutex guards only the current-candidate string (low
//! contention — written once per run, not per witness round).
//!
//! ## Background Reporter
//!
//! A dedicated thread logs progress every 10 seconds: witness rounds
//! completed, Rho attempts, factors found, and round rate. Shuts down
//! cleanly via the `shutdown` atomic flag.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

pub struct Progress {
    /// Miller-Rabin witness rounds completed.
    pub rounds: AtomicU64,
    /// Pollard Rho attempts started (retries included).
    pub attempts: AtomicU64,
    /// Nontrivial divisors found.
    pub found: AtomicU64,
    pub current: Mutex<String>,
    start: Instant,
    shutdown: AtomicBool,
}

impl Progress {
    pub fn new() -> Arc<Self> {
        Arc::new(Progress {
            rounds: AtomicU64::new(0),
            attempts: AtomicU64::new(0),
            found: AtomicU64::new(0),
            current: Mutex::new(String::new()),
            start: Instant::now(),
            shutdown: AtomicBool::new(false),
        })
    }

    pub fn start_reporter(self: &Arc<Self>) -> thread::JoinHandle<()> {
        let progress = Arc::clone(self);
        thread::spawn(move || loop {
            thread::sleep(Duration::from_secs(10));
            if progress.shutdown.load(Ordering::Relaxed) {
                break;
            }
            progress.print_status();
        })
    }

    pub fn print_status(&self) {
        let elapsed = self.start.elapsed();
        let rounds = self.rounds.load(Ordering::Relaxed);
        let attempts = self.attempts.load(Ordering::Relaxed);
        let found = self.found.load(Ordering::Relaxed);
        let current = self.current.lock().unwrap().clone();
        let rate = if elapsed.as_secs() > 0 {
            rounds as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };
        let m = elapsed.as_secs() / 60;
        let s = elapsed.as_secs() % 60;
        info!(
            current = %current,
            rounds,
            attempts,
            found,
            rate = format_args!("{:.2}", rate),
            elapsed = format_args!("{:02}:{:02}", m, s),
            "run progress"
        );
    }

    pub fn stop(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}
