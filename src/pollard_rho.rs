//! # Pollard's Rho — Monte Carlo Factor Extraction
//!
//! Finds a nontrivial divisor of an odd composite by walking the pseudorandom
//! map x ↦ x² + c (mod n) with Floyd's tortoise-and-hare cycle detection.
//! The walk projected mod p (an unknown prime factor) collides after about
//! √p steps by the birthday bound; when the projections collide but the walk
//! itself has not, gcd(|a − b|, n) is a multiple of p strictly inside n.
//!
//! The walk is fully determined by `(coefficient, seed)`, so the driver
//! retries failures with fresh random parameters rather than looping here;
//! one call is one attempt. Two failure channels:
//!
//! - the walk itself cycles (gcd hits n): reported as a zero result, the
//!   long-standing "retry with new parameters" sentinel;
//! - the iteration cap runs out before any gcd moves: reported as
//!   [`Error::NoFactorFound`], so a stuck walk can never hang a worker.
//!
//! ## References
//!
//! - John M. Pollard, "A Monte Carlo method for factorization", BIT
//!   Numerical Mathematics 15(3):331–334, 1975.
//! - Floyd's cycle detection as described in Knuth, TAOCP Vol. 2, §3.1.

use crate::bigint::BigInt;
use crate::modular::{gcd, power_mod};
use crate::Error;

/// Iteration cap for one Rho attempt. A factor of b bits is expected in
/// roughly 2^(b/4) steps, so 2^20 covers factors well past 64 bits; drivers
/// pass something smaller when they would rather retry with new parameters.
pub const DEFAULT_MAX_ITERATIONS: u64 = 1 << 20;

/// One Rho attempt on `n` with the walk x ↦ x² + coefficient (mod n)
/// started at `seed`.
///
/// Returns a nontrivial divisor of `n` on success. Even `n` short-circuits
/// to two. A zero result means the walk degenerated (cycle closed with no
/// divisor exposed) — retry with a fresh coefficient and seed. Exceeding
/// `max_iterations` reports [`Error::NoFactorFound`]. Prime `n` never yields
/// a divisor; it ends in the zero sentinel once the walk cycles.
pub fn find_factor(
    n: &BigInt,
    coefficient: &BigInt,
    seed: &BigInt,
    max_iterations: u64,
) -> Result<BigInt, Error> {
    let one = BigInt::one();
    let two = BigInt::two();
    if !n.is_odd() {
        return Ok(two);
    }

    let step = |x: &BigInt| -> Result<BigInt, Error> {
        let square = power_mod(x, &two, n)?;
        (coefficient + &square).modulo(n)
    };

    let mut a = seed.clone();
    let mut b = seed.clone();
    for _ in 0..max_iterations {
        a = step(&a)?;
        b = step(&step(&b)?)?;
        let diff = if a > b { a.trunc_sub(&b) } else { b.trunc_sub(&a) };
        let d = gcd(&diff, n);
        if d == *n {
            return Ok(BigInt::zero());
        }
        if d > one {
            return Ok(d);
        }
    }
    Err(Error::NoFactorFound { iterations: max_iterations })
}
