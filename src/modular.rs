//! # Modular Arithmetic — Exponentiation, GCD, Bounded Random
//!
//! The three number-theoretic primitives the primality and factorization
//! layers are built from:
//!
//! 1. **Modular exponentiation** (`power_mod`) — right-to-left binary
//!    square-and-multiply, reducing after every product so intermediates
//!    never exceed modulus² in magnitude.
//! 2. **Greatest common divisor** (`gcd`) — classical Euclid by repeated
//!    remainder.
//! 3. **Bounded random generation** (`random_below`) — uniform draw below a
//!    bound by rejection sampling over whole digit vectors. The RNG is owned
//!    by the caller, which is what keeps this module free of shared state:
//!    parallel drivers hand each worker its own seeded generator.
//!
//! ## Algorithm: Square-and-Multiply
//!
//! The exponent is consumed low bit first via parity checks and halving;
//! the running base is squared (mod m) each round and folded into the result
//! on odd bits. O(log e) multiplications of O(n·m)-digit cost each.
//!
//! ## Algorithm: Rejection Sampling
//!
//! A candidate is drawn as uniformly random digits of the bound's width,
//! then rejected unless it is below the bound. A k-digit bound is at least
//! RADIX^(k−1), so each round accepts with probability ≥ 1/RADIX and the
//! expected round count is below 16. No modular fold-down is performed, so
//! the accepted value is exactly uniform on [0, bound).
//!
//! ## References
//!
//! - Menezes, van Oorschot, Vanstone, "Handbook of Applied Cryptography",
//!   Algorithm 14.79 (binary exponentiation), Algorithm 2.104 (Euclid).

use rand::Rng;

use crate::bigint::{BigInt, RADIX};
use crate::Error;

/// `base^exponent mod modulus` by binary square-and-multiply.
///
/// A zero modulus reports [`Error::DivisionByZero`]; a modulus of one gives
/// zero. `exponent` zero gives one (mod m), including `0^0 = 1`.
pub fn power_mod(base: &BigInt, exponent: &BigInt, modulus: &BigInt) -> Result<BigInt, Error> {
    if modulus.is_zero() {
        return Err(Error::DivisionByZero);
    }
    if *modulus == BigInt::one() {
        return Ok(BigInt::zero());
    }
    let mut result = BigInt::one();
    let mut base = base.modulo(modulus)?;
    let mut exponent = exponent.clone();
    while !exponent.is_zero() {
        if exponent.is_odd() {
            result = (&result * &base).modulo(modulus)?;
        }
        exponent = exponent.div_rem_u64(2).0;
        if !exponent.is_zero() {
            base = (&base * &base).modulo(modulus)?;
        }
    }
    Ok(result)
}

/// Greatest common divisor by Euclid's algorithm. `gcd(0, 0) = 0` by
/// convention; otherwise the result is positive.
pub fn gcd(a: &BigInt, b: &BigInt) -> BigInt {
    let mut a = a.clone();
    let mut b = b.clone();
    while !b.is_zero() {
        let r = a.modulo(&b).expect("loop guard keeps the divisor nonzero");
        a = b;
        b = r;
    }
    a
}

/// Uniform random value in `[0, bound)` from a caller-owned RNG.
///
/// `bound` must be nonzero — the range is empty otherwise (checked in debug
/// builds; release builds return zero). Every worker thread passes its own
/// generator, so draws are reproducible per seed and need no locking.
pub fn random_below<R: Rng + ?Sized>(bound: &BigInt, rng: &mut R) -> BigInt {
    debug_assert!(!bound.is_zero(), "random_below needs a nonzero bound");
    if bound.is_zero() {
        return BigInt::zero();
    }
    let width = (bound.bit_len() as usize).div_ceil(4);
    loop {
        let digits: Vec<u8> = (0..width).map(|_| rng.gen_range(0..RADIX as u8)).collect();
        let candidate = BigInt::from_digits(digits);
        if candidate < *bound {
            return candidate;
        }
    }
}
