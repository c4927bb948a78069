//! # Miller-Rabin — Single-Witness Probabilistic Primality Test
//!
//! One round of the strong-pseudoprime test: given an odd candidate n and a
//! witness a, decide whether a proves n composite. A composite n survives a
//! uniformly random witness with probability at most 1/4, so independent
//! witnesses drive the error rate down geometrically; running many witnesses
//! in parallel is the caller's job (see the `test` subcommand), which keeps
//! this function pure and trivially thread-safe.
//!
//! ## Algorithm
//!
//! Write n − 1 = 2^s · t with t odd. Then n passes witness a when
//! a^t ≡ 1 (mod n) or a^(2^k · t) ≡ n − 1 (mod n) for some k < s. Before
//! exponentiating, gcd(a, n) > 1 short-circuits to composite — a shared
//! factor is a divisor certificate, no exponentiation needed.
//!
//! Callers screen out small and even candidates first: by construction the
//! test reports any even n as composite, **including 2 itself**. That quirk
//! is deliberate and long-standing — the surrounding tooling never hands 2
//! to this function (trial division catches it), and changing the convention
//! here would silently shift verdicts for harnesses that replay recorded
//! witness streams.
//!
//! ## References
//!
//! - Gary L. Miller, "Riemann's Hypothesis and Tests for Primality", JCSS
//!   13(3):300–317, 1976.
//! - Michael O. Rabin, "Probabilistic algorithm for testing primality",
//!   Journal of Number Theory 12(1):128–138, 1980.

use crate::bigint::BigInt;
use crate::modular;

/// One Miller-Rabin round: does `n` pass the single witness `a`?
///
/// `witness` is expected in [1, n − 1]; the degenerate witness 1 (and n − 1)
/// passes every odd n, so callers wanting real evidence draw witnesses
/// uniformly from [1, n − 1] and run several. Returns false for every even
/// n — 2 included — and for n ≤ 1; true means "no compositeness witness
/// found", not "prime".
pub fn is_probably_prime(n: &BigInt, witness: &BigInt) -> bool {
    let one = BigInt::one();
    if *n == one || !n.is_odd() {
        return false;
    }

    // n - 1 = 2^s * t with t odd.
    let n_minus_one = n.trunc_sub(&one);
    let mut t = n_minus_one.clone();
    let mut s: u32 = 0;
    while !t.is_odd() {
        t = t.div_rem_u64(2).0;
        s += 1;
    }

    // A shared factor is a divisor certificate: composite, no powering.
    if modular::gcd(witness, n) > one {
        return false;
    }

    let two = BigInt::two();
    let mut a = pow_mod(witness, &t, n);
    if a == one || a == n_minus_one {
        return true;
    }
    for _ in 1..s {
        a = pow_mod(&a, &two, n);
        if a == n_minus_one {
            return true;
        }
    }
    false
}

/// `power_mod` specialized to this module's invariant: n is odd and ≥ 3 by
/// the time any exponentiation runs, so the modulus is never zero.
fn pow_mod(base: &BigInt, exponent: &BigInt, modulus: &BigInt) -> BigInt {
    modular::power_mod(base, exponent, modulus).expect("modulus is odd and at least 3 here")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet;

    fn big(value: u64) -> BigInt {
        BigInt::from(value)
    }

    fn dec(text: &str) -> BigInt {
        BigInt::parse(text, &alphabet::DECIMAL).unwrap()
    }

    // ── Small Candidates ────────────────────────────────────────────────

    /// Odd primes pass every coprime witness (Fermat + strong condition are
    /// theorems for prime moduli, so this is exact, not probabilistic).
    #[test]
    fn test_small_primes_pass() {
        for p in [3u64, 5, 7, 11, 13, 17, 97, 101, 65537] {
            assert!(is_probably_prime(&big(p), &big(2)), "{p} with witness 2");
        }
        assert!(is_probably_prime(&big(97), &big(95)));
    }

    /// Odd composites are rejected by witness 2 (none of these are base-2
    /// strong pseudoprimes).
    #[test]
    fn test_small_composites_rejected() {
        for c in [9u64, 15, 21, 25, 27, 33, 91, 341] {
            assert!(!is_probably_prime(&big(c), &big(2)), "{c} with witness 2");
        }
    }

    /// n ≤ 1 and even n are composite verdicts by construction. That covers
    /// 2: the function's contract is "screen small candidates first", and
    /// the even-number gate fires before any arithmetic.
    #[test]
    fn test_degenerate_candidates() {
        assert!(!is_probably_prime(&BigInt::zero(), &big(2)));
        assert!(!is_probably_prime(&big(1), &big(2)));
        assert!(!is_probably_prime(&big(4), &big(2)));
        assert!(!is_probably_prime(&big(100), &big(3)));
    }

    #[test]
    fn test_two_is_rejected_by_convention() {
        assert!(!is_probably_prime(&big(2), &big(1)));
    }

    // ── Witness Behavior ────────────────────────────────────────────────

    /// The Carmichael number 561 = 3 · 11 · 17 fools the plain Fermat test
    /// for every coprime base, but not Miller-Rabin: witness 2 kills it in
    /// the squaring chain, and witness 3 (a factor) trips the gcd gate
    /// before any exponentiation.
    #[test]
    fn test_carmichael_561() {
        assert!(!is_probably_prime(&big(561), &big(2)));
        assert!(!is_probably_prime(&big(561), &big(3)));
        assert!(!is_probably_prime(&big(561), &big(11)));
    }

    /// 2047 = 23 · 89 is the smallest base-2 strong pseudoprime: witness 2
    /// wrongly passes it, witness 3 exposes it. This is the 1/4 error bound
    /// in action and why callers run several independent witnesses.
    #[test]
    fn test_strong_pseudoprime_2047() {
        assert!(is_probably_prime(&big(2047), &big(2)));
        assert!(!is_probably_prime(&big(2047), &big(3)));
    }

    /// The vacuous witnesses: 1 and n − 1 pass every odd n, composite or
    /// not. 9 is composite; both pass it. Real witness pools draw from
    /// [1, n − 1] at random, where such witnesses are vanishingly rare.
    #[test]
    fn test_vacuous_witnesses() {
        assert!(is_probably_prime(&big(9), &big(1)));
        assert!(is_probably_prime(&big(9), &big(8)));
        assert!(!is_probably_prime(&big(9), &big(2)));
    }

    // ── Wide Candidates ─────────────────────────────────────────────────

    /// The largest 64-bit prime and a 127-bit Mersenne prime pass multiple
    /// witnesses; a neighbor composite fails.
    #[test]
    fn test_wide_candidates() {
        let p64 = dec("18446744073709551557");
        for w in [2u64, 3, 5, 7] {
            assert!(is_probably_prime(&p64, &big(w)), "2^64-59 with witness {w}");
        }
        // 2^127 - 1 (Mersenne prime M127).
        let m127 = dec("170141183460469231731687303715884105727");
        assert!(is_probably_prime(&m127, &big(2)));
        assert!(is_probably_prime(&m127, &big(7)));
        // M127 + 2 is divisible by 3, so witness 3 trips the gcd gate.
        let composite = dec("170141183460469231731687303715884105729");
        assert!(!is_probably_prime(&composite, &big(3)));
    }
}
