pub mod alphabet;
pub mod bigint;
pub mod miller_rabin;
pub mod modular;
pub mod pollard_rho;
pub mod progress;

use bigint::BigInt;

/// Errors surfaced by the arithmetic and factorization layers.
#[derive(Debug, Clone)]
pub enum Error {
    /// A character outside the active alphabet was hit while parsing.
    InvalidDigit { ch: char },
    /// Division or modular reduction by zero.
    DivisionByZero,
    /// A Pollard Rho attempt exhausted its iteration cap.
    NoFactorFound { iterations: u64 },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidDigit { ch } => write!(f, "invalid digit {:?} for this alphabet", ch),
            Error::DivisionByZero => write!(f, "division by zero"),
            Error::NoFactorFound { iterations } => {
                write!(f, "no factor found within {} iterations", iterations)
            }
        }
    }
}

impl std::error::Error for Error {}

/// Small primes for trial division pre-filter.
const SMALL_PRIMES: [u32; 64] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283, 293, 307,
    311,
];

/// Quick trial-division screen.
/// Returns the divisor if n is definitely composite (divisible by a small
/// prime it is strictly larger than).
/// Returns None if n might be prime (passed trial division).
pub fn small_factor(n: &BigInt) -> Option<u64> {
    for &p in &SMALL_PRIMES {
        if n.rem_u64(p as u64) == 0 {
            // If n equals the small prime itself, it's prime, not composite
            return if *n > BigInt::from(p as u64) { Some(p as u64) } else { None };
        }
    }
    None
}

/// True when n is one of the trial-division primes themselves.
pub fn is_small_prime(n: &BigInt) -> bool {
    match n.to_u64() {
        Some(v) if v <= u32::MAX as u64 => SMALL_PRIMES.binary_search(&(v as u32)).is_ok(),
        _ => false,
    }
}

/// Estimate decimal digit count from bit length, avoiding a full radix conversion.
pub fn estimate_digits(n: &BigInt) -> u64 {
    let bits = n.bit_len();
    if bits == 0 {
        return 1;
    }
    (bits as f64 * std::f64::consts::LOG10_2) as u64 + 1
}

/// Exact decimal digit count (full radix conversion; fine at report sizes).
pub fn exact_digits(n: &BigInt) -> u64 {
    n.to_string_in(&alphabet::DECIMAL).len() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_factor_none_for_table_primes() {
        // Each small prime in our table should NOT be flagged as composite
        for &p in &SMALL_PRIMES {
            let n = BigInt::from(p as u64);
            assert_eq!(
                small_factor(&n),
                None,
                "small_factor incorrectly flagged prime {} as composite",
                p
            );
        }
    }

    #[test]
    fn small_factor_returns_divisor_for_composites() {
        let cases: &[(u64, u64)] = &[(4, 2), (9, 3), (15, 3), (49, 7), (121, 11), (1000, 2)];
        for &(c, d) in cases {
            let n = BigInt::from(c);
            assert_eq!(small_factor(&n), Some(d), "small_factor missed composite {}", c);
        }
    }

    #[test]
    fn small_factor_none_for_primes_above_table() {
        // Primes larger than 311 (our table max) that have no small factors
        let large_primes: &[u64] = &[313, 317, 331, 337, 347, 349, 353, 359, 367, 373];
        for &p in large_primes {
            let n = BigInt::from(p);
            assert_eq!(
                small_factor(&n),
                None,
                "small_factor incorrectly flagged prime {} as composite",
                p
            );
        }
    }

    #[test]
    fn small_factor_misses_products_of_large_primes() {
        // 313 * 317 = 99221 — both factors are outside our small primes table
        let n = BigInt::from(313u64 * 317);
        assert_eq!(
            small_factor(&n),
            None,
            "small_factor should miss composites with only large factors"
        );
    }

    #[test]
    fn is_small_prime_matches_table() {
        assert!(is_small_prime(&BigInt::from(2)));
        assert!(is_small_prime(&BigInt::from(97)));
        assert!(is_small_prime(&BigInt::from(311)));
        assert!(!is_small_prime(&BigInt::from(0)));
        assert!(!is_small_prime(&BigInt::from(1)));
        assert!(!is_small_prime(&BigInt::from(312)));
        assert!(!is_small_prime(&BigInt::from(313))); // prime, but past the table
        assert!(!is_small_prime(&BigInt::from(u64::MAX)));
    }

    #[test]
    fn estimate_digits_within_one_of_exact() {
        // Test across a range of magnitudes
        let mut values = vec![
            BigInt::from(1),
            BigInt::from(9),
            BigInt::from(10),
            BigInt::from(99),
            BigInt::from(100),
            BigInt::from(999),
            BigInt::from(1000),
            BigInt::from(u64::MAX),
        ];
        let googol_ish = format!("1{}", "0".repeat(50));
        values.push(BigInt::parse(&googol_ish, &alphabet::DECIMAL).unwrap());
        for v in &values {
            let est = estimate_digits(v);
            let exact = exact_digits(v);
            assert!(
                (est as i64 - exact as i64).abs() <= 1,
                "estimate_digits({}) = {} but exact = {} (diff > 1)",
                v,
                est,
                exact
            );
        }
    }

    #[test]
    fn exact_digits_known_values() {
        assert_eq!(exact_digits(&BigInt::zero()), 1);
        assert_eq!(exact_digits(&BigInt::from(1)), 1);
        assert_eq!(exact_digits(&BigInt::from(9)), 1);
        assert_eq!(exact_digits(&BigInt::from(10)), 2);
        assert_eq!(exact_digits(&BigInt::from(99)), 2);
        assert_eq!(exact_digits(&BigInt::from(100)), 3);
        assert_eq!(exact_digits(&BigInt::from(255)), 3);
    }

    #[test]
    fn error_display_is_actionable() {
        assert_eq!(
            Error::InvalidDigit { ch: 'g' }.to_string(),
            "invalid digit 'g' for this alphabet"
        );
        assert_eq!(Error::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            Error::NoFactorFound { iterations: 1024 }.to_string(),
            "no factor found within 1024 iterations"
        );
    }
}
