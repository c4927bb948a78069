//! # BigInt — Arbitrary-Precision Unsigned Integer Engine
//!
//! Digit-vector bignum underlying every operation in the crate. Provides:
//!
//! 1. **Canonical representation** — base-16 digits stored least-significant
//!    first, with the empty vector as the unique encoding of zero. Every
//!    constructor strips high-order zero digits, so derived equality and the
//!    length-first ordering below are always numerically correct.
//! 2. **Comparison** (`Ord`) — digit-count first, then most-significant-digit
//!    downward. On canonical values this is exactly numeric order.
//! 3. **Arithmetic** — ripple-carry addition, truncated subtraction (clamped
//!    at zero, the natural-number analogue of saturating_sub), schoolbook
//!    multiplication, and long division returning (quotient, remainder).
//! 4. **Radix I/O** — parsing from and rendering into positional digit
//!    alphabets (see [`crate::alphabet`]), plus lowercase-hex [`Display`].
//! 5. **Machine-word bridges** (`From<u64>`, `to_u64`, `div_rem_u64`,
//!    `rem_u64`, `bit_len`) used by trial division and string rendering.
//!
//! ## Algorithm: Long Division
//!
//! `div_rem` walks the dividend from the most significant digit down,
//! maintaining a running remainder r with r < divisor. Each step shifts r up
//! one digit, brings the next dividend digit in, and extracts the quotient
//! digit by repeated subtraction of the divisor — at most RADIX − 1 = 15
//! rounds, since r < 16·divisor after the shift. Complexity O(n·m) digit
//! operations for an n-digit dividend and m-digit divisor.
//!
//! ## Algorithm: Schoolbook Multiplication
//!
//! O(n·m) product with per-row carry propagation into a pre-sized output
//! vector. Digit products fit comfortably in u32 (15·15 + carries), so no
//! wide intermediates are needed.
//!
//! ## References
//!
//! - Donald E. Knuth, "The Art of Computer Programming", Vol. 2,
//!   §4.3.1 "The Classical Algorithms" (multi-digit add/sub/mul/div).

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul};

use crate::alphabet::Alphabet;
use crate::Error;

/// Numeric base of the internal digit vector.
pub const RADIX: u32 = 16;

/// Bits per internal digit (log2 of [`RADIX`]).
const DIGIT_BITS: u64 = 4;

/// Arbitrary-precision unsigned integer over base-16 digits.
///
/// Digits are stored least-significant first; the empty vector is the
/// canonical zero. Values are immutable in practice: every operation returns
/// a fresh `BigInt`, which is what makes the primality and factorization
/// drivers safe to run from many threads against one shared operand.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BigInt {
    digits: Vec<u8>,
}

impl BigInt {
    /// The canonical zero (empty digit vector).
    pub fn zero() -> Self {
        BigInt { digits: Vec::new() }
    }

    /// The multiplicative identity.
    pub fn one() -> Self {
        BigInt { digits: vec![1] }
    }

    /// The smallest prime; the squaring constant in the witness test and the
    /// Rho step polynomial.
    pub fn two() -> Self {
        BigInt { digits: vec![2] }
    }

    /// Build from a raw little-endian digit vector, trimming high-order zeros
    /// so the result is canonical. Digits must already be < RADIX.
    pub(crate) fn from_digits(mut digits: Vec<u8>) -> Self {
        while digits.last() == Some(&0) {
            digits.pop();
        }
        BigInt { digits }
    }

    /// True for the canonical zero.
    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// True if the low digit is odd. Zero is even.
    pub fn is_odd(&self) -> bool {
        self.digits.first().is_some_and(|&d| d & 1 == 1)
    }

    /// `self + 1`.
    pub fn incr(&self) -> BigInt {
        self + &BigInt::one()
    }

    /// Truncated subtraction: `self - rhs`, clamped at zero when `rhs > self`.
    ///
    /// This is the only subtraction the crate needs — callers that require an
    /// absolute difference (Pollard's Rho) take it in both directions and use
    /// whichever came out nonzero.
    pub fn trunc_sub(&self, rhs: &BigInt) -> BigInt {
        if self <= rhs {
            return BigInt::zero();
        }
        let mut digits = Vec::with_capacity(self.digits.len());
        let mut borrow = 0i32;
        for (i, &d) in self.digits.iter().enumerate() {
            let sub = *rhs.digits.get(i).unwrap_or(&0) as i32;
            let mut diff = d as i32 - sub - borrow;
            if diff < 0 {
                diff += RADIX as i32;
                borrow = 1;
            } else {
                borrow = 0;
            }
            digits.push(diff as u8);
        }
        BigInt::from_digits(digits)
    }

    /// Euclidean division: `(self / divisor, self % divisor)`.
    ///
    /// Long division from the most significant digit down; the quotient digit
    /// at each position is found by repeated subtraction (at most 15 rounds,
    /// see the module header). Returns [`Error::DivisionByZero`] for a zero
    /// divisor — the one arithmetic failure a caller can meaningfully hit
    /// with untrusted input.
    pub fn div_rem(&self, divisor: &BigInt) -> Result<(BigInt, BigInt), Error> {
        if divisor.is_zero() {
            return Err(Error::DivisionByZero);
        }
        if self < divisor {
            return Ok((BigInt::zero(), self.clone()));
        }
        let mut quotient = vec![0u8; self.digits.len()];
        let mut remainder = BigInt::zero();
        for i in (0..self.digits.len()).rev() {
            // Shift the remainder up one digit and bring the next one in,
            // skipping the no-op that would break canonical form (0 -> [0]).
            let d = self.digits[i];
            if !(remainder.digits.is_empty() && d == 0) {
                remainder.digits.insert(0, d);
            }
            let mut q = 0u8;
            while remainder >= *divisor {
                remainder = remainder.trunc_sub(divisor);
                q += 1;
            }
            quotient[i] = q;
        }
        Ok((BigInt::from_digits(quotient), remainder))
    }

    /// `self mod modulus`. Shorthand for the remainder half of [`div_rem`].
    ///
    /// [`div_rem`]: BigInt::div_rem
    pub fn modulo(&self, modulus: &BigInt) -> Result<BigInt, Error> {
        Ok(self.div_rem(modulus)?.1)
    }

    /// Divide by a machine word: `(self / divisor, self % divisor)`.
    ///
    /// Used by string rendering and trial division. Panics on a zero divisor,
    /// matching primitive integer division; the BigInt/BigInt path is the one
    /// that reports [`Error::DivisionByZero`] recoverably.
    pub fn div_rem_u64(&self, divisor: u64) -> (BigInt, u64) {
        debug_assert!(divisor != 0, "division by zero");
        let mut quotient = vec![0u8; self.digits.len()];
        let mut rem: u64 = 0;
        for i in (0..self.digits.len()).rev() {
            // u128 intermediates: rem * 16 + 15 can exceed u64 for divisors
            // near u64::MAX.
            let acc = rem as u128 * RADIX as u128 + self.digits[i] as u128;
            quotient[i] = (acc / divisor as u128) as u8;
            rem = (acc % divisor as u128) as u64;
        }
        (BigInt::from_digits(quotient), rem)
    }

    /// `self mod divisor` for a machine-word divisor. Panics on zero, like
    /// [`div_rem_u64`](BigInt::div_rem_u64).
    pub fn rem_u64(&self, divisor: u64) -> u64 {
        debug_assert!(divisor != 0, "division by zero");
        let mut rem: u64 = 0;
        for &d in self.digits.iter().rev() {
            rem = ((rem as u128 * RADIX as u128 + d as u128) % divisor as u128) as u64;
        }
        rem
    }

    /// Number of significant bits: 0 for zero, ⌊log2⌋ + 1 otherwise.
    pub fn bit_len(&self) -> u64 {
        match self.digits.last() {
            None => 0,
            Some(&msd) => {
                (self.digits.len() as u64 - 1) * DIGIT_BITS + (8 - msd.leading_zeros() as u64)
            }
        }
    }

    /// Convert to u64 if the value fits (at most 16 internal digits).
    pub fn to_u64(&self) -> Option<u64> {
        if self.digits.len() as u64 * DIGIT_BITS > 64 {
            return None;
        }
        let mut value: u64 = 0;
        for &d in self.digits.iter().rev() {
            value = value * RADIX as u64 + d as u64;
        }
        Some(value)
    }

    /// Parse a most-significant-digit-first string over the given alphabet.
    ///
    /// Accumulates Horner-style (`value = value * base + digit`), so any
    /// alphabet works regardless of the internal radix; base-16 alphabets map
    /// straight onto the digit vector. The empty string and all-zero strings
    /// parse to zero. An unrecognized character reports
    /// [`Error::InvalidDigit`] with the offending char.
    pub fn parse(text: &str, alphabet: &Alphabet) -> Result<BigInt, Error> {
        if alphabet.base() == RADIX as u64 {
            let mut digits = Vec::with_capacity(text.len());
            for ch in text.chars().rev() {
                let v = alphabet.digit_value(ch).ok_or(Error::InvalidDigit { ch })?;
                digits.push(v as u8);
            }
            return Ok(BigInt::from_digits(digits));
        }
        let base = BigInt::from(alphabet.base());
        let mut value = BigInt::zero();
        for ch in text.chars() {
            let v = alphabet.digit_value(ch).ok_or(Error::InvalidDigit { ch })?;
            value = &(&value * &base) + &BigInt::from(v);
        }
        Ok(value)
    }

    /// Render most-significant-digit-first in the given alphabet.
    ///
    /// Peels digits off with [`div_rem_u64`](BigInt::div_rem_u64) by the
    /// alphabet's base; zero renders as the alphabet's zero digit.
    pub fn to_string_in(&self, alphabet: &Alphabet) -> String {
        if self.is_zero() {
            return alphabet.digit_char(0).to_string();
        }
        let base = alphabet.base();
        let mut out = Vec::new();
        let mut n = self.clone();
        while !n.is_zero() {
            let (q, r) = n.div_rem_u64(base);
            out.push(alphabet.digit_char(r));
            n = q;
        }
        out.iter().rev().collect()
    }
}

impl From<u64> for BigInt {
    fn from(mut value: u64) -> Self {
        let mut digits = Vec::new();
        while value > 0 {
            digits.push((value % RADIX as u64) as u8);
            value /= RADIX as u64;
        }
        BigInt { digits }
    }
}

impl Ord for BigInt {
    /// Length-first, then lexicographic from the most significant digit down.
    /// Canonical form (no high-order zero digits) makes this numeric order.
    fn cmp(&self, other: &Self) -> Ordering {
        match self.digits.len().cmp(&other.digits.len()) {
            Ordering::Equal => self.digits.iter().rev().cmp(other.digits.iter().rev()),
            ord => ord,
        }
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add<&BigInt> for &BigInt {
    type Output = BigInt;

    /// Ripple-carry addition. Never produces a non-canonical result: the top
    /// digit is either the longer operand's (nonzero) digit plus carry-ins,
    /// or a freshly pushed carry of 1.
    fn add(self, rhs: &BigInt) -> BigInt {
        let (longer, shorter) = if self.digits.len() >= rhs.digits.len() {
            (&self.digits, &rhs.digits)
        } else {
            (&rhs.digits, &self.digits)
        };
        let mut digits = Vec::with_capacity(longer.len() + 1);
        let mut carry = 0u32;
        for (i, &d) in longer.iter().enumerate() {
            let sum = d as u32 + *shorter.get(i).unwrap_or(&0) as u32 + carry;
            digits.push((sum % RADIX) as u8);
            carry = sum / RADIX;
        }
        if carry > 0 {
            digits.push(carry as u8);
        }
        BigInt { digits }
    }
}

impl Mul<&BigInt> for &BigInt {
    type Output = BigInt;

    /// Schoolbook multiplication with per-row carry propagation.
    fn mul(self, rhs: &BigInt) -> BigInt {
        if self.is_zero() || rhs.is_zero() {
            return BigInt::zero();
        }
        let mut digits = vec![0u8; self.digits.len() + rhs.digits.len()];
        for (i, &a) in self.digits.iter().enumerate() {
            let mut carry = 0u32;
            for (j, &b) in rhs.digits.iter().enumerate() {
                let t = digits[i + j] as u32 + a as u32 * b as u32 + carry;
                digits[i + j] = (t % RADIX) as u8;
                carry = t / RADIX;
            }
            let mut k = i + rhs.digits.len();
            while carry > 0 {
                let t = digits[k] as u32 + carry;
                digits[k] = (t % RADIX) as u8;
                carry = t / RADIX;
                k += 1;
            }
        }
        BigInt::from_digits(digits)
    }
}

impl fmt::Display for BigInt {
    /// Lowercase hex, most significant digit first; zero is `"0"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.digits.is_empty() {
            return f.write_str("0");
        }
        for &d in self.digits.iter().rev() {
            write!(f, "{d:x}")?;
        }
        Ok(())
    }
}
