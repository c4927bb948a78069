//! # Alphabet — Positional Digit Sets and Base Conversion
//!
//! The textual boundary of the crate: maps characters to digit values and
//! back. An [`Alphabet`] is an ordered ASCII digit set whose length is the
//! base; [`BINARY`], [`DECIMAL`], and [`HEX`] are the built-ins, available as
//! plain process-wide constants so lookups need no locking or lazy init.
//!
//! [`convert`] re-renders a numeral between two alphabets through the bignum
//! engine, with optional zero-padding to a minimum width. Hex uses lowercase
//! letters; callers that accept mixed-case input are expected to lowercase it
//! before parsing.

use crate::bigint::BigInt;
use crate::Error;

/// An ordered set of ASCII digit characters. Position is digit value, length
/// is the base.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Alphabet {
    digits: &'static str,
}

/// Base 2.
pub const BINARY: Alphabet = Alphabet::new("01");

/// Base 10.
pub const DECIMAL: Alphabet = Alphabet::new("0123456789");

/// Base 16, lowercase.
pub const HEX: Alphabet = Alphabet::new("0123456789abcdef");

impl Alphabet {
    /// Define an alphabet over a static digit string. At least two digits,
    /// ASCII only; both are checked at compile time for `const` definitions.
    pub const fn new(digits: &'static str) -> Self {
        let bytes = digits.as_bytes();
        assert!(bytes.len() >= 2, "an alphabet needs at least two digits");
        let mut i = 0;
        while i < bytes.len() {
            assert!(bytes[i].is_ascii(), "alphabets are ASCII digit sets");
            i += 1;
        }
        Alphabet { digits }
    }

    /// The base this alphabet represents.
    pub fn base(&self) -> u64 {
        self.digits.len() as u64
    }

    /// Value of `ch` in this alphabet, or None if `ch` is not a digit here.
    pub fn digit_value(&self, ch: char) -> Option<u64> {
        if !ch.is_ascii() {
            return None;
        }
        self.digits.bytes().position(|b| b == ch as u8).map(|i| i as u64)
    }

    /// Character for a digit value. The value must be < base; this is an
    /// internal contract (rendering only produces in-range digits), so an
    /// out-of-range value panics rather than returning an error.
    pub fn digit_char(&self, value: u64) -> char {
        debug_assert!(value < self.base(), "digit value out of range for this alphabet");
        self.digits.as_bytes()[value as usize] as char
    }
}

/// Look up a built-in alphabet by base. Only 2, 10, and 16 are built in.
pub fn for_base(base: u64) -> Option<&'static Alphabet> {
    match base {
        2 => Some(&BINARY),
        10 => Some(&DECIMAL),
        16 => Some(&HEX),
        _ => None,
    }
}

/// Re-render `value` from the `source` alphabet into the `target` alphabet,
/// left-padding with the target's zero digit up to `min_digits`. Values wider
/// than `min_digits` are never truncated.
pub fn convert(
    value: &str,
    source: &Alphabet,
    target: &Alphabet,
    min_digits: usize,
) -> Result<String, Error> {
    let n = BigInt::parse(value, source)?;
    let mut out = n.to_string_in(target);
    if out.len() < min_digits {
        let pad: String =
            std::iter::repeat(target.digit_char(0)).take(min_digits - out.len()).collect();
        out.insert_str(0, &pad);
    }
    Ok(out)
}
