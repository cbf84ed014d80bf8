// File: src/path/codec.rs

//! Fixed-width, order-preserving segment codec
//!
//! A segment is a base-92 number written most-significant digit first and
//! left-padded with the lowest symbol, so byte-wise string comparison of two
//! segments agrees with numeric comparison of the values they encode.

use thiserror::Error;

/// Segment alphabet in ascending code-point order.
///
/// Printable ASCII from `' '` to `'~'` minus `%`, `_` and `\`, which are
/// pattern metacharacters or escapes for SQL `LIKE`.
pub const ALPHABET: &[u8; 92] = b" !\"#$&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[]^`abcdefghijklmnopqrstuvwxyz{|}~";

/// Number of symbols in the alphabet
pub const BASE: u64 = ALPHABET.len() as u64;

/// Characters per segment
pub const SEGMENT_WIDTH: usize = 5;

/// Distinct values a single segment can hold (`BASE ^ SEGMENT_WIDTH`)
pub const CAPACITY: u64 = BASE * BASE * BASE * BASE * BASE;

/// Largest value that still encodes into one segment
pub const MAX_VALUE: u64 = CAPACITY - 1;

/// Codec errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// Value does not fit in a single segment
    #[error("value {0} does not fit in one path segment")]
    Overflow(u64),

    /// Segment or path has the wrong number of characters
    #[error("invalid length {actual}: expected {expected}")]
    InvalidLength { expected: &'static str, actual: usize },

    /// Character outside the alphabet
    #[error("invalid character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },
}

/// Encode `value` as a single segment.
pub fn encode(value: u64) -> Result<String, PathError> {
    if value > MAX_VALUE {
        return Err(PathError::Overflow(value));
    }

    let mut digits = [ALPHABET[0]; SEGMENT_WIDTH];
    let mut rest = value;
    for slot in digits.iter_mut().rev() {
        *slot = ALPHABET[(rest % BASE) as usize];
        rest /= BASE;
    }

    // Every byte comes from the ASCII alphabet
    Ok(digits.iter().map(|&b| b as char).collect())
}

/// Decode a single segment back to its value.
pub fn decode(segment: &str) -> Result<u64, PathError> {
    let bytes = segment.as_bytes();
    if bytes.len() != SEGMENT_WIDTH {
        return Err(PathError::InvalidLength {
            expected: "5",
            actual: bytes.len(),
        });
    }

    let mut value = 0u64;
    for (position, &byte) in bytes.iter().enumerate() {
        let digit = symbol_value(byte).ok_or_else(|| PathError::InvalidCharacter {
            character: segment[position..].chars().next().unwrap_or('\u{fffd}'),
            position,
        })?;
        value = value * BASE + digit;
    }
    Ok(value)
}

/// Check that every byte of `s` belongs to the alphabet.
pub(crate) fn validate_symbols(s: &str) -> Result<(), PathError> {
    match s.bytes().position(|b| symbol_value(b).is_none()) {
        None => Ok(()),
        Some(position) => Err(PathError::InvalidCharacter {
            character: s[position..].chars().next().unwrap_or('\u{fffd}'),
            position,
        }),
    }
}

fn symbol_value(byte: u8) -> Option<u64> {
    // The alphabet is sorted, so a binary search finds the digit value
    ALPHABET.binary_search(&byte).ok().map(|i| i as u64)
}
