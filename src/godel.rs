//! Gödel numbering of alphanumeric text: position `i` contributes `prime(i)^value(char)`.

use std::fmt;

use log::{debug, trace};
use num_bigint::BigUint;
use num_traits::One;
use serde::Serialize;

use crate::encoding::{EncodeError, SymbolEncoding, is_valid_symbol};
use crate::primes::PrimeTable;

/// Longest input accepted unless configured otherwise.
pub const DEFAULT_MAX_LENGTH: usize = 100;

/// One factor of a Gödel number. `position` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingTerm {
    pub position: usize,
    pub symbol: char,
    pub prime: BigUint,
    pub exponent: u32,
    pub term: BigUint,
}

/// The product together with the ordered per-character breakdown that built it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoding {
    pub number: BigUint,
    pub terms: Vec<EncodingTerm>,
}

impl Encoding {
    /// Recompute the product from the breakdown and compare with the stored number.
    pub fn verify(&self) -> bool {
        let product: BigUint = self.terms.iter().map(|t| &t.term).product();
        product == self.number
            && self
                .terms
                .iter()
                .all(|t| t.prime.pow(t.exponent) == t.term)
    }

    pub fn binary(&self) -> BinaryDigits {
        BinaryDigits::from_number(&self.number)
    }

    /// Exact decimal digit count, taken from the decimal rendering.
    pub fn decimal_digits(&self) -> usize {
        self.number.to_str_radix(10).len()
    }
}

/// Encodes text against a borrowed prime table.
#[derive(Debug, Clone, Copy)]
pub struct GodelEncoder<'a> {
    primes: &'a PrimeTable,
    max_length: usize,
}

impl<'a> GodelEncoder<'a> {
    pub fn new(primes: &'a PrimeTable, max_length: usize) -> Self {
        Self { primes, max_length }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Check the input without computing anything.
    pub fn validate(&self, text: &str) -> Result<usize, EncodeError> {
        let len = text.chars().count();
        if len == 0 {
            return Err(EncodeError::EmptyInput);
        }
        if len > self.max_length {
            return Err(EncodeError::InputTooLong {
                len,
                max: self.max_length,
            });
        }
        if let Some((idx, ch)) = text
            .chars()
            .enumerate()
            .find(|(_, ch)| !is_valid_symbol(*ch))
        {
            return Err(EncodeError::InvalidCharacter {
                ch,
                position: idx + 1,
            });
        }
        if len > self.primes.len() {
            return Err(EncodeError::PrimeTableExhausted {
                len,
                available: self.primes.len(),
            });
        }
        Ok(len)
    }

    pub fn encode<E: SymbolEncoding + ?Sized>(
        &self,
        mapper: &E,
        text: &str,
    ) -> Result<Encoding, EncodeError> {
        let len = self.validate(text)?;
        debug!("encoding {} symbols with {}", len, mapper.name());

        let mut terms = Vec::with_capacity(len);
        for (idx, ch) in text.chars().enumerate() {
            let position = idx + 1;
            let exponent = mapper.map_char(ch, position)?;
            let prime = self
                .primes
                .get(idx)
                .ok_or(EncodeError::PrimeTableExhausted {
                    len,
                    available: self.primes.len(),
                })?
                .clone();
            let term = prime.pow(exponent);
            trace!("{}: '{}' -> {}^{}", position, ch, prime, exponent);
            terms.push(EncodingTerm {
                position,
                symbol: ch,
                prime,
                exponent,
                term,
            });
        }

        let number = terms
            .iter()
            .fold(BigUint::one(), |acc, t| acc * &t.term);
        debug!("product has {} bits", number.bits());
        Ok(Encoding { number, terms })
    }
}

/// Base-2 expansion of a Gödel number, most significant bit first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BinaryDigits(String);

/// Raised when user-supplied text is not a bit string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BitsError {
    #[error("invalid binary digit '{ch}' at offset {offset}")]
    InvalidDigit { ch: char, offset: usize },
}

impl BinaryDigits {
    pub fn from_number(n: &BigUint) -> Self {
        Self(n.to_str_radix(2))
    }

    /// Accept a raw `0`/`1` string as-is, leading zeros included.
    pub fn parse(s: &str) -> Result<Self, BitsError> {
        let s = s.trim();
        if let Some((offset, ch)) = s.chars().enumerate().find(|(_, c)| !matches!(c, '0' | '1')) {
            return Err(BitsError::InvalidDigit { ch, offset });
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.bytes().map(|b| b == b'1')
    }
}

impl fmt::Display for BinaryDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shorten a long digit string for display, marking the cut with `...`.
pub fn truncate_for_display(digits: &str, limit: usize) -> String {
    if digits.chars().count() <= limit {
        return digits.to_string();
    }
    let head: String = digits.chars().take(limit).collect();
    format!("{head}...")
}
