use thiserror::Error;

/// Size of the symbol alphabet: 26 letters followed by 10 digits.
pub const ALPHABET_LEN: u32 = 36;

/// Errors reported while validating and encoding input text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("input is empty")]
    EmptyInput,
    #[error("invalid character '{ch}' at position {position}; only A-Z, a-z and 0-9 are allowed")]
    InvalidCharacter { ch: char, position: usize },
    #[error("input is {len} characters long; the maximum is {max}")]
    InputTooLong { len: usize, max: usize },
    #[error("input needs {len} primes but only {available} were generated")]
    PrimeTableExhausted { len: usize, available: usize },
}

/// Maps a single input symbol to its exponent value.
pub trait SymbolEncoding {
    fn name(&self) -> &'static str;
    /// Value in `1..=ALPHABET_LEN` for a valid symbol. `position` is only used for error reporting.
    fn map_char(&self, ch: char, position: usize) -> Result<u32, EncodeError>;
    fn is_supported(&self, ch: char) -> bool {
        self.map_char(ch, 0).is_ok()
    }
}

/// Alphanumeric mapping: A..Z → 1..26 (case-folded), 0..9 → 27..36,
/// optionally rotated by a cyclic shift over the 36 values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Alnum36 {
    shift: i64,
}

impl Alnum36 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shift(shift: i64) -> Self {
        Self { shift }
    }

    pub fn shift(&self) -> i64 {
        self.shift
    }
}

impl SymbolEncoding for Alnum36 {
    fn name(&self) -> &'static str {
        "ALNUM36"
    }

    fn map_char(&self, ch: char, position: usize) -> Result<u32, EncodeError> {
        let value = base_value(ch).ok_or(EncodeError::InvalidCharacter { ch, position })?;
        Ok(apply_shift(value, self.shift))
    }
}

/// Unshifted value of a symbol, or `None` outside `[A-Za-z0-9]`.
pub fn base_value(ch: char) -> Option<u32> {
    match ch {
        'a'..='z' | 'A'..='Z' => Some(ch.to_ascii_uppercase() as u32 - 'A' as u32 + 1),
        '0'..='9' => Some(ch as u32 - '0' as u32 + 27),
        _ => None,
    }
}

/// Cyclic rotation over `1..=36`; negative shifts wrap the other way.
pub fn apply_shift(value: u32, shift: i64) -> u32 {
    if shift == 0 {
        return value;
    }
    let n = i64::from(ALPHABET_LEN);
    ((i64::from(value) - 1 + shift.rem_euclid(n)).rem_euclid(n) + 1) as u32
}

pub fn is_valid_symbol(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn letters_and_digits() {
        let enc = Alnum36::new();
        assert_eq!(enc.map_char('A', 1), Ok(1));
        assert_eq!(enc.map_char('z', 1), Ok(26));
        assert_eq!(enc.map_char('Z', 1), Ok(26));
        assert_eq!(enc.map_char('0', 1), Ok(27));
        assert_eq!(enc.map_char('9', 1), Ok(36));
    }

    #[test]
    fn rejects_everything_else() {
        let enc = Alnum36::new();
        for ch in [' ', '!', '-', '\n', 'é', '٣'] {
            assert_eq!(
                enc.map_char(ch, 4),
                Err(EncodeError::InvalidCharacter { ch, position: 4 })
            );
            assert!(!enc.is_supported(ch));
            assert!(!is_valid_symbol(ch));
        }
    }

    #[test]
    fn shift_wraps() {
        assert_eq!(Alnum36::with_shift(1).map_char('9', 1), Ok(1));
        assert_eq!(Alnum36::with_shift(-1).map_char('A', 1), Ok(36));
        assert_eq!(Alnum36::with_shift(37).map_char('A', 1), Ok(2));
        assert_eq!(Alnum36::with_shift(-73).map_char('C', 1), Ok(2));
    }

    #[test]
    fn extreme_shifts_do_not_overflow() {
        // i64::MAX = 36 * k + 7, i64::MIN = 36 * k' + 28
        assert_eq!(apply_shift(26, i64::MAX), 33);
        assert_eq!(apply_shift(1, i64::MIN), 29);
        assert_eq!(apply_shift(36, i64::MIN), 28);
        assert_eq!(Alnum36::with_shift(i64::MAX).map_char('Z', 1), Ok(33));
    }

    #[test]
    fn shift_is_a_bijection() {
        for shift in -40..=40i64 {
            let back = (36 - shift.rem_euclid(36)) % 36;
            let mut seen = [false; 36];
            for value in 1..=ALPHABET_LEN {
                let shifted = apply_shift(value, shift);
                assert!((1..=ALPHABET_LEN).contains(&shifted));
                assert!(!seen[(shifted - 1) as usize]);
                seen[(shifted - 1) as usize] = true;
                assert_eq!(apply_shift(shifted, back), value);
            }
        }
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            EncodeError::InvalidCharacter { ch: '!', position: 3 }.to_string(),
            "invalid character '!' at position 3; only A-Z, a-z and 0-9 are allowed"
        );
        assert_eq!(
            EncodeError::InputTooLong { len: 101, max: 100 }.to_string(),
            "input is 101 characters long; the maximum is 100"
        );
    }
}
