use std::fmt;

use crate::{alphabet::Alphabet, error::CipherError};

/// Number of a letter inside the alphabet, `1..=size`. Zero is reserved for padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Numeral(u8);

impl Numeral {
    /// Fills the last group of a message up to the group length
    pub const PADDING: Numeral = Numeral(0);

    /// Checks that `value` names a letter of `alphabet`
    pub fn new(value: u8, alphabet: &Alphabet) -> Result<Self, CipherError> {
        if value == 0 || u32::from(value) > alphabet.size() {
            return Err(CipherError::InvalidSymbol(format!("{:02}", value)));
        }
        Ok(Self(value))
    }

    pub fn from_letter(ch: char, alphabet: &Alphabet) -> Result<Self, CipherError> {
        let value = match alphabet.offset(ch) {
            Some(offset) => offset + 1,
            None if alphabet.extra() == Some(ch) => alphabet.size(),
            None => return Err(CipherError::InvalidSymbol(ch.to_string())),
        };
        // alphabets hold at most 99 letters
        Ok(Self(value as u8))
    }

    pub fn to_letter(self, alphabet: &Alphabet) -> Result<char, CipherError> {
        let value = u32::from(self.0);
        if value == alphabet.size() {
            if let Some(extra) = alphabet.extra() {
                return Ok(extra);
            }
        }
        value
            .checked_sub(1)
            .and_then(|offset| alphabet.letter_at(offset))
            .ok_or_else(|| CipherError::InvalidSymbol(self.to_string()))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_padding(self) -> bool {
        self.0 == 0
    }
}

/// Always two digits, zero padded
impl fmt::Display for Numeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// Maps every letter of `text` to its numeral
pub fn text_to_numerals(text: &str, alphabet: &Alphabet) -> Result<Vec<Numeral>, CipherError> {
    text.chars()
        .map(|ch| Numeral::from_letter(ch, alphabet))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::{CYRILLIC, LATIN};

    #[test]
    fn cyrillic_numerals() {
        assert_eq!(Numeral::from_letter('А', &CYRILLIC).unwrap().value(), 1);
        assert_eq!(Numeral::from_letter('Я', &CYRILLIC).unwrap().value(), 32);
        assert_eq!(Numeral::from_letter('Ё', &CYRILLIC).unwrap().value(), 33);
        assert_eq!(Numeral::new(33, &CYRILLIC).unwrap().to_letter(&CYRILLIC).unwrap(), 'Ё');
        assert_eq!(Numeral::new(6, &CYRILLIC).unwrap().to_letter(&CYRILLIC).unwrap(), 'Е');
    }

    #[test]
    fn bijection() {
        for value in 1..=33 {
            let numeral = Numeral::new(value, &CYRILLIC).unwrap();
            let letter = numeral.to_letter(&CYRILLIC).unwrap();
            assert_eq!(Numeral::from_letter(letter, &CYRILLIC).unwrap(), numeral);
        }
    }

    #[test]
    fn invalid_symbols() {
        Numeral::from_letter('а', &CYRILLIC).unwrap_err();
        Numeral::from_letter('Z', &CYRILLIC).unwrap_err();
        Numeral::from_letter('Ё', &LATIN).unwrap_err();
        Numeral::new(0, &CYRILLIC).unwrap_err();
        Numeral::new(34, &CYRILLIC).unwrap_err();
        Numeral::new(27, &LATIN).unwrap_err();
        Numeral::PADDING.to_letter(&CYRILLIC).unwrap_err();
    }

    #[test]
    fn two_digit_display() {
        let numeral = Numeral::new(3, &LATIN).unwrap();
        assert_eq!(numeral.to_string(), "03");
        assert_eq!(Numeral::PADDING.to_string(), "00");
    }

    #[test]
    fn text_mapping() {
        let numerals = text_to_numerals("ЁЖ", &CYRILLIC).unwrap();
        let values: Vec<_> = numerals.iter().map(|n| n.value()).collect();
        assert_eq!(values, vec![33, 7]);
        assert!(text_to_numerals("Ж Ж", &CYRILLIC).is_err());
    }
}
