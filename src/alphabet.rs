//! Alphabet
//! An alphabet is a contiguous run of code points, optionally followed by one
//! extra letter that lives outside the run (Ё for the Cyrillic alphabet).
//! Letters of the run get numerals `1..=run_len`, the extra letter gets the
//! last numeral.
use crate::error::CipherError;

/// Numerals are written as two decimal digits
const MAX_LETTERS: u32 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alphabet {
    first: char,
    run_len: u32,
    extra: Option<char>,
}

/// А..Я, with Ё as the 33rd letter
pub const CYRILLIC: Alphabet = Alphabet {
    first: 'А',
    run_len: 32,
    extra: Some('Ё'),
};

/// A..Z
pub const LATIN: Alphabet = Alphabet {
    first: 'A',
    run_len: 26,
    extra: None,
};

impl Default for Alphabet {
    fn default() -> Self {
        CYRILLIC
    }
}

impl Alphabet {
    pub fn new(first: char, run_len: u32, extra: Option<char>) -> Result<Self, CipherError> {
        if run_len == 0 {
            return Err(CipherError::invalid_key("alphabet is empty"));
        }
        // a run short enough to pass the size check cannot jump over the
        // surrogate block, so checking the last letter is enough
        (first as u32)
            .checked_add(run_len - 1)
            .and_then(char::from_u32)
            .ok_or_else(|| CipherError::invalid_key("alphabet leaves the unicode range"))?;
        let alphabet = Self {
            first,
            run_len,
            extra,
        };
        if let Some(extra) = extra {
            if alphabet.offset(extra).is_some() {
                return Err(CipherError::invalid_key(format!(
                    "extra letter `{}` is already part of the run",
                    extra
                )));
            }
        }
        if alphabet.size() > MAX_LETTERS {
            return Err(CipherError::invalid_key(format!(
                "alphabet has {} letters, at most {} are supported",
                alphabet.size(),
                MAX_LETTERS
            )));
        }
        Ok(alphabet)
    }

    /// First letter of the run. Padding decodes to it.
    pub fn first(&self) -> char {
        self.first
    }

    /// Length of the contiguous run
    pub fn run_len(&self) -> u32 {
        self.run_len
    }

    pub fn extra(&self) -> Option<char> {
        self.extra
    }

    /// Total number of letters, including the extra one
    pub fn size(&self) -> u32 {
        self.run_len + u32::from(self.extra.is_some())
    }

    /// Zero-based offset of `ch` inside the run. The extra letter has none.
    pub fn offset(&self, ch: char) -> Option<u32> {
        let offset = (ch as u32).checked_sub(self.first as u32)?;
        (offset < self.run_len).then_some(offset)
    }

    /// Letter at a zero-based offset inside the run
    pub fn letter_at(&self, offset: u32) -> Option<char> {
        if offset < self.run_len {
            char::from_u32(self.first as u32 + offset)
        } else {
            None
        }
    }

    pub fn contains(&self, ch: char) -> bool {
        self.offset(ch).is_some() || self.extra == Some(ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cyrillic_layout() {
        assert_eq!(CYRILLIC.size(), 33);
        assert_eq!(CYRILLIC.offset('А'), Some(0));
        assert_eq!(CYRILLIC.offset('Я'), Some(31));
        assert_eq!(CYRILLIC.offset('Ё'), None);
        assert!(CYRILLIC.contains('Ё'));
        assert!(!CYRILLIC.contains('а'));
        assert_eq!(CYRILLIC.letter_at(5), Some('Е'));
        assert_eq!(CYRILLIC.letter_at(32), None);
    }

    #[test]
    fn new_matches_constants() {
        assert_eq!(Alphabet::new('А', 32, Some('Ё')).unwrap(), CYRILLIC);
        assert_eq!(Alphabet::new('A', 26, None).unwrap(), LATIN);
    }

    #[test]
    fn new_rejects_bad_alphabets() {
        Alphabet::new('A', 0, None).unwrap_err();
        Alphabet::new('A', 26, Some('C')).unwrap_err();
        Alphabet::new('A', 100, None).unwrap_err();
        Alphabet::new('\u{D7FF}', 4, None).unwrap_err();
        Alphabet::new(char::MAX, 2, None).unwrap_err();
    }
}
