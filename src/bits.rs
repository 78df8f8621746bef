use crate::{alphabet::Alphabet, error::CipherError};

/// Width of a letter code
pub const CODE_BITS: usize = 5;

/// 5-bit code of a letter: its offset inside the alphabet run.
/// The extra letter (Ё) has no code and must be normalized away first.
pub fn letter_code(ch: char, alphabet: &Alphabet) -> Result<u8, CipherError> {
    match alphabet.offset(ch) {
        Some(offset) if offset < 1 << CODE_BITS => Ok(offset as u8),
        _ => Err(CipherError::InvalidSymbol(ch.to_string())),
    }
}

pub fn code_letter(code: u8, alphabet: &Alphabet) -> Result<char, CipherError> {
    alphabet
        .letter_at(u32::from(code))
        .ok_or_else(|| CipherError::InvalidSymbol(format!("code {}", code)))
}

/// Flat sequence of bits. Letters are packed least significant bit first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitVector {
    bits: Vec<bool>,
}

impl BitVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str, alphabet: &Alphabet) -> Result<Self, CipherError> {
        let mut vector = Self {
            bits: Vec::with_capacity(text.len() * CODE_BITS),
        };
        for ch in text.chars() {
            let code = letter_code(ch, alphabet)?;
            vector
                .bits
                .extend((0..CODE_BITS).map(|j| (code >> j) & 1 == 1));
        }
        Ok(vector)
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    pub fn extend_from_slice(&mut self, bits: &[bool]) {
        self.bits.extend_from_slice(bits);
    }

    /// Appends zero bits until the length is a multiple of `group`
    pub fn pad_to_multiple(&mut self, group: usize) {
        while self.bits.len() % group != 0 {
            self.bits.push(false);
        }
    }

    /// Drops trailing bits until the length is a multiple of `group`
    pub fn truncate_to_multiple(&mut self, group: usize) {
        let len = self.bits.len() - self.bits.len() % group;
        self.bits.truncate(len);
    }

    /// Consecutive groups of `group` bits. The last one may be shorter.
    pub fn groups(&self, group: usize) -> std::slice::Chunks<'_, bool> {
        self.bits.chunks(group)
    }

    /// Reads every complete 5-bit code back as a letter. Trailing bits that
    /// don't form a whole code are ignored.
    pub fn to_text(&self, alphabet: &Alphabet) -> Result<String, CipherError> {
        self.bits
            .chunks_exact(CODE_BITS)
            .map(|code| {
                let code = code
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (j, &bit)| acc | (u8::from(bit) << j));
                code_letter(code, alphabet)
            })
            .collect()
    }
}

impl From<Vec<bool>> for BitVector {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}
