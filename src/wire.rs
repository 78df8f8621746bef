//! Textual wire formats exchanged between the encoders and decoders.
//!
//! Both are semicolon separated ASCII:
//! - RSA-like: `<N>;<E>;<chunk><chunk>...`, chunks are fixed width and written
//!   back to back
//! - bag: `<E>;<seq_0>;...;<seq_15>;<sum_1>;...;<sum_k>`
use std::{fmt, str::FromStr};

use num_bigint::BigUint;

use crate::{bag::KNAPSACK_LEN, error::CipherError};

pub const SEPARATOR: char = ';';

fn parse_number(field: &str, name: &str) -> Result<BigUint, CipherError> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CipherError::malformed(format!(
            "{} `{}` is not a decimal number",
            name, field
        )));
    }
    BigUint::parse_bytes(field.as_bytes(), 10)
        .ok_or_else(|| CipherError::malformed(format!("{} `{}` is not a number", name, field)))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaMessage {
    modulus: BigUint,
    exponent: BigUint,
    blob: String,
}

impl RsaMessage {
    pub fn new(modulus: BigUint, exponent: BigUint) -> Self {
        Self {
            modulus,
            exponent,
            blob: String::new(),
        }
    }

    /// Appends `chunk` left padded with zeros to exactly `width` digits
    pub fn push_chunk(&mut self, chunk: &BigUint, width: usize) -> Result<(), CipherError> {
        let digits = chunk.to_str_radix(10);
        if digits.len() > width {
            return Err(CipherError::malformed(format!(
                "chunk {} is wider than {} digits",
                digits, width
            )));
        }
        self.blob.extend(std::iter::repeat('0').take(width - digits.len()));
        self.blob.push_str(&digits);
        Ok(())
    }

    /// Splits the chunk blob into pieces of `width` digits
    pub fn chunks(&self, width: usize) -> Result<Vec<BigUint>, CipherError> {
        if width == 0 || self.blob.len() % width != 0 {
            return Err(CipherError::malformed(format!(
                "chunk data of {} digits does not split into chunks of {}",
                self.blob.len(),
                width
            )));
        }
        self.blob
            .as_bytes()
            .chunks(width)
            .enumerate()
            .map(|(i, chunk)| {
                BigUint::parse_bytes(chunk, 10)
                    .ok_or_else(|| CipherError::malformed(format!("chunk {} is not a number", i)))
            })
            .collect()
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub fn exponent(&self) -> &BigUint {
        &self.exponent
    }

    pub fn blob(&self) -> &str {
        &self.blob
    }
}

impl FromStr for RsaMessage {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(SEPARATOR).collect();
        if fields.len() != 3 {
            return Err(CipherError::malformed(format!(
                "expected 3 fields, found {}",
                fields.len()
            )));
        }
        let modulus = parse_number(fields[0], "modulus")?;
        let exponent = parse_number(fields[1], "exponent")?;
        let blob = fields[2];
        if !blob.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CipherError::malformed("chunk data contains non-digits"));
        }
        Ok(Self {
            modulus,
            exponent,
            blob: blob.to_owned(),
        })
    }
}

impl fmt::Display for RsaMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.modulus,
            self.exponent,
            self.blob,
            sep = SEPARATOR
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BagMessage {
    multiplier: BigUint,
    public_sequence: Vec<BigUint>,
    sums: Vec<BigUint>,
}

impl BagMessage {
    pub fn new(
        multiplier: BigUint,
        public_sequence: Vec<BigUint>,
        sums: Vec<BigUint>,
    ) -> Result<Self, CipherError> {
        if public_sequence.len() != KNAPSACK_LEN {
            return Err(CipherError::malformed(format!(
                "expected {} sequence terms, found {}",
                KNAPSACK_LEN,
                public_sequence.len()
            )));
        }
        Ok(Self {
            multiplier,
            public_sequence,
            sums,
        })
    }

    pub fn multiplier(&self) -> &BigUint {
        &self.multiplier
    }

    pub fn public_sequence(&self) -> &[BigUint] {
        &self.public_sequence
    }

    pub fn sums(&self) -> &[BigUint] {
        &self.sums
    }
}

impl FromStr for BagMessage {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields: Vec<&str> = s.split(SEPARATOR).collect();
        // older encoders terminated every sum with a separator
        if fields.len() > KNAPSACK_LEN + 1 && fields.last() == Some(&"") {
            fields.pop();
        }
        if fields.len() < KNAPSACK_LEN + 1 {
            return Err(CipherError::malformed(format!(
                "expected at least {} fields, found {}",
                KNAPSACK_LEN + 1,
                fields.len()
            )));
        }
        let multiplier = parse_number(fields[0], "multiplier")?;
        let public_sequence = fields[1..=KNAPSACK_LEN]
            .iter()
            .enumerate()
            .map(|(i, field)| parse_number(field, &format!("sequence term {}", i)))
            .collect::<Result<Vec<_>, _>>()?;
        let sums = fields[KNAPSACK_LEN + 1..]
            .iter()
            .enumerate()
            .map(|(i, field)| parse_number(field, &format!("group sum {}", i + 1)))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(multiplier, public_sequence, sums)
    }
}

impl fmt::Display for BagMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.multiplier)?;
        for value in self.public_sequence.iter().chain(&self.sums) {
            write!(f, "{}{}", SEPARATOR, value)?;
        }
        Ok(())
    }
}
