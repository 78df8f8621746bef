//! Knapsack ("bag") cipher.
//!
//! Letters are packed into 5-bit codes, the bit stream is cut into groups of
//! [`KNAPSACK_LEN`] bits, and every group is sent as the sum of the private
//! superincreasing terms its set bits select. The sequence itself travels
//! scaled by a multiplier modulo `N`. A receiver that knows `N` unscales it
//! and peels the sums apart greedily, highest term first.
use lazy_static::lazy_static;
use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::Rng;
use tracing::debug;

use crate::{
    algo::{invmod, is_superincreasing},
    alphabet::Alphabet,
    bits::{BitVector, CODE_BITS},
    error::CipherError,
    text::strip_trailing_newline,
    wire::BagMessage,
};

/// Terms in a knapsack sequence, and bits in a group
pub const KNAPSACK_LEN: usize = 16;

/// Multiplier of the classroom key
pub const REFERENCE_MULTIPLIER: u64 = 415238;

/// Smallest multiplier picked by [`BagKey::generate`]
const MIN_MULTIPLIER: u64 = 1024;

const MAX_MULTIPLIER_ATTEMPTS: usize = 10_000;

lazy_static! {
    /// Private sequence of the classroom key
    pub static ref REFERENCE_SEQUENCE: Vec<BigUint> = [
        6u32, 11, 31, 53, 115, 232, 450, 913, 1818, 3642, 7274, 14559, 29114, 58234, 116463,
        232929,
    ]
    .iter()
    .map(|&term| BigUint::from(term))
    .collect();
}

/// Private knapsack key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BagKey {
    sequence: Vec<BigUint>,
    modulus: BigUint,
    multiplier: BigUint,
}

impl BagKey {
    pub fn new(
        sequence: Vec<BigUint>,
        modulus: BigUint,
        multiplier: BigUint,
    ) -> Result<Self, CipherError> {
        if sequence.len() != KNAPSACK_LEN {
            return Err(CipherError::invalid_key(format!(
                "sequence has {} terms instead of {}",
                sequence.len(),
                KNAPSACK_LEN
            )));
        }
        if !is_superincreasing(&sequence) {
            return Err(CipherError::invalid_key("sequence is not superincreasing"));
        }
        let sum: BigUint = sequence.iter().sum();
        if modulus <= sum {
            return Err(CipherError::invalid_key(format!(
                "modulus {} does not exceed the sequence sum {}",
                modulus, sum
            )));
        }
        if invmod(&multiplier, &modulus).is_none() {
            return Err(CipherError::NoModularInverse {
                value: multiplier,
                modulus,
            });
        }
        Ok(Self {
            sequence,
            modulus,
            multiplier,
        })
    }

    /// The classroom sequence and multiplier under a caller supplied modulus
    pub fn reference(modulus: BigUint) -> Result<Self, CipherError> {
        Self::new(
            REFERENCE_SEQUENCE.clone(),
            modulus,
            BigUint::from(REFERENCE_MULTIPLIER),
        )
    }

    /// Generates a fresh sequence and a multiplier coprime to `modulus`
    pub fn generate<R: Rng>(mut rng: R, modulus: BigUint) -> Result<Self, CipherError> {
        let start = rng.gen_range(1..=7);
        let sequence = superincreasing_sequence(&mut rng, KNAPSACK_LEN, start, 1..=16);

        let low = BigUint::from(MIN_MULTIPLIER);
        if modulus <= low {
            return Err(CipherError::invalid_key(format!(
                "modulus {} leaves no room for a multiplier",
                modulus
            )));
        }
        let multiplier = (0..MAX_MULTIPLIER_ATTEMPTS)
            .map(|_| rng.gen_biguint_range(&low, &modulus))
            .find(|e| e.gcd(&modulus).is_one())
            .ok_or_else(|| {
                CipherError::invalid_key(format!("no multiplier coprime to {} found", modulus))
            })?;
        Self::new(sequence, modulus, multiplier)
    }

    /// `seq[j] * E (mod N)` for every term
    pub fn public_sequence(&self) -> Vec<BigUint> {
        scale(&self.sequence, &self.multiplier, &self.modulus)
    }

    /// Get a reference to the bag key's sequence.
    pub fn sequence(&self) -> &[BigUint] {
        &self.sequence
    }

    /// Get a reference to the bag key's modulus.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Get a reference to the bag key's multiplier.
    pub fn multiplier(&self) -> &BigUint {
        &self.multiplier
    }
}

/// Builds `len` terms starting at `start`; each next term is the sum of the
/// previous ones plus a random gap
pub fn superincreasing_sequence<R: Rng>(
    mut rng: R,
    len: usize,
    start: u64,
    gaps: std::ops::RangeInclusive<u64>,
) -> Vec<BigUint> {
    let mut sequence = Vec::with_capacity(len);
    let mut sum = BigUint::zero();
    if len == 0 {
        return sequence;
    }
    let mut term = BigUint::from(start.max(1));
    loop {
        sum += &term;
        sequence.push(term);
        if sequence.len() == len {
            break sequence;
        }
        term = &sum + rng.gen_range(gaps.clone()).max(1);
    }
}

fn scale(sequence: &[BigUint], factor: &BigUint, modulus: &BigUint) -> Vec<BigUint> {
    sequence
        .iter()
        .map(|term| (term * factor) % modulus)
        .collect()
}

/// Greedy reconstruction of a subset sum over a superincreasing sequence.
/// Bit `j` of the result is set when `sequence[j]` takes part in the sum.
/// On failure returns what is left of the sum.
pub fn decompose(sum: &BigUint, sequence: &[BigUint]) -> Result<Vec<bool>, BigUint> {
    let mut rest = sum.clone();
    let mut bits = vec![false; sequence.len()];
    for (j, term) in sequence.iter().enumerate().rev() {
        if rest >= *term {
            rest -= term;
            bits[j] = true;
        }
    }
    if rest.is_zero() {
        Ok(bits)
    } else {
        Err(rest)
    }
}

/// Encodes and decodes the bag wire format over a fixed alphabet
#[derive(Debug, Clone, Copy, Default)]
pub struct BagCodec {
    alphabet: Alphabet,
}

impl BagCodec {
    pub fn new(alphabet: Alphabet) -> Self {
        Self { alphabet }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn encode(&self, text: &str, key: &BagKey) -> Result<String, CipherError> {
        let text = strip_trailing_newline(text);
        let mut bits = BitVector::from_text(text, &self.alphabet)?;
        bits.pad_to_multiple(KNAPSACK_LEN);
        debug!(bits = bits.len(), "encoding bit groups");

        let sums: Vec<BigUint> = bits
            .groups(KNAPSACK_LEN)
            .map(|group| {
                group
                    .iter()
                    .zip(key.sequence())
                    .filter(|&(&bit, _)| bit)
                    .map(|(_, term)| term)
                    .sum::<BigUint>()
            })
            .collect();

        let message = BagMessage::new(key.multiplier().clone(), key.public_sequence(), sums)?;
        Ok(message.to_string())
    }

    pub fn decode(&self, wire: &str, modulus: &BigUint) -> Result<String, CipherError> {
        let message: BagMessage = strip_trailing_newline(wire).parse()?;
        let d = invmod(message.multiplier(), modulus).ok_or_else(|| {
            CipherError::NoModularInverse {
                value: message.multiplier().clone(),
                modulus: modulus.clone(),
            }
        })?;
        let sequence = scale(message.public_sequence(), &d, modulus);
        debug!(?sequence, "recovered private sequence");
        if !is_superincreasing(&sequence) {
            return Err(CipherError::KnapsackReconstructionFailed {
                modulus: modulus.clone(),
                reason: "recovered sequence is not superincreasing".to_owned(),
            });
        }

        let mut bits = BitVector::new();
        for (group, sum) in message.sums().iter().enumerate() {
            let group_bits = decompose(sum, &sequence).map_err(|remainder| {
                CipherError::KnapsackReconstructionFailed {
                    modulus: modulus.clone(),
                    reason: format!("group sum {} leaves remainder {}", group + 1, remainder),
                }
            })?;
            bits.extend_from_slice(&group_bits);
        }
        bits.truncate_to_multiple(CODE_BITS);
        bits.to_text(&self.alphabet)
    }
}
