//! RSA-like block cipher over alphabet numerals.
//!
//! Letters become two-digit numerals, numerals are glued into decimal groups
//! small enough to stay below the modulus, and every group is raised to the
//! public exponent. Ciphertext chunks are written with the digit width of
//! `phi`, which makes them self-delimiting on the wire.
//!
//! # Usage
//! ```
//! use classic_ciphers::{alphabet::CYRILLIC, rsa::{Factors, RsaCodec}};
//! use num_bigint::BigUint;
//!
//! let p = BigUint::from(997u32);
//! let factors = Factors::from_modulus(p.clone(), BigUint::from(1873363u32)).unwrap();
//! let codec = RsaCodec::new(CYRILLIC);
//!
//! let wire = codec.encode("ШИФР", &factors, &BigUint::from(1427u32)).unwrap();
//! let text = codec.decode(&wire, &p).unwrap();
//!
//! // the last group is padded with numerals that decode to `А`
//! assert_eq!(text, "ШИФРАА");
//! ```
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::Rng;
use tracing::{debug, warn};

use crate::{
    algo::{digit_count, invmod, pow_mod},
    alphabet::Alphabet,
    error::CipherError,
    numeral::{text_to_numerals, Numeral},
    text::strip_trailing_newline,
    wire::RsaMessage,
};

/// Modulus of the classroom key, `997 * 1879`
pub const REFERENCE_MODULUS: u64 = 1873363;

/// Default exponent for RSA-like keys
pub const REFERENCE_EXPONENT: u64 = 1427;

/// Range searched by [`Factors::random_exponent`]
const EXPONENT_RANGE: std::ops::Range<u64> = 1000..3000;

/// Decimal digits per numeral
const NUMERAL_DIGITS: usize = 2;

/// Factorization of the modulus, `n = p * q`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Factors {
    p: BigUint,
    q: BigUint,
    n: BigUint,
    phi: BigUint,
}

/// Rsa public key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublic {
    e: BigUint,
    n: BigUint,
}

/// Rsa private key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPrivate {
    d: BigUint,
    n: BigUint,
}

impl Factors {
    /// Derives `q = n / p` and `phi = (p - 1)(q - 1)`.
    ///
    /// `p` has to divide `n`, and `n` has to be large enough for one numeral
    /// group. `phi` must have as many digits as `n`, otherwise ciphertext
    /// chunks could overflow their fixed width.
    pub fn from_modulus(p: BigUint, n: BigUint) -> Result<Self, CipherError> {
        if p <= One::one() || p >= n {
            return Err(CipherError::invalid_key(format!(
                "factor {} is out of range for modulus {}",
                p, n
            )));
        }
        let (q, rem) = n.div_rem(&p);
        if !rem.is_zero() {
            return Err(CipherError::invalid_key(format!(
                "{} is not a factor of {}",
                p, n
            )));
        }
        if q <= One::one() {
            return Err(CipherError::invalid_key(format!(
                "cofactor of {} in {} is trivial",
                p, n
            )));
        }
        let phi = (&p - 1u32) * (&q - 1u32);
        let factors = Self { p, q, n, phi };

        if factors.group_len() == 0 {
            return Err(CipherError::invalid_key(format!(
                "modulus {} is too small to hold a numeral group",
                factors.n
            )));
        }
        if factors.chunk_width() != digit_count(&factors.n) {
            return Err(CipherError::invalid_key(format!(
                "totient {} is shorter than modulus {}",
                factors.phi, factors.n
            )));
        }
        Ok(factors)
    }

    /// Numerals per group. Any group of that many two-digit numerals is
    /// strictly below `n`.
    pub fn group_len(&self) -> usize {
        (digit_count(&self.n) - 1) / NUMERAL_DIGITS
    }

    /// Digits per ciphertext chunk on the wire
    pub fn chunk_width(&self) -> usize {
        digit_count(&self.phi)
    }

    pub fn public_key(&self, e: &BigUint) -> RsaPublic {
        RsaPublic {
            e: e.clone(),
            n: self.n.clone(),
        }
    }

    /// `d = e^-1 (mod phi)`
    pub fn private_key(&self, e: &BigUint) -> Result<RsaPrivate, CipherError> {
        let d = invmod(e, &self.phi).ok_or_else(|| CipherError::NoModularInverse {
            value: e.clone(),
            modulus: self.phi.clone(),
        })?;
        Ok(RsaPrivate {
            d,
            n: self.n.clone(),
        })
    }

    /// Picks an exponent coprime to `phi`, scanning the search range
    /// from a random starting point
    pub fn random_exponent<R: Rng>(&self, mut rng: R) -> Result<BigUint, CipherError> {
        let span = EXPONENT_RANGE.end - EXPONENT_RANGE.start;
        let start = rng.gen_range(0..span);
        (0..span)
            .map(|i| BigUint::from(EXPONENT_RANGE.start + (start + i) % span))
            .find(|e| e.gcd(&self.phi).is_one())
            .ok_or_else(|| {
                CipherError::invalid_key(format!(
                    "no exponent in {:?} is coprime to {}",
                    EXPONENT_RANGE, self.phi
                ))
            })
    }

    /// Get a reference to the factors' p.
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// Get a reference to the factors' q.
    pub fn q(&self) -> &BigUint {
        &self.q
    }

    /// Get a reference to the factors' n.
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Get a reference to the factors' phi.
    pub fn phi(&self) -> &BigUint {
        &self.phi
    }
}

impl RsaPublic {
    pub(crate) fn encrypt_raw(&self, num: &BigUint) -> Result<BigUint, CipherError> {
        if num >= &self.n {
            return Err(CipherError::malformed(format!(
                "group {} is not below modulus {}",
                num, self.n
            )));
        }
        Ok(pow_mod(num, &self.e, &self.n))
    }

    /// Get a reference to the rsa public's e.
    pub fn e(&self) -> &BigUint {
        &self.e
    }

    /// Get a reference to the rsa public's n.
    pub fn n(&self) -> &BigUint {
        &self.n
    }
}

impl RsaPrivate {
    pub(crate) fn decrypt_raw(&self, num: &BigUint) -> Result<BigUint, CipherError> {
        if num >= &self.n {
            return Err(CipherError::malformed(format!(
                "chunk {} is not below modulus {}",
                num, self.n
            )));
        }
        Ok(pow_mod(num, &self.d, &self.n))
    }

    /// Get a reference to the rsa private's d.
    pub fn d(&self) -> &BigUint {
        &self.d
    }

    /// Get a reference to the rsa private's n.
    pub fn n(&self) -> &BigUint {
        &self.n
    }
}

/// Encodes and decodes the RSA-like wire format over a fixed alphabet
#[derive(Debug, Clone, Copy, Default)]
pub struct RsaCodec {
    alphabet: Alphabet,
}

impl RsaCodec {
    pub fn new(alphabet: Alphabet) -> Self {
        Self { alphabet }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn encode(&self, text: &str, factors: &Factors, e: &BigUint) -> Result<String, CipherError> {
        let text = strip_trailing_newline(text);
        if !e.gcd(factors.phi()).is_one() {
            warn!(%e, phi = %factors.phi(), "exponent is not coprime to phi, the message can't be decoded");
        }
        let public = factors.public_key(e);
        let group_len = factors.group_len();
        let width = factors.chunk_width();

        let mut numerals = text_to_numerals(text, &self.alphabet)?;
        while numerals.len() % group_len != 0 {
            numerals.push(Numeral::PADDING);
        }
        debug!(group_len, width, numerals = numerals.len(), "encoding numerals");

        let mut message = RsaMessage::new(public.n().clone(), public.e().clone());
        for group in numerals.chunks(group_len) {
            let m = group.iter().fold(BigUint::zero(), |acc, numeral| {
                acc * 100u32 + numeral.value()
            });
            let c = public.encrypt_raw(&m)?;
            message.push_chunk(&c, width)?;
        }
        Ok(message.to_string())
    }

    pub fn decode(&self, wire: &str, p: &BigUint) -> Result<String, CipherError> {
        let message: RsaMessage = strip_trailing_newline(wire).parse()?;
        let factors = Factors::from_modulus(p.clone(), message.modulus().clone())?;
        let private = factors.private_key(message.exponent())?;
        let digits_per_group = factors.group_len() * NUMERAL_DIGITS;

        let chunks = message.chunks(factors.chunk_width())?;
        debug!(chunks = chunks.len(), group_len = factors.group_len(), "decoding chunks");

        let mut digits = String::with_capacity(chunks.len() * digits_per_group);
        for c in &chunks {
            let m = private.decrypt_raw(c)?.to_str_radix(10);
            if m.len() > digits_per_group {
                return Err(CipherError::malformed(format!(
                    "recovered group {} is wider than {} digits",
                    m, digits_per_group
                )));
            }
            digits.extend(std::iter::repeat('0').take(digits_per_group - m.len()));
            digits.push_str(&m);
        }
        self.digits_to_text(&digits)
    }

    /// Reads two-digit numerals. Zeros may only form a trailing run of
    /// padding, which is rendered as the first letter.
    fn digits_to_text(&self, digits: &str) -> Result<String, CipherError> {
        let mut text = String::with_capacity(digits.len() / NUMERAL_DIGITS);
        let mut padding = 0;
        for pair in digits.as_bytes().chunks(NUMERAL_DIGITS) {
            let value = std::str::from_utf8(pair)
                .ok()
                .and_then(|pair| pair.parse::<u8>().ok())
                .ok_or_else(|| CipherError::malformed("recovered digits are not numerals"))?;
            if value == 0 {
                padding += 1;
                continue;
            }
            if padding > 0 {
                return Err(CipherError::InvalidSymbol(Numeral::PADDING.to_string()));
            }
            text.push(Numeral::new(value, &self.alphabet)?.to_letter(&self.alphabet)?);
        }
        text.extend(std::iter::repeat(self.alphabet.first()).take(padding));
        Ok(text)
    }
}

/// Reference modulus as a big integer
pub fn reference_modulus() -> BigUint {
    BigUint::from(REFERENCE_MODULUS)
}

/// Reference exponent as a big integer
pub fn reference_exponent() -> BigUint {
    BigUint::from(REFERENCE_EXPONENT)
}
