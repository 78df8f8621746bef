//! Property-based tests for both codecs and the primitives they rest on.
//!
//! 1. **Round trips**: decoding an encoded text gives the text back, followed
//!    only by padding letters
//! 2. **Numeral bijection**
//! 3. **Modular inverse correctness**
//! 4. **Greedy determinism** of the knapsack decomposition

use classic_ciphers::{
    algo::invmod,
    alphabet::CYRILLIC,
    bag::{decompose, superincreasing_sequence, BagCodec, BagKey, KNAPSACK_LEN, REFERENCE_SEQUENCE},
    bits::CODE_BITS,
    numeral::Numeral,
    rsa::{Factors, RsaCodec, REFERENCE_EXPONENT, REFERENCE_MODULUS},
};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// First prime above 1024000
const BAG_MODULUS: u64 = 1024021;

/// Factorizations `(p, q)` with `digits(phi) == digits(p * q)`
const RSA_FACTORS: &[(u64, u64)] = &[(997, 1879), (1879, 997), (1009, 2003), (7919, 7927)];

// ─────────────────────────────────────────────────────────────────────────────
// Strategies
// ─────────────────────────────────────────────────────────────────────────────

/// Any of the 33 letters, Ё included
fn rsa_text() -> impl Strategy<Value = String> {
    prop::collection::vec(0u32..33, 0..40).prop_map(|offsets| {
        offsets
            .into_iter()
            .map(|offset| CYRILLIC.letter_at(offset).unwrap_or('Ё'))
            .collect()
    })
}

/// Letters of the contiguous run only, they have 5-bit codes
fn bag_text() -> impl Strategy<Value = String> {
    prop::collection::vec(0u32..32, 0..40).prop_map(|offsets| {
        offsets
            .into_iter()
            .filter_map(|offset| CYRILLIC.letter_at(offset))
            .collect()
    })
}

fn rng_seed() -> impl Strategy<Value = [u8; 32]> {
    prop::array::uniform32(any::<u8>())
}

/// Everything past `text` must be the padding letter
fn assert_padded(decoded: &str, text: &str, max_padding: usize) {
    assert!(decoded.starts_with(text), "{:?} does not start with {:?}", decoded, text);
    let padding = &decoded[text.len()..];
    assert!(padding.chars().all(|ch| ch == CYRILLIC.first()));
    assert!(padding.chars().count() <= max_padding);
}

// ─────────────────────────────────────────────────────────────────────────────
// Round trips
// ─────────────────────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_rsa_round_trip(text in rsa_text(), key in 0..RSA_FACTORS.len(), seed in rng_seed()) {
        let (p, q) = RSA_FACTORS[key];
        let p = BigUint::from(p);
        let factors = Factors::from_modulus(p.clone(), &p * q).unwrap();
        let e = factors.random_exponent(ChaCha20Rng::from_seed(seed)).unwrap();

        let codec = RsaCodec::new(CYRILLIC);
        let wire = codec.encode(&text, &factors, &e).unwrap();
        let decoded = codec.decode(&wire, &p).unwrap();
        assert_padded(&decoded, &text, factors.group_len() - 1);

        // whole groups decode exactly
        let chars = text.chars().count();
        if chars % factors.group_len() == 0 {
            prop_assert_eq!(decoded, text);
        }
    }

    #[test]
    fn prop_rsa_reference_key(text in rsa_text()) {
        let p = BigUint::from(997u32);
        let factors = Factors::from_modulus(p.clone(), BigUint::from(REFERENCE_MODULUS)).unwrap();
        let codec = RsaCodec::new(CYRILLIC);
        let wire = codec.encode(&text, &factors, &BigUint::from(REFERENCE_EXPONENT)).unwrap();

        let prefix = "1873363;1427;";
        prop_assert!(wire.starts_with(prefix));
        let groups = (text.chars().count() + 2) / 3;
        prop_assert_eq!(wire.len(), prefix.len() + groups * 7);

        assert_padded(&codec.decode(&wire, &p).unwrap(), &text, 2);
    }

    #[test]
    fn prop_bag_round_trip(text in bag_text(), seed in rng_seed()) {
        let key = BagKey::generate(ChaCha20Rng::from_seed(seed), BigUint::from(BAG_MODULUS)).unwrap();
        let codec = BagCodec::new(CYRILLIC);
        let wire = codec.encode(&text, &key).unwrap();
        let decoded = codec.decode(&wire, key.modulus()).unwrap();
        assert_padded(&decoded, &text, (KNAPSACK_LEN - 1) / CODE_BITS);

        // 16 letters fill exactly five groups
        if text.chars().count() % KNAPSACK_LEN == 0 {
            prop_assert_eq!(decoded, text);
        }
    }

    #[test]
    fn prop_bag_reference_key(text in bag_text()) {
        let key = BagKey::reference(BigUint::from(BAG_MODULUS)).unwrap();
        let codec = BagCodec::new(CYRILLIC);
        let wire = codec.encode(&text, &key).unwrap();
        prop_assert!(wire.starts_with("415238;"));
        let decoded = codec.decode(&wire, key.modulus()).unwrap();
        assert_padded(&decoded, &text, (KNAPSACK_LEN - 1) / CODE_BITS);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Primitives
// ─────────────────────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_numeral_bijection(value in 1u8..=33) {
        let numeral = Numeral::new(value, &CYRILLIC).unwrap();
        let letter = numeral.to_letter(&CYRILLIC).unwrap();
        prop_assert_eq!(Numeral::from_letter(letter, &CYRILLIC).unwrap(), numeral);
    }

    #[test]
    fn prop_invmod(a in 1u64..u64::MAX, m in 2u64..u64::MAX) {
        let a = BigUint::from(a);
        let m = BigUint::from(m);
        match invmod(&a, &m) {
            Some(inverse) => {
                prop_assert!(inverse < m);
                prop_assert!(((&a * inverse) % &m).is_one());
            }
            None => prop_assert!(!a.gcd(&m).is_one()),
        }
    }

    #[test]
    fn prop_greedy_reference(bits in prop::collection::vec(any::<bool>(), KNAPSACK_LEN)) {
        let sum: BigUint = bits
            .iter()
            .zip(REFERENCE_SEQUENCE.iter())
            .filter(|&(&bit, _)| bit)
            .map(|(_, term)| term)
            .sum();
        prop_assert_eq!(decompose(&sum, &REFERENCE_SEQUENCE).unwrap(), bits);
    }

    #[test]
    fn prop_greedy_generated(
        bits in prop::collection::vec(any::<bool>(), KNAPSACK_LEN),
        seed in rng_seed(),
        start in 1u64..=7,
    ) {
        let sequence = superincreasing_sequence(ChaCha20Rng::from_seed(seed), KNAPSACK_LEN, start, 1..=1000);
        let sum: BigUint = bits
            .iter()
            .zip(&sequence)
            .filter(|&(&bit, _)| bit)
            .map(|(_, term)| term)
            .sum();
        prop_assert_eq!(decompose(&sum, &sequence).unwrap(), bits);
    }
}
