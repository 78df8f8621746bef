/// Module dedicated to the number theory helpers: modular inverse,
/// exponentiation and superincreasing checks
pub mod algo;

/// Module dedicated to the alphabet - the ordered set of letters both codecs
/// work over
pub mod alphabet;

/// Module dedicated to the knapsack ("bag") cipher
pub mod bag;

/// Module dedicated to packing letters into 5-bit codes
pub mod bits;

pub mod error;

/// Module dedicated to the letter <-> numeral mapping
pub mod numeral;

/// Module dedicated to the RSA-like block cipher
pub mod rsa;

/// Module dedicated to the text normalization
pub mod text;

/// Module dedicated to the wire formats of both ciphers
pub mod wire;

pub use error::CipherError;
