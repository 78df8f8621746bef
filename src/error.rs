use num_bigint::BigUint;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CipherError {
    #[error("symbol `{0}` is outside the alphabet")]
    InvalidSymbol(String),

    #[error("{value} has no inverse modulo {modulus}")]
    NoModularInverse { value: BigUint, modulus: BigUint },

    #[error("knapsack reconstruction with modulus {modulus} failed: {reason}")]
    KnapsackReconstructionFailed { modulus: BigUint, reason: String },

    #[error("malformed wire message: {0}")]
    MalformedWireFormat(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),
}

impl CipherError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedWireFormat(msg.into())
    }

    pub(crate) fn invalid_key(msg: impl Into<String>) -> Self {
        Self::InvalidKey(msg.into())
    }
}
