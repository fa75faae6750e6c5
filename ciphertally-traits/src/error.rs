use thiserror::Error;

/// Everything that can go wrong while aggregating, decrypting or decoding a tally.
///
/// Decoding overflow (a packed group reaching its width, or a signed sum whose magnitude reaches
/// half the modulus) is not an error: the encodings wrap silently.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Division or reduction by zero, or by a modulus that is not positive.
    #[error("arithmetic domain error: {0}")]
    ArithmeticDomain(&'static str),
    /// The requested modular inverse does not exist because the operands share a factor.
    #[error("no modular inverse exists")]
    NoInverseExists,
    /// An input ciphertext does not lie in `[0, n^2)`. `index` is its zero-based position in the
    /// input sequence.
    #[error("ciphertext #{index} is not an element of [0, n^2)")]
    CiphertextOutOfRange {
        /// Position of the offending ciphertext.
        index: usize,
    },
    /// Key fields that are non-positive or inconsistent with each other.
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(&'static str),
    /// An encoding scheme that cannot decode anything.
    #[error("invalid encoding scheme: {0}")]
    InvalidEncoding(&'static str),
    /// A string that is not an integer in the requested radix.
    #[error("cannot parse {input:?} as an integer")]
    Parse {
        /// The rejected input.
        input: String,
    },
}

/// Result type used throughout ciphertally.
pub type Result<T> = std::result::Result<T, Error>;
