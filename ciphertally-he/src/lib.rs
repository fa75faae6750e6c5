#![warn(missing_docs, unused_imports)]

//! _This is a part of **ciphertally**. For more information, head to the
//! [ciphertally](https://crates.io/crates/ciphertally) crate homepage._
//!
//! The Paillier cryptosystem together with everything needed to count encrypted votes:
//! aggregation of ciphertexts, a single decryption and decoding of the resulting plaintext.

/// Partially homomorphic cryptosystems with one key.
pub mod cryptosystems;

pub mod aggregate;
pub mod encoding;
pub mod tally;

pub use ciphertally_traits;
