#![warn(missing_docs, unused_imports)]

//! _This is a part of **ciphertally**. For more information, head to the
//! [ciphertally](https://crates.io/crates/ciphertally) crate homepage._
//!
//! General traits for additively homomorphic cryptosystems as they are used to tally encrypted
//! votes, together with the error type that every ciphertally crate reports.

/// Random number generation that is consistent with the dependencies' requirements.
pub mod randomness;

/// General notion of a cryptosystem
pub mod cryptosystems;

/// Homomorphic composition of ciphertexts
pub mod homomorphic;

mod error;

pub use error::{Error, Result};
