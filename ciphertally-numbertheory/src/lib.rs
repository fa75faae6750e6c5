#![warn(missing_docs, unused_imports)]

//! _This is a part of **ciphertally**. For more information, head to the
//! [ciphertally](https://crates.io/crates/ciphertally) crate homepage._
//!
//! Number theoretic algorithms on [`BigInteger`]s: greatest common divisors, modular inverses
//! and sampling of coprime integers.

mod modular;

pub use modular::{extended_gcd, mod_inverse};

use ciphertally_bigint::{BigInteger, Modulus};
use ciphertally_traits::randomness::{GeneralRng, SecureRng};

/// Generates a uniformly random coprime $x$ to the `other` integer $y$. This means that
/// $\gcd(x, y) = 1$ and $0 < x < y$. `other` must be larger than 1.
pub fn gen_coprime<R: SecureRng>(other: &Modulus, rng: &mut GeneralRng<R>) -> BigInteger {
    loop {
        let candidate = BigInteger::random_below(other, rng);

        if candidate.gcd(other.value()) == 1u64 {
            return candidate;
        }
    }
}
