use std::fmt::{Debug, Display};

use ciphertally_traits::{Error, Result};

use crate::BigInteger;

mod mul;
mod pow;
mod rem;

/// A positive modulus. Because it is checked once at construction, reducing by it can never
/// divide by zero.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Modulus {
    value: BigInteger,
}

impl Modulus {
    /// Wraps `value` as a modulus, failing with [`Error::ArithmeticDomain`] unless it is positive.
    pub fn new(value: BigInteger) -> Result<Modulus> {
        if !value.is_positive() {
            return Err(Error::ArithmeticDomain("modulus must be positive"));
        }

        Ok(Modulus { value })
    }

    /// The modulus as a plain integer.
    pub fn value(&self) -> &BigInteger {
        &self.value
    }

    /// Returns the modulus squared, which is again a valid modulus.
    pub fn square(&self) -> Modulus {
        Modulus {
            value: self.value.square(),
        }
    }

    /// Returns true if `x` is a canonical residue, i.e. it lies in `[0, modulus)`.
    pub fn contains(&self, x: &BigInteger) -> bool {
        !x.is_negative() && x < &self.value
    }
}

impl Display for Modulus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.value, f)
    }
}

impl Debug for Modulus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Modulus({})", self.value)
    }
}
