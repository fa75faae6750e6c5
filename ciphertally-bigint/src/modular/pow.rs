use ciphertally_traits::{Error, Result};
use rug::Integer;

use crate::{BigInteger, Modulus};

impl Modulus {
    /// Computes `base^exponent mod modulus` with GMP's windowed square-and-multiply, so the
    /// number of steps grows with the bit length of `exponent`. Fails when `exponent` is
    /// negative.
    pub fn pow(&self, base: &BigInteger, exponent: &BigInteger) -> Result<BigInteger> {
        if exponent.is_negative() {
            return Err(Error::ArithmeticDomain("negative exponent"));
        }

        // The side-channel resistant variant only supports odd moduli and positive exponents.
        if self.value.is_odd() && exponent.is_positive() {
            return Ok(Integer::from(
                base.value
                    .secure_pow_mod_ref(&exponent.value, &self.value.value),
            )
            .into());
        }

        match base.value.pow_mod_ref(&exponent.value, &self.value.value) {
            Some(power) => Ok(Integer::from(power).into()),
            None => Err(Error::ArithmeticDomain("negative exponent")),
        }
    }
}

impl BigInteger {
    /// Computes `self^exponent mod modulus`. Fails when `modulus` is not positive or `exponent`
    /// is negative.
    pub fn pow_mod(&self, exponent: &BigInteger, modulus: &BigInteger) -> Result<BigInteger> {
        Modulus::new(modulus.clone())?.pow(self, exponent)
    }
}
