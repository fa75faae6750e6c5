use ciphertally_traits::Result;

use crate::{BigInteger, Modulus};

impl Modulus {
    /// Reduces `x` into `[0, modulus)`, also when `x` is negative.
    pub fn reduce(&self, x: &BigInteger) -> BigInteger {
        let mut remainder = rug::Integer::from(&x.value % &self.value.value);
        if remainder < 0 {
            remainder += &self.value.value;
        }

        remainder.into()
    }
}

impl BigInteger {
    /// Computes `self mod modulus` as an element of `[0, modulus)`. Fails with
    /// [`ciphertally_traits::Error::ArithmeticDomain`] when `modulus` is not positive.
    pub fn rem_euc(&self, modulus: &BigInteger) -> Result<BigInteger> {
        Ok(Modulus::new(modulus.clone())?.reduce(self))
    }
}
