use ciphertally_traits::{Error, Result};

use crate::BigInteger;

impl BigInteger {
    /// Computes the quotient and remainder of `self / divisor`, rounding the quotient towards
    /// negative infinity. The remainder takes the sign of the divisor. Fails when `divisor` is
    /// zero.
    pub fn div_rem_floor(&self, divisor: &BigInteger) -> Result<(BigInteger, BigInteger)> {
        if divisor.is_zero() {
            return Err(Error::ArithmeticDomain("division by zero"));
        }

        let (quotient, remainder) = self.value.clone().div_rem_floor(divisor.value.clone());
        Ok((quotient.into(), remainder.into()))
    }

    /// Computes `self / divisor` rounded towards negative infinity. Fails when `divisor` is zero.
    pub fn div_floor(&self, divisor: &BigInteger) -> Result<BigInteger> {
        self.div_rem_floor(divisor).map(|(quotient, _)| quotient)
    }
}
