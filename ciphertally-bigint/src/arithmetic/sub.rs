use std::ops::{Neg, Sub, SubAssign};

use crate::BigInteger;

impl SubAssign<&BigInteger> for BigInteger {
    fn sub_assign(&mut self, rhs: &Self) {
        self.value -= &rhs.value;
    }
}

impl SubAssign<u64> for BigInteger {
    fn sub_assign(&mut self, rhs: u64) {
        self.value -= rhs;
    }
}

impl Sub<&BigInteger> for BigInteger {
    type Output = BigInteger;

    fn sub(mut self, rhs: &Self) -> Self::Output {
        self -= rhs;
        self
    }
}

impl Sub<&BigInteger> for &BigInteger {
    type Output = BigInteger;

    fn sub(self, rhs: &BigInteger) -> Self::Output {
        self.clone() - rhs
    }
}

impl Sub<u64> for BigInteger {
    type Output = BigInteger;

    fn sub(mut self, rhs: u64) -> Self::Output {
        self -= rhs;
        self
    }
}

impl Neg for BigInteger {
    type Output = BigInteger;

    fn neg(self) -> Self::Output {
        BigInteger { value: -self.value }
    }
}

#[cfg(test)]
mod tests {
    use crate::BigInteger;

    #[test]
    fn test_subtraction_below_zero() {
        let x = BigInteger::from(7u64);
        let y = BigInteger::from(17u64);

        assert_eq!(BigInteger::from(-10i64), &x - &y);
    }

    #[test]
    fn test_negate() {
        assert_eq!(BigInteger::from(-3i64), -BigInteger::from(3u64));
    }
}
