use std::ops::{Mul, MulAssign};

use crate::BigInteger;

impl MulAssign<&BigInteger> for BigInteger {
    fn mul_assign(&mut self, rhs: &Self) {
        self.value *= &rhs.value;
    }
}

impl Mul<&BigInteger> for BigInteger {
    type Output = BigInteger;

    fn mul(mut self, rhs: &Self) -> Self::Output {
        self *= rhs;
        self
    }
}

impl Mul<&BigInteger> for &BigInteger {
    type Output = BigInteger;

    fn mul(self, rhs: &BigInteger) -> Self::Output {
        rug::Integer::from(&self.value * &rhs.value).into()
    }
}

#[cfg(test)]
mod tests {
    use crate::BigInteger;

    #[test]
    fn test_multiplication_exceeds_modulus_squared() {
        let n: BigInteger = "12247583461".parse().unwrap();
        let n_squared = n.square();

        let product = &n_squared * &n;

        assert_eq!("1837177943942357872725345201181", product.to_string());
    }

    #[test]
    fn test_multiplication_negative() {
        let x = BigInteger::from(-12i64);
        let y = BigInteger::from(11u64);

        assert_eq!(BigInteger::from(-132i64), &x * &y);
    }
}
