use crate::{BigInteger, Modulus};

impl Modulus {
    /// Computes `a * b mod modulus`.
    pub fn mul(&self, a: &BigInteger, b: &BigInteger) -> BigInteger {
        self.reduce(&(a * b))
    }
}

#[cfg(test)]
mod tests {
    use crate::{BigInteger, Modulus};

    #[test]
    fn test_mul_wraps() {
        let n_squared = Modulus::new(BigInteger::from(34969u64)).unwrap();

        let product = n_squared.mul(&BigInteger::from(9698u64), &BigInteger::from(7219u64));

        assert_eq!(BigInteger::from(1924u64), product);
    }
}
