#![warn(missing_docs, unused_imports)]

//! _This is a part of **ciphertally**. For more information, head to the
//! [ciphertally](https://crates.io/crates/ciphertally) crate homepage._
//!
//! This crate implements a `BigInteger`, a thin wrapper around GMP's arbitrary-precision integers
//! (through `rug`). Every operation that can divide by zero is checked and reports
//! [`Error::ArithmeticDomain`] instead of aborting. Reductions go through a [`Modulus`], which
//! is known to be positive and therefore cannot fail.

mod arithmetic;
mod modular;

pub use modular::Modulus;

use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

use ciphertally_traits::randomness::{GeneralRng, SecureRng};
use ciphertally_traits::{Error, Result};
use rug::{ops::Pow, Integer};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A signed integer of arbitrary size. Serialized as a decimal string.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BigInteger {
    value: Integer,
}

impl BigInteger {
    /// Creates a BigInteger with value 0.
    pub fn zero() -> BigInteger {
        BigInteger {
            value: Integer::new(),
        }
    }

    /// Creates a BigInteger with value 1.
    pub fn one() -> BigInteger {
        BigInteger::from(1u64)
    }

    /// Returns true if self == 0.
    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Returns true if self < 0.
    pub fn is_negative(&self) -> bool {
        self.value < 0
    }

    /// Returns true if self > 0.
    pub fn is_positive(&self) -> bool {
        self.value > 0
    }

    /// Returns true if the least significant bit is set.
    pub fn is_odd(&self) -> bool {
        self.value.is_odd()
    }

    /// Converts to a `u64` if the value fits.
    pub fn to_u64(&self) -> Option<u64> {
        self.value.to_u64()
    }

    /// Converts to an `i64` if the value fits.
    pub fn to_i64(&self) -> Option<i64> {
        self.value.to_i64()
    }

    /// Computes self^2.
    pub fn square(&self) -> BigInteger {
        Integer::from(self.value.square_ref()).into()
    }

    /// Computes self^exponent without a modulus. Only meant for small exponents such as digit
    /// positions.
    pub fn pow(&self, exponent: u32) -> BigInteger {
        Integer::from((&self.value).pow(exponent)).into()
    }

    /// The greatest common divisor of the absolute values.
    pub fn gcd(&self, other: &BigInteger) -> BigInteger {
        Integer::from(self.value.gcd_ref(&other.value)).into()
    }

    /// Samples a uniformly random integer in `[0, limit)`. `limit` must be positive.
    pub fn random_below<R: SecureRng>(limit: &Modulus, rng: &mut GeneralRng<R>) -> BigInteger {
        Integer::from(limit.value().value.random_below_ref(&mut rng.rug_rng())).into()
    }

    /// Exposes the underlying `rug` integer.
    pub fn as_rug(&self) -> &Integer {
        &self.value
    }
}

impl From<Integer> for BigInteger {
    fn from(value: Integer) -> Self {
        BigInteger { value }
    }
}

impl From<BigInteger> for Integer {
    fn from(integer: BigInteger) -> Self {
        integer.value
    }
}

impl From<u64> for BigInteger {
    fn from(integer: u64) -> Self {
        BigInteger {
            value: Integer::from(integer),
        }
    }
}

impl From<i64> for BigInteger {
    fn from(integer: i64) -> Self {
        BigInteger {
            value: Integer::from(integer),
        }
    }
}

impl FromStr for BigInteger {
    type Err = Error;

    /// Parses an optional sign followed by decimal digits. Anything else, including inner
    /// whitespace, underscores and radix prefixes, fails with [`Error::Parse`].
    fn from_str(string: &str) -> Result<Self> {
        let digits = string.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(string);

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::Parse {
                input: string.to_string(),
            });
        }

        Integer::from_str_radix(string, 10)
            .map(BigInteger::from)
            .map_err(|_| Error::Parse {
                input: string.to_string(),
            })
    }
}

impl Serialize for BigInteger {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BigInteger {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let string = String::deserialize(deserializer)?;
        string.parse().map_err(de::Error::custom)
    }
}

impl PartialEq<u64> for BigInteger {
    fn eq(&self, other: &u64) -> bool {
        self.value == *other
    }
}

impl PartialEq<i64> for BigInteger {
    fn eq(&self, other: &i64) -> bool {
        self.value == *other
    }
}

impl Display for BigInteger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.value, f)
    }
}

impl Debug for BigInteger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BigInteger({})", self.value)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::hash_map::DefaultHasher,
        hash::{Hash, Hasher},
    };

    use ciphertally_traits::Error;

    use crate::BigInteger;

    #[test]
    fn test_hash_eq() {
        let a = BigInteger::from(123u64);
        let b = BigInteger::from(123u64);

        let mut hasher_a = DefaultHasher::new();
        a.hash(&mut hasher_a);

        let mut hasher_b = DefaultHasher::new();
        b.hash(&mut hasher_b);

        assert_eq!(hasher_a.finish(), hasher_b.finish())
    }

    #[test]
    fn test_hash_neq() {
        let a = BigInteger::from(123u64);
        let b = BigInteger::from(124u64);

        let mut hasher_a = DefaultHasher::new();
        a.hash(&mut hasher_a);

        let mut hasher_b = DefaultHasher::new();
        b.hash(&mut hasher_b);

        assert_ne!(hasher_a.finish(), hasher_b.finish())
    }

    #[test]
    fn test_parse_large() {
        let a: BigInteger = "150003578426137145424011230745217".parse().unwrap();

        assert_eq!("150003578426137145424011230745217", a.to_string());
        assert_eq!(None, a.to_u64());
    }

    #[test]
    fn test_parse_negative() {
        let a: BigInteger = "-42".parse().unwrap();

        assert!(a.is_negative());
        assert_eq!(Some(-42), a.to_i64());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(
            Err(Error::Parse {
                input: "12x4".to_string()
            }),
            "12x4".parse::<BigInteger>()
        );
    }

    #[test]
    fn test_parse_rejects_separators_and_prefixes() {
        for input in &["12 34", "1_0", "0x10", "", "-", "+", " 12", "1-2"] {
            assert_eq!(
                Err(Error::Parse {
                    input: input.to_string()
                }),
                input.parse::<BigInteger>()
            );
        }
    }

    #[test]
    fn test_parse_explicit_plus() {
        assert_eq!(BigInteger::from(17u64), "+17".parse::<BigInteger>().unwrap());
    }

    #[test]
    fn test_serde_decimal_string() {
        let a = BigInteger::from(6879340794005352575u64);

        let json = serde_json::to_string(&a).unwrap();
        assert_eq!("\"6879340794005352575\"", json);

        let back: BigInteger = serde_json::from_str(&json).unwrap();
        assert_eq!(a, back);
    }

    #[test]
    fn test_serde_rejects_malformed() {
        assert!(serde_json::from_str::<BigInteger>("\"12 34\"").is_err());
        assert!(serde_json::from_str::<BigInteger>("1234").is_err());
    }

    #[test]
    fn test_gcd() {
        let a = BigInteger::from(693u64);
        let b = BigInteger::from(609u64);

        assert_eq!(BigInteger::from(21u64), a.gcd(&b));
    }
}
