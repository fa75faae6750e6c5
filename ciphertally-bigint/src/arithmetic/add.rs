use std::{
    iter::Sum,
    ops::{Add, AddAssign},
};

use crate::BigInteger;

impl AddAssign<&BigInteger> for BigInteger {
    fn add_assign(&mut self, rhs: &Self) {
        self.value += &rhs.value;
    }
}

impl AddAssign<u64> for BigInteger {
    fn add_assign(&mut self, rhs: u64) {
        self.value += rhs;
    }
}

impl Add<&BigInteger> for BigInteger {
    type Output = BigInteger;

    fn add(mut self, rhs: &Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl Add<&BigInteger> for &BigInteger {
    type Output = BigInteger;

    fn add(self, rhs: &BigInteger) -> Self::Output {
        self.clone() + rhs
    }
}

impl Add<u64> for BigInteger {
    type Output = BigInteger;

    fn add(mut self, rhs: u64) -> Self::Output {
        self += rhs;
        self
    }
}

impl<'a> Sum<&'a BigInteger> for BigInteger {
    fn sum<I: Iterator<Item = &'a BigInteger>>(iter: I) -> Self {
        iter.fold(BigInteger::zero(), |sum, x| sum + x)
    }
}
