use ciphertally_bigint::{BigInteger, Modulus};
use ciphertally_traits::{Error, Result};

/// Extended Euclidean algorithm. Returns $(g, s, t)$ such that $g = \gcd(a, b) = s a + t b$.
///
/// The loop keeps two rows of the remainder sequence and runs in $O(\log \min(a, b))$
/// iterations. Both inputs must be non-negative.
pub fn extended_gcd(a: &BigInteger, b: &BigInteger) -> (BigInteger, BigInteger, BigInteger) {
    debug_assert!(!a.is_negative() && !b.is_negative());

    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_s, mut s) = (BigInteger::one(), BigInteger::zero());
    let (mut old_t, mut t) = (BigInteger::zero(), BigInteger::one());

    while !r.is_zero() {
        let (quotient, remainder) = match old_r.div_rem_floor(&r) {
            Ok(qr) => qr,
            Err(_) => unreachable!("the divisor is checked to be non-zero"),
        };

        old_r = std::mem::replace(&mut r, remainder);

        let next_s = &old_s - &(&quotient * &s);
        old_s = std::mem::replace(&mut s, next_s);

        let next_t = &old_t - &(&quotient * &t);
        old_t = std::mem::replace(&mut t, next_t);
    }

    (old_r, old_s, old_t)
}

/// Computes the unique $x \in [0, m)$ such that $a x \equiv 1 \pmod m$. Fails with
/// [`Error::NoInverseExists`] when $\gcd(a, m) \neq 1$. Negative `a` is reduced first.
pub fn mod_inverse(a: &BigInteger, modulus: &Modulus) -> Result<BigInteger> {
    let a = modulus.reduce(a);
    let (gcd, s, _) = extended_gcd(&a, modulus.value());

    // gcd(0, 1) = 1 as well, and 0 is then the only residue
    if gcd != 1u64 {
        return Err(Error::NoInverseExists);
    }

    Ok(modulus.reduce(&s))
}

#[cfg(test)]
mod tests {
    use ciphertally_bigint::{BigInteger, Modulus};
    use ciphertally_traits::Error;
    use proptest::prelude::*;

    use crate::modular::{extended_gcd, mod_inverse};

    fn modulus(m: u64) -> Modulus {
        Modulus::new(BigInteger::from(m)).unwrap()
    }

    #[test]
    fn gcd_extended_small() {
        let x = BigInteger::from(693u64);
        let y = BigInteger::from(609u64);

        let (v, a, b) = extended_gcd(&x, &y);

        assert_eq!(BigInteger::from(21u64), v);
        assert_eq!(BigInteger::from(-7i64), a);
        assert_eq!(BigInteger::from(8u64), b);
    }

    #[test]
    fn gcd_extended_zero() {
        let (v, a, b) = extended_gcd(&BigInteger::zero(), &BigInteger::from(5u64));

        assert_eq!(BigInteger::from(5u64), v);
        assert_eq!(BigInteger::zero(), a);
        assert_eq!(BigInteger::one(), b);
    }

    #[test]
    fn test_invert_small() {
        let res = mod_inverse(&BigInteger::from(3u64), &modulus(13));

        assert_eq!(Ok(BigInteger::from(9u64)), res);
    }

    #[test]
    fn test_invert_negative() {
        let res = mod_inverse(&BigInteger::from(-3i64), &modulus(17));

        assert_eq!(Ok(BigInteger::from(11u64)), res);
    }

    #[test]
    fn test_invert_lambda() {
        let res = mod_inverse(&BigInteger::from(89006u64), &modulus(178861));

        assert_eq!(Ok(BigInteger::from(131249u64)), res);
    }

    #[test]
    fn test_invert() {
        let a: BigInteger = "5892358416859326896589748197812740739507917092740973905700591759793209771117197329023975932757523759072735959723097537209079532975039297099714397901428947253853027537265853823285397084380934928703270590758520818187287349487329243789243783249743289423789918417987091287932757258397104397295856325791091077".parse().unwrap();
        let m: BigInteger = "149600854933825512159828331527177109689118555212385170831387365804008437367913613643959968668965614270559113472851544758183282789643129469226548555150464780229538086590498853718102052468519876788192865092229749643546710793464305243815836267024770081889047200172952438000587807986096107675012284269101785114471".parse().unwrap();

        let res = mod_inverse(&a, &Modulus::new(m).unwrap());

        let expected: BigInteger = "123739905086158212270843051527441649600807330749471895683394889028867514801710371562360352272055594352035190616471030275978939424413601977497555131069474726813170115491482106601865630839838144362329125370518957163898801175903502017426241817312333816497160685389024867847545777202327273987093691380956370608950".parse().unwrap();
        assert_eq!(Ok(expected), res);
    }

    #[test]
    fn test_no_inverse_small() {
        let res = mod_inverse(&BigInteger::from(14u64), &modulus(49));

        assert_eq!(Err(Error::NoInverseExists), res);
    }

    #[test]
    fn test_no_inverse_of_zero() {
        let res = mod_inverse(&BigInteger::zero(), &modulus(187));

        assert_eq!(Err(Error::NoInverseExists), res);
    }

    proptest! {
        #[test]
        fn prop_bezout_identity(x in 0u64..1_000_000_000, y in 0u64..1_000_000_000) {
            let (x, y) = (BigInteger::from(x), BigInteger::from(y));

            let (v, a, b) = extended_gcd(&x, &y);

            prop_assert_eq!(&v, &x.gcd(&y));
            prop_assert_eq!(v, &(&a * &x) + &(&b * &y));
        }

        #[test]
        fn prop_inverse_or_no_inverse(a in any::<i64>(), m in 2u64..1_000_000_000) {
            let modulus = modulus(m);
            let a = BigInteger::from(a);

            match mod_inverse(&a, &modulus) {
                Ok(x) => {
                    prop_assert!(modulus.contains(&x));
                    prop_assert_eq!(BigInteger::one(), modulus.mul(&a, &x));
                }
                Err(error) => {
                    prop_assert_eq!(Error::NoInverseExists, error);
                    prop_assert!(a.gcd(modulus.value()) != 1u64);
                }
            }
        }
    }
}
