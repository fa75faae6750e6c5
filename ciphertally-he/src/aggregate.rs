//! Homomorphic aggregation of encrypted ballots.
//!
//! Multiplying Paillier ciphertexts modulo $n^2$ adds their plaintexts modulo $n$, so the
//! aggregate of all ballots decrypts to the sum of all votes while no individual ballot is ever
//! decrypted.

use std::borrow::Borrow;

use ciphertally_traits::homomorphic::HomomorphicAddition;
use ciphertally_traits::{Error, Result};
use rayon::prelude::*;
use serde::Serialize;

use crate::cryptosystems::paillier::{PaillierCiphertext, PaillierPK};

/// The product of a number of ciphertexts, together with how many went into it.
#[derive(PartialEq, Eq, Debug, Clone, Serialize)]
pub struct AggregateCiphertext {
    /// The combined ciphertext.
    pub ciphertext: PaillierCiphertext,
    /// The number of ciphertexts that were combined.
    pub count: usize,
}

/// Folds ciphertexts into a running aggregate one at a time.
pub struct Aggregator<'pk> {
    public_key: &'pk PaillierPK,
    accumulator: PaillierCiphertext,
    count: usize,
}

impl<'pk> Aggregator<'pk> {
    /// Starts from the identity ciphertext, which decrypts to 0.
    pub fn new(public_key: &'pk PaillierPK) -> Self {
        Aggregator {
            public_key,
            accumulator: public_key.identity(),
            count: 0,
        }
    }

    /// Adds one ciphertext to the aggregate. A ciphertext outside $[0, n^2)$ is rejected with
    /// [`Error::CiphertextOutOfRange`] carrying its position, and leaves the aggregate untouched.
    pub fn absorb(&mut self, ciphertext: &PaillierCiphertext) -> Result<()> {
        if !self.public_key.contains(ciphertext) {
            return Err(Error::CiphertextOutOfRange { index: self.count });
        }

        self.accumulator = self.public_key.add(&self.accumulator, ciphertext);
        self.count += 1;
        Ok(())
    }

    /// The number of ciphertexts absorbed so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the aggregate.
    pub fn finish(self) -> AggregateCiphertext {
        AggregateCiphertext {
            ciphertext: self.accumulator,
            count: self.count,
        }
    }
}

/// Aggregates a sequence of ciphertexts from left to right. The first out-of-range ciphertext
/// aborts the whole aggregation, since skipping it would silently drop a vote.
pub fn aggregate<I>(public_key: &PaillierPK, ciphertexts: I) -> Result<AggregateCiphertext>
where
    I: IntoIterator,
    I::Item: Borrow<PaillierCiphertext>,
{
    let mut aggregator = Aggregator::new(public_key);

    for ciphertext in ciphertexts {
        aggregator.absorb(ciphertext.borrow())?;
    }

    Ok(aggregator.finish())
}

/// Aggregates a slice of ciphertexts on the rayon thread pool. The result equals
/// [`aggregate`] on the same input, including which ciphertext is reported when several are
/// out of range.
pub fn aggregate_parallel(
    public_key: &PaillierPK,
    ciphertexts: &[PaillierCiphertext],
) -> Result<AggregateCiphertext> {
    if let Some(index) = ciphertexts
        .par_iter()
        .position_first(|ciphertext| !public_key.contains(ciphertext))
    {
        return Err(Error::CiphertextOutOfRange { index });
    }

    let ciphertext = ciphertexts
        .par_iter()
        .fold(
            || public_key.identity(),
            |accumulator, ciphertext| public_key.add(&accumulator, ciphertext),
        )
        .reduce(
            || public_key.identity(),
            |left, right| public_key.add(&left, &right),
        );

    Ok(AggregateCiphertext {
        ciphertext,
        count: ciphertexts.len(),
    })
}

#[cfg(test)]
mod tests {
    use ciphertally_bigint::BigInteger;
    use ciphertally_traits::cryptosystems::{DecryptionKey, EncryptionKey};
    use ciphertally_traits::randomness::GeneralRng;
    use ciphertally_traits::Error;
    use proptest::prelude::*;
    use rand::rngs::OsRng;

    use crate::aggregate::{aggregate, aggregate_parallel, Aggregator};
    use crate::cryptosystems::paillier::{PaillierCiphertext, PaillierPK, PaillierSK};

    fn toy_keys() -> (PaillierPK, PaillierSK) {
        let pk = PaillierPK::new(BigInteger::from(187u64), BigInteger::from(188u64)).unwrap();
        let sk = PaillierSK::new(BigInteger::from(80u64), BigInteger::from(180u64)).unwrap();
        (pk, sk)
    }

    fn ciphertext(c: u64) -> PaillierCiphertext {
        PaillierCiphertext {
            c: BigInteger::from(c),
        }
    }

    #[test]
    fn test_empty_is_identity() {
        let (pk, sk) = toy_keys();

        let aggregate = aggregate(&pk, Vec::<PaillierCiphertext>::new()).unwrap();

        assert_eq!(ciphertext(1), aggregate.ciphertext);
        assert_eq!(0, aggregate.count);
        assert_eq!(
            BigInteger::zero(),
            sk.decrypt_raw(&pk, &aggregate.ciphertext).unwrap()
        );
    }

    #[test]
    fn test_aggregate_known_votes() {
        let (pk, sk) = toy_keys();
        let ballots = [ciphertext(9698), ciphertext(7219), ciphertext(2360)];

        let aggregate = aggregate(&pk, &ballots).unwrap();

        assert_eq!(ciphertext(29639), aggregate.ciphertext);
        assert_eq!(3, aggregate.count);
        assert_eq!(
            BigInteger::one(),
            sk.decrypt_raw(&pk, &aggregate.ciphertext).unwrap()
        );
    }

    #[test]
    fn test_homomorphism() {
        let mut rng = GeneralRng::new(OsRng);
        let (pk, sk) = toy_keys();

        let c1 = pk.encrypt_raw(&BigInteger::from(120u64), &mut rng).unwrap();
        let c2 = pk.encrypt_raw(&BigInteger::from(100u64), &mut rng).unwrap();

        let aggregate = aggregate(&pk, vec![c1, c2]).unwrap();

        assert_eq!(
            BigInteger::from(33u64),
            sk.decrypt_raw(&pk, &aggregate.ciphertext).unwrap()
        );
    }

    #[test]
    fn test_nested_aggregation() {
        let (pk, _) = toy_keys();
        let (c1, c2, c3) = (ciphertext(9698), ciphertext(7219), ciphertext(2360));

        let inner = aggregate(&pk, &[c1.clone(), c2.clone()]).unwrap();
        let nested = aggregate(&pk, &[inner.ciphertext, c3.clone()]).unwrap();
        let flat = aggregate(&pk, &[c3, c1, c2]).unwrap();

        assert_eq!(flat.ciphertext, nested.ciphertext);
    }

    #[test]
    fn test_out_of_range_aborts() {
        let (pk, _) = toy_keys();
        let ballots = [ciphertext(9698), ciphertext(34969), ciphertext(2360)];

        assert_eq!(
            Err(Error::CiphertextOutOfRange { index: 1 }),
            aggregate(&pk, &ballots)
        );
    }

    #[test]
    fn test_negative_ciphertext_rejected() {
        let (pk, _) = toy_keys();
        let mut aggregator = Aggregator::new(&pk);

        let negative = PaillierCiphertext {
            c: BigInteger::from(-5i64),
        };

        assert_eq!(
            Err(Error::CiphertextOutOfRange { index: 0 }),
            aggregator.absorb(&negative)
        );
        assert_eq!(0, aggregator.count());
    }

    #[test]
    fn test_parallel_reports_first_offender() {
        let (pk, _) = toy_keys();
        let mut ballots = vec![ciphertext(9698); 1000];
        ballots[700] = ciphertext(40000);
        ballots[300] = ciphertext(34969);

        assert_eq!(
            Err(Error::CiphertextOutOfRange { index: 300 }),
            aggregate_parallel(&pk, &ballots)
        );
    }

    proptest! {
        #[test]
        fn prop_parallel_matches_sequential(raw in prop::collection::vec(0u64..34969, 0..200)) {
            let (pk, _) = toy_keys();
            let ballots: Vec<PaillierCiphertext> = raw.into_iter().map(ciphertext).collect();

            let sequential = aggregate(&pk, &ballots).unwrap();
            let parallel = aggregate_parallel(&pk, &ballots).unwrap();

            prop_assert_eq!(sequential, parallel);
        }

        #[test]
        fn prop_order_irrelevant(raw in prop::collection::vec(0u64..34969, 0..50)) {
            let (pk, _) = toy_keys();
            let ballots: Vec<PaillierCiphertext> = raw.into_iter().map(ciphertext).collect();
            let reversed: Vec<PaillierCiphertext> = ballots.iter().rev().cloned().collect();

            prop_assert_eq!(aggregate(&pk, &ballots), aggregate(&pk, &reversed));
        }
    }
}
