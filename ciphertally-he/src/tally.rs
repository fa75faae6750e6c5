//! A complete tally run: aggregate, decrypt once, decode.
//!
//! The stages are types. [`TallyRun::aggregate`] consumes the idle run and yields an
//! [`Aggregated`] run, [`Aggregated::decrypt`] yields a [`Decrypted`] run and
//! [`Decrypted::decode`] yields the final [`TallyReport`]. Each step consumes its predecessor,
//! so a run moves strictly forward and can be neither repeated nor re-entered.

use std::borrow::Borrow;

use ciphertally_bigint::BigInteger;
use ciphertally_traits::cryptosystems::DecryptionKey;
use ciphertally_traits::Result;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::aggregate::{aggregate, aggregate_parallel, AggregateCiphertext};
use crate::cryptosystems::paillier::{PaillierCiphertext, PaillierPK, PaillierSK};
use crate::encoding::{EncodingScheme, Outcome};

/// Everything a finished run hands to the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TallyReport {
    /// The aggregate ciphertext, kept for audit.
    pub aggregate: PaillierCiphertext,
    /// How many ciphertexts went into the aggregate.
    pub ciphertext_count: usize,
    /// The decrypted aggregate.
    pub plaintext: BigInteger,
    /// The decoded votes.
    pub outcome: Outcome,
}

/// A run that has not seen any ciphertexts yet.
pub struct TallyRun<'k> {
    public_key: &'k PaillierPK,
    secret_key: &'k PaillierSK,
    scheme: &'k EncodingScheme,
}

/// A run whose ciphertexts have been combined.
pub struct Aggregated<'k> {
    run: TallyRun<'k>,
    aggregate: AggregateCiphertext,
}

/// A run whose aggregate has been decrypted.
pub struct Decrypted<'k> {
    run: TallyRun<'k>,
    aggregate: AggregateCiphertext,
    plaintext: BigInteger,
}

impl<'k> TallyRun<'k> {
    /// Prepares a run. Fails early when the encoding scheme cannot decode anything.
    pub fn new(
        public_key: &'k PaillierPK,
        secret_key: &'k PaillierSK,
        scheme: &'k EncodingScheme,
    ) -> Result<Self> {
        scheme.validate()?;

        Ok(TallyRun {
            public_key,
            secret_key,
            scheme,
        })
    }

    /// Combines all ciphertexts into one.
    pub fn aggregate<I>(self, ciphertexts: I) -> Result<Aggregated<'k>>
    where
        I: IntoIterator,
        I::Item: Borrow<PaillierCiphertext>,
    {
        debug!("aggregating ciphertexts");
        let aggregate = aggregate(self.public_key, ciphertexts)?;
        Ok(self.aggregated(aggregate))
    }

    /// Combines all ciphertexts into one on the rayon thread pool.
    pub fn aggregate_parallel(self, ciphertexts: &[PaillierCiphertext]) -> Result<Aggregated<'k>> {
        debug!(count = ciphertexts.len(), "aggregating ciphertexts in parallel");
        let aggregate = aggregate_parallel(self.public_key, ciphertexts)?;
        Ok(self.aggregated(aggregate))
    }

    fn aggregated(self, aggregate: AggregateCiphertext) -> Aggregated<'k> {
        info!(
            count = aggregate.count,
            aggregate = %aggregate.ciphertext,
            "combined ciphertexts"
        );

        Aggregated {
            run: self,
            aggregate,
        }
    }
}

impl<'k> Aggregated<'k> {
    /// The aggregate ciphertext.
    pub fn aggregate(&self) -> &AggregateCiphertext {
        &self.aggregate
    }

    /// Decrypts the aggregate. This is the only decryption in the whole run.
    pub fn decrypt(self) -> Result<Decrypted<'k>> {
        debug!("decrypting aggregate");
        let plaintext = self
            .run
            .secret_key
            .decrypt_raw(self.run.public_key, &self.aggregate.ciphertext)?;

        Ok(Decrypted {
            run: self.run,
            aggregate: self.aggregate,
            plaintext,
        })
    }
}

impl<'k> Decrypted<'k> {
    /// The decrypted aggregate.
    pub fn plaintext(&self) -> &BigInteger {
        &self.plaintext
    }

    /// Decodes the plaintext and finishes the run.
    pub fn decode(self) -> Result<TallyReport> {
        debug!("decoding plaintext");
        let outcome = self.run.scheme.decode(&self.plaintext, self.run.public_key.n())?;

        if let Outcome::Ranking(ranking) = &outcome {
            if !ranking.residue.is_zero() {
                warn!(
                    residue = %ranking.residue,
                    "plaintext holds votes above the declared groups"
                );
            }
        }

        debug!("tally done");
        Ok(TallyReport {
            aggregate: self.aggregate.ciphertext,
            ciphertext_count: self.aggregate.count,
            plaintext: self.plaintext,
            outcome,
        })
    }
}

/// Runs every stage of a tally in order.
pub fn tally<I>(
    public_key: &PaillierPK,
    secret_key: &PaillierSK,
    scheme: &EncodingScheme,
    ciphertexts: I,
) -> Result<TallyReport>
where
    I: IntoIterator,
    I::Item: Borrow<PaillierCiphertext>,
{
    TallyRun::new(public_key, secret_key, scheme)?
        .aggregate(ciphertexts)?
        .decrypt()?
        .decode()
}
