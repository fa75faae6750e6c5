//! Encoding conventions that map vote counts into a single plaintext and back.
//!
//! A [`EncodingScheme::Signed`] election has two choices; voters encrypt $+1$ or $-1$ and the
//! sign of the decrypted sum names the winner. A [`EncodingScheme::Packed`] election gives every
//! choice its own base-`width` digit; a voter for choice $i$ encrypts $\mathrm{width}^i$.
//!
//! Both decodings wrap silently when their assumptions are violated: a signed sum with
//! $|s| \geq n/2$ comes back with the wrong sign, and a packed group that reaches `width` votes
//! wraps to zero and carries into the next group.

use std::cmp::Ordering;
use std::convert::TryFrom;

use ciphertally_bigint::{BigInteger, Modulus};
use ciphertally_traits::{Error, Result};
use serde::{Deserialize, Serialize};

/// How a plaintext encodes the votes. Chosen by the operator before decoding; it is never
/// inferred from the data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "lowercase")]
pub enum EncodingScheme {
    /// Two choices. Votes are $+1$ for `positive` and $-1$ for `negative`.
    Signed {
        /// Label of the choice that wins when the sum is positive.
        positive: String,
        /// Label of the choice that wins when the sum is negative.
        negative: String,
    },
    /// One base-`width` digit per choice, least significant first.
    Packed {
        /// The digit width; every group holds at most `width - 1` votes.
        width: u64,
        /// One label per group, the first label belonging to the least significant digit.
        labels: Vec<String>,
    },
}

/// The choice expressed by a single ballot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ballot {
    /// A vote for the positive choice of a signed election.
    Positive,
    /// A vote for the negative choice of a signed election.
    Negative,
    /// A vote for the group with this index in a packed election.
    Group(usize),
}

/// The number of votes for one choice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VoteTally {
    /// The choice.
    pub label: String,
    /// Votes received.
    pub count: u64,
}

/// The result of a signed two-choice election.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Comparison {
    /// Votes for `positive` minus votes for `negative`.
    pub margin: BigInteger,
    /// Label of the positive choice.
    pub positive: String,
    /// Label of the negative choice.
    pub negative: String,
}

impl Comparison {
    /// The label of the leading choice, or `None` for a tie.
    pub fn leader(&self) -> Option<&str> {
        match self.margin.cmp(&BigInteger::zero()) {
            Ordering::Greater => Some(self.positive.as_str()),
            Ordering::Less => Some(self.negative.as_str()),
            Ordering::Equal => None,
        }
    }
}

/// The result of a packed election.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Ranking {
    /// One tally per group, most votes first. Equal counts keep their group order.
    pub tallies: Vec<VoteTally>,
    /// Whatever the plaintext holds above the declared groups. Zero unless a group overflowed
    /// into a digit that has no label.
    pub residue: BigInteger,
}

impl Ranking {
    /// Every tally that shares the highest count.
    pub fn leaders(&self) -> &[VoteTally] {
        let top = match self.tallies.first() {
            Some(tally) => tally.count,
            None => return &[],
        };

        let end = self
            .tallies
            .iter()
            .position(|tally| tally.count != top)
            .unwrap_or(self.tallies.len());

        &self.tallies[..end]
    }
}

/// A decoded plaintext.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Decoded with [`EncodingScheme::Signed`].
    Comparison(Comparison),
    /// Decoded with [`EncodingScheme::Packed`].
    Ranking(Ranking),
}

impl EncodingScheme {
    /// A signed two-choice scheme.
    pub fn signed<P: Into<String>, N: Into<String>>(positive: P, negative: N) -> EncodingScheme {
        EncodingScheme::Signed {
            positive: positive.into(),
            negative: negative.into(),
        }
    }

    /// A packed scheme with `groups` groups labelled `group0`, `group1`, ...
    pub fn packed(width: u64, groups: usize) -> EncodingScheme {
        EncodingScheme::Packed {
            width,
            labels: (0..groups).map(|i| format!("group{}", i)).collect(),
        }
    }

    /// Checks that the scheme can decode at all: a packed scheme needs `width >= 2` and at
    /// least one group.
    pub fn validate(&self) -> Result<()> {
        match self {
            EncodingScheme::Signed { .. } => Ok(()),
            EncodingScheme::Packed { width, labels } => {
                if *width < 2 {
                    return Err(Error::InvalidEncoding("width must be at least 2"));
                }
                if labels.is_empty() {
                    return Err(Error::InvalidEncoding("at least one group is required"));
                }
                Ok(())
            }
        }
    }

    /// The plaintext a voter encrypts to cast `ballot`.
    pub fn ballot(&self, ballot: Ballot) -> Result<BigInteger> {
        self.validate()?;

        match (self, ballot) {
            (EncodingScheme::Signed { .. }, Ballot::Positive) => Ok(BigInteger::one()),
            (EncodingScheme::Signed { .. }, Ballot::Negative) => Ok(BigInteger::from(-1i64)),
            (EncodingScheme::Packed { width, labels }, Ballot::Group(index)) => {
                if index >= labels.len() {
                    return Err(Error::InvalidEncoding("group index out of range"));
                }
                let exponent = u32::try_from(index)
                    .map_err(|_| Error::InvalidEncoding("group index out of range"))?;
                Ok(BigInteger::from(*width).pow(exponent))
            }
            _ => Err(Error::InvalidEncoding(
                "ballot does not match the encoding scheme",
            )),
        }
    }

    /// Decodes an aggregate plaintext in $[0, n)$.
    pub fn decode(&self, plaintext: &BigInteger, n: &Modulus) -> Result<Outcome> {
        self.validate()?;

        if !n.contains(plaintext) {
            return Err(Error::ArithmeticDomain("plaintext is not reduced modulo n"));
        }

        match self {
            EncodingScheme::Signed { positive, negative } => Ok(Outcome::Comparison(Comparison {
                margin: decode_signed(plaintext, n),
                positive: positive.clone(),
                negative: negative.clone(),
            })),
            EncodingScheme::Packed { width, labels } => {
                let (counts, residue) = decode_packed(plaintext, *width, labels.len())?;

                let mut tallies: Vec<VoteTally> = labels
                    .iter()
                    .zip(counts)
                    .map(|(label, count)| VoteTally {
                        label: label.clone(),
                        count,
                    })
                    .collect();
                // `sort_by` is stable, so ties keep their group order
                tallies.sort_by(|a, b| b.count.cmp(&a.count));

                Ok(Outcome::Ranking(Ranking { tallies, residue }))
            }
        }
    }
}

/// Folds the upper half of $[0, n)$ onto the negative numbers: values with $2p > n$ become
/// $p - n$.
pub fn decode_signed(plaintext: &BigInteger, n: &Modulus) -> BigInteger {
    let doubled = plaintext + plaintext;

    if &doubled > n.value() {
        plaintext - n.value()
    } else {
        plaintext.clone()
    }
}

/// Splits `plaintext` into `groups` base-`width` digits, least significant first, and returns
/// them with the remaining high-order value.
pub fn decode_packed(
    plaintext: &BigInteger,
    width: u64,
    groups: usize,
) -> Result<(Vec<u64>, BigInteger)> {
    let divisor = BigInteger::from(width);
    let mut rest = plaintext.clone();
    let mut counts = Vec::with_capacity(groups);

    for _ in 0..groups {
        let (quotient, digit) = rest.div_rem_floor(&divisor)?;
        counts.push(
            digit
                .to_u64()
                .ok_or(Error::ArithmeticDomain("digit does not fit in 64 bits"))?,
        );
        rest = quotient;
    }

    Ok((counts, rest))
}
