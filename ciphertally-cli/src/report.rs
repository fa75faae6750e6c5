//! Human-readable rendering of a finished tally.

use std::fmt::{self, Display, Formatter};

use ciphertally_bigint::Modulus;
use ciphertally_he::encoding::{Comparison, Outcome, Ranking, VoteTally};
use ciphertally_he::tally::TallyReport;

/// Displays a report the way the console shows it.
pub struct Rendered<'a> {
    report: &'a TallyReport,
    n: &'a Modulus,
}

impl<'a> Rendered<'a> {
    pub fn new(report: &'a TallyReport, n: &'a Modulus) -> Self {
        Rendered { report, n }
    }
}

impl Display for Rendered<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "The collective ciphertext of {} ballots is {}.",
            self.report.ciphertext_count, self.report.aggregate
        )?;
        writeln!(f, "Decrypted message: {}", self.report.plaintext)?;

        match &self.report.outcome {
            Outcome::Comparison(comparison) => write_comparison(f, comparison, self.n),
            Outcome::Ranking(ranking) => write_ranking(f, ranking),
        }
    }
}

fn write_comparison(f: &mut Formatter<'_>, comparison: &Comparison, n: &Modulus) -> fmt::Result {
    writeln!(
        f,
        "With negative values modulo {}, this result is equal to {}.",
        n, comparison.margin
    )?;

    match comparison.leader() {
        Some(label) => writeln!(f, "{} is the most popular choice.", label),
        None => writeln!(f, "It appears they are equally favourable. :-)"),
    }
}

fn write_ranking(f: &mut Formatter<'_>, ranking: &Ranking) -> fmt::Result {
    for VoteTally { label, count } in &ranking.tallies {
        writeln!(f, "{} has received {} votes.", label, count)?;
    }

    if !ranking.residue.is_zero() {
        writeln!(
            f,
            "Warning: {} is left above the last group, some group overflowed.",
            ranking.residue
        )?;
    }

    let leaders = ranking.leaders();
    match leaders {
        [] => Ok(()),
        [first, ..] if first.count == 0 => writeln!(f, "No votes were cast."),
        [only] => writeln!(
            f,
            "The most popular group is {} with {} votes.",
            only.label, only.count
        ),
        [first, ..] => {
            let labels: Vec<&str> = leaders.iter().map(|tally| tally.label.as_str()).collect();
            writeln!(
                f,
                "The most popular groups are {} with {} votes each.",
                labels.join(", "),
                first.count
            )
        }
    }
}
