//! Reading ciphertexts from a vote store, one decimal integer per line.

use std::io::BufRead;

use anyhow::{bail, Context, Result};
use ciphertally_he::cryptosystems::paillier::PaillierCiphertext;
use tracing::{debug, warn};

/// The ciphertexts of one input, with the line each one came from.
#[derive(Debug, Default)]
pub struct Records {
    pub ciphertexts: Vec<PaillierCiphertext>,
    pub lines: Vec<usize>,
    pub skipped: usize,
}

impl Records {
    /// The 1-based line number of the ciphertext at `index`.
    pub fn line_of(&self, index: usize) -> Option<usize> {
        self.lines.get(index).copied()
    }
}

/// Reads every record from `reader`. Blank lines and lines starting with `#` are ignored.
/// A line that is not a decimal integer is skipped with a warning, or fails the read when
/// `strict` is set.
pub fn read_records<R: BufRead>(reader: R, strict: bool) -> Result<Records> {
    let mut records = Records::default();

    for (index, line) in reader.lines().enumerate() {
        let number = index + 1;
        let line = line.with_context(|| format!("read line {}", number))?;
        let record = line.trim();

        if record.is_empty() || record.starts_with('#') {
            continue;
        }

        match record.parse::<PaillierCiphertext>() {
            Ok(ciphertext) => {
                records.ciphertexts.push(ciphertext);
                records.lines.push(number);
            }
            Err(error) if strict => bail!("line {}: {}", number, error),
            Err(error) => {
                warn!(line = number, %error, "skipping malformed record");
                records.skipped += 1;
            }
        }
    }

    debug!(
        count = records.ciphertexts.len(),
        skipped = records.skipped,
        "read records"
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use ciphertally_bigint::BigInteger;

    use crate::input::read_records;

    const INPUT: &str = "# ski trip\n9698\n\n  7219  \nnot a number\n2360\n";

    #[test]
    fn test_skips_blank_comment_and_malformed() {
        let records = read_records(Cursor::new(INPUT), false).unwrap();

        let values: Vec<BigInteger> = records.ciphertexts.iter().map(|c| c.c.clone()).collect();
        assert_eq!(
            vec![
                BigInteger::from(9698u64),
                BigInteger::from(7219u64),
                BigInteger::from(2360u64)
            ],
            values
        );
        assert_eq!(vec![2, 4, 6], records.lines);
        assert_eq!(1, records.skipped);
        assert_eq!(Some(4), records.line_of(1));
        assert_eq!(None, records.line_of(3));
    }

    #[test]
    fn test_strict_rejects_malformed() {
        let error = read_records(Cursor::new(INPUT), true).unwrap_err();
        assert!(error.to_string().starts_with("line 5"));
    }

    #[test]
    fn test_merged_or_separated_digits_are_malformed() {
        let input = "9698 7219\n96_98\n0x10\n2360\n";

        let records = read_records(Cursor::new(input), false).unwrap();
        assert_eq!(vec![4], records.lines);
        assert_eq!(3, records.skipped);

        let error = read_records(Cursor::new(input), true).unwrap_err();
        assert!(error.to_string().starts_with("line 1"));
    }

    #[test]
    fn test_empty_input() {
        let records = read_records(Cursor::new(""), true).unwrap();

        assert!(records.ciphertexts.is_empty());
        assert_eq!(0, records.skipped);
    }
}
