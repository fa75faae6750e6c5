//! `ciphertally`: tally Paillier-encrypted votes from the command line.

mod config;
mod input;
mod report;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use ciphertally_he::cryptosystems::paillier::{PaillierPK, PaillierSK};
use ciphertally_he::encoding::{Ballot, EncodingScheme};
use ciphertally_he::tally::{TallyReport, TallyRun};
use ciphertally_traits::cryptosystems::EncryptionKey;
use ciphertally_traits::randomness::GeneralRng;
use ciphertally_traits::Error;
use clap::{ArgAction, Parser, Subcommand};
use rand::rngs::OsRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::TallyConfig;
use crate::input::{read_records, Records};

#[derive(Debug, Parser)]
#[command(
    name = "ciphertally",
    about = "Tally votes encrypted under the Paillier cryptosystem",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log stage transitions (-v); RUST_LOG takes precedence
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Aggregate, decrypt and decode a file of ciphertexts
    Tally {
        /// Tally file with keys and encoding (TOML)
        #[arg(short = 'c', long = "config", value_name = "FILE")]
        config: PathBuf,

        /// Ciphertexts, one decimal integer per line
        #[arg(short = 'i', long = "input", value_name = "FILE")]
        input: PathBuf,

        /// Fail on malformed lines instead of skipping them
        #[arg(long = "strict", action = ArgAction::SetTrue)]
        strict: bool,

        /// Skip the consistency check of the private key
        #[arg(long = "no-verify", action = ArgAction::SetTrue)]
        no_verify: bool,

        /// Print the report as JSON
        #[arg(long = "json", action = ArgAction::SetTrue)]
        json: bool,
    },
    /// Check that mu is the inverse of L(g^lambda mod n^2) modulo n
    VerifyKey {
        /// Tally file with keys and encoding (TOML)
        #[arg(short = 'c', long = "config", value_name = "FILE")]
        config: PathBuf,
    },
    /// Encrypt a single ballot under the configured public key
    Encrypt {
        /// Tally file with at least the public key and encoding (TOML)
        #[arg(short = 'c', long = "config", value_name = "FILE")]
        config: PathBuf,

        /// `+` or `-` for a signed election; a group index or label for a packed one
        #[arg(long = "choice", allow_hyphen_values = true)]
        choice: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Command::Tally {
            config,
            input,
            strict,
            no_verify,
            json,
        } => tally(&config, &input, strict, !no_verify, json),
        Command::VerifyKey { config } => verify_key(&config),
        Command::Encrypt { config, choice } => encrypt(&config, &choice),
    }
}

fn init_tracing(verbose: u8) {
    let default = if verbose > 0 { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn tally(config: &Path, input: &Path, strict: bool, verify: bool, json: bool) -> Result<()> {
    let config = TallyConfig::load(config)?;
    let public_key = config.public_key()?;
    let secret_key = config.secret_key()?;

    if verify {
        secret_key
            .verify(&public_key)
            .context("the private key does not belong to the public key")?;
    }

    info!(path = %input.display(), "loading the votes");
    let file = File::open(input).with_context(|| format!("open {}", input.display()))?;
    let records = read_records(BufReader::new(file), strict)?;

    let report = run_tally(&public_key, &secret_key, &config.encoding, &records)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report::Rendered::new(&report, public_key.n()));
    }

    Ok(())
}

fn run_tally(
    public_key: &PaillierPK,
    secret_key: &PaillierSK,
    scheme: &EncodingScheme,
    records: &Records,
) -> Result<TallyReport> {
    Ok(TallyRun::new(public_key, secret_key, scheme)?
        .aggregate_parallel(&records.ciphertexts)
        .map_err(|error| locate(error, records))?
        .decrypt()?
        .decode()?)
}

/// Points an out-of-range error at the input line it came from.
fn locate(error: Error, records: &Records) -> anyhow::Error {
    match error {
        Error::CiphertextOutOfRange { index } => match records.line_of(index) {
            Some(line) => anyhow::Error::new(error).context(format!("input line {}", line)),
            None => error.into(),
        },
        other => other.into(),
    }
}

fn verify_key(config: &Path) -> Result<()> {
    let config = TallyConfig::load(config)?;
    let public_key = config.public_key()?;
    let secret_key = config.secret_key()?;

    secret_key.verify(&public_key)?;
    println!("The key material is consistent.");

    Ok(())
}

fn encrypt(config: &Path, choice: &str) -> Result<()> {
    let config = TallyConfig::load(config)?;
    let public_key = config.public_key()?;

    let ballot = parse_choice(choice, &config.encoding)?;
    let plaintext = config.encoding.ballot(ballot)?;

    let mut rng = GeneralRng::new(OsRng);
    let ciphertext = public_key.encrypt_raw(&plaintext, &mut rng)?;
    println!("{}", ciphertext);

    Ok(())
}

fn parse_choice(choice: &str, scheme: &EncodingScheme) -> Result<Ballot> {
    match scheme {
        EncodingScheme::Signed { positive, negative } => match choice {
            "+" => Ok(Ballot::Positive),
            "-" => Ok(Ballot::Negative),
            _ if choice == positive => Ok(Ballot::Positive),
            _ if choice == negative => Ok(Ballot::Negative),
            _ => Err(anyhow!(
                "choice must be `+`, `-`, {:?} or {:?}",
                positive,
                negative
            )),
        },
        EncodingScheme::Packed { labels, .. } => {
            if let Ok(index) = choice.parse::<usize>() {
                return Ok(Ballot::Group(index));
            }

            labels
                .iter()
                .position(|label| label == choice)
                .map(Ballot::Group)
                .ok_or_else(|| anyhow!("no group is labelled {:?}", choice))
        }
    }
}
