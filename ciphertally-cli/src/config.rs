//! The tally file: key material and the encoding scheme of one election.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use ciphertally_bigint::BigInteger;
use ciphertally_he::cryptosystems::paillier::{PaillierPK, PaillierSK};
use ciphertally_he::encoding::EncodingScheme;
use serde::Deserialize;

/// Integers are decimal strings so keys of any size survive TOML.
#[derive(Debug, Deserialize)]
pub struct PublicKeyConfig {
    pub n: String,
    pub g: String,
}

#[derive(Debug, Deserialize)]
pub struct PrivateKeyConfig {
    pub lambda: String,
    pub mu: String,
}

#[derive(Debug, Deserialize)]
pub struct TallyConfig {
    pub public_key: PublicKeyConfig,
    /// Not needed to encrypt ballots.
    pub private_key: Option<PrivateKeyConfig>,
    pub encoding: EncodingScheme,
}

impl TallyConfig {
    pub fn load(path: &Path) -> Result<TallyConfig> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read tally file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parse tally file {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<TallyConfig> {
        let config: TallyConfig = toml::from_str(text)?;
        config.encoding.validate()?;
        Ok(config)
    }

    pub fn public_key(&self) -> Result<PaillierPK> {
        let n = parse_field("public_key.n", &self.public_key.n)?;
        let g = parse_field("public_key.g", &self.public_key.g)?;
        Ok(PaillierPK::new(n, g)?)
    }

    pub fn secret_key(&self) -> Result<PaillierSK> {
        let private_key = self
            .private_key
            .as_ref()
            .ok_or_else(|| anyhow!("the tally file has no [private_key] section"))?;

        let lambda = parse_field("private_key.lambda", &private_key.lambda)?;
        let mu = parse_field("private_key.mu", &private_key.mu)?;
        Ok(PaillierSK::new(lambda, mu)?)
    }
}

fn parse_field(name: &str, value: &str) -> Result<BigInteger> {
    value
        .trim()
        .parse()
        .with_context(|| format!("field {}", name))
}

#[cfg(test)]
mod tests {
    use ciphertally_bigint::BigInteger;
    use ciphertally_he::encoding::EncodingScheme;

    use crate::config::TallyConfig;

    const SKI: &str = r#"
[public_key]
n = "178861"
g = "178862"

[private_key]
lambda = "89006"
mu = "131249"

[encoding]
scheme = "signed"
positive = "Davos"
negative = "Arosa"
"#;

    #[test]
    fn test_signed_config() {
        let config = TallyConfig::from_toml(SKI).unwrap();

        let public_key = config.public_key().unwrap();
        let secret_key = config.secret_key().unwrap();

        assert_eq!(&BigInteger::from(178861u64), public_key.n().value());
        assert!(secret_key.verify(&public_key).is_ok());
        assert_eq!(EncodingScheme::signed("Davos", "Arosa"), config.encoding);
    }

    #[test]
    fn test_packed_config_without_private_key() {
        let config = TallyConfig::from_toml(
            r#"
[public_key]
n = "12247583461"
g = "12247583462"

[encoding]
scheme = "packed"
width = 100
labels = ["Group 3", "Group 4", "Group 5", "Group 6"]
"#,
        )
        .unwrap();

        assert!(config.public_key().is_ok());
        assert!(config.secret_key().is_err());
        assert_eq!(
            EncodingScheme::Packed {
                width: 100,
                labels: vec![
                    "Group 3".to_string(),
                    "Group 4".to_string(),
                    "Group 5".to_string(),
                    "Group 6".to_string()
                ]
            },
            config.encoding
        );
    }

    #[test]
    fn test_rejects_bad_integer() {
        let config = TallyConfig::from_toml(&SKI.replace("\"89006\"", "\"89oo6\"")).unwrap();
        assert!(config.secret_key().is_err());
    }

    #[test]
    fn test_rejects_invalid_scheme() {
        let text = r#"
[public_key]
n = "187"
g = "188"

[encoding]
scheme = "packed"
width = 1
labels = ["a"]
"#;
        assert!(TallyConfig::from_toml(text).is_err());
    }

    #[test]
    fn test_rejects_unknown_scheme() {
        assert!(TallyConfig::from_toml(&SKI.replace("\"signed\"", "\"ranked\"")).is_err());
    }
}
