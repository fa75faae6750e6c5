use std::fmt::Display;
use std::str::FromStr;

use ciphertally_bigint::{BigInteger, Modulus};
use ciphertally_numbertheory::{gen_coprime, mod_inverse};
use ciphertally_traits::cryptosystems::{Associable, DecryptionKey, EncryptionKey};
use ciphertally_traits::homomorphic::HomomorphicAddition;
use ciphertally_traits::randomness::GeneralRng;
use ciphertally_traits::randomness::SecureRng;
use ciphertally_traits::{Error, Result};
use serde::{Deserialize, Serialize};

/// Public key for the Paillier cryptosystem.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct PaillierPK {
    n: Modulus,
    n_squared: Modulus,
    g: BigInteger,
}

/// Decryption key for the Paillier cryptosystem.
pub struct PaillierSK {
    lambda: BigInteger,
    mu: BigInteger,
}

/// Ciphertext of the Paillier cryptosystem, which is additively homomorphic.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct PaillierCiphertext {
    /// Encrypted message (Ciphertext)
    pub c: BigInteger,
}

impl Associable<PaillierPK> for PaillierCiphertext {}

impl PaillierPK {
    /// Creates a public key from the modulus `n` and the generator `g`. Fails with
    /// [`Error::InvalidKeyMaterial`] when `n <= 1` or `g` is not positive. Whether `g` actually
    /// belongs to the key is not checked here, see [`PaillierSK::verify`].
    pub fn new(n: BigInteger, g: BigInteger) -> Result<PaillierPK> {
        if n <= BigInteger::one() {
            return Err(Error::InvalidKeyMaterial("modulus n must be larger than 1"));
        }
        if !g.is_positive() {
            return Err(Error::InvalidKeyMaterial("generator g must be positive"));
        }

        let n = Modulus::new(n)?;
        let n_squared = n.square();

        Ok(PaillierPK { n, n_squared, g })
    }

    /// The public modulus $n$.
    pub fn n(&self) -> &Modulus {
        &self.n
    }

    /// The ciphertext modulus $n^2$.
    pub fn n_squared(&self) -> &Modulus {
        &self.n_squared
    }

    /// The public generator $g$.
    pub fn g(&self) -> &BigInteger {
        &self.g
    }

    /// Returns true if the ciphertext is an element of $[0, n^2)$.
    pub fn contains(&self, ciphertext: &PaillierCiphertext) -> bool {
        self.n_squared.contains(&ciphertext.c)
    }
}

impl PaillierSK {
    /// Creates a secret key from the private exponent $\lambda$ and the decryption multiplier
    /// $\mu$. Fails with [`Error::InvalidKeyMaterial`] unless both are positive.
    pub fn new(lambda: BigInteger, mu: BigInteger) -> Result<PaillierSK> {
        if !lambda.is_positive() {
            return Err(Error::InvalidKeyMaterial("lambda must be positive"));
        }
        if !mu.is_positive() {
            return Err(Error::InvalidKeyMaterial("mu must be positive"));
        }

        Ok(PaillierSK { lambda, mu })
    }

    /// Re-derives $\mu = L(g^\lambda \bmod n^2)^{-1} \bmod n$ and compares it with the supplied
    /// $\mu$. Decryption never needs this, but a key that fails it decrypts to garbage.
    /// ```
    /// # use ciphertally_bigint::BigInteger;
    /// # use ciphertally_he::cryptosystems::paillier::{PaillierPK, PaillierSK};
    /// let n = BigInteger::from(187u64);
    /// let public_key = PaillierPK::new(n, BigInteger::from(188u64)).unwrap();
    /// let lambda = BigInteger::from(80u64);
    /// let secret_key = PaillierSK::new(lambda, BigInteger::from(180u64)).unwrap();
    ///
    /// assert!(secret_key.verify(&public_key).is_ok());
    /// ```
    pub fn verify(&self, public_key: &PaillierPK) -> Result<()> {
        let u = public_key.n_squared.pow(&public_key.g, &self.lambda)?;
        let expected = mod_inverse(&l_function(&u, &public_key.n)?, &public_key.n)?;

        if expected != self.mu {
            return Err(Error::InvalidKeyMaterial(
                "mu is not the inverse of L(g^lambda mod n^2) modulo n",
            ));
        }

        Ok(())
    }
}

/// The Paillier L-function $L(u) = (u - 1) / n$. For honest key material the division is exact
/// because $u \equiv 1 \pmod n$; otherwise the result is silently meaningless.
fn l_function(u: &BigInteger, n: &Modulus) -> Result<BigInteger> {
    (u.clone() - 1u64).div_floor(n.value())
}

impl EncryptionKey for PaillierPK {
    type Plaintext = BigInteger;
    type Ciphertext = PaillierCiphertext;
    type Randomness = BigInteger;

    /// Encrypts a plaintext integer using the Paillier public key. Negative plaintexts are
    /// reduced modulo $n$ first, so $-1$ is encrypted as $n - 1$.
    /// ```
    /// # use ciphertally_bigint::BigInteger;
    /// # use ciphertally_he::cryptosystems::paillier::PaillierPK;
    /// # use ciphertally_traits::cryptosystems::EncryptionKey;
    /// # use ciphertally_traits::randomness::GeneralRng;
    /// # use rand::rngs::OsRng;
    /// let mut rng = GeneralRng::new(OsRng);
    /// let n = BigInteger::from(187u64);
    /// let public_key = PaillierPK::new(n, BigInteger::from(188u64)).unwrap();
    ///
    /// let ciphertext = public_key.encrypt(&BigInteger::from(-1i64), &mut rng).unwrap();
    /// ```
    fn encrypt_raw<R: SecureRng>(
        &self,
        plaintext: &BigInteger,
        rng: &mut GeneralRng<R>,
    ) -> Result<PaillierCiphertext> {
        let r = gen_coprime(&self.n_squared, rng);

        self.encrypt_with(plaintext, &r)
    }

    fn encrypt_with(&self, plaintext: &BigInteger, r: &BigInteger) -> Result<PaillierCiphertext> {
        let first = self.n_squared.pow(&self.g, &self.n.reduce(plaintext))?;
        let second = self.n_squared.pow(r, self.n.value())?;

        Ok(PaillierCiphertext {
            c: self.n_squared.mul(&first, &second),
        })
    }
}

impl DecryptionKey<PaillierPK> for PaillierSK {
    /// Decrypts a rich Paillier ciphertext using the secret key.
    /// ```
    /// # use ciphertally_bigint::BigInteger;
    /// # use ciphertally_he::cryptosystems::paillier::{PaillierPK, PaillierSK};
    /// # use ciphertally_traits::cryptosystems::{DecryptionKey, EncryptionKey};
    /// # use ciphertally_traits::randomness::GeneralRng;
    /// # use rand::rngs::OsRng;
    /// # let mut rng = GeneralRng::new(OsRng);
    /// # let n = BigInteger::from(187u64);
    /// # let public_key = PaillierPK::new(n, BigInteger::from(188u64)).unwrap();
    /// # let lambda = BigInteger::from(80u64);
    /// # let secret_key = PaillierSK::new(lambda, BigInteger::from(180u64)).unwrap();
    /// let ciphertext = public_key.encrypt(&BigInteger::from(5u64), &mut rng).unwrap();
    /// println!("The decrypted message is {}", secret_key.decrypt(&ciphertext).unwrap());
    /// // Prints: "The decrypted message is 5".
    /// ```
    fn decrypt_raw(
        &self,
        public_key: &PaillierPK,
        ciphertext: &PaillierCiphertext,
    ) -> Result<BigInteger> {
        let u = public_key.n_squared.pow(&ciphertext.c, &self.lambda)?;
        let l = l_function(&u, &public_key.n)?;

        Ok(public_key.n.mul(&l, &self.mu))
    }
}

impl HomomorphicAddition for PaillierPK {
    /// The trivial encryption of zero, $1$.
    fn identity(&self) -> PaillierCiphertext {
        PaillierCiphertext {
            c: BigInteger::one(),
        }
    }

    fn add(
        &self,
        ciphertext_a: &PaillierCiphertext,
        ciphertext_b: &PaillierCiphertext,
    ) -> PaillierCiphertext {
        PaillierCiphertext {
            c: self.n_squared.mul(&ciphertext_a.c, &ciphertext_b.c),
        }
    }
}

impl FromStr for PaillierCiphertext {
    type Err = Error;

    /// Parses a ciphertext written as a decimal integer. The range is checked only once the
    /// ciphertext meets a public key.
    fn from_str(string: &str) -> Result<Self> {
        Ok(PaillierCiphertext { c: string.parse()? })
    }
}

impl Display for PaillierCiphertext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.c, f)
    }
}
