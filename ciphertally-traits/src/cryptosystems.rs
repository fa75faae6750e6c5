use crate::randomness::GeneralRng;
use crate::randomness::SecureRng;
use crate::Result;
use std::fmt::Debug;

/// The encryption key. Anyone who holds it can encrypt ballots and combine ciphertexts, but
/// cannot learn what they contain.
pub trait EncryptionKey: Sized + Debug + PartialEq {
    /// The type of the plaintexts to be encrypted.
    type Plaintext;
    /// The type of the encrypted plaintexts.
    type Ciphertext: Associable<Self>;
    /// The randomness that blinds an encryption.
    type Randomness;

    /// Encrypt the plaintext using the public key and a cryptographic RNG and immediately
    /// associate it with the public key.
    fn encrypt<'pk, R: SecureRng>(
        &'pk self,
        plaintext: &Self::Plaintext,
        rng: &mut GeneralRng<R>,
    ) -> Result<AssociatedCiphertext<'pk, Self::Ciphertext, Self>> {
        Ok(self.encrypt_raw(plaintext, rng)?.associate(self))
    }

    /// Encrypt the plaintext using the public key and a cryptographic RNG.
    fn encrypt_raw<R: SecureRng>(
        &self,
        plaintext: &Self::Plaintext,
        rng: &mut GeneralRng<R>,
    ) -> Result<Self::Ciphertext>;

    /// Encrypt the plaintext with caller-chosen randomness. The result is deterministic, which
    /// is only useful for reproducible test vectors.
    fn encrypt_with(
        &self,
        plaintext: &Self::Plaintext,
        randomness: &Self::Randomness,
    ) -> Result<Self::Ciphertext>;
}

/// The decryption key.
pub trait DecryptionKey<PK: EncryptionKey> {
    /// Decrypt the associated ciphertext using the secret key.
    fn decrypt(
        &self,
        ciphertext: &AssociatedCiphertext<'_, PK::Ciphertext, PK>,
    ) -> Result<PK::Plaintext> {
        self.decrypt_raw(ciphertext.public_key, &ciphertext.ciphertext)
    }

    /// Decrypt the ciphertext using the secret key and its related public key.
    fn decrypt_raw(&self, public_key: &PK, ciphertext: &PK::Ciphertext) -> Result<PK::Plaintext>;
}

/// A ciphertext together with the public key it was encrypted under, which allows overloading
/// operators for homomorphic operations.
#[derive(PartialEq, Debug)]
pub struct AssociatedCiphertext<'pk, C: Associable<PK>, PK: EncryptionKey<Ciphertext = C>> {
    /// The ciphertext itself.
    pub ciphertext: C,
    /// The public key the ciphertext belongs to.
    pub public_key: &'pk PK,
}

/// Functionality to easily turn a ciphertext into an associated ciphertext
pub trait Associable<PK: EncryptionKey<Ciphertext = Self>>: Sized {
    /// 'Enriches' a ciphertext by associating it with a corresponding public key.
    fn associate(self, public_key: &PK) -> AssociatedCiphertext<'_, Self, PK> {
        AssociatedCiphertext {
            ciphertext: self,
            public_key,
        }
    }
}
