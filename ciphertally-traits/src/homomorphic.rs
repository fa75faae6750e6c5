use std::ops::Add;

use crate::cryptosystems::{Associable, AssociatedCiphertext, EncryptionKey};

/// An encryption key whose ciphertexts can be combined into an encryption of the sum of their
/// plaintexts.
pub trait HomomorphicAddition: EncryptionKey {
    /// The ciphertext that every honest encryption of zero is equivalent to, and the neutral
    /// element of [`HomomorphicAddition::add`].
    fn identity(&self) -> Self::Ciphertext;

    /// Combines two ciphertexts into an encryption of the sum of their plaintexts.
    fn add(
        &self,
        ciphertext_a: &Self::Ciphertext,
        ciphertext_b: &Self::Ciphertext,
    ) -> Self::Ciphertext;
}

impl<'pk, C: Associable<PK>, PK: EncryptionKey<Ciphertext = C> + HomomorphicAddition> Add
    for AssociatedCiphertext<'pk, C, PK>
{
    type Output = AssociatedCiphertext<'pk, C, PK>;

    fn add(self, rhs: Self) -> Self::Output {
        debug_assert_eq!(self.public_key, rhs.public_key);
        HomomorphicAddition::add(self.public_key, &self.ciphertext, &rhs.ciphertext)
            .associate(self.public_key)
    }
}
