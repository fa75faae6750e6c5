/// Implementation of the Paillier cryptosystem.
pub mod paillier;
