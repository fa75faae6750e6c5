#![doc = include_str!("../README.md")]
#![warn(missing_docs, unused_imports)]

pub use ciphertally_bigint;
pub use ciphertally_he::aggregate;
pub use ciphertally_he::cryptosystems;
pub use ciphertally_he::encoding;
pub use ciphertally_he::tally;
pub use ciphertally_numbertheory;
pub use ciphertally_traits;
