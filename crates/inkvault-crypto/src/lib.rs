pub mod envelope;
pub mod error;
pub mod kdf;
pub mod types;

pub use envelope::{decrypt, encrypt};
pub use error::{CryptoError, DecryptError};
pub use kdf::{derive_key, DerivedKey, PBKDF2_ITERATIONS};
pub use types::{
    ENVELOPE_DELIMITER, ENVELOPE_SEGMENTS, IV_LENGTH, KEY_LENGTH, SALT_LENGTH, TAG_LENGTH,
};
