//! PBKDF2-HMAC-SHA256 passphrase key derivation.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::types::{KEY_LENGTH, SALT_LENGTH};

/// Fixed PBKDF2 iteration count. Part of the envelope contract: changing it
/// makes every existing vault undecryptable, so treat it as frozen.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// A 256-bit AES key derived from a passphrase. Zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_LENGTH]);

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.0
    }
}

/// Derive a 256-bit key from a passphrase and salt.
///
/// Deterministic: the same passphrase and salt always yield the same key,
/// which is what makes previously saved envelopes decryptable. The salt is
/// regenerated per save, so the key is never reused across envelopes.
pub fn derive_key(password: &str, salt: &[u8; SALT_LENGTH]) -> DerivedKey {
    let mut key = [0u8; KEY_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key);
    DerivedKey(key)
}
