//! Passphrase envelope encode/decode.
//!
//! Envelope format: `hex(salt):hex(iv):hex(ciphertext‖tag)`, lowercase hex.
//! Salt (16 bytes) and IV (12 bytes) are regenerated on every call to
//! [`encrypt`]; the AES-256 key is re-derived from the passphrase each time,
//! so no key material ever touches storage.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};

use crate::error::{CryptoError, DecryptError};
use crate::kdf::derive_key;
use crate::types::{
    ENVELOPE_DELIMITER, ENVELOPE_SEGMENTS, IV_LENGTH, SALT_LENGTH, TAG_LENGTH,
};

fn random_bytes<const N: usize>() -> Result<[u8; N], CryptoError> {
    let mut buf = [0u8; N];
    getrandom::getrandom(&mut buf).map_err(|e| CryptoError::RngFailed(e.to_string()))?;
    Ok(buf)
}

/// Encrypt a plaintext document under a passphrase.
///
/// Generates a fresh salt and IV, derives the key, and returns the
/// self-contained envelope string. Two calls with identical inputs produce
/// different envelopes.
pub fn encrypt(plaintext: &[u8], password: &str) -> Result<String, CryptoError> {
    let salt = random_bytes::<SALT_LENGTH>()?;
    let iv = random_bytes::<IV_LENGTH>()?;

    let key = derive_key(password, &salt);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&iv), plaintext)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

    Ok(format!(
        "{}{delim}{}{delim}{}",
        hex::encode(salt),
        hex::encode(iv),
        hex::encode(ciphertext),
        delim = ENVELOPE_DELIMITER,
    ))
}

/// Decrypt an envelope string under a passphrase.
///
/// Never panics on hostile input. A wrong passphrase and a tampered
/// ciphertext are indistinguishable to the caller by design; both surface as
/// [`DecryptError::AuthenticationFailed`].
pub fn decrypt(envelope: &str, password: &str) -> Result<Vec<u8>, DecryptError> {
    let segments: Vec<&str> = envelope.split(ENVELOPE_DELIMITER).collect();
    if segments.len() != ENVELOPE_SEGMENTS {
        return Err(DecryptError::MalformedEnvelope);
    }

    let salt: [u8; SALT_LENGTH] = hex::decode(segments[0])
        .map_err(|_| DecryptError::MalformedEnvelope)?
        .try_into()
        .map_err(|_| DecryptError::MalformedEnvelope)?;
    let iv: [u8; IV_LENGTH] = hex::decode(segments[1])
        .map_err(|_| DecryptError::MalformedEnvelope)?
        .try_into()
        .map_err(|_| DecryptError::MalformedEnvelope)?;
    let ciphertext = hex::decode(segments[2]).map_err(|_| DecryptError::MalformedEnvelope)?;
    if ciphertext.len() < TAG_LENGTH {
        return Err(DecryptError::MalformedEnvelope);
    }

    let key = derive_key(password, &salt);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    cipher
        .decrypt(Nonce::from_slice(&iv), ciphertext.as_slice())
        .map_err(|_| DecryptError::AuthenticationFailed)
}
