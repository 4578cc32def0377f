use thiserror::Error;

/// Unexpected failures: RNG or cipher internals. These indicate an
/// environment problem, not a bad passphrase.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Random number generation failed: {0}")]
    RngFailed(String),
}

/// Expected decrypt failures. Callers collapse both arms into a single
/// user-facing "incorrect password" message so the error surface does not
/// distinguish a wrong passphrase from corrupted storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecryptError {
    /// AEAD tag verification failed: wrong passphrase or tampered ciphertext.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The envelope string does not parse: wrong segment count, non-hex
    /// content, wrong salt/IV length, or ciphertext shorter than the tag.
    #[error("malformed envelope")]
    MalformedEnvelope,
}
