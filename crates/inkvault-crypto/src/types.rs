//! Constants shared across the codec.

/// KDF salt length in bytes. Regenerated on every encryption.
pub const SALT_LENGTH: usize = 16;

/// AES-GCM IV (nonce) length in bytes. Regenerated on every encryption.
pub const IV_LENGTH: usize = 12;

/// AES-256 key length in bytes.
pub const KEY_LENGTH: usize = 32;

/// AES-GCM authentication tag length in bytes (appended to the ciphertext).
pub const TAG_LENGTH: usize = 16;

/// Separator between the hex-encoded envelope segments.
/// Guaranteed absent from hex output, so splitting is unambiguous.
pub const ENVELOPE_DELIMITER: char = ':';

/// An envelope is exactly `salt : iv : ciphertext‖tag`.
pub const ENVELOPE_SEGMENTS: usize = 3;
