use thiserror::Error;

pub type Result<T> = std::result::Result<T, VaultError>;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("Vault not found.")]
    VaultNotFound,

    #[error("Incorrect password.")]
    IncorrectPassword,

    #[error("Weak password: {0}")]
    WeakPassword(String),

    #[error("Vault is locked")]
    Locked,

    #[error("Session passphrase missing while unlocked")]
    SessionExpired,

    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Crypto error: {0}")]
    Crypto(#[from] inkvault_crypto::CryptoError),
}
