//! Key-value storage collaborators.
//!
//! The vault persists exactly one value (the envelope string) and the session
//! layer holds exactly one value (the passphrase). Both sit behind the same
//! narrow trait so tests and hosts can inject their own backing store —
//! browser localStorage/sessionStorage, a file, or plain memory.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::error::Result;

/// Storage key for the persisted vault envelope.
pub const VAULT_KEY: &str = "vault";

/// Storage key for the session-scoped passphrase.
pub const SESSION_PASSWORD_KEY: &str = "session_password";

/// A durable or session-scoped string key-value slot.
///
/// Implementations must be infallible on reads of absent keys (`Ok(None)`,
/// not an error). Write failures propagate; the store treats them as
/// "mutation not persisted".
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory adapter. Interior mutability via `parking_lot::Mutex`;
/// uncontended locks are near-zero overhead on single-threaded hosts.
#[derive(Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.slots.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.slots.lock().remove(key);
        Ok(())
    }
}
