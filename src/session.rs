//! Session-scoped passphrase cache.

use std::sync::Arc;

use zeroize::Zeroizing;

use crate::error::Result;
use crate::storage::{KeyValueStore, SESSION_PASSWORD_KEY};

/// Caches the raw passphrase for the lifetime of a session so mutations do
/// not re-prompt the user.
///
/// The passphrase is cached rather than the derived key: the salt is
/// regenerated on every save, so a cached key would go stale after the first
/// write. Caching the passphrase re-runs the KDF against each fresh salt,
/// trading CPU for never holding reusable key material.
pub struct SessionCache {
    store: Arc<dyn KeyValueStore>,
}

impl SessionCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Read the cached passphrase, if any. The returned value zeroizes on drop.
    pub fn get(&self) -> Result<Option<Zeroizing<String>>> {
        Ok(self.store.get(SESSION_PASSWORD_KEY)?.map(Zeroizing::new))
    }

    pub fn set(&self, password: &str) -> Result<()> {
        self.store.set(SESSION_PASSWORD_KEY, password)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(SESSION_PASSWORD_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn set_get_clear() {
        let cache = SessionCache::new(Arc::new(MemoryStore::new()));
        assert!(cache.get().unwrap().is_none());
        cache.set("hunter2").unwrap();
        assert_eq!(cache.get().unwrap().unwrap().as_str(), "hunter2");
        cache.clear().unwrap();
        assert!(cache.get().unwrap().is_none());
    }
}
