//! Vault state machine: initialize, unlock, lock, and entry CRUD.
//!
//! States: `Uninitialized` (no envelope persisted), `Locked` (envelope
//! exists, entries evicted), `Unlocked` (entries in memory, passphrase in
//! the session cache). The whole collection is re-encrypted and rewritten on
//! every mutation; there is no incremental format. Concurrent writers (a
//! second tab) are last-writer-wins and not reconciled.

use std::sync::Arc;

use tracing::{debug, warn};

use inkvault_crypto::{decrypt, encrypt};
use serde::Serialize;

use crate::entry::{generate_entry_id, now_iso8601, sample_entries, JournalEntry, NewEntry, VaultDocument};
use crate::error::{Result, VaultError};
use crate::session::SessionCache;
use crate::storage::{KeyValueStore, VAULT_KEY};

/// Observable vault state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultState {
    Uninitialized,
    Locked,
    Unlocked,
}

/// Result of an unlock attempt, shaped for direct display by a UI layer.
/// A wrong passphrase and a corrupted envelope produce the same message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlockResult {
    pub success: bool,
    pub error: Option<String>,
}

impl UnlockResult {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    fn failure(error: impl ToString) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
        }
    }
}

/// Serialize-only view so saves do not clone the entry list.
#[derive(Serialize)]
struct VaultDocumentRef<'a> {
    entries: &'a [JournalEntry],
}

/// The vault store. One instance per application session, with injected
/// persistent and session-scoped storage collaborators.
pub struct VaultStore {
    persistent: Arc<dyn KeyValueStore>,
    session: SessionCache,
    entries: Vec<JournalEntry>,
    locked: bool,
}

impl VaultStore {
    /// Build a store over injected storage collaborators and attempt the
    /// resume path: if an envelope and a still-valid session passphrase both
    /// exist, unlock silently. A stale passphrase falls back to `Locked`.
    pub fn new(persistent: Arc<dyn KeyValueStore>, session: Arc<dyn KeyValueStore>) -> Result<Self> {
        let mut store = Self {
            persistent,
            session: SessionCache::new(session),
            entries: Vec::new(),
            locked: true,
        };
        store.try_resume()?;
        Ok(store)
    }

    fn try_resume(&mut self) -> Result<()> {
        let Some(envelope) = self.persistent.get(VAULT_KEY)? else {
            return Ok(());
        };
        let Some(password) = self.session.get()? else {
            return Ok(());
        };
        match decrypt(&envelope, &password) {
            Ok(plaintext) => match serde_json::from_slice::<VaultDocument>(&plaintext) {
                Ok(doc) => {
                    debug!(entries = doc.entries.len(), "resumed vault from session passphrase");
                    self.entries = doc.entries;
                    self.locked = false;
                }
                Err(_) => {
                    warn!("session resume failed: undecodable vault document");
                    self.session.clear()?;
                }
            },
            Err(_) => {
                warn!("session resume failed: stale passphrase");
                self.session.clear()?;
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Create the vault: validate the new passphrase, seed the sample entry
    /// collection, encrypt and persist it, cache the passphrase, unlock.
    /// Storage write failures propagate and leave the store untouched.
    pub fn initialize_vault(&mut self, password: &str) -> Result<()> {
        validate_new_password(password)?;
        let entries = sample_entries();
        self.persist_with(&entries, password)?;
        self.session.set(password)?;
        self.entries = entries;
        self.locked = false;
        debug!("vault initialized");
        Ok(())
    }

    /// Attempt to unlock with a passphrase. Absent envelope, wrong
    /// passphrase, and corrupted storage all come back as a structured
    /// failure rather than an error; storage read failures propagate.
    pub fn unlock_vault(&mut self, password: &str) -> Result<UnlockResult> {
        let Some(envelope) = self.persistent.get(VAULT_KEY)? else {
            return Ok(UnlockResult::failure(VaultError::VaultNotFound));
        };

        let Ok(plaintext) = decrypt(&envelope, password) else {
            warn!("unlock failed");
            return Ok(UnlockResult::failure(VaultError::IncorrectPassword));
        };
        let doc: VaultDocument = match serde_json::from_slice(&plaintext) {
            Ok(doc) => doc,
            // Authenticated but undecodable means a buggy writer, not a bad
            // passphrase. Deliberately reported with the same message.
            Err(_) => {
                warn!("decrypted vault document failed to parse");
                return Ok(UnlockResult::failure(VaultError::IncorrectPassword));
            }
        };

        self.session.set(password)?;
        debug!(entries = doc.entries.len(), "vault unlocked");
        self.entries = doc.entries;
        self.locked = false;
        Ok(UnlockResult::ok())
    }

    /// Lock the vault: evict entries from memory and clear the cached
    /// passphrase. Idempotent. Entries are cleared before the session write
    /// so a storage failure cannot leave plaintext in memory.
    pub fn lock_vault(&mut self) -> Result<()> {
        self.entries.clear();
        self.locked = true;
        self.session.clear()?;
        debug!("vault locked");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Entry CRUD (unlocked only)
    // ------------------------------------------------------------------

    /// Add an entry. The store assigns `id` and `date`; an empty title gets
    /// a placeholder. New entries are prepended.
    pub fn add_entry(&mut self, new: NewEntry) -> Result<JournalEntry> {
        self.ensure_unlocked()?;
        let entry = JournalEntry {
            id: generate_entry_id(),
            title: if new.title.is_empty() {
                "Untitled".to_string()
            } else {
                new.title
            },
            content: new.content,
            tags: new.tags,
            date: now_iso8601(),
        };
        let mut entries = self.entries.clone();
        entries.insert(0, entry.clone());
        self.save(&entries)?;
        self.entries = entries;
        Ok(entry)
    }

    /// Overwrite an existing entry's title, content, and tags. The stored
    /// creation date is kept regardless of the input.
    pub fn update_entry(&mut self, mut updated: JournalEntry) -> Result<()> {
        self.ensure_unlocked()?;
        let Some(pos) = self.entries.iter().position(|e| e.id == updated.id) else {
            return Err(VaultError::EntryNotFound(updated.id));
        };
        updated.date = self.entries[pos].date.clone();
        let mut entries = self.entries.clone();
        entries[pos] = updated;
        self.save(&entries)?;
        self.entries = entries;
        Ok(())
    }

    /// Delete an entry by id.
    pub fn delete_entry(&mut self, id: &str) -> Result<()> {
        self.ensure_unlocked()?;
        if !self.entries.iter().any(|e| e.id == id) {
            return Err(VaultError::EntryNotFound(id.to_string()));
        }
        let mut entries = self.entries.clone();
        entries.retain(|e| e.id != id);
        self.save(&entries)?;
        self.entries = entries;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Read accessors
    // ------------------------------------------------------------------

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_vault_initialized(&self) -> Result<bool> {
        Ok(self.persistent.get(VAULT_KEY)?.is_some())
    }

    pub fn state(&self) -> Result<VaultState> {
        if !self.locked {
            Ok(VaultState::Unlocked)
        } else if self.is_vault_initialized()? {
            Ok(VaultState::Locked)
        } else {
            Ok(VaultState::Uninitialized)
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn ensure_unlocked(&self) -> Result<()> {
        if self.locked {
            return Err(VaultError::Locked);
        }
        Ok(())
    }

    /// Re-encrypt and persist the whole collection with the session-cached
    /// passphrase. A missing passphrase while unlocked is an invariant
    /// violation and fails loudly instead of skipping the write.
    fn save(&self, entries: &[JournalEntry]) -> Result<()> {
        let Some(password) = self.session.get()? else {
            return Err(VaultError::SessionExpired);
        };
        self.persist_with(entries, &password)
    }

    /// Exactly one storage write per call: serialize, encrypt under a fresh
    /// salt and IV, overwrite the envelope wholesale.
    fn persist_with(&self, entries: &[JournalEntry], password: &str) -> Result<()> {
        let plaintext = serde_json::to_vec(&VaultDocumentRef { entries })?;
        let envelope = encrypt(&plaintext, password)?;
        self.persistent.set(VAULT_KEY, &envelope)?;
        debug!(entries = entries.len(), "vault saved");
        Ok(())
    }
}

/// Strength heuristic (0..=4): length ≥ 8, uppercase, digit, symbol.
fn password_strength(password: &str) -> u32 {
    let mut score = 0;
    if password.len() >= 8 {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }
    if password.chars().any(|c| !c.is_alphanumeric()) {
        score += 1;
    }
    score
}

/// Creation-time checks only; unlock attempts go straight to decryption.
fn validate_new_password(password: &str) -> Result<()> {
    if password.chars().count() < 4 {
        return Err(VaultError::WeakPassword(
            "Password must be at least 4 characters.".to_string(),
        ));
    }
    if password_strength(password) < 2 {
        return Err(VaultError::WeakPassword(
            "Choose a stronger password (longer or include numbers/symbols).".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn new_store() -> VaultStore {
        VaultStore::new(Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new())).unwrap()
    }

    #[test]
    fn starts_uninitialized() {
        let store = new_store();
        assert_eq!(store.state().unwrap(), VaultState::Uninitialized);
        assert!(store.is_locked());
        assert!(!store.is_vault_initialized().unwrap());
    }

    #[test]
    fn initialize_seeds_sample_entry_and_unlocks() {
        let mut store = new_store();
        store.initialize_vault("Secret123!").unwrap();
        assert_eq!(store.state().unwrap(), VaultState::Unlocked);
        assert_eq!(store.entries().len(), 1);
        assert_eq!(store.entries()[0].id, "sample-1");
    }

    #[test]
    fn rejects_short_password() {
        let mut store = new_store();
        let err = store.initialize_vault("abc").unwrap_err();
        assert!(matches!(err, VaultError::WeakPassword(_)));
        assert_eq!(store.state().unwrap(), VaultState::Uninitialized);
    }

    #[test]
    fn rejects_low_strength_password() {
        let mut store = new_store();
        let err = store.initialize_vault("abcd").unwrap_err();
        assert!(matches!(err, VaultError::WeakPassword(_)));
    }

    #[test]
    fn unlock_without_vault_reports_not_found() {
        let mut store = new_store();
        let result = store.unlock_vault("whatever").unwrap();
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Vault not found."));
    }

    #[test]
    fn mutations_require_unlock() {
        let mut store = new_store();
        let err = store.add_entry(NewEntry::default()).unwrap_err();
        assert!(matches!(err, VaultError::Locked));
        let err = store.delete_entry("sample-1").unwrap_err();
        assert!(matches!(err, VaultError::Locked));
    }

    #[test]
    fn lock_is_idempotent() {
        let mut store = new_store();
        store.initialize_vault("Secret123!").unwrap();
        store.lock_vault().unwrap();
        store.lock_vault().unwrap();
        assert!(store.is_locked());
        assert!(store.entries().is_empty());
        assert_eq!(store.state().unwrap(), VaultState::Locked);
    }

    #[test]
    fn update_unknown_entry_fails() {
        let mut store = new_store();
        store.initialize_vault("Secret123!").unwrap();
        let err = store
            .update_entry(JournalEntry {
                id: "ghost".to_string(),
                title: String::new(),
                content: String::new(),
                tags: Vec::new(),
                date: String::new(),
            })
            .unwrap_err();
        assert!(matches!(err, VaultError::EntryNotFound(_)));
    }

    #[test]
    fn update_preserves_creation_date() {
        let mut store = new_store();
        store.initialize_vault("Secret123!").unwrap();
        let original = store.entries()[0].clone();
        let mut edited = original.clone();
        edited.content = "rewritten".to_string();
        edited.date = "1970-01-01T00:00:00Z".to_string();
        store.update_entry(edited).unwrap();
        assert_eq!(store.entries()[0].content, "rewritten");
        assert_eq!(store.entries()[0].date, original.date);
    }

    #[test]
    fn empty_title_gets_placeholder() {
        let mut store = new_store();
        store.initialize_vault("Secret123!").unwrap();
        let entry = store
            .add_entry(NewEntry {
                title: String::new(),
                content: "body".to_string(),
                tags: Vec::new(),
            })
            .unwrap();
        assert_eq!(entry.title, "Untitled");
    }

    #[test]
    fn password_strength_heuristic() {
        assert_eq!(password_strength(""), 0);
        assert_eq!(password_strength("abcd"), 0);
        assert_eq!(password_strength("abcdefgh"), 1);
        assert_eq!(password_strength("Abcdefg1"), 3);
        assert_eq!(password_strength("Abcdef1!"), 4);
    }
}
