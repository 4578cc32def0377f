//! Client-side encrypted journal vault.
//!
//! A passphrase-protected entry collection with encryption at rest. The
//! whole collection is serialized to JSON, encrypted with AES-256-GCM under
//! a PBKDF2-derived key, and persisted as a single `hex(salt):hex(iv):
//! hex(ciphertext‖tag)` envelope string. Salt and IV are regenerated on
//! every save; only ciphertext ever touches durable storage.
//!
//! [`VaultStore`] owns the `Uninitialized → Locked ⇄ Unlocked` state machine
//! and the entry CRUD on top of it. Storage is injected via the
//! [`KeyValueStore`] trait (one durable slot for the envelope, one
//! session-scoped slot for the cached passphrase). [`IdleWatcher`] drives the
//! auto-lock transition from inactivity and tab-visibility signals.
//!
//! Known limitation: two concurrent stores over the same durable slot (two
//! tabs) are last-writer-wins; there is no conflict detection.

pub mod entry;
pub mod error;
pub mod idle;
pub mod session;
pub mod storage;
pub mod vault;

pub use entry::{sample_entries, JournalEntry, NewEntry, VaultDocument};
pub use error::{Result, VaultError};
pub use idle::{ActivityEvent, IdleLockPolicy, IdleWatcher, DEFAULT_IDLE_TIMEOUT};
pub use session::SessionCache;
pub use storage::{KeyValueStore, MemoryStore, SESSION_PASSWORD_KEY, VAULT_KEY};
pub use vault::{UnlockResult, VaultState, VaultStore};
