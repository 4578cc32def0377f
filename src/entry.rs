//! Journal entry model and the encrypted vault document.

use serde::{Deserialize, Serialize};

/// A single journal entry. `id` and `date` are assigned at creation and
/// immutable thereafter; edits overwrite title, content, and tags only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// ISO-8601 creation timestamp.
    pub date: String,
}

/// Caller-supplied fields for a new entry; the store fills `id` and `date`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewEntry {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

/// The unit of encryption: the whole entry collection, serialized as
/// `{"entries": [...]}`. The `entries` field is required — a decrypted
/// document without it fails deserialization instead of being silently
/// reseeded with sample data.
#[derive(Debug, Serialize, Deserialize)]
pub struct VaultDocument {
    pub entries: Vec<JournalEntry>,
}

pub(crate) fn generate_entry_id() -> String {
    format!("entry-{}", uuid::Uuid::new_v4())
}

pub(crate) fn now_iso8601() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Seed collection for a freshly initialized vault.
pub fn sample_entries() -> Vec<JournalEntry> {
    vec![JournalEntry {
        id: "sample-1".to_string(),
        title: "My First Entry".to_string(),
        content: "This is a sample entry. Click 'Edit' to change it or 'New Entry' to write your own!"
            .to_string(),
        tags: vec!["guide".to_string()],
        date: now_iso8601(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_without_entries_field_is_rejected() {
        let err = serde_json::from_str::<VaultDocument>(r#"{"notes": []}"#);
        assert!(err.is_err());
    }

    #[test]
    fn document_with_empty_entries_is_valid() {
        let doc: VaultDocument = serde_json::from_str(r#"{"entries": []}"#).unwrap();
        assert!(doc.entries.is_empty());
    }

    #[test]
    fn entry_tags_default_to_empty() {
        let entry: JournalEntry = serde_json::from_str(
            r#"{"id":"e1","title":"T","content":"C","date":"2026-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert!(entry.tags.is_empty());
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = generate_entry_id();
        let b = generate_entry_id();
        assert_ne!(a, b);
        assert!(a.starts_with("entry-"));
    }
}
