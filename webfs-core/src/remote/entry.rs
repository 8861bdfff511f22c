//! src/remote/entry.rs
//! ============================================================================
//! # FileEntry: Wire-Exact Listing Entry
//!
//! One file or directory as reported by the listing endpoint. Entries are
//! produced fresh on every list call and replaced wholesale; nothing mutates
//! them in place. Fields this client does not know about ride through the
//! `extra` map untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Unique within a listing.
    pub name: String,
    pub is_dir: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
    /// Unknown wire fields, passed through opaquely.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FileEntry {
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
            size: None,
            modified: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self {
            is_dir: false,
            ..Self::dir(name)
        }
    }

    /// Human-friendly file size, `-` when the server did not report one.
    pub fn size_human(&self) -> String {
        self.size
            .map(|bytes| bytesize::ByteSize::b(bytes).to_string())
            .unwrap_or_else(|| "-".to_string())
    }

    /// Modification time formatted for display, `-` when absent.
    pub fn modified_human(&self) -> String {
        self.modified
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn size_and_mtime_display() {
        let mut entry = FileEntry::file("a.txt");
        assert_eq!(entry.size_human(), "-");
        assert_eq!(entry.modified_human(), "-");

        entry.size = Some(512);
        entry.modified = Some(Utc.with_ymd_and_hms(2024, 3, 9, 15, 20, 0).unwrap());
        assert_eq!(entry.size_human(), "512 B");
        assert_eq!(entry.modified_human(), "2024-03-09 15:20");
    }

    #[test]
    fn optional_fields_deserialize_when_absent() {
        let entry: FileEntry = serde_json::from_str(r#"{"name":"docs","is_dir":true}"#).unwrap();
        assert_eq!(entry, FileEntry::dir("docs"));
    }
}
