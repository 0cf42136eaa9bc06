//! Record sources
//!
//! A [`RecordSource`] hands the engine every record belonging to one owner.
//! Ownership filtering happens here, never in the analytics pipeline.
//!
//! ## Resilience
//!
//! A source file that is not a JSON array is a hard [`Error::Source`]. A
//! single element that does not decode as a record is logged and skipped,
//! so one bad entry cannot hide the rest of a child's history.

use crate::error::{Error, Result};
use crate::types::SearchRecord;
use std::path::{Path, PathBuf};

/// Whose records to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerScope {
    /// Parent account id, matched exactly
    pub user_id: String,
    /// Child profile, matched case-insensitively after trimming
    pub child_name: Option<String>,
}

impl OwnerScope {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            child_name: None,
        }
    }

    pub fn with_child(mut self, child_name: impl Into<String>) -> Self {
        self.child_name = Some(child_name.into());
        self
    }

    /// Whether `record` belongs to this owner (and child, when one is set).
    pub fn matches(&self, record: &SearchRecord) -> bool {
        if record.owner_id() != Some(self.user_id.as_str()) {
            return false;
        }
        match self.child_name.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(wanted) => record
                .child_name
                .as_deref()
                .is_some_and(|name| name.trim().eq_ignore_ascii_case(wanted)),
        }
    }
}

/// Anything that can produce an owner's search records.
pub trait RecordSource {
    /// Short name for logs (e.g., the file path).
    fn name(&self) -> String;

    /// All records owned by `owner`, in source order.
    fn fetch(&self, owner: &OwnerScope) -> Result<Vec<SearchRecord>>;
}

/// Records stored as one JSON array in a file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decode every record in the file, ignoring ownership.
    pub fn read_all(&self) -> Result<Vec<SearchRecord>> {
        let content = std::fs::read_to_string(&self.path)?;
        let value: serde_json::Value = serde_json::from_str(&content)?;
        let serde_json::Value::Array(items) = value else {
            return Err(Error::Source(format!(
                "{} does not contain a JSON array of records",
                self.path.display()
            )));
        };

        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match serde_json::from_value::<SearchRecord>(item) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        index,
                        error = %e,
                        "Skipping undecodable record"
                    );
                }
            }
        }
        Ok(records)
    }
}

impl RecordSource for JsonFileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self, owner: &OwnerScope) -> Result<Vec<SearchRecord>> {
        let all = self.read_all()?;
        let total = all.len();
        let owned: Vec<SearchRecord> = all.into_iter().filter(|r| owner.matches(r)).collect();

        tracing::debug!(
            source = %self.name(),
            total,
            owned = owned.len(),
            child = ?owner.child_name,
            "Fetched records"
        );
        Ok(owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const RECORDS: &str = r#"[
        {"query": "a", "userId": "u1", "childName": "Maya"},
        {"query": "b", "userId": {"_id": "u1"}, "childName": "  maya "},
        {"query": "c", "userId": {"_id": {"$oid": "u1"}}, "childName": "Sam"},
        {"query": "d", "userId": "u2", "childName": "Maya"},
        {"query": "e", "childName": "Maya"},
        42
    ]"#;

    #[test]
    fn test_fetch_filters_by_owner() {
        let file = write_file(RECORDS);
        let source = JsonFileSource::new(file.path());

        let all = source.fetch(&OwnerScope::new("u1")).unwrap();
        let queries: Vec<_> = all.iter().map(|r| r.query.as_str()).collect();
        assert_eq!(queries, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_fetch_filters_by_child_case_insensitively() {
        let file = write_file(RECORDS);
        let source = JsonFileSource::new(file.path());

        let maya = source
            .fetch(&OwnerScope::new("u1").with_child("MAYA"))
            .unwrap();
        let queries: Vec<_> = maya.iter().map(|r| r.query.as_str()).collect();
        assert_eq!(queries, vec!["a", "b"]);

        let blank = source.fetch(&OwnerScope::new("u1").with_child(" ")).unwrap();
        assert_eq!(blank.len(), 3);
    }

    #[test]
    fn test_non_array_file_is_source_error() {
        let file = write_file(r#"{"query": "a"}"#);
        let err = JsonFileSource::new(file.path()).read_all().unwrap_err();
        assert!(matches!(err, Error::Source(_)));

        let file = write_file("not json");
        let err = JsonFileSource::new(file.path()).read_all().unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonFileSource::new(dir.path().join("missing.json"));
        assert!(matches!(source.read_all(), Err(Error::Io(_))));
    }
}
