use serde::{Deserialize, Serialize};

/// Storage key of a record document.
///
/// Derived from `(task_id, name)`, so re-ingesting the same dataset for a task
/// lands on the same document.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn for_task(task_id: &str, name: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(task_id.as_bytes());
        hasher.update(b"\n");
        hasher.update(name.as_bytes());
        RecordId(hasher.finalize().to_hex().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
