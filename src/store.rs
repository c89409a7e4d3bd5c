//! On-disk document store for task records and the host's task/version documents.
//!
//! Every document is a JSON file written with temp-file-then-rename, so a single
//! upsert is atomic. Operations that touch several documents (tag updates) are
//! not: a failure partway through leaves the already-rewritten documents in place.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::model::{RecordId, Task, TaskJson, Version};

mod host_docs;
mod query;
mod records;

pub use self::query::{OrderBound, RecordQuery, Sort, TagFilter};

const RECORDS_DIR: &str = "records";
const TASKS_DIR: &str = "tasks";
const VERSIONS_DIR: &str = "versions";

pub struct RecordStore {
    root: PathBuf,
    open: bool,

    // Ordered by record id; this is the "natural" order of unsorted queries.
    records: BTreeMap<RecordId, TaskJson>,
    tasks: HashMap<String, Task>,
    versions: HashMap<String, Version>,
}

impl RecordStore {
    /// Open (creating if needed) a store rooted at `root` and load every document.
    pub fn open(root: &Path) -> Result<Self> {
        for dir in [RECORDS_DIR, TASKS_DIR, VERSIONS_DIR] {
            fs::create_dir_all(root.join(dir))
                .with_context(|| format!("create {} dir", root.join(dir).display()))?;
        }

        let records = load_documents::<TaskJson>(&root.join(RECORDS_DIR))
            .context("load records")?
            .into_iter()
            .map(|r| (r.id(), r))
            .collect();
        let tasks = load_documents::<Task>(&root.join(TASKS_DIR))
            .context("load tasks")?
            .into_iter()
            .map(|t| (t.id.clone(), t))
            .collect();
        let versions = load_documents::<Version>(&root.join(VERSIONS_DIR))
            .context("load versions")?
            .into_iter()
            .map(|v| (v.id.clone(), v))
            .collect();

        let store = Self {
            root: root.to_path_buf(),
            open: true,
            records,
            tasks,
            versions,
        };
        tracing::info!(
            root = %store.root.display(),
            records = store.records.len(),
            tasks = store.tasks.len(),
            versions = store.versions.len(),
            "record store opened"
        );
        Ok(store)
    }

    /// Flush every document and refuse further writes.
    pub fn close(&mut self) -> Result<()> {
        if !self.open {
            return Ok(());
        }
        for record in self.records.values() {
            write_document(&self.record_path(&record.id()), record)?;
        }
        for task in self.tasks.values() {
            write_document(&self.task_path(&task.id), task)?;
        }
        for version in self.versions.values() {
            write_document(&self.version_path(&version.id), version)?;
        }
        self.open = false;
        tracing::info!(root = %self.root.display(), "record store closed");
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_open(&self) -> Result<()> {
        if !self.open {
            return Err(anyhow!("record store at {} is closed", self.root.display()));
        }
        Ok(())
    }

    fn record_path(&self, id: &RecordId) -> PathBuf {
        self.root
            .join(RECORDS_DIR)
            .join(format!("{}.json", id.as_str()))
    }

    fn task_path(&self, task_id: &str) -> PathBuf {
        self.root.join(TASKS_DIR).join(format!("{}.json", task_id))
    }

    fn version_path(&self, version_id: &str) -> PathBuf {
        self.root
            .join(VERSIONS_DIR)
            .join(format!("{}.json", version_id))
    }
}

fn load_documents<T: DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry.context("read dir entry")?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let bytes = fs::read(&path).with_context(|| format!("read {}", path.display()))?;
        let doc = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse {}", path.display()))?;
        out.push(doc);
    }
    Ok(out)
}

fn write_document<T: Serialize>(path: &Path, doc: &T) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(doc).context("serialize document")?;
    write_atomic(path, &bytes)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
