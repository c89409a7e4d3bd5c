use std::collections::BTreeSet;

use anyhow::{Context, Result};

use crate::model::TaskJson;

use super::{RecordQuery, RecordStore, write_document};

impl RecordStore {
    /// Insert or replace the record keyed by `(task_id, name)`.
    pub fn upsert(&mut self, record: TaskJson) -> Result<()> {
        self.ensure_open()?;
        let id = record.id();
        write_document(&self.record_path(&id), &record)
            .with_context(|| format!("write record {}/{}", record.task_id, record.name))?;
        self.records.insert(id, record);
        Ok(())
    }

    pub fn find_all(&self, query: &RecordQuery) -> Vec<TaskJson> {
        query.apply(self.records.values())
    }

    pub fn find_one(&self, query: &RecordQuery) -> Option<TaskJson> {
        query.clone().limit(1).apply(self.records.values()).pop()
    }

    /// Set `tag` on every record of `(version_id, name)`; returns how many changed.
    pub fn set_tag(&mut self, version_id: &str, name: &str, tag: &str) -> Result<usize> {
        self.update_tags(version_id, name, Some(tag))
    }

    /// Remove the tag from every record of `(version_id, name)`.
    pub fn clear_tag(&mut self, version_id: &str, name: &str) -> Result<usize> {
        self.update_tags(version_id, name, None)
    }

    // Documents are rewritten one at a time; an error leaves earlier ones updated.
    fn update_tags(&mut self, version_id: &str, name: &str, tag: Option<&str>) -> Result<usize> {
        self.ensure_open()?;
        let query = RecordQuery::new().version(version_id).name(name);
        let ids: Vec<_> = self
            .records
            .iter()
            .filter(|(_, r)| query.matches(r))
            .map(|(id, _)| id.clone())
            .collect();

        let mut updated = 0;
        for id in ids {
            let path = self.record_path(&id);
            let Some(record) = self.records.get_mut(&id) else {
                continue;
            };
            let mut next = record.clone();
            next.tag = tag.map(str::to_string);
            write_document(&path, &next)
                .with_context(|| format!("write tag for {}/{}", next.task_id, next.name))?;
            *record = next;
            updated += 1;
        }
        Ok(updated)
    }

    /// Distinct non-empty tags used anywhere in `project_id`, sorted.
    pub fn distinct_tags(&self, project_id: &str) -> Vec<String> {
        let query = RecordQuery::new().project(project_id).tagged();
        self.records
            .values()
            .filter(|r| query.matches(r))
            .filter_map(|r| r.tag.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
