use anyhow::{Context, Result};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::model::{Requester, Task, Version};

use super::{RecordStore, write_document};

impl RecordStore {
    pub fn upsert_task(&mut self, task: Task) -> Result<()> {
        self.ensure_open()?;
        write_document(&self.task_path(&task.id), &task)
            .with_context(|| format!("write task {}", task.id))?;
        self.tasks.insert(task.id.clone(), task);
        Ok(())
    }

    pub fn find_task(&self, task_id: &str) -> Option<Task> {
        self.tasks.get(task_id).cloned()
    }

    /// The mainline task a patch task was diffed against: same project, variant
    /// and display name, at the patch's base revision.
    pub fn find_task_on_base_commit(&self, patch: &Task) -> Option<Task> {
        self.latest_task(|t| {
            t.requester == Requester::Mainline
                && t.project == patch.project
                && t.build_variant == patch.build_variant
                && t.display_name == patch.display_name
                && t.revision == patch.revision
        })
    }

    /// Most recently created task named `display_name` on `variant` in `version`.
    pub fn find_variant_task(
        &self,
        version: &str,
        variant: &str,
        display_name: &str,
    ) -> Option<Task> {
        self.latest_task(|t| {
            t.version == version && t.build_variant == variant && t.display_name == display_name
        })
    }

    fn latest_task(&self, pred: impl Fn(&Task) -> bool) -> Option<Task> {
        self.tasks
            .values()
            .filter(|t| pred(t))
            .max_by(|a, b| {
                let key = |t: &Task| OffsetDateTime::parse(&t.create_time, &Rfc3339).ok();
                key(a)
                    .cmp(&key(b))
                    .then_with(|| a.create_time.cmp(&b.create_time))
                    .then_with(|| a.id.cmp(&b.id))
            })
            .cloned()
    }

    pub fn upsert_version(&mut self, version: Version) -> Result<()> {
        self.ensure_open()?;
        write_document(&self.version_path(&version.id), &version)
            .with_context(|| format!("write version {}", version.id))?;
        self.versions.insert(version.id.clone(), version);
        Ok(())
    }

    pub fn find_version(&self, version_id: &str) -> Option<Version> {
        self.versions.get(version_id).cloned()
    }
}
