//! Records grouped by version, and the latest version per project.

use std::collections::BTreeMap;

use crate::model::{CommitInfo, TaskJson, VersionData};
use crate::store::{RecordQuery, RecordStore, Sort};

/// Branch name to the projects tracked on that branch.
pub type BranchProjects = BTreeMap<String, Vec<String>>;

/// Every record of `(version_id, name)` in store order; `None` if there are none.
pub fn tasks_for_version(store: &RecordStore, version_id: &str, name: &str) -> Option<Vec<TaskJson>> {
    let records = store.find_all(&RecordQuery::new().version(version_id).name(name));
    if records.is_empty() {
        return None;
    }
    Some(records)
}

/// For each project, the records of its highest-ordered version of `name` and
/// that version's commit metadata.
///
/// Returns `None` as soon as any project lacks a record, its version lacks
/// records, or the version document is missing; no branch is reported then.
pub fn latest_versions(
    store: &RecordStore,
    branches: &BranchProjects,
    name: &str,
) -> Option<BTreeMap<String, Vec<VersionData>>> {
    let mut out = BTreeMap::new();
    for (branch, projects) in branches {
        let mut entries = Vec::with_capacity(projects.len());
        for project in projects {
            let latest = store.find_one(
                &RecordQuery::new()
                    .project(project)
                    .name(name)
                    .sort(Sort::OrderDescending),
            )?;
            if latest.version_id.is_empty() {
                return None;
            }
            let json_tasks = tasks_for_version(store, &latest.version_id, name)?;
            let version = store.find_version(&latest.version_id)?;
            entries.push(VersionData {
                json_tasks,
                commit_info: CommitInfo::from_version(&version),
            });
        }
        out.insert(branch.clone(), entries);
    }
    Some(out)
}

#[cfg(test)]
#[path = "tests/versions_tests.rs"]
mod tests;
