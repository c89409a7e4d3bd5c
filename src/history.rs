//! Ordered history of a dataset around a reference task.

use anyhow::{Result, anyhow};

use crate::model::{Task, TaskJson};
use crate::store::{OrderBound, RecordQuery, RecordStore, Sort};

/// Records returned on each side of the pivot.
pub const HISTORY_WINDOW: usize = 100;

/// Up to [`HISTORY_WINDOW`] mainline records at or before the reference
/// task's commit and up to as many after it, ascending by `order`.
///
/// When `reference` is a patch task the pivot is its base commit, and the
/// patch's own record takes the place of the base commit's entry. Returns
/// `Ok(None)` when the patch has no record for `name`.
pub fn assemble_history(
    store: &RecordStore,
    reference: &Task,
    task_name: &str,
    name: &str,
) -> Result<Option<Vec<TaskJson>>> {
    let base = if reference.is_patch() {
        let base = store.find_task_on_base_commit(reference).ok_or_else(|| {
            anyhow!(
                "no base commit task for patch task {} (revision {})",
                reference.id,
                reference.revision
            )
        })?;
        Some(base)
    } else {
        None
    };
    let pivot = base.as_ref().map_or(reference.order, |b| b.order);

    let scope = RecordQuery::new()
        .project(&reference.project)
        .variant(&reference.build_variant)
        .task_name(task_name)
        .name(name)
        .mainline_only();

    // Sorted backwards so the limit keeps the records closest to the pivot.
    let mut history = store.find_all(
        &scope
            .clone()
            .order(OrderBound::AtMost(pivot))
            .sort(Sort::OrderDescending)
            .limit(HISTORY_WINDOW),
    );
    history.reverse();

    history.extend(
        store.find_all(
            &scope
                .order(OrderBound::After(pivot))
                .sort(Sort::OrderAscending)
                .limit(HISTORY_WINDOW),
        ),
    );

    if let Some(base) = base {
        let own = store.find_one(&RecordQuery::new().task_id(&reference.id).name(name));
        let Some(own) = own else {
            return Ok(None);
        };
        splice_patch_record(&mut history, &base.revision, own);
    }

    Ok(Some(history))
}

/// Replace every entry at `base_revision` with `patch`, or append it when the
/// base commit has no entry in the window.
pub fn splice_patch_record(history: &mut Vec<TaskJson>, base_revision: &str, patch: TaskJson) {
    let mut replaced = false;
    for entry in history.iter_mut().filter(|r| r.revision == base_revision) {
        *entry = patch.clone();
        replaced = true;
    }
    if !replaced {
        history.push(patch);
    }
}

#[cfg(test)]
#[path = "tests/history_tests.rs"]
mod tests;
