use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ids::RecordId;
use super::task::Task;

/// One uploaded dataset for one task.
///
/// The identifying fields are copied from the task at ingestion time so that
/// history queries never need to join against the task collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskJson {
    pub name: String,
    pub task_name: String,
    pub project_id: String,
    pub task_id: String,
    pub build_id: String,
    pub variant: String,
    pub version_id: String,
    pub create_time: String,
    pub is_patch: bool,
    pub order: i64,
    pub revision: String,
    pub data: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl TaskJson {
    pub fn from_task(task: &Task, name: &str, data: Map<String, Value>) -> Self {
        TaskJson {
            name: name.to_string(),
            task_name: task.display_name.clone(),
            project_id: task.project.clone(),
            task_id: task.id.clone(),
            build_id: task.build_id.clone(),
            variant: task.build_variant.clone(),
            version_id: task.version.clone(),
            create_time: task.create_time.clone(),
            is_patch: task.is_patch(),
            order: task.order,
            revision: task.revision.clone(),
            data,
            tag: None,
        }
    }

    pub fn id(&self) -> RecordId {
        RecordId::for_task(&self.task_id, &self.name)
    }

    pub fn has_tag(&self) -> bool {
        self.tag.as_deref().is_some_and(|t| !t.is_empty())
    }
}
