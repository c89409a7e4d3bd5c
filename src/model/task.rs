use serde::{Deserialize, Serialize};

/// Why a version was created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requester {
    #[default]
    Mainline,
    Patch,
}

/// A task document as the CI host stores it.
///
/// For a patch task `revision` is the base commit the patch was diffed against.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub display_name: String,
    pub project: String,
    pub build_id: String,
    pub build_variant: String,
    pub version: String,
    pub create_time: String,
    pub revision: String,
    pub order: i64,

    #[serde(default)]
    pub requester: Requester,

    // Checked against the `Task-Secret` header when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

impl Task {
    pub fn is_patch(&self) -> bool {
        self.requester == Requester::Patch
    }
}
