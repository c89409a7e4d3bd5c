use serde::{Deserialize, Serialize};

use super::record::TaskJson;

/// A version document as the CI host stores it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Version {
    pub id: String,
    pub project: String,
    pub author: String,
    pub message: String,
    pub create_time: String,
    pub revision: String,
}

/// Commit metadata attached to each entry of a latest-version response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommitInfo {
    pub author: String,
    pub message: String,
    pub create_time: String,
    pub revision: String,
    pub version_id: String,
}

impl CommitInfo {
    pub fn from_version(version: &Version) -> Self {
        CommitInfo {
            author: version.author.clone(),
            message: version.message.clone(),
            create_time: version.create_time.clone(),
            revision: version.revision.clone(),
            version_id: version.id.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VersionData {
    pub json_tasks: Vec<TaskJson>,
    pub commit_info: CommitInfo,
}
