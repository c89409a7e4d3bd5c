mod ids;
mod record;
mod task;
mod version;

pub use self::ids::RecordId;
pub use self::record::TaskJson;
pub use self::task::{Requester, Task};
pub use self::version::{CommitInfo, Version, VersionData};
