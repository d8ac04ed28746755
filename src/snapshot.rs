use crate::{
    job_info::{self, JobInfo},
    queue::QueueInspector,
};
use tracing::{debug, warn};

/// What could be learned from the queue tool for one invocation. A slow or
/// failing tool leaves fields absent; the report renders placeholders.
#[derive(Debug, Clone, Default)]
pub struct JobSnapshot {
    pub queued: Option<u32>,
    pub info: JobInfo,
}

/// Queue depth first, then the job's metadata. Failures are logged and
/// degrade to absent data rather than aborting the notification.
pub fn collect(queue: &dyn QueueInspector, job_id: &str) -> JobSnapshot {
    let queued = match queue.queued_count() {
        Ok(n) => Some(n),
        Err(err) => {
            warn!("queue listing unavailable: {err:#}");
            None
        }
    };

    let info = match queue.job_details(job_id) {
        Ok(raw) => {
            let info = job_info::parse(&raw);
            debug!(?info, "parsed job details");
            info
        }
        Err(err) => {
            warn!("job details unavailable for {job_id}: {err:#}");
            JobInfo::default()
        }
    };

    JobSnapshot { queued, info }
}
