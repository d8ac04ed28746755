pub mod ts;

use anyhow::Result;

pub use ts::TsQueue;

/// Narrow seam over the external job-queue tool: one call for the current
/// queue depth, one for a job's free-text metadata.
pub trait QueueInspector {
    fn queued_count(&self) -> Result<u32>;
    fn job_details(&self, job_id: &str) -> Result<String>;
}
