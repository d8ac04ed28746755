pub mod cli;
pub mod config;
pub mod job_info;
pub mod mailer;
pub mod queue;
pub mod ranges;
pub mod report;
pub mod snapshot;
pub mod util;
