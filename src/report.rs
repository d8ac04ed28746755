use crate::{job_info::JobInfo, ranges};

/// Rendered for fields the queue tool never reported.
pub const MISSING: &str = "(unavailable)";

pub const SIGNATURE: &str = "--\nts-notify";

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub subject: String,
    pub body: String,
}

/// Hostname and finish time are supplied by the caller so that building a
/// report stays a pure mapping.
pub struct ReportInput<'a> {
    pub job_id: &'a str,
    pub exit_code: &'a str,
    pub command: &'a str,
    pub info: &'a JobInfo,
    pub queued: Option<u32>,
    pub hostname: &'a str,
    pub finished_at: &'a str,
}

pub fn build(input: &ReportInput) -> Report {
    let command = ranges::compress_command(input.command);

    let queued_label = match input.queued {
        Some(n) => n.to_string(),
        None => "?".to_string(),
    };
    let jobs_word = if input.queued == Some(1) { "job" } else { "jobs" };

    let subject = format!(
        "[TS] finished job #{} - {} left - {}",
        input.job_id, queued_label, input.hostname
    );

    let marker = if input.exit_code != "0" {
        "  Error occurred!"
    } else {
        ""
    };

    let info = input.info;
    let enqueue = field(&info.enqueue_time);
    let start = field(&info.start_time);
    let cwd = field(&info.working_dir);
    let slots = match info.slots {
        Some(n) => n.to_string(),
        None => MISSING.to_string(),
    };
    let time_run = match info.run_seconds {
        Some(secs) => format!("{}s  ({})", secs, human_duration(secs)),
        None => MISSING.to_string(),
    };

    let body = format!(
        "Enqueue time: {enqueue}  (slots: {slots})\n\
         Start time: {start}\n\
         Finish time: {finished}\n\
         Time run: {time_run}\n\
         {queued_label} {jobs_word} left\n\
         \n\
         Exit status: {exit}{marker}\n\
         Host: {host}\n\
         CWD: {cwd}\n\
         Command: {command}\n\
         \n\
         {SIGNATURE}\n",
        finished = input.finished_at,
        exit = input.exit_code,
        host = input.hostname,
    );

    Report { subject, body }
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(MISSING)
}

/// `H:MM:SS`, with a `N day(s), ` prefix past 24 hours and six fractional
/// digits when the value isn't whole.
pub fn human_duration(seconds: f64) -> String {
    let total_micros = (seconds.max(0.0) * 1e6).round() as u64;
    let micros = total_micros % 1_000_000;
    let whole = total_micros / 1_000_000;

    let days = whole / 86_400;
    let hours = (whole % 86_400) / 3_600;
    let minutes = (whole % 3_600) / 60;
    let secs = whole % 60;

    let mut out = String::new();
    if days == 1 {
        out.push_str("1 day, ");
    } else if days > 1 {
        out.push_str(&format!("{days} days, "));
    }
    out.push_str(&format!("{hours}:{minutes:02}:{secs:02}"));
    if micros > 0 {
        out.push_str(&format!(".{micros:06}"));
    }
    out
}
