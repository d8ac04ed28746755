/// Metadata the queue tool reports for one job. Every field is optional:
/// the tool's output layout has shifted between releases, and a slow or
/// unreachable tool yields nothing at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobInfo {
    pub command: Option<String>,
    pub working_dir: Option<String>,
    pub slots: Option<u32>,
    pub enqueue_time: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub run_seconds: Option<f64>,
    pub exit_status: Option<String>,
}

/// Parses the `Label: value` lines of a job-info listing. Unrecognized and
/// blank lines are ignored, so field order and extra output never matter.
pub fn parse(raw: &str) -> JobInfo {
    let mut info = JobInfo::default();

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(v) = label_value(line, "Command") {
            info.command = Some(v.to_string());
        } else if let Some(v) =
            label_value(line, "Working directory").or_else(|| label_value(line, "Working dir"))
        {
            info.working_dir = Some(v.to_string());
        } else if let Some(v) = label_value(line, "Slots required") {
            info.slots = v.parse().ok();
        } else if let Some(v) = label_value(line, "Enqueue time") {
            info.enqueue_time = Some(v.to_string());
        } else if let Some(v) = label_value(line, "Start time") {
            info.start_time = Some(v.to_string());
        } else if let Some(v) = label_value(line, "End time") {
            info.end_time = Some(v.to_string());
        } else if let Some(v) = label_value(line, "Time run") {
            info.run_seconds = parse_seconds(v);
        } else if let Some(v) = label_value(line, "Exit status") {
            info.exit_status = Some(v.to_string());
        }
    }

    info
}

fn label_value<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.strip_prefix(label)?.strip_prefix(':').map(str::trim)
}

/// The running time carries a trailing unit (`10.02s`); strip any trailing
/// alphabetic characters before parsing.
fn parse_seconds(value: &str) -> Option<f64> {
    value
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_alphabetic())
        .trim()
        .parse()
        .ok()
}
