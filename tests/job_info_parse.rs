use ts_notify::job_info::{parse, JobInfo};

const FULL_LISTING: &str = "\
Exit status: died with exit code 0
Command: run.sh ::: 1 2 3 4 5
Working directory: /home/worker/exp
Slots required: 2
Enqueue time: Thu Mar 25 16:18:33 2021
Start time: Thu Mar 25 16:18:34 2021
End time: Thu Mar 25 16:18:44 2021
Time run: 10.0222s
";

#[test]
fn full_listing_parses_every_field() {
    let info = parse(FULL_LISTING);
    assert_eq!(info.command.as_deref(), Some("run.sh ::: 1 2 3 4 5"));
    assert_eq!(info.working_dir.as_deref(), Some("/home/worker/exp"));
    assert_eq!(info.slots, Some(2));
    assert_eq!(info.enqueue_time.as_deref(), Some("Thu Mar 25 16:18:33 2021"));
    assert_eq!(info.start_time.as_deref(), Some("Thu Mar 25 16:18:34 2021"));
    assert_eq!(info.end_time.as_deref(), Some("Thu Mar 25 16:18:44 2021"));
    assert_eq!(info.run_seconds, Some(10.0222));
    assert_eq!(info.exit_status.as_deref(), Some("died with exit code 0"));
}

#[test]
fn line_order_does_not_matter() {
    let reordered = "\
Time run: 1.5s
Enqueue time: yesterday
Exit status: ok
";
    let info = parse(reordered);
    assert_eq!(info.run_seconds, Some(1.5));
    assert_eq!(info.enqueue_time.as_deref(), Some("yesterday"));
    assert_eq!(info.exit_status.as_deref(), Some("ok"));
}

#[test]
fn short_listing_leaves_fields_absent() {
    let info = parse("Command: sleep 10\n");
    assert_eq!(info.command.as_deref(), Some("sleep 10"));
    assert_eq!(info.slots, None);
    assert_eq!(info.run_seconds, None);
    assert_eq!(info.working_dir, None);
}

#[test]
fn empty_input_is_all_absent() {
    assert_eq!(parse(""), JobInfo::default());
    assert_eq!(parse("\n\n"), JobInfo::default());
}

#[test]
fn unknown_labels_and_prefix_collisions_are_ignored() {
    let info = parse("Environment:\nCommand line: not this\nSomething: else\n");
    assert_eq!(info, JobInfo::default());
}

#[test]
fn working_dir_short_label_is_accepted() {
    let info = parse("Working dir: /tmp/x\n");
    assert_eq!(info.working_dir.as_deref(), Some("/tmp/x"));
}

#[test]
fn run_time_unit_suffix_is_stripped() {
    assert_eq!(parse("Time run: 0.5s\n").run_seconds, Some(0.5));
    assert_eq!(parse("Time run: 42s\n").run_seconds, Some(42.0));
}

#[test]
fn malformed_numbers_become_absent() {
    let info = parse("Slots required: many\nTime run: forever\n");
    assert_eq!(info.slots, None);
    assert_eq!(info.run_seconds, None);
}
