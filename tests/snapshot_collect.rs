use anyhow::{anyhow, Result};
use ts_notify::{
    queue::QueueInspector,
    report::{build, ReportInput, MISSING},
    snapshot,
};

struct FakeQueue {
    depth: Option<u32>,
    details: Option<&'static str>,
}

impl QueueInspector for FakeQueue {
    fn queued_count(&self) -> Result<u32> {
        self.depth.ok_or_else(|| anyhow!("listing timed out"))
    }

    fn job_details(&self, _job_id: &str) -> Result<String> {
        self.details
            .map(str::to_string)
            .ok_or_else(|| anyhow!("info timed out"))
    }
}

#[test]
fn healthy_queue_yields_full_snapshot() {
    let queue = FakeQueue {
        depth: Some(3),
        details: Some("Enqueue time: noon\nSlots required: 1\nTime run: 2.5s\n"),
    };

    let snap = snapshot::collect(&queue, "7");
    assert_eq!(snap.queued, Some(3));
    assert_eq!(snap.info.enqueue_time.as_deref(), Some("noon"));
    assert_eq!(snap.info.slots, Some(1));
    assert_eq!(snap.info.run_seconds, Some(2.5));
}

#[test]
fn unreachable_queue_degrades_to_absent() {
    let queue = FakeQueue {
        depth: None,
        details: None,
    };

    let snap = snapshot::collect(&queue, "7");
    assert_eq!(snap.queued, None);
    assert_eq!(snap.info.enqueue_time, None);
    assert_eq!(snap.info.run_seconds, None);
}

#[test]
fn partial_outage_still_produces_a_report() {
    let queue = FakeQueue {
        depth: None,
        details: Some("Start time: 9am\n"),
    };

    let snap = snapshot::collect(&queue, "7");
    let report = build(&ReportInput {
        job_id: "7",
        exit_code: "0",
        command: "sleep 10",
        info: &snap.info,
        queued: snap.queued,
        hostname: "box",
        finished_at: "2021-01-01T00:00:00Z",
    });

    assert!(report.subject.contains("? left"));
    assert!(report.body.contains("Start time: 9am"));
    assert!(report.body.contains(&format!("Enqueue time: {MISSING}")));
}
