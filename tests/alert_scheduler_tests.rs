mod common;
use chrono::Duration;
use common::{base_time, project};
use projectflow::core::alerts::AlertScheduler;
use projectflow::core::clock::{Clock, FixedClock};
use projectflow::core::notify::Notifier;
use projectflow::errors::{AppError, AppResult};
use projectflow::models::communication::EmailPayload;
use projectflow::models::status::ProjectStatus;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::thread;

/// Records every payload it is asked to send.
#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<EmailPayload>>,
}

impl RecordingNotifier {
    fn sent(&self) -> Vec<EmailPayload> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn send(&self, payload: &EmailPayload) -> AppResult<()> {
        self.sent.lock().unwrap().push(payload.clone());
        Ok(())
    }
}

/// Fails for the listed recipients, records the rest.
struct FlakyNotifier {
    failing: HashSet<String>,
    inner: RecordingNotifier,
}

impl Notifier for FlakyNotifier {
    fn send(&self, payload: &EmailPayload) -> AppResult<()> {
        if self.failing.contains(&payload.to) {
            return Err(AppError::Notify(format!("mailbox {} unavailable", payload.to)));
        }
        self.inner.send(payload)
    }
}

fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(base_time()))
}

#[test]
fn alerts_each_expiring_project_once_across_passes() {
    let clock = fixed_clock();
    let scheduler = AlertScheduler::new(clock.clone(), "manager@flow.com");
    let notifier = RecordingNotifier::default();

    let projects = vec![
        project("soon", -10, 5).with_manager("lead@flow.test"),
        project("later", -10, 40),
        project("late", -30, -2),
        project("edge", -10, 15),
    ];

    for _ in 0..5 {
        scheduler.run_pass(&projects, &notifier);
    }

    let sent = notifier.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, "lead@flow.test");
    assert_eq!(sent[1].to, "manager@flow.com");
    assert!(scheduler.is_alerted("soon"));
    assert!(scheduler.is_alerted("edge"));
    assert!(!scheduler.is_alerted("later"));
    assert!(!scheduler.is_alerted("late"));
    assert_eq!(scheduler.record().len(), 2);
}

#[test]
fn pass_report_lists_sent_and_already_alerted() {
    let scheduler = AlertScheduler::new(fixed_clock(), "manager@flow.com");
    let notifier = RecordingNotifier::default();
    let projects = vec![project("a", 0, 3), project("b", 0, 90)];

    let first = scheduler.run_pass(&projects, &notifier);
    assert_eq!(first.evaluated, 2);
    assert_eq!(first.sent.len(), 1);
    assert_eq!(first.sent[0].project_id, "a");
    assert_eq!(first.sent[0].days_left, 3);
    assert!(first.already_alerted.is_empty());
    assert_eq!(first.now, base_time());

    let second = scheduler.run_pass(&projects, &notifier);
    assert!(second.sent.is_empty());
    assert_eq!(second.already_alerted, vec!["a".to_string()]);
}

#[test]
fn alert_message_names_project_and_days() {
    let scheduler = AlertScheduler::new(fixed_clock(), "manager@flow.com");
    let notifier = RecordingNotifier::default();
    let p = project("a", 0, 7)
        .with_client("Acme Corp", "ops@acme.test", "")
        .with_status(ProjectStatus::AtRisk)
        .with_progress(35.0);

    scheduler.run_pass(&[p], &notifier);

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].subject,
        "⚠️ Action Required: \"Project a\" Expires in 7 Days"
    );
    assert!(sent[0].body.contains("Acme Corp"));
    assert!(sent[0].body.contains("2025-06-08"));
    assert!(sent[0].body.contains("At Risk"));
    assert!(sent[0].body.contains("35%"));
}

#[test]
fn failed_send_is_retried_on_next_pass() {
    let scheduler = AlertScheduler::new(fixed_clock(), "manager@flow.com");
    let projects = vec![
        project("ok", 0, 4).with_manager("ok@flow.test"),
        project("down", 0, 6).with_manager("down@flow.test"),
    ];

    let flaky = FlakyNotifier {
        failing: HashSet::from(["down@flow.test".to_string()]),
        inner: RecordingNotifier::default(),
    };

    let report = scheduler.run_pass(&projects, &flaky);
    assert_eq!(report.sent.len(), 1);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].project_id, "down");
    assert!(report.failed[0].reason.contains("unavailable"));
    assert!(!scheduler.is_alerted("down"));

    // mailbox is back
    let healthy = RecordingNotifier::default();
    let report = scheduler.run_pass(&projects, &healthy);
    assert_eq!(report.sent.len(), 1);
    assert_eq!(report.sent[0].project_id, "down");
    assert_eq!(report.already_alerted, vec!["ok".to_string()]);
    assert!(scheduler.is_alerted("down"));
}

#[test]
fn expiring_then_overdue_does_not_realert() {
    let clock = fixed_clock();
    let scheduler = AlertScheduler::new(clock.clone(), "manager@flow.com");
    let notifier = RecordingNotifier::default();
    let projects = vec![project("a", -10, 2)];

    scheduler.run_pass(&projects, &notifier);
    assert_eq!(notifier.sent().len(), 1);

    // now overdue
    clock.advance(Duration::days(5));
    let report = scheduler.run_pass(&projects, &notifier);
    assert!(report.sent.is_empty());
    assert!(report.already_alerted.is_empty());
    assert_eq!(notifier.sent().len(), 1);
}

#[test]
fn project_entering_window_later_is_alerted_then() {
    let clock = fixed_clock();
    let scheduler = AlertScheduler::new(clock.clone(), "manager@flow.com");
    let notifier = RecordingNotifier::default();
    let projects = vec![project("a", 0, 20)];

    assert!(scheduler.run_pass(&projects, &notifier).sent.is_empty());

    clock.advance(Duration::days(6));
    assert_eq!(scheduler.run_pass(&projects, &notifier).sent.len(), 1);
}

#[test]
fn pass_reads_the_clock_once() {
    let clock = fixed_clock();
    let scheduler = AlertScheduler::new(clock.clone(), "manager@flow.com");
    let notifier = RecordingNotifier::default();

    let report = scheduler.run_pass(&[project("a", 0, 1)], &notifier);
    assert_eq!(report.now, clock.now());
}

#[test]
fn overlapping_passes_send_at_most_once() {
    let scheduler = AlertScheduler::new(fixed_clock(), "manager@flow.com");
    let notifier = RecordingNotifier::default();
    let projects: Vec<_> = (0..20)
        .map(|i| project(&format!("p{i}"), -5, 1 + (i % 15)))
        .collect();

    thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                scheduler.run_pass(&projects, &notifier);
            });
        }
    });

    let sent = notifier.sent();
    assert_eq!(sent.len(), 20);

    let mut subjects: Vec<_> = sent.iter().map(|p| p.subject.clone()).collect();
    subjects.sort();
    subjects.dedup();
    assert_eq!(subjects.len(), 20);
    assert_eq!(scheduler.record().len(), 20);
}
