mod common;
use chrono::Duration;
use common::{base_time, project};
use projectflow::core::clock::FixedClock;
use projectflow::core::notify::Notifier;
use projectflow::core::session::Session;
use projectflow::core::store::{ProjectStore, StoreEvent};
use projectflow::errors::AppResult;
use projectflow::models::communication::EmailPayload;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct CountingNotifier {
    count: Mutex<usize>,
}

impl CountingNotifier {
    fn count(&self) -> usize {
        *self.count.lock().unwrap()
    }
}

impl Notifier for CountingNotifier {
    fn send(&self, _payload: &EmailPayload) -> AppResult<()> {
        *self.count.lock().unwrap() += 1;
        Ok(())
    }
}

#[test]
fn replace_and_append_bump_revision() {
    let mut store = ProjectStore::new();
    assert!(store.is_empty());
    assert_eq!(store.revision(), 0);

    let ev = store.replace(vec![project("a", 0, 10)]);
    assert_eq!(
        ev,
        StoreEvent::Replaced {
            revision: 1,
            count: 1
        }
    );

    let ev = store.append(vec![project("b", 0, 10), project("c", 0, 10)]);
    assert_eq!(
        ev,
        StoreEvent::Replaced {
            revision: 2,
            count: 3
        }
    );

    let ids: Vec<_> = store.projects().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
    assert!(store.find("b").is_some());
    assert!(store.find("zzz").is_none());
}

#[test]
fn each_store_event_triggers_one_pass() {
    let clock = Arc::new(FixedClock::new(base_time()));
    let notifier = CountingNotifier::default();
    let mut session = Session::start(clock.clone(), "manager@flow.com");
    let mut store = ProjectStore::new();

    let ev = store.replace(vec![project("a", -3, 4)]);
    session.on_store_event(ev, &store, &notifier);
    assert_eq!(notifier.count(), 1);
    assert_eq!(session.last_revision(), Some(1));

    // same project again plus a new expiring one
    let ev = store.append(vec![project("b", -3, 9)]);
    let report = session.on_store_event(ev, &store, &notifier);
    assert_eq!(report.sent.len(), 1);
    assert_eq!(report.already_alerted, vec!["a".to_string()]);
    assert_eq!(notifier.count(), 2);

    // nothing new
    let ev = store.replace(store.projects().to_vec());
    session.on_store_event(ev, &store, &notifier);
    assert_eq!(notifier.count(), 2);

    let summary = session.end();
    assert_eq!(summary.passes, 3);
    assert_eq!(summary.alerts_sent, 2);
    assert_eq!(summary.alerts_failed, 0);
    assert_eq!(summary.started_at, base_time());
}

#[test]
fn new_session_starts_with_empty_record() {
    let clock = Arc::new(FixedClock::new(base_time()));
    let notifier = CountingNotifier::default();
    let mut store = ProjectStore::new();
    store.replace(vec![project("a", 0, 5)]);

    let mut first = Session::start(clock.clone(), "manager@flow.com");
    first.observe(&store, &notifier);
    first.observe(&store, &notifier);
    assert_eq!(notifier.count(), 1);
    first.end();

    let mut second = Session::start(clock.clone(), "manager@flow.com");
    assert!(!second.scheduler().is_alerted("a"));
    second.observe(&store, &notifier);
    assert_eq!(notifier.count(), 2);
}

#[test]
fn session_uses_the_shared_clock() {
    let clock = Arc::new(FixedClock::new(base_time()));
    let notifier = CountingNotifier::default();
    let mut store = ProjectStore::new();
    store.replace(vec![project("a", 0, 30)]);

    let mut session = Session::start(clock.clone(), "manager@flow.com");
    assert!(session.observe(&store, &notifier).sent.is_empty());

    clock.set(base_time() + Duration::days(20));
    assert_eq!(session.observe(&store, &notifier).sent.len(), 1);
}
