//! Tests for search debouncing.

use std::time::Duration;

use datatable_lib::debounce::{Debounce, SearchDebouncer};
use tokio::sync::mpsc::error::TryRecvError;
use tokio::time::{Instant, advance, sleep};

const DELAY: Duration = Duration::from_millis(300);

#[test]
fn test_debounce_releases_last_value_after_quiet_period() {
    let t0 = Instant::now();
    let mut debounce = Debounce::new(DELAY);

    debounce.push("a", t0);
    debounce.push("ab", t0 + Duration::from_millis(50));
    assert_eq!(debounce.poll(t0 + Duration::from_millis(349)), None);
    assert_eq!(debounce.deadline(), Some(t0 + Duration::from_millis(350)));
    assert_eq!(debounce.poll(t0 + Duration::from_millis(350)), Some("ab"));
    assert!(!debounce.is_pending());
    assert_eq!(debounce.poll(t0 + Duration::from_secs(5)), None);
}

#[test]
fn test_debounce_cancel_drops_value() {
    let t0 = Instant::now();
    let mut debounce = Debounce::new(DELAY);
    debounce.push("draft".to_string(), t0);
    assert_eq!(debounce.cancel().as_deref(), Some("draft"));
    assert_eq!(debounce.poll(t0 + DELAY), None);
}

#[tokio::test(start_paused = true)]
async fn test_debouncer_coalesces_keystrokes() {
    let start = Instant::now();
    let (debouncer, mut settled) = SearchDebouncer::spawn(DELAY);

    for term in ["a", "ab", "abc", "abcd"] {
        debouncer.input(term);
        sleep(Duration::from_millis(50)).await;
    }

    let term = settled.recv().await;
    assert_eq!(term.as_deref(), Some("abcd"));
    // Last keystroke at 150 ms plus the quiet period.
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(450), "settled early: {elapsed:?}");
    assert!(elapsed < Duration::from_millis(460), "settled late: {elapsed:?}");

    advance(Duration::from_secs(2)).await;
    assert_eq!(settled.try_recv(), Err(TryRecvError::Empty));
}

#[tokio::test(start_paused = true)]
async fn test_debouncer_emits_each_settled_term() {
    let (debouncer, mut settled) = SearchDebouncer::spawn(DELAY);

    debouncer.input("queue");
    assert_eq!(settled.recv().await.as_deref(), Some("queue"));

    debouncer.input("queued");
    assert_eq!(settled.recv().await.as_deref(), Some("queued"));
}

#[tokio::test(start_paused = true)]
async fn test_dropping_debouncer_discards_pending_term() {
    let (debouncer, mut settled) = SearchDebouncer::spawn(DELAY);
    debouncer.input("half-typed");
    sleep(Duration::from_millis(100)).await;

    drop(debouncer);

    assert_eq!(settled.recv().await, None);
}
