use super::*;
use crate::preferences::MemoryPreferenceStore;

use async_trait::async_trait;
use model::presence::{GuildSummary, PresenceSnapshot};
use model::Snowflake;
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::atomic::AtomicUsize;
use tokio::sync::oneshot;
use tokio::time::sleep;

fn snapshot(guild_name: &str) -> PresenceSnapshot {
    PresenceSnapshot {
        guild_summary: Some(GuildSummary {
            id: Snowflake(1),
            name: guild_name.to_owned(),
            icon_ref: None,
        }),
        ..Default::default()
    }
}

fn guild_name(state: &ControllerState) -> Option<String> {
    state
        .current_snapshot
        .as_ref()
        .and_then(|snapshot| snapshot.guild_summary.as_ref())
        .map(|guild| guild.name.clone())
}

/// Lets spawned fetch and timer tasks run. Time is paused in these tests, so
/// this also advances the clock by a millisecond.
async fn settle() {
    sleep(Duration::from_millis(1)).await;
}

/// Succeeds immediately, counting calls.
#[derive(Clone, Default)]
struct CountingFetcher {
    calls: Arc<AtomicUsize>,
}

impl CountingFetcher {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SnapshotFetcher for CountingFetcher {
    async fn fetch(&self) -> Result<PresenceSnapshot> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(snapshot(&format!("fetch {}", n)))
    }
}

/// Each call waits for the test to release it through the matching sender,
/// in call order.
struct GatedFetcher {
    gates: Mutex<VecDeque<oneshot::Receiver<Result<PresenceSnapshot>>>>,
}

impl GatedFetcher {
    fn new(count: usize) -> (Self, Vec<oneshot::Sender<Result<PresenceSnapshot>>>) {
        let (senders, receivers): (Vec<_>, VecDeque<_>) =
            (0..count).map(|_| oneshot::channel()).unzip();

        let fetcher = GatedFetcher {
            gates: Mutex::new(receivers),
        };

        (fetcher, senders)
    }
}

#[async_trait]
impl SnapshotFetcher for GatedFetcher {
    async fn fetch(&self) -> Result<PresenceSnapshot> {
        let gate = self.gates.lock().pop_front();

        match gate {
            Some(gate) => gate
                .await
                .unwrap_or_else(|_| Error::InvalidCommand("gate dropped".to_owned()).into()),
            None => std::future::pending().await,
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_initial_fetch() {
    let fetcher = CountingFetcher::default();
    let controller = PollingController::start(fetcher.clone(), MemoryPreferenceStore::default());

    let state = controller.state();
    assert!(state.is_fetching);
    assert!(state.auto_refresh_enabled);
    assert_eq!(state.interval_millis, DEFAULT_INTERVAL_MILLIS);

    settle().await;

    let state = controller.state();
    assert_eq!(fetcher.calls(), 1);
    assert!(!state.is_fetching);
    assert_eq!(guild_name(&state).as_deref(), Some("fetch 1"));
    assert!(state.last_updated.is_some());
    assert_eq!(state.last_error, None);
}

#[tokio::test(start_paused = true)]
async fn test_superseded_fetch_is_discarded() {
    let (fetcher, mut gates) = GatedFetcher::new(2);
    let controller = PollingController::start(fetcher, MemoryPreferenceStore::default());
    controller.set_auto_refresh(false);
    settle().await;

    controller.trigger_refresh();
    settle().await;

    let second = gates.pop().unwrap();
    let first = gates.pop().unwrap();

    second.send(Ok(snapshot("second"))).unwrap();
    settle().await;

    // The first fetch was cancelled, so its late answer has nowhere to go
    let _ = first.send(Ok(snapshot("first")));
    settle().await;

    let state = controller.state();
    assert_eq!(guild_name(&state).as_deref(), Some("second"));
    assert!(!state.is_fetching);
    assert_eq!(state.last_error, None);
}

#[tokio::test(start_paused = true)]
async fn test_fetching_until_latest_settles() {
    let (fetcher, mut gates) = GatedFetcher::new(2);
    let controller = PollingController::start(fetcher, MemoryPreferenceStore::default());
    controller.set_auto_refresh(false);
    settle().await;

    controller.trigger_refresh();
    settle().await;

    assert!(controller.state().is_fetching);

    gates.pop().unwrap().send(Ok(snapshot("latest"))).unwrap();
    settle().await;

    assert!(!controller.state().is_fetching);
}

#[tokio::test(start_paused = true)]
async fn test_stale_generation_never_applies() {
    let (fetcher, _gates) = GatedFetcher::new(0);
    let controller = PollingController::start(fetcher, MemoryPreferenceStore::default());
    controller.set_auto_refresh(false);

    controller.trigger_refresh();
    let current = controller.inner.generation.load(Ordering::SeqCst);

    controller.inner.settle(current - 1, Ok(snapshot("stale")));
    controller
        .inner
        .settle(current - 1, Error::ResponseError(StatusCode::BAD_GATEWAY).into());

    let state = controller.state();
    assert!(state.current_snapshot.is_none());
    assert!(state.last_error.is_none());
    assert!(state.is_fetching);
}

#[tokio::test(start_paused = true)]
async fn test_failure_keeps_last_snapshot() {
    let (fetcher, mut gates) = GatedFetcher::new(3);
    gates.reverse();

    let controller = PollingController::start(fetcher, MemoryPreferenceStore::default());
    controller.set_auto_refresh(false);

    gates.pop().unwrap().send(Ok(snapshot("good"))).unwrap();
    settle().await;

    controller.trigger_refresh();
    gates
        .pop()
        .unwrap()
        .send(Error::ResponseError(StatusCode::SERVICE_UNAVAILABLE).into())
        .unwrap();
    settle().await;

    let state = controller.state();
    assert_eq!(guild_name(&state).as_deref(), Some("good"));
    assert_eq!(state.last_error.as_deref(), Some("HTTP 503"));
    assert!(!state.is_fetching);

    controller.trigger_refresh();
    gates.pop().unwrap().send(Ok(snapshot("recovered"))).unwrap();
    settle().await;

    let state = controller.state();
    assert_eq!(guild_name(&state).as_deref(), Some("recovered"));
    assert_eq!(state.last_error, None);
}

#[tokio::test(start_paused = true)]
async fn test_timer_fires_at_interval() {
    let fetcher = CountingFetcher::default();
    let _controller = PollingController::start(fetcher.clone(), MemoryPreferenceStore::default());

    sleep(Duration::from_millis(4_900)).await;
    assert_eq!(fetcher.calls(), 1);

    sleep(Duration::from_millis(7_600)).await; // t = 12.5s
    assert_eq!(fetcher.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_interval_change_replaces_timer() {
    let fetcher = CountingFetcher::default();
    let preferences = MemoryPreferenceStore::default();
    let controller = PollingController::start(fetcher.clone(), preferences.clone());

    sleep(Duration::from_millis(1_000)).await;
    controller.set_interval_millis(2_000).unwrap();

    // New timer ticks at 3s, 5s and 7s. The old one would have added 5s again.
    sleep(Duration::from_millis(6_500)).await; // t = 7.5s
    assert_eq!(fetcher.calls(), 4);

    assert_eq!(controller.state().interval_millis, 2_000);
    assert_eq!(
        preferences.load(INTERVAL_PREFERENCE_KEY).as_deref(),
        Some("2000")
    );
}

#[tokio::test(start_paused = true)]
async fn test_interval_change_while_disabled() {
    let fetcher = CountingFetcher::default();
    let controller = PollingController::start(fetcher.clone(), MemoryPreferenceStore::default());
    controller.set_auto_refresh(false);

    controller.set_interval_millis(1_000).unwrap();
    sleep(Duration::from_millis(10_000)).await;
    assert_eq!(fetcher.calls(), 1);

    controller.set_auto_refresh(true);
    sleep(Duration::from_millis(2_500)).await;
    assert_eq!(fetcher.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_zero_interval_rejected() {
    let preferences = MemoryPreferenceStore::default();
    let controller = PollingController::start(CountingFetcher::default(), preferences.clone());

    assert!(matches!(
        controller.set_interval_millis(0),
        Err(Error::InvalidInterval)
    ));
    assert_eq!(controller.state().interval_millis, DEFAULT_INTERVAL_MILLIS);
    assert_eq!(preferences.load(INTERVAL_PREFERENCE_KEY), None);
}

#[tokio::test(start_paused = true)]
async fn test_toggle_resumes_without_immediate_fire() {
    let fetcher = CountingFetcher::default();
    let controller = PollingController::start(fetcher.clone(), MemoryPreferenceStore::default());

    sleep(Duration::from_millis(1_000)).await;
    controller.set_auto_refresh(false);
    controller.set_auto_refresh(true);
    settle().await;
    assert_eq!(fetcher.calls(), 1);

    // Old timer would have fired at 5s; the re-armed one fires at 6s
    sleep(Duration::from_millis(4_500)).await; // t = 5.5s
    assert_eq!(fetcher.calls(), 1);

    sleep(Duration::from_millis(1_000)).await; // t = 6.5s
    assert_eq!(fetcher.calls(), 2);
    assert_eq!(controller.state().interval_millis, DEFAULT_INTERVAL_MILLIS);
}

#[tokio::test(start_paused = true)]
async fn test_disable_stops_timer() {
    let fetcher = CountingFetcher::default();
    let controller = PollingController::start(fetcher.clone(), MemoryPreferenceStore::default());
    controller.set_auto_refresh(false);

    sleep(Duration::from_millis(60_000)).await;
    assert_eq!(fetcher.calls(), 1);
    assert!(!controller.state().auto_refresh_enabled);
}

#[tokio::test(start_paused = true)]
async fn test_persisted_interval() {
    let fetcher = CountingFetcher::default();
    let preferences = MemoryPreferenceStore::with(INTERVAL_PREFERENCE_KEY, "2000");
    let controller = PollingController::start(fetcher.clone(), preferences);

    assert_eq!(controller.state().interval_millis, 2_000);

    sleep(Duration::from_millis(4_500)).await;
    assert_eq!(fetcher.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_invalid_persisted_interval() {
    for raw in ["abc", "0", "-5", ""] {
        let preferences = MemoryPreferenceStore::with(INTERVAL_PREFERENCE_KEY, raw);
        let controller = PollingController::start(CountingFetcher::default(), preferences);

        assert_eq!(controller.state().interval_millis, DEFAULT_INTERVAL_MILLIS, "{raw:?}");
    }
}

#[tokio::test(start_paused = true)]
async fn test_drop_stops_timer() {
    let fetcher = CountingFetcher::default();
    let controller = PollingController::start(fetcher.clone(), MemoryPreferenceStore::default());
    settle().await;

    drop(controller);
    sleep(Duration::from_millis(30_000)).await;

    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_see_changes() {
    let controller =
        PollingController::start(CountingFetcher::default(), MemoryPreferenceStore::default());
    let mut updates = controller.subscribe();

    updates.borrow_and_update();
    settle().await;

    assert!(updates.has_changed().unwrap());
    assert!(updates.borrow_and_update().current_snapshot.is_some());
}
