mod state;
pub use state::ControllerState;

mod timer;

use crate::fetcher::SnapshotFetcher;
use crate::preferences::PreferenceStore;
use crate::{Error, Result};

use chrono::Utc;
use model::presence::PresenceSnapshot;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

pub const DEFAULT_INTERVAL_MILLIS: u64 = 5000;
pub const INTERVAL_PREFERENCE_KEY: &str = "interval_millis";

/// Polls the aggregation endpoint on a timer and on demand, publishing the
/// result through a watch channel. Dropping the controller stops the timer.
pub struct PollingController<F: SnapshotFetcher, P: PreferenceStore> {
    inner: Arc<Inner<F, P>>,
}

struct Inner<F, P> {
    fetcher: F,
    preferences: P,
    state: watch::Sender<ControllerState>,
    /// Bumped for every fetch issued. A fetch may only apply its result while
    /// its generation is still the latest.
    generation: AtomicU64,
    in_flight: Mutex<Option<CancellationToken>>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl<F: SnapshotFetcher, P: PreferenceStore> PollingController<F, P> {
    /// Loads the persisted interval, arms the timer and issues the first
    /// fetch. Must be called from within a tokio runtime.
    pub fn start(fetcher: F, preferences: P) -> Self {
        let interval_millis = load_interval(&preferences);
        info!(interval_millis, "Starting polling controller");

        let (state, _) = watch::channel(ControllerState::new(interval_millis));

        let inner = Arc::new(Inner {
            fetcher,
            preferences,
            state,
            generation: AtomicU64::new(0),
            in_flight: Mutex::new(None),
            timer: Mutex::new(None),
        });

        inner.arm_timer();
        inner.issue_fetch();

        Self { inner }
    }

    pub fn state(&self) -> ControllerState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ControllerState> {
        self.inner.state.subscribe()
    }

    /// Fetches now, superseding any fetch still in flight.
    pub fn trigger_refresh(&self) {
        self.inner.issue_fetch();
    }

    /// Enabling (re)arms the timer at the current interval. Disabling stops
    /// future ticks but leaves an in-flight fetch alone.
    pub fn set_auto_refresh(&self, enabled: bool) {
        self.inner
            .state
            .send_modify(|state| state.auto_refresh_enabled = enabled);

        if enabled {
            self.inner.arm_timer();
        } else {
            self.inner.disarm_timer();
        }

        debug!(enabled, "Auto refresh toggled");
    }

    pub fn set_interval_millis(&self, interval_millis: u64) -> Result<()> {
        if interval_millis == 0 {
            return Error::InvalidInterval.into();
        }

        self.inner
            .state
            .send_modify(|state| state.interval_millis = interval_millis);

        if let Err(e) = self
            .inner
            .preferences
            .store(INTERVAL_PREFERENCE_KEY, &interval_millis.to_string())
        {
            error!(error = %e, "Failed to persist refresh interval");
        }

        if self.inner.state.borrow().auto_refresh_enabled {
            self.inner.arm_timer();
        }

        debug!(interval_millis, "Refresh interval changed");
        Ok(())
    }
}

impl<F: SnapshotFetcher, P: PreferenceStore> Drop for PollingController<F, P> {
    fn drop(&mut self) {
        self.inner.disarm_timer();

        if let Some(token) = self.inner.in_flight.lock().take() {
            token.cancel();
        }
    }
}

impl<F: SnapshotFetcher, P: PreferenceStore> Inner<F, P> {
    /// The single entry point for both timer ticks and manual refreshes.
    fn issue_fetch(self: &Arc<Self>) {
        let token = CancellationToken::new();
        let mut generation = 0;

        // Issuing and applying both happen under the state guard, so a stale
        // fetch can never observe its own generation as current
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

            if let Some(previous) = self.in_flight.lock().replace(token.clone()) {
                previous.cancel();
            }

            state.is_fetching = true;
        });

        debug!(generation, "Issuing fetch");

        let inner = Arc::clone(self);
        tokio::spawn(async move {
            tokio::select! {
                res = inner.fetcher.fetch() => inner.settle(generation, res),
                _ = token.cancelled() => debug!(generation, "Fetch superseded"),
            }
        });
    }

    fn settle(&self, generation: u64, res: Result<PresenceSnapshot>) {
        let error = res.as_ref().err().map(ToString::to_string);

        let applied = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }

            state.is_fetching = false;

            match res {
                Ok(snapshot) => {
                    state.current_snapshot = Some(Arc::new(snapshot));
                    state.last_error = None;
                    state.last_updated = Some(Utc::now());
                }
                Err(e) => state.last_error = Some(e.to_string()),
            }

            true
        });

        match (applied, error) {
            (false, _) => debug!(generation, "Discarding result of superseded fetch"),
            (true, Some(error)) => error!(generation, %error, "Failed to fetch snapshot"),
            (true, None) => debug!(generation, "Applied snapshot"),
        }
    }

    fn arm_timer(self: &Arc<Self>) {
        let period = Duration::from_millis(self.state.borrow().interval_millis);
        let weak: Weak<Self> = Arc::downgrade(self);

        let mut slot = self.timer.lock();
        if let Some(previous) = slot.take() {
            previous.abort();
        }

        *slot = Some(timer::ticker(period, move || match weak.upgrade() {
            Some(inner) => {
                inner.issue_fetch();
                true
            }
            None => false,
        }));
    }

    fn disarm_timer(&self) {
        if let Some(timer) = self.timer.lock().take() {
            timer.abort();
        }
    }
}

fn load_interval<P: PreferenceStore>(preferences: &P) -> u64 {
    let raw = match preferences.load(INTERVAL_PREFERENCE_KEY) {
        Some(raw) => raw,
        None => return DEFAULT_INTERVAL_MILLIS,
    };

    match raw.trim().parse::<u64>() {
        Ok(interval) if interval > 0 => interval,
        _ => {
            warn!(value = %raw, "Ignoring invalid persisted refresh interval");
            DEFAULT_INTERVAL_MILLIS
        }
    }
}

#[cfg(test)]
mod tests;
