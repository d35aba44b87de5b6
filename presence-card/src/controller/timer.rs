use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Calls `on_tick` every `period`, starting one full period from now, until it
/// returns false or the returned handle is aborted.
pub fn ticker<F>(period: Duration, mut on_tick: F) -> JoinHandle<()>
where
    F: FnMut() -> bool + Send + 'static,
{
    tokio::spawn(async move {
        let mut interval = interval_at(Instant::now() + period, period);
        // A slow tick must not be followed by a burst of catch-up ticks
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            if !on_tick() {
                break;
            }
        }
    })
}
