use chrono::{DateTime, Utc};
use std::future::Future;
use std::time::Duration;

/// Time source and sleeper used by the poller.
pub trait Clock: Clone + Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;

    fn sleep(&self, dur: Duration) -> impl Future<Output = ()> + Send;
}

/// Wall clock with tokio timers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn sleep(&self, dur: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(dur)
    }
}
