use crate::config::Config;
use crate::db::{Book, BookRepository};
use crate::error::ShelfError;
use crate::service::clock::Clock;
use futures::stream::{self, Stream};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// One emission of the poller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollSnapshot {
    /// Milliseconds since the Unix epoch, read after the query returned.
    pub server_time: i64,
    pub db_result: Vec<Book>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub count: usize,
    pub interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            count: 10,
            interval: Duration::from_millis(1000),
        }
    }
}

impl From<&Config> for PollSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            count: cfg.poll_count,
            interval: cfg.poll_interval(),
        }
    }
}

/// Repeats the books query a fixed number of times with a pause in between.
///
/// Production is strictly sequential: query, emit, sleep, repeat. The
/// cancellation token is checked before every query and raced against every
/// sleep; a query already in flight is allowed to finish. A failed query is
/// emitted as the final item.
pub struct BookPoller<R, C> {
    repo: R,
    clock: C,
    settings: PollSettings,
    cancel: CancellationToken,
}

struct PollState<R, C> {
    poller: BookPoller<R, C>,
    emitted: usize,
    finished: bool,
}

impl<R, C> BookPoller<R, C>
where
    R: BookRepository + 'static,
    C: Clock,
{
    pub fn new(repo: R, clock: C, settings: PollSettings) -> Self {
        Self {
            repo,
            clock,
            settings,
            cancel: CancellationToken::new(),
        }
    }

    /// Replace the internal token with one owned by the consumer.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn settings(&self) -> PollSettings {
        self.settings
    }

    pub fn into_stream(self) -> impl Stream<Item = Result<PollSnapshot, ShelfError>> + Send {
        let init = PollState {
            poller: self,
            emitted: 0,
            finished: false,
        };
        stream::unfold(init, |mut st| async move {
            let item = st.step().await?;
            st.emitted += 1;
            st.finished = item.is_err();
            Some((item, st))
        })
    }
}

impl<R, C> PollState<R, C>
where
    R: BookRepository,
    C: Clock,
{
    async fn step(&self) -> Option<Result<PollSnapshot, ShelfError>> {
        let poller = &self.poller;
        if self.finished || self.emitted >= poller.settings.count {
            return None;
        }

        if self.emitted > 0 {
            tokio::select! {
                biased;
                _ = poller.cancel.cancelled() => {
                    debug!(emitted = self.emitted, "poll cancelled while sleeping");
                    return None;
                }
                _ = poller.clock.sleep(poller.settings.interval) => {}
            }
        }
        if poller.cancel.is_cancelled() {
            debug!(emitted = self.emitted, "poll cancelled");
            return None;
        }

        match poller.repo.list_books().await {
            Ok(rows) => {
                let snapshot = PollSnapshot {
                    server_time: poller.clock.now().timestamp_millis(),
                    db_result: rows,
                };
                debug!(
                    step = self.emitted + 1,
                    of = poller.settings.count,
                    rows = snapshot.db_result.len(),
                    "poll emitted"
                );
                Some(Ok(snapshot))
            }
            Err(e) => {
                warn!(step = self.emitted + 1, error = %e, "poll query failed; ending stream");
                Some(Err(e))
            }
        }
    }
}
