//! Single-region display fed by a poll stream.

use crate::db::Book;
use crate::error::ShelfError;
use crate::service::poller::PollSnapshot;
use futures::{Stream, StreamExt};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

#[derive(Serialize)]
struct DisplayPayload<'a> {
    time: i64,
    result: &'a [Book],
}

/// Render a snapshot as the `{"time": .., "result": [..]}` display text.
pub fn render_snapshot(snapshot: &PollSnapshot) -> Result<String, ShelfError> {
    let payload = DisplayPayload {
        time: snapshot.server_time,
        result: &snapshot.db_result,
    };
    Ok(serde_json::to_string(&payload)?)
}

/// A mounted text region that always holds the latest emission only.
///
/// Mounting spawns a consumer task; unmounting (or dropping the binding)
/// cancels the producer through the shared token.
pub struct DisplayBinding {
    text: watch::Receiver<String>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl DisplayBinding {
    /// Start consuming `stream`. `cancel` must be the token the producer
    /// observes, e.g. [`BookPoller::cancellation_token`](crate::service::BookPoller::cancellation_token).
    pub fn mount<S>(stream: S, cancel: CancellationToken) -> Self
    where
        S: Stream<Item = Result<PollSnapshot, ShelfError>> + Send + 'static,
    {
        let (tx, rx) = watch::channel(String::new());
        let task = tokio::spawn(async move {
            let mut stream = std::pin::pin!(stream);
            while let Some(item) = stream.next().await {
                let snapshot = match item {
                    Ok(s) => s,
                    Err(e) => {
                        warn!(error = %e, "display stream failed");
                        break;
                    }
                };
                match render_snapshot(&snapshot) {
                    Ok(text) => {
                        tx.send_replace(text);
                    }
                    Err(e) => warn!(error = %e, "failed to render snapshot"),
                }
            }
            debug!("display stream finished");
        });

        Self {
            text: rx,
            cancel,
            task: Some(task),
        }
    }

    /// Current contents of the region. Empty until the first emission.
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    /// Wait for the region to change. `None` once the producer has finished.
    pub async fn changed(&mut self) -> Option<String> {
        self.text.changed().await.ok()?;
        Some(self.text.borrow_and_update().clone())
    }

    /// Signal cancellation and wait for the consumer task to wind down.
    pub async fn unmount(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            warn!(error = %e, "display task ended abnormally");
        }
    }
}

impl Drop for DisplayBinding {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::BookRepository;
    use crate::service::clock::SystemClock;
    use crate::service::clock::manual::ManualClock;
    use crate::service::poller::{BookPoller, PollSettings};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicI32, Ordering};

    /// Each query returns one book whose id is the call number.
    #[derive(Clone, Default)]
    struct CountingBooks {
        calls: Arc<AtomicI32>,
    }

    impl BookRepository for CountingBooks {
        async fn list_books(&self) -> Result<Vec<Book>, ShelfError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(vec![Book::new(n, format!("Volume {n}"), "Anon")])
        }
    }

    #[tokio::test]
    async fn shows_only_latest_emission() {
        let poller = BookPoller::new(
            CountingBooks::default(),
            ManualClock::default(),
            PollSettings {
                count: 3,
                ..PollSettings::default()
            },
        );
        let token = poller.cancellation_token();
        let mut binding = DisplayBinding::mount(poller.into_stream(), token);

        let first = binding.changed().await.expect("first emission");
        let v: serde_json::Value = serde_json::from_str(&first).unwrap();
        assert!(v["time"].is_i64());
        assert_eq!(v["result"].as_array().unwrap().len(), 1);

        while binding.changed().await.is_some() {}
        let last: serde_json::Value = serde_json::from_str(&binding.text()).unwrap();
        assert_eq!(last["time"], 2000);
        assert_eq!(last["result"].as_array().unwrap().len(), 1);
        assert_eq!(last["result"][0]["title"], "Volume 3");
        assert!(!binding.text().contains("Volume 1"));
    }

    #[tokio::test(start_paused = true)]
    async fn unmount_cancels_producer() {
        let repo = CountingBooks::default();
        let poller = BookPoller::new(repo.clone(), SystemClock, PollSettings::default());
        let token = poller.cancellation_token();
        let mut binding = DisplayBinding::mount(poller.into_stream(), token.clone());

        binding.changed().await.expect("first emission");
        binding.unmount().await;

        assert!(token.is_cancelled());
        assert_eq!(repo.calls.load(Ordering::SeqCst), 1);

        tokio::time::sleep(std::time::Duration::from_secs(2)).await;
        assert_eq!(repo.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn renders_time_and_result_keys() {
        let snap = PollSnapshot {
            server_time: 42,
            db_result: vec![],
        };
        assert_eq!(render_snapshot(&snap).unwrap(), r#"{"time":42,"result":[]}"#);
    }
}
