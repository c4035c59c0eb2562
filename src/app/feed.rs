use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::utils::format_deviation;

/// Ticks buffered before the feed waits for the consumer.
pub const FEED_BUFFER: usize = 32;

/// One synthetic data point from the live feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedTick {
    pub label: String,
    pub value: f64,
    pub previous: f64,
}

impl FeedTick {
    /// Signed change from the previous point, e.g. `-4.00%`.
    pub fn deviation(&self) -> Option<String> {
        format_deviation(self.value, self.previous)
    }

    pub fn is_falling(&self) -> bool {
        self.value < self.previous
    }
}

/// Replays a sample series on a fixed period until cancelled or dropped.
pub struct LiveFeed {
    rx: mpsc::Receiver<FeedTick>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl LiveFeed {
    /// Start emitting `values[start]`, `values[start + 1]`, ... and wrap
    /// around at the end. The first tick is immediate.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(values: Vec<f64>, start: usize, period: Duration) -> Self {
        let (tx, rx) = mpsc::channel(FEED_BUFFER);
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let task = tokio::spawn(async move {
            if values.is_empty() {
                return;
            }
            let len = values.len();
            let mut index = start % len;
            let mut interval = tokio::time::interval(period);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        let tick = FeedTick {
                            label: chrono::Local::now().format("%H:%M:%S").to_string(),
                            value: values[index],
                            previous: values[(index + len - 1) % len],
                        };
                        index = (index + 1) % len;
                        tokio::select! {
                            _ = token.cancelled() => break,
                            sent = tx.send(tick) => {
                                if sent.is_err() {
                                    break;
                                }
                            }
                        }
                    }
                }
            }
            tracing::debug!("live feed stopped");
        });

        Self { rx, cancel, task }
    }

    /// A pending tick, without waiting.
    pub fn try_next(&mut self) -> Option<FeedTick> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next tick; `None` once the feed has stopped and drained.
    pub async fn next(&mut self) -> Option<FeedTick> {
        self.rx.recv().await
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for LiveFeed {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
