//! Cancellable consumer task for a location stream.

use std::ops::ControlFlow;

use futures::StreamExt;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::coord::Coordinate;
use crate::source::LocationStream;

/// Handle to a running location subscription.
///
/// The task awaits samples one at a time and hands each present coordinate
/// to its callback in arrival order. Cancellation is cooperative: it takes
/// effect at the next await, so a sample already being handled still
/// completes. Dropping the handle cancels the task.
pub struct Subscription {
    session: u64,
    cancellation: CancellationToken,
    handle: JoinHandle<()>,
}

impl Subscription {
    /// Spawn a consumer for `stream` on `runtime`.
    ///
    /// The task ends when cancelled, when the stream ends, or when
    /// `on_sample` returns `ControlFlow::Break`.
    pub fn spawn<F>(
        runtime: &Handle,
        session: u64,
        stream: LocationStream,
        mut on_sample: F,
    ) -> Self
    where
        F: FnMut(Coordinate) -> ControlFlow<()> + Send + 'static,
    {
        let cancellation = CancellationToken::new();
        let token = cancellation.clone();

        let handle = runtime.spawn(async move {
            let mut stream = stream;
            let mut received: u64 = 0;

            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        debug!(session, received, "Location subscription cancelled");
                        break;
                    }
                    next = stream.next() => match next {
                        Some(Some(coordinate)) => {
                            received += 1;
                            if on_sample(coordinate).is_break() {
                                debug!(session, received, "Location subscription released");
                                break;
                            }
                        }
                        Some(None) => trace!(session, "No location fix"),
                        None => {
                            debug!(session, received, "Location stream ended");
                            break;
                        }
                    }
                }
            }
        });

        Self {
            session,
            cancellation,
            handle,
        }
    }

    /// Session number this subscription was started for.
    pub fn session(&self) -> u64 {
        self.session
    }

    /// True once the consumer task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Cancel the subscription. The task stops at its next suspension point.
    pub fn cancel(self) {
        self.cancellation.cancel();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancellation.cancel();
    }
}
