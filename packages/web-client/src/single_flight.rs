use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::warn;

type Flight<T> = Shared<BoxFuture<'static, Option<T>>>;

/// At most one in-flight operation; concurrent callers share its outcome.
///
/// The operation runs on its own task, so dropping every waiter does not
/// cancel it. The slot is cleared by that task once the outcome is known,
/// and the next call after that starts a new flight, including when the
/// operation panicked. `None` means the operation panicked.
pub struct SingleFlight<T> {
    slot: Arc<Mutex<Option<Flight<T>>>>,
}

impl<T> Default for SingleFlight<T> {
    fn default() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
        }
    }
}

impl<T> Clone for SingleFlight<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Join the current flight, or start one with `start`.
    pub fn run<F, Fut>(&self, start: F) -> Flight<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T> + Send + 'static,
    {
        let mut slot = self.slot.lock();
        if let Some(flight) = slot.as_ref() {
            return flight.clone();
        }

        let (tx, rx) = oneshot::channel();
        let work = start();
        let owner = Arc::clone(&self.slot);
        tokio::spawn(async move {
            let outcome = AssertUnwindSafe(work).catch_unwind().await;
            owner.lock().take();
            match outcome {
                Ok(value) => {
                    let _ = tx.send(value);
                }
                Err(_) => warn!("single-flight operation panicked"),
            }
        });

        let flight = async move { rx.await.ok() }.boxed().shared();
        *slot = Some(flight.clone());
        flight
    }

    pub fn in_flight(&self) -> bool {
        self.slot.lock().is_some()
    }
}
