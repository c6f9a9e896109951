use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::lock;

type PendingTasks = Arc<Mutex<HashMap<String, (u64, JoinHandle<()>)>>>;

/// Keyed debounce scheduler: at most one pending task per key, and
/// scheduling a key again aborts the task it replaces.
///
/// Pending tasks are aborted when the debouncer is dropped.
#[derive(Default)]
pub struct Debouncer {
    pending: PendingTasks,
    generation: AtomicU64,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `task` after `delay` unless `key` is rescheduled or cancelled
    /// first. Returns `false` without scheduling when called outside a Tokio
    /// runtime.
    pub fn schedule<F>(&self, key: &str, delay: Duration, task: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Ok(runtime) = Handle::try_current() else {
            return false;
        };

        let generation = self.generation.fetch_add(1, Ordering::Relaxed);
        let pending = Arc::clone(&self.pending);
        let owned_key = key.to_string();

        let mut tasks = lock(&self.pending);
        if let Some((_, previous)) = tasks.remove(key) {
            previous.abort();
            tracing::debug!(key, "debounced task superseded");
        }

        let join = runtime.spawn(async move {
            tokio::time::sleep(delay).await;

            // A task that lost the race with its replacement must not run.
            let current = {
                let mut tasks = lock(&pending);
                match tasks.get(&owned_key) {
                    Some((g, _)) if *g == generation => {
                        tasks.remove(&owned_key);
                        true
                    }
                    _ => false,
                }
            };
            if current {
                task.await;
            }
        });
        tasks.insert(key.to_string(), (generation, join));
        true
    }

    pub fn cancel_all(&self) {
        let mut tasks = lock(&self.pending);
        let count = tasks.len();
        for (_, (_, task)) in tasks.drain() {
            task.abort();
        }
        if count > 0 {
            tracing::debug!(count, "cancelled pending debounced tasks");
        }
    }

    /// Number of keys with a task still waiting to fire.
    pub fn pending(&self) -> usize {
        lock(&self.pending)
            .values()
            .filter(|(_, task)| !task.is_finished())
            .count()
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
