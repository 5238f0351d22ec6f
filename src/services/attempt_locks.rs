use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

type AttemptKey = (String, String);

/// Per-(student, quiz) async mutexes serializing start and submit calls
/// inside one process.
#[derive(Default)]
pub struct AttemptLocks {
    locks: DashMap<AttemptKey, Arc<Mutex<()>>>,
}

pub struct AttemptGuard<'a> {
    owner: &'a AttemptLocks,
    key: AttemptKey,
    _guard: OwnedMutexGuard<()>,
}

impl AttemptLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, student_id: &str, quiz_id: &str) -> AttemptGuard<'_> {
        let key = (student_id.to_string(), quiz_id.to_string());
        let lock = self.locks.entry(key.clone()).or_default().clone();
        let guard = lock.lock_owned().await;

        AttemptGuard {
            owner: self,
            key,
            _guard: guard,
        }
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

impl Drop for AttemptGuard<'_> {
    fn drop(&mut self) {
        // Only the map and this guard hold the mutex: nobody is waiting.
        self.owner
            .locks
            .remove_if(&self.key, |_, lock| Arc::strong_count(lock) <= 2);
    }
}
