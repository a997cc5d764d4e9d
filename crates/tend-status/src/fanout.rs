//! Concurrent batch of named, independent lookups.
//!
//! A [`FanOut`] maps task names to not-yet-polled futures. [`FanOut::join`]
//! polls all of them concurrently on the calling task and returns a
//! [`Settled`] map keyed identically once every task has resolved.
//!
//! Failure is fail-fast: the first task error settles the batch as
//! [`TaskFailed`] and the remaining in-flight futures are dropped. A failed
//! task is never turned into an absent slot.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::future::Future;

use futures::future::{BoxFuture, FutureExt, try_join_all};

/// A set of named producers waiting to be joined.
pub struct FanOut<'a, K, V, E> {
    tasks: BTreeMap<K, BoxFuture<'a, Result<V, E>>>,
}

impl<'a, K, V, E> FanOut<'a, K, V, E>
where
    K: Ord + Copy + Send + 'a,
    V: Send + 'a,
    E: Send + 'a,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: BTreeMap::new(),
        }
    }

    /// Register `producer` under `key`, replacing any earlier producer with
    /// the same key. Nothing runs until [`Self::join`].
    pub fn insert<F>(&mut self, key: K, producer: F)
    where
        F: Future<Output = Result<V, E>> + Send + 'a,
    {
        self.tasks.insert(key, producer.boxed());
    }

    /// Task names in key order.
    pub fn tasks(&self) -> impl Iterator<Item = K> + '_ {
        self.tasks.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Run every producer concurrently and wait for all of them.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFailed`] naming the first task that failed.
    pub async fn join(self) -> Result<Settled<K, V>, TaskFailed<K, E>> {
        let pending = self.tasks.into_iter().map(|(key, task)| async move {
            match task.await {
                Ok(value) => Ok((key, value)),
                Err(source) => Err(TaskFailed { task: key, source }),
            }
        });
        let values = try_join_all(pending).await?;
        Ok(values.into_iter().collect())
    }
}

impl<'a, K, V, E> Default for FanOut<'a, K, V, E>
where
    K: Ord + Copy + Send + 'a,
    V: Send + 'a,
    E: Send + 'a,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Resolved values of a joined batch.
#[derive(Debug)]
pub struct Settled<K, V> {
    values: BTreeMap<K, V>,
}

impl<K: Ord, V> Settled<K, V> {
    /// Remove and return the value of `key`; `None` if it was never
    /// requested (or already taken).
    pub fn take(&mut self, key: &K) -> Option<V> {
        self.values.remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for Settled<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// A batch task failed; carries its name and error.
#[derive(Debug)]
pub struct TaskFailed<K, E> {
    pub task: K,
    pub source: E,
}

impl<K: fmt::Display, E: fmt::Display> fmt::Display for TaskFailed<K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task {} failed: {}", self.task, self.source)
    }
}

impl<K, E> Error for TaskFailed<K, E>
where
    K: fmt::Debug + fmt::Display,
    E: Error + 'static,
{
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}
