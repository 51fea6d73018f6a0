//! Synchronous fan-out on top of [`Threadpool`]

use crate::error::ExecutorError;
use crate::task::Task;
use crate::threadpool::Threadpool;
use std::sync::Arc;
use tracing::debug;

/// Outcome of one task in a batch: the task's output, or the reason the pool
/// could not produce it (submission refused, panic, abandoned).
pub type SynchronousResult<T> = Result<T, ExecutorError>;

/// Blocking "execute one" and "execute many and wait" over a shared pool.
///
/// Cloning is cheap; clones share the same pool.
#[derive(Clone, Debug)]
pub struct SynchronousExecutor {
    pool: Arc<Threadpool>,
}

impl SynchronousExecutor {
    pub fn new(pool: Arc<Threadpool>) -> Self {
        Self { pool }
    }

    /// The pool backing this executor
    pub fn pool(&self) -> &Arc<Threadpool> {
        &self.pool
    }

    /// Submit one task and block until it completes
    pub fn execute<T: Task>(&self, task: T) -> SynchronousResult<T::Output> {
        self.pool.submit(task)?.wait()
    }

    /// Submit every task, then wait for all of them.
    ///
    /// The result has exactly one entry per input task, in input order,
    /// regardless of completion order. A task that could not be submitted
    /// gets its submission error and is not waited on. All submissions happen
    /// before the first wait so accepted tasks run in parallel.
    pub fn execute_all<T, I>(&self, tasks: I) -> Vec<SynchronousResult<T::Output>>
    where
        T: Task,
        I: IntoIterator<Item = T>,
    {
        let pending: Vec<_> = tasks
            .into_iter()
            .map(|task| self.pool.submit(task))
            .collect();

        let rejected = pending.iter().filter(|p| p.is_err()).count();
        debug!(
            submitted = pending.len() - rejected,
            rejected, "Batch submitted, waiting for results"
        );

        pending
            .into_iter()
            .map(|submission| submission.and_then(|future| future.wait()))
            .collect()
    }
}
