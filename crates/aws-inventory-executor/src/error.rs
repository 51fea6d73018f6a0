//! Executor errors
//!
//! Submission failures (the pool refused a task) and execution failures the
//! pool itself observed (panics, abandoned jobs). Failures a task reports
//! through its own outcome are not represented here.

use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by the pool, the futures it hands out, and the executor
#[derive(Debug, Clone, Error)]
pub enum ExecutorError {
    /// The pool no longer accepts submissions
    #[error("threadpool is shut down")]
    ShutDown,

    /// The bounded queue is full
    #[error("threadpool queue is saturated (capacity {capacity})")]
    QueueSaturated { capacity: usize },

    /// Worker count must be at least one
    #[error("worker count must be at least 1, got {0}")]
    InvalidWorkerCount(usize),

    /// Queue capacity must be at least one
    #[error("queue capacity must be at least 1")]
    InvalidQueueCapacity,

    /// A worker thread could not be started
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] Arc<std::io::Error>),

    /// The task panicked while executing
    #[error("task panicked: {0}")]
    TaskPanicked(String),

    /// The task was dropped before it ran (e.g. discarded on shutdown timeout)
    #[error("task was abandoned before it ran")]
    Abandoned,
}

impl ExecutorError {
    /// Check if the error was raised at submission time
    pub fn is_submission(&self) -> bool {
        matches!(
            self,
            ExecutorError::ShutDown | ExecutorError::QueueSaturated { .. }
        )
    }
}
