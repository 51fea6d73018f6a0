//! aws-inventory-executor - Worker pool and synchronous fan-out executor
//!
//! This crate provides the concurrency core used by the inventory lister,
//! without any AWS SDK dependencies to keep it lightweight.
//!
//! ## Modules
//!
//! - [`task`]: The [`Task`] capability and closure adapter
//! - [`future`]: Write-once, multi-read handles to a task's outcome
//! - [`threadpool`]: Fixed worker set with a bounded FIFO queue
//! - [`sync_executor`]: "Execute one" and "execute many and wait" on top of the pool
//! - [`error`]: Submission and execution errors

pub mod error;
pub mod future;
pub mod sync_executor;
pub mod task;
pub mod threadpool;

// Re-export commonly used types
pub use error::ExecutorError;
pub use future::TaskFuture;
pub use sync_executor::{SynchronousExecutor, SynchronousResult};
pub use task::{FnTask, Task, from_fn};
pub use threadpool::{DEFAULT_SHUTDOWN_TIMEOUT, QUEUE_CAPACITY, Threadpool};
