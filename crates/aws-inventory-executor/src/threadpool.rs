//! Fixed-size worker pool with a bounded FIFO queue
//!
//! Workers are named OS threads that block on a shared `crossbeam-channel`
//! queue, so a queued job goes to whichever worker frees up first. The pool
//! never runs more jobs at once than it has workers.
//!
//! Shutdown closes the queue and waits, bounded by a timeout, for workers to
//! drain it. Jobs still queued when the timeout expires are dropped and their
//! futures resolve to [`ExecutorError::Abandoned`]. Jobs already running are
//! left to finish on their own; there is no hard cancel.

use crate::error::ExecutorError;
use crate::future::{self, TaskFuture};
use crate::task::Task;
use crossbeam_channel::{Receiver, Sender, TrySendError, bounded, unbounded};
use parking_lot::{Mutex, RwLock};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Default queue capacity, large enough not to matter for inventory batches
pub const QUEUE_CAPACITY: usize = 1000;

/// Shutdown timeout used when a pool is dropped without an explicit shutdown
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

type Job = Box<dyn FnOnce() + Send + 'static>;

struct Worker {
    id: usize,
    handle: JoinHandle<()>,
}

/// A fixed set of worker threads consuming a bounded job queue.
///
/// # Example
/// ```
/// use aws_inventory_executor::{Threadpool, from_fn};
/// use std::time::Duration;
///
/// let pool = Threadpool::new(2).unwrap();
/// let future = pool.submit(from_fn(|| "us-east-1".len())).unwrap();
/// assert_eq!(future.get_wait().unwrap(), 9);
/// assert!(pool.shutdown(Duration::from_secs(1)));
/// ```
pub struct Threadpool {
    /// `None` once shutdown has started
    sender: RwLock<Option<Sender<Job>>>,
    /// Kept so shutdown can discard jobs left behind after a timeout
    receiver: Receiver<Job>,
    workers: Mutex<Vec<Worker>>,
    exited: Receiver<usize>,
    worker_count: usize,
    capacity: usize,
}

impl Threadpool {
    /// Create a pool with `workers` threads and the default queue capacity
    pub fn new(workers: usize) -> Result<Self, ExecutorError> {
        Self::with_queue_capacity(workers, QUEUE_CAPACITY)
    }

    /// Create a pool with an explicit queue capacity
    pub fn with_queue_capacity(workers: usize, capacity: usize) -> Result<Self, ExecutorError> {
        if workers == 0 {
            return Err(ExecutorError::InvalidWorkerCount(workers));
        }
        if capacity == 0 {
            return Err(ExecutorError::InvalidQueueCapacity);
        }

        let (sender, receiver) = bounded::<Job>(capacity);
        let (exited_tx, exited) = unbounded();

        let mut handles = Vec::with_capacity(workers);
        for id in 0..workers {
            let jobs = receiver.clone();
            let exited_tx = exited_tx.clone();
            // On error the local sender drops, so already spawned workers exit
            let handle = thread::Builder::new()
                .name(format!("inventory-worker-{id}"))
                .spawn(move || {
                    for job in jobs.iter() {
                        job();
                    }
                    let _ = exited_tx.send(id);
                })
                .map_err(|e| ExecutorError::Spawn(Arc::new(e)))?;
            handles.push(Worker { id, handle });
        }

        debug!(workers, capacity, "Threadpool started");

        Ok(Self {
            sender: RwLock::new(Some(sender)),
            receiver,
            workers: Mutex::new(handles),
            exited,
            worker_count: workers,
            capacity,
        })
    }

    /// Submit a task for execution.
    ///
    /// Never blocks. Fails with [`ExecutorError::ShutDown`] once shutdown has
    /// started and with [`ExecutorError::QueueSaturated`] when the queue is
    /// full. An accepted task runs exactly once.
    pub fn submit<T: Task>(&self, task: T) -> Result<TaskFuture<T::Output>, ExecutorError> {
        let guard = self.sender.read();
        let sender = guard.as_ref().ok_or(ExecutorError::ShutDown)?;

        let (future, completer) = future::pair();
        let job: Job = Box::new(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| task.execute()))
                .map_err(|payload| ExecutorError::TaskPanicked(panic_message(payload.as_ref())));
            completer.complete(outcome);
        });

        match sender.try_send(job) {
            Ok(()) => Ok(future),
            Err(TrySendError::Full(_)) => Err(ExecutorError::QueueSaturated {
                capacity: self.capacity,
            }),
            Err(TrySendError::Disconnected(_)) => Err(ExecutorError::ShutDown),
        }
    }

    /// Stop accepting tasks and wait up to `timeout` for queued work to drain.
    ///
    /// Returns `true` if every worker finished in time. On timeout, jobs that
    /// never started are discarded and `false` is returned.
    pub fn shutdown(&self, timeout: Duration) -> bool {
        drop(self.sender.write().take());

        let deadline = Instant::now() + timeout;
        let mut workers = self.workers.lock();

        while !workers.is_empty() {
            let Ok(id) = self.exited.recv_deadline(deadline) else {
                break;
            };
            if let Some(pos) = workers.iter().position(|w| w.id == id) {
                let worker = workers.swap_remove(pos);
                if worker.handle.join().is_err() {
                    warn!(worker = id, "Worker thread panicked");
                }
            }
        }

        if workers.is_empty() {
            debug!("Threadpool shut down cleanly");
            return true;
        }

        let abandoned = self.receiver.try_iter().count();
        warn!(
            busy_workers = workers.len(),
            abandoned,
            timeout_secs = timeout.as_secs_f64(),
            "Threadpool shutdown timed out, abandoning queued tasks"
        );
        false
    }

    /// Number of worker threads
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Maximum number of queued (not yet started) jobs
    pub fn queue_capacity(&self) -> usize {
        self.capacity
    }

    /// Number of jobs waiting for a worker
    pub fn queued(&self) -> usize {
        self.receiver.len()
    }

    /// Whether shutdown has started
    pub fn is_shut_down(&self) -> bool {
        self.sender.read().is_none()
    }
}

impl Drop for Threadpool {
    fn drop(&mut self) {
        if !self.is_shut_down() {
            self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
        }
    }
}

impl std::fmt::Debug for Threadpool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Threadpool")
            .field("workers", &self.worker_count)
            .field("capacity", &self.capacity)
            .field("queued", &self.queued())
            .field("shut_down", &self.is_shut_down())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
