//! Write-once handles to a task's outcome
//!
//! A [`TaskFuture`] and its [`Completer`] share one slot. The completer is
//! owned by the queued job and fills the slot exactly once; the future can
//! observe the slot any number of times. If the job is dropped without
//! running, the completer resolves the slot to [`ExecutorError::Abandoned`]
//! so waiters never hang.

use crate::error::ExecutorError;
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

type Outcome<T> = Result<T, ExecutorError>;

struct Slot<T> {
    state: Mutex<Option<Outcome<T>>>,
    ready: Condvar,
    done: AtomicBool,
}

impl<T> Slot<T> {
    fn fill(&self, outcome: Outcome<T>) {
        let mut state = self.state.lock();
        // Only one completer exists per slot
        debug_assert!(state.is_none(), "future slot written twice");
        *state = Some(outcome);
        self.done.store(true, Ordering::Release);
        self.ready.notify_all();
    }
}

/// Handle to the eventual outcome of a submitted task.
///
/// States: pending, then done (terminal). The transition happens once,
/// performed by the worker that ran the task.
pub struct TaskFuture<T> {
    slot: Arc<Slot<T>>,
}

/// Write side of a [`TaskFuture`]
pub(crate) struct Completer<T> {
    slot: Option<Arc<Slot<T>>>,
}

/// Create a connected future/completer pair
pub(crate) fn pair<T>() -> (TaskFuture<T>, Completer<T>) {
    let slot = Arc::new(Slot {
        state: Mutex::new(None),
        ready: Condvar::new(),
        done: AtomicBool::new(false),
    });
    (
        TaskFuture {
            slot: Arc::clone(&slot),
        },
        Completer { slot: Some(slot) },
    )
}

impl<T> Completer<T> {
    /// Record the outcome and wake every waiter
    pub(crate) fn complete(mut self, outcome: Outcome<T>) {
        if let Some(slot) = self.slot.take() {
            slot.fill(outcome);
        }
    }
}

impl<T> Drop for Completer<T> {
    fn drop(&mut self) {
        if let Some(slot) = self.slot.take() {
            slot.fill(Err(ExecutorError::Abandoned));
        }
    }
}

impl<T> TaskFuture<T> {
    /// Check whether the outcome has been recorded, without blocking
    pub fn is_done(&self) -> bool {
        self.slot.done.load(Ordering::Acquire)
    }

    /// Block until the task completes or `timeout` elapses.
    ///
    /// Returns `true` if the future is done.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        if self.is_done() {
            return true;
        }
        let mut state = self.slot.state.lock();
        if state.is_some() {
            return true;
        }
        let _ = self
            .slot
            .ready
            .wait_while_for(&mut state, |s| s.is_none(), timeout);
        state.is_some()
    }

    /// Block until the task completes and take its outcome.
    ///
    /// Consumes the handle, so no `Clone` bound is needed on `T`.
    pub fn wait(self) -> Outcome<T> {
        let mut state = self.slot.state.lock();
        self.slot.ready.wait_while(&mut state, |s| s.is_none());
        state.take().unwrap_or(Err(ExecutorError::Abandoned))
    }
}

impl<T: Clone> TaskFuture<T> {
    /// Return the outcome if the task is done, `None` otherwise
    pub fn get(&self) -> Option<Outcome<T>> {
        if !self.is_done() {
            return None;
        }
        self.slot.state.lock().clone()
    }

    /// Block until the task is done, then return its outcome.
    ///
    /// Repeated calls return the same outcome immediately.
    pub fn get_wait(&self) -> Outcome<T> {
        let mut state = self.slot.state.lock();
        self.slot.ready.wait_while(&mut state, |s| s.is_none());
        state.clone().unwrap_or(Err(ExecutorError::Abandoned))
    }
}

impl<T> std::fmt::Debug for TaskFuture<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskFuture")
            .field("done", &self.is_done())
            .finish_non_exhaustive()
    }
}
