//! Units of work scheduled on the pool

/// An independently schedulable unit of work.
///
/// A task owns whatever context it needs (region, client factory, bucket
/// name) from construction. `execute` consumes the task, so a task runs at
/// most once. Failures of the underlying operation belong in `Output`
/// (typically an `anyhow::Result`), not in a panic.
pub trait Task: Send + 'static {
    /// The outcome produced by running the task
    type Output: Send + 'static;

    /// Run the task to completion
    fn execute(self) -> Self::Output;
}

/// A [`Task`] backed by a closure
pub struct FnTask<F>(F);

/// Wrap a closure as a [`Task`].
///
/// # Example
/// ```
/// use aws_inventory_executor::{Task, from_fn};
///
/// let task = from_fn(|| 40 + 2);
/// assert_eq!(task.execute(), 42);
/// ```
pub fn from_fn<F, O>(f: F) -> FnTask<F>
where
    F: FnOnce() -> O + Send + 'static,
    O: Send + 'static,
{
    FnTask(f)
}

impl<F, O> Task for FnTask<F>
where
    F: FnOnce() -> O + Send + 'static,
    O: Send + 'static,
{
    type Output = O;

    fn execute(self) -> O {
        (self.0)()
    }
}
