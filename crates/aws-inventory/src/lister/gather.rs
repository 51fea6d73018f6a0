//! Fan-out and fan-in over the synchronous executor
//!
//! A batch of keyed jobs is submitted in one `execute_all` call. Outcomes
//! are paired back with their keys by position. Any unit that failed, at
//! submission or inside the task, is logged, recorded as a [`Failure`] and
//! left out; the rest are returned in batch order.

use crate::lister::types::{Failure, Stage};
use crate::resource_kind::ResourceKind;
use aws_inventory_executor::{SynchronousExecutor, SynchronousResult, Task};
use tracing::debug;

/// A task together with the key (region or bucket) it is reported under
pub(crate) struct Job<T> {
    pub key: String,
    pub task: T,
}

/// Collapse a pool failure and a task failure into one error
pub(crate) fn settle<O>(result: SynchronousResult<anyhow::Result<O>>) -> anyhow::Result<O> {
    result.map_err(anyhow::Error::from).and_then(|outcome| outcome)
}

/// Run a batch and keep the successful outcomes, keyed, in batch order
pub(crate) fn gather<T, O>(
    executor: &SynchronousExecutor,
    kind: ResourceKind,
    stage: Stage,
    jobs: Vec<Job<T>>,
    failures: &mut Vec<Failure>,
) -> Vec<(String, O)>
where
    T: Task<Output = anyhow::Result<O>>,
{
    if jobs.is_empty() {
        return Vec::new();
    }

    let (keys, tasks): (Vec<String>, Vec<T>) =
        jobs.into_iter().map(|job| (job.key, job.task)).unzip();
    let batch = keys.len();

    let results = executor.execute_all(tasks);
    debug_assert_eq!(results.len(), batch);

    let succeeded: Vec<(String, O)> = keys
        .into_iter()
        .zip(results)
        .filter_map(|(key, result)| match settle(result) {
            Ok(value) => Some((key, value)),
            Err(error) => {
                failures.push(Failure::record(kind, stage, key, &error));
                None
            }
        })
        .collect();

    debug!(
        resource_type = %kind,
        stage = %stage,
        batch,
        succeeded = succeeded.len(),
        "Batch complete"
    );
    succeeded
}
