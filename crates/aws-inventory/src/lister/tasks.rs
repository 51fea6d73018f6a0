//! Inventory tasks scheduled on the worker pool
//!
//! Each task captures one unit of work and builds its own region-scoped
//! client inside `execute`, so constructing a task cannot fail and a
//! client error is reported as that unit's outcome.

use crate::aws::{BucketSummary, ClientFactory, DbInstanceSummary, Tags};
use anyhow::Result;
use aws_inventory_executor::Task;
use std::sync::Arc;
use tracing::debug;

/// List RDS instances in one region (`None` = default region)
pub(crate) struct RdsListTask {
    pub factory: Arc<dyn ClientFactory>,
    pub region: Option<String>,
}

impl Task for RdsListTask {
    type Output = Result<Vec<DbInstanceSummary>>;

    fn execute(self) -> Self::Output {
        debug!(region = ?self.region, "Listing RDS instances");
        self.factory.rds(self.region.as_deref())?.list_instances()
    }
}

/// List every S3 bucket of the account
pub(crate) struct S3ListTask {
    pub factory: Arc<dyn ClientFactory>,
}

impl Task for S3ListTask {
    type Output = Result<Vec<BucketSummary>>;

    fn execute(self) -> Self::Output {
        self.factory.s3(None)?.list_buckets()
    }
}

/// Look up the region of one bucket
pub(crate) struct S3RegionTask {
    pub factory: Arc<dyn ClientFactory>,
    pub bucket: String,
}

impl Task for S3RegionTask {
    type Output = Result<String>;

    fn execute(self) -> Self::Output {
        self.factory.s3(None)?.bucket_region(&self.bucket)
    }
}

/// Fetch the tags of one bucket from its own region
pub(crate) struct S3TagsTask {
    pub factory: Arc<dyn ClientFactory>,
    pub bucket: String,
    pub region: String,
}

impl Task for S3TagsTask {
    type Output = Result<Tags>;

    fn execute(self) -> Self::Output {
        self.factory
            .s3(Some(&self.region))?
            .bucket_tags(&self.bucket)
    }
}
