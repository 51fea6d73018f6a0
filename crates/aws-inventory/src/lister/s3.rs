//! S3 listing in three phases
//!
//! 1. List buckets (one task, default region).
//! 2. Look up each bucket's region; drop buckets outside the region filter.
//! 3. Fetch each remaining bucket's tags from its own region.
//!
//! Results are joined on bucket name in phase 1 order.

use crate::lister::Lister;
use crate::lister::gather::{Job, gather, settle};
use crate::lister::rds::DEFAULT_REGION_KEY;
use crate::lister::tasks::{S3ListTask, S3RegionTask, S3TagsTask};
use crate::lister::types::{Failure, Resource, Stage};
use crate::resource_kind::ResourceKind;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

const KIND: ResourceKind = ResourceKind::S3;

impl Lister {
    pub(crate) fn list_s3(&self, failures: &mut Vec<Failure>) -> Vec<Resource> {
        let listed = settle(self.executor.execute(S3ListTask {
            factory: Arc::clone(&self.factory),
        }));
        let buckets = match listed {
            Ok(buckets) => buckets,
            Err(error) => {
                failures.push(Failure::record(
                    KIND,
                    Stage::ListBuckets,
                    DEFAULT_REGION_KEY,
                    &error,
                ));
                return Vec::new();
            }
        };
        debug!(count = buckets.len(), "Buckets listed");

        let region_jobs = buckets
            .iter()
            .map(|bucket| Job {
                key: bucket.name.clone(),
                task: S3RegionTask {
                    factory: Arc::clone(&self.factory),
                    bucket: bucket.name.clone(),
                },
            })
            .collect();
        let located: Vec<(String, String)> = gather(
            &self.executor,
            KIND,
            Stage::BucketRegion,
            region_jobs,
            failures,
        )
        .into_iter()
        .filter(|(bucket, region)| self.keeps_bucket_region(bucket, region))
        .collect();

        let tag_jobs = located
            .iter()
            .map(|(bucket, region)| Job {
                key: bucket.clone(),
                task: S3TagsTask {
                    factory: Arc::clone(&self.factory),
                    bucket: bucket.clone(),
                    region: region.clone(),
                },
            })
            .collect();
        let mut tags: HashMap<String, _> =
            gather(&self.executor, KIND, Stage::BucketTags, tag_jobs, failures)
                .into_iter()
                .collect();

        let regions: HashMap<String, String> = located.into_iter().collect();
        buckets
            .into_iter()
            .filter_map(|bucket| {
                let region = regions.get(&bucket.name)?.clone();
                let Some(bucket_tags) = tags.remove(&bucket.name) else {
                    debug!(bucket = %bucket.name, "Skipping bucket without tag result");
                    return None;
                };
                Some(Resource::s3(bucket, region, bucket_tags))
            })
            .collect()
    }

    /// Region filter applied between phases 2 and 3
    fn keeps_bucket_region(&self, bucket: &str, region: &str) -> bool {
        if region.is_empty() {
            debug!(bucket, "Dropping bucket with empty region");
            return false;
        }
        match &self.regions {
            Some(regions) if !regions.iter().any(|r| r == region) => {
                debug!(bucket, region, "Dropping bucket outside selected regions");
                false
            }
            _ => true,
        }
    }
}
