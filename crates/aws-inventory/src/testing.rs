//! In-memory fakes of the provider traits for lister tests.
//!
//! `FakeCloud` is a `ClientFactory` over a fixed set of buckets and database
//! instances. Failures are injected per region or per bucket, and every
//! region-scoped call is recorded so tests can assert where it went.

use crate::aws::{
    BucketSummary, ClientFactory, DbInstanceSummary, RdsOperations, S3Operations, Tags,
    classify_aws_error,
};
use crate::defaults::S3_DEFAULT_LOCATION;
use anyhow::{Context, Result, anyhow, bail};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// A bucket as the fake S3 service knows it
#[derive(Debug, Clone)]
pub struct FakeBucket {
    pub name: String,
    /// Empty means the location lookup returns no region
    pub region: String,
    pub tags: Tags,
}

impl FakeBucket {
    pub fn new(name: &str, region: &str) -> Self {
        Self {
            name: name.to_string(),
            region: region.to_string(),
            tags: Tags::new(),
        }
    }

    pub fn tag(mut self, key: &str, value: &str) -> Self {
        self.tags.insert(key.to_string(), Some(value.to_string()));
        self
    }
}

/// Create a database instance summary in `region`
pub fn db(id: &str, region: &str) -> DbInstanceSummary {
    DbInstanceSummary {
        arn: format!("arn:aws:rds:{region}:123456789012:db:{id}"),
        id: id.to_string(),
        region: region.to_string(),
        engine: Some("postgres".to_string()),
        status: Some("available".to_string()),
        ..Default::default()
    }
}

#[derive(Debug, Default)]
struct CallLog {
    rds: Vec<String>,
    tags: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeCloud {
    default_region: Option<String>,
    buckets: Vec<FakeBucket>,
    instances: HashMap<String, Vec<DbInstanceSummary>>,
    failing_rds_regions: HashSet<String>,
    failing_region_lookups: HashSet<String>,
    failing_tag_lookups: HashSet<String>,
    fail_list_buckets: bool,
    latency: Option<Duration>,
    calls: Arc<Mutex<CallLog>>,
}

impl FakeCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_region(mut self, region: &str) -> Self {
        self.default_region = Some(region.to_string());
        self
    }

    pub fn with_bucket(mut self, bucket: FakeBucket) -> Self {
        self.buckets.push(bucket);
        self
    }

    pub fn with_instances(mut self, region: &str, instances: Vec<DbInstanceSummary>) -> Self {
        self.instances.insert(region.to_string(), instances);
        self
    }

    /// Every provider call sleeps this long before answering
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// DescribeDBInstances in `region` fails with an invalid-token error
    pub fn failing_rds_region(mut self, region: &str) -> Self {
        self.failing_rds_regions.insert(region.to_string());
        self
    }

    pub fn failing_region_lookup(mut self, bucket: &str) -> Self {
        self.failing_region_lookups.insert(bucket.to_string());
        self
    }

    pub fn failing_tag_lookup(mut self, bucket: &str) -> Self {
        self.failing_tag_lookups.insert(bucket.to_string());
        self
    }

    pub fn failing_list_buckets(mut self) -> Self {
        self.fail_list_buckets = true;
        self
    }

    /// Regions RDS listings were issued in
    pub fn rds_calls(&self) -> Vec<String> {
        self.log().rds.clone()
    }

    /// `(bucket, client region)` of every tag lookup
    pub fn tag_calls(&self) -> Vec<(String, String)> {
        self.log().tags.clone()
    }

    fn log(&self) -> std::sync::MutexGuard<'_, CallLog> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn resolve(&self, region: Option<&str>) -> Result<String> {
        region
            .map(str::to_string)
            .or_else(|| self.default_region.clone())
            .ok_or_else(|| anyhow!("No default AWS region configured"))
    }

    fn pause(&self) {
        if let Some(latency) = self.latency {
            thread::sleep(latency);
        }
    }
}

impl ClientFactory for FakeCloud {
    fn s3(&self, region: Option<&str>) -> Result<Arc<dyn S3Operations>> {
        let region = self
            .resolve(region)
            .unwrap_or_else(|_| S3_DEFAULT_LOCATION.to_string());
        Ok(Arc::new(FakeS3 {
            cloud: self.clone(),
            region,
        }))
    }

    fn rds(&self, region: Option<&str>) -> Result<Arc<dyn RdsOperations>> {
        let region = self.resolve(region)?;
        Ok(Arc::new(FakeRds {
            cloud: self.clone(),
            region,
        }))
    }
}

struct FakeS3 {
    cloud: FakeCloud,
    region: String,
}

impl FakeS3 {
    fn bucket(&self, name: &str) -> Result<&FakeBucket> {
        self.cloud
            .buckets
            .iter()
            .find(|b| b.name == name)
            .ok_or_else(|| anyhow::Error::new(classify_aws_error(Some("NoSuchBucket"), Some(name))))
    }
}

impl S3Operations for FakeS3 {
    fn list_buckets(&self) -> Result<Vec<BucketSummary>> {
        self.cloud.pause();
        if self.cloud.fail_list_buckets {
            return Err(anyhow::Error::new(classify_aws_error(
                Some("AccessDenied"),
                Some("Access Denied"),
            )))
            .context("Failed to list S3 buckets");
        }
        Ok(self
            .cloud
            .buckets
            .iter()
            .map(|b| BucketSummary {
                name: b.name.clone(),
                created: None,
            })
            .collect())
    }

    fn bucket_region(&self, bucket: &str) -> Result<String> {
        self.cloud.pause();
        if self.cloud.failing_region_lookups.contains(bucket) {
            bail!("Failed to get location of bucket '{bucket}': connection reset");
        }
        Ok(self.bucket(bucket)?.region.clone())
    }

    fn bucket_tags(&self, bucket: &str) -> Result<Tags> {
        self.cloud.pause();
        self.cloud
            .log()
            .tags
            .push((bucket.to_string(), self.region.clone()));

        if self.cloud.failing_tag_lookups.contains(bucket) {
            bail!("Failed to get tags of bucket '{bucket}': connection reset");
        }
        let found = self.bucket(bucket)?;
        if found.region != self.region {
            bail!(
                "PermanentRedirect: bucket '{bucket}' lives in {}, client is in {}",
                found.region,
                self.region
            );
        }
        Ok(found.tags.clone())
    }
}

struct FakeRds {
    cloud: FakeCloud,
    region: String,
}

impl RdsOperations for FakeRds {
    fn list_instances(&self) -> Result<Vec<DbInstanceSummary>> {
        self.cloud.pause();
        self.cloud.log().rds.push(self.region.clone());

        if self.cloud.failing_rds_regions.contains(&self.region) {
            return Err(anyhow::Error::new(classify_aws_error(
                Some("InvalidClientTokenId"),
                Some("The security token included in the request is invalid"),
            )))
            .with_context(|| {
                format!("Failed to describe RDS instances in region '{}'", self.region)
            });
        }
        Ok(self
            .cloud
            .instances
            .get(&self.region)
            .cloned()
            .unwrap_or_default())
    }
}
