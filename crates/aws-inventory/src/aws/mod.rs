//! AWS resource providers
//!
//! The lister only talks to the traits defined here:
//! - [`S3Operations`]: bucket listing, bucket region and bucket tags
//! - [`RdsOperations`]: database instance listing in one region
//! - [`ClientFactory`]: region-scoped construction of both
//!
//! [`AwsClientFactory`] is the SDK-backed implementation. Its clients are
//! synchronous facades: each call drives the SDK future to completion on
//! the calling worker thread.

pub mod context;
pub mod error;
pub mod factory;
pub mod rds;
pub mod s3;
pub mod types;

pub use context::AwsContext;
pub use error::{AwsError, classify_aws_error, suggestion_for_error};
pub use factory::AwsClientFactory;
pub use rds::RdsClient;
pub use s3::S3Client;
pub use types::{BucketSummary, DbInstanceSummary, Tags};

use anyhow::Result;
use std::sync::Arc;

/// S3 calls needed to inventory buckets
pub trait S3Operations: Send + Sync {
    /// List every bucket owned by the account
    fn list_buckets(&self) -> Result<Vec<BucketSummary>>;

    /// Region the bucket lives in
    fn bucket_region(&self, bucket: &str) -> Result<String>;

    /// Tags of the bucket; a bucket without tags yields an empty map
    fn bucket_tags(&self, bucket: &str) -> Result<Tags>;
}

/// RDS calls needed to inventory database instances
pub trait RdsOperations: Send + Sync {
    /// List every database instance in the client's region
    fn list_instances(&self) -> Result<Vec<DbInstanceSummary>>;
}

/// Builds region-scoped provider clients.
///
/// `None` selects the default region of the loaded AWS configuration.
pub trait ClientFactory: Send + Sync {
    fn s3(&self, region: Option<&str>) -> Result<Arc<dyn S3Operations>>;

    fn rds(&self, region: Option<&str>) -> Result<Arc<dyn RdsOperations>>;
}
