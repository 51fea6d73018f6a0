//! SDK-backed [`ClientFactory`]

use crate::aws::context::AwsContext;
use crate::aws::rds::RdsClient;
use crate::aws::s3::S3Client;
use crate::aws::{ClientFactory, RdsOperations, S3Operations};
use crate::defaults::S3_DEFAULT_LOCATION;
use anyhow::{Result, anyhow};
use std::sync::Arc;
use tokio::runtime::Handle;

/// Builds SDK clients from a shared [`AwsContext`].
///
/// Clients drive SDK futures on `runtime`, so their blocking methods must be
/// called from threads outside the runtime (the worker pool).
#[derive(Clone, Debug)]
pub struct AwsClientFactory {
    ctx: AwsContext,
    runtime: Handle,
}

impl AwsClientFactory {
    pub fn new(ctx: AwsContext, runtime: Handle) -> Self {
        Self { ctx, runtime }
    }

    fn resolve_region<'a>(&'a self, region: Option<&'a str>) -> Result<&'a str> {
        region.or_else(|| self.ctx.default_region()).ok_or_else(|| {
            anyhow!(
                "No default AWS region configured; set AWS_REGION, --default-region or pass explicit --regions"
            )
        })
    }
}

impl ClientFactory for AwsClientFactory {
    /// Bucket listing and location lookups are global, so without any
    /// default region they go to us-east-1.
    fn s3(&self, region: Option<&str>) -> Result<Arc<dyn S3Operations>> {
        let region = self
            .resolve_region(region)
            .unwrap_or(S3_DEFAULT_LOCATION);
        Ok(Arc::new(S3Client::from_context(
            &self.ctx,
            region,
            self.runtime.clone(),
        )))
    }

    fn rds(&self, region: Option<&str>) -> Result<Arc<dyn RdsOperations>> {
        let region = self.resolve_region(region)?;
        Ok(Arc::new(RdsClient::from_context(
            &self.ctx,
            region,
            self.runtime.clone(),
        )))
    }
}
