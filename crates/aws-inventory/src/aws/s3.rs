//! S3 bucket inventory calls

use crate::aws::S3Operations;
use crate::aws::context::AwsContext;
use crate::aws::error::AwsError;
use crate::aws::types::{BucketSummary, Tags, to_chrono};
use crate::defaults::S3_DEFAULT_LOCATION;
use anyhow::{Context, Result};
use aws_sdk_s3::Client;
use tokio::runtime::Handle;
use tracing::debug;

/// Legacy location constraint returned for buckets created as "EU"
const LEGACY_EU_LOCATION: &str = "EU";
const LEGACY_EU_REGION: &str = "eu-west-1";

/// Region-scoped S3 client with a blocking facade
pub struct S3Client {
    client: Client,
    region: String,
    runtime: Handle,
}

impl S3Client {
    /// Create an S3 client from a pre-loaded AWS context
    pub fn from_context(ctx: &AwsContext, region: &str, runtime: Handle) -> Self {
        Self {
            client: ctx.s3_client(Some(region)),
            region: region.to_string(),
            runtime,
        }
    }

    async fn fetch_buckets(&self) -> Result<Vec<BucketSummary>> {
        let mut buckets = Vec::new();
        let mut continuation_token = None;

        loop {
            let response = self
                .client
                .list_buckets()
                .set_continuation_token(continuation_token)
                .send()
                .await
                .map_err(|e| AwsError::from_sdk_error(&e))
                .with_context(|| format!("Failed to list S3 buckets via {}", self.region))?;

            for bucket in response.buckets() {
                let Some(name) = bucket.name() else {
                    continue;
                };
                buckets.push(BucketSummary {
                    name: name.to_string(),
                    created: bucket.creation_date().and_then(to_chrono),
                });
            }

            continuation_token = response.continuation_token().map(str::to_string);
            if continuation_token.is_none() {
                break;
            }
        }

        debug!(region = %self.region, count = buckets.len(), "Listed S3 buckets");
        Ok(buckets)
    }

    async fn fetch_bucket_region(&self, bucket: &str) -> Result<String> {
        let response = self
            .client
            .get_bucket_location()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| AwsError::from_sdk_error(&e))
            .with_context(|| format!("Failed to get location of bucket '{bucket}'"))?;

        let constraint = response
            .location_constraint()
            .map(|c| c.as_str())
            .unwrap_or_default();
        Ok(region_from_location(constraint))
    }

    async fn fetch_bucket_tags(&self, bucket: &str) -> Result<Tags> {
        let response = match self.client.get_bucket_tagging().bucket(bucket).send().await {
            Ok(response) => response,
            Err(e) => {
                let err = AwsError::from_sdk_error(&e);
                if err.is_no_tag_set() {
                    return Ok(Tags::new());
                }
                return Err(err).with_context(|| {
                    format!("Failed to get tags of bucket '{bucket}' in {}", self.region)
                });
            }
        };

        Ok(response
            .tag_set()
            .iter()
            .map(|tag| (tag.key().to_string(), Some(tag.value().to_string())))
            .collect())
    }
}

impl S3Operations for S3Client {
    fn list_buckets(&self) -> Result<Vec<BucketSummary>> {
        self.runtime.block_on(self.fetch_buckets())
    }

    fn bucket_region(&self, bucket: &str) -> Result<String> {
        self.runtime.block_on(self.fetch_bucket_region(bucket))
    }

    fn bucket_tags(&self, bucket: &str) -> Result<Tags> {
        self.runtime.block_on(self.fetch_bucket_tags(bucket))
    }
}

/// Map a GetBucketLocation constraint to a region name.
///
/// Buckets in us-east-1 report an empty constraint; very old buckets in
/// eu-west-1 report "EU".
pub fn region_from_location(constraint: &str) -> String {
    match constraint {
        "" => S3_DEFAULT_LOCATION.to_string(),
        LEGACY_EU_LOCATION => LEGACY_EU_REGION.to_string(),
        other => other.to_string(),
    }
}
