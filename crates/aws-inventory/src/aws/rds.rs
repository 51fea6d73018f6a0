//! RDS instance inventory calls

use crate::aws::RdsOperations;
use crate::aws::context::AwsContext;
use crate::aws::error::AwsError;
use crate::aws::types::{DbInstanceSummary, Tags, to_chrono};
use anyhow::{Context, Result};
use aws_sdk_rds::Client;
use aws_sdk_rds::types::DbInstance;
use tokio::runtime::Handle;
use tracing::debug;

/// Region-scoped RDS client with a blocking facade
pub struct RdsClient {
    client: Client,
    region: String,
    runtime: Handle,
}

impl RdsClient {
    /// Create an RDS client from a pre-loaded AWS context
    pub fn from_context(ctx: &AwsContext, region: &str, runtime: Handle) -> Self {
        Self {
            client: ctx.rds_client(Some(region)),
            region: region.to_string(),
            runtime,
        }
    }

    async fn fetch_instances(&self) -> Result<Vec<DbInstanceSummary>> {
        let mut instances = Vec::new();
        let mut marker = None;

        loop {
            let response = self
                .client
                .describe_db_instances()
                .set_marker(marker)
                .send()
                .await
                .map_err(|e| AwsError::from_sdk_error(&e))
                .with_context(|| {
                    format!("Failed to describe RDS instances in region '{}'", self.region)
                })?;

            instances.extend(
                response
                    .db_instances()
                    .iter()
                    .map(|db| summarize(db, &self.region)),
            );

            marker = response.marker().map(str::to_string);
            if marker.is_none() {
                break;
            }
        }

        debug!(region = %self.region, count = instances.len(), "Listed RDS instances");
        Ok(instances)
    }
}

impl RdsOperations for RdsClient {
    fn list_instances(&self) -> Result<Vec<DbInstanceSummary>> {
        self.runtime.block_on(self.fetch_instances())
    }
}

fn owned(s: Option<&str>) -> Option<String> {
    s.map(str::to_string)
}

fn summarize(db: &DbInstance, region: &str) -> DbInstanceSummary {
    DbInstanceSummary {
        arn: db.db_instance_arn().unwrap_or_default().to_string(),
        id: db.db_instance_identifier().unwrap_or_default().to_string(),
        region: region.to_string(),
        created: db.instance_create_time().and_then(to_chrono),
        instance_type: owned(db.db_instance_class()),
        availability_zone: owned(db.availability_zone()),
        allocated_storage: db.allocated_storage(),
        engine: owned(db.engine()),
        engine_version: owned(db.engine_version()),
        replica_mode: db.replica_mode().map(|m| m.as_str().to_string()),
        status: owned(db.db_instance_status()),
        multi_az: db.multi_az(),
        multi_tenant: db.multi_tenant(),
        tags: db
            .tag_list()
            .iter()
            .filter_map(|tag| {
                let key = tag.key()?;
                Some((key.to_string(), tag.value().map(str::to_string)))
            })
            .collect::<Tags>(),
    }
}
