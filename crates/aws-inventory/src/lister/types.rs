//! Inventory records and per-unit failure reports

use crate::aws::error::suggestion_for_error;
use crate::aws::{BucketSummary, DbInstanceSummary, Tags};
use crate::flatten::flatten_document;
use crate::resource_kind::ResourceKind;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::warn;

/// One inventoried resource, as emitted in the output document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub arn: String,
    pub id: String,
    pub region: String,
    pub creation_time: Option<DateTime<Utc>>,
    pub data: ResourceData,
}

/// Resource-type specific details
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResourceData {
    S3(S3Data),
    Rds(RdsData),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Data {
    pub location_constraint: String,
    pub tags: Tags,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RdsData {
    pub instance_type: Option<String>,
    #[serde(rename = "AZ")]
    pub availability_zone: Option<String>,
    pub allocated_storage: Option<i32>,
    pub engine: Option<String>,
    pub engine_version: Option<String>,
    pub replica_mode: Option<String>,
    pub status: Option<String>,
    pub multi_az: Option<bool>,
    pub multi_tenant: Option<bool>,
    pub tags: Tags,
}

impl Resource {
    /// Join a listed bucket with its region and tags
    pub fn s3(bucket: BucketSummary, region: String, tags: Tags) -> Self {
        Self {
            kind: ResourceKind::S3,
            arn: format!("arn:aws:s3:::{}", bucket.name),
            id: bucket.name,
            region: region.clone(),
            creation_time: bucket.created,
            data: ResourceData::S3(S3Data {
                location_constraint: region,
                tags,
            }),
        }
    }

    pub fn rds(db: DbInstanceSummary) -> Self {
        Self {
            kind: ResourceKind::Rds,
            arn: db.arn,
            id: db.id,
            region: db.region,
            creation_time: db.created,
            data: ResourceData::Rds(RdsData {
                instance_type: db.instance_type,
                availability_zone: db.availability_zone,
                allocated_storage: db.allocated_storage,
                engine: db.engine,
                engine_version: db.engine_version,
                replica_mode: db.replica_mode,
                status: db.status,
                multi_az: db.multi_az,
                multi_tenant: db.multi_tenant,
                tags: db.tags,
            }),
        }
    }
}

/// Step of the listing a unit of work belonged to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    ListBuckets,
    BucketRegion,
    BucketTags,
    ListInstances,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::ListBuckets => "list-buckets",
            Stage::BucketRegion => "bucket-region",
            Stage::BucketTags => "bucket-tags",
            Stage::ListInstances => "list-instances",
        })
    }
}

/// A unit of work that was dropped from the inventory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: ResourceKind,
    pub stage: Stage,
    /// Region or bucket name the unit was keyed by
    pub key: String,
    /// Full error chain
    pub error: String,
    pub suggestion: Option<String>,
}

impl Failure {
    /// Log a dropped unit and build its report
    pub(crate) fn record(
        kind: ResourceKind,
        stage: Stage,
        key: impl Into<String>,
        error: &anyhow::Error,
    ) -> Self {
        let key = key.into();
        let message = format!("{error:#}");
        let suggestion = suggestion_for_error(error);

        warn!(
            resource_type = %kind,
            stage = %stage,
            key = %key,
            error = %message,
            suggestion = suggestion.as_deref().unwrap_or(""),
            "Dropping failed unit from inventory"
        );

        Self {
            kind,
            stage,
            key,
            error: message,
            suggestion,
        }
    }
}

/// Result of a listing run
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    pub resources: Vec<Resource>,
    pub failures: Vec<Failure>,
}

impl Inventory {
    /// Whether every unit of work succeeded
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of resources of one kind
    pub fn count(&self, kind: ResourceKind) -> usize {
        self.resources.iter().filter(|r| r.kind == kind).count()
    }

    /// The output document: an array of resources, optionally flattened
    pub fn to_document(&self, flatten: bool) -> Result<Value, serde_json::Error> {
        let document = serde_json::to_value(&self.resources)?;
        Ok(if flatten {
            flatten_document(&document)
        } else {
            document
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_s3_resource_json() {
        let bucket = BucketSummary {
            name: "logs".to_string(),
            created: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).single(),
        };
        let mut tags = Tags::new();
        tags.insert("team".to_string(), Some("infra".to_string()));

        let resource = Resource::s3(bucket, "eu-west-1".to_string(), tags);
        assert_eq!(
            serde_json::to_value(&resource).unwrap(),
            json!({
                "type": "S3",
                "arn": "arn:aws:s3:::logs",
                "id": "logs",
                "region": "eu-west-1",
                "creationTime": "2024-01-02T03:04:05Z",
                "data": {
                    "locationConstraint": "eu-west-1",
                    "tags": {"team": "infra"}
                }
            })
        );
    }

    #[test]
    fn test_rds_resource_json() {
        let db = DbInstanceSummary {
            arn: "arn:aws:rds:us-east-1:1:db:orders".to_string(),
            id: "orders".to_string(),
            region: "us-east-1".to_string(),
            availability_zone: Some("us-east-1a".to_string()),
            multi_az: Some(true),
            ..Default::default()
        };

        let value = serde_json::to_value(Resource::rds(db)).unwrap();
        assert_eq!(value["type"], "RDS");
        assert_eq!(value["creationTime"], serde_json::Value::Null);
        assert_eq!(value["data"]["AZ"], "us-east-1a");
        assert_eq!(value["data"]["multiAz"], true);
        assert_eq!(value["data"]["tags"], json!({}));
    }

    #[test]
    fn test_failure_record_keeps_chain() {
        let err = anyhow::anyhow!("connection reset").context("Failed to list S3 buckets");
        let failure = Failure::record(ResourceKind::S3, Stage::ListBuckets, "default", &err);
        assert_eq!(failure.error, "Failed to list S3 buckets: connection reset");
        assert_eq!(failure.key, "default");
        assert!(failure.suggestion.is_none());
    }

    #[test]
    fn test_document_flattening() {
        let mut tags = Tags::new();
        tags.insert("env".to_string(), Some("prod".to_string()));
        let inventory = Inventory {
            resources: vec![Resource::s3(
                BucketSummary {
                    name: "logs".to_string(),
                    created: None,
                },
                "us-east-1".to_string(),
                tags,
            )],
            failures: Vec::new(),
        };

        let nested = inventory.to_document(false).unwrap();
        assert_eq!(nested[0]["data"]["tags"]["env"], "prod");

        let flat = inventory.to_document(true).unwrap();
        assert_eq!(flat[0]["data.tags.env"], "prod");
        assert_eq!(flat[0]["data.locationConstraint"], "us-east-1");
        assert_eq!(flat[0]["type"], "S3");
    }

    #[test]
    fn test_stage_labels() {
        assert_eq!(Stage::BucketTags.to_string(), "bucket-tags");
        assert_eq!(Stage::ListInstances.to_string(), "list-instances");
    }
}
