//! Provider-neutral records returned by the AWS clients

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Resource tags. RDS tags may lack a value, hence the `Option`.
pub type Tags = BTreeMap<String, Option<String>>;

/// One entry of the S3 bucket listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketSummary {
    pub name: String,
    pub created: Option<DateTime<Utc>>,
}

/// One RDS database instance
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DbInstanceSummary {
    pub arn: String,
    pub id: String,
    /// Region of the client that listed the instance
    pub region: String,
    pub created: Option<DateTime<Utc>>,
    pub instance_type: Option<String>,
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

/// Convert an SDK timestamp to chrono
pub(crate) fn to_chrono(dt: &aws_sdk_s3::primitives::DateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(dt.secs(), dt.subsec_nanos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_chrono() {
        let dt = aws_sdk_s3::primitives::DateTime::from_secs_and_nanos(1_700_000_000, 500);
        let converted = to_chrono(&dt).unwrap();
        assert_eq!(converted.timestamp(), 1_700_000_000);
        assert_eq!(converted.timestamp_subsec_nanos(), 500);
    }
}
