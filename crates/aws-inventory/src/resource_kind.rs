//! Supported AWS resource types
//!
//! The declaration order is the listing order: S3 buckets first, then RDS
//! instances.

use serde::Serialize;
use std::fmt;

/// Types of AWS resources the inventory can list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ResourceKind {
    /// S3 bucket (global listing, per-bucket region and tags)
    S3,
    /// RDS database instance (listed per region)
    #[serde(rename = "RDS")]
    Rds,
}

impl ResourceKind {
    /// Every supported kind, in listing order
    pub const ALL: [ResourceKind; 2] = [ResourceKind::S3, ResourceKind::Rds];

    /// Name used on the command line
    pub fn arg_name(self) -> &'static str {
        match self {
            ResourceKind::S3 => "s3",
            ResourceKind::Rds => "rds",
        }
    }

    /// Name used in output documents and log fields
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::S3 => "S3",
            ResourceKind::Rds => "RDS",
        }
    }

    /// Parse a sanitized command-line name
    pub fn from_arg(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.arg_name() == name)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_order() {
        assert!(ResourceKind::S3 < ResourceKind::Rds);
        assert_eq!(ResourceKind::ALL, [ResourceKind::S3, ResourceKind::Rds]);
    }

    #[test]
    fn test_arg_names_round_trip() {
        for kind in ResourceKind::ALL {
            assert_eq!(ResourceKind::from_arg(kind.arg_name()), Some(kind));
        }
        assert_eq!(ResourceKind::from_arg("ec2"), None);
        assert_eq!(ResourceKind::from_arg("S3"), None);
    }

    #[test]
    fn test_serialized_label() {
        assert_eq!(serde_json::to_string(&ResourceKind::Rds).unwrap(), "\"RDS\"");
        assert_eq!(ResourceKind::S3.to_string(), "S3");
    }
}
