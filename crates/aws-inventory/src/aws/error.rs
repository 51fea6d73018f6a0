//! AWS error classification
//!
//! Provides typed errors for AWS SDK operations using the error code from
//! `ProvideErrorMetadata` instead of string matching on Debug output.

use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use thiserror::Error;

/// AWS error categories, used for logging and per-unit failure reports
#[derive(Debug, Error)]
pub enum AwsError {
    /// Resource was not found (e.g. a bucket deleted mid-listing)
    #[error("Resource not found: {message}")]
    NotFound { message: String },

    /// The bucket has no tag set
    #[error("No tag set")]
    NoTagSet,

    /// The credentials are not allowed to make the call, or are invalid
    #[error("Access denied ({code}): {message}")]
    AccessDenied { code: String, message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    Throttled,

    /// Generic AWS SDK error with code and message
    #[error("AWS error: {message}")]
    Sdk {
        code: Option<String>,
        message: String,
    },
}

impl AwsError {
    /// Classify any SDK error that exposes error metadata.
    ///
    /// Errors without a service message (timeouts, DNS failures) fall back
    /// to the full display chain of the error.
    pub fn from_sdk_error<E>(err: &E) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error,
    {
        let fallback = DisplayErrorContext(err).to_string();
        classify_aws_error(err.code(), Some(err.message().unwrap_or(&fallback)))
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, AwsError::NotFound { .. })
    }

    /// Check if the bucket simply has no tags
    pub fn is_no_tag_set(&self) -> bool {
        matches!(self, AwsError::NoTagSet)
    }

    /// Check if this is an authorization failure
    pub fn is_access_denied(&self) -> bool {
        matches!(self, AwsError::AccessDenied { .. })
    }

    /// Get a user-friendly suggestion for resolving this error, if available.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            AwsError::AccessDenied { code, .. } => suggestion_for_code(code),
            AwsError::Throttled => suggestion_for_code("Throttling"),
            AwsError::Sdk { code: Some(c), .. } => suggestion_for_code(c),
            _ => None,
        }
    }
}

/// Known AWS error codes for "not found" conditions
const NOT_FOUND_CODES: &[&str] = &[
    "NoSuchBucket",
    "NoSuchKey",
    "DBInstanceNotFound",
    "DBInstanceNotFoundFault",
];

/// Error code S3 returns for a bucket without tags
const NO_TAG_SET_CODE: &str = "NoSuchTagSet";

/// Known AWS error codes for authorization failures
const ACCESS_DENIED_CODES: &[&str] = &[
    "AccessDenied",
    "AccessDeniedException",
    "AuthFailure",
    "UnauthorizedOperation",
    "InvalidClientTokenId",
    "UnrecognizedClientException",
    "ExpiredToken",
    "SignatureDoesNotMatch",
    "InvalidAccessKeyId",
];

/// Known AWS error codes for throttling/rate limiting
const THROTTLING_CODES: &[&str] = &[
    "Throttling",
    "ThrottlingException",
    "RequestLimitExceeded",
    "SlowDown",
    "TooManyRequestsException",
];

/// Classify an AWS SDK error using the error code.
pub fn classify_aws_error(code: Option<&str>, message: Option<&str>) -> AwsError {
    let message = message.unwrap_or("Unknown error").to_string();

    match code {
        Some(c) if NOT_FOUND_CODES.contains(&c) => AwsError::NotFound { message },
        Some(NO_TAG_SET_CODE) => AwsError::NoTagSet,
        Some(c) if ACCESS_DENIED_CODES.contains(&c) => AwsError::AccessDenied {
            code: c.to_string(),
            message,
        },
        Some(c) if THROTTLING_CODES.contains(&c) => AwsError::Throttled,
        _ => AwsError::Sdk {
            code: code.map(|s| s.to_string()),
            message,
        },
    }
}

/// Find the first classified AWS error in an anyhow chain and return its
/// suggestion, if any.
pub fn suggestion_for_error(error: &anyhow::Error) -> Option<String> {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<AwsError>())
        .and_then(AwsError::suggestion)
}

/// Error code to user-friendly suggestion mapping
const SUGGESTIONS: &[(&str, &str)] = &[
    (
        "AccessDenied",
        "Check the IAM permissions of the credentials in use \
         (s3:ListAllMyBuckets, s3:GetBucketLocation, s3:GetBucketTagging, rds:DescribeDBInstances).",
    ),
    (
        "AccessDeniedException",
        "Check the IAM permissions of the credentials in use \
         (s3:ListAllMyBuckets, s3:GetBucketLocation, s3:GetBucketTagging, rds:DescribeDBInstances).",
    ),
    (
        "UnauthorizedOperation",
        "Check the IAM permissions of the credentials in use.",
    ),
    (
        "InvalidClientTokenId",
        "Refresh the credentials, or check that the region is enabled for this account.",
    ),
    (
        "UnrecognizedClientException",
        "Refresh the credentials, or check that the region is enabled for this account.",
    ),
    (
        "ExpiredToken",
        "The session token has expired. Refresh the credentials or select another --profile.",
    ),
    (
        "InvalidAccessKeyId",
        "The access key id is unknown. Check --access-key-id or the selected --profile.",
    ),
    (
        "SignatureDoesNotMatch",
        "The secret access key does not match the access key id.",
    ),
    (
        "Throttling",
        "AWS API rate limit hit. Run again with fewer --threads.",
    ),
    (
        "ThrottlingException",
        "AWS API rate limit hit. Run again with fewer --threads.",
    ),
    (
        "RequestLimitExceeded",
        "AWS API rate limit hit. Run again with fewer --threads.",
    ),
];

/// Get a user-friendly suggestion for a known error code.
fn suggestion_for_code(code: &str) -> Option<String> {
    SUGGESTIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, s)| (*s).to_string())
}
