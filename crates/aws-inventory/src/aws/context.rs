//! Shared AWS configuration context
//!
//! Provides `AwsContext` for loading AWS SDK configuration once and
//! creating region-scoped service clients from the same config.

use crate::config::AwsConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use std::sync::Arc;
use tracing::debug;

const CREDENTIALS_PROVIDER_NAME: &str = "aws-inventory-static";

/// Shared AWS configuration context for creating service clients.
///
/// # Example
/// ```ignore
/// let aws = AwsContext::load(&config.aws).await;
///
/// // Clients for different regions share credentials and settings
/// let s3 = aws.s3_client(None);
/// let rds = aws.rds_client(Some("eu-west-1"));
/// ```
#[derive(Clone)]
pub struct AwsContext {
    config: Arc<SdkConfig>,
}

impl AwsContext {
    /// Load AWS configuration.
    ///
    /// Credentials come from the static key pair when one is configured,
    /// otherwise from the usual chain (environment, profile, IMDS). The
    /// default region comes from `default_region` or the environment/profile.
    pub async fn load(settings: &AwsConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(profile) = &settings.profile {
            loader = loader.profile_name(profile);
        }
        if let (Some(key_id), Some(secret)) =
            (&settings.access_key_id, &settings.secret_access_key)
        {
            loader = loader.credentials_provider(aws_sdk_s3::config::Credentials::new(
                key_id,
                secret,
                settings.session_token.clone(),
                None,
                CREDENTIALS_PROVIDER_NAME,
            ));
        }
        if let Some(region) = &settings.default_region {
            loader = loader.region(Region::new(region.clone()));
        }

        let config = loader.load().await;
        debug!(
            default_region = ?config.region().map(|r| r.as_ref().to_string()),
            "Loaded AWS configuration"
        );

        Self::from_sdk_config(config)
    }

    /// Wrap an already loaded SDK config
    pub fn from_sdk_config(config: SdkConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Get the underlying SDK config for direct client construction.
    pub fn sdk_config(&self) -> &SdkConfig {
        &self.config
    }

    /// Region used when a client is requested without one
    pub fn default_region(&self) -> Option<&str> {
        self.config.region().map(|r| r.as_ref())
    }

    /// Create an S3 client, optionally scoped to another region.
    pub fn s3_client(&self, region: Option<&str>) -> aws_sdk_s3::Client {
        let mut builder = aws_sdk_s3::config::Builder::from(self.sdk_config());
        if let Some(region) = region {
            builder = builder.region(Region::new(region.to_string()));
        }
        aws_sdk_s3::Client::from_conf(builder.build())
    }

    /// Create an RDS client, optionally scoped to another region.
    pub fn rds_client(&self, region: Option<&str>) -> aws_sdk_rds::Client {
        let mut builder = aws_sdk_rds::config::Builder::from(self.sdk_config());
        if let Some(region) = region {
            builder = builder.region(Region::new(region.to_string()));
        }
        aws_sdk_rds::Client::from_conf(builder.build())
    }
}

impl std::fmt::Debug for AwsContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsContext")
            .field("default_region", &self.default_region())
            .finish_non_exhaustive()
    }
}
