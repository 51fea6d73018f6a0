//! Configuration types for an inventory run

use crate::args::RegionSelection;
use crate::defaults::{
    DEFAULT_INDENT, DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_FILE, DEFAULT_SHUTDOWN_TIMEOUT_SECS,
    DEFAULT_THREADS,
};
use crate::error::ConfigError;
use crate::resource_kind::ResourceKind;
use crate::writer::OutputKind;
use std::path::PathBuf;
use std::time::Duration;

/// AWS credentials and default region
#[derive(Debug, Clone, Default)]
pub struct AwsConfig {
    /// AWS profile name (overrides default credential resolution)
    pub profile: Option<String>,
    /// Static access key id, only used together with the secret
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    /// Session token for temporary static credentials
    pub session_token: Option<String>,
    /// Region used for the default-region job and the bucket listing
    pub default_region: Option<String>,
}

/// What to list, and where
#[derive(Debug, Clone)]
pub struct ScopeConfig {
    pub regions: RegionSelection,
    pub resources: Vec<ResourceKind>,
}

/// Worker pool sizing
#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    /// Number of worker threads
    pub threads: usize,
    /// How long to wait for the pool to drain on shutdown
    pub shutdown_timeout: Duration,
}

/// Output rendering and destinations
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub outputs: Vec<OutputKind>,
    /// Directory for the file output
    pub dir: PathBuf,
    /// File name inside `dir`
    pub file_name: String,
    pub indent: String,
    /// Write one file per resource instead of one document
    pub per_item: bool,
    /// Flatten each resource into dotted keys
    pub flatten: bool,
}

/// Configuration for an inventory run
///
/// Composed of focused sub-configs, validated once before any AWS call.
#[derive(Debug, Clone)]
pub struct ListConfig {
    pub aws: AwsConfig,
    pub scope: ScopeConfig,
    pub execution: ExecutionConfig,
    pub output: OutputConfig,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            aws: AwsConfig::default(),
            scope: ScopeConfig {
                regions: RegionSelection::Regions(crate::args::all_regions()),
                resources: ResourceKind::ALL.to_vec(),
            },
            execution: ExecutionConfig {
                threads: DEFAULT_THREADS,
                shutdown_timeout: Duration::from_secs(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
            },
            output: OutputConfig {
                outputs: vec![OutputKind::default()],
                dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
                file_name: DEFAULT_OUTPUT_FILE.to_string(),
                indent: DEFAULT_INDENT.to_string(),
                per_item: false,
                flatten: false,
            },
        }
    }
}

impl ListConfig {
    /// Check everything that can be checked without talking to AWS.
    ///
    /// Command-line parsing reports empty selections together with the raw
    /// argument; here they only carry an empty string.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.execution.threads == 0 {
            return Err(ConfigError::InvalidThreads(self.execution.threads));
        }
        if self.execution.shutdown_timeout.is_zero() {
            return Err(ConfigError::InvalidShutdownTimeout);
        }
        if self.aws.access_key_id.is_some() != self.aws.secret_access_key.is_some() {
            return Err(ConfigError::PartialCredentials);
        }
        if self.scope.regions.is_empty() {
            return Err(ConfigError::NoValidRegions(String::new()));
        }
        if self.scope.resources.is_empty() {
            return Err(ConfigError::NoValidResources(String::new()));
        }
        if self.output.outputs.is_empty() {
            return Err(ConfigError::NoValidOutputs(String::new()));
        }
        Ok(())
    }

    /// Whether the JSON file output is selected
    pub fn writes_file(&self) -> bool {
        self.output.outputs.contains(&OutputKind::File)
    }

    pub fn writes_stdout(&self) -> bool {
        self.output.outputs.contains(&OutputKind::Stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ListConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.execution.threads, 10);
        assert_eq!(config.output.file_name, "resource.json");
        assert_eq!(config.output.indent, "\t");
        assert!(config.writes_stdout());
        assert!(!config.writes_file());
    }

    #[test]
    fn test_output_destinations() {
        let mut config = ListConfig::default();
        config.output.outputs = vec![OutputKind::File, OutputKind::Stdout];
        assert!(config.writes_file());
        assert!(config.writes_stdout());

        config.output.outputs = vec![OutputKind::File];
        assert!(config.writes_file());
        assert!(!config.writes_stdout());
    }

    #[test]
    fn test_zero_threads_rejected() {
        let mut config = ListConfig::default();
        config.execution.threads = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidThreads(0)));
    }

    #[test]
    fn test_zero_shutdown_timeout_rejected() {
        let mut config = ListConfig::default();
        config.execution.shutdown_timeout = Duration::ZERO;
        assert_eq!(config.validate(), Err(ConfigError::InvalidShutdownTimeout));
    }

    #[test]
    fn test_partial_credentials_rejected() {
        let mut config = ListConfig::default();
        config.aws.access_key_id = Some("AKIAEXAMPLE".to_string());
        assert_eq!(config.validate(), Err(ConfigError::PartialCredentials));

        config.aws.secret_access_key = Some("secret".to_string());
        assert!(config.validate().is_ok());

        config.aws.access_key_id = None;
        assert_eq!(config.validate(), Err(ConfigError::PartialCredentials));
    }

    #[test]
    fn test_empty_selections_rejected() {
        let mut config = ListConfig::default();
        config.scope.regions = RegionSelection::Regions(Vec::new());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NoValidRegions(_))
        ));

        let mut config = ListConfig::default();
        config.scope.regions = RegionSelection::Default;
        assert!(config.validate().is_ok());

        config.scope.resources.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NoValidResources(_))
        ));

        let mut config = ListConfig::default();
        config.output.outputs.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NoValidOutputs(_))
        ));
    }
}
