//! Default configuration values
//!
//! Shared by the CLI argument definitions and the configuration tests.

/// Default number of worker threads
pub const DEFAULT_THREADS: usize = 10;

/// Default region selection (every known region)
pub const DEFAULT_REGIONS: &str = "all";

/// Default resource selection (every supported resource type)
pub const DEFAULT_RESOURCES: &str = "all";

/// Default output selection
pub const DEFAULT_OUTPUTS: &str = "stdout";

/// Default directory for file output
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Default file name for file output
pub const DEFAULT_OUTPUT_FILE: &str = "resource.json";

/// Default JSON indentation
pub const DEFAULT_INDENT: &str = "\t";

/// Default bound, in seconds, on draining the worker pool at exit
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Region assumed when S3 reports an empty location constraint
pub const S3_DEFAULT_LOCATION: &str = "us-east-1";
