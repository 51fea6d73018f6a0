//! aws-inventory: list S3 buckets and RDS instances across AWS regions
//!
//! Every region, bucket and lookup runs as its own task on a fixed worker
//! pool. The resulting inventory is printed as JSON and/or written to files.

use anyhow::{Context, Result};
use aws_inventory::args::{parse_outputs, parse_regions, parse_resources};
use aws_inventory::aws::{AwsClientFactory, AwsContext};
use aws_inventory::config::{AwsConfig, ExecutionConfig, ListConfig, OutputConfig, ScopeConfig};
use aws_inventory::defaults::{
    DEFAULT_INDENT, DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_FILE, DEFAULT_OUTPUTS, DEFAULT_REGIONS,
    DEFAULT_RESOURCES, DEFAULT_SHUTDOWN_TIMEOUT_SECS, DEFAULT_THREADS,
};
use aws_inventory::writer::{JsonFileWriter, OutputKind, StdoutWriter, Writer};
use aws_inventory::{ConfigError, Lister, ResourceKind};
use aws_inventory_executor::{SynchronousExecutor, Threadpool};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "aws-inventory")]
#[command(about = "Concurrent multi-region inventory of S3 buckets and RDS instances")]
#[command(version)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Arguments for the list command (extracted to reduce enum size)
#[derive(clap::Args, Debug)]
struct ListArgs {
    /// Comma-separated regions, "all", or "default" for the configured region only
    #[arg(short, long, default_value = DEFAULT_REGIONS)]
    regions: String,

    /// Comma-separated resource types (s3, rds) or "all"
    #[arg(long, default_value = DEFAULT_RESOURCES)]
    resources: String,

    /// Comma-separated outputs (file, stdout)
    #[arg(short, long, default_value = DEFAULT_OUTPUTS)]
    outputs: String,

    /// Number of worker threads
    #[arg(short, long, env = "AWS_INVENTORY_THREADS", default_value_t = DEFAULT_THREADS)]
    threads: usize,

    /// Directory for the file output
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// File name for the file output, relative to --output-dir
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    output_file: String,

    /// JSON indentation string
    #[arg(long, default_value = DEFAULT_INDENT, hide_default_value = true)]
    indent: String,

    /// Write one file per resource, named after its id
    #[arg(long)]
    per_item: bool,

    /// Flatten each resource into dotted keys
    #[arg(long)]
    flatten: bool,

    /// AWS profile to use
    #[arg(long, env = "AWS_PROFILE")]
    profile: Option<String>,

    /// Static access key id (requires --secret-access-key)
    #[arg(long, env = "AWS_ACCESS_KEY_ID", hide_env_values = true)]
    access_key_id: Option<String>,

    /// Static secret access key (requires --access-key-id)
    #[arg(long, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    secret_access_key: Option<String>,

    /// Session token for temporary static credentials
    #[arg(long, env = "AWS_SESSION_TOKEN", hide_env_values = true)]
    session_token: Option<String>,

    /// Region for the default-region job and the bucket listing
    #[arg(long, env = "AWS_REGION")]
    default_region: Option<String>,

    /// Seconds to wait for the worker pool to drain before exiting
    #[arg(long, default_value_t = DEFAULT_SHUTDOWN_TIMEOUT_SECS)]
    shutdown_timeout: u64,
}

impl TryFrom<ListArgs> for ListConfig {
    type Error = ConfigError;

    fn try_from(args: ListArgs) -> Result<Self, Self::Error> {
        let regions = parse_regions(&args.regions);
        if regions.is_empty() {
            return Err(ConfigError::NoValidRegions(args.regions));
        }
        let resources = parse_resources(&args.resources);
        if resources.is_empty() {
            return Err(ConfigError::NoValidResources(args.resources));
        }
        let outputs = parse_outputs(&args.outputs);
        if outputs.is_empty() {
            return Err(ConfigError::NoValidOutputs(args.outputs));
        }

        let config = Self {
            aws: AwsConfig {
                profile: args.profile,
                access_key_id: args.access_key_id,
                secret_access_key: args.secret_access_key,
                session_token: args.session_token,
                default_region: args.default_region,
            },
            scope: ScopeConfig { regions, resources },
            execution: ExecutionConfig {
                threads: args.threads,
                shutdown_timeout: Duration::from_secs(args.shutdown_timeout),
            },
            output: OutputConfig {
                outputs,
                dir: args.output_dir,
                file_name: args.output_file,
                indent: args.indent,
                per_item: args.per_item,
                flatten: args.flatten,
            },
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List resources and write the inventory
    List(Box<ListArgs>),

    /// Print the program name and version
    Version,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&e);
        std::process::exit(1);
    }
}

/// Print error in a user-friendly way
fn print_error(e: &anyhow::Error) {
    use std::io::Write;

    let mut stderr = std::io::stderr();

    let _ = writeln!(stderr, "\n\x1b[1;31mError:\x1b[0m {e}");

    let mut source = e.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "  \x1b[33mCaused by:\x1b[0m {cause}");
        source = cause.source();
    }

    if std::env::var("RUST_BACKTRACE").is_err() {
        let _ = writeln!(
            stderr,
            "\n\x1b[2mSet RUST_BACKTRACE=1 for a detailed backtrace\x1b[0m"
        );
    } else {
        let backtrace = e.backtrace();
        if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            let _ = writeln!(stderr, "\n\x1b[2mBacktrace:\x1b[0m\n{backtrace}");
        }
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose)?;

    match args.command {
        Command::List(list_args) => {
            let config = ListConfig::try_from(*list_args).context("Invalid configuration")?;
            handle_list(config).await?;
        }
        Command::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// Log to stderr so stdout only carries the JSON document
fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // Reduce noise from the AWS SDK (show only warnings and errors)
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
        .add_directive("aws_config=warn".parse()?)
        .add_directive("aws_sdk=warn".parse()?)
        .add_directive("aws_smithy=warn".parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Build the writers up front so a bad output path fails before any AWS call
fn build_writers(config: &ListConfig) -> Result<Vec<Box<dyn Writer>>> {
    let output = &config.output;
    let mut writers: Vec<Box<dyn Writer>> = Vec::with_capacity(output.outputs.len());
    for kind in &output.outputs {
        match kind {
            OutputKind::File => writers.push(Box::new(
                JsonFileWriter::new(&output.dir)
                    .output_file(output.file_name.as_str())?
                    .indentation(output.indent.as_str())
                    .per_item(output.per_item),
            )),
            OutputKind::Stdout => writers.push(Box::new(
                StdoutWriter::new().indentation(output.indent.as_str()),
            )),
        }
    }
    Ok(writers)
}

/// Handle the list command
async fn handle_list(config: ListConfig) -> Result<()> {
    let writers = build_writers(&config)?;

    if let Some(profile) = &config.aws.profile {
        info!(profile = %profile, "Using AWS profile");
    }
    let aws = AwsContext::load(&config.aws).await;

    let pool = Arc::new(
        Threadpool::new(config.execution.threads).context("Failed to start worker pool")?,
    );
    let executor = SynchronousExecutor::new(Arc::clone(&pool));
    let factory = AwsClientFactory::new(aws, Handle::current());

    let mut builder = Lister::builder(Arc::new(factory), executor)
        .with_resources(config.scope.resources.clone());
    if let Some(regions) = config.scope.regions.clone().into_regions() {
        builder = builder.with_regions(regions);
    }
    let lister = builder.build();

    info!(
        regions = ?lister.regions().map(<[String]>::len),
        resources = ?lister.resources(),
        threads = config.execution.threads,
        stdout = config.writes_stdout(),
        file = ?config
            .writes_file()
            .then(|| config.output.dir.join(&config.output.file_name)),
        "Starting inventory"
    );

    let started = Instant::now();
    let shutdown_timeout = config.execution.shutdown_timeout;
    // Provider calls block their worker on the runtime, so the whole listing
    // runs off the async threads.
    let inventory = tokio::task::spawn_blocking(move || {
        let inventory = lister.list();
        drop(lister);
        pool.shutdown(shutdown_timeout);
        inventory
    })
    .await
    .context("Inventory listing panicked")?;

    let document = inventory
        .to_document(config.output.flatten)
        .context("Failed to build the output document")?;
    for writer in &writers {
        writer.write(&document)?;
    }

    info!(
        resources = inventory.resources.len(),
        s3 = inventory.count(ResourceKind::S3),
        rds = inventory.count(ResourceKind::Rds),
        failures = inventory.failures.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Inventory complete"
    );
    if !inventory.is_complete() {
        warn!(
            failures = inventory.failures.len(),
            "Some regions or buckets could not be listed and are missing from the output"
        );
    }

    Ok(())
}
