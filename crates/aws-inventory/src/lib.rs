//! aws-inventory: concurrent multi-region inventory of AWS resources
//!
//! Lists S3 buckets and RDS database instances across a set of regions and
//! emits them as one JSON document. Every region, bucket and lookup is an
//! independent task run on the worker pool from `aws-inventory-executor`;
//! a task that fails is logged and reported without affecting the others.
//!
//! ## Modules
//!
//! - [`args`]: Parsing of the region, resource and output selections
//! - [`aws`]: Provider traits and their SDK-backed implementation
//! - [`config`]: Run configuration and validation
//! - [`lister`]: Fan-out of listing tasks and assembly of the inventory
//! - [`writer`]: Stdout and JSON file outputs
//! - [`flatten`]: Dotted-key flattening of the output document

pub mod args;
pub mod aws;
pub mod config;
pub mod defaults;
pub mod error;
pub mod flatten;
pub mod lister;
pub mod resource_kind;
pub mod writer;

#[cfg(test)]
mod testing;

pub use error::ConfigError;
pub use lister::{Inventory, Lister, Resource};
pub use resource_kind::ResourceKind;
