//! Inventory orchestration
//!
//! The lister turns the selected regions and resource types into batches of
//! independent tasks, runs each batch through the synchronous executor and
//! folds the successful outcomes into one [`Inventory`]. A failed unit (one
//! region, one bucket) is logged and reported in [`Inventory::failures`];
//! it never takes other units down with it.

mod gather;
mod rds;
mod s3;
mod tasks;
pub mod types;

pub use types::{Failure, Inventory, RdsData, Resource, ResourceData, S3Data, Stage};

use crate::aws::ClientFactory;
use crate::resource_kind::ResourceKind;
use aws_inventory_executor::SynchronousExecutor;
use std::sync::Arc;
use tracing::info;

/// Lists the selected resource types across the selected regions
pub struct Lister {
    factory: Arc<dyn ClientFactory>,
    executor: SynchronousExecutor,
    /// `None` runs a single job in the default region
    regions: Option<Vec<String>>,
    resources: Vec<ResourceKind>,
}

/// Builder for [`Lister`]
pub struct ListerBuilder {
    factory: Arc<dyn ClientFactory>,
    executor: SynchronousExecutor,
    regions: Option<Vec<String>>,
    resources: Vec<ResourceKind>,
}

impl ListerBuilder {
    /// One job per region instead of a single default-region job
    pub fn with_regions(mut self, regions: Vec<String>) -> Self {
        self.regions = Some(regions);
        self
    }

    /// Restrict the resource types to list (default: all)
    pub fn with_resources(mut self, resources: Vec<ResourceKind>) -> Self {
        self.resources = resources;
        self
    }

    pub fn build(self) -> Lister {
        let mut resources = self.resources;
        resources.sort();
        resources.dedup();

        Lister {
            factory: self.factory,
            executor: self.executor,
            regions: self.regions,
            resources,
        }
    }
}

impl Lister {
    pub fn builder(factory: Arc<dyn ClientFactory>, executor: SynchronousExecutor) -> ListerBuilder {
        ListerBuilder {
            factory,
            executor,
            regions: None,
            resources: ResourceKind::ALL.to_vec(),
        }
    }

    /// Selected regions, `None` for the default-region job
    pub fn regions(&self) -> Option<&[String]> {
        self.regions.as_deref()
    }

    /// Selected resource types, in listing order
    pub fn resources(&self) -> &[ResourceKind] {
        &self.resources
    }

    /// Run the listing. Blocks until every batch has completed.
    pub fn list(&self) -> Inventory {
        let mut inventory = Inventory::default();

        for &kind in &self.resources {
            let failed_before = inventory.failures.len();
            let resources = match kind {
                ResourceKind::S3 => self.list_s3(&mut inventory.failures),
                ResourceKind::Rds => self.list_rds(&mut inventory.failures),
            };
            info!(
                resource_type = %kind,
                count = resources.len(),
                failures = inventory.failures.len() - failed_before,
                "Listed resources"
            );
            inventory.resources.extend(resources);
        }

        inventory
    }
}
