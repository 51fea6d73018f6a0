//! RDS listing: one task per region job

use crate::lister::Lister;
use crate::lister::gather::{Job, gather};
use crate::lister::tasks::RdsListTask;
use crate::lister::types::{Failure, Resource, Stage};
use crate::resource_kind::ResourceKind;
use std::sync::Arc;

/// Key used for the job that runs in the default region
pub(crate) const DEFAULT_REGION_KEY: &str = "default";

impl Lister {
    pub(crate) fn list_rds(&self, failures: &mut Vec<Failure>) -> Vec<Resource> {
        let jobs: Vec<Job<RdsListTask>> = match &self.regions {
            None => vec![Job {
                key: DEFAULT_REGION_KEY.to_string(),
                task: RdsListTask {
                    factory: Arc::clone(&self.factory),
                    region: None,
                },
            }],
            Some(regions) => regions
                .iter()
                .map(|region| Job {
                    key: region.clone(),
                    task: RdsListTask {
                        factory: Arc::clone(&self.factory),
                        region: Some(region.clone()),
                    },
                })
                .collect(),
        };

        gather(
            &self.executor,
            ResourceKind::Rds,
            Stage::ListInstances,
            jobs,
            failures,
        )
        .into_iter()
        .flat_map(|(_, instances)| instances)
        .map(Resource::rds)
        .collect()
    }
}
