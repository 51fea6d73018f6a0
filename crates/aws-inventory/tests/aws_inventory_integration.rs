//! Inventory integration tests - actually call AWS APIs
//!
//! These tests only read from the account. They are marked `#[ignore]` and
//! only run with:
//! ```
//! AWS_PROFILE=your_profile cargo test --test aws_inventory_integration -- --ignored
//! ```


use aws_inventory::aws::{AwsClientFactory, AwsContext, ClientFactory};
use aws_inventory::config::AwsConfig;
use aws_inventory::{Lister, ResourceKind};
use aws_inventory_executor::{SynchronousExecutor, Threadpool};
use aws_test_helpers::*;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

async fn factory() -> AwsClientFactory {
    let settings = AwsConfig {
        default_region: Some(get_test_region()),
        ..Default::default()
    };
    let ctx = AwsContext::load(&settings).await;
    AwsClientFactory::new(ctx, Handle::current())
}

/// Bucket listing, then region and tags for the first bucket
#[tokio::test(flavor = "multi_thread")]
#[ignore]
async fn test_s3_provider_calls() {
    let factory = factory().await;

    tokio::task::spawn_blocking(move || {
        let s3 = factory.s3(None).expect("default region is set");
        let buckets = s3
            .list_buckets()
            .expect("AWS credentials required - set AWS_PROFILE or AWS_ACCESS_KEY_ID");

        if let Some(bucket) = buckets.first() {
            let region = s3
                .bucket_region(&bucket.name)
                .expect("Should get bucket location");
            assert!(!region.is_empty());

            let regional = factory.s3(Some(&region)).unwrap();
            regional
                .bucket_tags(&bucket.name)
                .expect("Tag lookup in the bucket's region should succeed");
        }
    })
    .await
    .unwrap();
}

/// RDS listing in the test region
#[tokio::test(flavor = "multi_thread")]
#[ignore]
async fn test_rds_provider_calls() {
    let factory = factory().await;
    let region = get_test_region();

    tokio::task::spawn_blocking(move || {
        let instances = factory
            .rds(Some(&region))
            .unwrap()
            .list_instances()
            .expect("Should describe DB instances");
        for db in instances {
            assert_eq!(db.region, region);
            assert!(db.arn.starts_with("arn:aws"));
        }
    })
    .await
    .unwrap();
}

/// Full run over the test region with a small pool
#[tokio::test(flavor = "multi_thread")]
#[ignore]
async fn test_full_inventory_in_test_region() {
    let factory = factory().await;
    let region = get_test_region();

    let pool = Arc::new(Threadpool::new(4).unwrap());
    let executor = SynchronousExecutor::new(Arc::clone(&pool));
    let lister = Lister::builder(Arc::new(factory), executor)
        .with_regions(vec![region.clone()])
        .build();

    let inventory = tokio::task::spawn_blocking(move || {
        let inventory = lister.list();
        assert!(pool.shutdown(Duration::from_secs(30)));
        inventory
    })
    .await
    .unwrap();

    assert!(
        inventory.is_complete(),
        "unexpected failures: {:?}",
        inventory.failures
    );
    for resource in &inventory.resources {
        assert_eq!(resource.region, region);
    }

    let document = inventory.to_document(false).unwrap();
    assert_eq!(
        document.as_array().map(Vec::len),
        Some(inventory.count(ResourceKind::S3) + inventory.count(ResourceKind::Rds))
    );
}
