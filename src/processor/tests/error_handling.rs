//! Error handling integration tests

use super::{record_block, write_region};
use crate::config::ProcessorConfig;
use crate::error::BenchmarkError;
use crate::processor::BatchProcessor;
use std::fs;
use tempfile::TempDir;

fn quiet() -> ProcessorConfig {
    ProcessorConfig::default().without_progress()
}

#[tokio::test]
async fn test_nonexistent_root() {
    let temp_dir = TempDir::new().unwrap();
    let nonexistent_path = temp_dir.path().join("nonexistent");

    let result = BatchProcessor::new(nonexistent_path.clone(), None);

    match result.unwrap_err() {
        BenchmarkError::RootNotFound { path } => {
            assert_eq!(path, nonexistent_path);
        }
        other => panic!("Expected RootNotFound error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_root_removed_before_processing() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("datasheets");
    fs::create_dir_all(&root).unwrap();

    let processor = BatchProcessor::new(root.clone(), None)
        .unwrap()
        .with_config(quiet());
    fs::remove_dir_all(&root).unwrap();

    let result = processor.process().await;
    assert!(matches!(result, Err(BenchmarkError::RootNotFound { .. })));
}

#[tokio::test]
async fn test_region_without_datasheet_is_not_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("datasheets");
    write_region(&root, "PA", &record_block("AB1234", 40, 75));
    fs::create_dir_all(root.join("GU")).unwrap();
    fs::write(root.join("GU").join("readme.md"), "no datasheet here").unwrap();

    let processor = BatchProcessor::new(root, None).unwrap().with_config(quiet());
    let stats = processor.process().await.unwrap();

    assert_eq!(stats.regions_discovered, 2);
    assert_eq!(stats.regions_processed, 1);
    assert_eq!(stats.regions_skipped, 1);
    assert_eq!(stats.regions_failed, 0);
    assert_eq!(stats.records_emitted, 1);
    assert!(!stats.summary.by_state.contains_key("GU"));
}

#[tokio::test]
async fn test_garbled_datasheet_contributes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("datasheets");
    write_region(&root, "PA", "This is not an NGS datasheet\n\u{0}\u{1}\u{2}");
    write_region(&root, "NY", &record_block("AB1234", 42, 74));

    let processor = BatchProcessor::new(root, None).unwrap().with_config(quiet());
    let (benchmarks, stats) = processor.collect().await.unwrap();

    assert_eq!(stats.regions_processed, 2);
    assert_eq!(benchmarks.len(), 1);
    assert_eq!(benchmarks[0].state, "NY");
}

#[tokio::test]
async fn test_invalid_config_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("datasheets");
    fs::create_dir_all(&root).unwrap();

    let processor = BatchProcessor::new(root, None)
        .unwrap()
        .with_config(quiet().with_workers(0));

    let result = processor.collect().await;
    assert!(matches!(result, Err(BenchmarkError::Configuration { .. })));
}

#[cfg(unix)]
#[tokio::test]
async fn test_unreadable_datasheet_is_region_failure() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("datasheets");
    let locked = write_region(&root, "AK", &record_block("AB1234", 61, 150));
    write_region(&root, "HI", &record_block("CD5678", 21, 157));
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits do not bind a privileged user
    if fs::read(&locked).is_ok() {
        return;
    }

    let processor = BatchProcessor::new(root, None).unwrap().with_config(quiet());
    let (benchmarks, stats) = processor.collect().await.unwrap();

    assert_eq!(stats.regions_failed, 1);
    assert_eq!(stats.regions_processed, 1);
    assert_eq!(benchmarks.len(), 1);
    assert_eq!(benchmarks[0].state, "HI");
}
