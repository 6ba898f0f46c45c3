//! Per-region datasheet parsing
//!
//! Opens a region's datasheet, streams it through the segmenter and turns
//! any read failure or timeout into a zero-record outcome so one bad region
//! never aborts the batch.

use crate::config::ProcessorConfig;
use crate::constants::READ_BUFFER_SIZE;
use crate::error::{BenchmarkError, Result};
use crate::models::{Region, RegionOutcome, RegionStatus};
use crate::segmenter::{segment_reader, SegmentedFile, Segmenter};

use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncRead, BufReader};
use tokio::time::timeout;
use tracing::{debug, warn};

/// Parse one region, absorbing region-scoped failures
pub async fn parse_region(region: &Region, config: &ProcessorConfig) -> RegionOutcome {
    let Some(datasheet) = region.datasheet.as_deref() else {
        debug!("Region {} has no datasheet; skipping", region.code);
        return RegionOutcome::skipped(&region.code);
    };

    debug!(
        "Processing region {} from {}",
        region.code,
        datasheet.display()
    );

    match read_datasheet(&region.code, datasheet, config).await {
        Ok(segmented) => RegionOutcome {
            region: region.code.clone(),
            status: RegionStatus::Parsed,
            benchmarks: segmented.benchmarks,
            rejected: segmented.rejected,
            truncated: segmented.truncated,
        },
        Err(err) => {
            warn!("Region {} contributes no records: {}", region.code, err);
            RegionOutcome::failed(&region.code, err.to_string())
        }
    }
}

/// Open and segment a datasheet file
pub async fn read_datasheet(
    region_code: &str,
    path: &Path,
    config: &ProcessorConfig,
) -> Result<SegmentedFile> {
    let file = File::open(path)
        .await
        .map_err(|source| BenchmarkError::RegionRead {
            region: region_code.to_string(),
            path: path.to_path_buf(),
            source,
        })?;

    segment_source(region_code, path, file, config).await
}

/// Segment any byte source, honouring the configured read timeout
pub async fn segment_source<R>(
    region_code: &str,
    path: &Path,
    source: R,
    config: &ProcessorConfig,
) -> Result<SegmentedFile>
where
    R: AsyncRead + Unpin,
{
    let segmenter = Segmenter::new(region_code, Some(path.to_path_buf()))
        .with_max_records(config.max_records_per_file);
    let reading = segment_reader(BufReader::with_capacity(READ_BUFFER_SIZE, source), segmenter);

    let result = match config.read_timeout {
        Some(limit) => timeout(limit, reading)
            .await
            .map_err(|_| BenchmarkError::RegionTimeout {
                region: region_code.to_string(),
                path: path.to_path_buf(),
                timeout_secs: limit.as_secs(),
            })?,
        None => reading.await,
    };

    result.map_err(|source| BenchmarkError::RegionRead {
        region: region_code.to_string(),
        path: path.to_path_buf(),
        source,
    })
}
