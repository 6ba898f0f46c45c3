//! Region discovery for datasheet trees
//!
//! Finds the region directories under a datasheet root and picks the
//! datasheet file each one should be parsed from.

use crate::config::ProcessorConfig;
use crate::error::{BenchmarkError, Result};
use crate::models::Region;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Region discovery component for datasheet trees
#[derive(Debug)]
pub struct RegionDiscovery {
    root: PathBuf,
    config: ProcessorConfig,
}

impl RegionDiscovery {
    pub fn new(root: PathBuf, config: &ProcessorConfig) -> Self {
        Self {
            root,
            config: config.clone(),
        }
    }

    /// Discover every region directory and its datasheet
    ///
    /// Datasheet roots follow this structure:
    /// ```text
    /// root/
    ///   AK/
    ///     ak.txt
    ///   AL/
    ///     al.txt
    ///     readme.md
    ///   AS/            (no datasheet: skipped)
    /// ```
    /// Regions come back sorted by directory name, and within a region the
    /// first datasheet by file name is chosen. Entries deeper than one level
    /// below a region are not considered.
    pub fn discover_regions(&self) -> Result<Vec<Region>> {
        if !self.root.is_dir() {
            return Err(BenchmarkError::RootNotFound {
                path: self.root.clone(),
            });
        }

        debug!("Searching for region directories in: {}", self.root.display());

        let mut regions: Vec<Region> = Vec::new();

        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(2)
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    return Err(BenchmarkError::RootUnreadable {
                        path: self.root.clone(),
                        source: err,
                    });
                }
                Err(err) => {
                    warn!("Skipping unreadable entry under {}: {}", self.root.display(), err);
                    continue;
                }
            };

            match entry.depth() {
                1 if entry.file_type().is_dir() => {
                    regions.push(Region {
                        code: region_code(entry.path()),
                        path: entry.path().to_path_buf(),
                        datasheet: None,
                    });
                }
                2 if entry.file_type().is_file() => {
                    let Some(region) = regions.last_mut() else {
                        continue;
                    };
                    if region.datasheet.is_none()
                        && entry.path().parent() == Some(region.path.as_path())
                        && self.is_datasheet(entry.path())
                    {
                        region.datasheet = Some(entry.path().to_path_buf());
                    }
                }
                _ => {}
            }
        }

        debug!(
            "Found {} regions, {} with datasheets",
            regions.len(),
            regions.iter().filter(|r| r.datasheet.is_some()).count()
        );

        Ok(regions)
    }

    fn is_datasheet(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.config.is_datasheet_extension(ext))
    }
}

/// Region code is the directory's own name
fn region_code(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_string())
}
