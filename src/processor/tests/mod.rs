//! Integration tests for the processor module
//!
//! Tests the complete batch pipeline against temporary datasheet trees.

pub mod error_handling;

use std::fs;
use std::path::{Path, PathBuf};

pub(crate) const BOUNDARY: &str = " National Geodetic Survey, Retrieval Date = JANUARY 1, 2024";

/// One datasheet record block with a PID and position
pub(crate) fn record_block(pid: &str, lat_deg: u32, lon_deg: u32) -> String {
    format!(
        "{BOUNDARY}\n\
         \x20{pid}  DESIGNATION -  POINT {pid}\n\
         \x20{pid}  PID         -  {pid}\n\
         \x20{pid}* NAD 83(2011) POSITION- {lat_deg} 00 00.00000(N) {lon_deg:03} 00 00.00000(W)   ADJUSTED\n"
    )
}

/// Write a region directory holding one datasheet
pub(crate) fn write_region(root: &Path, code: &str, contents: &str) -> PathBuf {
    let region_path = root.join(code);
    fs::create_dir_all(&region_path).unwrap();
    let datasheet = region_path.join(format!("{}.txt", code.to_lowercase()));
    fs::write(&datasheet, contents).unwrap();
    datasheet
}
