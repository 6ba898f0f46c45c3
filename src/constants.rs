//! Application constants for the datasheet processor
//!
//! This module contains the literal markers, field tags and keyword tables
//! recognized in NGS datasheet text, plus default values used throughout
//! the processor.

// =============================================================================
// Record Boundaries
// =============================================================================

/// Literal text that opens every datasheet record
pub const RECORD_BOUNDARY_MARKER: &str = "National Geodetic Survey, Retrieval Date";

// =============================================================================
// Field Line Tags
// =============================================================================

/// Datasheet field tags used as cheap pre-filters before regex matching
pub mod tags {
    /// Point identifier line
    pub const PID: &str = "PID";

    /// Point name line
    pub const DESIGNATION: &str = "DESIGNATION";

    /// Horizontal position line
    pub const POSITION: &str = "POSITION-";

    /// Ellipsoidal height line
    pub const ELLIPSOID_HEIGHT: &str = "ELLIP HT-";

    /// Orthometric height line
    pub const ORTHOMETRIC_HEIGHT: &str = "ORTHO HEIGHT";

    /// Separator that follows every tagged field name
    pub const FIELD_SEPARATOR: &str = "-";
}

// =============================================================================
// Type Classification
// =============================================================================

/// Keywords that reclassify a benchmark, in the order they are scanned
pub const TYPE_KEYWORDS: &[(&str, crate::models::BenchmarkType)] = &[
    ("PACS", crate::models::BenchmarkType::PrimaryAirportControl),
    ("CORS", crate::models::BenchmarkType::Cors),
    ("TRIANGULATION", crate::models::BenchmarkType::Triangulation),
    ("VERTICAL", crate::models::BenchmarkType::Vertical),
];

// =============================================================================
// Discovery & Output Defaults
// =============================================================================

/// Default extension identifying a plain-text datasheet
pub const DEFAULT_DATASHEET_EXTENSION: &str = "txt";

/// Output artifact file name used when no explicit path is given
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "benchmarks.json";

/// Prefix of the backfilled description; followed by type and state
pub const DESCRIPTION_PREFIX: &str = "NGS";

/// Progress bar template shared by the batch runner
pub const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}";

/// Read buffer size for streaming datasheet lines
pub const READ_BUFFER_SIZE: usize = 64 * 1024;
