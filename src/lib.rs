//! NGS Benchmarks Library
//!
//! Extracts survey benchmark records from the plain-text geodetic datasheet
//! dumps published by the National Geodetic Survey, one file per region, and
//! writes them as a single normalized JSON collection.
//!
//! This library provides tools for:
//! - Streaming datasheet text with Latin-1 decoding and any line ending
//! - Segmenting the line stream into record blocks at boundary lines
//! - Recognizing identifier, name, elevation, position and type lines
//! - Converting DMS positions to signed decimal degrees
//! - Walking a per-region directory tree and aggregating results in order
//! - Serializing the collection and reporting counts by type and state

pub mod cli;
pub mod config;
pub mod constants;
pub mod coordinates;
pub mod discovery;
pub mod error;
pub mod extractor;
pub mod lines;
pub mod models;
pub mod processor;
pub mod segmenter;

pub use config::ProcessorConfig;
pub use error::{BenchmarkError, Result};
pub use models::{Benchmark, BenchmarkSummary, BenchmarkType, ProcessingStats};
pub use processor::BatchProcessor;
pub use segmenter::parse_datasheet_str;
