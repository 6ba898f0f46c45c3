//! Record segmentation for datasheet line streams.
//!
//! A datasheet is a concatenation of record blocks, each opened by a line
//! containing [`RECORD_BOUNDARY_MARKER`]. The segmenter is a two-state
//! machine: `Idle` before the first boundary, `Building` while a block is
//! open. A block is finalized when the next boundary appears or when the
//! input ends, because the last block in a file has no trailing boundary.
//!
//! The transition itself is the pure function [`step`]; [`Segmenter`] drives
//! it over sync or async line sources and collects what it emits.

use crate::constants::RECORD_BOUNDARY_MARKER;
use crate::extractor::extract_fields;
use crate::lines::{split_lines, DatasheetLines};
use crate::models::{Benchmark, PartialBenchmark};
use std::path::PathBuf;
use tokio::io::AsyncBufRead;
use tracing::{debug, warn};

/// Segmentation state between lines
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SegmenterState {
    #[default]
    Idle,
    Building(PartialBenchmark),
}

/// Result of closing a record block
#[derive(Debug, Clone, PartialEq)]
pub enum Finalized {
    Accepted(Benchmark),
    Rejected,
}

impl Finalized {
    fn from_partial(partial: PartialBenchmark) -> Self {
        match partial.finalize() {
            Some(benchmark) => Finalized::Accepted(benchmark),
            None => Finalized::Rejected,
        }
    }
}

/// Values stamped onto every record opened within one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordContext {
    pub state: String,
    pub source_reference: Option<PathBuf>,
}

impl RecordContext {
    pub fn new(state: impl Into<String>, source_reference: Option<PathBuf>) -> Self {
        Self {
            state: state.into(),
            source_reference,
        }
    }

    fn open_record(&self) -> PartialBenchmark {
        PartialBenchmark::new(self.state.clone(), self.source_reference.clone())
    }
}

pub fn is_boundary(line: &str) -> bool {
    line.contains(RECORD_BOUNDARY_MARKER)
}

/// Advance the state machine by one line
pub fn step(
    state: SegmenterState,
    line: &str,
    context: &RecordContext,
) -> (SegmenterState, Option<Finalized>) {
    if is_boundary(line) {
        let closed = match state {
            SegmenterState::Building(partial) => Some(Finalized::from_partial(partial)),
            SegmenterState::Idle => None,
        };
        return (SegmenterState::Building(context.open_record()), closed);
    }

    match state {
        SegmenterState::Building(mut partial) => {
            extract_fields(line, &mut partial);
            (SegmenterState::Building(partial), None)
        }
        SegmenterState::Idle => (SegmenterState::Idle, None),
    }
}

/// Close whatever block is open at end of input
pub fn flush(state: SegmenterState) -> Option<Finalized> {
    match state {
        SegmenterState::Building(partial) => Some(Finalized::from_partial(partial)),
        SegmenterState::Idle => None,
    }
}

/// Everything one file contributed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentedFile {
    pub benchmarks: Vec<Benchmark>,
    pub rejected: usize,
    pub truncated: bool,
}

/// Drives [`step`] over a line stream and collects accepted records
#[derive(Debug)]
pub struct Segmenter {
    context: RecordContext,
    state: SegmenterState,
    max_records: Option<usize>,
    output: SegmentedFile,
}

impl Segmenter {
    pub fn new(state: impl Into<String>, source_reference: Option<PathBuf>) -> Self {
        Self {
            context: RecordContext::new(state, source_reference),
            state: SegmenterState::Idle,
            max_records: None,
            output: SegmentedFile::default(),
        }
    }

    /// Stop accepting records after `max_records`; excess is reported as truncation
    pub fn with_max_records(mut self, max_records: Option<usize>) -> Self {
        self.max_records = max_records;
        self
    }

    pub fn is_truncated(&self) -> bool {
        self.output.truncated
    }

    pub fn feed_line(&mut self, line: &str) {
        if self.output.truncated {
            return;
        }
        let (next, closed) = step(std::mem::take(&mut self.state), line, &self.context);
        self.state = next;
        if let Some(closed) = closed {
            self.collect(closed);
        }
    }

    pub fn feed_lines<'a>(&mut self, lines: impl IntoIterator<Item = &'a str>) {
        for line in lines {
            if self.output.truncated {
                break;
            }
            self.feed_line(line);
        }
    }

    /// Flush the open block and hand back the collected records
    pub fn finish(mut self) -> SegmentedFile {
        if !self.output.truncated {
            if let Some(closed) = flush(std::mem::take(&mut self.state)) {
                self.collect(closed);
            }
        }

        if self.output.truncated {
            warn!(
                "Record cap of {} reached for region {}; remaining records not emitted",
                self.max_records.unwrap_or_default(),
                self.context.state
            );
        }
        debug!(
            "Region {}: {} records emitted, {} rejected",
            self.context.state,
            self.output.benchmarks.len(),
            self.output.rejected
        );

        self.output
    }

    fn collect(&mut self, closed: Finalized) {
        match closed {
            Finalized::Accepted(benchmark) => {
                let full = self
                    .max_records
                    .is_some_and(|max| self.output.benchmarks.len() >= max);
                if full {
                    self.output.truncated = true;
                } else {
                    self.output.benchmarks.push(benchmark);
                }
            }
            Finalized::Rejected => self.output.rejected += 1,
        }
    }
}

/// Segment an async byte stream, one line at a time in file order
pub async fn segment_reader<R>(reader: R, mut segmenter: Segmenter) -> std::io::Result<SegmentedFile>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = DatasheetLines::new(reader);
    while !segmenter.is_truncated() {
        match lines.next_line().await? {
            Some(line) => segmenter.feed_line(&line),
            None => break,
        }
    }
    Ok(segmenter.finish())
}

/// Parse datasheet text already held in memory
pub fn parse_datasheet_str(
    text: &str,
    state: impl Into<String>,
    source_reference: Option<PathBuf>,
) -> Vec<Benchmark> {
    let mut segmenter = Segmenter::new(state, source_reference);
    segmenter.feed_lines(split_lines(text));
    segmenter.finish().benchmarks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BenchmarkType;
    use tokio::io::BufReader;

    const BOUNDARY: &str = " National Geodetic Survey, Retrieval Date = JANUARY 1, 2024";

    fn context() -> RecordContext {
        RecordContext::new("PA", Some(PathBuf::from("PA/pa.txt")))
    }

    #[test]
    fn test_idle_ignores_field_lines() {
        let (state, closed) = step(SegmenterState::Idle, "PID - AB1234", &context());
        assert_eq!(state, SegmenterState::Idle);
        assert!(closed.is_none());
    }

    #[test]
    fn test_boundary_opens_fresh_record() {
        let (state, closed) = step(SegmenterState::Idle, BOUNDARY, &context());
        assert!(closed.is_none());
        match state {
            SegmenterState::Building(partial) => {
                assert_eq!(partial.state, "PA");
                assert_eq!(partial.benchmark_type, BenchmarkType::ControlPoint);
                assert_eq!(partial.id, None);
                assert_eq!(partial.source_reference, Some(PathBuf::from("PA/pa.txt")));
            }
            SegmenterState::Idle => panic!("Expected Building state"),
        }
    }

    #[test]
    fn test_boundary_closes_open_record() {
        let ctx = context();
        let (state, _) = step(SegmenterState::Idle, BOUNDARY, &ctx);
        let (state, _) = step(state, "PID - AB1234", &ctx);
        let (state, _) = step(state, "POSITION- 40 0 0.00(N) 75 0 0.00(W)", &ctx);
        let (state, closed) = step(state, BOUNDARY, &ctx);

        match closed {
            Some(Finalized::Accepted(benchmark)) => assert_eq!(benchmark.id, "AB1234"),
            other => panic!("Expected accepted record, got {:?}", other),
        }
        assert_eq!(state, SegmenterState::Building(ctx.open_record()));
    }

    #[test]
    fn test_incomplete_record_is_rejected() {
        let ctx = context();
        let (state, _) = step(SegmenterState::Idle, BOUNDARY, &ctx);
        let (state, _) = step(state, "PID - AB1234", &ctx);
        assert_eq!(flush(state), Some(Finalized::Rejected));
        assert_eq!(flush(SegmenterState::Idle), None);
    }

    #[test]
    fn test_parse_without_boundaries_yields_nothing() {
        let text = "PID - AB1234\nPOSITION- 40 0 0.00(N) 75 0 0.00(W)\n";
        assert!(parse_datasheet_str(text, "PA", None).is_empty());
    }

    #[test]
    fn test_last_record_flushed_at_end() {
        let text = format!(
            "{BOUNDARY}\nPID - AB1234\nPOSITION- 40 0 0.00(N) 75 0 0.00(W)\n\
             {BOUNDARY}\nPID - CD5678\nPOSITION- 41 0 0.00(N) 76 0 0.00(W)"
        );
        let benchmarks = parse_datasheet_str(&text, "PA", None);
        let ids: Vec<_> = benchmarks.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["AB1234", "CD5678"]);
    }

    #[test]
    fn test_fields_do_not_leak_between_records() {
        let text = format!(
            "{BOUNDARY}\nPID - AB1234\nDESIGNATION - FIRST\nVERTICAL ORDER - FIRST\n\
             POSITION- 40 0 0.00(N) 75 0 0.00(W)\n\
             {BOUNDARY}\nPID - CD5678\nPOSITION- 41 0 0.00(N) 76 0 0.00(W)\n"
        );
        let benchmarks = parse_datasheet_str(&text, "PA", None);
        assert_eq!(benchmarks.len(), 2);
        assert_eq!(benchmarks[1].name, None);
        assert_eq!(benchmarks[1].benchmark_type, BenchmarkType::ControlPoint);
        assert_eq!(benchmarks[0].benchmark_type, BenchmarkType::Vertical);
    }

    #[test]
    fn test_record_cap_truncates() {
        let block = format!("{BOUNDARY}\nPID - AB1234\nPOSITION- 40 0 0.00(N) 75 0 0.00(W)\n");
        let text = block.repeat(3);

        let mut segmenter = Segmenter::new("PA", None).with_max_records(Some(2));
        segmenter.feed_lines(split_lines(&text));
        let output = segmenter.finish();

        assert_eq!(output.benchmarks.len(), 2);
        assert!(output.truncated);
    }

    #[test]
    fn test_rejected_count() {
        let text = format!(
            "{BOUNDARY}\nPID - AB1234\n{BOUNDARY}\nPOSITION- 40 0 0.00(N) 75 0 0.00(W)\n\
             {BOUNDARY}\nPID - CD5678\nPOSITION- 41 0 0.00(N) 76 0 0.00(W)\n"
        );
        let mut segmenter = Segmenter::new("PA", None);
        segmenter.feed_lines(split_lines(&text));
        let output = segmenter.finish();

        assert_eq!(output.benchmarks.len(), 1);
        assert_eq!(output.rejected, 2);
        assert!(!output.truncated);
    }

    #[tokio::test]
    async fn test_segment_reader_matches_in_memory_parse() {
        let text = format!(
            "{BOUNDARY}\r\nPID - AB1234\r\nPOSITION- 40 0 0.00(N) 75 0 0.00(W)\r\n\
             {BOUNDARY}\rPID - CD5678\rPOSITION- 41 0 0.00(N) 76 0 0.00(W)"
        );
        let reader = BufReader::with_capacity(16, text.as_bytes());
        let output = segment_reader(reader, Segmenter::new("PA", None)).await.unwrap();

        assert_eq!(output.benchmarks, parse_datasheet_str(&text, "PA", None));
        assert_eq!(output.benchmarks.len(), 2);
    }
}
