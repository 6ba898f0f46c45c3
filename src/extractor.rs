//! Per-line field recognition for datasheet record blocks.
//!
//! Each rule pairs a cheap substring predicate with a setter that captures
//! structured values via regex and mutates one field of the open record.
//! Every rule is evaluated against every line; a line matching nothing is a
//! no-op. Two rules fold with last-write-wins semantics on purpose: the
//! elevation rule (ellipsoidal and orthometric heights overwrite each other
//! in file order) and the type rule (the last keyword line decides).

use crate::constants::{tags, TYPE_KEYWORDS};
use crate::coordinates::Dms;
use crate::models::{BenchmarkType, PartialBenchmark};
use regex::Regex;
use std::sync::LazyLock;

static PID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"PID\s*-\s*([A-Z0-9]{6})").expect("valid PID pattern"));

static DESIGNATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"DESIGNATION\s*-\s*(.*)$").expect("valid designation pattern")
});

static ELEVATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:ELLIP HT|ORTHO HEIGHT)\s*-\s*([-+]?\d+(?:\.\d+)?)\s*\(meters\)")
        .expect("valid elevation pattern")
});

static POSITION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(\d+)\s+(\d+)\s+(\d+(?:\.\d+)?)\s*\(([NS])\)\s+(\d+)\s+(\d+)\s+(\d+(?:\.\d+)?)\s*\(([EW])\)",
    )
    .expect("valid position pattern")
});

/// A line predicate and the field setter it guards
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub applies: fn(&str) -> bool,
    pub apply: fn(&str, &mut PartialBenchmark),
}

/// All field rules; evaluation order only matters for the folded fields
pub const FIELD_RULES: &[FieldRule] = &[
    FieldRule {
        name: "identifier",
        applies: is_identifier_line,
        apply: extract_identifier,
    },
    FieldRule {
        name: "name",
        applies: is_designation_line,
        apply: extract_name,
    },
    FieldRule {
        name: "elevation",
        applies: is_elevation_line,
        apply: extract_elevation,
    },
    FieldRule {
        name: "position",
        applies: is_position_line,
        apply: extract_position,
    },
    FieldRule {
        name: "type",
        applies: has_type_keyword,
        apply: extract_type,
    },
];

/// Run every rule against one line of an open record
pub fn extract_fields(line: &str, record: &mut PartialBenchmark) {
    for rule in FIELD_RULES {
        if (rule.applies)(line) {
            (rule.apply)(line, record);
        }
    }
}

fn is_identifier_line(line: &str) -> bool {
    line.contains(tags::PID) && line.contains(tags::FIELD_SEPARATOR)
}

/// Later PID lines overwrite earlier ones
fn extract_identifier(line: &str, record: &mut PartialBenchmark) {
    if let Some(caps) = PID_PATTERN.captures(line) {
        record.id = Some(caps[1].to_string());
    }
}

fn is_designation_line(line: &str) -> bool {
    line.contains(tags::DESIGNATION) && line.contains(tags::FIELD_SEPARATOR)
}

fn extract_name(line: &str, record: &mut PartialBenchmark) {
    if let Some(caps) = DESIGNATION_PATTERN.captures(line) {
        let name = caps[1].trim();
        if !name.is_empty() {
            record.name = Some(name.to_string());
        }
    }
}

fn is_elevation_line(line: &str) -> bool {
    line.contains(tags::ELLIPSOID_HEIGHT)
        || line
            .find(tags::ORTHOMETRIC_HEIGHT)
            .is_some_and(|at| line[at..].contains(tags::FIELD_SEPARATOR))
}

/// Ellipsoidal and orthometric heights share one slot; the later line wins
fn extract_elevation(line: &str, record: &mut PartialBenchmark) {
    if let Some(elevation) = ELEVATION_PATTERN
        .captures(line)
        .and_then(|caps| caps[1].parse::<f64>().ok())
    {
        record.elevation = Some(elevation);
    }
}

fn is_position_line(line: &str) -> bool {
    line.contains(tags::POSITION)
}

/// Only the first parsable position in a record is kept
fn extract_position(line: &str, record: &mut PartialBenchmark) {
    if record.latitude.is_some() || record.longitude.is_some() {
        return;
    }
    if let Some((latitude, longitude)) = parse_position(line) {
        record.latitude = Some(latitude);
        record.longitude = Some(longitude);
    }
}

/// Parse the `deg min sec(N|S) deg min sec(E|W)` sextuple of a position line
pub fn parse_position(line: &str) -> Option<(f64, f64)> {
    let start = line.find(tags::POSITION)? + tags::POSITION.len();
    let caps = POSITION_PATTERN.captures(&line[start..])?;
    let latitude = Dms::parse(&caps[1], &caps[2], &caps[3], &caps[4])?;
    let longitude = Dms::parse(&caps[5], &caps[6], &caps[7], &caps[8])?;
    Some((latitude.to_decimal(), longitude.to_decimal()))
}

fn has_type_keyword(line: &str) -> bool {
    TYPE_KEYWORDS
        .iter()
        .any(|(keyword, _)| line.contains(keyword))
}

/// No keyword priority: the last keyword line in a record decides the type
fn extract_type(line: &str, record: &mut PartialBenchmark) {
    if let Some(benchmark_type) = classify_line(line) {
        record.benchmark_type = benchmark_type;
    }
}

/// Category of the rightmost type keyword on the line
pub fn classify_line(line: &str) -> Option<BenchmarkType> {
    TYPE_KEYWORDS
        .iter()
        .filter_map(|(keyword, benchmark_type)| {
            line.rfind(keyword).map(|at| (at, *benchmark_type))
        })
        .max_by_key(|(at, _)| *at)
        .map(|(_, benchmark_type)| benchmark_type)
}
